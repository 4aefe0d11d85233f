pub mod chat;
pub mod data_sources;
pub mod survey;
