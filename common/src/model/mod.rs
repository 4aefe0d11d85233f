pub mod chat;
pub mod datasource;
pub mod survey;
