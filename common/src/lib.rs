//! Types and client-side logic shared by the `frontend` and `backend` crates.
//!
//! Everything in here is plain Rust with no browser or server dependency so
//! that it compiles for both `wasm32-unknown-unknown` and the native target,
//! and so that the behaviour the UI relies on can be unit tested natively.

pub mod conversation;
pub mod model;
pub mod source_url;
