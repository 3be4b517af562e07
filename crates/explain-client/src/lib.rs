mod client;
mod error;
mod types;

pub use client::{EXPLAIN_PATH, ExplainClient};
pub use error::Error;
pub use types::*;
