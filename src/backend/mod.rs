// HTTP client for the compute backend
pub mod client;

pub use client::{BackendClient, BackendError};
