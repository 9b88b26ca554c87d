pub mod error;
pub mod prediction;
pub mod request;
pub mod result;
pub mod service;

#[cfg(feature = "api")]
pub mod client;
