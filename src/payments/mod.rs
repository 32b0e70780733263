pub mod error;
pub mod forwarder;
pub mod types;
