//! lambda-echo SDK - Types and utilities shared by the lambda-echo handler
//!
//! This crate provides the gateway event model, the normalized request the
//! handler dispatches on, and the response envelope it hands back.

pub mod event;
pub mod request;
pub mod response;
pub mod ipc;
pub mod error;

// Re-export key types at crate root
pub use request::Request;
pub use response::Response;
pub use error::HandlerError;
