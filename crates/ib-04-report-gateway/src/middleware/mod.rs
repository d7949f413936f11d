//! Middleware stack for the report gateway.
//!
//! Layer order: Request → Tracing → Timeout → Handler

pub mod timeout;
pub mod tracing;

pub use self::timeout::TimeoutLayer;
pub use self::tracing::TracingLayer;
