//! # Ports Layer
//!
//! - `inbound.rs` - Driving ports (what the resolver and the reports call)
//! - `outbound.rs` - Driven ports (what the host supplies: a key-value store and a codec)

pub mod inbound;
pub mod outbound;
