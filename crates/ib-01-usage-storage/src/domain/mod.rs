//! # Domain Layer
//!
//! Pure storage vocabulary: the key layout and the error taxonomy.

pub mod errors;
pub mod keys;
