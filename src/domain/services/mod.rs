//! Domain Services
//!
//! Business logic that spans entities without touching infrastructure.

pub mod asset_lifecycle;

pub use asset_lifecycle::{owned_files, superseded_files};
