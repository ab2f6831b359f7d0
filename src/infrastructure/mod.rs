//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Database pool and repositories (PostgreSQL)
//! - File storage backends
//! - Prometheus metrics

pub mod database;
pub mod metrics;
pub mod repositories;
pub mod storage;
