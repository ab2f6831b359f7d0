//! Integration Tests Entry Point
//!
//! Tests are organized by module:
//! - `api/` - REST API endpoint tests
//! - `repository/` - PostgreSQL repository tests (need `DATABASE_URL`)
//! - `common/` - Shared test utilities

mod api;
mod common;
mod repository;
