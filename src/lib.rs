//! # Chat Community Library
//!
//! Backend for a chat community: categories group servers, servers hold
//! members and channels, and categories and channels carry uploaded images.
//!
//! - RESTful HTTP API endpoints
//! - PostgreSQL for persistent storage
//! - Pluggable file storage (local disk or in-memory)
//!
//! ## Architecture
//!
//! - **Domain Layer**: Entities, repository traits, file-field catalogue
//! - **Application Layer**: Services, the server listing pipeline, DTOs
//! - **Infrastructure Layer**: PostgreSQL repositories, storage backends, metrics
//! - **Presentation Layer**: HTTP handlers, extractors, middleware
//!
//! ## Module Structure
//!
//! ```text
//! chat_community/
//! +-- config/         Configuration management
//! +-- domain/         Entities, value objects, and traits
//! +-- application/    Application services and DTOs
//! +-- infrastructure/ Database, storage, and metrics
//! +-- presentation/   HTTP routes and middleware
//! +-- shared/         Common utilities (errors, snowflake IDs, validation)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
