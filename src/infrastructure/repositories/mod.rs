//! Repository Implementations
//!
//! PostgreSQL implementations of the domain repository traits.
//!
//! - **PgCategoryRepository** - categories, cascading to servers and channels
//! - **PgServerRepository** - servers, membership and the listing query
//! - **PgChannelRepository** - channels within servers
//!
//! Deletes report the storage paths they orphan so the caller can purge them.
//!
//! ```rust,ignore
//! use crate::infrastructure::repositories::{
//!     PgCategoryRepository, PgChannelRepository, PgServerRepository,
//! };
//!
//! let categories = PgCategoryRepository::new(pool.clone());
//! let servers = PgServerRepository::new(pool.clone());
//! let channels = PgChannelRepository::new(pool);
//! ```

pub mod category_repository;
pub mod channel_repository;
pub mod server_repository;

pub use category_repository::PgCategoryRepository;
pub use channel_repository::PgChannelRepository;
pub use server_repository::PgServerRepository;
