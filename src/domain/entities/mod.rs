//! # Domain Entities
//!
//! Core domain entities, each mapping directly to a database table.
//!
//! - **Category**: a named grouping for servers, with an optional icon
//! - **Server**: a community owned by one user, listed under one category
//! - **Channel**: a named sub-unit of a server, with optional icon and banner
//!
//! Each entity has an associated repository trait, implemented in the
//! infrastructure layer.

mod category;
mod channel;
mod server;

pub use category::{Category, CategoryRepository};
pub use channel::{normalize_name, Channel, ChannelRepository, MAX_CHANNEL_NAME_LENGTH};
pub use server::{Server, ServerQuery, ServerRecord, ServerRepository};

#[cfg(test)]
pub use category::MockCategoryRepository;
#[cfg(test)]
pub use channel::MockChannelRepository;
#[cfg(test)]
pub use server::MockServerRepository;
