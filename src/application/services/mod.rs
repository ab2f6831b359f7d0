//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AssetService**: Upload validation, storage, and file cleanup
//! - **CategoryService**: Category management and icons
//! - **ServerService**: Server management, membership, and the filtered listing
//! - **ChannelService**: Channel management, icons, and banners

pub mod asset_service;
pub mod category_service;
pub mod channel_service;
pub mod server_service;

pub use asset_service::AssetService;

// Re-export category service types
pub use category_service::{
    CategoryService, CategoryServiceImpl, CreateCategoryDto, UpdateCategoryDto,
};

// Re-export server service types
pub use server_service::{
    CreateServerDto, ServerListing, ServerService, ServerServiceImpl, UpdateServerDto,
};

// Re-export channel service types
pub use channel_service::{ChannelService, ChannelServiceImpl, CreateChannelDto, UpdateChannelDto};
