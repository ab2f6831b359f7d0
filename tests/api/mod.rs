//! REST API endpoint tests.

mod category_tests;
mod channel_tests;
mod health_tests;
mod server_listing_tests;
