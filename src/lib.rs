pub mod config;
pub mod filter;
pub mod loader;
pub mod model;
pub mod publisher;
pub mod store;
pub mod utils;
