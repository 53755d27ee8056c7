pub mod config;
pub mod error;
pub mod page_size;
