//! Configuration loading for memoir

mod loader;

pub use loader::load_config;
