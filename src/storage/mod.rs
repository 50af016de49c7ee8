pub mod json_cache;

pub use json_cache::JsonCache;
