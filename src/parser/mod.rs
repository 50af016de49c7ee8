pub mod promotion_parser;

pub use promotion_parser::{catalog_elements, classify};
