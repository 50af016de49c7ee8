pub mod fetcher;
pub mod traits;

pub use fetcher::{fetch_entries, CatalogFetcher};
pub use traits::Fetcher;
