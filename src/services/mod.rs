pub mod cache;
pub mod product;

pub use cache::{CacheError, CacheService, ListingCacheInvalidator};
pub use product::{ProductError, ProductListing, ProductService};
