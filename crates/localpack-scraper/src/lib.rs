pub mod client;
pub mod error;
pub mod extract;
pub mod layout;
pub mod phone;
pub mod search;

pub use client::ResultPageClient;
pub use error::{ExtractError, ScrapeError};
pub use extract::{extract_listings, ExtractOptions};
pub use layout::{PageLayout, GOOGLE_LOCAL_PACK};
pub use phone::{normalize_phone, Region};
pub use search::{SearchOptions, PAGE_SIZE};
