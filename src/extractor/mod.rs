pub mod page_extractor;
pub mod sitemap;

pub use page_extractor::SignalExtractor;
pub use sitemap::{parse_sitemap, SitemapDocument, SitemapEntry, SitemapFormat};
