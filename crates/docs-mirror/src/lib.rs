mod config;
mod error;
mod fetcher;
mod filter;
mod gate;
mod mirror;
mod sitemap;

pub use config::MirrorConfig;
pub use error::MirrorError;
pub use fetcher::{markdown_url, output_path, DownloadOutcome, Fetcher};
pub use filter::{filter_docs, is_translated, relative_path, DEFAULT_LANGUAGES};
pub use gate::{AdmissionGate, GatePermit};
pub use mirror::{run, MirrorReport};
pub use sitemap::{fetch_sitemap, parse_sitemap, Sitemap, SitemapKind};
