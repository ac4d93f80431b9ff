use std::fmt;
use std::io::Write;

use futures::stream::{FuturesUnordered, StreamExt};

use crate::config::MirrorConfig;
use crate::error::MirrorError;
use crate::fetcher::{DownloadOutcome, Fetcher};
use crate::filter::filter_docs;
use crate::sitemap::fetch_sitemap;

/// Outcomes of a mirror run, in completion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MirrorReport {
    pub outcomes: Vec<DownloadOutcome>,
}

impl MirrorReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn failed_urls(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|o| !o.success)
            .map(|o| o.url.as_str())
    }
}

impl fmt::Display for MirrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Downloaded: {}, Failed: {}", self.succeeded(), self.failed())?;
        if self.failed() > 0 {
            writeln!(f, "Failed URLs:")?;
            for url in self.failed_urls() {
                writeln!(f, "  - {url}")?;
            }
        }
        Ok(())
    }
}

/// Mirrors the documentation listed by `config.sitemap_url` into `config.output_dir`.
///
/// Progress lines are written to `progress`. Only an invalid config or a
/// failure to read the sitemap or create the output root is returned as an
/// error, individual page failures end up in the report.
pub async fn run<W: Write>(
    config: &MirrorConfig,
    progress: &mut W,
) -> Result<MirrorReport, MirrorError> {
    config.validate()?;
    fs_err::tokio::create_dir_all(&config.output_dir).await?;

    writeln!(progress, "Fetching sitemap...")?;
    let urls = fetch_sitemap(config).await?;
    log::info!("Sitemap {} lists {} pages", config.sitemap_url, urls.len());

    let docs = filter_docs(urls, &config.docs_root, &config.languages);
    writeln!(progress, "Found {} English docs", docs.len())?;

    let fetcher = Fetcher::new(config.clone());
    let outcomes = docs
        .iter()
        .map(|url| fetcher.fetch(url))
        .collect::<FuturesUnordered<_>>()
        .collect::<Vec<_>>()
        .await;

    Ok(MirrorReport { outcomes })
}
