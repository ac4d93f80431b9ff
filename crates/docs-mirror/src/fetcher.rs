use std::path::{Component, Path, PathBuf};

use reqwest::StatusCode;

use crate::config::MirrorConfig;
use crate::error::MirrorError;
use crate::filter::relative_path;
use crate::gate::AdmissionGate;
use crate::sitemap;

/// Result of mirroring one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub url: String,
    pub success: bool,
}

/// Address of the markdown rendition of the page at `url`.
pub fn markdown_url(url: &str) -> String {
    format!("{}.md", url.trim_end_matches('/'))
}

/// Local file mirroring the page at `url`: its path after `docs_root`, or
/// `index` for the root page, with a `.md` extension.
pub fn output_path(
    output_dir: &Path,
    url: &str,
    docs_root: &str,
) -> Result<PathBuf, MirrorError> {
    let rel = relative_path(url, docs_root)
        .unwrap_or_default()
        .trim_matches('/');
    let rel = if rel.is_empty() { "index" } else { rel };
    let rel = PathBuf::from(format!("{rel}.md"));

    if rel
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return Err(MirrorError::UnsafePath {
            url: url.to_string(),
        });
    }

    Ok(output_dir.join(rel))
}

/// Downloads pages to the output tree, never more than the configured limit at once.
#[derive(Debug, Clone)]
pub struct Fetcher {
    config: MirrorConfig,
    gate: AdmissionGate,
}

impl Fetcher {
    pub fn new(config: MirrorConfig) -> Self {
        let gate = AdmissionGate::new(config.concurrency_limit);
        Self { config, gate }
    }

    pub fn gate(&self) -> &AdmissionGate {
        &self.gate
    }

    /// Mirrors one page. Failures are logged and reported in the outcome,
    /// they are never propagated.
    pub async fn fetch(&self, url: &str) -> DownloadOutcome {
        let _permit = self.gate.acquire().await;

        let success = match self.download(url).await {
            Ok(success) => success,
            Err(e) => {
                log::warn!("Error downloading {url}: {e}");
                false
            }
        };

        DownloadOutcome {
            url: url.to_string(),
            success,
        }
    }

    async fn download(&self, url: &str) -> Result<bool, MirrorError> {
        let path = output_path(&self.config.output_dir, url, &self.config.docs_root)?;
        let md_url = markdown_url(url);
        let fetch_err = |source| MirrorError::Fetch {
            url: md_url.clone(),
            source,
        };

        let resp = sitemap::get(&self.config, &md_url)
            .send()
            .await
            .map_err(fetch_err)?;

        if resp.status() != StatusCode::OK {
            log::debug!("Skipping {md_url} got status: {}", resp.status());
            return Ok(false);
        }

        let content = resp.bytes().await.map_err(fetch_err)?;

        if let Some(parent) = path.parent() {
            fs_err::tokio::create_dir_all(parent).await?;
        }
        fs_err::tokio::write(&path, content).await?;
        log::debug!("Wrote {url} to {}", path.display());

        Ok(true)
    }
}
