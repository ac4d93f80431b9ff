use std::num::NonZeroUsize;
use std::path::PathBuf;

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::MirrorError;
use crate::filter::DEFAULT_LANGUAGES;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MirrorConfig {
    /// Source of truth for page discovery
    #[serde(default = "default_sitemap_url")]
    pub sitemap_url: String,

    /// Destination root of the mirrored tree
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Maximum number of simultaneous in-flight downloads
    #[serde(default = "default_concurrency_limit")]
    pub concurrency_limit: NonZeroUsize,

    /// Path marker where documentation pages begin, never empty
    #[serde(
        default = "default_docs_root",
        deserialize_with = "deserialize_docs_root"
    )]
    pub docs_root: String,

    /// Language prefixes of translated mirrors, excluded from the download
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,

    /// `User-Agent` header sent with every request, none by default
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl MirrorConfig {
    /// Checks the invariants serde can't enforce on a config built in code.
    pub fn validate(&self) -> Result<(), MirrorError> {
        if self.docs_root.is_empty() {
            return Err(MirrorError::InvalidConfig(String::from(
                "docsRoot must not be empty",
            )));
        }
        Ok(())
    }
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            sitemap_url: default_sitemap_url(),
            output_dir: default_output_dir(),
            concurrency_limit: default_concurrency_limit(),
            docs_root: default_docs_root(),
            languages: default_languages(),
            user_agent: None,
        }
    }
}

fn default_sitemap_url() -> String {
    String::from("https://code.claude.com/docs/sitemap.xml")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("docs")
}

fn default_concurrency_limit() -> NonZeroUsize {
    NonZeroUsize::new(10).unwrap()
}

fn default_docs_root() -> String {
    String::from("/docs/")
}

fn default_languages() -> Vec<String> {
    DEFAULT_LANGUAGES.iter().map(|&l| l.to_string()).collect()
}

fn deserialize_docs_root<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let docs_root = String::deserialize(deserializer)?;
    if docs_root.is_empty() {
        return Err(de::Error::invalid_value(
            de::Unexpected::Str(&docs_root),
            &"a non empty path marker",
        ));
    }
    Ok(docs_root)
}
