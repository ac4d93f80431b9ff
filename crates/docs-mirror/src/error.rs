use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MirrorError {
    // reqwest errors already name the url
    #[error("Couldn't fetch: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Couldn't fetch {url} got status: {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Couldn't decompress {url} got: {source}")]
    Decompress {
        url: String,
        #[source]
        source: io::Error,
    },

    #[error("Couldn't parse {url} got: {source}")]
    Parse {
        url: String,
        #[source]
        source: sxd_document::parser::Error,
    },

    #[error("Couldn't evaluate XPath for {url} got: {reason}")]
    XPath { url: String, reason: String },

    #[error("Refusing to write {url} outside of the output directory")]
    UnsafePath { url: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}
