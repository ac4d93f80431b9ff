use std::future::Future;
use std::io::prelude::*;
use std::pin::Pin;

use flate2::read::GzDecoder;
use lazy_static::lazy_static;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use sxd_document::{dom, parser};

use crate::config::MirrorConfig;
use crate::error::MirrorError;

lazy_static! {
    pub(crate) static ref HTTP_CLI: reqwest::Client = reqwest::ClientBuilder::new()
        .gzip(true)
        .deflate(true)
        .build()
        .unwrap();
    static ref XP_FACTORY: sxd_xpath::Factory = sxd_xpath::Factory::new();
}

/// GET request for `url`, with the configured user agent if any.
pub(crate) fn get(config: &MirrorConfig, url: &str) -> reqwest::RequestBuilder {
    let req = HTTP_CLI.get(url);
    match &config.user_agent {
        Some(user_agent) => req.header(USER_AGENT, user_agent),
        None => req,
    }
}

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapKind {
    Index,
    Urlset,
}

impl<'a> From<dom::Root<'a>> for SitemapKind {
    fn from(root: dom::Root<'a>) -> Self {
        let is_index = root
            .children()
            .iter()
            .find_map(|child| child.element())
            .map_or(false, |e| e.name().local_part() == "sitemapindex");

        if is_index {
            Self::Index
        } else {
            Self::Urlset
        }
    }
}

/// A parsed sitemap document: its kind and every `<loc>` value in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sitemap {
    pub kind: SitemapKind,
    pub locs: Vec<String>,
}

/// Parses a sitemap protocol document. `url` only serves error reporting.
pub fn parse_sitemap(url: &str, xml: &str) -> Result<Sitemap, MirrorError> {
    let package = parser::parse(xml).map_err(|source| MirrorError::Parse {
        url: url.to_string(),
        source,
    })?;
    let document = package.as_document();

    let kind = SitemapKind::from(document.root());

    let xpath_err = |reason: String| MirrorError::XPath {
        url: url.to_string(),
        reason,
    };
    let mut context = sxd_xpath::Context::new();
    context.set_namespace("sm", SITEMAP_NS);
    let xpath = XP_FACTORY
        .build("//sm:loc")
        .map_err(|e| xpath_err(e.to_string()))?
        .ok_or_else(|| xpath_err(String::from("Missing XPath")))?;
    let value = xpath
        .evaluate(&context, document.root())
        .map_err(|e| xpath_err(e.to_string()))?;

    let locs = match value {
        sxd_xpath::Value::Nodeset(nodes) => nodes
            .document_order()
            .into_iter()
            .map(|node| node.string_value())
            .collect(),
        _ => vec![],
    };

    Ok(Sitemap { kind, locs })
}

fn gather_urls<'a>(
    config: &'a MirrorConfig,
    sitemap_url: &'a str,
    urls: &'a mut Vec<String>,
) -> Pin<Box<dyn Future<Output = Result<(), MirrorError>> + 'a>> {
    Box::pin(async move {
        let sitemap_xml = download(config, sitemap_url).await?;
        let Sitemap { kind, locs } = parse_sitemap(sitemap_url, &sitemap_xml)?;

        match kind {
            SitemapKind::Index => {
                log::info!("Following {} sitemaps of {sitemap_url}", locs.len());
                for child_url in locs {
                    gather_urls(config, &child_url, urls).await?;
                }
            }
            SitemapKind::Urlset => urls.extend(locs),
        }

        Ok(())
    })
}

async fn download(config: &MirrorConfig, url: &str) -> Result<String, MirrorError> {
    let fetch_err = |source| MirrorError::Fetch {
        url: url.to_string(),
        source,
    };

    let resp = get(config, url).send().await.map_err(fetch_err)?;

    let status = resp.status();
    if !status.is_success() {
        return Err(MirrorError::Status {
            url: url.to_string(),
            status,
        });
    }

    let page = match resp.headers().get(CONTENT_TYPE) {
        Some(c) if c == "application/x-gzip" || c == "application/gzip" => {
            let compressed = resp.bytes().await.map_err(fetch_err)?;
            let mut gz = GzDecoder::new(&compressed[..]);
            let mut page = String::new();
            gz.read_to_string(&mut page)
                .map_err(|source| MirrorError::Decompress {
                    url: url.to_string(),
                    source,
                })?;
            page
        }
        _ => resp.text().await.map_err(fetch_err)?,
    };

    Ok(page)
}

/// Fetches `config.sitemap_url` and returns every page address it lists,
/// following sitemap indexes. Any failure aborts the whole read.
pub async fn fetch_sitemap(config: &MirrorConfig) -> Result<Vec<String>, MirrorError> {
    let mut urls = vec![];
    gather_urls(config, &config.sitemap_url, &mut urls).await?;
    Ok(urls)
}
