/// Language prefixes of the translated mirrors of the documentation.
pub const DEFAULT_LANGUAGES: [&str; 11] = [
    "de", "es", "fr", "id", "it", "ja", "ko", "pt", "ru", "zh-CN", "zh-TW",
];

/// Returns the part of `url` that follows the last occurrence of `docs_root`,
/// or `None` when the marker is absent.
pub fn relative_path<'a>(url: &'a str, docs_root: &str) -> Option<&'a str> {
    url.rfind(docs_root).map(|i| &url[i + docs_root.len()..])
}

/// Whether `relative_path` starts with a full language segment, i.e. one of
/// `languages` immediately followed by `/`.
pub fn is_translated<S: AsRef<str>>(relative_path: &str, languages: &[S]) -> bool {
    match relative_path.split_once('/') {
        Some((segment, _)) => languages.iter().any(|l| l.as_ref() == segment),
        None => false,
    }
}

/// Keeps the default language pages of `urls`, in their original order.
pub fn filter_docs<S: AsRef<str>>(
    urls: Vec<String>,
    docs_root: &str,
    languages: &[S],
) -> Vec<String> {
    urls.into_iter()
        .filter(|url| match relative_path(url, docs_root) {
            Some(rel) => !is_translated(rel, languages),
            None => {
                log::debug!("Skipping {url} outside of {docs_root}");
                false
            }
        })
        .collect()
}
