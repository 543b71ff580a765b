use std::collections::HashSet;

/// Canonical form used for matching: surrounding whitespace and trailing `/` removed.
/// Scheme, host case and query strings are left untouched.
pub fn normalize_url(raw: &str) -> &str {
    raw.trim().trim_end_matches('/')
}

/// Everything after `scheme://` and the host. A link without a path has an empty slug.
pub fn slug_from_link(link: &str) -> &str {
    let without_scheme = link.split_once("://").map_or(link, |(_, rest)| rest);
    without_scheme
        .split_once('/')
        .map_or("", |(_host, path)| path)
}

/// Allow-list of normalized URLs an export item must appear in to be rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlFilter {
    urls: HashSet<String>,
}

impl UrlFilter {
    /// Builds a filter from arbitrary URL strings; blank entries are dropped.
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let urls = urls
            .into_iter()
            .filter_map(|url| {
                let normalized = normalize_url(url.as_ref());
                (!normalized.is_empty()).then(|| normalized.to_string())
            })
            .collect();
        Self { urls }
    }

    /// Builds a filter from newline-separated input, one URL per line.
    pub fn from_lines(text: &str) -> Self {
        Self::new(text.lines())
    }

    pub fn matches(&self, link: &str) -> bool {
        let normalized = normalize_url(link);
        !normalized.is_empty() && self.urls.contains(normalized)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
