/// Paths the request tagging middleware never touches.
///
/// A prefix matches the path itself and anything below it, so `/api`
/// excludes `/api` and `/api/courses` but not `/apiary`.
#[derive(Debug, Clone)]
pub struct RouteMatcher {
    excluded: Vec<String>,
}

impl Default for RouteMatcher {
    fn default() -> Self {
        Self::new(["/api", "/_next/static", "/_next/image", "/favicon.ico"])
    }
}

impl RouteMatcher {
    pub fn new<I, S>(excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded: excluded
                .into_iter()
                .map(|p| p.into().trim_end_matches('/').to_string())
                .collect(),
        }
    }

    /// Match nothing; every request is tagged.
    pub fn none() -> Self {
        Self { excluded: Vec::new() }
    }

    pub fn exclude(mut self, prefix: impl Into<String>) -> Self {
        self.excluded
            .push(prefix.into().trim_end_matches('/').to_string());
        self
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.excluded.iter().any(|prefix| is_under(path, prefix))
    }
}

/// `path` equals `prefix` or continues it with a `/` segment.
pub(crate) fn is_under(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_exclusions() {
        let m = RouteMatcher::default();
        assert!(m.is_excluded("/api"));
        assert!(m.is_excluded("/api/anything"));
        assert!(m.is_excluded("/_next/static/chunks/app.js"));
        assert!(m.is_excluded("/_next/image"));
        assert!(m.is_excluded("/favicon.ico"));

        assert!(!m.is_excluded("/"));
        assert!(!m.is_excluded("/apiary"));
        assert!(!m.is_excluded("/_next/data/build.json"));
        assert!(!m.is_excluded("/admin/settings"));
    }

    #[test]
    fn custom_prefixes_ignore_trailing_slash() {
        let m = RouteMatcher::none().exclude("/static/");
        assert!(m.is_excluded("/static/site.css"));
        assert!(!m.is_excluded("/api/anything"));
    }
}
