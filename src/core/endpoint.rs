//! Structured URL building for vendor endpoints.
//!
//! Endpoints are described as path segments plus query pairs and resolved
//! against a base URL. Segments are percent-encoded individually, so an
//! identifier can never add path components or query parameters.

use reqwest::Url;

/// A vendor endpoint relative to an API base.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoint {
    segments: Vec<String>,
    query: Vec<(&'static str, String)>,
}

impl Endpoint {
    /// Start from a fixed path such as `"bed/familyStatus"`.
    ///
    /// The path is split on `/`; a trailing `/` yields a trailing empty
    /// segment, which some vendor endpoints require.
    #[must_use]
    pub fn path(path: &str) -> Self {
        Self {
            segments: path.split('/').map(ToString::to_string).collect(),
            query: Vec::new(),
        }
    }

    /// Append one path segment (an identifier), encoded as a single segment.
    #[must_use]
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Append a query parameter.
    #[must_use]
    pub fn query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    /// Path relative to the API base, for logging. Never includes the query.
    #[must_use]
    pub fn display_path(&self) -> String {
        self.segments.join("/")
    }

    /// Resolve against `base`.
    #[must_use]
    pub fn to_url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.extend(&self.segments);
        }
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                pairs.append_pair(key, value);
            }
        }
        url
    }
}
