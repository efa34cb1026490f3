//! Target scope: which captured URLs take part in extraction.
//!
//! Patterns are shell-style globs. A pattern containing `://` is matched
//! against the full URL, anything else against the host (with `:port` when
//! the URL carries a non-default port, and also without it). An empty
//! include list puts every URL in scope; excludes always win.

use crate::core::{Error, Result};
use glob::{MatchOptions, Pattern};
use url::Url;

/// The in-scope test consumed by the extraction engine.
pub trait ScopePredicate {
    fn is_in_scope(&self, url: &str) -> bool;
}

impl<F> ScopePredicate for F
where
    F: Fn(&str) -> bool,
{
    fn is_in_scope(&self, url: &str) -> bool {
        self(url)
    }
}

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

#[derive(Debug, Clone)]
enum ScopeRule {
    Host(Pattern),
    Url(Pattern),
}

impl ScopeRule {
    fn parse(raw: &str) -> Result<Self> {
        let pattern = Pattern::new(raw.trim())
            .map_err(|e| Error::Configuration(format!("Invalid scope pattern '{raw}': {e}")))?;
        if raw.contains("://") {
            Ok(Self::Url(pattern))
        } else {
            Ok(Self::Host(pattern))
        }
    }

    fn matches(&self, url: &str, hosts: &[String]) -> bool {
        match self {
            Self::Url(pattern) => pattern.matches_with(url, MATCH_OPTIONS),
            Self::Host(pattern) => hosts.iter().any(|h| pattern.matches_with(h, MATCH_OPTIONS)),
        }
    }
}

/// Glob-based scope built from include and exclude patterns.
#[derive(Debug, Clone, Default)]
pub struct TargetScope {
    include: Vec<ScopeRule>,
    exclude: Vec<ScopeRule>,
}

impl TargetScope {
    /// A scope that admits every URL.
    pub fn everything() -> Self {
        Self::default()
    }

    pub fn from_patterns<I, E>(include: I, exclude: E) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Ok(Self {
            include: parse_rules(include)?,
            exclude: parse_rules(exclude)?,
        })
    }

    pub fn is_unrestricted(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }
}

fn parse_rules<I>(patterns: I) -> Result<Vec<ScopeRule>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    patterns
        .into_iter()
        .filter(|p| !p.as_ref().trim().is_empty())
        .map(|p| ScopeRule::parse(p.as_ref()))
        .collect()
}

fn host_candidates(url: &str) -> Vec<String> {
    let Ok(parsed) = Url::parse(url) else {
        return Vec::new();
    };
    let Some(host) = parsed.host_str() else {
        return Vec::new();
    };
    match parsed.port() {
        Some(port) => vec![format!("{host}:{port}"), host.to_string()],
        None => vec![host.to_string()],
    }
}

impl ScopePredicate for TargetScope {
    fn is_in_scope(&self, url: &str) -> bool {
        if self.is_unrestricted() {
            return true;
        }

        let hosts = host_candidates(url);
        let included =
            self.include.is_empty() || self.include.iter().any(|rule| rule.matches(url, &hosts));
        included && !self.exclude.iter().any(|rule| rule.matches(url, &hosts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(include: &[&str], exclude: &[&str]) -> TargetScope {
        TargetScope::from_patterns(include, exclude).expect("valid patterns")
    }

    #[test]
    fn test_everything_admits_malformed_urls() {
        assert!(TargetScope::everything().is_in_scope("::not a url::"));
    }

    #[test]
    fn test_host_patterns() {
        let s = scope(&["*.example.com", "example.com"], &[]);
        assert!(s.is_in_scope("https://api.example.com/v1/users"));
        assert!(s.is_in_scope("https://EXAMPLE.com/"));
        assert!(!s.is_in_scope("https://example.org/"));
        assert!(!s.is_in_scope("garbage"));
    }

    #[test]
    fn test_host_pattern_with_port() {
        let s = scope(&["localhost:8080"], &[]);
        assert!(s.is_in_scope("http://localhost:8080/api"));
        assert!(!s.is_in_scope("http://localhost:9090/api"));

        let any_port = scope(&["localhost"], &[]);
        assert!(any_port.is_in_scope("http://localhost:9090/api"));
    }

    #[test]
    fn test_url_patterns() {
        let s = scope(&["https://app.test/api/*"], &[]);
        assert!(s.is_in_scope("https://app.test/api/v2/items"));
        assert!(!s.is_in_scope("https://app.test/static/app.js"));
    }

    #[test]
    fn test_exclude_wins() {
        let s = scope(&["*.example.com"], &["cdn.example.com"]);
        assert!(s.is_in_scope("https://api.example.com/"));
        assert!(!s.is_in_scope("https://cdn.example.com/lib.js"));

        let only_exclude = scope(&[], &["*.tracking.io"]);
        assert!(only_exclude.is_in_scope("https://api.example.com/"));
        assert!(!only_exclude.is_in_scope("https://t.tracking.io/pixel"));
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let err = TargetScope::from_patterns(["[abc"], Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_closures_are_predicates() {
        let predicate = |url: &str| url.starts_with("https://");
        assert!(predicate.is_in_scope("https://a.test/"));
        assert!(!predicate.is_in_scope("http://a.test/"));
    }
}
