//! Method + path-regex skip-list.

use regex::Regex;
use tracing::debug;

use trellis_core::config::rbac::SkipPathConfig;
use trellis_core::error::AppError;
use trellis_core::result::AppResult;

#[derive(Debug, Clone)]
struct SkipRule {
    /// Uppercase method, or `*`.
    method: String,
    pattern: Regex,
}

/// Requests allowed without RBAC evaluation or any data lookup.
#[derive(Debug, Clone, Default)]
pub struct SkipList {
    rules: Vec<SkipRule>,
}

impl SkipList {
    /// Compile the configured skip entries.
    pub fn from_config(entries: &[SkipPathConfig]) -> AppResult<Self> {
        let rules = entries
            .iter()
            .map(|entry| {
                let pattern = Regex::new(&entry.pattern).map_err(|e| {
                    AppError::configuration(format!(
                        "Invalid skip pattern '{}': {e}",
                        entry.pattern
                    ))
                })?;
                Ok(SkipRule {
                    method: entry.method.to_ascii_uppercase(),
                    pattern,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;
        debug!(count = rules.len(), "Compiled skip-list");
        Ok(Self { rules })
    }

    /// Whether `(method, url)` is on the skip-list. The query string is ignored.
    pub fn should_skip(&self, method: &str, url: &str) -> bool {
        let path = url.split_once('?').map_or(url, |(path, _)| path);
        self.rules.iter().any(|rule| {
            (rule.method == "*" || rule.method.eq_ignore_ascii_case(method))
                && rule.pattern.is_match(path)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::config::rbac::RbacConfig;

    #[test]
    fn test_default_entries() {
        let skip = SkipList::from_config(&RbacConfig::default().skip_paths).unwrap();
        assert!(skip.should_skip("GET", "/health"));
        assert!(skip.should_skip("POST", "/apis/login?redirect=/"));
        assert!(skip.should_skip("DELETE", "/apis/internal/clusters/1"));
        assert!(skip.should_skip("GET", "/apis/core/v1/roles"));
        assert!(!skip.should_skip("GET", "/apis/core/v1/clusters/1"));
    }

    #[test]
    fn test_method_specific_entry() {
        let skip = SkipList::from_config(&[SkipPathConfig {
            method: "get".to_string(),
            pattern: "^/status$".to_string(),
        }])
        .unwrap();
        assert!(skip.should_skip("GET", "/status"));
        assert!(!skip.should_skip("POST", "/status"));
    }

    #[test]
    fn test_invalid_pattern_fails() {
        let err = SkipList::from_config(&[SkipPathConfig {
            method: "*".to_string(),
            pattern: "(".to_string(),
        }])
        .unwrap_err();
        assert_eq!(err.kind, trellis_core::error::ErrorKind::Configuration);
    }
}
