//! Pure rule matching over request attributes.

use std::borrow::Cow;
use std::fmt;

use crate::request::AttributesRecord;

use super::role::{PolicyRule, WILDCARD};

/// The resource addressed by a request: `{group, resource, subresource}`.
///
/// Rules name resources in their composed form (`clusters/shell`);
/// [`ResourceKey::canonical`] is the single place that form is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceKey<'a> {
    /// API group, e.g. `core`.
    pub group: &'a str,
    /// Plural resource name, e.g. `clusters`.
    pub resource: &'a str,
    /// Subresource, empty when absent.
    pub subresource: &'a str,
}

impl<'a> ResourceKey<'a> {
    /// Create a key; pass `""` for no subresource.
    pub fn new(group: &'a str, resource: &'a str, subresource: &'a str) -> Self {
        Self {
            group,
            resource,
            subresource,
        }
    }

    /// `resource/subresource`, or just `resource`.
    pub fn canonical(&self) -> Cow<'a, str> {
        if self.subresource.is_empty() {
            Cow::Borrowed(self.resource)
        } else {
            Cow::Owned(format!("{}/{}", self.resource, self.subresource))
        }
    }
}

impl fmt::Display for ResourceKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.canonical())
    }
}

/// Whether a single rule authorizes the request.
pub fn rule_allows(record: &AttributesRecord, rule: &PolicyRule) -> bool {
    if !record.resource_request {
        return path_matches(&rule.non_resource_urls, &record.path);
    }

    let key = record.resource_key();
    contains_or_wildcard(&rule.api_groups, key.group)
        && contains_or_wildcard(&rule.resources, &key.canonical())
        && contains_or_wildcard(&rule.verbs, &record.verb)
        && scope_matches(&rule.scopes, &record.scope)
}

/// Index of the first rule authorizing the request, if any.
pub fn role_allows(record: &AttributesRecord, rules: &[PolicyRule]) -> Option<usize> {
    rules.iter().position(|rule| rule_allows(record, rule))
}

fn contains_or_wildcard(values: &[String], wanted: &str) -> bool {
    values.iter().any(|v| v == WILDCARD || v == wanted)
}

/// An empty scope list places no restriction.
fn scope_matches(patterns: &[String], scope: &str) -> bool {
    patterns.is_empty() || patterns.iter().any(|p| pattern_matches(p, scope))
}

fn path_matches(patterns: &[String], path: &str) -> bool {
    patterns.iter().any(|p| pattern_matches(p, path))
}

/// `*`, an exact value, or a prefix ending in a single trailing `*`.
fn pattern_matches(pattern: &str, value: &str) -> bool {
    if pattern == WILDCARD || pattern == value {
        return true;
    }
    match pattern.strip_suffix('*') {
        Some(prefix) => value.starts_with(prefix),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_entity::UserIdentity;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn record(verb: &str, resource: &str, sub: &str, scope: &str) -> AttributesRecord {
        AttributesRecord {
            user: UserIdentity::user(1, "tony"),
            verb: verb.to_string(),
            api_group: "core".to_string(),
            api_version: "v1".to_string(),
            resource: resource.to_string(),
            sub_resource: sub.to_string(),
            name: "1".to_string(),
            scope: scope.to_string(),
            resource_request: true,
            path: format!("/apis/core/v1/{resource}/1/{sub}"),
        }
    }

    fn non_resource(path: &str) -> AttributesRecord {
        AttributesRecord {
            user: UserIdentity::user(1, "tony"),
            verb: "get".to_string(),
            api_group: String::new(),
            api_version: String::new(),
            resource: String::new(),
            sub_resource: String::new(),
            name: String::new(),
            scope: String::new(),
            resource_request: false,
            path: path.to_string(),
        }
    }

    fn rule(resources: &[&str], verbs: &[&str], scopes: &[&str]) -> PolicyRule {
        PolicyRule {
            api_groups: strings(&["core"]),
            resources: strings(resources),
            verbs: strings(verbs),
            scopes: strings(scopes),
            non_resource_urls: Vec::new(),
        }
    }

    #[test]
    fn test_resource_key_canonical() {
        assert_eq!(ResourceKey::new("core", "clusters", "").canonical(), "clusters");
        assert_eq!(
            ResourceKey::new("core", "clusters", "shell").canonical(),
            "clusters/shell"
        );
        assert_eq!(
            ResourceKey::new("core", "clusters", "shell").to_string(),
            "core:clusters/shell"
        );
    }

    #[test]
    fn test_wildcard_verb_matches_any_verb() {
        let r = rule(&["clusters"], &["*"], &[]);
        for verb in ["get", "create", "update", "delete"] {
            assert!(rule_allows(&record(verb, "clusters", "", ""), &r));
        }
    }

    #[test]
    fn test_subresource_requires_composed_entry() {
        let r = rule(&["clusters"], &["get"], &["*"]);
        assert!(rule_allows(&record("get", "clusters", "", ""), &r));
        assert!(!rule_allows(&record("get", "clusters", "shell", ""), &r));

        let r = rule(&["clusters/shell"], &["get"], &["*"]);
        assert!(rule_allows(&record("get", "clusters", "shell", ""), &r));
    }

    #[test]
    fn test_scope_prefix_pattern() {
        let r = rule(&["applications/clusters"], &["create"], &["test/*", "reg/*"]);
        assert!(rule_allows(
            &record("create", "applications", "clusters", "test/hz"),
            &r
        ));
        assert!(!rule_allows(
            &record("create", "applications", "clusters", "prod/hz"),
            &r
        ));
        assert!(!rule_allows(
            &record("create", "applications", "clusters", ""),
            &r
        ));
    }

    #[test]
    fn test_api_group_and_verb_must_match() {
        let r = rule(&["clusters"], &["get"], &[]);
        assert!(!rule_allows(&record("delete", "clusters", "", ""), &r));

        let mut other_group = record("get", "clusters", "", "");
        other_group.api_group = "batch".to_string();
        assert!(!rule_allows(&other_group, &r));
    }

    #[test]
    fn test_non_resource_paths_only_use_urls() {
        let mut r = rule(&["*"], &["*"], &["*"]);
        assert!(!rule_allows(&non_resource("/metrics"), &r));

        r.non_resource_urls = strings(&["/metrics", "/debug/*"]);
        assert!(rule_allows(&non_resource("/metrics"), &r));
        assert!(rule_allows(&non_resource("/debug/pprof"), &r));
        assert!(!rule_allows(&non_resource("/healthz"), &r));
    }

    #[test]
    fn test_non_resource_urls_do_not_grant_resource_requests() {
        let mut r = rule(&["clusters/templateschematags"], &["get"], &["*"]);
        r.non_resource_urls = strings(&["*"]);
        assert!(!rule_allows(
            &record("create", "clusters", "templateschematags", ""),
            &r
        ));
    }

    #[test]
    fn test_role_allows_reports_first_match() {
        let rules = vec![
            rule(&["groups"], &["get"], &[]),
            rule(&["clusters"], &["*"], &[]),
            rule(&["*"], &["*"], &[]),
        ];
        assert_eq!(role_allows(&record("delete", "clusters", "", ""), &rules), Some(1));
        assert_eq!(role_allows(&record("get", "groups", "", ""), &rules), Some(0));
        assert_eq!(role_allows(&record("get", "clusters", "", ""), &rules[..1]), None);
    }
}
