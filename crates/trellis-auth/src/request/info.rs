//! URL + method to [`AttributesRecord`] parsing.
//!
//! Resource paths have the shape
//! `/{prefix}/{group}/{version}/{resource}[/{name}[/{subresource}]]`;
//! anything else is a non-resource request.

use trellis_core::config::rbac::RbacConfig;
use trellis_core::error::AppError;
use trellis_core::result::AppResult;
use trellis_entity::{ResourceType, UserIdentity};

use super::attributes::AttributesRecord;

/// Query parameter carrying the environment/region scope.
const SCOPE_PARAM: &str = "scope";

/// Maps an HTTP method to its canonical verb.
pub fn verb_for_method(method: &str) -> AppResult<&'static str> {
    match method.to_ascii_uppercase().as_str() {
        "GET" | "HEAD" => Ok("get"),
        "POST" => Ok("create"),
        "PUT" | "PATCH" => Ok("update"),
        "DELETE" => Ok("delete"),
        _ => Err(AppError::validation(format!(
            "Unsupported HTTP method '{method}'"
        ))),
    }
}

/// Parses request URLs into attributes.
#[derive(Debug, Clone)]
pub struct RequestInfoResolver {
    api_prefixes: Vec<String>,
}

impl RequestInfoResolver {
    /// Create a resolver recognizing the given leading path segments.
    pub fn new<I, S>(api_prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            api_prefixes: api_prefixes
                .into_iter()
                .map(|p| p.into().trim_matches('/').to_string())
                .collect(),
        }
    }

    /// Create a resolver from the access review configuration.
    pub fn from_config(config: &RbacConfig) -> Self {
        Self::new(config.api_prefixes.iter().cloned())
    }

    /// Parse one `(url, method)` pair.
    pub fn resolve(
        &self,
        user: &UserIdentity,
        url: &str,
        method: &str,
    ) -> AppResult<AttributesRecord> {
        let verb = verb_for_method(method)?;
        let (path, query) = split_url(url);

        let mut record = AttributesRecord {
            user: user.clone(),
            verb: verb.to_string(),
            api_group: String::new(),
            api_version: String::new(),
            resource: String::new(),
            sub_resource: String::new(),
            name: String::new(),
            scope: scope_from_query(query)?,
            resource_request: false,
            path: path.to_string(),
        };

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let is_api = segments.len() >= 4 && self.api_prefixes.iter().any(|p| p == segments[0]);
        if !is_api {
            return Ok(record);
        }

        record.resource_request = true;
        record.api_group = segments[1].to_string();
        record.api_version = segments[2].to_string();
        record.resource = segments[3].to_string();
        if let Some(name) = segments.get(4) {
            record.name = name.to_string();
        }
        if let Some(sub) = segments.get(5) {
            record.sub_resource = sub.to_string();
        }

        if !record.name.is_empty()
            && ResourceType::from_segment(&record.resource).is_some()
            && record.name.parse::<i64>().is_err()
        {
            return Err(AppError::validation(format!(
                "Invalid {} id '{}' in '{url}'",
                record.resource, record.name
            )));
        }

        Ok(record)
    }
}

fn split_url(url: &str) -> (&str, &str) {
    match url.split_once('?') {
        Some((path, query)) => (path, query),
        None => (url, ""),
    }
}

fn scope_from_query(query: &str) -> AppResult<String> {
    for pair in query.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key == SCOPE_PARAM {
            let decoded = urlencoding::decode(value).map_err(|e| {
                AppError::validation(format!("Invalid scope parameter '{value}': {e}"))
            })?;
            return Ok(decoded.into_owned());
        }
    }
    Ok(String::new())
}
