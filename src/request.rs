//! Request composition: endpoint URLs and parameter encoding.
//!
//! Every URL built here carries `json=true` plus the credential fields.
//! Caller parameters go before them, and any caller value for a reserved key
//! is dropped.

use std::borrow::Cow;

use tracing::debug;
use url::Url;

use crate::config::Credentials;
use crate::constants::{API_PREFIX, JSON_FLAG, RESERVED_QUERY_KEYS};

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Scalar value, sent as `name=value`.
    Text(String),
    /// List value, sent as repeated `name[]=value` pairs.
    List(Vec<String>),
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

/// Booleans use the service's `1`/`0` convention.
impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Text(if value { "1" } else { "0" }.to_string())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<&[&str]> for ParamValue {
    fn from(value: &[&str]) -> Self {
        Self::List(value.iter().map(|v| (*v).to_string()).collect())
    }
}

/// Ordered string-keyed parameter map.
///
/// Insertion order is kept for reproducible wire output. Inserting an existing
/// key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    /// Empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
        self
    }

    /// Sets `key` only when `value` is present.
    pub fn insert_opt<V: Into<ParamValue>>(
        &mut self,
        key: impl Into<String>,
        value: Option<V>,
    ) -> &mut Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Merges `other` into `self`; keys in `other` win.
    pub fn extend(&mut self, other: &Params) -> &mut Self {
        for (key, value) in &other.entries {
            self.insert(key.clone(), value.clone());
        }
        self
    }

    /// Looks up a value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// True when no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flattens to wire pairs, skipping reserved keys.
    ///
    /// List values expand to one `name[]` pair per element.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(Cow<'_, str>, &str)> {
        let mut pairs = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            if RESERVED_QUERY_KEYS.contains(&key.as_str()) {
                debug!(param = %key, "dropping caller value for reserved query key");
                continue;
            }
            match value {
                ParamValue::Text(text) => pairs.push((Cow::Borrowed(key.as_str()), text.as_str())),
                ParamValue::List(items) => {
                    let list_key = if key.ends_with("[]") {
                        key.clone()
                    } else {
                        format!("{key}[]")
                    };
                    for item in items {
                        pairs.push((Cow::Owned(list_key.clone()), item.as_str()));
                    }
                }
            }
        }
        pairs
    }
}

/// Percent-encodes a caller-provided path segment.
#[must_use]
pub fn encode_segment(segment: &str) -> Cow<'_, str> {
    urlencoding::encode(segment)
}

/// Builds `<base>/api/<path>?<query>&json=true&<credentials>`.
///
/// `path` is relative and already segment-encoded. `query` holds caller
/// parameters for GET requests; POST requests pass an empty map and send
/// their parameters as form fields.
#[must_use]
pub fn build_url(base: &Url, path: &str, credentials: &Credentials, query: &Params) -> Url {
    let mut url = base.clone();
    let base_path = base.path().trim_end_matches('/');
    let path = path.trim_start_matches('/');
    url.set_path(&format!("{base_path}/{API_PREFIX}/{path}"));
    url.set_query(None);
    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query.to_pairs() {
            pairs.append_pair(&key, value);
        }
        pairs.append_pair(JSON_FLAG.0, JSON_FLAG.1);
        for (key, value) in credentials.query_pairs() {
            pairs.append_pair(key, value);
        }
    }
    url
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://api.example-service.com").unwrap()
    }

    fn query_of(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_build_url_injects_json_flag_and_api_key() {
        let creds = Credentials::ApiKey("secret".to_string());
        let url = build_url(&base(), "project/demo/info", &creds, &Params::new());
        assert_eq!(url.path(), "/api/project/demo/info");
        assert_eq!(
            query_of(&url),
            vec![
                ("json".to_string(), "true".to_string()),
                ("key".to_string(), "secret".to_string()),
            ]
        );
    }

    #[test]
    fn test_build_url_injects_account_credentials() {
        let creds = Credentials::Account {
            login: "me".to_string(),
            account_key: "acct".to_string(),
        };
        let url = build_url(&base(), "account/get-projects", &creds, &Params::new());
        let query = query_of(&url);
        assert!(query.contains(&("login".to_string(), "me".to_string())));
        assert!(query.contains(&("account-key".to_string(), "acct".to_string())));
        assert!(query.contains(&("json".to_string(), "true".to_string())));
    }

    #[test]
    fn test_build_url_keeps_base_path_prefix() {
        let base = Url::parse("http://localhost:9000/proxy/").unwrap();
        let creds = Credentials::ApiKey("k".to_string());
        let url = build_url(&base, "/supported-languages", &creds, &Params::new());
        assert_eq!(url.path(), "/proxy/api/supported-languages");
    }

    #[test]
    fn test_caller_cannot_override_reserved_keys() {
        let creds = Credentials::ApiKey("real".to_string());
        let query = Params::new()
            .with("key", "forged")
            .with("json", "false")
            .with("branch", "main");
        let url = build_url(&base(), "project/demo/export", &creds, &query);
        let pairs = query_of(&url);
        assert_eq!(
            pairs,
            vec![
                ("branch".to_string(), "main".to_string()),
                ("json".to_string(), "true".to_string()),
                ("key".to_string(), "real".to_string()),
            ]
        );
    }

    #[test]
    fn test_list_params_expand_with_brackets() {
        let params = Params::new().with("languages", vec!["de".to_string(), "fr".to_string()]);
        let pairs: Vec<(String, String)> = params
            .to_pairs()
            .into_iter()
            .map(|(k, v)| (k.into_owned(), v.to_string()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("languages[]".to_string(), "de".to_string()),
                ("languages[]".to_string(), "fr".to_string()),
            ]
        );
    }

    #[test]
    fn test_insert_replaces_existing_key_in_place() {
        let mut params = Params::new();
        params.insert("a", "1").insert("b", "2").insert("a", "3");
        assert_eq!(params.get("a"), Some(&ParamValue::Text("3".to_string())));
        let keys: Vec<String> = params
            .to_pairs()
            .into_iter()
            .map(|(k, _)| k.into_owned())
            .collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_bool_params_use_numeric_flags() {
        let params = Params::new().with("yes", true).with("no", false);
        assert_eq!(params.get("yes"), Some(&ParamValue::Text("1".to_string())));
        assert_eq!(params.get("no"), Some(&ParamValue::Text("0".to_string())));
    }

    #[test]
    fn test_insert_opt_skips_none() {
        let mut params = Params::new();
        params.insert_opt("branch", None::<String>);
        assert!(params.is_empty());
        params.insert_opt("branch", Some("dev"));
        assert!(!params.is_empty());
    }

    #[test]
    fn test_encode_segment_escapes_reserved_characters() {
        assert_eq!(encode_segment("my project/x"), "my%20project%2Fx");
        let creds = Credentials::ApiKey("k".to_string());
        let path = format!("project/{}/info", encode_segment("my project"));
        let url = build_url(&base(), &path, &creds, &Params::new());
        assert_eq!(url.path(), "/api/project/my%20project/info");
    }
}
