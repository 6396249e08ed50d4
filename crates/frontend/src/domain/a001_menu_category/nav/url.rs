//! Reading and writing the category query parameter.
//!
//! Works on the raw `location.search` string. A query string that does not
//! decode as flat `key=value` pairs (repeated keys, `a[]=1` brackets) is never
//! rewritten, so parameters owned by other code survive untouched.

use std::collections::BTreeMap;

fn decode(search: &str) -> Option<BTreeMap<String, String>> {
    let query = search.trim_start_matches('?');
    match serde_qs::from_str(query) {
        Ok(params) => Some(params),
        Err(e) => {
            log::debug!("query string '{}' not decodable: {}", query, e);
            None
        }
    }
}

/// Non-empty value of `param`, if present and decodable
pub fn query_param(search: &str, param: &str) -> Option<String> {
    decode(search)?
        .remove(param)
        .filter(|value| !value.is_empty())
}

/// URL (`?...`) with `param` set to `value` and every other parameter kept.
/// `None` when nothing would change or the current query cannot be decoded.
pub fn with_query_param(search: &str, param: &str, value: &str) -> Option<String> {
    let mut params = decode(search)?;
    if params.get(param).map(String::as_str) == Some(value) {
        return None;
    }
    params.insert(param.to_string(), value.to_string());

    match serde_qs::to_string(&params) {
        Ok(query) => Some(format!("?{}", query)),
        Err(e) => {
            log::warn!("failed to encode query string: {}", e);
            None
        }
    }
}
