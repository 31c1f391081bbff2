//! Generic hash query-string handling.
//!
//! The hash is treated as an ordered `key=value&key=value` list. Keys this
//! engine does not own are preserved verbatim, including their order. No
//! percent-encoding is applied: the site deliberately emits pretty URLs
//! and leaves escaping to the browser.

/// Parses `tags=a,b&view=grid` (with or without a leading `#`).
pub fn parse_params(hash: &str) -> Vec<(String, String)> {
    let hash = hash.strip_prefix('#').unwrap_or(hash);
    hash.split('&')
        .filter(|part| !part.is_empty())
        .map(|part| match part.split_once('=') {
            Some((key, value)) => (key.to_owned(), value.to_owned()),
            None => (part.to_owned(), String::new()),
        })
        .collect()
}

pub fn serialize_params(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

pub fn get_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, value)| value.as_str())
}

/// Replaces the value in place to keep the key's position stable, or
/// appends when the key is new.
pub fn set_param(params: &mut Vec<(String, String)>, key: &str, value: String) {
    match params.iter_mut().find(|(k, _)| k == key) {
        Some((_, existing)) => *existing = value,
        None => params.push((key.to_owned(), value)),
    }
}

pub fn remove_param(params: &mut Vec<(String, String)>, key: &str) {
    params.retain(|(k, _)| k != key);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tolerates_leading_hash_and_empty_parts() {
        assert_eq!(
            parse_params("#tags=a&&view=grid"),
            vec![
                ("tags".to_owned(), "a".to_owned()),
                ("view".to_owned(), "grid".to_owned()),
            ]
        );
        assert!(parse_params("").is_empty());
        assert!(parse_params("#").is_empty());
    }

    #[test]
    fn unrelated_params_survive_a_set_and_remove_cycle() {
        let mut params = parse_params("view=grid&tags=a&sort=name");
        set_param(&mut params, "tags", "b,c".to_owned());
        assert_eq!(serialize_params(&params), "view=grid&tags=b,c&sort=name");
        remove_param(&mut params, "tags");
        assert_eq!(serialize_params(&params), "view=grid&sort=name");
    }

    #[test]
    fn valueless_keys_parse_to_empty_values() {
        let params = parse_params("flag&tags=a");
        assert_eq!(get_param(&params, "flag"), Some(""));
        assert_eq!(get_param(&params, "tags"), Some("a"));
        assert_eq!(get_param(&params, "missing"), None);
    }
}
