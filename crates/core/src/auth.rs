//! Authentication parameter parsing
//!
//! The raw value is a comma-separated list of URL-encoded `name:value` pairs,
//! e.g. `Authorization:Bearer%20abc,X-Api-Key:secret`.

use std::collections::HashMap;

/// Decoded authentication entries
pub type AuthMap = HashMap<String, String>;

/// Parse a raw authentication string; malformed entries are dropped
pub fn parse(raw: Option<&str>) -> AuthMap {
    let mut auths = AuthMap::new();
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return auths;
    };

    for segment in raw.split(',') {
        let Some((key, value)) = split_pair(segment) else {
            continue;
        };
        match (decode(key), decode(value)) {
            (Some(key), Some(value)) => {
                auths.insert(key, value);
            }
            _ => tracing::debug!("Dropping auth entry with malformed encoding"),
        }
    }
    auths
}

/// Exactly two `:`-separated parts, ignoring trailing empty parts
fn split_pair(segment: &str) -> Option<(&str, &str)> {
    let mut parts: Vec<&str> = segment.split(':').collect();
    while parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }
    match parts.as_slice() {
        [key, value] => Some((*key, *value)),
        _ => None,
    }
}

/// Form-style URL decoding: `+` is a space, `%XX` escapes must be complete
fn decode(encoded: &str) -> Option<String> {
    let bytes = encoded.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3)?;
            if !escape.iter().all(u8::is_ascii_hexdigit) {
                return None;
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    let spaced = encoded.replace('+', " ");
    urlencoding::decode(&spaced).ok().map(|s| s.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(parse(None).is_empty());
        assert!(parse(Some("")).is_empty());
    }

    #[test]
    fn test_malformed_segment_dropped() {
        let auths = parse(Some("a:1,bad,b:2"));
        assert_eq!(auths.len(), 2);
        assert_eq!(auths["a"], "1");
        assert_eq!(auths["b"], "2");
    }

    #[test]
    fn test_values_are_decoded() {
        let auths = parse(Some("Authorization:Bearer%20abc%3D%3D,X-Note:a+b"));
        assert_eq!(auths["Authorization"], "Bearer abc==");
        assert_eq!(auths["X-Note"], "a b");
    }

    #[test]
    fn test_extra_colons_dropped() {
        // Colons inside a value must be encoded as %3A.
        let auths = parse(Some("url:http://host,ok:http%3A%2F%2Fhost"));
        assert_eq!(auths.len(), 1);
        assert_eq!(auths["ok"], "http://host");
    }

    #[test]
    fn test_empty_parts() {
        let auths = parse(Some("novalue:,:nokey"));
        assert_eq!(auths.len(), 1);
        assert_eq!(auths[""], "nokey");
    }

    #[test]
    fn test_bad_escapes_dropped() {
        let auths = parse(Some("a:%zz,b:%4,c:%FF,d:ok"));
        assert_eq!(auths.len(), 1);
        assert_eq!(auths["d"], "ok");
    }
}
