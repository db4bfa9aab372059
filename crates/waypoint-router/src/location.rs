//! URL string <-> structured location.
//!
//! A [`Location`] keeps the raw `search` and `hash` segments; the decoded query
//! lives in a [`QueryMap`]. Parsing never fails: undecodable query pairs are
//! dropped and logged.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub type PathParams = BTreeMap<String, String>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub pathname: String,
    /// Empty, or starts with `?`.
    pub search: String,
    /// Empty, or starts with `#`.
    pub hash: String,
}

impl Location {
    /// Build a location from a pathname, a query map and a raw hash
    /// (with or without the leading `#`).
    pub fn new(pathname: impl Into<String>, query: &QueryMap, hash: &str) -> Self {
        let mut pathname = pathname.into();
        if pathname.is_empty() {
            pathname.push('/');
        }
        Self {
            pathname,
            search: search_from(query),
            hash: normalize_prefixed(hash, '#'),
        }
    }

    pub fn query(&self) -> QueryMap {
        parse_query(&self.search)
    }

    /// Same pathname and hash, new query.
    pub fn with_query(&self, query: &QueryMap) -> Self {
        Self {
            pathname: self.pathname.clone(),
            search: search_from(query),
            hash: self.hash.clone(),
        }
    }

    /// Same search and hash, new pathname.
    pub fn with_pathname(&self, pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            search: self.search.clone(),
            hash: self.hash.clone(),
        }
    }

    pub fn to_url(&self) -> String {
        serialize(self)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.pathname, self.search, self.hash)
    }
}

/// Ordered, unique-keyed query parameters.
///
/// Updating an existing key keeps its position; new keys go at the end.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<(String, String)>", into = "Vec<(String, String)>")]
pub struct QueryMap {
    pairs: Vec<(String, String)>,
}

impl From<Vec<(String, String)>> for QueryMap {
    fn from(pairs: Vec<(String, String)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<QueryMap> for Vec<(String, String)> {
    fn from(map: QueryMap) -> Self {
        map.pairs
    }
}

impl QueryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set `key`, replacing in place if present. Returns the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => Some(std::mem::replace(v, value)),
            None => {
                self.pairs.push((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.pairs.iter().position(|(k, _)| k == key)?;
        Some(self.pairs.remove(idx).1)
    }

    pub fn apply(&mut self, key: &str, update: QueryUpdate) {
        match update {
            QueryUpdate::Set(v) => {
                self.insert(key, v);
            }
            QueryUpdate::Remove => {
                self.remove(key);
            }
            QueryUpdate::Keep => {}
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = QueryMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// What to do with one query key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryUpdate {
    /// Set the value (append if the key is new).
    Set(String),
    /// Drop the key entirely.
    Remove,
    /// Leave the key as it is.
    Keep,
}

impl From<&str> for QueryUpdate {
    fn from(v: &str) -> Self {
        QueryUpdate::Set(v.to_string())
    }
}

impl From<String> for QueryUpdate {
    fn from(v: String) -> Self {
        QueryUpdate::Set(v)
    }
}

impl<T: Into<String>> From<Option<T>> for QueryUpdate {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => QueryUpdate::Set(v.into()),
            None => QueryUpdate::Remove,
        }
    }
}

/// Split a URL into pathname, search and hash.
///
/// The hash is cut first, so a `?` after `#` belongs to the hash. A bare `?`
/// or `#` yields an empty segment; an empty pathname becomes `/`.
pub fn parse(url: &str) -> Location {
    let (rest, hash) = match url.find('#') {
        Some(i) => url.split_at(i),
        None => (url, ""),
    };
    let (pathname, search) = match rest.find('?') {
        Some(i) => rest.split_at(i),
        None => (rest, ""),
    };
    Location {
        pathname: if pathname.is_empty() {
            "/".to_string()
        } else {
            pathname.to_string()
        },
        search: if search.len() > 1 {
            search.to_string()
        } else {
            String::new()
        },
        hash: if hash.len() > 1 {
            hash.to_string()
        } else {
            String::new()
        },
    }
}

pub fn serialize(loc: &Location) -> String {
    loc.to_string()
}

/// Decode `?a=1&b=2` (leading `?` optional) into a [`QueryMap`].
pub fn parse_query(search: &str) -> QueryMap {
    let raw = search.strip_prefix('?').unwrap_or(search);
    let mut map = QueryMap::new();
    for piece in raw.split('&').filter(|p| !p.is_empty()) {
        let (k, v) = piece.split_once('=').unwrap_or((piece, ""));
        match (decode_component(k), decode_component(v)) {
            (Some(k), Some(v)) => {
                if k.is_empty() {
                    continue;
                }
                map.insert(k, v);
            }
            _ => log::warn!("query: dropping undecodable pair `{piece}`"),
        }
    }
    map
}

/// Encode a [`QueryMap`] as `a=1&b=2`, without the leading `?`.
pub fn stringify_query(query: &QueryMap) -> String {
    query
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Apply one key's update to a copy of `query`.
pub fn merge_query_param(query: &QueryMap, key: &str, update: impl Into<QueryUpdate>) -> QueryMap {
    let mut next = query.clone();
    next.apply(key, update.into());
    next
}

/// Set one path param on a copy of `params`. Path params are never removed.
pub fn merge_path_param(params: &PathParams, key: &str, value: impl Into<String>) -> PathParams {
    let mut next = params.clone();
    next.insert(key.to_string(), value.into());
    next
}

fn search_from(query: &QueryMap) -> String {
    if query.is_empty() {
        String::new()
    } else {
        format!("?{}", stringify_query(query))
    }
}

fn normalize_prefixed(raw: &str, prefix: char) -> String {
    let body = raw.strip_prefix(prefix).unwrap_or(raw);
    if body.is_empty() {
        String::new()
    } else {
        format!("{prefix}{body}")
    }
}

fn decode_component(raw: &str) -> Option<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).ok().map(|c| c.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(pathname: &str, search: &str, hash: &str) -> Location {
        Location {
            pathname: pathname.into(),
            search: search.into(),
            hash: hash.into(),
        }
    }

    #[test]
    fn test_parse_splits_all_segments() {
        assert_eq!(
            parse("/projects/123/board/456?foo=hello&bar=world#hash"),
            loc("/projects/123/board/456", "?foo=hello&bar=world", "#hash")
        );
        assert_eq!(parse("/a"), loc("/a", "", ""));
        assert_eq!(parse("/a#x?y=1"), loc("/a", "", "#x?y=1"));
        assert_eq!(parse("/a?#"), loc("/a", "", ""));
        assert_eq!(parse("?q=1"), loc("/", "?q=1", ""));
    }

    #[test]
    fn test_round_trip() {
        for url in [
            "/",
            "/projects/123/board/456?foo=hello&bar=world#hash",
            "/a?x=%20y",
            "/a#only-hash",
            "/weird?%ZZ=1&ok=2",
        ] {
            let parsed = parse(url);
            assert_eq!(parse(&serialize(&parsed)), parsed, "{url}");
        }
    }

    #[test]
    fn test_parse_query_preserves_order() {
        let q = parse_query("?foo=hello&bar=world&baz");
        assert_eq!(
            q.iter().collect::<Vec<_>>(),
            vec![("foo", "hello"), ("bar", "world"), ("baz", "")]
        );
        assert_eq!(q.get("missing"), None);
    }

    #[test]
    fn test_parse_query_decoding() {
        let q = parse_query("a=one+two&b=%E2%9C%93&c=%20");
        assert_eq!(q.get("a"), Some("one two"));
        assert_eq!(q.get("b"), Some("\u{2713}"));
        assert_eq!(q.get("c"), Some(" "));
    }

    #[test]
    fn test_parse_query_duplicate_keeps_first_position_last_value() {
        let q = parse_query("a=1&b=2&a=3");
        assert_eq!(q.iter().collect::<Vec<_>>(), vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_malformed_pairs_are_dropped() {
        let q = parse_query("?bad=%FF&&=x&good=1");
        assert_eq!(q.iter().collect::<Vec<_>>(), vec![("good", "1")]);
    }

    #[test]
    fn test_stringify_encodes() {
        let q: QueryMap = [("q", "a b&c"), ("n", "1")].into_iter().collect();
        assert_eq!(stringify_query(&q), "q=a%20b%26c&n=1");
        assert_eq!(parse_query(&stringify_query(&q)), q);
    }

    #[test]
    fn test_merge_query_param_rules() {
        let q = parse_query("?foo=hello&bar=world");

        let removed = merge_query_param(&q, "foo", None::<String>);
        assert_eq!(stringify_query(&removed), "bar=world");

        let replaced = merge_query_param(&q, "foo", "newVal");
        assert_eq!(stringify_query(&replaced), "foo=newVal&bar=world");

        let appended = merge_query_param(&q, "newqueryparam", "val");
        assert_eq!(
            stringify_query(&appended),
            "foo=hello&bar=world&newqueryparam=val"
        );

        assert_eq!(merge_query_param(&q, "foo", QueryUpdate::Keep), q);
        assert_eq!(merge_query_param(&q, "absent", QueryUpdate::Remove), q);
    }

    #[test]
    fn test_merge_path_param_always_sets() {
        let params: PathParams = [("projectId".to_string(), "123".to_string())].into();
        let next = merge_path_param(&params, "projectId", "newVal");
        assert_eq!(next.get("projectId").map(String::as_str), Some("newVal"));
        assert_eq!(params.get("projectId").map(String::as_str), Some("123"));
    }

    #[test]
    fn test_location_builders() {
        let q: QueryMap = [("a", "1")].into_iter().collect();
        let l = Location::new("", &q, "top");
        assert_eq!(l.to_url(), "/?a=1#top");
        assert_eq!(l.with_query(&QueryMap::new()).to_url(), "/#top");
        assert_eq!(l.with_pathname("/x").to_url(), "/x?a=1#top");
    }

    #[test]
    fn test_query_map_serde_keeps_order() {
        let q = parse_query("z=1&a=2");
        let json = serde_json::to_string(&q).unwrap();
        assert_eq!(json, r#"[["z","1"],["a","2"]]"#);
        let back: QueryMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, q);
    }

    #[test]
    fn test_query_map_deserialize_merges_duplicates() {
        let q: QueryMap = serde_json::from_str(r#"[["a","1"],["b","2"],["a","3"]]"#).unwrap();
        assert_eq!(q.len(), 2);
        assert_eq!(q.iter().collect::<Vec<_>>(), vec![("a", "3"), ("b", "2")]);
    }
}
