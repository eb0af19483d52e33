//! Flat key/value payloads and their form-urlencoded serialization.
//!
//! # Design
//! `ParamMap` keeps entries in insertion order so the encoded body is
//! deterministic. Values are scalars only; they are rendered the way a plain
//! string concatenation would render them (numbers follow ECMAScript
//! `Number#toString`, via `ryu-js`), with no percent-escaping of keys
//! or values. Callers are responsible for passing pre-sanitized input.

use std::fmt;

use serde::Deserialize;

/// A scalar value carried in a `ParamMap`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Int(n) => write!(f, "{n}"),
            ParamValue::UInt(n) => write!(f, "{n}"),
            ParamValue::Float(x) => f.write_str(ryu_js::Buffer::new().format(*x)),
            ParamValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Str(s)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Int(n)
    }
}

impl From<i32> for ParamValue {
    fn from(n: i32) -> Self {
        ParamValue::Int(n.into())
    }
}

impl From<u32> for ParamValue {
    fn from(n: u32) -> Self {
        ParamValue::Int(n.into())
    }
}

impl From<u64> for ParamValue {
    fn from(n: u64) -> Self {
        ParamValue::UInt(n)
    }
}

impl From<usize> for ParamValue {
    fn from(n: usize) -> Self {
        ParamValue::UInt(n as u64)
    }
}

/// Keeps the shortest decimal form of the `f32` (`0.1f32` stays `0.1`)
/// instead of its exact widened value.
impl From<f32> for ParamValue {
    fn from(x: f32) -> Self {
        let shortest = ryu_js::Buffer::new().format(x).parse::<f64>();
        ParamValue::Float(shortest.unwrap_or(f64::from(x)))
    }
}

impl From<f64> for ParamValue {
    fn from(x: f64) -> Self {
        ParamValue::Float(x)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

/// Ordered mapping of string keys to scalar values.
///
/// Deserializes from a list of `[key, value]` pairs so ordering survives a
/// JSON round-trip without relying on object key order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Vec<(String, ParamValue)>")]
pub struct ParamMap {
    entries: Vec<(String, ParamValue)>,
}

impl ParamMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key`. An existing key keeps its position and takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<Vec<(String, ParamValue)>> for ParamMap {
    fn from(pairs: Vec<(String, ParamValue)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for ParamMap
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ParamMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Serialize `params` as `key=value` pairs joined by `&`.
///
/// Keys and values are written verbatim. An empty map encodes to `""`.
pub fn encode_params(params: &ParamMap) -> String {
    let mut encoded = String::new();
    for (key, value) in params.iter() {
        encoded.push('&');
        encoded.push_str(key);
        encoded.push('=');
        encoded.push_str(&value.to_string());
    }
    match encoded.strip_prefix('&') {
        Some(rest) => rest.to_string(),
        None => encoded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_map_encodes_to_empty_string() {
        assert_eq!(encode_params(&ParamMap::new()), "");
    }

    #[test]
    fn two_entries_keep_insertion_order() {
        let params: ParamMap = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(encode_params(&params), "a=1&b=2");
    }

    #[test]
    fn separator_count_is_one_less_than_entry_count() {
        for n in 1..=8 {
            let params: ParamMap = (0..n).map(|i| (format!("k{i}"), i)).collect();
            let encoded = encode_params(&params);
            assert_eq!(encoded.matches('&').count(), n as usize - 1, "n = {n}");
            assert!(!encoded.starts_with('&'));
        }
    }

    #[test]
    fn reinserting_a_key_keeps_its_position() {
        let mut params = ParamMap::new();
        params.insert("a", "1");
        params.insert("b", "2");
        params.insert("a", "3");
        assert_eq!(params.len(), 2);
        assert_eq!(encode_params(&params), "a=3&b=2");
    }

    #[test]
    fn special_characters_are_not_escaped() {
        let params: ParamMap = [("q", "a b&c=d")].into_iter().collect();
        assert_eq!(encode_params(&params), "q=a b&c=d");
    }

    #[test]
    fn scalars_render_like_string_concatenation() {
        let mut params = ParamMap::new();
        params.insert("flag", true);
        params.insert("whole", 2.0);
        params.insert("frac", 1.5);
        params.insert("neg", -7);
        params.insert("inf", f64::INFINITY);
        assert_eq!(
            encode_params(&params),
            "flag=true&whole=2&frac=1.5&neg=-7&inf=Infinity"
        );
    }

    #[test]
    fn floats_follow_number_to_string() {
        let cases = [
            (-0.0, "0"),
            (1e21, "1e+21"),
            (1e-7, "1e-7"),
            (123456.789, "123456.789"),
            (f64::NEG_INFINITY, "-Infinity"),
            (f64::NAN, "NaN"),
        ];
        for (x, expected) in cases {
            assert_eq!(ParamValue::Float(x).to_string(), expected, "{x:?}");
        }
    }

    #[test]
    fn unsigned_and_f32_convert_without_casts() {
        let mut params = ParamMap::new();
        params.insert("u32", 7u32);
        params.insert("u64", u64::MAX);
        params.insert("usize", 3usize);
        params.insert("f32", 0.1f32);
        assert_eq!(params.get("u32"), Some(&ParamValue::Int(7)));
        assert_eq!(
            encode_params(&params),
            "u32=7&u64=18446744073709551615&usize=3&f32=0.1"
        );
    }

    #[test]
    fn deserializes_from_ordered_pairs() {
        let params: ParamMap =
            serde_json::from_str(r#"[["z", "last"], ["a", 1], ["ok", false]]"#).unwrap();
        assert_eq!(params.get("z"), Some(&ParamValue::Str("last".to_string())));
        assert_eq!(params.get("a"), Some(&ParamValue::Int(1)));
        assert_eq!(encode_params(&params), "z=last&a=1&ok=false");
    }
}
