//! Navigable location: a path plus ordered query parameters.

use std::fmt;

/// The URL a listing is showing. Paths are kept percent-encoded; query
/// parameters are kept decoded and encoded again on display.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Location {
    path: String,
    query: Vec<(String, String)>,
}

impl Location {
    /// Return a location for `path` without query parameters.
    ///
    pub fn new(path: &str) -> Self {
        Location {
            path: if path.is_empty() { "/".to_owned() } else { path.to_owned() },
            query: vec![],
        }
    }

    /// Parse `path?query`. Malformed percent-escapes are kept verbatim.
    ///
    pub fn parse(raw: &str) -> Self {
        let (path, query) = match raw.split_once('?') {
            Some((path, query)) => (path, query),
            None => (raw, ""),
        };
        let mut location = Location::new(path);
        location.query = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((key, value)) => (decode_component(key), decode_component(value)),
                None => (decode_component(pair), String::new()),
            })
            .collect();
        location
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Decoded non-empty path segments.
    ///
    pub fn segments(&self) -> Vec<String> {
        self.path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| match urlencoding::decode(segment) {
                Ok(decoded) => decoded.into_owned(),
                Err(_) => segment.to_owned(),
            })
            .collect()
    }

    /// First value of the query parameter `key`.
    ///
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set `key` to `value`, replacing every previous value.
    ///
    pub fn set_query_param(&mut self, key: &str, value: &str) -> &mut Self {
        match self.query.iter().position(|(k, _)| k == key) {
            Some(index) => {
                self.query[index].1 = value.to_owned();
                let mut seen = false;
                self.query.retain(|(k, _)| {
                    if k != key {
                        return true;
                    }
                    let keep = !seen;
                    seen = true;
                    keep
                });
            }
            None => self.query.push((key.to_owned(), value.to_owned())),
        }
        self
    }

    pub fn remove_query_param(&mut self, key: &str) -> &mut Self {
        self.query.retain(|(k, _)| k != key);
        self
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        for (index, (key, value)) in self.query.iter().enumerate() {
            let separator = if index == 0 { '?' } else { '&' };
            write!(
                f,
                "{}{}={}",
                separator,
                urlencoding::encode(key),
                urlencoding::encode(value)
            )?;
        }
        Ok(())
    }
}

fn decode_component(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    match urlencoding::decode(&raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let location = Location::parse("/news/region/sofia?page=3&sort=new");
        assert_eq!(location.path(), "/news/region/sofia");
        assert_eq!(location.query_param("page"), Some("3"));
        assert_eq!(location.query_param("sort"), Some("new"));
        assert_eq!(location.to_string(), "/news/region/sofia?page=3&sort=new");
    }

    #[test]
    fn test_query_values_are_decoded() {
        let location = Location::parse("/news?q=%D0%B2%D1%8A%D0%B7+%D1%81");
        assert_eq!(location.query_param("q"), Some("въз с"));
    }

    #[test]
    fn test_set_and_remove_query_param() {
        let mut location = Location::parse("/news?page=2&page=9&x=1");
        location.set_query_param("page", "4");
        assert_eq!(location.to_string(), "/news?page=4&x=1");

        location.remove_query_param("page");
        assert_eq!(location.to_string(), "/news?x=1");

        location.remove_query_param("x").set_query_param("page", "2");
        assert_eq!(location.to_string(), "/news?page=2");
    }

    #[test]
    fn test_segments() {
        let location = Location::parse("/news/search/%D1%81%D0%BF%D0%BE%D1%80%D1%82/");
        assert_eq!(location.segments(), vec!["news", "search", "спорт"]);
        assert!(Location::parse("/").segments().is_empty());
        assert_eq!(Location::parse("").path(), "/");
    }
}
