//! Addressable selection state.
//!
//! A query string such as `?symbol=AAPL&view=compact` carries the selected
//! company so a view can be bookmarked or shared. Parameters other than
//! `symbol` are preserved untouched and in order.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use url::form_urlencoded;

const SYMBOL_KEY: &str = "symbol";

/// Ordered query-string parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryState {
    params: Vec<(String, String)>,
}

impl QueryState {
    /// Parse a query string. The leading `?` is optional; `+` and `%XX`
    /// escapes are decoded and malformed escapes are kept literally.
    pub fn parse(query: &str) -> Self {
        let query = query.trim();
        let query = query.strip_prefix('?').unwrap_or(query);
        let params = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        Self { params }
    }

    /// First value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set `key`, replacing its first occurrence and dropping any others.
    pub fn set(&mut self, key: &str, value: &str) {
        match self.params.iter().position(|(k, _)| k == key) {
            Some(index) => {
                self.params[index].1 = value.to_string();
                let mut seen = 0;
                self.params.retain(|(k, _)| {
                    if k != key {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.params.push((key.to_string(), value.to_string())),
        }
    }

    /// Remove every occurrence of `key`.
    pub fn remove(&mut self, key: &str) {
        self.params.retain(|(k, _)| k != key);
    }

    /// The selected symbol, uppercased. Blank values count as absent.
    pub fn symbol(&self) -> Option<String> {
        self.get(SYMBOL_KEY)
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
    }

    /// Set (`Some`) or remove (`None`) the selected symbol.
    pub fn with_symbol(mut self, symbol: Option<&str>) -> Self {
        match symbol {
            Some(symbol) => self.set(SYMBOL_KEY, symbol),
            None => self.remove(SYMBOL_KEY),
        }
        self
    }

    /// Parameters in order.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// `application/x-www-form-urlencoded` query string with a leading `?`,
    /// or empty when there are no parameters.
    pub fn to_query_string(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }
        form_urlencoded::Serializer::new(String::from("?"))
            .extend_pairs(self.params.iter())
            .finish()
    }
}

impl FromStr for QueryState {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for QueryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}
