//! Raw automation-style parameters
//!
//! Build requests arrive as `-Key=Value` tokens. Keys are matched
//! case-insensitively and the last occurrence of a key wins.

use std::collections::HashMap;

/// Parsed raw parameter set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamSet {
    values: HashMap<String, String>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse tokens of the form `-Key=Value`, `Key=Value` or `-Flag`.
    ///
    /// A bare flag is recorded with an empty value. Values keep any further
    /// `=` characters. Empty tokens are ignored.
    pub fn parse<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut params = Self::new();
        for token in tokens {
            let token = token.as_ref().trim();
            let token = token.trim_start_matches('-');
            if token.is_empty() {
                continue;
            }
            match token.split_once('=') {
                Some((key, value)) => params.insert(key, trim_quotes(value)),
                None => params.insert(token, ""),
            }
        }
        params
    }

    /// Insert or replace a parameter
    pub fn insert(&mut self, key: &str, value: &str) {
        self.values
            .insert(key.trim().to_ascii_lowercase(), value.to_string());
    }

    /// Builder-style insert, mostly for tests
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.insert(key, value);
        self
    }

    /// Value of a parameter, `None` when absent
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Value of a parameter or a default when absent
    pub fn value_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.value(key).unwrap_or(default)
    }

    /// Boolean switch: only the literal `True` enables it
    pub fn is_true(&self, key: &str) -> bool {
        self.value(key) == Some("True")
    }

    pub fn contains(&self, key: &str) -> bool {
        self.value(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn trim_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    include!("params.test.rs");
}
