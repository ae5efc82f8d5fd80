use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde_json::{Map, Value};

/// Insertion-ordered placeholder values.
///
/// Re-inserting an existing key replaces its value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    entries: Vec<(Arc<str>, String)>,
    index: FxHashMap<Arc<str>, usize>,
}

impl Variables {
    pub const TITLE: &'static str = "title";
    pub const BYTES: &'static str = "bytes";

    pub fn new() -> Self {
        Variables::default()
    }

    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<String>
        where K: Into<Arc<str>>, V: Into<String>
    {
        let key = key.into();
        let value = value.into();
        match self.index.get(&*key) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&i| &*self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (&**k, &**v))
    }

    /// A copy of `self` with the computed per-page entries `title` and `bytes`
    /// set, overriding configured values of the same name.
    pub fn for_page(&self, title: &str, bytes: usize) -> Variables {
        let mut vars = self.clone();
        vars.insert(Self::TITLE, title);
        vars.insert(Self::BYTES, bytes.to_string());
        vars
    }
}

/// The string form a configuration value takes when substituted.
fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

impl From<&Map<String, Value>> for Variables {
    fn from(map: &Map<String, Value>) -> Self {
        let mut vars = Variables::new();
        for (key, value) in map {
            vars.insert(key.as_str(), display(value));
        }

        vars
    }
}

impl<K: Into<Arc<str>>, V: Into<String>> FromIterator<(K, V)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = Variables::new();
        iter.into_iter().for_each(|(k, v)| { vars.insert(k, v); });
        vars
    }
}

impl<'a> IntoIterator for &'a Variables {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vars;

    #[test]
    fn reinsert_keeps_position() {
        let mut vars = vars!["name" => "A blog", "author" => "Jane"];
        assert_eq!(vars.insert("name", "B blog").as_deref(), Some("A blog"));

        let keys: Vec<_> = vars.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["name", "author"]);
        assert_eq!(vars.get("name"), Some("B blog"));
    }

    #[test]
    fn page_entries_override_configured_ones() {
        let site = vars!["title" => "configured", "favicon" => "🐇"];
        let page = site.for_page("Hello", 42);

        assert_eq!(page.get("title"), Some("Hello"));
        assert_eq!(page.get("bytes"), Some("42"));
        assert_eq!(page.get("favicon"), Some("🐇"));
        assert_eq!(site.get("title"), Some("configured"));
    }

    #[test]
    fn config_values_are_stringified_in_order() {
        let json = r#"{"name": "blog", "port": 8080, "draft": false, "none": null, "tags": ["a"]}"#;
        let map: Map<String, Value> = serde_json::from_str(json).unwrap();
        let vars = Variables::from(&map);

        let pairs: Vec<_> = vars.iter().collect();
        assert_eq!(pairs, [
            ("name", "blog"),
            ("port", "8080"),
            ("draft", "false"),
            ("none", ""),
            ("tags", r#"["a"]"#),
        ]);
    }
}
