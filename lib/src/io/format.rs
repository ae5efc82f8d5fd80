use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{Chainable, ErrorDetail, Result};
use crate::io::Source;

/// A configuration data format.
pub trait Format: Sized {
    /// The data format's error type.
    type Error: serde::de::Error + ErrorDetail + 'static;

    /// File extensions conventionally used by the format.
    const EXTENSIONS: &'static [&'static str];

    /// Parses `string` as the data format `Self` as a `T` or returns an error
    /// if the `string` is an invalid `T`.
    fn from_str<T: DeserializeOwned>(string: &str) -> Result<T, Self::Error>;

    fn read<I: Source, T: DeserializeOwned>(input: I) -> Result<T> {
        let path = input.path().map(|p| p.display().to_string());
        let string = input.read()?;
        Self::from_str(&string).chain_with(|| error! {
            "failed to parse configuration",
            "path" => path.as_deref().unwrap_or("<string>"),
        })
    }
}

macro_rules! impl_format {
    ($name:ident : $func:expr, $E:ty, [$($ext:literal),+]) => (
        #[derive(Debug, Default, Copy, Clone)]
        pub struct $name;

        impl Format for $name {
            type Error = $E;

            const EXTENSIONS: &'static [&'static str] = &[$($ext),+];

            fn from_str<T: DeserializeOwned>(s: &str) -> Result<T, $E> {
                $func(s)
            }
        }
    );
}

impl_format!(Toml: toml::from_str, toml::de::Error, ["toml"]);
impl_format!(Yaml: serde_yaml_ng::from_str, serde_yaml_ng::Error, ["yml", "yaml"]);
impl_format!(Json: serde_json::from_str, serde_json::Error, ["json"]);

/// Reads `path` with the format matching its extension.
pub fn read_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        e if Yaml::EXTENSIONS.contains(&e) => Yaml::read(path),
        e if Toml::EXTENSIONS.contains(&e) => Toml::read(path),
        e if Json::EXTENSIONS.contains(&e) => Json::read(path),
        _ => err! {
            "unsupported configuration format",
            "path" => path.display(),
            "supported extensions" => "yml, yaml, toml, json",
        },
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, Value};

    use super::*;

    #[test]
    fn formats_keep_key_order() {
        let yaml: Map<String, Value> = Yaml::read("name: blog\nauthor: me\nsrc: ./\n").unwrap();
        let toml: Map<String, Value> = Toml::read("name = 'blog'\nauthor = 'me'\nsrc = './'\n").unwrap();

        let keys = |m: &Map<String, Value>| m.keys().cloned().collect::<Vec<_>>();
        assert_eq!(keys(&yaml), ["name", "author", "src"]);
        assert_eq!(keys(&toml), ["name", "author", "src"]);
    }

    #[test]
    fn parse_errors_are_chained() {
        let error = Yaml::read::<_, Map<String, Value>>("a: [").unwrap_err();
        assert_eq!(error.message(), "failed to parse configuration");
        assert!(error.to_string().contains("<string>"));
    }

    #[test]
    fn unknown_extension() {
        let error = read_config::<Map<String, Value>>(Path::new("_config.ini")).unwrap_err();
        assert_eq!(error.message(), "unsupported configuration format");
    }
}
