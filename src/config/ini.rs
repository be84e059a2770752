/// A minimal flat key/value (INI-style) config loader: `[section]` headers,
/// `key = value` lines, `#` and `;` comments. This is deliberately simple —
/// the format itself is an external collaborator, not part of the system
/// under test.
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::core::CrawlError;

pub struct IniFile {
    values: HashMap<String, String>,
}

impl IniFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CrawlError> {
        let text = fs::read_to_string(path.as_ref())
            .map_err(|e| CrawlError::Config(format!("cannot read {:?}: {e}", path.as_ref())))?;
        Ok(Self::parse(&text))
    }

    fn parse(text: &str) -> Self {
        let mut values = HashMap::new();
        let mut section = String::new();

        for raw_line in text.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            if line.starts_with('[') && line.ends_with(']') {
                section = line[1..line.len() - 1].trim().to_string();
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();
            let full_key = if section.is_empty() {
                key.to_string()
            } else {
                format!("{section}.{key}")
            };
            values.insert(full_key, value.to_string());
        }

        Self { values }
    }

    pub fn get_str(&self, key: &str) -> Result<String, CrawlError> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| CrawlError::Config(format!("missing key: {key}")))
    }

    pub fn get_int(&self, key: &str) -> Result<i64, CrawlError> {
        self.get_str(key)?
            .parse()
            .map_err(|_| CrawlError::Config(format!("key {key} is not an integer")))
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, CrawlError> {
        match self.get_str(key)?.to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(CrawlError::Config(format!(
                "key {key} is not a boolean: {other}"
            ))),
        }
    }
}
