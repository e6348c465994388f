use crate::error::{LogFileError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};

/// A named source of string properties.
///
/// Keys are dotted names such as `logging.file.name`. A source either has a
/// value for a key or it doesn't; blank handling is left to the caller.
pub trait PropertySource: Send + Sync {
    /// Look up a property value by key
    fn get_property(&self, key: &str) -> Option<String>;

    /// Human-readable name of this source, used in log output
    fn name(&self) -> String;

    fn contains_property(&self, key: &str) -> bool {
        self.get_property(key).is_some()
    }
}

/// In-memory property source that can be changed after it has been shared.
#[derive(Debug, Default)]
pub struct MapPropertySource {
    name: String,
    properties: RwLock<HashMap<String, String>>,
}

impl MapPropertySource {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            properties: RwLock::new(HashMap::new()),
        }
    }

    pub fn set_property<K: Into<String>, V: Into<String>>(&self, key: K, value: V) {
        let mut properties = self.properties.write().unwrap_or_else(|e| e.into_inner());
        properties.insert(key.into(), value.into());
    }

    pub fn remove_property(&self, key: &str) -> Option<String> {
        let mut properties = self.properties.write().unwrap_or_else(|e| e.into_inner());
        properties.remove(key)
    }

    pub fn len(&self) -> usize {
        self.properties
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PropertySource for MapPropertySource {
    fn get_property(&self, key: &str) -> Option<String> {
        let properties = self.properties.read().unwrap_or_else(|e| e.into_inner());
        properties.get(key).cloned()
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

/// Property source backed by process environment variables.
///
/// Dotted keys are bound loosely: `logging.file.name` is looked up as-is
/// first, then as `LOGGING_FILE_NAME` (with an optional prefix).
#[derive(Debug, Clone, Default)]
pub struct EnvPropertySource {
    prefix: Option<String>,
}

impl EnvPropertySource {
    pub fn new() -> Self {
        Self { prefix: None }
    }

    /// Only consider variables starting with `<PREFIX>_`
    pub fn with_prefix<S: Into<String>>(prefix: S) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    /// Environment variable name a dotted property key binds to
    pub fn env_var_name(&self, key: &str) -> String {
        let name: String = key
            .chars()
            .map(|c| match c {
                '.' | '-' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();

        match self.prefix {
            Some(ref prefix) => format!("{}_{}", prefix.to_ascii_uppercase(), name),
            None => name,
        }
    }
}

impl PropertySource for EnvPropertySource {
    fn get_property(&self, key: &str) -> Option<String> {
        if self.prefix.is_none() {
            if let Ok(value) = std::env::var(key) {
                return Some(value);
            }
        }
        std::env::var(self.env_var_name(key)).ok()
    }

    fn name(&self) -> String {
        match self.prefix {
            Some(ref prefix) => format!("environment ({}_*)", prefix.to_ascii_uppercase()),
            None => "environment".to_string(),
        }
    }
}

/// Property source loaded once from a TOML or JSON file.
///
/// Nested tables are flattened into dotted keys, so `[logging.file]` with
/// `name = "app.log"` becomes `logging.file.name`.
#[derive(Debug, Clone)]
pub struct FilePropertySource {
    name: String,
    properties: HashMap<String, String>,
}

impl FilePropertySource {
    /// Load properties from a file (supports TOML and JSON)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            LogFileError::ConfigError(format!("Failed to read config file: {}", e))
        })?;

        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        let root = match extension {
            "toml" => toml::from_str::<Value>(&contents)
                .map_err(|e| LogFileError::InvalidConfig(format!("Failed to parse TOML: {}", e)))?,
            "json" => serde_json::from_str::<Value>(&contents)
                .map_err(|e| LogFileError::InvalidConfig(format!("Failed to parse JSON: {}", e)))?,
            _ => {
                return Err(LogFileError::InvalidConfig(format!(
                    "Unsupported file format: {}. Use .toml or .json",
                    extension
                )))
            }
        };

        if !root.is_object() {
            return Err(LogFileError::InvalidConfig(
                "Configuration root must be a table".to_string(),
            ));
        }

        let mut properties = HashMap::new();
        flatten_into(&mut properties, None, &root);

        let properties = properties
            .into_iter()
            .map(|(key, value)| (key, expand_env_in_string(&value)))
            .collect();

        Ok(Self {
            name: format!("config file '{}'", path.display()),
            properties,
        })
    }
}

impl PropertySource for FilePropertySource {
    fn get_property(&self, key: &str) -> Option<String> {
        self.properties.get(key).cloned()
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

/// Ordered chain of sources; the first one holding a key wins.
#[derive(Default, Clone)]
pub struct CompositePropertySource {
    sources: Vec<Arc<dyn PropertySource>>,
}

impl CompositePropertySource {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Append a source with lower precedence than those already added
    pub fn add_last(&mut self, source: Arc<dyn PropertySource>) {
        self.sources.push(source);
    }

    /// Insert a source with higher precedence than those already added
    pub fn add_first(&mut self, source: Arc<dyn PropertySource>) {
        self.sources.insert(0, source);
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl PropertySource for CompositePropertySource {
    fn get_property(&self, key: &str) -> Option<String> {
        self.sources.iter().find_map(|source| source.get_property(key))
    }

    fn name(&self) -> String {
        let names: Vec<String> = self.sources.iter().map(|s| s.name()).collect();
        format!("composite [{}]", names.join(", "))
    }
}

fn flatten_into(out: &mut HashMap<String, String>, prefix: Option<&str>, value: &Value) {
    let join = |key: &str| match prefix {
        Some(prefix) => format!("{}.{}", prefix, key),
        None => key.to_string(),
    };

    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let full_key = join(key);
                flatten_into(out, Some(&full_key), child);
            }
        }
        Value::String(s) => {
            if let Some(key) = prefix {
                out.insert(key.to_string(), s.clone());
            }
        }
        Value::Number(n) => {
            if let Some(key) = prefix {
                out.insert(key.to_string(), n.to_string());
            }
        }
        Value::Bool(b) => {
            if let Some(key) = prefix {
                out.insert(key.to_string(), b.to_string());
            }
        }
        // Arrays and nulls have no single string value
        Value::Array(_) | Value::Null => {}
    }
}

/// Expand `$VAR` and `${VAR}` references; unknown variables are left as-is
pub(crate) fn expand_env_in_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find('$') {
        result.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], end + 2),
                None => ("", 0),
            }
        } else {
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (&after[..end], end)
        };

        let value = if name.is_empty() {
            None
        } else {
            std::env::var(name).ok()
        };

        match value {
            Some(value) => {
                result.push_str(&value);
                rest = &after[consumed..];
            }
            None => {
                result.push('$');
                rest = after;
            }
        }
    }

    result.push_str(rest);
    result
}
