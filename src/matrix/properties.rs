//! Matrix property definitions with defaults from matrix_properties.json
//!
//! The property file is embedded at compile time, so defaults are defined in ONE
//! place. User values come from a flat JSON object (`matrix_config.json`) and are
//! validated against the registry; anything invalid falls back to the default
//! with a warning.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use super::error::{MatrixError, Result};
use super::palette::parse_hex_color;

/// matrix_properties.json embedded at compile time
const PROPERTIES_JSON: &str = include_str!("../../matrix_properties.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PropertyKind {
    #[serde(rename = "StringProperty")]
    String,
    #[serde(rename = "EnumeratedProperty")]
    Enumerated,
}

/// Property definition from matrix_properties.json
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDef {
    pub name: String,
    pub kind: PropertyKind,
    #[serde(rename = "defaultValue", default)]
    pub default_value: String,
    #[serde(default)]
    pub description: String,
    /// For enumerated properties, the valid values
    #[serde(rename = "values", default)]
    pub valid_values: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct PropertyFile {
    properties: Vec<PropertyDef>,
}

/// Registry of all matrix properties with their defaults
#[derive(Debug, Default)]
pub struct PropertyRegistry {
    properties: HashMap<String, PropertyDef>,
}

impl PropertyRegistry {
    pub fn from_json(json: &str) -> Result<Self> {
        let file: PropertyFile = serde_json::from_str(json)
            .map_err(|e| MatrixError::Config(format!("invalid property definitions: {}", e)))?;

        let properties = file
            .properties
            .into_iter()
            .map(|p| (p.name.clone(), p))
            .collect();

        Ok(Self { properties })
    }

    pub fn get_default(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(|p| p.default_value.as_str())
    }

    pub fn get_property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.get(name)
    }

    /// Names of all known properties, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.properties.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Check if a value is valid for an enumerated property
    pub fn is_valid_enum_value(&self, name: &str, value: &str) -> bool {
        self.properties
            .get(name)
            .and_then(|p| p.valid_values.as_ref())
            .map(|values| values.iter().any(|v| v.eq_ignore_ascii_case(value)))
            .unwrap_or(true) // Non-enumerated properties accept any value
    }
}

static REGISTRY: std::sync::OnceLock<PropertyRegistry> = std::sync::OnceLock::new();

/// Global property registry, parsed on first access
pub fn registry() -> &'static PropertyRegistry {
    REGISTRY.get_or_init(|| {
        PropertyRegistry::from_json(PROPERTIES_JSON).unwrap_or_else(|e| {
            tracing::error!("failed to load matrix_properties.json: {}", e);
            PropertyRegistry::default()
        })
    })
}

/// Typed property reader: user value if set and valid, registry default otherwise
#[derive(Debug, Default)]
pub struct PropertyReader {
    user_values: HashMap<String, String>,
    /// Keys the user set to "": defaults for typed getters, None for optional strings
    cleared: HashSet<String>,
}

impl PropertyReader {
    pub fn new(user_values: HashMap<String, String>) -> Self {
        let (cleared, user_values): (HashMap<_, _>, HashMap<_, _>) =
            user_values.into_iter().partition(|(_, v)| v.is_empty());
        Self {
            user_values,
            cleared: cleared.into_keys().collect(),
        }
    }

    /// Parse a flat JSON object; numbers and booleans are stringified
    pub fn from_json_str(json: &str) -> Result<Self> {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)
            .map_err(|e| MatrixError::Config(format!("invalid property file: {}", e)))?;

        let mut values = HashMap::new();
        for (key, value) in map {
            let value = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                other => {
                    tracing::warn!("ignoring non-scalar value for property '{}': {}", key, other);
                    continue;
                }
            };
            if registry().get_property(&key).is_none() {
                tracing::warn!("unknown property '{}' ignored", key);
                continue;
            }
            values.insert(key, value);
        }

        Ok(Self::new(values))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            MatrixError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// String property (user value or registry default)
    pub fn get_string(&self, name: &str) -> String {
        if let Some(value) = self.user_values.get(name) {
            return value.clone();
        }
        registry().get_default(name).unwrap_or("").to_string()
    }

    /// Optional string property; None if the user cleared it or the default is empty
    pub fn get_optional_string(&self, name: &str) -> Option<String> {
        if self.cleared.contains(name) {
            return None;
        }
        let value = self.get_string(name);
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Enumerated property; invalid user values fall back to the default
    pub fn get_enum(&self, name: &str) -> String {
        let reg = registry();
        let default = reg.get_default(name).unwrap_or("");

        if let Some(value) = self.user_values.get(name) {
            if reg.is_valid_enum_value(name, value) {
                return value.clone();
            }
            let valid_values = reg
                .get_property(name)
                .and_then(|p| p.valid_values.as_ref())
                .map(|v| v.join(", "))
                .unwrap_or_default();
            tracing::warn!(
                "invalid value '{}' for property '{}'. Valid values: [{}]. Using default: '{}'",
                value,
                name,
                valid_values,
                default
            );
        }

        default.to_string()
    }

    fn default_f64(name: &str) -> f64 {
        registry()
            .get_default(name)
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(0.0)
    }

    /// f64 property with range validation
    pub fn get_f64_in_range(&self, name: &str, min: f64, max: f64) -> f64 {
        let default = Self::default_f64(name);
        let Some(raw) = self.user_values.get(name) else {
            return default;
        };

        match raw.trim().parse::<f64>() {
            Ok(v) if (min..=max).contains(&v) => v,
            Ok(v) => {
                tracing::warn!(
                    "value {} for property '{}' out of range [{}, {}]. Using default: {}",
                    v,
                    name,
                    min,
                    max,
                    default
                );
                default
            }
            Err(_) => {
                tracing::warn!(
                    "invalid numeric value '{}' for property '{}'. Using default: {}",
                    raw,
                    name,
                    default
                );
                default
            }
        }
    }

    /// Integer property with range validation
    pub fn get_usize_in_range(&self, name: &str, min: usize, max: usize) -> usize {
        let default = registry()
            .get_default(name)
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(min);
        let Some(raw) = self.user_values.get(name) else {
            return default;
        };

        match raw.trim().parse::<usize>() {
            Ok(v) if (min..=max).contains(&v) => v,
            _ => {
                tracing::warn!(
                    "invalid value '{}' for property '{}' (expected integer in [{}, {}]). Using default: {}",
                    raw,
                    name,
                    min,
                    max,
                    default
                );
                default
            }
        }
    }

    /// Hex color property
    pub fn get_color(&self, name: &str) -> [u8; 3] {
        let default = registry()
            .get_default(name)
            .and_then(parse_hex_color)
            .unwrap_or([128, 128, 128]);
        match self.user_values.get(name) {
            Some(raw) => parse_hex_color(raw).unwrap_or_else(|| {
                tracing::warn!(
                    "invalid color '{}' for property '{}'. Using default",
                    raw,
                    name
                );
                default
            }),
            None => default,
        }
    }
}
