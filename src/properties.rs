//! Color property definitions with defaults from ridgeplot.json
//!
//! ridgeplot.json is embedded at compile time and declares every color
//! property, its default value and (for enumerated properties) the accepted
//! values. Defaults live in that ONE place; readers never hardcode fallbacks.

use crate::error::{Result, RidgeplotError};
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::collections::HashMap;

/// ridgeplot.json embedded at compile time
const RIDGEPLOT_JSON: &str = include_str!("../ridgeplot.json");

/// Property definition from ridgeplot.json
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDef {
    pub name: String,
    pub kind: PropertyKind,
    #[serde(default)]
    pub default_value: String,
    #[serde(default)]
    pub description: String,
    /// For EnumeratedProperty, the valid values
    #[serde(default, rename = "values")]
    pub valid_values: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PropertyKind {
    #[serde(rename = "StringProperty")]
    String,
    #[serde(rename = "EnumeratedProperty")]
    Enumerated,
}

#[derive(Debug, Deserialize)]
struct PropertyFile {
    properties: Vec<PropertyDef>,
}

/// Registry of all color properties with their defaults
#[derive(Debug)]
pub struct PropertyRegistry {
    properties: HashMap<String, PropertyDef>,
}

impl PropertyRegistry {
    /// Parse a property file in the ridgeplot.json format
    pub fn from_json(json: &str) -> Result<Self> {
        let file: PropertyFile = serde_json::from_str(json)?;

        let mut properties = HashMap::new();
        for prop in file.properties {
            if prop.kind == PropertyKind::Enumerated && prop.valid_values.is_none() {
                return Err(RidgeplotError::Config(format!(
                    "Enumerated property '{}' declares no values",
                    prop.name
                )));
            }
            properties.insert(prop.name.clone(), prop);
        }

        log::debug!("PropertyRegistry: Loaded {} properties", properties.len());
        Ok(Self { properties })
    }

    /// Get the default value for a property
    pub fn get_default(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(|p| p.default_value.as_str())
    }

    /// Get the property definition
    pub fn get_property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.get(name)
    }

    /// Canonical spelling of `value` if it is valid for an enumerated property
    ///
    /// Matching is case-insensitive. Non-enumerated properties accept any value.
    pub fn match_enum_value(&self, name: &str, value: &str) -> Option<String> {
        match self.properties.get(name).and_then(|p| p.valid_values.as_ref()) {
            Some(values) => values
                .iter()
                .find(|v| v.eq_ignore_ascii_case(value))
                .cloned(),
            None => Some(value.to_string()),
        }
    }
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceCell<PropertyRegistry> = OnceCell::new();

/// Get the global property registry
pub fn registry() -> Result<&'static PropertyRegistry> {
    REGISTRY.get_or_try_init(|| PropertyRegistry::from_json(RIDGEPLOT_JSON))
}

/// Typed property reader
///
/// Reads user-supplied string properties, using defaults from ridgeplot.json.
pub struct PropertyReader<'a> {
    registry: &'a PropertyRegistry,
    /// User-set values (empty strings are treated as "not set")
    user_values: HashMap<String, String>,
}

impl PropertyReader<'static> {
    /// Reader backed by the embedded ridgeplot.json
    pub fn new(user_values: &HashMap<String, String>) -> Result<Self> {
        Ok(Self::with_registry(registry()?, user_values))
    }
}

impl<'a> PropertyReader<'a> {
    pub fn with_registry(
        registry: &'a PropertyRegistry,
        user_values: &HashMap<String, String>,
    ) -> Self {
        let user_values = user_values
            .iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(name, value)| (name.clone(), value.trim().to_string()))
            .collect();

        Self {
            registry,
            user_values,
        }
    }

    /// Get string property (user value or default)
    pub fn get_string(&self, name: &str) -> Result<String> {
        if let Some(value) = self.user_values.get(name) {
            return Ok(value.clone());
        }

        self.registry
            .get_default(name)
            .map(str::to_string)
            .ok_or_else(|| RidgeplotError::Config(format!("Unknown property '{}'", name)))
    }

    /// Get optional string property (None if empty)
    pub fn get_optional_string(&self, name: &str) -> Result<Option<String>> {
        let value = self.get_string(name)?;
        Ok(if value.is_empty() { None } else { Some(value) })
    }

    /// Get enumerated property with validation
    ///
    /// Invalid values are rejected with an error listing the valid ones.
    pub fn get_enum(&self, name: &str) -> Result<String> {
        let value = self.get_string(name)?;
        self.registry.match_enum_value(name, &value).ok_or_else(|| {
            let valid_values = self
                .registry
                .get_property(name)
                .and_then(|p| p.valid_values.as_ref())
                .map(|v| v.join(", "))
                .unwrap_or_default();
            RidgeplotError::InvalidArgument(format!(
                "Invalid value '{}' for property '{}'. Valid values: [{}]",
                value, name, valid_values
            ))
        })
    }

    /// Get optional f64 property (None if empty)
    pub fn get_optional_f64(&self, name: &str) -> Result<Option<f64>> {
        match self.get_optional_string(name)? {
            None => Ok(None),
            Some(value) => value.parse::<f64>().map(Some).map_err(|_| {
                RidgeplotError::Config(format!(
                    "Invalid numeric value '{}' for property '{}'",
                    value, name
                ))
            }),
        }
    }
}
