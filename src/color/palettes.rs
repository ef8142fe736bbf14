//! Palette registry for loading and accessing named colorscales
//!
//! Loads palettes from palettes.json (embedded at compile time) and provides
//! access by name. The palettes mirror the continuous colorscales offered by
//! plotly so that names such as "plasma" or "viridis" resolve to the same colors.
//!
//! Palette types:
//! - `sequential`: Gradient from low to high values
//! - `diverging`: Gradient with a neutral midpoint (e.g., for +/- deviations)

use super::colors::Color;
use super::colorscale::ColorScale;
use crate::error::Result;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::collections::HashMap;

/// Embedded palettes.json content
const PALETTES_JSON: &str = include_str!("../../palettes.json");

/// Global palette registry (initialized lazily)
static PALETTE_REGISTRY: OnceCell<PaletteRegistry> = OnceCell::new();

/// Get the global palette registry
///
/// A palettes.json that fails to load is reported to every caller.
pub fn palette_registry() -> Result<&'static PaletteRegistry> {
    PALETTE_REGISTRY.get_or_try_init(|| {
        PaletteRegistry::from_json(PALETTES_JSON).map_err(|e| {
            log::error!("Failed to load palettes.json: {}", e);
            e
        })
    })
}

/// Colorscale used when none is given
pub const DEFAULT_COLORSCALE: &str = "plasma";

/// Palette type as defined in palettes.json
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteType {
    Sequential,
    Diverging,
}

/// A single palette definition from palettes.json
#[derive(Debug, Clone, Deserialize)]
pub struct PaletteDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub palette_type: PaletteType,
    pub colors: Vec<Color>,
}

impl PaletteDefinition {
    /// Get the number of colors in this palette
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if the palette is empty
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Spread the palette colors evenly over [0, 1]
    pub fn to_colorscale(&self) -> Result<ColorScale> {
        ColorScale::from_colors(&self.colors)
    }
}

/// Registry of all available palettes
#[derive(Debug, Clone, Default)]
pub struct PaletteRegistry {
    /// All palettes by name (lowercase keys for case-insensitive lookup)
    palettes: HashMap<String, PaletteDefinition>,
    sequential_names: Vec<String>,
    diverging_names: Vec<String>,
}

impl PaletteRegistry {
    /// Load palettes from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let definitions: Vec<PaletteDefinition> = serde_json::from_str(json)?;

        let mut registry = Self::default();

        for def in definitions {
            let name = def.name.to_lowercase();
            match def.palette_type {
                PaletteType::Sequential => registry.sequential_names.push(name.clone()),
                PaletteType::Diverging => registry.diverging_names.push(name.clone()),
            }
            registry.palettes.insert(name, def);
        }

        log::debug!(
            "PaletteRegistry: Loaded {} palettes ({} sequential, {} diverging)",
            registry.palettes.len(),
            registry.sequential_names.len(),
            registry.diverging_names.len()
        );

        Ok(registry)
    }

    /// Get a palette by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&PaletteDefinition> {
        self.palettes.get(&name.to_lowercase())
    }

    /// All palette names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.palettes.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn sequential_palettes(&self) -> &[String] {
        &self.sequential_names
    }

    pub fn diverging_palettes(&self) -> &[String] {
        &self.diverging_names
    }
}

/// List the names of every colorscale that can be passed by name
pub fn list_all_colorscale_names() -> Result<Vec<String>> {
    Ok(palette_registry()?.names())
}
