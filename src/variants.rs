// Encoding variants: presets over the shared attribute specification

use crate::palette::{to_pool, DASH_PATTERNS, DEFAULT_PALETTE, MARKER_TYPES};
use crate::scalar::AttrValue;
use crate::source::Traversal;
use serde::Deserialize;
use std::fmt;

/// The kind of visual encoding an attribute provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Color,
    Marker,
    Dash,
    Cat,
}

/// Per-encoding configuration record
#[derive(Debug, Clone)]
pub struct VariantConfig {
    /// Attribute name reported to consumers
    pub name: &'static str,
    /// Values cycled when no pool override is given (empty for categorical)
    pub default_pool: Vec<AttrValue>,
    pub traversal: Traversal,
    /// Keyword used by builder calls to override the pool
    pub override_keyword: &'static str,
}

impl Encoding {
    pub const ALL: [Encoding; 4] = [Encoding::Color, Encoding::Marker, Encoding::Dash, Encoding::Cat];

    pub fn config(self) -> VariantConfig {
        match self {
            Encoding::Color => VariantConfig {
                name: "color",
                default_pool: to_pool(DEFAULT_PALETTE),
                traversal: Traversal::Cyclic,
                override_keyword: "palette",
            },
            Encoding::Marker => VariantConfig {
                name: "marker",
                default_pool: to_pool(MARKER_TYPES),
                traversal: Traversal::Cyclic,
                override_keyword: "markers",
            },
            Encoding::Dash => VariantConfig {
                name: "dash",
                default_pool: to_pool(DASH_PATTERNS),
                traversal: Traversal::Cyclic,
                override_keyword: "dashes",
            },
            Encoding::Cat => VariantConfig {
                name: "nest",
                default_pool: Vec::new(),
                traversal: Traversal::IdentityWalk,
                override_keyword: "cats",
            },
        }
    }

    /// Builder function name for this encoding
    pub fn function_name(self) -> &'static str {
        match self {
            Encoding::Color => "color",
            Encoding::Marker => "marker",
            Encoding::Dash => "dash",
            Encoding::Cat => "cat",
        }
    }

    pub fn from_function_name(name: &str) -> Option<Self> {
        Encoding::ALL.into_iter().find(|e| e.function_name() == name)
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.function_name())
    }
}
