// Default value pools for color, marker and dash attributes

use crate::error::{AttrError, Result};
use crate::scalar::AttrValue;

/// Default color palette for grouped charts
pub const DEFAULT_PALETTE: &[&str] = &["#f22c40", "#5ab738", "#407ee7", "#df5320", "#00ad9f"];

/// Supported marker shapes
pub const MARKER_TYPES: &[&str] = &[
    "circle",
    "square",
    "triangle",
    "diamond",
    "inverted_triangle",
    "asterisk",
    "cross",
    "x",
    "circle_cross",
    "circle_x",
    "square_x",
    "square_cross",
    "diamond_cross",
];

/// Supported line dash patterns
pub const DASH_PATTERNS: &[&str] = &["solid", "dashed", "dotted", "dotdash", "dashdot"];

/// D3 Category 10
pub const CATEGORY10: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd",
    "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
];

/// Tableau 10
pub const TABLEAU10: &[&str] = &[
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f",
    "#edc948", "#b07aa1", "#ff9da7", "#9c755f", "#bab0ac",
];

/// ColorBrewer Set1
pub const SET1: &[&str] = &[
    "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00",
    "#ffff33", "#a65628", "#f781bf", "#999999",
];

/// ColorBrewer Set2
pub const SET2: &[&str] = &[
    "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854",
    "#ffd92f", "#e5c494", "#b3b3b3",
];

/// ColorBrewer Dark2
pub const DARK2: &[&str] = &[
    "#1b9e77", "#d95f02", "#7570b3", "#e7298a", "#66a61e",
    "#e6ab02", "#a6761d", "#666666",
];

/// ColorBrewer Paired
pub const PAIRED: &[&str] = &[
    "#a6cee3", "#1f78b4", "#b2df8a", "#33a02c", "#fb9a99",
    "#e31a1c", "#fdbf6f", "#ff7f00", "#cab2d6", "#6a3d9a",
    "#ffff99", "#b15928",
];

/// Look up a categorical palette by name (case-insensitive)
pub fn named_palette(name: &str) -> Result<&'static [&'static str]> {
    match name.to_ascii_lowercase().as_str() {
        "default" => Ok(DEFAULT_PALETTE),
        "category10" => Ok(CATEGORY10),
        "tableau10" => Ok(TABLEAU10),
        "set1" => Ok(SET1),
        "set2" => Ok(SET2),
        "dark2" => Ok(DARK2),
        "paired" => Ok(PAIRED),
        _ => Err(AttrError::UnknownPalette(name.to_string())),
    }
}

/// Convert a list of names into a value pool
pub fn to_pool<S: AsRef<str>>(names: &[S]) -> Vec<AttrValue> {
    names.iter().map(|n| AttrValue::Name(n.as_ref().to_string())).collect()
}
