// Builder functions: one attribute specification per encoding preset

use crate::error::Result;
use crate::scalar::{AttrValue, GroupKey, Scalar};
use crate::source::Traversal;
use crate::spec::{AttrSpec, ColumnSpec};
use crate::variants::Encoding;
use serde::Deserialize;

/// Generic options shared by every builder function
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AttrOptions {
    /// Value used when no mapping applies; defaults to the first pool value
    #[serde(default)]
    pub default: Option<String>,
    /// Explicit group list overriding derivation from the data
    #[serde(default)]
    pub items: Option<Vec<Vec<String>>>,
    #[serde(default = "default_true")]
    pub sort: bool,
    #[serde(default = "default_true")]
    pub ascending: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AttrOptions {
    fn default() -> Self {
        Self {
            default: None,
            items: None,
            sort: true,
            ascending: true,
        }
    }
}

/// Build a specification for any encoding
pub fn attr(
    encoding: Encoding,
    columns: Option<ColumnSpec>,
    pool: Option<Vec<String>>,
    options: AttrOptions,
) -> Result<AttrSpec> {
    let mut spec = AttrSpec::new(encoding);
    spec.set_sort(options.sort, options.ascending);

    if let Some(items) = options.items {
        spec.set_items(
            items
                .into_iter()
                .map(|values| GroupKey::new(values.iter().map(|v| Scalar::infer(v)).collect()))
                .collect(),
        );
    }
    if let Some(pool) = pool {
        // Categories are group identities and must compare equal to data cells
        let values = match spec.traversal() {
            Traversal::Cyclic => pool.into_iter().map(AttrValue::Name).collect(),
            Traversal::IdentityWalk => pool
                .iter()
                .map(|v| AttrValue::Key(GroupKey::from(Scalar::infer(v))))
                .collect(),
        };
        spec.set_pool(values)?;
    }
    if let Some(default) = options.default {
        let default = match spec.traversal() {
            Traversal::Cyclic => AttrValue::Name(default),
            Traversal::IdentityWalk => AttrValue::Key(GroupKey::from(Scalar::infer(&default))),
        };
        spec.set_default(Some(default));
    }
    if let Some(columns) = columns {
        spec.set_columns(columns)?;
    }
    Ok(spec)
}

/// Color groups of data based on `columns`, optionally with a custom palette
pub fn color(
    columns: Option<ColumnSpec>,
    palette: Option<Vec<String>>,
    options: AttrOptions,
) -> Result<AttrSpec> {
    attr(Encoding::Color, columns, palette, options)
}

/// Assign marker shapes to groups of data
pub fn marker(
    columns: Option<ColumnSpec>,
    markers: Option<Vec<String>>,
    options: AttrOptions,
) -> Result<AttrSpec> {
    attr(Encoding::Marker, columns, markers, options)
}

/// Assign line dash patterns to groups of data
pub fn dash(
    columns: Option<ColumnSpec>,
    dashes: Option<Vec<String>>,
    options: AttrOptions,
) -> Result<AttrSpec> {
    attr(Encoding::Dash, columns, dashes, options)
}

/// Categorical labels for nested grouping; `cats` overrides the derived values
pub fn cat(
    columns: Option<ColumnSpec>,
    cats: Option<Vec<String>>,
    options: AttrOptions,
) -> Result<AttrSpec> {
    attr(Encoding::Cat, columns, cats, options)
}
