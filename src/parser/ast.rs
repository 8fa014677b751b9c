// Abstract Syntax Tree for the attribute DSL

use crate::builders::AttrOptions;
use crate::spec::ColumnSpec;
use crate::variants::Encoding;

/// One builder call, e.g. `color(region, palette: ["red", "blue"])`
#[derive(Debug, Clone, PartialEq)]
pub struct AttrCall {
    pub encoding: Encoding,
    pub columns: Option<ColumnSpec>,
    /// Value of the encoding's override keyword (palette, markers, dashes, cats)
    pub pool: Option<PoolArg>,
    pub options: AttrOptions,
}

/// Pool override as written in the DSL
#[derive(Debug, Clone, PartialEq)]
pub enum PoolArg {
    /// Literal values
    Values(Vec<String>),
    /// A registered palette name (color only)
    Named(String),
}

impl AttrCall {
    pub fn new(encoding: Encoding) -> Self {
        Self {
            encoding,
            columns: None,
            pool: None,
            options: AttrOptions::default(),
        }
    }
}
