// Library exports for gramattr

pub mod csv_reader;
pub mod data;
pub mod error;
pub mod palette;
pub mod parser;
pub mod runtime;
pub mod scalar;

// Attribute engine
pub mod attr_map;
pub mod builders;
pub mod groups;
pub mod source;
pub mod spec;
pub mod variants;

pub use builders::{cat, color, dash, marker, AttrOptions};
pub use data::{Dataset, Table};
pub use error::{AttrError, Result};
pub use scalar::{AttrValue, GroupKey, Scalar};
pub use spec::{AttrSpec, ColumnSpec, SpecState};
pub use variants::Encoding;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[serde(rename = "json")]
    #[default]
    Json,
    #[serde(rename = "table")]
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default, clap::ValueEnum)]
pub enum InputFormat {
    #[serde(rename = "csv")]
    #[default]
    Csv,
    #[serde(rename = "json")]
    Json,
}
