// Group extraction: distinct group keys of a dataset

use crate::data::Dataset;
use crate::error::{AttrError, Result};
use crate::scalar::GroupKey;

/// Produce the ordered list of distinct group keys for `columns`.
///
/// An explicit key list is returned verbatim without scanning the dataset, so
/// callers can force a specific assignment order; every explicit key must have
/// one value per grouping column. Otherwise rows are projected
/// onto `columns`, optionally sorted (stable), and deduplicated keeping the
/// first occurrence.
pub fn extract_groups(
    data: &dyn Dataset,
    columns: &[String],
    explicit: Option<&[GroupKey]>,
    sort: bool,
    ascending: bool,
) -> Result<Vec<GroupKey>> {
    if let Some(items) = explicit {
        if !items.is_empty() {
            if let Some(bad) = items.iter().find(|k| k.arity() != columns.len()) {
                return Err(AttrError::ItemArity {
                    key: bad.to_string(),
                    expected: columns.len(),
                    found: bad.arity(),
                });
            }
            return Ok(items.to_vec());
        }
    }

    let mut rows = data.project(columns)?;
    if sort {
        data.sort_rows(&mut rows, ascending);
    }
    Ok(data.distinct(rows))
}
