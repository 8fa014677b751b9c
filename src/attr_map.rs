// Attribute map construction

use crate::error::{AttrError, Result};
use crate::scalar::{AttrValue, GroupKey};
use crate::source::ValueSource;
use indexmap::IndexMap;

/// Finalized assignment of encoding values to group keys, in assignment order
pub type AttrMap = IndexMap<GroupKey, AttrValue>;

/// Pair each key, in order, with the next value from `source`.
///
/// The source is reset first so the result only depends on the key order and
/// the source's values. A cyclic source repeats values once it runs past the
/// end of its pool.
pub fn build_attr_map(keys: &[GroupKey], source: &mut dyn ValueSource) -> Result<AttrMap> {
    source.reset();

    let mut map = AttrMap::with_capacity(keys.len());
    for key in keys {
        let value = source.next_value().ok_or_else(|| AttrError::InternalConsistency {
            key: key.to_string(),
            detail: "value source exhausted before every group was assigned".to_string(),
        })?;
        map.insert(key.clone(), value);
    }

    // Duplicate keys collapse entries
    if map.len() != keys.len() {
        return Err(AttrError::InternalConsistency {
            key: keys.first().map(|k| k.to_string()).unwrap_or_default(),
            detail: format!("{} group keys produced only {} map entries", keys.len(), map.len()),
        });
    }

    Ok(map)
}
