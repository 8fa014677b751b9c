// Attribute specification: lazily maps group keys to encoding values

use crate::attr_map::{build_attr_map, AttrMap};
use crate::data::Dataset;
use crate::error::{AttrError, Result};
use crate::groups::extract_groups;
use crate::scalar::{AttrValue, GroupKey};
use crate::source::Traversal;
use crate::variants::{Encoding, VariantConfig};
use serde::Deserialize;
use std::rc::Rc;
use tracing::{debug, warn};

/// One grouping column or an ordered list of them
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ColumnSpec {
    One(String),
    Many(Vec<String>),
}

impl ColumnSpec {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            ColumnSpec::One(c) => vec![c],
            ColumnSpec::Many(cs) => cs,
        }
    }
}

impl From<&str> for ColumnSpec {
    fn from(c: &str) -> Self {
        ColumnSpec::One(c.to_string())
    }
}

impl From<String> for ColumnSpec {
    fn from(c: String) -> Self {
        ColumnSpec::One(c)
    }
}

impl From<Vec<String>> for ColumnSpec {
    fn from(cs: Vec<String>) -> Self {
        ColumnSpec::Many(cs)
    }
}

impl From<Vec<&str>> for ColumnSpec {
    fn from(cs: Vec<&str>) -> Self {
        ColumnSpec::Many(cs.into_iter().map(String::from).collect())
    }
}

/// Lifecycle of a specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecState {
    /// Grouping columns or dataset not bound; lookups yield the default
    Unconfigured,
    /// Both bound, map not built (or invalidated)
    Configured,
    /// Attribute map built and current
    Mapped,
}

/// Assigns a value from a finite pool to each distinct group of a dataset.
///
/// The map is built lazily: [`AttrSpec::lookup`] rebuilds it when the
/// specification is configured but not yet mapped, or when the requested key
/// is not in the current map. Lookups may therefore mutate the specification;
/// share it across threads only once it is [`SpecState::Mapped`] and no
/// further configuration happens.
#[derive(Debug)]
pub struct AttrSpec {
    name: String,
    traversal: Traversal,
    columns: Option<Vec<String>>,
    data: Option<Rc<dyn Dataset>>,
    default: Option<AttrValue>,
    pool: Vec<AttrValue>,
    explicit_items: Option<Vec<GroupKey>>,
    sort: bool,
    ascending: bool,
    items: Vec<GroupKey>,
    attr_map: AttrMap,
    state: SpecState,
}

impl AttrSpec {
    /// Create an unconfigured specification for one of the encoding presets
    pub fn new(encoding: Encoding) -> Self {
        Self::from_config(encoding.config())
    }

    pub fn from_config(config: VariantConfig) -> Self {
        let mut spec = Self {
            name: config.name.to_string(),
            traversal: config.traversal,
            columns: None,
            data: None,
            default: None,
            pool: config.default_pool,
            explicit_items: None,
            sort: true,
            ascending: true,
            items: Vec::new(),
            attr_map: AttrMap::new(),
            state: SpecState::Unconfigured,
        };
        spec.refresh_default();
        spec
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> SpecState {
        self.state
    }

    pub fn traversal(&self) -> Traversal {
        self.traversal
    }

    pub fn columns(&self) -> Option<&[String]> {
        self.columns.as_deref()
    }

    pub fn pool(&self) -> &[AttrValue] {
        &self.pool
    }

    /// Value returned for lookups that cannot be mapped
    pub fn default_value(&self) -> Option<&AttrValue> {
        self.default.as_ref()
    }

    /// Group keys in assignment order: explicit items if given, otherwise the
    /// keys derived by the last rebuild
    pub fn items(&self) -> &[GroupKey] {
        match &self.explicit_items {
            Some(items) if !items.is_empty() => items,
            _ => &self.items,
        }
    }

    /// Current map; empty unless the state is [`SpecState::Mapped`]
    pub fn attr_map(&self) -> &AttrMap {
        &self.attr_map
    }

    pub fn sort(&self) -> (bool, bool) {
        (self.sort, self.ascending)
    }

    pub fn set_sort(&mut self, sort: bool, ascending: bool) {
        if (self.sort, self.ascending) != (sort, ascending) {
            self.sort = sort;
            self.ascending = ascending;
            self.invalidate();
        }
    }

    pub fn set_default(&mut self, value: Option<AttrValue>) {
        self.default = value;
    }

    /// Replace the value pool.
    ///
    /// For categorical (identity-walk) specifications the pool is the group
    /// list itself, so the values become the explicit items. The default is
    /// recomputed from the new values.
    pub fn set_pool(&mut self, values: Vec<AttrValue>) -> Result<()> {
        if values.is_empty() {
            return Err(AttrError::EmptyPool {
                attribute: self.name.clone(),
            });
        }
        match self.traversal {
            Traversal::Cyclic => self.pool = values,
            Traversal::IdentityWalk => {
                self.explicit_items = Some(
                    values
                        .into_iter()
                        .map(|v| match v {
                            AttrValue::Key(k) => k,
                            AttrValue::Name(n) => GroupKey::from(n),
                        })
                        .collect(),
                )
            }
        }
        self.refresh_default();
        self.invalidate();
        Ok(())
    }

    /// Force the group keys (and their assignment order) instead of deriving
    /// them from the dataset. An empty list restores derivation.
    pub fn set_items(&mut self, items: Vec<GroupKey>) {
        self.explicit_items = if items.is_empty() { None } else { Some(items) };
        if self.traversal == Traversal::IdentityWalk {
            self.refresh_default();
        }
        self.invalidate();
    }

    /// Bind grouping columns. Fails if a dataset is bound and does not contain
    /// every column; the specification is left unchanged in that case.
    pub fn set_columns(&mut self, columns: impl Into<ColumnSpec>) -> Result<()> {
        let columns = columns.into().into_vec();
        self.validate_columns(&columns, self.data.as_deref())?;
        if self.columns.as_ref() != Some(&columns) {
            self.columns = Some(columns);
            self.invalidate();
        }
        Ok(())
    }

    /// Bind a dataset and/or grouping columns.
    ///
    /// Any change returns the specification to `Configured` (or
    /// `Unconfigured` if one of the two is still missing); the map is rebuilt
    /// on the next lookup.
    pub fn configure(
        &mut self,
        data: Option<Rc<dyn Dataset>>,
        columns: Option<ColumnSpec>,
    ) -> Result<()> {
        let columns = columns.map(ColumnSpec::into_vec);
        if let Some(cols) = &columns {
            let target = data.as_deref().or(self.data.as_deref());
            self.validate_columns(cols, target)?;
        }

        if let Some(data) = data {
            self.data = Some(data);
            self.invalidate();
        }
        if let Some(cols) = columns {
            if self.columns.as_ref() != Some(&cols) {
                self.columns = Some(cols);
                self.invalidate();
            }
        }
        Ok(())
    }

    /// Bind a dataset and treat `values` as grouping columns when every value
    /// names a column of the dataset, otherwise as a literal replacement pool.
    ///
    /// Without a bound dataset the values are taken as columns.
    pub fn configure_columns_or_pool(
        &mut self,
        data: Option<Rc<dyn Dataset>>,
        values: Vec<String>,
    ) -> Result<()> {
        if values.is_empty() {
            return Err(AttrError::InvalidColumns {
                columns: values,
                available: self.available_columns(data.as_deref()),
            });
        }
        if let Some(data) = data {
            self.data = Some(data);
            self.invalidate();
        }

        let all_columns = match self.data.as_deref() {
            Some(d) => values.iter().all(|v| d.has_column(v)),
            None => true,
        };
        if all_columns {
            self.set_columns(values)
        } else {
            debug!(attribute = %self.name, ?values, "values are not columns, using them as the pool");
            self.set_pool(values.into_iter().map(AttrValue::Name).collect())
        }
    }

    /// Derive the group keys and rebuild the whole attribute map.
    ///
    /// A no-op while unconfigured.
    pub fn rebuild(&mut self) -> Result<()> {
        let (columns, data) = match (&self.columns, &self.data) {
            (Some(c), Some(d)) => (c, d),
            _ => return Ok(()),
        };

        if self.traversal == Traversal::Cyclic && self.pool.is_empty() {
            return Err(AttrError::EmptyPool {
                attribute: self.name.clone(),
            });
        }

        let keys = extract_groups(
            &**data,
            columns,
            self.explicit_items.as_deref(),
            self.sort,
            self.ascending,
        )?;

        let mut source = self.traversal.source(&self.pool, &keys);
        let map = build_attr_map(&keys, source.as_mut())?;

        if let Some(missing) = keys.iter().find(|k| !map.contains_key(*k)) {
            return Err(AttrError::InternalConsistency {
                key: missing.to_string(),
                detail: "derived group has no assigned value".to_string(),
            });
        }

        if self.traversal == Traversal::Cyclic && keys.len() > self.pool.len() {
            warn!(
                attribute = %self.name,
                groups = keys.len(),
                pool = self.pool.len(),
                "more groups than values, assigned values will repeat"
            );
        }
        debug!(attribute = %self.name, groups = keys.len(), "rebuilt attribute map");

        self.items = keys;
        self.attr_map = map;
        self.state = SpecState::Mapped;
        Ok(())
    }

    /// Look up the value for a group.
    ///
    /// Returns the default when unconfigured or when `key` is `None`.
    /// Otherwise rebuilds the map if it is stale or lacks the key; a key that
    /// is still missing after a rebuild is an `InternalConsistency` error.
    pub fn lookup(&mut self, key: Option<&GroupKey>) -> Result<Option<AttrValue>> {
        let key = match key {
            Some(k) if self.state != SpecState::Unconfigured => k,
            _ => return Ok(self.default.clone()),
        };

        if self.state != SpecState::Mapped || !self.attr_map.contains_key(key) {
            self.rebuild()?;
        }

        match self.attr_map.get(key) {
            Some(value) => Ok(Some(value.clone())),
            None => Err(AttrError::InternalConsistency {
                key: key.to_string(),
                detail: format!("not among the {} groups of attribute '{}'", self.attr_map.len(), self.name),
            }),
        }
    }

    /// Convenience form of [`AttrSpec::lookup`]; single values become 1-tuples
    pub fn lookup_value(&mut self, key: impl Into<GroupKey>) -> Result<Option<AttrValue>> {
        let key = key.into();
        self.lookup(Some(&key))
    }

    /// Positions of this specification's grouping columns within `columns`.
    ///
    /// Used for nested categorical grouping; empty when no columns are bound.
    pub fn levels(&self, columns: &[String]) -> Result<Vec<usize>> {
        let own = match &self.columns {
            Some(c) => c,
            None => return Ok(Vec::new()),
        };
        let mut levels = Vec::with_capacity(own.len());
        for col in own {
            match columns.iter().position(|c| c == col) {
                Some(idx) => levels.push(idx),
                None => {
                    return Err(AttrError::InvalidColumns {
                        columns: vec![col.clone()],
                        available: columns.to_vec(),
                    })
                }
            }
        }
        Ok(levels)
    }

    fn validate_columns(&self, columns: &[String], data: Option<&dyn Dataset>) -> Result<()> {
        let missing: Vec<String> = match data {
            Some(d) => columns.iter().filter(|c| !d.has_column(c)).cloned().collect(),
            None => Vec::new(),
        };
        if columns.is_empty() || !missing.is_empty() {
            return Err(AttrError::InvalidColumns {
                columns: if missing.is_empty() { columns.to_vec() } else { missing },
                available: self.available_columns(data),
            });
        }
        Ok(())
    }

    fn available_columns(&self, data: Option<&dyn Dataset>) -> Vec<String> {
        data.or(self.data.as_deref())
            .map(|d| d.column_names())
            .unwrap_or_default()
    }

    fn refresh_default(&mut self) {
        let items = self.explicit_items.as_deref().unwrap_or(&[]);
        self.default = self.traversal.first_value(&self.pool, items);
    }

    fn invalidate(&mut self) {
        self.items.clear();
        self.attr_map.clear();
        self.state = if self.columns.is_some() && self.data.is_some() {
            SpecState::Configured
        } else {
            SpecState::Unconfigured
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Table;
    use crate::scalar::Scalar;

    fn make_table() -> Rc<dyn Dataset> {
        Rc::new(Table::new(
            vec!["letter".to_string(), "num".to_string()],
            vec![
                vec![Scalar::text("a"), Scalar::number(1.0)],
                vec![Scalar::text("b"), Scalar::number(2.0)],
                vec![Scalar::text("a"), Scalar::number(1.0)],
                vec![Scalar::text("c"), Scalar::number(3.0)],
            ],
        ))
    }

    fn color_spec(pool: &[&str]) -> AttrSpec {
        let mut spec = AttrSpec::new(Encoding::Color);
        spec.set_pool(pool.iter().map(|p| AttrValue::from(*p)).collect()).unwrap();
        spec
    }

    #[test]
    fn test_state_transitions() {
        let mut spec = color_spec(&["red", "blue"]);
        assert_eq!(spec.state(), SpecState::Unconfigured);

        spec.configure(Some(make_table()), None).unwrap();
        assert_eq!(spec.state(), SpecState::Unconfigured);

        spec.configure(None, Some("letter".into())).unwrap();
        assert_eq!(spec.state(), SpecState::Configured);

        spec.lookup_value("a").unwrap();
        assert_eq!(spec.state(), SpecState::Mapped);

        spec.configure(None, Some("num".into())).unwrap();
        assert_eq!(spec.state(), SpecState::Configured);
        assert!(spec.attr_map().is_empty());
    }

    #[test]
    fn test_cycling_assignment() {
        let mut spec = color_spec(&["red", "blue"]);
        spec.configure(Some(make_table()), Some("letter".into())).unwrap();
        assert_eq!(spec.lookup_value("a").unwrap(), Some(AttrValue::from("red")));
        assert_eq!(spec.lookup_value("b").unwrap(), Some(AttrValue::from("blue")));
        assert_eq!(spec.lookup_value("c").unwrap(), Some(AttrValue::from("red")));
    }

    #[test]
    fn test_default_when_unconfigured() {
        let mut spec = color_spec(&["red", "blue"]);
        assert_eq!(spec.lookup_value("anything").unwrap(), Some(AttrValue::from("red")));
    }

    #[test]
    fn test_default_for_null_key() {
        let mut spec = color_spec(&["red", "blue"]);
        spec.configure(Some(make_table()), Some("letter".into())).unwrap();
        assert_eq!(spec.lookup(None).unwrap(), Some(AttrValue::from("red")));
        assert_eq!(spec.state(), SpecState::Configured);
    }

    #[test]
    fn test_explicit_default_kept() {
        let mut spec = AttrSpec::new(Encoding::Color);
        spec.set_default(Some(AttrValue::from("black")));
        assert_eq!(spec.lookup_value("x").unwrap(), Some(AttrValue::from("black")));
    }

    #[test]
    fn test_unknown_key_after_rebuild_fails() {
        let mut spec = color_spec(&["red"]);
        spec.configure(Some(make_table()), Some("letter".into())).unwrap();
        let err = spec.lookup_value("zzz").unwrap_err();
        assert!(matches!(err, AttrError::InternalConsistency { ref key, .. } if key == "zzz"));
    }

    #[test]
    fn test_configure_rejects_unknown_columns() {
        let mut spec = color_spec(&["red"]);
        let err = spec
            .configure(Some(make_table()), Some("missing".into()))
            .unwrap_err();
        assert!(matches!(err, AttrError::InvalidColumns { .. }));
        assert_eq!(spec.state(), SpecState::Unconfigured);
        assert!(spec.columns().is_none());
    }

    #[test]
    fn test_configure_rejects_empty_columns() {
        let mut spec = color_spec(&["red"]);
        let err = spec
            .configure(Some(make_table()), Some(ColumnSpec::Many(vec![])))
            .unwrap_err();
        assert!(matches!(err, AttrError::InvalidColumns { .. }));
    }

    #[test]
    fn test_columns_or_pool_uses_columns() {
        let mut spec = color_spec(&["red", "blue"]);
        spec.configure_columns_or_pool(Some(make_table()), vec!["letter".to_string()])
            .unwrap();
        assert_eq!(spec.columns(), Some(&["letter".to_string()][..]));
        assert_eq!(spec.state(), SpecState::Configured);
    }

    #[test]
    fn test_columns_or_pool_falls_back_to_pool() {
        let mut spec = color_spec(&["red", "blue"]);
        spec.configure_columns_or_pool(
            Some(make_table()),
            vec!["green".to_string(), "orange".to_string()],
        )
        .unwrap();
        assert!(spec.columns().is_none());
        assert_eq!(spec.default_value(), Some(&AttrValue::from("green")));
        assert_eq!(spec.pool().len(), 2);
    }

    #[test]
    fn test_columns_or_pool_rejects_empty() {
        let mut spec = color_spec(&["red"]);
        let err = spec.configure_columns_or_pool(Some(make_table()), vec![]).unwrap_err();
        assert!(matches!(err, AttrError::InvalidColumns { .. }));
    }

    #[test]
    fn test_empty_pool_rejected() {
        let mut spec = AttrSpec::new(Encoding::Marker);
        let err = spec.set_pool(vec![]).unwrap_err();
        assert_eq!(
            err,
            AttrError::EmptyPool {
                attribute: "marker".to_string()
            }
        );
    }

    #[test]
    fn test_rebuild_with_empty_pool_config() {
        let mut spec = AttrSpec::from_config(VariantConfig {
            name: "size",
            default_pool: vec![],
            traversal: Traversal::Cyclic,
            override_keyword: "sizes",
        });
        spec.configure(Some(make_table()), Some("letter".into())).unwrap();
        assert!(matches!(spec.rebuild(), Err(AttrError::EmptyPool { .. })));
        assert!(matches!(spec.lookup_value("a"), Err(AttrError::EmptyPool { .. })));
    }

    #[test]
    fn test_explicit_items_force_order() {
        let mut spec = color_spec(&["red", "blue", "green"]);
        spec.set_items(vec![GroupKey::from("c"), GroupKey::from("b"), GroupKey::from("a")]);
        spec.configure(Some(make_table()), Some("letter".into())).unwrap();
        assert_eq!(spec.lookup_value("c").unwrap(), Some(AttrValue::from("red")));
        assert_eq!(spec.lookup_value("a").unwrap(), Some(AttrValue::from("green")));
    }

    #[test]
    fn test_sort_descending() {
        let mut spec = color_spec(&["red", "blue", "green"]);
        spec.set_sort(true, false);
        spec.configure(Some(make_table()), Some("letter".into())).unwrap();
        assert_eq!(spec.lookup_value("c").unwrap(), Some(AttrValue::from("red")));
        assert_eq!(spec.lookup_value("a").unwrap(), Some(AttrValue::from("green")));
    }

    #[test]
    fn test_repeated_lookups_do_not_change_map() {
        let mut spec = color_spec(&["red", "blue"]);
        spec.configure(Some(make_table()), Some("letter".into())).unwrap();
        spec.lookup_value("a").unwrap();
        let before = spec.attr_map().clone();
        for key in ["a", "b", "c", "a"] {
            spec.lookup_value(key).unwrap();
        }
        assert_eq!(spec.attr_map(), &before);
    }

    #[test]
    fn test_multi_column_lookup() {
        let mut spec = color_spec(&["red", "blue"]);
        spec.configure(Some(make_table()), Some(vec!["letter", "num"].into()))
            .unwrap();
        let key = GroupKey::new(vec![Scalar::text("b"), Scalar::number(2.0)]);
        assert_eq!(spec.lookup(Some(&key)).unwrap(), Some(AttrValue::from("blue")));
    }

    #[test]
    fn test_categorical_walk() {
        let mut spec = AttrSpec::new(Encoding::Cat);
        assert_eq!(spec.default_value(), None);
        spec.configure(Some(make_table()), Some("letter".into())).unwrap();
        assert_eq!(
            spec.lookup_value("b").unwrap(),
            Some(AttrValue::Key(GroupKey::from("b")))
        );
        assert_eq!(spec.items().len(), 3);
    }

    #[test]
    fn test_categorical_default_from_cats() {
        let mut spec = AttrSpec::new(Encoding::Cat);
        spec.set_pool(vec!["low".into(), "mid".into(), "high".into()]).unwrap();
        assert_eq!(
            spec.lookup_value("low").unwrap(),
            Some(AttrValue::Key(GroupKey::from("low")))
        );
        assert_eq!(spec.levels(&["region".to_string()]).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn test_categories_must_match_grouping_columns() {
        let mut spec = AttrSpec::new(Encoding::Cat);
        spec.set_pool(vec!["low".into()]).unwrap();
        spec.configure(Some(make_table()), Some(vec!["letter", "num"].into())).unwrap();
        assert_eq!(
            spec.rebuild(),
            Err(AttrError::ItemArity {
                key: "low".to_string(),
                expected: 2,
                found: 1,
            })
        );
        assert_eq!(spec.state(), SpecState::Configured);
        assert!(matches!(
            spec.lookup(Some(&GroupKey::from(vec!["a", "1"]))),
            Err(AttrError::ItemArity { .. })
        ));
    }

    #[test]
    fn test_levels() {
        let mut spec = AttrSpec::new(Encoding::Cat);
        spec.set_columns(vec!["b", "d"]).unwrap();
        let all: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        assert_eq!(spec.levels(&all).unwrap(), vec![1, 3]);
        assert!(spec.levels(&all[..2]).is_err());
    }
}
