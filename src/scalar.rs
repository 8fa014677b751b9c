// Cell values, group keys and assigned encoding values

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single cell value taken from a dataset column.
///
/// Ordering is total: `Null < Bool < Number < Text`. Numbers are normalised
/// (`-0.0` becomes `0.0`, every NaN collapses to one NaN) so that equality,
/// hashing and ordering all agree.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Infer a typed value from a raw text cell (CSV input)
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Scalar::Null;
        }
        match trimmed {
            "true" => return Scalar::Bool(true),
            "false" => return Scalar::Bool(false),
            _ => {}
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() && (!is_integer_literal(trimmed) || fits_exactly(n)) => {
                Scalar::number(n)
            }
            _ => Scalar::Text(trimmed.to_string()),
        }
    }

    pub fn number(n: f64) -> Self {
        Scalar::Number(normalize(n))
    }

    pub fn text(s: impl Into<String>) -> Self {
        Scalar::Text(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    fn rank(&self) -> u8 {
        match self {
            Scalar::Null => 0,
            Scalar::Bool(_) => 1,
            Scalar::Number(_) => 2,
            Scalar::Text(_) => 3,
        }
    }
}

/// Integers from 2^53 up no longer map one-to-one onto `f64`
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Whether an integral value survives the trip through `f64` unmerged
pub(crate) fn fits_exactly(n: f64) -> bool {
    n.abs() < EXACT_INTEGER_LIMIT
}

fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn normalize(n: f64) -> f64 {
    if n.is_nan() {
        f64::NAN
    } else if n == 0.0 {
        0.0
    } else {
        n
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scalar {}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scalar {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => Ordering::Equal,
            (Scalar::Bool(a), Scalar::Bool(b)) => a.cmp(b),
            (Scalar::Number(a), Scalar::Number(b)) => normalize(*a).total_cmp(&normalize(*b)),
            (Scalar::Text(a), Scalar::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl Hash for Scalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Scalar::Null => {}
            Scalar::Bool(b) => b.hash(state),
            Scalar::Number(n) => normalize(*n).to_bits().hash(state),
            Scalar::Text(s) => s.hash(state),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::number(n)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::number(n as f64)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

/// One distinct combination of grouping-column values.
///
/// Keys are compared lexicographically, which is the order used when a
/// specification sorts its groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct GroupKey(pub Vec<Scalar>);

impl GroupKey {
    pub fn new(values: Vec<Scalar>) -> Self {
        GroupKey(values)
    }

    pub fn values(&self) -> &[Scalar] {
        &self.0
    }

    pub fn arity(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let [single] = self.0.as_slice() {
            return write!(f, "{}", single);
        }
        write!(f, "(")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, ")")
    }
}

// Single values are promoted to 1-tuples
impl From<Scalar> for GroupKey {
    fn from(value: Scalar) -> Self {
        GroupKey(vec![value])
    }
}

impl From<&str> for GroupKey {
    fn from(s: &str) -> Self {
        GroupKey(vec![Scalar::from(s)])
    }
}

impl From<String> for GroupKey {
    fn from(s: String) -> Self {
        GroupKey(vec![Scalar::Text(s)])
    }
}

impl From<f64> for GroupKey {
    fn from(n: f64) -> Self {
        GroupKey(vec![Scalar::number(n)])
    }
}

impl From<Vec<Scalar>> for GroupKey {
    fn from(values: Vec<Scalar>) -> Self {
        GroupKey(values)
    }
}

impl From<Vec<&str>> for GroupKey {
    fn from(values: Vec<&str>) -> Self {
        GroupKey(values.into_iter().map(Scalar::from).collect())
    }
}

/// A value assigned to a group: a named encoding (color, marker, dash) or,
/// for categorical attributes, the group identity itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Name(String),
    Key(GroupKey),
}

impl AttrValue {
    pub fn as_name(&self) -> Option<&str> {
        match self {
            AttrValue::Name(s) => Some(s),
            AttrValue::Key(_) => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Name(s) => write!(f, "{}", s),
            AttrValue::Key(k) => write!(f, "{}", k),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Name(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Name(s)
    }
}

impl From<GroupKey> for AttrValue {
    fn from(key: GroupKey) -> Self {
        AttrValue::Key(key)
    }
}
