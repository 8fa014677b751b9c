// Value sources: the sequence of encoding values handed out to groups

use crate::scalar::{AttrValue, GroupKey};

/// A restartable sequence of encoding values
pub trait ValueSource {
    /// Next value, or None once the source is exhausted
    fn next_value(&mut self) -> Option<AttrValue>;

    /// Restart from the first value
    fn reset(&mut self);
}

/// Repeats a finite pool forever in its given order
#[derive(Debug, Clone)]
pub struct Cycle {
    pool: Vec<AttrValue>,
    position: usize,
}

impl Cycle {
    pub fn new(pool: Vec<AttrValue>) -> Self {
        Self { pool, position: 0 }
    }
}

impl ValueSource for Cycle {
    fn next_value(&mut self) -> Option<AttrValue> {
        if self.pool.is_empty() {
            return None;
        }
        let value = self.pool[self.position % self.pool.len()].clone();
        self.position = (self.position + 1) % self.pool.len();
        Some(value)
    }

    fn reset(&mut self) {
        self.position = 0;
    }
}

/// Walks a list of group keys once, yielding each key as its own value
#[derive(Debug, Clone)]
pub struct Walk {
    keys: Vec<GroupKey>,
    position: usize,
}

impl Walk {
    pub fn new(keys: Vec<GroupKey>) -> Self {
        Self { keys, position: 0 }
    }
}

impl ValueSource for Walk {
    fn next_value(&mut self) -> Option<AttrValue> {
        let key = self.keys.get(self.position)?.clone();
        self.position += 1;
        Some(AttrValue::Key(key))
    }

    fn reset(&mut self) {
        self.position = 0;
    }
}

/// How a specification traverses its values when assigning them to groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// Cycle through the value pool
    Cyclic,
    /// Hand each group its own key, no cycling
    IdentityWalk,
}

impl Traversal {
    /// Build a fresh source for this traversal
    pub fn source(&self, pool: &[AttrValue], keys: &[GroupKey]) -> Box<dyn ValueSource> {
        match self {
            Traversal::Cyclic => Box::new(Cycle::new(pool.to_vec())),
            Traversal::IdentityWalk => Box::new(Walk::new(keys.to_vec())),
        }
    }

    /// First value a fresh source would yield
    pub fn first_value(&self, pool: &[AttrValue], keys: &[GroupKey]) -> Option<AttrValue> {
        self.source(pool, keys).next_value()
    }
}
