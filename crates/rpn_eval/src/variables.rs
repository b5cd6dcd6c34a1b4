//! Named variable bindings.
//!
//! Entries are kept in insertion order with an `FxHashMap` index beside them,
//! so lookup stays O(1) while `iter` still reports variables in the order they
//! were first bound. There is no removal.

use rustc_hash::FxHashMap;

/// What [`VariableTable::set`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetOutcome {
    /// The name was new; the table grew by one.
    Inserted,
    /// The name was already bound; its value was overwritten in place.
    Updated,
}

/// A single binding. `name` is always lowercase.
#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    pub name: String,
    pub value: f64,
}

/// Session-wide variable storage.
#[derive(Clone, Debug, Default)]
pub struct VariableTable {
    entries: Vec<Variable>,
    index: FxHashMap<String, usize>,
}

impl VariableTable {
    /// Create an empty table.
    pub fn new() -> Self {
        VariableTable::default()
    }

    /// Bind `name` (lowercased) to `value`, inserting or overwriting.
    pub fn set(&mut self, name: &str, value: f64) -> SetOutcome {
        let name = name.to_lowercase();
        if let Some(&slot) = self.index.get(&name) {
            if let Some(entry) = self.entries.get_mut(slot) {
                entry.value = value;
                return SetOutcome::Updated;
            }
        }

        self.index.insert(name.clone(), self.entries.len());
        self.entries.push(Variable { name, value });
        SetOutcome::Inserted
    }

    /// Look up an already-normalized name.
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.index
            .get(name)
            .and_then(|&slot| self.entries.get(slot))
    }

    /// Number of distinct names bound.
    #[inline]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bindings in the order their names were first set.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> + '_ {
        self.entries.iter()
    }
}
