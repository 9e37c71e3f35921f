use std::collections::HashMap;
use std::sync::Arc;

use crate::models::ShortcutDefinition;

/// Immutable, ordered snapshot of shortcut definitions.
///
/// Order is priority: when two definitions share a chord, the earlier one
/// wins. Cloning is cheap and the contents never change; hosts replace the
/// whole registry instead.
#[derive(Debug, Clone, Default)]
pub struct ShortcutRegistry {
    definitions: Arc<[ShortcutDefinition]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcutConflict {
    pub winner: usize,
    pub shadowed: usize,
}

impl ShortcutRegistry {
    pub fn new(definitions: Vec<ShortcutDefinition>) -> Self {
        Self {
            definitions: definitions.into(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ShortcutDefinition> {
        self.definitions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShortcutDefinition> {
        self.definitions.iter()
    }

    /// Definitions that can never fire because an earlier one has the same
    /// key and modifier set.
    pub fn find_conflicts(&self) -> Vec<ShortcutConflict> {
        let mut first_seen: HashMap<(String, u8), usize> = HashMap::new();
        let mut conflicts = Vec::new();

        for (index, definition) in self.definitions.iter().enumerate() {
            let winner = *first_seen
                .entry(definition.chord_signature())
                .or_insert(index);

            if winner != index {
                conflicts.push(ShortcutConflict {
                    winner,
                    shadowed: index,
                });
            }
        }

        conflicts
    }

    /// Definitions grouped by category, categories in first-appearance order.
    pub fn grouped(&self) -> Vec<(&str, Vec<&ShortcutDefinition>)> {
        let mut groups: Vec<(&str, Vec<&ShortcutDefinition>)> = Vec::new();

        for definition in self.definitions.iter() {
            match groups
                .iter_mut()
                .find(|(category, _)| *category == definition.category)
            {
                Some((_, members)) => members.push(definition),
                None => groups.push((definition.category.as_str(), vec![definition])),
            }
        }

        groups
    }

    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.definitions, &other.definitions)
    }
}

impl From<Vec<ShortcutDefinition>> for ShortcutRegistry {
    fn from(definitions: Vec<ShortcutDefinition>) -> Self {
        Self::new(definitions)
    }
}

impl<'a> IntoIterator for &'a ShortcutRegistry {
    type Item = &'a ShortcutDefinition;
    type IntoIter = std::slice::Iter<'a, ShortcutDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.definitions.iter()
    }
}
