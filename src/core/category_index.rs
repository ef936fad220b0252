//! Positional lookup over a category slice.
//!
//! Categories are addressed by their position in the input, which doubles as
//! the index of their flow record. Parent references are resolved once, by id
//! first and then by name when exactly one category carries that name.

use std::collections::HashMap;

use crate::domain::Category;

/// Outcome of resolving a category's `parent` reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentLink {
    Root,
    Resolved(usize),
    Unresolved,
}

/// Why an ancestor walk stopped before reaching a root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainBreak {
    /// The category at this position names a parent that does not exist.
    Unresolved(usize),
    /// The walk starting at this position revisits a category.
    Cycle(usize),
}

pub struct CategoryIndex<'a> {
    categories: &'a [Category],
    by_id: HashMap<&'a str, usize>,
    by_name: HashMap<&'a str, Vec<usize>>,
    parents: Vec<ParentLink>,
    child_counts: Vec<usize>,
}

impl<'a> CategoryIndex<'a> {
    pub fn new(categories: &'a [Category]) -> Self {
        let mut by_id = HashMap::with_capacity(categories.len());
        let mut by_name: HashMap<&str, Vec<usize>> = HashMap::with_capacity(categories.len());
        for (position, category) in categories.iter().enumerate() {
            // Later duplicates shadow earlier ones, as in a keyed object.
            by_id.insert(category.id.as_str(), position);
            by_name
                .entry(category.name.as_str())
                .or_default()
                .push(position);
        }

        let mut index = Self {
            categories,
            by_id,
            by_name,
            parents: Vec::with_capacity(categories.len()),
            child_counts: vec![0; categories.len()],
        };
        for category in categories {
            let link = match category.parent_ref() {
                None => ParentLink::Root,
                Some(reference) => index
                    .resolve(reference)
                    .map_or(ParentLink::Unresolved, ParentLink::Resolved),
            };
            if let ParentLink::Resolved(parent) = link {
                index.child_counts[parent] += 1;
            }
            index.parents.push(link);
        }
        index
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, position: usize) -> &'a Category {
        &self.categories[position]
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Resolves a parent reference: id match first, then a unique name.
    pub fn resolve(&self, reference: &str) -> Option<usize> {
        if let Some(position) = self.position(reference) {
            return Some(position);
        }
        match self.by_name.get(reference).map(Vec::as_slice) {
            Some([only]) => Some(*only),
            _ => None,
        }
    }

    pub fn parent_of(&self, position: usize) -> ParentLink {
        self.parents[position]
    }

    /// A leaf is never the resolved parent of another category.
    pub fn is_leaf(&self, position: usize) -> bool {
        self.child_counts[position] == 0
    }

    pub fn root_count(&self) -> usize {
        self.parents
            .iter()
            .filter(|link| matches!(link, ParentLink::Root))
            .count()
    }

    /// Names carried by more than one category, in order of first appearance.
    pub fn duplicate_names(&self) -> Vec<(&'a str, usize)> {
        let mut duplicates = Vec::new();
        for (position, category) in self.categories.iter().enumerate() {
            let Some(positions) = self.by_name.get(category.name.as_str()) else {
                continue;
            };
            if positions.len() > 1 && positions[0] == position {
                duplicates.push((category.name.as_str(), positions.len()));
            }
        }
        duplicates
    }

    /// Iterates over the ancestors of `position`, nearest first.
    pub fn ancestors(&self, position: usize) -> Ancestors<'_, 'a> {
        Ancestors {
            index: self,
            start: position,
            current: position,
            steps: 0,
            done: false,
        }
    }
}

/// Walks parent links towards the root. Yields `Err` once and stops when the
/// chain is broken or longer than the number of categories.
pub struct Ancestors<'i, 'a> {
    index: &'i CategoryIndex<'a>,
    start: usize,
    current: usize,
    steps: usize,
    done: bool,
}

impl Iterator for Ancestors<'_, '_> {
    type Item = Result<usize, ChainBreak>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.index.parent_of(self.current) {
            ParentLink::Root => {
                self.done = true;
                None
            }
            ParentLink::Unresolved => {
                self.done = true;
                Some(Err(ChainBreak::Unresolved(self.current)))
            }
            ParentLink::Resolved(parent) => {
                self.steps += 1;
                if self.steps > self.index.len() {
                    self.done = true;
                    return Some(Err(ChainBreak::Cycle(self.start)));
                }
                self.current = parent;
                Some(Ok(parent))
            }
        }
    }
}
