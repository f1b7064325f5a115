use std::collections::BTreeMap;
use std::ops::Bound;

use crate::posets::{BitVectorRelation, Poset, Relation};
use crate::validate::PosetName;

/// Posets of one collection, keyed and enumerated by name.
#[derive(Debug, Clone)]
pub struct Collection<R = BitVectorRelation> {
  posets: BTreeMap<PosetName, Poset<R>>,
}

impl<R: Relation> Default for Collection<R> {
  fn default() -> Self {
    Self { posets: BTreeMap::new() }
  }
}

impl<R: Relation> Collection<R> {
  pub fn len(&self) -> usize {
    self.posets.len()
  }

  pub fn is_empty(&self) -> bool {
    self.posets.is_empty()
  }

  pub fn get(&self, name: &str) -> Option<&Poset<R>> {
    self.posets.get(name)
  }

  pub fn get_mut(&mut self, name: &str) -> Option<&mut Poset<R>> {
    self.posets.get_mut(name)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.posets.contains_key(name)
  }

  /// Stores `poset` under `name`, returning the previous occupant.
  pub fn insert(&mut self, name: PosetName, poset: Poset<R>) -> Option<Poset<R>> {
    self.posets.insert(name, poset)
  }

  pub fn remove(&mut self, name: &str) -> Option<Poset<R>> {
    self.posets.remove(name)
  }

  pub fn names(&self) -> impl Iterator<Item = &PosetName> + '_ {
    self.posets.keys()
  }

  pub fn first_name(&self) -> Option<&PosetName> {
    self.posets.keys().next()
  }

  /// The name following `name`, or `None` past the last one. Whether `name`
  /// itself is present is the caller's concern.
  pub fn name_after(&self, name: &str) -> Option<&PosetName> {
    self.posets
      .range::<str, _>((Bound::Excluded(name), Bound::Unbounded))
      .next()
      .map(|(name, _)| name)
  }
}
