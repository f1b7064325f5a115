//! Collections of named posets, addressed by process-unique identifiers.
//!
//! The registry resolves `(collection, name)` pairs and hands every relation
//! operation over to [`Poset`]; it never looks inside a relation itself.

mod collection;
pub use collection::*;

use std::collections::BTreeMap;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use tracing::{debug, info, warn};

use crate::error::RegistryError;
use crate::posets::{BitVectorRelation, Poset, Relation, UNIVERSE_SIZE};
use crate::validate::PosetName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CollectionId(u64);

impl CollectionId {
  pub fn get(self) -> u64 {
    self.0
  }
}

impl fmt::Display for CollectionId {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    self.0.fmt(f)
  }
}

impl FromStr for CollectionId {
  type Err = ParseIntError;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    s.parse().map(Self)
  }
}

/// Hands out identifiers `0, 1, 2, ...` below `limit`, never twice.
#[derive(Debug, Clone)]
pub struct IdAllocator {
  next: u64,
  limit: u64,
}

impl IdAllocator {
  pub fn new(limit: u64) -> Self {
    Self { next: 0, limit }
  }

  pub fn allocate(&mut self) -> Result<CollectionId, RegistryError> {
    if self.next == self.limit {
      return Err(RegistryError::IdsExhausted { limit: self.limit });
    }
    let id = CollectionId(self.next);
    self.next += 1;
    Ok(id)
  }
}

impl Default for IdAllocator {
  fn default() -> Self {
    Self::new(u64::MAX)
  }
}

/// Owns every collection. Not synchronized: callers sharing one across
/// threads wrap it in a single lock.
#[derive(Debug)]
pub struct Registry<R = BitVectorRelation> {
  collections: BTreeMap<CollectionId, Collection<R>>,
  ids: IdAllocator,
}

impl<R: Relation> Default for Registry<R> {
  fn default() -> Self {
    Self::with_id_limit(u64::MAX)
  }
}

impl<R: Relation> Registry<R> {
  pub fn new() -> Self {
    Self::default()
  }

  /// A registry whose identifiers stay below `limit`.
  pub fn with_id_limit(limit: u64) -> Self {
    Self {
      collections: BTreeMap::new(),
      ids: IdAllocator::new(limit),
    }
  }

  pub fn new_collection(&mut self) -> Result<CollectionId, RegistryError> {
    let id = match self.ids.allocate() {
      Ok(id) => id,
      Err(err) => {
        warn!("{err}");
        return Err(err);
      }
    };
    self.collections.insert(id, Collection::default());
    info!(%id, "created collection");
    Ok(id)
  }

  /// Drops the collection with all its posets. Returns whether it existed.
  pub fn delete_collection(&mut self, id: CollectionId) -> bool {
    let removed = self.collections.remove(&id).is_some();
    if removed {
      info!(%id, "deleted collection");
    }
    removed
  }

  pub fn collection(&self, id: CollectionId) -> Result<&Collection<R>, RegistryError> {
    self.collections.get(&id).ok_or(RegistryError::CollectionNotFound(id))
  }

  fn collection_mut(&mut self, id: CollectionId) -> Result<&mut Collection<R>, RegistryError> {
    self.collections.get_mut(&id).ok_or(RegistryError::CollectionNotFound(id))
  }

  pub fn new_poset(&mut self, id: CollectionId, name: &str) -> Result<(), RegistryError> {
    let name = PosetName::new(name)?;
    let collection = self.collection_mut(id)?;
    if collection.contains(name.as_str()) {
      return Err(RegistryError::DuplicatePoset { collection: id, name: name.to_string() });
    }
    debug!(%id, %name, "created poset");
    collection.insert(name, Poset::new());
    Ok(())
  }

  /// Returns whether a poset was removed.
  pub fn delete_poset(&mut self, id: CollectionId, name: &str) -> bool {
    self.collection_mut(id)
      .map(|collection| collection.remove(name).is_some())
      .unwrap_or(false)
  }

  /// Copies `src` into `dst`, overwriting whatever `dst` held.
  pub fn copy_poset(&mut self, id: CollectionId, dst: &str, src: &str) -> Result<(), RegistryError> {
    let dst = PosetName::new(dst)?;
    let collection = self.collection_mut(id)?;
    let poset = collection.get(src)
      .ok_or_else(|| RegistryError::PosetNotFound { collection: id, name: src.to_owned() })?
      .clone();
    if collection.insert(dst.clone(), poset).is_some() {
      debug!(%id, %dst, src, "overwrote poset with copy");
    }
    Ok(())
  }

  /// Resolves a poset for reading.
  pub fn poset(&self, id: CollectionId, name: &str) -> Result<&Poset<R>, RegistryError> {
    self.collection(id)?
      .get(name)
      .ok_or_else(|| RegistryError::PosetNotFound { collection: id, name: name.to_owned() })
  }

  fn poset_mut(&mut self, id: CollectionId, name: &str) -> Result<&mut Poset<R>, RegistryError> {
    self.collection_mut(id)?
      .get_mut(name)
      .ok_or_else(|| RegistryError::PosetNotFound { collection: id, name: name.to_owned() })
  }

  /// Names of a collection in order. The iterator is lazy and can be
  /// restarted by calling this again.
  pub fn names(&self, id: CollectionId) -> Result<impl Iterator<Item = &PosetName> + '_, RegistryError> {
    Ok(self.collection(id)?.names())
  }

  /// `Ok(None)` for an empty collection.
  pub fn first_name(&self, id: CollectionId) -> Result<Option<PosetName>, RegistryError> {
    Ok(self.collection(id)?.first_name().cloned())
  }

  /// The name after `name`: `Ok(None)` once the sequence ends, an error when
  /// `name` is not in the collection (for instance deleted mid-iteration).
  pub fn next_name(&self, id: CollectionId, name: &str) -> Result<Option<PosetName>, RegistryError> {
    let collection = self.collection(id)?;
    if !collection.contains(name) {
      return Err(RegistryError::PosetNotFound { collection: id, name: name.to_owned() });
    }
    Ok(collection.name_after(name).cloned())
  }

  pub fn add_relation(&mut self, id: CollectionId, name: &str, x: usize, y: usize) -> Result<(), RegistryError> {
    Ok(self.poset_mut(id, name)?.add_relation(x, y)?)
  }

  /// `false` whenever the pair is not related, including unknown collections,
  /// unknown names and out-of-range elements.
  pub fn is_relation(&self, id: CollectionId, name: &str, x: usize, y: usize) -> bool {
    self.poset(id, name)
      .map(|poset| poset.has_relation(x, y))
      .unwrap_or(false)
  }

  pub fn remove_relation(&mut self, id: CollectionId, name: &str, x: usize, y: usize) -> Result<(), RegistryError> {
    Ok(self.poset_mut(id, name)?.remove_relation(x, y)?)
  }

  /// Number of live collections.
  pub fn len(&self) -> usize {
    self.collections.len()
  }

  pub fn is_empty(&self) -> bool {
    self.collections.is_empty()
  }

  /// Number of posets in a collection; 0 when it does not exist.
  pub fn collection_len(&self, id: CollectionId) -> usize {
    self.collection(id).map(Collection::len).unwrap_or(0)
  }

  pub fn universe_size(&self) -> usize {
    UNIVERSE_SIZE
  }
}
