use thiserror::Error;

use crate::registry::CollectionId;

/// Rejections produced by the relation engine.
///
/// Every variant means the poset was left exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RelationError {
  #[error("element {index} is outside the universe of {size} elements")]
  OutOfRange { index: usize, size: usize },

  #[error("relation ({left}, {right}) is already present")]
  AlreadyPresent { left: usize, right: usize },

  /// Closing the relation over the new pair would relate two distinct
  /// elements both ways.
  #[error("relation ({left}, {right}) would close a cycle")]
  Cycle { left: usize, right: usize },

  #[error("reflexive relation ({element}, {element}) cannot be removed")]
  Reflexive { element: usize },

  #[error("relation ({left}, {right}) is absent")]
  Absent { left: usize, right: usize },

  /// The pair is implied by `left <= via <= right`.
  #[error("relation ({left}, {right}) is implied through {via}")]
  Derived { left: usize, right: usize, via: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
  #[error("invalid poset name {0:?}, expected [A-Za-z0-9_]+")]
  InvalidName(String),

  #[error("collection {0} not found")]
  CollectionNotFound(CollectionId),

  #[error("poset {name:?} not found in collection {collection}")]
  PosetNotFound { collection: CollectionId, name: String },

  #[error("poset {name:?} already exists in collection {collection}")]
  DuplicatePoset { collection: CollectionId, name: String },

  #[error("collection identifiers exhausted at {limit}")]
  IdsExhausted { limit: u64 },

  #[error(transparent)]
  Relation(#[from] RelationError),
}
