//! Named collections of partially ordered sets over a small fixed universe.
//!
//! [`posets`] holds the relation engine, [`registry`] the collections that
//! name posets, and [`shell`] a line-oriented front end over both.

pub mod error;
pub mod posets;
pub mod registry;
pub mod shell;
pub mod validate;

pub use error::{RegistryError, RelationError};
pub use posets::{BitVectorRelation, MatrixRelation, Poset, Relation, UNIVERSE_SIZE};
pub use registry::{Collection, CollectionId, IdAllocator, Registry};
pub use shell::{Command, Shell};
pub use validate::{Element, PosetName};
