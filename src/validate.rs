//! Input checks shared by every operation: element indices and poset names
//! are validated here once, before any engine or registry logic runs.

use std::borrow::Borrow;
use std::fmt;

use crate::error::{RegistryError, RelationError};
use crate::posets::UNIVERSE_SIZE;

/// An element index known to be inside the universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Element(usize);

impl Element {
  pub fn new(index: usize) -> Result<Self, RelationError> {
    if index < UNIVERSE_SIZE {
      Ok(Self(index))
    } else {
      Err(RelationError::OutOfRange { index, size: UNIVERSE_SIZE })
    }
  }

  pub fn index(self) -> usize {
    self.0
  }
}

/// A non-empty name made of `[A-Za-z0-9_]`.
///
/// Names order by their bytes, which is the enumeration order of a
/// collection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PosetName(String);

impl PosetName {
  pub fn new(name: &str) -> Result<Self, RegistryError> {
    if is_valid_name(name) {
      Ok(Self(name.to_owned()))
    } else {
      Err(RegistryError::InvalidName(name.to_owned()))
    }
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

fn is_valid_name(name: &str) -> bool {
  !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

impl fmt::Display for PosetName {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// Lets collections be searched with a plain `&str`.
impl Borrow<str> for PosetName {
  fn borrow(&self) -> &str {
    &self.0
  }
}
