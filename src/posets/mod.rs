//! The relation engine: posets over a fixed universe of [`UNIVERSE_SIZE`]
//! elements, kept reflexive, antisymmetric and transitively closed after
//! every committed mutation.

mod bitvec;
pub use bitvec::*;
mod raw;
pub use raw::*;

use std::fmt;

use itertools::Itertools;
use rayon::prelude::*;
use tracing::debug;

use crate::error::RelationError;
use crate::validate::Element;

/// Number of elements every poset is defined over.
pub const UNIVERSE_SIZE: usize = 32;

/// Boolean adjacency matrix over the universe. `get(i, j)` means `i <= j`.
///
/// Implementations only store bits; keeping the order laws is the job of
/// [`Poset`]. Indices passed in are always below [`Relation::len`].
pub trait Relation: Clone + Eq + fmt::Debug + Send + Sync {
  /// The identity relation: exactly the pairs `(i, i)`.
  fn reflexive() -> Self;
  fn len(&self) -> usize;
  fn get(&self, left: usize, right: usize) -> bool;
  fn set(&mut self, left: usize, right: usize);
  fn clear(&mut self, left: usize, right: usize);
  /// `row[dst] |= row[src]`
  fn union_row(&mut self, dst: usize, src: usize);

  /// Transitive closure in place: for each pivot `k`, every row that reaches
  /// `k` absorbs row `k`.
  fn close(&mut self) {
    for k in 0..self.len() {
      for i in 0..self.len() {
        if i != k && self.get(i, k) {
          self.union_row(i, k);
        }
      }
    }
  }

  fn is_antisymmetric(&self) -> bool {
    (0..self.len())
      .tuple_combinations()
      .all(|(i, j)| !(self.get(i, j) && self.get(j, i)))
  }
}

/// A partial order over the universe, wrapping exactly one [`Relation`].
///
/// Cloning duplicates the whole matrix; the copy is independent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poset<R = BitVectorRelation> {
  relation: R,
}

impl<R: Relation> Default for Poset<R> {
  fn default() -> Self {
    Self::new()
  }
}

impl<R: Relation> Poset<R> {
  /// An antichain: only the reflexive pairs are related.
  pub fn new() -> Self {
    Self { relation: R::reflexive() }
  }

  /// Builds a poset by adding `pairs` in order. The first rejected pair
  /// aborts construction.
  pub fn from_relations(pairs: impl IntoIterator<Item = (usize, usize)>) -> Result<Self, RelationError> {
    let mut poset = Self::new();
    for (left, right) in pairs {
      match poset.add_relation(left, right) {
        Ok(()) | Err(RelationError::AlreadyPresent { .. }) => {}
        Err(err) => return Err(err),
      }
    }
    Ok(poset)
  }

  pub fn len(&self) -> usize {
    self.relation.len()
  }

  /// Whether `left <= right`.
  ///
  /// Indices outside the universe are reported as unrelated rather than as
  /// an error; callers that need to tell the two apart validate with
  /// [`Element::new`] first.
  pub fn has_relation(&self, left: usize, right: usize) -> bool {
    left < self.len() && right < self.len() && self.relation.get(left, right)
  }

  /// Relates `left <= right` together with everything it implies.
  ///
  /// The closure is computed on a scratch copy and only committed when it
  /// stays antisymmetric, so a rejected call leaves the poset untouched.
  pub fn add_relation(&mut self, left: usize, right: usize) -> Result<(), RelationError> {
    let (x, y) = (Element::new(left)?.index(), Element::new(right)?.index());
    if self.relation.get(x, y) {
      return Err(RelationError::AlreadyPresent { left, right });
    }
    let mut scratch = self.relation.clone();
    scratch.set(x, y);
    scratch.close();
    if !scratch.is_antisymmetric() {
      debug!(left, right, "rejected relation closing a cycle");
      return Err(RelationError::Cycle { left, right });
    }
    self.relation = scratch;
    #[cfg(debug_assertions)]
    self.check();
    Ok(())
  }

  /// Removes `left <= right` if it is a direct pair.
  ///
  /// Relies on the matrix being closed: any longer path from `left` to
  /// `right` shows up as a single intermediate element.
  pub fn remove_relation(&mut self, left: usize, right: usize) -> Result<(), RelationError> {
    let (x, y) = (Element::new(left)?.index(), Element::new(right)?.index());
    if x == y {
      return Err(RelationError::Reflexive { element: x });
    }
    if !self.relation.get(x, y) {
      return Err(RelationError::Absent { left, right });
    }
    if let Some(via) = self.witness(x, y) {
      debug!(left, right, via, "rejected removal of derived relation");
      return Err(RelationError::Derived { left, right, via });
    }
    self.relation.clear(x, y);
    #[cfg(debug_assertions)]
    self.check();
    Ok(())
  }

  /// Whether `left <= right` holds with no element strictly between them,
  /// i.e. whether [`Poset::remove_relation`] would accept the pair.
  pub fn is_direct(&self, left: usize, right: usize) -> bool {
    left != right && self.has_relation(left, right) && self.witness(left, right).is_none()
  }

  /// Direct pairs in row-major order: the edges of the Hasse diagram.
  pub fn covering_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
    (0..self.len())
      .cartesian_product(0..self.len())
      .filter(move |&(i, j)| self.is_direct(i, j))
  }

  /// Every related pair except the reflexive ones, in row-major order.
  pub fn relations(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
    (0..self.len())
      .cartesian_product(0..self.len())
      .filter(move |&(i, j)| i != j && self.relation.get(i, j))
  }

  fn witness(&self, x: usize, y: usize) -> Option<usize> {
    (0..self.len()).find(|&z| z != x && z != y && self.relation.get(x, z) && self.relation.get(z, y))
  }

  /// Panics unless the relation is reflexive, antisymmetric and transitive.
  pub fn check(&self) {
    let len = self.len();
    (0..len).into_par_iter()
      .for_each(|i| {
        (0..len).into_par_iter()
          .for_each(|j| {
            if i == j {
              assert!(self.relation.get(i, j), "({i}, {i}) missing");
            } else {
              assert!(!self.relation.get(i, j) || !self.relation.get(j, i), "({i}, {j}) related both ways");
              if !self.relation.get(i, j) {
                assert!(
                  (0..len).all(|k| !self.relation.get(i, k) || !self.relation.get(k, j)),
                  "({i}, {j}) missing from closure"
                );
              }
            }
          })
      });
  }
}

impl<R: Relation> fmt::Display for Poset<R> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    for i in 0..self.len() {
      if i > 0 {
        writeln!(f)?;
      }
      for j in 0..self.len() {
        f.write_str(if self.relation.get(i, j) { "1" } else { "0" })?;
      }
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn fresh_is_reflexive<R: Relation>() {
    let mut poset = Poset::<R>::new();
    poset.check();
    for i in 0..UNIVERSE_SIZE {
      assert!(poset.has_relation(i, i));
      assert_eq!(poset.remove_relation(i, i), Err(RelationError::Reflexive { element: i }));
    }
    assert_eq!(poset.relations().count(), 0);
  }

  fn chain_scenario<R: Relation>() {
    let mut poset = Poset::<R>::new();
    assert_eq!(poset.add_relation(0, 1), Ok(()));
    assert_eq!(poset.add_relation(1, 0), Err(RelationError::Cycle { left: 1, right: 0 }));
    assert_eq!(poset.add_relation(1, 2), Ok(()));
    assert!(poset.has_relation(0, 2));
    assert_eq!(poset.add_relation(2, 0), Err(RelationError::Cycle { left: 2, right: 0 }));
    assert_eq!(poset.add_relation(0, 2), Err(RelationError::AlreadyPresent { left: 0, right: 2 }));

    assert_eq!(poset.remove_relation(0, 2), Err(RelationError::Derived { left: 0, right: 2, via: 1 }));
    assert_eq!(poset.covering_pairs().collect::<Vec<_>>(), [(0, 1), (1, 2)]);

    // (0, 2) stays behind as a direct pair of its own.
    assert_eq!(poset.remove_relation(0, 1), Ok(()));
    assert!(!poset.has_relation(0, 1));
    assert!(poset.has_relation(0, 2));
    assert!(poset.has_relation(1, 2));
    assert_eq!(poset.covering_pairs().collect::<Vec<_>>(), [(0, 2), (1, 2)]);
    assert_eq!(poset.remove_relation(0, 1), Err(RelationError::Absent { left: 0, right: 1 }));
    poset.check();
  }

  fn rejected_add_is_untouched<R: Relation>() {
    let mut poset = Poset::<R>::from_relations([(0, 1), (1, 2), (2, 3), (5, 4)]).unwrap();
    let before = poset.clone();
    assert!(poset.add_relation(3, 0).is_err());
    assert!(poset.add_relation(4, 5).is_err());
    assert!(poset.add_relation(1, 3).is_err());
    assert!(poset.add_relation(UNIVERSE_SIZE, 0).is_err());
    assert_eq!(poset, before);
  }

  fn remove_undoes_direct_add<R: Relation>() {
    let mut poset = Poset::<R>::from_relations([(0, 1), (2, 3)]).unwrap();
    let before = poset.clone();
    poset.add_relation(4, 5).unwrap();
    poset.remove_relation(4, 5).unwrap();
    assert_eq!(poset, before);
  }

  fn out_of_range<R: Relation>() {
    let mut poset = Poset::<R>::new();
    let err = RelationError::OutOfRange { index: UNIVERSE_SIZE, size: UNIVERSE_SIZE };
    assert!(!poset.has_relation(0, UNIVERSE_SIZE));
    assert!(!poset.has_relation(usize::MAX, 0));
    assert_eq!(poset.add_relation(0, UNIVERSE_SIZE), Err(err));
    assert_eq!(poset.remove_relation(UNIVERSE_SIZE, 0), Err(err));
    assert_eq!(poset, Poset::new());
  }

  fn closure_through_join<R: Relation>() {
    // Joining two chains relates every element of the lower chain to every
    // element of the upper one.
    let mut poset = Poset::<R>::from_relations([(0, 1), (1, 2), (10, 11), (11, 12)]).unwrap();
    poset.add_relation(2, 10).unwrap();
    for low in [0, 1, 2] {
      for high in [10, 11, 12] {
        assert!(poset.has_relation(low, high));
        assert!(!poset.has_relation(high, low));
      }
    }
    assert_eq!(poset.relations().count(), 3 + 3 + 9);
    assert_eq!(poset.covering_pairs().count(), 5);
  }

  #[test]
  fn bitvec_fresh_is_reflexive() {
    fresh_is_reflexive::<BitVectorRelation>();
  }
  #[test]
  fn matrix_fresh_is_reflexive() {
    fresh_is_reflexive::<MatrixRelation>();
  }
  #[test]
  fn bitvec_chain_scenario() {
    chain_scenario::<BitVectorRelation>();
  }
  #[test]
  fn matrix_chain_scenario() {
    chain_scenario::<MatrixRelation>();
  }
  #[test]
  fn bitvec_rejected_add_is_untouched() {
    rejected_add_is_untouched::<BitVectorRelation>();
  }
  #[test]
  fn matrix_rejected_add_is_untouched() {
    rejected_add_is_untouched::<MatrixRelation>();
  }
  #[test]
  fn bitvec_remove_undoes_direct_add() {
    remove_undoes_direct_add::<BitVectorRelation>();
  }
  #[test]
  fn matrix_remove_undoes_direct_add() {
    remove_undoes_direct_add::<MatrixRelation>();
  }
  #[test]
  fn bitvec_out_of_range() {
    out_of_range::<BitVectorRelation>();
  }
  #[test]
  fn matrix_out_of_range() {
    out_of_range::<MatrixRelation>();
  }
  #[test]
  fn bitvec_closure_through_join() {
    closure_through_join::<BitVectorRelation>();
  }
  #[test]
  fn matrix_closure_through_join() {
    closure_through_join::<MatrixRelation>();
  }

  #[test]
  fn from_relations_stops_at_cycle() {
    assert_eq!(
      Poset::<BitVectorRelation>::from_relations([(0, 1), (1, 2), (2, 0)]),
      Err(RelationError::Cycle { left: 2, right: 0 })
    );
    // Pairs implied by earlier ones are accepted.
    assert!(Poset::<BitVectorRelation>::from_relations([(0, 1), (1, 2), (0, 2)]).is_ok());
  }

  #[test]
  fn copies_are_independent() {
    let mut original = Poset::<BitVectorRelation>::from_relations([(3, 7)]).unwrap();
    let copy = original.clone();
    original.remove_relation(3, 7).unwrap();
    assert!(copy.has_relation(3, 7));
    assert!(!original.has_relation(3, 7));
  }

  #[test]
  fn display_rows() {
    let poset = Poset::<MatrixRelation>::from_relations([(0, 1)]).unwrap();
    let text = poset.to_string();
    let rows = text.lines().collect::<Vec<_>>();
    assert_eq!(rows.len(), UNIVERSE_SIZE);
    assert!(rows[0].starts_with("110"));
    assert!(rows[1].starts_with("010"));
    assert!(rows.iter().all(|row| row.len() == UNIVERSE_SIZE));
  }
}
