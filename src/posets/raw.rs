use super::{Relation, UNIVERSE_SIZE};

/// Plain boolean matrix. Slower rows, but trivially correct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRelation {
  edges: [[bool; UNIVERSE_SIZE]; UNIVERSE_SIZE],
}

impl Relation for MatrixRelation {
  fn reflexive() -> Self {
    let mut edges = [[false; UNIVERSE_SIZE]; UNIVERSE_SIZE];
    for (i, row) in edges.iter_mut().enumerate() {
      row[i] = true;
    }
    Self { edges }
  }
  fn len(&self) -> usize {
    self.edges.len()
  }
  fn get(&self, left: usize, right: usize) -> bool {
    self.edges[left][right]
  }
  fn set(&mut self, left: usize, right: usize) {
    self.edges[left][right] = true;
  }
  fn clear(&mut self, left: usize, right: usize) {
    self.edges[left][right] = false;
  }
  fn union_row(&mut self, dst: usize, src: usize) {
    let src = self.edges[src];
    for (edge, connected) in self.edges[dst].iter_mut().zip(src) {
      *edge |= connected;
    }
  }
}
