use std::fmt;

use sucds::bit_vectors::{BitVector, prelude::*};

use super::{Relation, UNIVERSE_SIZE};

// Widest span `get_bits`/`set_bits` move at once.
const WORD_LEN: usize = usize::BITS as usize;

/// One `sucds` bit vector per row; row unions go a machine word at a time.
#[derive(Clone)]
pub struct BitVectorRelation {
  rows: Vec<BitVector>,
}

impl Relation for BitVectorRelation {
  fn reflexive() -> Self {
    let rows = (0..UNIVERSE_SIZE)
      .map(|i| {
        let mut row = BitVector::from_bit(false, UNIVERSE_SIZE);
        row.set_bit(i, true).expect("diagonal lies inside the row");
        row
      })
      .collect();
    Self { rows }
  }
  fn len(&self) -> usize {
    self.rows.len()
  }
  fn get(&self, left: usize, right: usize) -> bool {
    self.rows[left].access(right).expect("column lies inside the row")
  }
  fn set(&mut self, left: usize, right: usize) {
    self.rows[left].set_bit(right, true).expect("column lies inside the row");
  }
  fn clear(&mut self, left: usize, right: usize) {
    self.rows[left].set_bit(right, false).expect("column lies inside the row");
  }
  fn union_row(&mut self, dst: usize, src: usize) {
    if dst == src {
      return;
    }
    let len = self.len();
    for pos in (0..len).step_by(WORD_LEN) {
      let width = WORD_LEN.min(len - pos);
      let bits = self.rows[src].get_bits(pos, width).expect("span lies inside the row");
      let row = &mut self.rows[dst];
      let merged = row.get_bits(pos, width).expect("span lies inside the row") | bits;
      row.set_bits(pos, merged, width).expect("span lies inside the row");
    }
  }
}

impl PartialEq for BitVectorRelation {
  fn eq(&self, other: &Self) -> bool {
    self.rows.len() == other.rows.len()
      && self.rows.iter().zip(other.rows.iter()).all(|(l, r)| l.iter().eq(r.iter()))
  }
}

impl Eq for BitVectorRelation {}

impl fmt::Debug for BitVectorRelation {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_list()
      .entries(self.rows.iter().map(|row| {
        row.iter().map(|bit| if bit { '1' } else { '0' }).collect::<String>()
      }))
      .finish()
  }
}
