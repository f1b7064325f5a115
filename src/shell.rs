//! Line-oriented command interpreter over one [`Registry`].

use clap::{Parser, Subcommand};
use itertools::Itertools;
use tracing::debug;

use crate::error::RegistryError;
use crate::posets::{BitVectorRelation, Relation};
use crate::registry::{CollectionId, Registry};
use crate::validate::PosetName;

#[derive(Parser, Debug)]
#[command(no_binary_name = true, name = "posets")]
struct Line {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
  /// Create an empty collection and print its identifier
  NewCollection,
  /// Delete a collection with all of its posets
  DeleteCollection { id: CollectionId },
  /// Create an antichain under a new name
  NewPoset { id: CollectionId, name: String },
  DeletePoset { id: CollectionId, name: String },
  /// Copy SRC over DST, replacing DST if it exists
  CopyPoset { id: CollectionId, dst: String, src: String },
  /// List poset names in order
  Names { id: CollectionId },
  /// Relate X <= Y
  Add { id: CollectionId, name: String, x: usize, y: usize },
  /// Check whether X <= Y
  Is { id: CollectionId, name: String, x: usize, y: usize },
  /// Remove a direct pair X <= Y
  Remove { id: CollectionId, name: String, x: usize, y: usize },
  /// Print the relation matrix
  Show { id: CollectionId, name: String },
  /// List the direct pairs
  Covers { id: CollectionId, name: String },
  /// Count collections, or posets in one collection
  Count { id: Option<CollectionId> },
  /// Print the universe size
  Universe,
}

impl Command {
  pub fn parse(line: &str) -> Result<Self, clap::Error> {
    Line::try_parse_from(line.split_whitespace()).map(|line| line.command)
  }
}

pub struct Shell<R = BitVectorRelation> {
  registry: Registry<R>,
}

impl<R: Relation> Shell<R> {
  pub fn new(registry: Registry<R>) -> Self {
    Self { registry }
  }

  pub fn registry(&self) -> &Registry<R> {
    &self.registry
  }

  /// Runs one input line. Blank lines and `#` comments produce no reply;
  /// parse and command failures produce a reply starting with `error:`.
  pub fn run_line(&mut self, line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
      return None;
    }
    Some(match Command::parse(line) {
      Ok(command) => self.execute(command),
      Err(err) => err.to_string().trim_end().to_owned(),
    })
  }

  pub fn execute(&mut self, command: Command) -> String {
    self.dispatch(command).unwrap_or_else(|err| {
      debug!(%err, "command failed");
      format!("error: {err}")
    })
  }

  fn dispatch(&mut self, command: Command) -> Result<String, RegistryError> {
    let registry = &mut self.registry;
    let reply = match command {
      Command::NewCollection => registry.new_collection()?.to_string(),
      Command::DeleteCollection { id } => registry.delete_collection(id).to_string(),
      Command::NewPoset { id, name } => {
        registry.new_poset(id, &name)?;
        "ok".to_owned()
      }
      Command::DeletePoset { id, name } => registry.delete_poset(id, &name).to_string(),
      Command::CopyPoset { id, dst, src } => {
        registry.copy_poset(id, &dst, &src)?;
        "ok".to_owned()
      }
      Command::Names { id } => registry.names(id)?.map(PosetName::as_str).join(" "),
      Command::Add { id, name, x, y } => {
        registry.add_relation(id, &name, x, y)?;
        "ok".to_owned()
      }
      Command::Is { id, name, x, y } => registry.is_relation(id, &name, x, y).to_string(),
      Command::Remove { id, name, x, y } => {
        registry.remove_relation(id, &name, x, y)?;
        "ok".to_owned()
      }
      Command::Show { id, name } => registry.poset(id, &name)?.to_string(),
      Command::Covers { id, name } => registry.poset(id, &name)?
        .covering_pairs()
        .map(|(x, y)| format!("{x}<{y}"))
        .join(" "),
      Command::Count { id: None } => registry.len().to_string(),
      Command::Count { id: Some(id) } => registry.collection_len(id).to_string(),
      Command::Universe => registry.universe_size().to_string(),
    };
    Ok(reply)
  }
}
