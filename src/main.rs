use named_posets::{Registry, Shell};

use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use tracing_subscriber::EnvFilter;

/// Run poset collection commands from a script or standard input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
  /// The path to the command script, standard input when absent
  #[arg(long)]
  script: Option<std::path::PathBuf>,
  /// Collection identifiers are handed out below this bound
  #[arg(long, default_value_t = u64::MAX)]
  id_limit: u64,
}

fn main() -> io::Result<()> {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("named_posets=info")))
    .init();

  let args = Args::parse();
  let input: Box<dyn BufRead> = match &args.script {
    Some(path) => Box::new(BufReader::new(File::open(path)?)),
    None => Box::new(io::stdin().lock()),
  };

  let mut shell: Shell = Shell::new(Registry::with_id_limit(args.id_limit));
  let mut stdout = io::stdout().lock();
  for line in input.lines() {
    if let Some(reply) = shell.run_line(&line?) {
      writeln!(stdout, "{reply}")?;
    }
  }
  tracing::debug!(collections = shell.registry().len(), "input exhausted");
  Ok(())
}
