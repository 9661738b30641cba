use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use env_logger::Env;
use frontend::front_end_passes;

/// Dumps the token stream and parse events of a source file.
#[derive(Parser)]
#[command(name = "exprc-frontend")]
struct Args {
  /// Path to the source file to scan and parse
  input: PathBuf,

  /// Raise the log level (-v debug, -vv trace)
  #[arg(short, long, action = ArgAction::Count)]
  verbose: u8,
}

fn main() -> anyhow::Result<()> {
  let args = Args::parse();

  let level = match args.verbose {
    0 => "warn",
    1 => "debug",
    _ => "trace",
  };
  env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

  let input = fs::read_to_string(&args.input)
    .with_context(|| format!("failed to read {}", args.input.display()))?;
  let front = front_end_passes(&input)?;

  for token in &front.tokens {
    println!("{}", token);
  }
  for event in front.events() {
    println!("{:?}", event);
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_args_take_a_path_and_verbosity() {
    let args = Args::try_parse_from(["exprc-frontend", "-vv", "prog.txt"]).unwrap();
    assert_eq!(args.input, PathBuf::from("prog.txt"));
    assert_eq!(args.verbose, 2);
    assert!(Args::try_parse_from(["exprc-frontend"]).is_err());
  }
}
