use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use driver::{compile_file, Options};
use env_logger::Env;

#[derive(Parser)]
#[command(name = "exprc")]
#[command(about = "Compiles an expression/assignment program to RISC-V assembly")]
struct Args {
  /// Path to the source file to compile
  input: PathBuf,

  /// Directory receiving the dumps and the assembly file
  #[arg(short, long, default_value = "out")]
  out_dir: PathBuf,

  /// Only write the assembly file
  #[arg(long)]
  asm_only: bool,

  /// Also print the assembly to stdout
  #[arg(long)]
  print: bool,

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

  let mut options = Options::new(&args.input, &args.out_dir);
  if args.asm_only {
    options.dump_tokens = false;
    options.dump_symbols = false;
    options.dump_ir = false;
  }

  let compilation = compile_file(&options)
    .with_context(|| format!("failed to compile {}", args.input.display()))?;

  if args.print {
    print!("{}", compilation.assembly());
  }
  Ok(())
}
