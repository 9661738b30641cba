use std::fs;
use std::path::{Path, PathBuf};

use backend::asm::codegen::generate_assembly;
use backend::{generate_code, BackendError, Generated};
use frontend::{front_end_passes, FrontEnd, FrontendError};
use log::info;
use thiserror::Error;

pub const TOKENS_FILE: &str = "token.txt";
pub const SYMBOLS_FILE: &str = "old_symbol_table.txt";
pub const IR_FILE: &str = "intermediate_code.txt";
pub const ASSEMBLY_FILE: &str = "assembly_language.asm";

#[derive(Error, Debug)]
pub enum DriverError {
  #[error(transparent)]
  Frontend(#[from] FrontendError),

  #[error(transparent)]
  Backend(#[from] BackendError),

  #[error("cannot access {path}: {source}")]
  Io {
    path: PathBuf,
    source: std::io::Error,
  },
}

/// Where to read the source from and which artifacts to write.
#[derive(Debug, Clone)]
pub struct Options {
  pub input: PathBuf,
  pub output_dir: PathBuf,
  pub dump_tokens: bool,
  pub dump_symbols: bool,
  pub dump_ir: bool,
}

impl Options {
  pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
    Options {
      input: input.into(),
      output_dir: output_dir.into(),
      dump_tokens: true,
      dump_symbols: true,
      dump_ir: true,
    }
  }
}

#[derive(Debug)]
pub struct Compilation {
  pub front: FrontEnd,
  pub generated: Generated,
}

impl Compilation {
  pub fn assembly(&self) -> String {
    generate_assembly(&self.generated.assembly)
  }
}

pub fn compile_source(source: &str) -> Result<Compilation, DriverError> {
  let front = front_end_passes(source)?;
  let generated = generate_code(front.events(), &front.symbols)?;
  Ok(Compilation { front, generated })
}

pub fn compile_file(options: &Options) -> Result<Compilation, DriverError> {
  let source = fs::read_to_string(&options.input).map_err(|source| DriverError::Io {
    path: options.input.clone(),
    source,
  })?;
  let compilation = compile_source(&source)?;
  write_artifacts(&compilation, options)?;
  Ok(compilation)
}

/// Writes the requested dumps and the assembly file, returning their paths.
pub fn write_artifacts(
  compilation: &Compilation,
  options: &Options,
) -> Result<Vec<PathBuf>, DriverError> {
  let dir = &options.output_dir;
  fs::create_dir_all(dir).map_err(|source| DriverError::Io {
    path: dir.clone(),
    source,
  })?;

  let mut written = Vec::new();
  if options.dump_tokens {
    let lines: Vec<String> = compilation
      .front
      .tokens
      .iter()
      .map(|t| t.to_string())
      .collect();
    written.push(write_lines(&dir.join(TOKENS_FILE), &lines)?);
  }
  if options.dump_symbols {
    let lines = compilation.front.symbols.dump_lines();
    written.push(write_lines(&dir.join(SYMBOLS_FILE), &lines)?);
  }
  if options.dump_ir {
    let lines = backend::tacky::dump_lines(&compilation.generated.tac);
    written.push(write_lines(&dir.join(IR_FILE), &lines)?);
  }

  let path = dir.join(ASSEMBLY_FILE);
  fs::write(&path, compilation.assembly()).map_err(|source| DriverError::Io {
    path: path.clone(),
    source,
  })?;
  written.push(path);

  info!("wrote {} artifacts to {}", written.len(), dir.display());
  Ok(written)
}

pub fn write_lines(path: &Path, lines: &[String]) -> Result<PathBuf, DriverError> {
  let mut contents = lines.join("\n");
  if !lines.is_empty() {
    contents.push('\n');
  }
  fs::write(path, contents).map_err(|source| DriverError::Io {
    path: path.to_path_buf(),
    source,
  })?;
  Ok(path.to_path_buf())
}
