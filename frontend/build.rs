extern crate lalrpop;
fn main() {
  println!("cargo:rerun-if-changed=src/parser.lalrpop");

  lalrpop::Configuration::new()
    .use_cargo_dir_conventions()
    .process_file("src/parser.lalrpop")
    .unwrap();
}
