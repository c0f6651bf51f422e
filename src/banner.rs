// Banner and version text

pub const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

const BANNER: &str = r"
                                     __
    ____  _   __ _____ ___   ____   / /____ _ _____ ___
   / __ \| | / // ___// _ \ / __ \ / // __  // ___// _ \
  / /_/ /| |/ // /   /  __// /_/ // // /_/ // /__ /  __/
 / .___/ |___//_/    \___// .___//_/ \__,_/ \___/ \___/
/_/                      /_/
";

pub fn version_line() -> String {
    format!("Current pvreplace version {}", VERSION)
}

/// Banner block, version right-aligned underneath
pub fn banner() -> String {
    format!("{}\n{:>55}\n", BANNER, version_line())
}

/// Printed to stderr, stdout carries fuzzed lines only
pub fn print_banner() {
    eprintln!("{}", banner());
}

pub fn print_version() {
    println!("{}", version_line());
}
