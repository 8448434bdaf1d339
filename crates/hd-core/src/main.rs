//! heredity: exact pedigree inference CLI.

use clap::Parser;
use hd_core::cli::{self, Cli};
use hd_core::logging;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_json);
    let code = cli::run(cli);
    std::process::exit(code.as_i32());
}
