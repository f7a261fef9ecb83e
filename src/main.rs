use clap::Parser;

use codepro::cli::{Cli, run};

fn main() {
    std::process::exit(run(Cli::parse()));
}
