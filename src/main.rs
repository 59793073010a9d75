use clap::Parser;
use stylecart::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();
    if let Err(err) = cli::run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
