// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::process;

use clap::Parser;

use pose3d_viz::cli::args::{Cli, Commands};
use pose3d_viz::cli::run::run;
use pose3d_viz::error;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            if let Err(e) = run(&args) {
                error!("{e}");
                process::exit(1);
            }
        }
    }
}
