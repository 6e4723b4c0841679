use clap::Parser;
use marketlens::cli::{run, Cli};
use marketlens::logging::init_tracing;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli)
}
