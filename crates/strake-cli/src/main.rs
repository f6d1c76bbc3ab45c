//! strake CLI — static linting of icontract-style contract decorators.
//!
//! Lints the given files and directories and reports structural defects in
//! contract declarations. See `strake --help` for usage.

use std::path::PathBuf;

use clap::Parser;

mod cli_args;

use cli_args::Cli;

fn main() {
    let cli = Cli::parse();

    let formatter: Box<dyn strake_output::OutputFormatter> = if cli.json {
        Box::new(strake_output::json::JsonFormatter)
    } else {
        Box::new(strake_output::human::HumanFormatter {
            verbose: cli.verbose,
        })
    };

    let paths: Vec<PathBuf> = cli.paths.iter().map(PathBuf::from).collect();
    let run = match strake_lint::paths::check_paths(&paths) {
        Ok(run) => run,
        Err(err) => {
            eprintln!("strake: {err}");
            std::process::exit(2);
        }
    };

    let output = formatter.format_run(&run);
    if !output.is_empty() {
        print!("{output}");
        if !output.ends_with('\n') {
            println!();
        }
    }

    let exit_code = if run.total() > 0 && !cli.dont_panic {
        1
    } else {
        0
    };
    std::process::exit(exit_code);
}
