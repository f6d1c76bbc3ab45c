use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "strake",
    version,
    about = "Static linter for icontract-style contract decorators"
)]
pub(crate) struct Cli {
    /// Files and directories to lint (directories are searched recursively
    /// for Python sources)
    #[arg(required = true)]
    pub paths: Vec<String>,

    /// Output as structured JSON
    #[arg(long)]
    pub json: bool,

    /// Print an explicit confirmation when no errors are found
    #[arg(long)]
    pub verbose: bool,

    /// Return a zero exit code even if errors were found
    #[arg(long)]
    pub dont_panic: bool,
}
