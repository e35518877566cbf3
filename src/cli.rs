use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "depaudit",
    about = "Dependency Freshness Audit - A tool to track outdated Gradle dependencies over time",
    version,
    author
)]
pub struct Cli {
    /// Path to the Gradle project directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub path: String,

    /// Regenerate the dependency report via the Gradle task before auditing
    #[arg(long = "run-task", alias = "runTask")]
    pub run_task: bool,

    /// Print findings to stdout instead of appending them to the audit sinks
    #[arg(long = "no-write")]
    pub no_write: bool,

    /// Path to a TOML config file (defaults to <path>/depaudit.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,

    /// Swallows flags this version does not know, so newer pipeline
    /// invocations keep working against older binaries.
    #[arg(
        hide = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "EXTRA"
    )]
    pub extra: Vec<String>,
}

impl Cli {
    /// Parse the process arguments, then re-scan the trailing catch-all:
    /// a known flag that follows an unrecognized token must still take
    /// effect, the way a plain argv membership scan would treat it.
    pub fn parse_args() -> Self {
        let mut cli = Self::parse();
        cli.recover_known_flags();
        cli
    }

    /// The catch-all consumes everything after the first unrecognized
    /// token, known flags included. Fold those back into the parsed
    /// surface so recognition does not depend on argument order; only
    /// genuinely unknown tokens stay in `extra`.
    fn recover_known_flags(&mut self) {
        let mut rest = Vec::new();
        let mut tokens = std::mem::take(&mut self.extra).into_iter().peekable();
        while let Some(token) = tokens.next() {
            match token.as_str() {
                "--run-task" | "--runTask" => self.run_task = true,
                "--no-write" => self.no_write = true,
                "--verbose" | "-v" => self.verbose = true,
                "--path" | "-p" => {
                    if let Some(value) = tokens.next_if(|v| !v.starts_with('-')) {
                        self.path = value;
                    }
                }
                "--config" | "-c" => {
                    if let Some(value) = tokens.next_if(|v| !v.starts_with('-')) {
                        self.config = Some(PathBuf::from(value));
                    }
                }
                _ => {
                    if let Some(value) = token.strip_prefix("--path=") {
                        self.path = value.to_string();
                    } else if let Some(value) = token.strip_prefix("--config=") {
                        self.config = Some(PathBuf::from(value));
                    } else {
                        rest.push(token);
                    }
                }
            }
        }
        self.extra = rest;
    }
}
