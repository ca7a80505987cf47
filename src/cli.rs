//! Command-line interface implementation for templ.
//! Provides argument parsing and help text formatting using clap.

use crate::locator::MatchPolicy;
use clap::{CommandFactory, Parser};

/// Command-line arguments structure for templ.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "templ: hydrate known template files with variables",
    long_about = None,
    after_help = "Environment:\n  TEMPL_DIR        template root (default: ~/.config/templ)\n  TEMPL_LOG_LEVEL  log filter (default: warn)"
)]
pub struct Args {
    /// Template name fragments, `fragment=variables.yaml` pairs and
    /// `KEY=VALUE` overrides
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,

    /// List every known template
    #[arg(short, long)]
    pub list: bool,

    /// Clone a template repository (git URL or local directory) into the template root
    #[arg(long, value_name = "UPSTREAM")]
    pub fetch: Vec<String>,

    /// Pull every repository in the template root
    #[arg(short, long)]
    pub update: bool,

    /// Read the template from stdin; every argument is then a KEY=VALUE override
    #[arg(short, long)]
    pub stdin: bool,

    /// How template name fragments are matched against template paths
    #[arg(long = "match", value_enum, default_value_t = MatchPolicy::Substring)]
    pub match_policy: MatchPolicy,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Whether the arguments ask for anything to be done.
    pub fn has_action(&self) -> bool {
        self.list || self.update || self.stdin || !self.fetch.is_empty() || !self.args.is_empty()
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 and the help text if nothing is requested
/// * With clap's default error handling for argument errors
pub fn get_args() -> Args {
    let args = Args::parse();
    if !args.has_action() {
        let mut command = Args::command().help_template(
            r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
        );
        let _ = command.print_help();
        std::process::exit(1);
    }
    args
}
