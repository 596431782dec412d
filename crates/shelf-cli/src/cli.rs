use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use shelf_layout::PlannerConfig;

use crate::error::{CliError, Result};
use crate::input::load_themes;
use crate::output::{OutputFormat, write_plan};
use crate::preview::{render_preview, write_preview};

#[derive(Debug, Parser)]
#[command(
    name = "shelf",
    about = "Plan and preview the brickshelf theme card grid",
    version
)]
pub struct Cli {
    /// Planner configuration file (TOML, or JSON by extension).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long = "log-json", global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the full/half decision for every theme.
    Plan(PlanArgs),

    /// Draw an ASCII preview of the card grid.
    Preview(PreviewArgs),

    /// Print the effective configuration as TOML.
    Config,
}

#[derive(Debug, Clone, Args)]
pub struct PlanArgs {
    /// Theme list JSON file, or `-` for stdin.
    pub input: String,

    /// Override the full-width threshold.
    #[arg(long)]
    pub threshold: Option<i64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Args)]
pub struct PreviewArgs {
    /// Theme list JSON file, or `-` for stdin.
    pub input: String,

    /// Override the full-width threshold.
    #[arg(long)]
    pub threshold: Option<i64>,

    /// Container width in cells.
    #[arg(long, default_value_t = 100)]
    pub width: u16,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    crate::logging::init(cli.log_json);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}

pub fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Plan(args) => run_plan(&config, args, out),
        Commands::Preview(args) => run_preview(&config, args, out),
        Commands::Config => {
            write!(out, "{}", config.to_toml_string()?)?;
            Ok(())
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<PlannerConfig> {
    match path {
        Some(path) if !path.exists() => Err(CliError::MissingPath {
            path: path.to_path_buf(),
        }),
        Some(path) => Ok(PlannerConfig::from_file(path)?),
        None => Ok(PlannerConfig::default()),
    }
}

fn with_threshold(config: &PlannerConfig, threshold: Option<i64>) -> PlannerConfig {
    let mut config = config.clone();
    if let Some(threshold) = threshold {
        config.threshold = threshold;
    }
    config
}

fn run_plan(config: &PlannerConfig, args: PlanArgs, out: &mut dyn Write) -> Result<()> {
    let config = with_threshold(config, args.threshold);
    let planner = config.planner()?;
    let themes = load_themes(&args.input)?;
    let planned = planner.plan(&themes)?;
    write_plan(out, &planned, args.format)
}

fn run_preview(config: &PlannerConfig, args: PreviewArgs, out: &mut dyn Write) -> Result<()> {
    if args.width == 0 {
        return Err(CliError::invalid("width must be > 0"));
    }
    let config = with_threshold(config, args.threshold);
    let planner = config.planner()?;
    let themes = load_themes(&args.input)?;
    let planned = planner.plan(&themes)?;
    let (canvas, arrangement) = render_preview(&config.card_grid(), args.width, &planned);
    write_preview(out, &canvas, &arrangement)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Commands};
    use crate::output::OutputFormat;

    #[test]
    fn parses_plan_with_overrides() {
        let cli = Cli::parse_from(["shelf", "plan", "themes.json", "--threshold", "4", "--format", "json"]);
        match cli.command {
            Commands::Plan(args) => {
                assert_eq!(args.input, "themes.json");
                assert_eq!(args.threshold, Some(4));
                assert_eq!(args.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::parse_from(["shelf", "preview", "-", "--config", "shelf.toml", "--log-json"]);
        assert!(cli.log_json);
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("shelf.toml")));
        match cli.command {
            Commands::Preview(args) => assert_eq!(args.width, 100),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn negative_threshold_parses_for_the_planner_to_reject() {
        let cli = Cli::parse_from(["shelf", "plan", "-", "--threshold=-1"]);
        assert!(matches!(cli.command, Commands::Plan(args) if args.threshold == Some(-1)));
    }
}
