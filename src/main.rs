use clap::Parser;
use lesson_deck::cli::{default_output_path, expand_inputs, run_build, run_validate};
use lesson_deck::config::Configuration;
use lesson_deck::generator::BackendType;
use lesson_deck::{get_backend_types, get_template_names};

use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "lesson_deck.json";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Type of output (html, json)
    #[arg(short = 't', long, value_name = "TYPE", value_enum, default_value_t = BackendType::Html)]
    to_type: BackendType,

    /// Output file (only with a single input; default: <input>_slides.<ext>)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// JSON config file (default: lesson_deck.json if present)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Only parse and validate, do not build
    #[arg(long)]
    validate_only: bool,

    /// Exit with an error when validation finds issues
    #[arg(long)]
    strict: bool,

    /// Do not add slide numbers
    #[arg(long)]
    no_slide_numbers: bool,

    /// Do not reveal [step] lines one by one
    #[arg(long)]
    no_animations: bool,

    /// Do not warn about text that may overflow its box
    #[arg(long)]
    no_overflow_warnings: bool,

    /// Show debug output
    #[arg(short = 'v', long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show warnings and errors
    #[arg(short = 'q', long)]
    quiet: bool,

    /// List available output types and templates
    #[arg(short = 'l', long)]
    list_type: bool,

    /// Input markup files or glob patterns
    #[arg(required_unless_present = "list_type")]
    inputs: Vec<String>,
}

fn load_config(cli: &Cli) -> anyhow::Result<Configuration> {
    let mut config = match &cli.config {
        Some(path) => Configuration::load(path)?,
        None => Configuration::load_or_default(Path::new(DEFAULT_CONFIG_FILE)),
    };
    if cli.no_slide_numbers {
        config.enable_slide_numbers = false;
    }
    if cli.no_animations {
        config.enable_animations = false;
    }
    if cli.no_overflow_warnings {
        config.enable_overflow_warnings = false;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else if cli.quiet {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Info
    };
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .init();

    if cli.list_type {
        println!("type of output:");
        println!("{}", get_backend_types().join(" "));
        println!();
        println!("templates:");
        println!("{}", get_template_names().join(" "));
        println!();
        return Ok(());
    }

    let inputs = expand_inputs(&cli.inputs)?;
    if cli.output.is_some() && inputs.len() > 1 {
        anyhow::bail!("--output can only be used with a single input file");
    }

    let config = load_config(&cli)?;

    let mut total_issues = 0;
    for input in &inputs {
        let summary = if cli.validate_only {
            run_validate(input)?
        } else {
            let output = cli
                .output
                .clone()
                .unwrap_or_else(|| default_output_path(input, cli.to_type));
            run_build(input, &output, &config, cli.to_type)?
        };

        total_issues += summary.issues.len();
        let written = summary
            .output
            .as_ref()
            .map(|p| format!(" -> {}", p.display()))
            .unwrap_or_default();
        println!(
            "{}: {} slides, {} issues, {} warnings{}",
            summary.input.display(),
            summary.slide_count,
            summary.issues.len(),
            summary.warnings.len(),
            written
        );
    }

    if cli.strict && total_issues > 0 {
        anyhow::bail!("Validation found {} issues", total_issues);
    }

    Ok(())
}
