//! Command-line entry point for regenerating the logo folders.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use logo_renderer::{
    BatchReport, Color, GeneratorConfig, LogoGenerator, LogoPipeline, LogoVariant, Preset,
    RenderSpec,
};

/// Render logo variants from the source SVGs.
#[derive(Parser)]
#[command(name = "logo-renderer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory that relative config paths are resolved against
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// JSON config file (relative to the current directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the batch reports as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate every preset folder
    All,

    /// Generate a single preset folder
    Preset {
        #[arg(value_enum)]
        preset: Preset,
    },

    /// Render a single logo on any background
    Render {
        #[arg(value_enum)]
        variant: LogoVariant,

        /// Canvas width and height in pixels
        #[arg(short, long, default_value_t = 512)]
        size: u32,

        /// Background color as #RGB, #RRGGBB or #RRGGBBAA
        #[arg(short, long, default_value = "#00000000")]
        background: Color,

        /// Flatten the artwork to this color
        #[arg(long)]
        mono: Option<Color>,

        /// Use the artwork without brackets
        #[arg(long)]
        no_brackets: bool,

        /// Logo width as a fraction of the canvas width
        #[arg(short, long)]
        width: Option<f64>,

        /// Swap dark and light in the file name
        #[arg(long)]
        invert_label: bool,

        /// Output directory (defaults to the configured output dir)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print the effective config as JSON
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install logger: {e}");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> logo_renderer::Result<()> {
    let config = match &cli.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    }
    .with_root(&cli.root);

    let reports: Vec<BatchReport> = match cli.command.unwrap_or(Commands::All) {
        Commands::All => LogoGenerator::new(config).generate_all()?,
        Commands::Preset { preset } => vec![LogoGenerator::new(config).generate(preset)?],
        Commands::Render {
            variant,
            size,
            background,
            mono,
            no_brackets,
            width,
            invert_label,
            out,
        } => {
            let spec = RenderSpec::new(size, variant, background)
                .with_brackets(!no_brackets)
                .with_mono(mono)
                .with_width_multiplier(width.unwrap_or(config.logo_width_multiplier));
            let logo = LogoPipeline::new(&config.source_dir)
                .render(&spec)?
                .with_inverted_label(invert_label);
            let path = logo.save(out.unwrap_or(config.output_dir))?;
            info!(path = %path.display(), "saved logo");
            return Ok(());
        }
        Commands::Config => {
            println!("{}", config.to_json_pretty()?);
            return Ok(());
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    Ok(())
}
