use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::Value;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use tplcfg::session::traits::FsFileProvider;
use tplcfg::validation::diagnostics;
use tplcfg::{CodecError, Session, SessionError, SessionView, codec, validate};

#[derive(Parser)]
#[command(name = "tplcfg")]
#[command(version)]
#[command(about = "Check, normalise and inspect map template files", long_about = None)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a template and report problems
    #[clap(visible_alias = "c")]
    Check {
        file: PathBuf,
        /// Fail on warnings too
        #[arg(long)]
        strict: bool,
    },
    /// Re-encode a template in canonical form
    Fmt {
        file: PathBuf,
        /// Write here instead of overwriting FILE
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// No indentation
        #[arg(long)]
        compact: bool,
    },
    /// Print counts and the next free zone id
    #[clap(visible_alias = "s")]
    Summary { file: PathBuf },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("{0}")]
    Diagnostics(String),

    #[error("{0} problem(s) found")]
    Problems(usize),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn check(file: &Path, strict: bool) -> Result<(), CliError> {
    let text = read(file)?;
    let raw: Value = serde_json::from_str(&text).map_err(CodecError::Syntax)?;

    let template = match codec::from_value(raw.clone()) {
        Ok(template) => template,
        Err(err) => {
            let errors = diagnostics::structural_errors(&raw).map_err(CliError::Diagnostics)?;
            for error in &errors {
                println!("error: {}", error);
            }
            return Err(err.into());
        }
    };

    let ambiguous = diagnostics::ambiguous_variants(&raw).map_err(CliError::Diagnostics)?;
    for found in &ambiguous {
        println!(
            "warning: {} sets {}; using {}",
            found.path,
            found.fields.join(", "),
            found.fields.first().copied().unwrap_or_default()
        );
    }

    let warnings = validate(&template);
    for warning in &warnings {
        println!("warning: {}", warning);
    }

    let problems = ambiguous.len() + warnings.len();
    if problems == 0 {
        println!("{}: ok", file.display());
    }
    if strict && problems > 0 {
        return Err(CliError::Problems(problems));
    }
    Ok(())
}

fn format(file: &Path, output: Option<&Path>, compact: bool) -> Result<(), CliError> {
    let mut session = Session::new(FsFileProvider::new(file)).with_compact_output(compact);
    session.open();
    if let SessionView::Error(message) = session.view() {
        return Err(CliError::Diagnostics(message.to_string()));
    }

    let target = output.unwrap_or(file);
    session.with_files(FsFileProvider::new(target)).save()?;
    println!("{}: formatted", target.display());
    Ok(())
}

fn summary(file: &Path) -> Result<(), CliError> {
    let template = codec::decode(&read(file)?)?;

    println!("Template:          {}", template.template_name);
    println!("Zones:             {}", template.zones.len());
    println!("Connections:       {}", template.connections.len());
    println!("Terrain configs:   {}", template.terrain_configs.len());
    println!("Custom buildings:  {}", template.custom_building_configs.len());
    match template.next_zone_id() {
        Some(zone_id) => println!("Next zone id:      {}", zone_id),
        None => println!("Next zone id:      none left"),
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<(), CliError> = match cli.command {
        Commands::Check { file, strict } => check(&file, strict),
        Commands::Fmt { file, output, compact } => format(&file, output.as_deref(), compact),
        Commands::Summary { file } => summary(&file),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
