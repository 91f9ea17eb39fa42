use anyhow::{Context, Result};
use clap::Parser;
use pendulab::cli::{Cli, OutputFormat};
use pendulab::config::AnalysisConfig;
use pendulab::report::DataSetReport;
use pendulab::session::{self, Console, Session, SessionOutcome};
use std::io;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Defaults, then the config file, then command-line overrides
fn load_config(args: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_toml(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    if let Some(level) = args.confidence {
        config = config.with_confidence_level(level);
    }
    config.validate().context("Invalid analysis configuration")?;
    Ok(config)
}

/// Print a report for an existing data set without entering the menu
fn print_report(name: &str, args: &Cli, config: &AnalysisConfig) -> Result<()> {
    let session = Session::open(name, &args.data_dir, config.clone())
        .with_context(|| format!("Failed to open data set '{}'", name))?;
    let report = DataSetReport::build(session.records(), config);

    match args.format {
        OutputFormat::Text => print!("{}", report.to_text()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}

fn run_interactive(args: &Cli, config: AnalysisConfig) -> Result<()> {
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());

    let session = match (&args.new, &args.open) {
        (Some(name), None) => {
            console.say(&format!("You created a new data set called {}", name))?;
            Some(Session::create(name, &args.data_dir, config))
        }
        (None, Some(name)) => {
            let session = Session::open(name, &args.data_dir, config)
                .with_context(|| format!("Failed to open data set '{}'", name))?;
            console.say("The data set has been successfully loaded from CSV file.")?;
            Some(session)
        }
        (Some(_), Some(_)) => {
            anyhow::bail!("Cannot specify both --new and --open. Choose one.");
        }
        (None, None) => session::start_session(&mut console, &args.data_dir, &config)?,
    };

    let Some(mut session) = session else {
        console.say("Session ended.")?;
        return Ok(());
    };

    let outcome = session::run_menu(&mut session, &mut console)?;
    if outcome == SessionOutcome::Discarded && !session.records().is_empty() {
        tracing::info!(
            records = session.records().len(),
            "session ended without saving"
        );
    }
    console.say("Session ended.")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = load_config(&args)?;

    if args.report {
        let name = args
            .open
            .as_deref()
            .context("--report requires --open NAME")?;
        return print_report(name, &args, &config);
    }

    run_interactive(&args, config)
}
