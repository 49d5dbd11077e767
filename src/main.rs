use anyhow::{Context, Result, bail};
use clap::Parser;
use debtgate::{cli, config, logging, models, reporter, scanner};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let result = match cli.command {
        Some(cli::Commands::Scan(args)) => scan_command(args),
        Some(cli::Commands::Init(args)) => init_command(args).map(|()| models::Verdict::Clean),
        None => scan_command(cli::ScanArgs::default()),
    };

    match result {
        Ok(verdict) => ExitCode::from(verdict.exit_code()),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(models::Verdict::Aborted.exit_code())
        }
    }
}

fn scan_command(args: cli::ScanArgs) -> Result<models::Verdict> {
    if args.no_color {
        colored::control::set_override(false);
    }
    let _logger = logging::init_logging(args.verbose, !args.no_color)?;

    // Load configuration, then let the command line override it
    let mut config =
        config::load_config(args.config.as_deref()).context("Failed to load configuration")?;
    args.apply_to(&mut config);
    config::validate_config(&config).context("Invalid configuration")?;

    log::info!("Scanning {}", config.root.display());
    log::debug!("Using markers {:?}, failing on {:?}", config.markers, config.fail_on);

    let report = scanner::scan_directory(&config).map_err(|err| {
        let context = if err.is_discovery() {
            "Failed to discover source files"
        } else {
            "Failed to scan directory"
        };
        anyhow::Error::new(err).context(context)
    })?;

    reporter::generate_report(&report, args.format, args.output.as_deref(), &config.fail_on)
        .context("Failed to generate report")?;

    Ok(report.verdict(&config.fail_on))
}

fn init_command(args: cli::InitArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            args.path.display()
        );
    }

    config::save_config(&models::Config::default(), &args.path)?;
    println!("Wrote default configuration to {}", args.path.display());

    Ok(())
}
