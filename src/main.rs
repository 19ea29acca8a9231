use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;

use breathe::cli::args::{Cli, Commands};
use breathe::cli::commands::{self, Context};
use breathe::config::{ColorSetting, Config, Paths};
use breathe::logging::{init_logging, LogTarget};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = Paths::new()?;
    let config = Config::load(&paths).context("loading configuration")?;

    match config.general.color {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {}
    }

    // The interactive session owns the terminal, so its logs go to a file.
    let target = if matches!(cli.command, Commands::Run { .. }) {
        paths.ensure_dirs()?;
        LogTarget::File(paths.log_file.clone())
    } else {
        LogTarget::Stderr
    };
    init_logging(cli.verbose, &target)?;

    let ctx = Context::with_config(paths, config, cli.output);

    let output = match cli.command {
        Commands::Techniques => commands::techniques(&ctx)?,
        Commands::Show { technique } => commands::show(&ctx, &technique)?,
        Commands::Run { technique } => commands::run(&ctx, technique.as_deref())
            .context("running interactive session")?,
        Commands::Simulate(args) => commands::simulate(&ctx, &args)?,
        Commands::History { days, date } => commands::history(&ctx, days, date.as_deref())
            .context("reading practice log")?,
        Commands::Config(args) => commands::config(&ctx, args.command)?,
        Commands::Completions { shell } => commands::completions(shell)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
