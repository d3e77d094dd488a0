use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aircheck::catalog::ShowCatalog;
use aircheck::cli::{Cli, Commands};
use aircheck::config::Config;
use aircheck::output::{self, ScanEntry};
use aircheck::pattern::{self, FilenameParser};
use aircheck::{server, utils};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "aircheck=debug"
    } else {
        "aircheck=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // The external transcode tools only matter for the long-running modes
    if matches!(cli.command, Commands::Scan { .. } | Commands::Serve { .. }) {
        let missing = utils::check_dependencies().await;
        if !missing.is_empty() {
            eprintln!("⚠️  Dependency check warnings:");
            for dep in missing {
                eprintln!("   • {}", dep);
            }
            eprintln!("   (Continuing anyway - parsing works without them)");
        }
    }

    let config = Config::load().await?;

    let parser = FilenameParser::new()
        .with_year_cutoff(config.parsing.year_cutoff)
        .with_max_input_len(config.parsing.max_filename_length);

    match cli.command {
        Commands::Parse { filename, format } => {
            let result = parser.parse(&filename);
            output::print_to_console(&result, &format)?;
        }

        Commands::Scan { dir, format } => {
            let entries = scan_directory(&parser, &config, &dir, cli.quiet)?;
            if entries.is_empty() {
                println!("No audio files found in {}", dir.display());
            } else {
                output::print_scan_results(&entries, &format)?;
            }
        }

        Commands::Suggest { show, date, format } => {
            let date = chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .map_err(|_| anyhow::anyhow!("Date must be in YYYY-MM-DD form, got: {}", date))?;
            let format = format.unwrap_or_else(|| config.app.default_suggest_format.clone());
            println!("{}", pattern::suggest_filename(&show, date, &format));
        }

        Commands::Validate { pattern: template } => match pattern::validate_pattern(&template) {
            Ok(()) => println!("Pattern \"{}\" is valid", template),
            Err(error) => {
                println!("Pattern \"{}\" is invalid: {}", template, error);
                std::process::exit(1);
            }
        },

        Commands::Match { filename } => {
            let catalog = load_catalog(&config)?;
            match catalog.find_show_by_pattern(&parser, &filename) {
                Some(show) => {
                    println!("Matched show: {}", show.name);
                    if !show.aliases.is_empty() {
                        println!("Aliases: {}", show.aliases.join(", "));
                    }
                }
                None => {
                    println!("No catalog show matches: {}", filename);
                    std::process::exit(1);
                }
            }
        }

        Commands::Shows => {
            let catalog = load_catalog(&config)?;
            println!("Known shows ({}):", catalog.len());
            for show in catalog.shows() {
                if show.aliases.is_empty() {
                    println!("  • {}", show.name);
                } else {
                    println!("  • {} (aliases: {})", show.name, show.aliases.join(", "));
                }
            }
        }

        Commands::Serve { bind } => {
            let mut config = config;
            if let Some(bind) = bind {
                config.server.bind = bind;
                config.validate()?;
            }

            let catalog = load_catalog(&config)?;
            tracing::info!("Serving parse previews for {} known show(s)", catalog.len());
            server::run(&config, parser, catalog).await?;
        }

        Commands::Config { show } => {
            if show {
                config.display();
            } else {
                println!("Edit the configuration file manually:");
                println!("  {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}

/// Load the show catalog, seeding it with the stock shows on first use.
fn load_catalog(config: &Config) -> Result<ShowCatalog> {
    let path = config.catalog_path()?;
    ShowCatalog::load_or_init(&path)
}

/// Parse every allowed audio file in a directory.
fn scan_directory(
    parser: &FilenameParser,
    config: &Config,
    dir: &Path,
    quiet: bool,
) -> Result<Vec<ScanEntry>> {
    let mut filenames = Vec::new();
    for entry in fs_err::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if utils::has_allowed_extension(&name, &config.app.allowed_extensions) {
            filenames.push(name);
        }
    }
    filenames.sort();

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(filenames.len() as u64)
    };
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap(),
    );

    let entries = filenames
        .into_iter()
        .map(|filename| {
            progress.set_message(filename.clone());
            let result = parser.parse(&filename);
            progress.inc(1);
            ScanEntry { filename, result }
        })
        .collect();

    progress.finish_and_clear();
    Ok(entries)
}
