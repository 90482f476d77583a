//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `domain_validator` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Collecting domains from arguments and list files
//! - User-facing output and exit codes
//!
//! Exit codes: 0 when every domain passed, 2 when any domain failed, 1 when
//! the run could not be set up.

use anyhow::{bail, Context, Result};
use std::process;
use structopt::StructOpt;

use domain_validator::config::{Opt, OutputFormat};
use domain_validator::initialization::{init_crypto_provider, init_logger_with};
use domain_validator::input::read_domain_list;
use domain_validator::output::{render, render_summary};
use domain_validator::{run_validation, DomainQuery};

const EXIT_VALIDATION_FAILED: i32 = 2;
const EXIT_SETUP_ERROR: i32 = 1;

#[tokio::main]
async fn main() {
    let opt = Opt::from_args();

    match run(opt).await {
        Ok(true) => {}
        Ok(false) => process::exit(EXIT_VALIDATION_FAILED),
        Err(e) => {
            eprintln!("domain_validator error: {:#}", e);
            process::exit(EXIT_SETUP_ERROR);
        }
    }
}

/// Runs the batch; `Ok(true)` if every domain passed.
async fn run(opt: Opt) -> Result<bool> {
    let config = opt.to_config();
    config.validate().context("Invalid configuration")?;

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    // Initialize crypto provider for TLS operations
    init_crypto_provider();

    let queries = collect_queries(&opt).await?;
    let run = run_validation(&queries, &config).await?;

    let rendered = render(&run.reports, &opt.output).context("Failed to render reports")?;
    println!("{rendered}");
    if opt.output == OutputFormat::Text {
        print!("{}", render_summary(&run.stats));
    }

    Ok(run.all_passed())
}

/// Positional domains first, then the list file, each with the shared
/// expectations.
async fn collect_queries(opt: &Opt) -> Result<Vec<DomainQuery>> {
    let mut domains = opt.domains.clone();
    if let Some(path) = &opt.file {
        domains.extend(read_domain_list(path).await?);
    }
    if domains.is_empty() {
        bail!("no domains given; pass them as arguments or with --file");
    }

    domains
        .iter()
        .map(|domain| {
            DomainQuery::new(
                domain,
                opt.expected_ip.as_deref(),
                opt.expected_cname.as_deref(),
            )
            .with_context(|| format!("Invalid domain argument {domain:?}"))
        })
        .collect()
}
