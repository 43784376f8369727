//! CLI argument parsing and the bootstrap run.

pub mod args;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use args::Cli;
use certmill_core::{net, CaOptions, CertificateAuthority, Runner, Toolchain};

use crate::config::Config;
use crate::prompt;

/// Run the CLI application.
pub fn run() -> Result<()> {
    let cli = parse();
    init_tracing(cli.debug);
    debug!(?cli, "parsed arguments");

    let config = Config::load()?;

    // Nothing is written until both external tools answer.
    let runner = Runner::new(cli.debug);
    let toolchain = Toolchain::probe(&runner)?;
    if !toolchain.bks_support {
        eprintln!(
            "{} BouncyCastle provider not found, Android (BKS) keystores will be skipped",
            "warning:".yellow().bold()
        );
    }

    let detected_hostname = cli.hostname.clone().unwrap_or_else(net::default_hostname);
    let detected_ip = cli
        .ip_address
        .clone()
        .unwrap_or_else(|| net::default_ip(&detected_hostname));

    let ip = prompt::confirm_value("IP address", detected_ip, cli.yes)?;
    let hostname = prompt::confirm_value("hostname", detected_hostname, cli.yes)?;

    // The server certificate's CN follows the confirmed hostname unless the
    // run was pinned to an IP address only.
    let common_name = if cli.hostname.is_none() && cli.ip_address.is_some() {
        ip.clone()
    } else {
        hostname.clone()
    };

    let opts = CaOptions {
        out_dir: cli.out_dir.clone(),
        dn: config.dn,
        days: config.validity_days,
        password: config.store_password,
        hostname: Some(hostname),
        ip_address: Some(ip),
        debug: cli.debug,
    };

    print!("Generating new CA certificate and key... ");
    flush();
    let ca = CertificateAuthority::bootstrap(opts, toolchain)
        .context("failed to generate the CA certificate")?;
    println!("{}", "ok".green());

    let mut all_bks = toolchain.bks_support;
    for (stem, cn) in [("server", common_name.as_str()), ("client", "client")] {
        print!("Generating new {stem} certificates... ");
        flush();
        let bks = ca
            .issue(stem, cn)
            .with_context(|| format!("failed to issue the {stem} certificate"))?;
        all_bks &= bks;
        println!("{}", "ok".green());
    }

    ca.artifacts()
        .verify(&["server", "client"], all_bks)
        .context("a declared artifact is missing after the run")?;

    println!();
    println!(
        "{} certificates written to {}",
        "Done:".green().bold(),
        cli.out_dir.display()
    );

    Ok(())
}

// clap's own error exit code is 2; this tool promises 1 for bad arguments.
fn parse() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = i32::from(err.use_stderr());
            let _ = err.print();
            std::process::exit(code);
        }
    }
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn flush() {
    use std::io::Write;
    let _ = std::io::stdout().flush();
}
