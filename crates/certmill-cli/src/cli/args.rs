//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

/// Bootstrap a private development CA and issue a server/client certificate
/// pair for local TLS testing
///
/// Wipes and recreates the CA working directory on every run, then exports
/// the issued certificates as PEM, PKCS#12, JKS, and BKS containers.
#[derive(Parser, Debug)]
#[command(name = "certmill")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Echo external commands and stream their output
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// IP address for the server certificate (detected if omitted)
    #[arg(long, value_name = "ADDR")]
    pub ip_address: Option<String>,

    /// Hostname for the server certificate (detected if omitted)
    #[arg(long, value_name = "NAME")]
    pub hostname: Option<String>,

    /// Accept the detected hostname and IP address without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Directory where certificate artifacts are written
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::parse_from([
            "certmill",
            "-d",
            "--hostname",
            "devbox",
            "--ip-address",
            "10.1.2.3",
        ]);
        assert!(cli.debug);
        assert!(!cli.yes);
        assert_eq!(cli.hostname.as_deref(), Some("devbox"));
        assert_eq!(cli.ip_address.as_deref(), Some("10.1.2.3"));
        assert_eq!(cli.out_dir, PathBuf::from("."));
    }
}
