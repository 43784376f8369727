//! Preflight probes for the external toolchain.
//!
//! Nothing touches the filesystem until both hard requirements answer; a
//! missing tool must abort the run before any artifact is written.

use std::process::Command;

use tracing::debug;

use crate::error::{CaError, Result};
use crate::process::Runner;

/// The TLS toolkit used for key generation, signing, and format conversion.
pub const OPENSSL: &str = "openssl";
/// The JDK tool used to build JKS/BKS keystores.
pub const KEYTOOL: &str = "keytool";

pub(crate) const BC_PROVIDER: &str = "org.bouncycastle.jce.provider.BouncyCastleProvider";

/// Results of probing for the external tools the bootstrap shells out to.
#[derive(Debug, Clone, Copy)]
pub struct Toolchain {
    /// Whether the BouncyCastle provider is visible to the JDK. Gates the
    /// Android (BKS) keystore exports; never fatal.
    pub bks_support: bool,
}

impl Toolchain {
    /// Probe for `openssl` and `keytool` (required) and BouncyCastle
    /// (optional).
    pub fn probe(runner: &Runner) -> Result<Self> {
        require(
            runner,
            OPENSSL,
            &["version"],
            "install OpenSSL, it is required to generate the certificates",
        )?;
        require(
            runner,
            KEYTOOL,
            &["-help"],
            "make sure the Java bin directory is on your PATH, \
             keytool is required to generate the Java keystores",
        )?;

        let bks_support = probe_bks(runner);
        debug!(bks_support, "toolchain probe complete");

        Ok(Self { bks_support })
    }
}

fn require(runner: &Runner, tool: &str, args: &[&str], hint: &str) -> Result<()> {
    match runner.capture(Command::new(tool).args(args)) {
        Ok((true, _)) => Ok(()),
        Ok((false, _)) | Err(CaError::ToolMissing { .. }) => Err(CaError::ToolMissing {
            tool: tool.to_string(),
            hint: hint.to_string(),
        }),
        Err(other) => Err(other),
    }
}

// `javap` resolving the provider class means keytool will be able to load it
// too. `javap` itself missing is treated the same as the class being absent.
fn probe_bks(runner: &Runner) -> bool {
    runner
        .capture(Command::new("javap").arg(BC_PROVIDER))
        .map(|(ok, _)| ok)
        .unwrap_or(false)
}
