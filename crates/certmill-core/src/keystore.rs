//! Java keystore exports via `keytool`.

use std::path::Path;
use std::process::Command;

use tracing::warn;

use crate::error::{CaError, Result};
use crate::process::Runner;
use crate::tools::{BC_PROVIDER, KEYTOOL};

/// Import the DER root certificate into a fresh JKS truststore.
pub fn import_truststore(runner: &Runner, der: &Path, store: &Path, password: &str) -> Result<()> {
    let mut cmd = Command::new(KEYTOOL);
    cmd.args(["-import", "-alias", "cacert", "-file"])
        .arg(der)
        .arg("-keystore")
        .arg(store)
        .args(["-storepass", password, "-noprompt"]);
    runner.run(&mut cmd)
}

/// Convert a PKCS#12 bundle (key + chain under `alias`) into a JKS keystore.
pub fn pkcs12_to_jks(
    runner: &Runner,
    p12: &Path,
    jks: &Path,
    alias: &str,
    password: &str,
) -> Result<()> {
    let mut cmd = Command::new(KEYTOOL);
    cmd.arg("-importkeystore")
        .arg("-srckeystore")
        .arg(p12)
        .args(["-srcstoretype", "PKCS12"])
        .arg("-destkeystore")
        .arg(jks)
        .args(["-deststoretype", "JKS"])
        .args(["-srcstorepass", password])
        .args(["-deststorepass", password])
        .args(["-srcalias", alias, "-noprompt"]);
    runner.run(&mut cmd)
}

/// Convert a JKS keystore to Android's BKS format via the BouncyCastle
/// provider.
///
/// Two known environment problems are downgraded to a warning and `Ok(false)`
/// so the rest of the run can finish: the provider class not being on the
/// JDK's classpath after all, and a JCE policy that rejects the key strength.
/// Any other failure is fatal.
pub fn jks_to_bks(runner: &Runner, jks: &Path, bks: &Path, password: &str) -> Result<bool> {
    let mut cmd = Command::new(KEYTOOL);
    cmd.arg("-importkeystore")
        .arg("-srckeystore")
        .arg(jks)
        .args(["-srcstoretype", "JKS"])
        .arg("-destkeystore")
        .arg(bks)
        .args(["-deststoretype", "BKS"])
        .args(["-srcstorepass", password])
        .args(["-deststorepass", password])
        .args(["-provider", BC_PROVIDER, "-noprompt"]);

    let line = crate::process::render_command(&cmd);
    let (ok, output) = runner.capture(&mut cmd)?;
    if ok {
        return Ok(true);
    }

    if output.contains("java.lang.ClassNotFoundException") {
        warn!(
            "BouncyCastle provider not found, {} will not be written; \
             download the provider JAR from https://www.bouncycastle.org/ \
             and add it to your JDK",
            bks.display()
        );
        return Ok(false);
    }
    if output.contains("java.security.InvalidKeyException") || output.contains("Illegal key size")
    {
        warn!(
            "JDK rejected the key strength, {} will not be written; \
             install the JCE unlimited strength policy files",
            bks.display()
        );
        return Ok(false);
    }

    Err(CaError::CommandFailed {
        command: line,
        output,
    })
}
