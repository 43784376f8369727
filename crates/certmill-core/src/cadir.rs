//! The CA working directory.
//!
//! Wiped and recreated on every run: a fresh serial counter, an empty
//! certificate index, and the two rendered OpenSSL configs live here, next to
//! the CA key/cert and per-serial copies of everything issued.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CaError, Result};

/// Serial counter file, seeded `01` and incremented by `openssl ca`.
pub const SERIAL: &str = "serial";
/// Flat certificate database mutated by `openssl ca`.
pub const INDEX: &str = "index.txt";
/// Rendered config for the self-signed root.
pub const CA_CONF: &str = "ca.cnf";
/// Rendered config for leaf issuance.
pub const SIGN_CONF: &str = "sign.cnf";
/// The root certificate, as `openssl req -x509` writes it.
pub const CA_CERT: &str = "cacert.pem";
/// The root private key, via `default_keyfile`.
pub const CA_KEY: &str = "cakey.pem";

/// Handle to the `ca/` working directory under the output directory.
#[derive(Debug, Clone)]
pub struct CaDir {
    root: PathBuf,
}

impl CaDir {
    /// Delete any previous CA directory under `out_dir` and seed a fresh one.
    pub fn create(out_dir: &Path) -> Result<Self> {
        let root = out_dir.join("ca");
        if root.exists() {
            fs::remove_dir_all(&root).map_err(|e| CaError::io(&root, e))?;
        }
        fs::create_dir_all(&root).map_err(|e| CaError::io(&root, e))?;

        let dir = Self { root };
        dir.write(SERIAL, "01\n")?;
        dir.write(INDEX, "")?;
        Ok(dir)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Path of a file inside the CA directory.
    #[must_use]
    pub fn file(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Write a file inside the CA directory.
    pub fn write(&self, name: &str, contents: &str) -> Result<()> {
        let path = self.file(name);
        fs::write(&path, contents).map_err(|e| CaError::io(path, e))
    }

    /// Current value of the serial counter. `openssl ca` names the next
    /// issued certificate `<serial>.pem`, so this is read before signing.
    pub fn read_serial(&self) -> Result<String> {
        let path = self.file(SERIAL);
        let raw = fs::read_to_string(&path).map_err(|e| CaError::io(path, e))?;
        Ok(raw.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_seeds_serial_and_empty_index() {
        let out = tempfile::tempdir().unwrap();
        let dir = CaDir::create(out.path()).unwrap();

        assert_eq!(dir.read_serial().unwrap(), "01");
        let index = fs::read_to_string(dir.file(INDEX)).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn create_wipes_a_previous_ca() {
        let out = tempfile::tempdir().unwrap();
        let dir = CaDir::create(out.path()).unwrap();
        dir.write(SERIAL, "7F\n").unwrap();
        dir.write("03.pem", "stale cert").unwrap();

        let fresh = CaDir::create(out.path()).unwrap();
        assert_eq!(fresh.read_serial().unwrap(), "01");
        assert!(!fresh.file("03.pem").exists());
    }

    #[test]
    fn serial_is_trimmed() {
        let out = tempfile::tempdir().unwrap();
        let dir = CaDir::create(out.path()).unwrap();
        dir.write(SERIAL, "  0A \n").unwrap();
        assert_eq!(dir.read_serial().unwrap(), "0A");
    }
}
