//! CA bootstrap and certificate issuance.
//!
//! The procedure is a classic `openssl ca` workflow: self-sign the root with
//! `ca.cnf`, then for each leaf render `sign.cnf`, create a key and CSR, sign
//! the request in batch mode, and fan the result out into the container
//! formats (PEM pair, PKCS#12, JKS, and optionally BKS).

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::info;

use crate::artifacts::Artifacts;
use crate::cadir::{self, CaDir};
use crate::conf::{self, DnProfile};
use crate::error::{CaError, Result};
use crate::keystore;
use crate::process::Runner;
use crate::tools::{Toolchain, OPENSSL};

/// Everything the bootstrap needs to know up front.
#[derive(Debug, Clone)]
pub struct CaOptions {
    /// Directory the artifacts land in. The CA working directory is `ca/`
    /// underneath it.
    pub out_dir: PathBuf,
    /// Distinguished-name fields shared by the root and every leaf.
    pub dn: DnProfile,
    /// Validity in days for the root and the issued certificates.
    pub days: u32,
    /// Password protecting the PKCS#12 bundles and every keystore.
    pub password: String,
    /// Hostname for the subjectAltName extension.
    pub hostname: Option<String>,
    /// IP address for the subjectAltName extension.
    pub ip_address: Option<String>,
    /// Echo external commands and stream their output.
    pub debug: bool,
}

impl CaOptions {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            dn: DnProfile::default(),
            days: 1825,
            password: "password".to_string(),
            hostname: None,
            ip_address: None,
            debug: false,
        }
    }
}

/// A bootstrapped CA, ready to issue leaf certificates.
pub struct CertificateAuthority {
    ca_dir: CaDir,
    artifacts: Artifacts,
    runner: Runner,
    toolchain: Toolchain,
    opts: CaOptions,
}

impl CertificateAuthority {
    /// Wipe any previous CA under `opts.out_dir`, self-sign a fresh root,
    /// and import it into the `certs.jks` truststore.
    pub fn bootstrap(opts: CaOptions, toolchain: Toolchain) -> Result<Self> {
        let runner = Runner::new(opts.debug);

        fs::create_dir_all(&opts.out_dir).map_err(|e| CaError::io(&opts.out_dir, e))?;
        let ca_dir = CaDir::create(&opts.out_dir)?;
        let artifacts = Artifacts::new(&opts.out_dir);

        ca_dir.write(
            cadir::CA_CONF,
            &conf::ca_conf(ca_dir.path(), &opts.dn, opts.days),
        )?;

        // Self-signed root; the private key lands at cakey.pem via the
        // config's default_keyfile.
        let ca_cert = ca_dir.file(cadir::CA_CERT);
        let mut cmd = Command::new(OPENSSL);
        cmd.args(["req", "-config"])
            .arg(ca_dir.file(cadir::CA_CONF))
            .args(["-x509", "-days", &opts.days.to_string()])
            .args(["-newkey", "rsa:1024", "-out"])
            .arg(&ca_cert)
            .args(["-outform", "PEM", "-nodes"]);
        runner.run(&mut cmd)?;

        // DER copy for keytool.
        let der = artifacts.ca_cert_der();
        let mut cmd = Command::new(OPENSSL);
        cmd.args(["x509", "-in"])
            .arg(&ca_cert)
            .args(["-outform", "DER", "-out"])
            .arg(&der);
        runner.run(&mut cmd)?;

        copy(&ca_cert, &artifacts.ca_cert_pem())?;
        copy(&ca_dir.file(cadir::CA_KEY), &artifacts.ca_key_pem())?;

        let truststore = artifacts.truststore();
        remove_if_present(&truststore)?;
        keystore::import_truststore(&runner, &der, &truststore, &opts.password)?;

        info!(ca = %ca_dir.path().display(), "root certificate generated");

        Ok(Self {
            ca_dir,
            artifacts,
            runner,
            toolchain,
            opts,
        })
    }

    /// Issue one leaf certificate and export every container format.
    ///
    /// `stem` names the output files; `common_name` becomes the subject CN.
    /// Returns whether the BKS keystore was written too.
    pub fn issue(&self, stem: &str, common_name: &str) -> Result<bool> {
        let san = conf::san_line(
            self.opts.hostname.as_deref(),
            self.opts.ip_address.as_deref(),
        );
        self.ca_dir.write(
            cadir::SIGN_CONF,
            &conf::sign_conf(
                self.ca_dir.path(),
                &self.opts.dn,
                self.opts.days,
                common_name,
                &san,
            ),
        )?;
        let sign_conf = self.ca_dir.file(cadir::SIGN_CONF);

        let pub_pem = self.artifacts.leaf_pub(stem);
        let priv_pem = self.artifacts.leaf_priv(stem);
        remove_if_present(&pub_pem)?;
        remove_if_present(&priv_pem)?;

        // The signer writes <serial>.pem into the CA dir, so read the counter
        // before it is bumped.
        let serial = self.ca_dir.read_serial()?;
        let tmp_key = self.ca_dir.file(&format!("{serial}_key.pem"));
        let tmp_cert = self.ca_dir.file(&format!("{serial}_cert.pem"));
        let req = self.ca_dir.file("req.pem");

        let mut cmd = Command::new(OPENSSL);
        cmd.args(["req", "-config"])
            .arg(&sign_conf)
            .args(["-newkey", "rsa:1024", "-nodes", "-keyout"])
            .arg(&tmp_key)
            .args(["-keyform", "PEM", "-out"])
            .arg(&req);
        self.runner.run(&mut cmd)?;

        let mut cmd = Command::new(OPENSSL);
        cmd.args(["ca", "-config"])
            .arg(&sign_conf)
            .args(["-batch", "-in"])
            .arg(&req);
        self.runner.run(&mut cmd)?;

        let signed = self.ca_dir.file(&format!("{serial}.pem"));
        if !signed.exists() {
            return Err(CaError::MissingSignedCert(signed));
        }
        fs::rename(&signed, &tmp_cert).map_err(|e| CaError::io(&tmp_cert, e))?;
        copy(&tmp_key, &priv_pem)?;
        copy(&tmp_cert, &pub_pem)?;
        remove_if_present(&req)?;

        // PKCS#12 bundle.
        let pfx = self.artifacts.leaf_pfx(stem);
        let mut cmd = Command::new(OPENSSL);
        cmd.args(["pkcs12", "-in"])
            .arg(&pub_pem)
            .arg("-inkey")
            .arg(&priv_pem)
            .args(["-export", "-out"])
            .arg(&pfx)
            .arg("-passout")
            .arg(format!("pass:{}", self.opts.password))
            .args(["-name", stem]);
        self.runner.run(&mut cmd)?;

        // Java keystore, via a throwaway PKCS#12 that carries the CA chain.
        let p12 = self.opts.out_dir.join(format!("{stem}.p12"));
        let mut cmd = Command::new(OPENSSL);
        cmd.args(["pkcs12", "-in"])
            .arg(&pub_pem)
            .arg("-inkey")
            .arg(&priv_pem)
            .args(["-export", "-out"])
            .arg(&p12)
            .args(["-name", "rsakey"])
            .arg("-passout")
            .arg(format!("pass:{}", self.opts.password))
            .arg("-certfile")
            .arg(self.artifacts.ca_cert_pem());
        self.runner.run(&mut cmd)?;

        let jks = self.artifacts.leaf_jks(stem);
        remove_if_present(&jks)?;
        keystore::pkcs12_to_jks(&self.runner, &p12, &jks, "rsakey", &self.opts.password)?;
        remove_if_present(&p12)?;

        // Android keystore, when the provider probe passed.
        if self.toolchain.bks_support {
            let bks = self.artifacts.leaf_bks(stem);
            remove_if_present(&bks)?;
            return keystore::jks_to_bks(&self.runner, &jks, &bks, &self.opts.password);
        }

        Ok(false)
    }

    #[must_use]
    pub fn artifacts(&self) -> &Artifacts {
        &self.artifacts
    }
}

fn copy(from: &Path, to: &Path) -> Result<()> {
    fs::copy(from, to)
        .map(drop)
        .map_err(|e| CaError::io(to, e))
}

fn remove_if_present(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(CaError::io(path, e)),
    }
}
