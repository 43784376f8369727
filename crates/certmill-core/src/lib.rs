//! Core engine for the certmill development CA.
//!
//! This crate drives two external tools, `openssl` and the JDK's `keytool`,
//! to bootstrap a throwaway certificate authority and issue a server/client
//! certificate pair for local TLS testing:
//!
//! - **Toolchain**: probes for the required binaries before any work starts
//! - **CaDir**: the wiped-and-recreated CA working directory (serial, index)
//! - **CertificateAuthority**: self-signs the root and issues leaf certificates,
//!   exporting PEM, PKCS#12, JKS, and (when BouncyCastle is present) BKS
//!
//! # Example
//!
//! ```rust,ignore
//! use certmill_core::{CaOptions, CertificateAuthority, Toolchain};
//!
//! let toolchain = Toolchain::probe()?;
//! let ca = CertificateAuthority::bootstrap(CaOptions::new("."), toolchain)?;
//! ca.issue("server", "localhost")?;
//! ca.issue("client", "client")?;
//! ```

mod artifacts;
mod cadir;
mod conf;
mod error;
mod issue;
mod keystore;
pub mod net;
mod process;
mod tools;

pub use artifacts::Artifacts;
pub use cadir::CaDir;
pub use conf::DnProfile;
pub use error::{CaError, Result};
pub use issue::{CaOptions, CertificateAuthority};
pub use process::Runner;
pub use tools::Toolchain;
