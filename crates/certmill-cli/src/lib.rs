//! # certmill-cli
//!
//! Command-line front end for the certmill development CA.
//!
//! ## Features
//!
//! - **One-shot bootstrap**: wipes the previous CA and issues a fresh
//!   server/client certificate pair on every run
//! - **Interactive identity**: confirms or overrides the detected hostname
//!   and IP address on stdin (`--yes` to skip)
//! - **Every container format**: PEM, PKCS#12, JKS, and (with BouncyCastle)
//!   BKS, plus a `certs.jks` truststore

pub mod cli;
pub mod config;
pub mod prompt;

pub use cli::run;
