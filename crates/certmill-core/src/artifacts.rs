//! Output artifact layout.
//!
//! Every file the tool promises to leave in the output directory is named
//! here, so the post-run sanity pass and the tests agree on the layout.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CaError, Result};

/// Path computation for the declared output artifacts.
#[derive(Debug, Clone)]
pub struct Artifacts {
    out: PathBuf,
}

impl Artifacts {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out: out_dir.into(),
        }
    }

    #[must_use]
    pub fn ca_cert_pem(&self) -> PathBuf {
        self.out.join("cacert.pem")
    }

    #[must_use]
    pub fn ca_cert_der(&self) -> PathBuf {
        self.out.join("cacert.der")
    }

    #[must_use]
    pub fn ca_key_pem(&self) -> PathBuf {
        self.out.join("cakey.pem")
    }

    /// The `certs.jks` truststore holding the root certificate.
    #[must_use]
    pub fn truststore(&self) -> PathBuf {
        self.out.join("certs.jks")
    }

    #[must_use]
    pub fn leaf_pub(&self, stem: &str) -> PathBuf {
        self.out.join(format!("{stem}_rsa1024_pub.pem"))
    }

    #[must_use]
    pub fn leaf_priv(&self, stem: &str) -> PathBuf {
        self.out.join(format!("{stem}_rsa1024_priv.pem"))
    }

    #[must_use]
    pub fn leaf_pfx(&self, stem: &str) -> PathBuf {
        self.out.join(format!("{stem}_rsa1024.pfx"))
    }

    #[must_use]
    pub fn leaf_jks(&self, stem: &str) -> PathBuf {
        self.out.join(format!("{stem}.jks"))
    }

    #[must_use]
    pub fn leaf_bks(&self, stem: &str) -> PathBuf {
        self.out.join(format!("{stem}.bks"))
    }

    /// Every file a successful run must leave behind for the given leaf
    /// stems. BKS keystores are only expected when the provider probe passed.
    #[must_use]
    pub fn expected(&self, stems: &[&str], with_bks: bool) -> Vec<PathBuf> {
        let mut paths = vec![
            self.ca_cert_pem(),
            self.ca_cert_der(),
            self.ca_key_pem(),
            self.truststore(),
        ];
        for stem in stems {
            paths.push(self.leaf_pub(stem));
            paths.push(self.leaf_priv(stem));
            paths.push(self.leaf_pfx(stem));
            paths.push(self.leaf_jks(stem));
            if with_bks {
                paths.push(self.leaf_bks(stem));
            }
        }
        paths
    }

    /// Fail if any declared artifact is missing or empty.
    pub fn verify(&self, stems: &[&str], with_bks: bool) -> Result<()> {
        for path in self.expected(stems, with_bks) {
            if !non_empty(&path) {
                return Err(CaError::BadArtifact(path));
            }
        }
        Ok(())
    }
}

fn non_empty(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|m| m.len() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_names_follow_the_rsa1024_convention() {
        let a = Artifacts::new("/tmp/out");
        assert_eq!(
            a.leaf_pub("server"),
            PathBuf::from("/tmp/out/server_rsa1024_pub.pem")
        );
        assert_eq!(
            a.leaf_priv("client"),
            PathBuf::from("/tmp/out/client_rsa1024_priv.pem")
        );
        assert_eq!(
            a.leaf_pfx("server"),
            PathBuf::from("/tmp/out/server_rsa1024.pfx")
        );
        assert_eq!(a.leaf_jks("client"), PathBuf::from("/tmp/out/client.jks"));
    }

    #[test]
    fn expected_set_covers_both_leaves_and_the_truststore() {
        let a = Artifacts::new("/tmp/out");
        let all = a.expected(&["server", "client"], true);
        assert_eq!(all.len(), 4 + 2 * 5);
        assert!(all.contains(&a.truststore()));
        assert!(all.contains(&a.leaf_bks("client")));

        let without_bks = a.expected(&["server", "client"], false);
        assert_eq!(without_bks.len(), 4 + 2 * 4);
    }

    #[test]
    fn verify_flags_empty_files() {
        let out = tempfile::tempdir().unwrap();
        let a = Artifacts::new(out.path());
        for path in a.expected(&["server"], false) {
            fs::write(&path, "x").unwrap();
        }
        a.verify(&["server"], false).unwrap();

        fs::write(a.truststore(), "").unwrap();
        let err = a.verify(&["server"], false).unwrap_err();
        assert!(matches!(err, CaError::BadArtifact(p) if p == a.truststore()));
    }
}
