//! OpenSSL configuration rendering.
//!
//! Two config files are written into the CA directory on every run: `ca.cnf`
//! drives the self-signed root, `sign.cnf` drives `openssl ca` when issuing
//! leaf certificates. Both carry the same distinguished-name profile; only the
//! common name varies per certificate.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fixed distinguished-name fields shared by the CA and every issued
/// certificate. The common name is supplied per certificate.
///
/// The issuance policy in `sign.cnf` requires country, state, and organization
/// to match between the CA and the leaf, so all of them come from this one
/// profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DnProfile {
    pub country: String,
    pub state: String,
    pub locality: String,
    pub organization: String,
    pub organizational_unit: String,
    pub email: String,
    /// Common name of the root certificate itself.
    pub ca_common_name: String,
}

impl Default for DnProfile {
    fn default() -> Self {
        Self {
            country: "US".to_string(),
            state: "California".to_string(),
            locality: "San Francisco".to_string(),
            organization: "Certmill".to_string(),
            organizational_unit: "Engineering".to_string(),
            email: "dev@certmill.local".to_string(),
            ca_common_name: "Certmill Development CA".to_string(),
        }
    }
}

/// Render the config for the self-signed root certificate.
pub fn ca_conf(ca_home: &Path, dn: &DnProfile, days: u32) -> String {
    format!(
        "\
# OpenSSL configuration for the self-signed root certificate.
# Written by certmill on every run; do not edit.

[ ca ]
default_ca = certmill

[ certmill ]
default_days     = {days}
default_md       = sha256
preserve         = no

[ req ]
default_bits        = 2048
default_keyfile     = {home}/cakey.pem
default_md          = sha256
prompt              = no
distinguished_name  = dn
x509_extensions     = extensions

[ extensions ]
basicConstraints = CA:true

# PKIX recommendation.
subjectKeyIdentifier = hash
authorityKeyIdentifier = keyid:always,issuer:always

[dn]
countryName            = {country}
stateOrProvinceName    = {state}
localityName           = {locality}
organizationName       = {organization}
organizationalUnitName = {unit}
commonName             = {cn}
emailAddress           = {email}
",
        days = days,
        home = conf_path(ca_home),
        country = dn.country,
        state = dn.state,
        locality = dn.locality,
        organization = dn.organization,
        unit = dn.organizational_unit,
        cn = dn.ca_common_name,
        email = dn.email,
    )
}

/// Render the config used to issue one leaf certificate.
///
/// `san` is a pre-rendered `subjectAltName` line from [`san_line`] (possibly
/// empty).
pub fn sign_conf(ca_home: &Path, dn: &DnProfile, days: u32, common_name: &str, san: &str) -> String {
    format!(
        "\
# OpenSSL configuration used to issue a certificate.
# Written by certmill on every run; do not edit.

[ ca ]
default_ca = certmill

[ certmill ]
dir              = {home}
private_key      = $dir/cakey.pem
certificate      = $dir/cacert.pem
database         = $dir/index.txt
new_certs_dir    = $dir
serial           = $dir/serial
certs            = $dir
RANDFILE         = $dir/.rand
default_days     = {days}
default_md       = sha256
preserve         = yes

policy           = ca_policy
x509_extensions  = certificate_extensions

[ certificate_extensions ]
basicConstraints = CA:false

# PKIX recommendation.
subjectKeyIdentifier = hash
authorityKeyIdentifier = keyid:always,issuer:always
{san}
[ ca_policy ]
countryName            = match
stateOrProvinceName    = match
organizationName       = match
organizationalUnitName = optional
emailAddress           = optional
commonName             = supplied

[ req ]
default_bits        = 1024
default_md          = sha256
prompt              = no
distinguished_name  = dn
x509_extensions     = extensions

[ extensions ]
basicConstraints = CA:false

# PKIX recommendation.
subjectKeyIdentifier = hash
authorityKeyIdentifier = keyid:always,issuer:always
keyUsage = nonRepudiation, digitalSignature, keyEncipherment

[dn]
countryName            = {country}
stateOrProvinceName    = {state}
localityName           = {locality}
organizationName       = {organization}
organizationalUnitName = {unit}
commonName             = {cn}
emailAddress           = {email}
",
        home = conf_path(ca_home),
        days = days,
        san = san,
        country = dn.country,
        state = dn.state,
        locality = dn.locality,
        organization = dn.organization,
        unit = dn.organizational_unit,
        cn = common_name,
        email = dn.email,
    )
}

/// Render the `subjectAltName` extension line, or an empty string when
/// neither a hostname nor an IP is known.
pub fn san_line(hostname: Option<&str>, ip: Option<&str>) -> String {
    let entries: Vec<String> = hostname
        .iter()
        .map(|h| format!("DNS:{h}"))
        .chain(ip.iter().map(|i| format!("IP:{i}")))
        .collect();

    if entries.is_empty() {
        String::new()
    } else {
        format!("subjectAltName = {}\n", entries.join(", "))
    }
}

// OpenSSL treats backslashes in config values as escapes, so Windows paths
// must be written with forward slashes.
fn conf_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn home() -> PathBuf {
        PathBuf::from("/tmp/certs/ca")
    }

    #[test]
    fn ca_conf_points_key_into_ca_home() {
        let conf = ca_conf(&home(), &DnProfile::default(), 1825);
        assert!(conf.contains("default_keyfile     = /tmp/certs/ca/cakey.pem"));
        assert!(conf.contains("default_days     = 1825"));
        assert!(conf.contains("basicConstraints = CA:true"));
        assert!(conf.contains("commonName             = Certmill Development CA"));
    }

    #[test]
    fn sign_conf_carries_common_name_and_san() {
        let san = san_line(Some("devbox"), Some("192.168.1.20"));
        let conf = sign_conf(&home(), &DnProfile::default(), 1825, "devbox", &san);
        assert!(conf.contains("commonName             = devbox"));
        assert!(conf.contains("subjectAltName = DNS:devbox, IP:192.168.1.20"));
        assert!(conf.contains("database         = $dir/index.txt"));
        assert!(conf.contains("serial           = $dir/serial"));
        assert!(conf.contains("basicConstraints = CA:false"));
    }

    #[test]
    fn san_line_handles_partial_identities() {
        assert_eq!(san_line(None, None), "");
        assert_eq!(san_line(Some("devbox"), None), "subjectAltName = DNS:devbox\n");
        assert_eq!(
            san_line(None, Some("10.0.0.5")),
            "subjectAltName = IP:10.0.0.5\n"
        );
    }

    #[test]
    fn windows_paths_are_rewritten_for_openssl() {
        assert_eq!(conf_path(Path::new(r"C:\certs\ca")), "C:/certs/ca");
    }
}
