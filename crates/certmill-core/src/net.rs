//! Default hostname and IP detection for the server certificate.

use std::net::ToSocketAddrs;

/// Hostname reported by the OS, falling back to `localhost`.
pub fn default_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}

/// Resolve `host` to an address for the certificate's IP entry.
///
/// Prefers IPv4 (what local test clients almost always dial), falling back to
/// `127.0.0.1` when the hostname doesn't resolve at all.
pub fn default_ip(host: &str) -> String {
    let addrs: Vec<_> = (host, 0)
        .to_socket_addrs()
        .map(Iterator::collect)
        .unwrap_or_default();

    addrs
        .iter()
        .find(|a| a.is_ipv4())
        .or_else(|| addrs.first())
        .map_or_else(|| "127.0.0.1".to_string(), |a| a.ip().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hostname_is_never_empty() {
        assert!(!default_hostname().is_empty());
    }

    #[test]
    fn unresolvable_host_falls_back_to_loopback() {
        assert_eq!(default_ip("no-such-host.certmill.invalid"), "127.0.0.1");
    }

    #[test]
    fn localhost_resolves_to_loopback() {
        let ip = default_ip("localhost");
        assert!(ip == "127.0.0.1" || ip == "::1", "got {ip}");
    }
}
