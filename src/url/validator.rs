use crate::{ValidationError, ValidationResult};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use url::{Host, Url};

/// Schemes a target may use
const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

/// Host names that never point outside the local machine
const BLOCKED_HOSTNAMES: &[&str] = &["localhost", "localhost.localdomain"];

/// Longest DNS label (RFC 1034)
const MAX_LABEL_LEN: usize = 63;

/// Validates a user supplied target URL
///
/// Rejects empty input, schemes other than http(s), malformed host names and
/// IP literals that are not globally routable, so the crawler cannot be
/// pointed at internal infrastructure.
///
/// # Examples
///
/// ```
/// use wpoke::url::validate_url;
///
/// assert!(validate_url("https://example.com/").is_ok());
/// assert!(validate_url("http://127.0.0.1/").is_err());
/// assert!(validate_url("ftp://example.com/").is_err());
/// ```
pub fn validate_url(value: &str) -> ValidationResult<()> {
    parse_target(value).map(|_| ())
}

/// Validates a target URL and returns it parsed
pub fn parse_target(value: &str) -> ValidationResult<Url> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Empty);
    }

    let url = Url::parse(value).map_err(|e| ValidationError::Malformed(e.to_string()))?;

    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        return Err(ValidationError::InvalidScheme(url.scheme().to_string()));
    }

    match url.host() {
        None => return Err(ValidationError::MissingHost),
        Some(Host::Domain(name)) => validate_hostname(name)?,
        Some(Host::Ipv4(ip)) => validate_ip(IpAddr::V4(ip))?,
        Some(Host::Ipv6(ip)) => validate_ip(IpAddr::V6(ip))?,
    }

    Ok(url)
}

fn validate_ip(ip: IpAddr) -> ValidationResult<()> {
    if is_global(ip) {
        Ok(())
    } else {
        Err(ValidationError::ForbiddenAddress(ip))
    }
}

/// Host names need at least one dot and an alphabetic (or punycode) top level label
fn validate_hostname(name: &str) -> ValidationResult<()> {
    let name = name.strip_suffix('.').unwrap_or(name).to_ascii_lowercase();
    let invalid = || ValidationError::InvalidHost(name.clone());

    if BLOCKED_HOSTNAMES.contains(&name.as_str()) {
        return Err(invalid());
    }

    let labels: Vec<&str> = name.split('.').collect();
    if labels.len() < 2 {
        return Err(invalid());
    }

    for label in &labels {
        if label.is_empty()
            || label.len() > MAX_LABEL_LEN
            || label.starts_with('-')
            || label.ends_with('-')
            || !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(invalid());
        }
    }

    let tld = labels[labels.len() - 1];
    let tld_ok = tld.starts_with("xn--")
        || (tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));
    if !tld_ok {
        return Err(invalid());
    }

    Ok(())
}

/// Returns true if the address is reachable on the public internet
///
/// Mirrors the IANA special-purpose registries: private, loopback,
/// link-local, unspecified, multicast, documentation, benchmarking, shared
/// address space and reserved blocks are all non-global.
pub fn is_global(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(ip) => is_global_v4(ip),
        IpAddr::V6(ip) => is_global_v6(ip),
    }
}

fn is_global_v4(ip: Ipv4Addr) -> bool {
    let [a, b, c, _] = ip.octets();

    let this_network = a == 0;
    let shared = a == 100 && (b & 0b1100_0000) == 64;
    let protocol_assignments = a == 192 && b == 0 && c == 0;
    let benchmarking = a == 198 && (b & 0xfe) == 18;
    let reserved = a >= 240;

    !(this_network
        || ip.is_private()
        || ip.is_loopback()
        || ip.is_link_local()
        || ip.is_multicast()
        || ip.is_broadcast()
        || ip.is_documentation()
        || shared
        || protocol_assignments
        || benchmarking
        || reserved)
}

fn is_global_v6(ip: Ipv6Addr) -> bool {
    if let Some(mapped) = ip.to_ipv4_mapped() {
        return is_global_v4(mapped);
    }

    let segments = ip.segments();

    let nat64_local = segments[0] == 0x64 && segments[1] == 0xff9b && segments[2] == 1;
    let discard = segments[0] == 0x100 && segments[1] == 0 && segments[2] == 0 && segments[3] == 0;
    let ietf_assignments = segments[0] == 0x2001 && segments[1] < 0x200;
    let documentation = (segments[0] == 0x2001 && segments[1] == 0xdb8)
        || (segments[0] == 0x3fff && segments[1] < 0x1000);
    let six_to_four = segments[0] == 0x2002;
    let unique_local = (segments[0] & 0xfe00) == 0xfc00;
    let link_local = (segments[0] & 0xffc0) == 0xfe80;
    let site_local = (segments[0] & 0xffc0) == 0xfec0;

    !(ip.is_unspecified()
        || ip.is_loopback()
        || ip.is_multicast()
        || nat64_local
        || discard
        || ietf_assignments
        || documentation
        || six_to_four
        || unique_local
        || link_local
        || site_local)
}
