//! Host (netloc) shape checks.

use super::error::UrlError;

/// Checks the generic domain shape, then the dotted-quad rule for hosts made
/// only of digits and dots.
pub(crate) fn validate_host(host: &str) -> Result<(), UrlError> {
    if host.is_empty()
        || !host.contains('.')
        || host.contains("..")
        || host.starts_with('.')
        || host.ends_with('.')
    {
        return Err(UrlError::MalformedHost);
    }

    if is_dotted_numeric(host) {
        validate_ipv4_literal(host)?;
    }

    Ok(())
}

/// True when every character is an ASCII digit or `.` (`192.168`, `1.2.3.4`).
/// `192.amazon.com` or `10.0.0.1:8080` are not dotted-numeric.
fn is_dotted_numeric(host: &str) -> bool {
    host.chars().all(|c| c.is_ascii_digit() || c == '.')
}

fn validate_ipv4_literal(host: &str) -> Result<(), UrlError> {
    let octets: Vec<&str> = host.split('.').collect();
    if octets.len() != 4 {
        return Err(UrlError::InvalidIpv4Literal);
    }
    // u8 parsing rejects anything above 255, including very long digit runs.
    if octets.iter().any(|o| o.parse::<u8>().is_err()) {
        return Err(UrlError::InvalidIpv4Literal);
    }
    Ok(())
}
