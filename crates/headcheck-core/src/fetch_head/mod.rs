//! Response header retrieval.
//!
//! Uses the curl crate (libcurl) to send a HEAD, GET or OPTIONS request to a
//! canonical target and collect the final response's headers. Bodies are
//! never kept.

mod error;
mod parse;

use curl::easy::{Easy, List};
use std::collections::BTreeMap;
use std::str;
use std::time::Duration;

use crate::config::{ClientCert, HttpMethod, RequestConfig, TlsVerify};
use crate::header_map::HeaderMap;
use crate::target::CanonicalUrl;

pub use error::FetchError;

/// Final response of a request.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u32,
    /// URL of the response the headers came from (differs after redirects).
    pub effective_url: String,
    pub headers: HeaderMap,
}

/// Sends one request and returns the final response's headers.
///
/// Statuses >= 400 are errors; 3xx is returned as-is unless
/// `cfg.allow_redirects` is set. Runs in the current thread; call from
/// `spawn_blocking` if used from async code.
pub fn fetch(url: &CanonicalUrl, cfg: &RequestConfig) -> Result<Response, FetchError> {
    let mut lines: Vec<String> = Vec::new();

    let mut easy = Easy::new();
    let target = with_params(&mut easy, url, &cfg.params);
    easy.url(&target)?;
    match cfg.method {
        HttpMethod::Head => easy.nobody(true)?,
        HttpMethod::Get => easy.get(true)?,
        HttpMethod::Options => easy.custom_request("OPTIONS")?,
    }
    easy.follow_location(cfg.allow_redirects)?;
    easy.connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))?;
    easy.timeout(Duration::from_secs(cfg.timeout_secs))?;
    apply_tls(&mut easy, cfg)?;

    if let Some(proxy) = &cfg.proxy {
        easy.proxy(proxy)?;
    }
    if let Some(auth) = &cfg.auth {
        easy.username(&auth.username)?;
        easy.password(&auth.password)?;
    }
    if let Some(cookie) = &cfg.cookie {
        easy.cookie(cookie)?;
    }

    // Build curl list for custom headers (e.g. "Name: value").
    if !cfg.headers.is_empty() {
        let mut list = List::new();
        for (k, v) in &cfg.headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        easy.http_headers(list)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                lines.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.write_function(|data| Ok(data.len()))?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    if status == 0 {
        return Err(FetchError::NoStatus { url: target });
    }
    if status >= 400 {
        return Err(FetchError::Http {
            method: cfg.method,
            url: target,
            status,
        });
    }
    let effective_url = easy
        .effective_url()?
        .map(str::to_string)
        .unwrap_or_else(|| target.clone());

    let headers = parse::parse_final_block(&lines);
    tracing::debug!(
        url = %effective_url,
        status,
        headers = headers.len(),
        "{} completed",
        cfg.method
    );

    Ok(Response {
        status,
        effective_url,
        headers,
    })
}

fn apply_tls(easy: &mut Easy, cfg: &RequestConfig) -> Result<(), curl::Error> {
    match &cfg.verify {
        TlsVerify::Enabled(on) => {
            easy.ssl_verify_peer(*on)?;
            easy.ssl_verify_host(*on)?;
        }
        TlsVerify::CaBundle(path) => {
            easy.ssl_verify_peer(true)?;
            easy.ssl_verify_host(true)?;
            easy.cainfo(path)?;
        }
    }
    match &cfg.cert {
        Some(ClientCert::Combined(path)) => easy.ssl_cert(path)?,
        Some(ClientCert::Pair { cert, key }) => {
            easy.ssl_cert(cert)?;
            easy.ssl_key(key)?;
        }
        None => {}
    }
    Ok(())
}

/// Appends percent-encoded `params` to the target's query string.
fn with_params(easy: &mut Easy, url: &CanonicalUrl, params: &BTreeMap<String, String>) -> String {
    let mut target = url.to_string();
    if params.is_empty() {
        return target;
    }
    let encoded: Vec<String> = params
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                easy.url_encode(k.as_bytes()),
                easy.url_encode(v.as_bytes())
            )
        })
        .collect();
    target.push(if url.query.is_empty() { '?' } else { '&' });
    target.push_str(&encoded.join("&"));
    target
}
