//! `headcheck scan` – request targets and report their security headers.

use anyhow::{bail, Result};
use headcheck_core::config::{self, HeadcheckConfig, HttpMethod};
use headcheck_core::registry::ChecklistKind;
use headcheck_core::render::{ConsoleRenderer, JsonRenderer, Output, Renderer};
use headcheck_core::scan::{self, ScanRequest};
use std::io;
use std::sync::Arc;

use crate::cli::ScanArgs;

pub async fn run_scan(args: &ScanArgs) -> Result<()> {
    let mut cfg = config::load_or_init()?;
    apply_overrides(&mut cfg, args);
    cfg.validate()?;
    tracing::debug!("effective config: {:?}", cfg);

    let targets = match (&args.url, &args.file) {
        (Some(url), _) => vec![url.clone()],
        (None, Some(path)) => scan::read_targets(path)?,
        (None, None) => bail!("either --url or --file is required"),
    };
    if targets.is_empty() {
        bail!("no targets to scan");
    }

    let request = scan_request(args);
    let results = scan::scan_batch(
        targets,
        Arc::new(cfg.request.clone()),
        Arc::new(request),
        cfg.scan.max_in_flight,
    )
    .await;

    let stdout = io::stdout().lock();
    let mut renderer: Box<dyn Renderer> = if args.json {
        Box::new(JsonRenderer::new(stdout))
    } else {
        Box::new(ConsoleRenderer::new(stdout, cfg.scan.color).show_other_headers(args.all_headers))
    };
    if !args.json && !args.no_banner {
        renderer.render(&Output::Banner)?;
    }
    scan::emit(&results, renderer.as_mut())?;
    renderer.finish()?;

    let failed = results.iter().filter(|r| r.is_err()).count();
    if failed > 0 {
        bail!("{} of {} targets failed", failed, results.len());
    }
    Ok(())
}

/// CLI flags win over the config file.
pub(crate) fn apply_overrides(cfg: &mut HeadcheckConfig, args: &ScanArgs) {
    let req = &mut cfg.request;
    if args.get {
        req.method = HttpMethod::Get;
    } else if let Some(method) = args.method {
        req.method = method;
    }
    if let Some(cookie) = &args.cookie {
        req.cookie = Some(cookie.clone());
    }
    if let Some(proxy) = &args.proxy {
        req.proxy = Some(proxy.clone());
    }
    if let Some(timeout) = args.timeout {
        req.timeout_secs = timeout;
    }
    if args.follow_redirects {
        req.allow_redirects = true;
    }
    for (name, value) in &args.headers {
        req.headers.insert(name.clone(), value.clone());
    }
    if let Some(n) = args.concurrency {
        cfg.scan.max_in_flight = n;
    }
    if let Some(color) = args.color {
        cfg.scan.color = color;
    }
}

pub(crate) fn scan_request(args: &ScanArgs) -> ScanRequest {
    let mut extra = Vec::new();
    if args.deprecated {
        extra.push(ChecklistKind::Deprecated);
    }
    if args.information {
        extra.push(ChecklistKind::Informational);
    }
    if args.cache {
        extra.push(ChecklistKind::Caching);
    }
    ScanRequest {
        extra,
        read: args.read.clone(),
    }
}
