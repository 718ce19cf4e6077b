use super::*;
use crate::config::ColorMode;
use crate::header_map::HeaderMap;
use crate::render::{ConsoleRenderer, JsonRenderer};
use crate::target::RejectedScheme;

fn response(headers: &[(&str, &str)]) -> Response {
    Response {
        status: 200,
        effective_url: "https://example.com/".to_string(),
        headers: headers.iter().copied().collect::<HeaderMap>(),
    }
}

#[test]
fn expected_checklist_always_first_and_extras_deduped() {
    let request = ScanRequest {
        extra: vec![
            ChecklistKind::Caching,
            ChecklistKind::Deprecated,
            ChecklistKind::Caching,
            ChecklistKind::Expected,
        ],
        read: Vec::new(),
    };
    assert_eq!(
        request.checklists(),
        vec![
            ChecklistKind::Expected,
            ChecklistKind::Deprecated,
            ChecklistKind::Caching
        ]
    );
    assert_eq!(ScanRequest::default().checklists(), vec![ChecklistKind::Expected]);
}

#[test]
fn wire_casing_matches_registry_names() {
    let url = target::normalize("example.com").unwrap();
    let resp = response(&[
        ("x-frame-options", "DENY"),
        ("strict-transport-security", "max-age=31536000"),
        ("server", "nginx"),
    ]);
    let request = ScanRequest {
        extra: vec![ChecklistKind::Informational],
        read: vec!["SERVER".to_string(), "ETag".to_string()],
    };
    let report = build_report(url, resp, &request);

    assert_eq!(report.status, 200);
    assert_eq!(report.checklists.len(), 2);

    let expected = &report.checklists[0];
    assert_eq!(expected.kind, ChecklistKind::Expected);
    assert_eq!(
        expected.result.expected.get("X-Frame-Options").map(String::as_str),
        Some("DENY")
    );
    assert!(expected.result.expected.contains_key("Strict-Transport-Security"));
    assert_eq!(expected.result.counts.expected, 2);
    assert_eq!(expected.result.counts.missing, 7);
    assert_eq!(expected.result.counts.present, 1);

    let info = &report.checklists[1];
    assert_eq!(
        info.result.expected.get("Server").map(String::as_str),
        Some("nginx")
    );

    assert_eq!(
        report.read,
        vec![
            ReadValue {
                name: "SERVER".into(),
                value: Some("nginx".into()),
            },
            ReadValue {
                name: "ETag".into(),
                value: None,
            },
        ]
    );
}

#[test]
fn scan_one_rejects_before_any_request() {
    let cfg = RequestConfig::default();
    let request = ScanRequest::default();

    let err = scan_one("ftp://files.example.com", &cfg, &request).unwrap_err();
    assert!(matches!(
        err,
        ScanError::Url(UrlError::UnsupportedScheme(RejectedScheme::Ftp))
    ));
    assert_eq!(
        err.to_string(),
        "Invalid URL input: ftp:// protocol does not return headers."
    );

    let err = scan_one("  localhost  ", &cfg, &request).unwrap_err();
    assert!(matches!(err, ScanError::Url(UrlError::MalformedHost)));

    let err = scan_one(" example.com ", &cfg, &request).unwrap_err();
    assert!(matches!(err, ScanError::Url(UrlError::InvalidFormat)));

    let err = scan_one("bad host.com", &cfg, &request).unwrap_err();
    assert!(matches!(err, ScanError::Url(UrlError::InvalidFormat)));

    let err = scan_one("10.0.1", &cfg, &request).unwrap_err();
    assert!(matches!(err, ScanError::Url(UrlError::InvalidIpv4Literal)));
}

#[tokio::test]
async fn batch_keeps_submission_order() {
    let targets = vec![
        "mailto:someone@example.com".to_string(),
        "file:///etc/passwd".to_string(),
        "192.168.1".to_string(),
        "localhost".to_string(),
    ];
    let results = scan_batch(
        targets.clone(),
        Arc::new(RequestConfig::default()),
        Arc::new(ScanRequest::default()),
        2,
    )
    .await;

    assert_eq!(results.len(), 4);
    let inputs: Vec<&str> = results
        .iter()
        .map(|r| r.as_ref().unwrap_err().input.as_str())
        .collect();
    assert_eq!(inputs, targets.iter().map(String::as_str).collect::<Vec<_>>());
    assert!(matches!(
        results[0].as_ref().unwrap_err().error,
        ScanError::Url(UrlError::UnsupportedScheme(RejectedScheme::Mailto))
    ));
    assert!(matches!(
        results[1].as_ref().unwrap_err().error,
        ScanError::Url(UrlError::UnsupportedScheme(RejectedScheme::File))
    ));
}

#[tokio::test]
async fn batch_of_nothing_is_empty() {
    let results = scan_batch(
        Vec::new(),
        Arc::new(RequestConfig::default()),
        Arc::new(ScanRequest::default()),
        0,
    )
    .await;
    assert!(results.is_empty());
}

fn mixed_results() -> Vec<Result<TargetReport, TargetFailure>> {
    let url = target::normalize("http://example.com/login").unwrap();
    let request = ScanRequest {
        extra: Vec::new(),
        read: vec!["Server".to_string()],
    };
    let report = build_report(url, response(&[("X-Frame-Options", "DENY"), ("Server", "nginx")]), &request);
    vec![
        Ok(report),
        Err(TargetFailure {
            input: "ftp://x.com".to_string(),
            error: ScanError::Url(UrlError::UnsupportedScheme(RejectedScheme::Ftp)),
        }),
    ]
}

#[test]
fn emit_to_console() {
    let results = mixed_results();
    let mut r = ConsoleRenderer::new(Vec::new(), ColorMode::None);
    emit(&results, &mut r).unwrap();
    r.finish().unwrap();
    let text = String::from_utf8(r.into_inner()).unwrap();

    let counts = text
        .find("[*] Expected headers for http://example.com/login: 1 found, 8 missing, 1 other")
        .unwrap();
    let list = text
        .find("[*] Analyzing Expected headers of http://example.com/login")
        .unwrap();
    let read = text.find("[*] Requested headers of http://example.com/login").unwrap();
    let error = text
        .find("[!] ftp://x.com: Invalid URL input: ftp:// protocol does not return headers.")
        .unwrap();
    assert!(counts < list && list < read && read < error);
    assert!(text.contains("\tServer: nginx\n"));
}

#[test]
fn emit_to_json() {
    let results = mixed_results();
    let mut r = JsonRenderer::new(Vec::new());
    emit(&results, &mut r).unwrap();
    r.finish().unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&r.into_inner()).unwrap();

    assert_eq!(doc[0]["url"], "http://example.com/login");
    assert_eq!(doc[0]["checklists"][0]["kind"], "expected");
    assert_eq!(doc[0]["checklists"][0]["counts"]["missing"], 8);
    assert_eq!(doc[0]["read"]["Server"], "nginx");
    assert_eq!(doc[1]["url"], "ftp://x.com");
    assert!(doc[1]["error"].as_str().unwrap().starts_with("Invalid URL input"));
}

#[test]
fn emit_to_json_keeps_one_entry_per_result() {
    let mut results = mixed_results();
    results.truncate(1);
    let duplicate = match &results[0] {
        Ok(report) => report.clone(),
        Err(_) => unreachable!(),
    };
    results.push(Ok(duplicate));

    let mut r = JsonRenderer::new(Vec::new());
    emit(&results, &mut r).unwrap();
    r.finish().unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&r.into_inner()).unwrap();

    let targets = doc.as_array().unwrap();
    assert_eq!(targets.len(), 2);
    for t in targets {
        assert_eq!(t["url"], "http://example.com/login");
        assert_eq!(t["checklists"].as_array().unwrap().len(), 1);
        assert_eq!(t["read"]["Server"], "nginx");
    }
}
