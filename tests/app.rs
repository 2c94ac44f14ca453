use std::io;
use std::sync::{Arc, Mutex};

use http::{HeaderMap, StatusCode};
use strata::{Method, Request, Router, app};

/// Collects formatted log output in memory.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

fn capture() -> (Captured, tracing::subscriber::DefaultGuard) {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .without_time()
        .with_max_level(tracing::Level::INFO)
        .finish();
    (captured, tracing::subscriber::set_default(subscriber))
}

/// The order in which middleware announced themselves and the handler ran.
fn stages(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|line| {
            if line.contains("notification received") {
                return Some("handler".to_owned());
            }
            if !line.contains("entering middleware") {
                return None;
            }
            let start = line.find("middleware=\"")? + "middleware=\"".len();
            let end = start + line[start..].find('"')?;
            Some(line[start..end].to_owned())
        })
        .collect()
}

fn request(method: Method, path: &str, body: &str) -> Request {
    Request::new(method, path, HeaderMap::new(), body.to_owned())
}

#[tokio::test]
async fn post_runs_log_token_record_then_handler() {
    let router = Router::from_table(app::routes()).unwrap();
    let (captured, _guard) = capture();

    let res = router.handle(request(Method::Post, "/aaa", r#"{"event":"created"}"#)).await;

    assert_eq!(res.status_code(), StatusCode::OK);
    let lines = captured.lines();
    assert_eq!(stages(&lines), ["log", "token", "record", "handler"]);
    assert!(lines.iter().any(|l| l.contains("request recorded") && l.contains("status=200")));
    assert!(lines.iter().any(|l| l.contains("request recorded") && l.contains("elapsed=")));
}

#[tokio::test]
async fn every_middleware_logs_the_full_body() {
    let router = Router::from_table(app::routes()).unwrap();
    let (captured, _guard) = capture();

    router.handle(request(Method::Delete, "/aaa", "goodbye")).await;

    let body_lines = captured
        .lines()
        .into_iter()
        .filter(|l| l.contains("request body"))
        .collect::<Vec<_>>();
    assert_eq!(body_lines.len(), 3);
    assert!(body_lines.iter().all(|l| l.contains("body=goodbye")));
}

#[tokio::test]
async fn delete_archives_instead_of_recording() {
    let router = Router::from_table(app::routes()).unwrap();
    let (captured, _guard) = capture();

    router.handle(request(Method::Delete, "/aaa", "")).await;

    assert_eq!(stages(&captured.lines()), ["log", "token", "archive", "handler"]);
}

#[tokio::test]
async fn bare_routes_reach_the_handler_alone() {
    let router = Router::from_table(app::routes()).unwrap();

    for path in ["/ccc", "/ddd"] {
        let (captured, _guard) = capture();
        let res = router.handle(request(Method::Get, path, "")).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(stages(&captured.lines()), ["handler"], "{path}");
    }
}

#[tokio::test]
async fn token_middleware_never_logs_the_credential() {
    let router = Router::from_table(app::routes()).unwrap();
    let (captured, _guard) = capture();

    let mut headers = HeaderMap::new();
    headers.insert("authorization", "Bearer s3cr3t".parse().unwrap());
    let res = router.handle(Request::new(Method::Get, "/bbb", headers, "")).await;

    assert_eq!(res.status_code(), StatusCode::OK);
    let lines = captured.lines();
    assert!(lines.iter().any(|l| l.contains("authorization inspected") && l.contains("bearer=true")));
    assert!(lines.iter().all(|l| !l.contains("s3cr3t")));
}

#[tokio::test]
async fn unregistered_method_on_known_path_is_405() {
    let router = Router::from_table(app::routes()).unwrap();
    let res = router.handle(request(Method::Get, "/aaa", "")).await;
    assert_eq!(res.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.header("allow"), Some("DELETE, POST"));
}
