//! Fault-tolerance behavior of the concurrent fetcher, exercised against
//! throwaway local listeners serving canned HTTP responses.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use marketmood::services::fetch_service::{build_client, FetchService};

fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status_line}\r\n\
         Content-Type: text/html\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\r\n{body}",
        body.len()
    )
}

/// Serve the scripted responses, one per accepted connection, then stop
/// accepting. Returns the base URL.
async fn spawn_server(script: Vec<String>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        for response in script {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });
    format!("http://{addr}/")
}

#[tokio::test]
async fn test_failed_url_is_dropped_without_aborting_batch() {
    // One URL that answers 500 for every attempt in the retry budget, two
    // that answer 200.
    let bad = spawn_server(vec![
        http_response("500 Internal Server Error", "boom"),
        http_response("500 Internal Server Error", "boom"),
        http_response("500 Internal Server Error", "boom"),
    ])
    .await;
    let good_one = spawn_server(vec![http_response("200 OK", "<h1>Up</h1>")]).await;
    let good_two = spawn_server(vec![http_response("200 OK", "<p>Steady</p>")]).await;

    let fetcher = FetchService::new(build_client(), 8);
    let urls = vec![bad.clone(), good_one.clone(), good_two.clone()];
    let pages = fetcher.fetch_all(&urls).await;

    assert_eq!(pages.len(), 2);
    assert!(pages.iter().all(|p| p.url != bad));
    assert!(pages.iter().any(|p| p.body.contains("Up")));
    assert!(pages.iter().any(|p| p.body.contains("Steady")));
}

#[tokio::test]
async fn test_transient_failure_recovers_within_retry_budget() {
    let flaky = spawn_server(vec![
        http_response("500 Internal Server Error", "boom"),
        http_response("503 Service Unavailable", "later"),
        http_response("200 OK", "<p>finally</p>"),
    ])
    .await;

    let fetcher = FetchService::new(build_client(), 2);
    let pages = fetcher.fetch_all(&[flaky]).await;

    assert_eq!(pages.len(), 1);
    assert!(pages[0].body.contains("finally"));
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    // A second canned response is waiting; if the fetcher wrongly retried
    // the 404 it would receive it and the batch would be non-empty.
    let gone = spawn_server(vec![
        http_response("404 Not Found", "nope"),
        http_response("200 OK", "should never be requested"),
    ])
    .await;

    let fetcher = FetchService::new(build_client(), 2);
    let pages = fetcher.fetch_all(&[gone]).await;

    assert!(pages.is_empty());
}

#[tokio::test]
async fn test_page_is_keyed_by_redirect_final_url() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let redirect = format!(
        "HTTP/1.1 301 Moved Permanently\r\n\
         Location: http://{addr}/final\r\n\
         Content-Length: 0\r\n\
         Connection: close\r\n\r\n"
    );
    let target = http_response("200 OK", "<h1>Landed</h1>");
    tokio::spawn(async move {
        for response in [redirect, target] {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    let fetcher = FetchService::new(build_client(), 2);
    let pages = fetcher.fetch_all(&[format!("http://{addr}/start")]).await;

    assert_eq!(pages.len(), 1);
    assert!(pages[0].url.ends_with("/final"));
    assert!(pages[0].body.contains("Landed"));
}

#[tokio::test]
async fn test_empty_url_list_is_a_no_op() {
    let fetcher = FetchService::new(build_client(), 2);
    let pages = fetcher.fetch_all(&[]).await;
    assert!(pages.is_empty());
}
