// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use std::thread;
use std::time::Duration;
use threadboard_app::{FilterSelector, ThreadSource, include};
use threadboard_feed::{FileSource, HttpSource};
use tiny_http::{Header, Response, Server};

const FEED_BODY: &str = r#"[
  {
    "id": "a",
    "sender": {"name": "Grace Hopper", "email": "grace@navy.example"},
    "subject": "Compiler notes",
    "preview": "Attached are the notes from the compiler review",
    "summary": "Compiler review notes",
    "messageCount": 3,
    "lastActivity": "10 minutes ago",
    "isUnread": true,
    "isImportant": false,
    "isStarred": true
  },
  {
    "id": "b",
    "sender": {"name": "Alan Turing", "email": "alan@bletchley.example"},
    "subject": "Machine question",
    "preview": "Can machines think?",
    "summary": "Philosophy",
    "messageCount": 1,
    "lastActivity": "3 weeks ago",
    "isUnread": false,
    "isImportant": true,
    "isStarred": false
  }
]"#;

fn json_header() -> Header {
    Header::from_bytes("Content-Type", "application/json").expect("valid content type header")
}

#[test]
fn http_source_fetches_threads_from_mock_server() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let url = format!("http://{}/threads.json", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        assert_eq!(request.url(), "/threads.json");
        let response = Response::from_string(FEED_BODY)
            .with_status_code(200)
            .with_header(json_header());
        request.respond(response).expect("response should succeed");
    });

    let source = HttpSource::new(&url, Duration::from_secs(1))?;
    let threads = source.fetch_threads()?;
    assert_eq!(threads.len(), 2);
    assert_eq!(threads[0].sender.name, "Grace Hopper");

    let this_week = threads
        .iter()
        .filter(|record| include("", FilterSelector::Week, record))
        .count();
    assert_eq!(this_week, 1);

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn http_source_surfaces_server_error_message() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let url = format!("http://{}/threads", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        let response = Response::from_string(r#"{"error":{"message":"mailbox locked"}}"#)
            .with_status_code(503)
            .with_header(json_header());
        request.respond(response).expect("response should succeed");
    });

    let source = HttpSource::new(&url, Duration::from_secs(1))?;
    let error = source
        .fetch_threads()
        .expect_err("503 response should fail");
    assert_eq!(error.to_string(), "feed error (503): mailbox locked");

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn http_source_error_for_unreachable_feed_names_config_key() {
    let source = HttpSource::new("http://127.0.0.1:1/threads", Duration::from_millis(50))
        .expect("source should initialize");
    assert_eq!(source.url().as_str(), "http://127.0.0.1:1/threads");
    assert_eq!(source.timeout(), Duration::from_millis(50));

    let error = source
        .fetch_threads()
        .expect_err("fetch should fail for unreachable endpoint");
    assert!(error.to_string().contains("[source].url"));
}

#[test]
fn file_source_reads_json_fixture() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let path = temp.path().join("threads.json");
    std::fs::write(&path, format!("{{\"threads\": {FEED_BODY}}}"))?;

    let source = FileSource::new(&path);
    assert_eq!(source.path(), path.as_path());
    let threads = source.fetch_threads()?;
    assert_eq!(threads.len(), 2);
    assert!(source.name().contains("threads.json"));
    Ok(())
}

#[test]
fn file_source_error_names_missing_path() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let path = temp.path().join("missing.json");

    let error = FileSource::new(&path)
        .fetch_threads()
        .expect_err("missing file should fail");
    assert!(error.to_string().contains("missing.json"));
    Ok(())
}

#[test]
fn file_source_error_for_malformed_json_names_path() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let path = temp.path().join("broken.json");
    std::fs::write(&path, "[{\"id\": ")?;

    let error = FileSource::new(&path)
        .fetch_threads()
        .expect_err("malformed file should fail");
    assert!(error.to_string().contains("broken.json"));
    Ok(())
}
