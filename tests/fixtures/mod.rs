//! Shared test fixtures
//!
//! - Catalog files in a scratch directory
//! - Configs pointing at that directory
//! - A throwaway HTTP/1.1 responder on localhost

#![allow(dead_code)]

use std::fs;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use dataset_link_check::CheckerConfig;
use tempfile::TempDir;

/// Scratch directory holding a catalog and the run outputs
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `datasets.csv` from (name, url) rows
    pub fn write_catalog(&self, rows: &[(&str, &str)]) -> PathBuf {
        let mut csv = String::from("NAME,MAIN_LINK,DESCRIPTION\n");
        for (name, url) in rows {
            csv.push_str(&format!("{},{},fixture\n", name, url));
        }
        self.write_raw_catalog(&csv)
    }

    pub fn write_raw_catalog(&self, contents: &str) -> PathBuf {
        let path = self.path("datasets.csv");
        fs::write(&path, contents).expect("Failed to write catalog");
        path
    }

    /// Default config with every path inside this workspace
    pub fn config(&self) -> CheckerConfig {
        CheckerConfig {
            input_path: self.path("datasets.csv"),
            badge_path: self.path("badge.json"),
            ..CheckerConfig::default()
        }
    }
}

/// Catalog rows `dataset-0..n` at `https://data.example/<i>`
pub fn numbered_rows(n: usize) -> Vec<(String, String)> {
    (0..n)
        .map(|i| (format!("dataset-{}", i), format!("https://data.example/{}", i)))
        .collect()
}

pub fn as_refs(rows: &[(String, String)]) -> Vec<(&str, &str)> {
    rows.iter().map(|(n, u)| (n.as_str(), u.as_str())).collect()
}

/// How the test server answers a request
#[derive(Debug, Clone)]
pub enum Reply {
    /// Empty response with this status
    Status(u16),
    /// 302 to this path
    Redirect(String),
    /// 200 advertising a large body, sending a few bytes, then stalling
    StalledBody,
    /// Read the request and never answer
    Hang,
}

type Router = dyn Fn(&str, &str) -> Reply + Send + Sync;

/// HTTP responder answering per (method, path)
pub struct TestServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    pub fn start<F>(router: F) -> Self
    where
        F: Fn(&str, &str) -> Reply + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test server");
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let router: Arc<Router> = Arc::new(router);

        let log = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                let router = Arc::clone(&router);
                let log = Arc::clone(&log);
                thread::spawn(move || handle(stream, &*router, &log));
            }
        });

        Self { addr, requests }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Raw request heads received so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Request lines ("HEAD /x HTTP/1.1") received so far
    pub fn request_lines(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|r| r.lines().next().map(str::to_string))
            .collect()
    }
}

fn handle(mut stream: TcpStream, router: &Router, log: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));

    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }

    let head = String::from_utf8_lossy(&head).to_string();
    let mut parts = head.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();
    log.lock().unwrap().push(head);

    let response = match router(&method, &path) {
        Reply::Status(code) => format!(
            "HTTP/1.1 {} Test\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            code
        ),
        Reply::Redirect(location) => format!(
            "HTTP/1.1 302 Found\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            location
        ),
        Reply::StalledBody => {
            let _ = stream.write_all(
                b"HTTP/1.1 200 OK\r\nContent-Length: 1000000\r\nConnection: close\r\n\r\n0123456789",
            );
            let _ = stream.flush();
            thread::sleep(Duration::from_secs(5));
            return;
        }
        Reply::Hang => {
            thread::sleep(Duration::from_secs(5));
            return;
        }
    };

    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

/// An address nothing is listening on
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/gone", addr)
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
}
