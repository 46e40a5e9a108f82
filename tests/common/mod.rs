#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

use wikidata_client::{Client, Config};

/// Serves one canned HTTP response on a free local port.
///
/// The handle yields the request target (`/api.php?action=...`) that was hit.
pub fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let (base, handle) = serve_sequence(&[(status, body)]);
    let handle = thread::spawn(move || handle.join().unwrap().remove(0));
    (base, handle)
}

/// Serves the given responses in order, one connection each.
///
/// The handle yields the request targets in the order they arrived.
pub fn serve_sequence(responses: &[(&str, &str)]) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}/api.php", listener.local_addr().unwrap());
    let responses: Vec<String> = responses
        .iter()
        .map(|(status, body)| {
            format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
        })
        .collect();
    let handle = thread::spawn(move || {
        responses
            .iter()
            .map(|response| {
                let (mut stream, _) = listener.accept().unwrap();
                let target = read_target(&mut stream);
                stream.write_all(response.as_bytes()).unwrap();
                target
            })
            .collect()
    });
    (base, handle)
}

/// A base URL nothing listens on.
pub fn refused_base() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api.php")
}

fn read_target(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let head = String::from_utf8_lossy(&buf);
    head.lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or_default()
        .to_string()
}

pub fn local_client(base: &str) -> (Config, Client) {
    let config = Config {
        wikidata_api: base.to_string(),
        wikipedia_api: base.to_string(),
        use_system_proxy: false,
        ..Config::default()
    };
    let client = Client::with_config(config.clone()).unwrap();
    (config, client)
}
