// src/core/net.rs

// HTTP/1.0 over TCP (std-only)

use std::{io::{Read, Write}, net::TcpStream, time::Duration};
use crate::config::consts::HOST;

pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn exchange(host: &str, port: u16, req: &str) -> Result<HttpResponse, Box<dyn std::error::Error>> {
    let mut s = TcpStream::connect((host, port))?;
    s.set_read_timeout(Some(Duration::from_secs(15)))?;
    s.set_write_timeout(Some(Duration::from_secs(15)))?;

    s.write_all(req.as_bytes())?;
    s.flush()?;

    let mut buf = Vec::new();
    s.read_to_end(&mut buf)?;
    let resp = String::from_utf8_lossy(&buf);

    let status_line = resp.split("\r\n").next().unwrap_or("");
    let status: u16 = status_line
        .split_whitespace()
        .nth(1)
        .and_then(|c| c.parse().ok())
        .ok_or("Malformed HTTP status line")?;
    let body_idx = resp.find("\r\n\r\n").ok_or("Malformed HTTP response")? + 4;
    Ok(HttpResponse { status, body: resp[body_idx..].to_string() })
}

pub fn http_get(host: &str, port: u16, path: &str) -> Result<HttpResponse, Box<dyn std::error::Error>> {
    let req = format!(
        "GET {} HTTP/1.0\r\nHost: {}\r\nUser-Agent: kra_watch/0.3\r\nConnection: close\r\n\r\n",
        path, host
    );
    exchange(host, port, &req)
}

pub fn http_post_json(
    host: &str,
    port: u16,
    path: &str,
    json: &str,
) -> Result<HttpResponse, Box<dyn std::error::Error>> {
    let req = format!(
        "POST {} HTTP/1.0\r\nHost: {}\r\nUser-Agent: kra_watch/0.3\r\n\
         Content-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        path, host, json.len(), json
    );
    exchange(host, port, &req)
}

/// Fetch a game page; non-200 is an error here since there is nothing to
/// scrape in an error body.
pub fn fetch_page(path: &str) -> Result<String, Box<dyn std::error::Error>> {
    let resp = http_get(HOST, 80, path)?;
    if !resp.is_success() {
        return Err(format!("HTTP error: {} {}{}", resp.status, HOST, path).into());
    }
    Ok(resp.body)
}

/// Minimal query-string escaping for the apiKey parameter.
pub fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}
