//! A bare TCP server whose responses promise more body than they send.
//!
//! wiremock always sends complete bodies, so body failures after a 2xx
//! status need a hand-written server.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

/// Body bytes actually sent before the connection is closed.
pub const SENT_BODY: &[u8] = b"hello";

/// Content-Length announced in every response.
pub const ANNOUNCED_LENGTH: usize = 100;

/// Starts a server on a background thread and returns its base URL.
///
/// Every connection gets a `200 OK` announcing [`ANNOUNCED_LENGTH`] bytes,
/// then only [`SENT_BODY`] before the socket closes.
#[must_use]
pub fn start_truncated_body_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind truncated-body server");
    let addr = listener.local_addr().expect("local addr");

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(stream) = stream else {
                continue;
            };
            thread::spawn(move || {
                let _ = answer_truncated(stream);
            });
        }
    });

    format!("http://{addr}")
}

fn answer_truncated(mut stream: TcpStream) -> std::io::Result<()> {
    read_request_head(&mut stream)?;
    let head = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nContent-Length: {ANNOUNCED_LENGTH}\r\nConnection: close\r\n\r\n"
    );
    stream.write_all(head.as_bytes())?;
    stream.write_all(SENT_BODY)?;
    stream.flush()?;
    stream.shutdown(std::net::Shutdown::Both)
}

fn read_request_head(stream: &mut TcpStream) -> std::io::Result<()> {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|window| window == b"\r\n\r\n") {
        let read = stream.read(&mut buf)?;
        if read == 0 {
            break;
        }
        head.extend_from_slice(&buf[..read]);
    }
    Ok(())
}
