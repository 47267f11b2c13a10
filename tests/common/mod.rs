//! Loopback HTTP server that answers every request with one canned response.

#![allow(dead_code)]

use std::io::{Read as _, Write as _};
use std::net::TcpListener;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

pub struct ApiServer {
    port: u16,
    hits: Arc<AtomicUsize>,
    _stop: std::sync::mpsc::Sender<()>,
}

impl ApiServer {
    pub fn start(status: &'static str, body: impl Into<Vec<u8>>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let (tx, rx) = std::sync::mpsc::channel::<()>();
        let hits = Arc::new(AtomicUsize::new(0));
        let body: Arc<Vec<u8>> = Arc::new(body.into());

        let counter = Arc::clone(&hits);
        thread::spawn(move || {
            listener.set_nonblocking(true).unwrap();
            loop {
                if rx.try_recv().is_ok() {
                    break;
                }
                match listener.accept() {
                    Ok((stream, _)) => {
                        counter.fetch_add(1, Ordering::SeqCst);
                        let body = Arc::clone(&body);
                        thread::spawn(move || respond(stream, status, &body));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Self {
            port,
            hits,
            _stop: tx,
        }
    }

    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}/products", self.port)
    }

    /// Connections accepted so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

fn respond(mut stream: std::net::TcpStream, status: &str, body: &[u8]) {
    stream.set_nonblocking(false).ok();
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut buf = [0u8; 4096];
    match stream.read(&mut buf) {
        Ok(n) if n > 0 => {}
        _ => return,
    }

    let header = format!(
        "HTTP/1.1 {status}\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n",
        body.len()
    );
    let _ = stream.write_all(header.as_bytes());
    let _ = stream.write_all(body);
}

/// A port nothing listens on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/products")
}

pub const TWO_PRODUCTS: &str = r#"[
  {
    "id": 1,
    "title": "Fjallraven Backpack",
    "price": 109.95,
    "description": "Your perfect pack for everyday use.",
    "category": "men's clothing",
    "image": "https://img.example/1.jpg",
    "rating": { "rate": 3.9, "count": 120 }
  },
  {
    "id": 2,
    "title": "Mens Casual Slim Fit",
    "price": 15.99,
    "description": "The color could be slightly different.",
    "category": "men's clothing",
    "image": "https://img.example/2.jpg",
    "rating": { "rate": 2.1, "count": 430 }
  }
]"#;
