//! Minimal HTTP/1.1 server with scripted per-path responses for integration tests.
//!
//! Each path maps to a [`Route`]. Unknown paths get 404. `{base}` inside a
//! redirect location is replaced by the server's base URL so absolute
//! redirects can be scripted before the port is known.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Route {
    /// Respond with this status and no Location.
    Status(u32),
    /// Respond with this 3xx status and Location.
    Redirect(u32, String),
    /// Accept the request but never answer before the delay elapses.
    Stall(Duration),
}

pub struct RedirectServer {
    pub base: String,
    hits: Arc<AtomicUsize>,
}

impl RedirectServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Number of requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start(routes: Vec<(&str, Route)>) -> RedirectServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let base = format!("http://127.0.0.1:{}", port);

    let routes: HashMap<String, Route> = routes
        .into_iter()
        .map(|(path, route)| {
            let route = match route {
                Route::Redirect(code, loc) => Route::Redirect(code, loc.replace("{base}", &base)),
                other => other,
            };
            (path.to_string(), route)
        })
        .collect();
    let routes = Arc::new(routes);
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_srv = Arc::clone(&hits);

    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let hits = Arc::clone(&hits_srv);
            thread::spawn(move || handle(stream, &routes, &hits));
        }
    });

    RedirectServer { base, hits }
}

/// A chain `/0 -> /1 -> ... -> /n` of 302 redirects ending in 200 at `/n`.
pub fn redirect_chain(redirects: usize) -> Vec<(String, Route)> {
    let mut routes: Vec<(String, Route)> = (0..redirects)
        .map(|i| (format!("/{}", i), Route::Redirect(302, format!("/{}", i + 1))))
        .collect();
    routes.push((format!("/{}", redirects), Route::Status(200)));
    routes
}

/// Starts a server for routes with owned paths.
pub fn start_owned(routes: Vec<(String, Route)>) -> RedirectServer {
    start(routes.iter().map(|(p, r)| (p.as_str(), r.clone())).collect())
}

/// Returns a loopback URL nobody is listening on.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/file", port)
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Route>, hits: &AtomicUsize) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    hits.fetch_add(1, Ordering::SeqCst);
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");

    let (status, location) = match routes.get(path) {
        Some(Route::Status(code)) => (*code, None),
        Some(Route::Redirect(code, loc)) => (*code, Some(loc.as_str())),
        Some(Route::Stall(delay)) => {
            thread::sleep(*delay);
            return;
        }
        None => (404, None),
    };

    let location = location
        .map(|l| format!("Location: {}\r\n", l))
        .unwrap_or_default();
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: 0\r\n{}Connection: close\r\n\r\n",
        status,
        reason(status),
        location
    );
    let _ = stream.write_all(response.as_bytes());
}

fn reason(status: u32) -> &'static str {
    match status {
        200 => "OK",
        301 => "Moved Permanently",
        302 => "Found",
        303 => "See Other",
        307 => "Temporary Redirect",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}
