//! Throwaway HTTP/1.1 server for tests that exercise real requests.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A canned response for one request target (path plus query), or for any
/// target when the path is `*`.
pub struct Route {
    pub target: String,
    pub status: &'static str,
    pub body: Vec<u8>,
}

pub fn route(target: &str, status: &'static str, body: impl Into<Vec<u8>>) -> Route {
    Route {
        target: target.to_string(),
        status,
        body: body.into(),
    }
}

fn request_target(request: &[u8]) -> String {
    String::from_utf8_lossy(request)
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string()
}

/// Serve `routes` on a random local port until the test ends. Unknown
/// targets get a 404. Returns the base URL, without a trailing slash.
pub async fn serve(routes: Vec<Route>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = std::sync::Arc::new(routes);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let routes = routes.clone();
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }

                let target = request_target(&request);
                let (status, body) = routes
                    .iter()
                    .find(|r| r.target == target || r.target == "*")
                    .map_or(("404 Not Found", &[][..]), |r| (r.status, &r.body[..]));

                let head = format!(
                    "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                let _ = socket.write_all(head.as_bytes()).await;
                if !request.starts_with(b"HEAD") {
                    let _ = socket.write_all(body).await;
                }
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{addr}")
}
