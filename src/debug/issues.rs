//! Clear-issues request to the rendering server.

use std::time::Duration;

use tracing::{info, warn};

/// Relative path of the clear-issues endpoint.
pub const CLEAR_ISSUES_PATH: &str = "/debug/clear-issues";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Error types that can occur while clearing issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueError {
    /// Server answered with a non-success status.
    Status(u16),
    /// Request did not complete.
    Transport(String),
}

impl std::fmt::Display for IssueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueError::Status(code) => write!(f, "server returned status {}", code),
            IssueError::Transport(msg) => write!(f, "request failed: {}", msg),
        }
    }
}

impl std::error::Error for IssueError {}

/// Asks the rendering server to forget its recorded concerns.
///
/// Requests are sent from a worker thread, hence `Send + Sync`.
pub trait IssueClient: Send + Sync {
    fn clear_issues(&self) -> Result<(), IssueError>;
}

/// Sends `GET {base}/debug/clear-issues` once, without retries.
pub struct HttpIssueClient {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpIssueClient {
    pub fn new(base_url: &str) -> Result<Self, IssueError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| IssueError::Transport(e.to_string()))?;
        Ok(Self {
            url: clear_issues_url(base_url),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Joins the server base URL and the endpoint path.
pub fn clear_issues_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), CLEAR_ISSUES_PATH)
}

impl IssueClient for HttpIssueClient {
    fn clear_issues(&self) -> Result<(), IssueError> {
        let response = self.client.get(&self.url).send().map_err(|e| {
            warn!(url = %self.url, error = %e, "clear issues request failed");
            IssueError::Transport(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            info!(url = %self.url, "issues cleared");
            Ok(())
        } else {
            warn!(url = %self.url, status = status.as_u16(), "clear issues rejected");
            Err(IssueError::Status(status.as_u16()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serves one request with `status_line` and returns the request line received.
    fn serve_once(status_line: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
            }
            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                status_line
            )
            .unwrap();
            request_line.trim_end().to_string()
        });
        (base, handle)
    }

    #[test]
    fn test_url_join() {
        assert_eq!(
            clear_issues_url("http://localhost:8000/"),
            "http://localhost:8000/debug/clear-issues"
        );
        assert_eq!(
            clear_issues_url("http://localhost:8000"),
            "http://localhost:8000/debug/clear-issues"
        );
    }

    #[test]
    fn test_clear_issues_success() {
        let (base, handle) = serve_once("200 OK");
        let client = HttpIssueClient::new(&base).unwrap();
        assert_eq!(client.clear_issues(), Ok(()));
        assert_eq!(handle.join().unwrap(), "GET /debug/clear-issues HTTP/1.1");
    }

    #[test]
    fn test_clear_issues_server_error() {
        let (base, handle) = serve_once("500 Internal Server Error");
        let client = HttpIssueClient::new(&base).unwrap();
        assert_eq!(client.clear_issues(), Err(IssueError::Status(500)));
        handle.join().unwrap();
    }

    #[test]
    fn test_clear_issues_transport_error() {
        // Bind then drop to get a port nobody listens on.
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = HttpIssueClient::new(&format!("http://127.0.0.1:{}", port)).unwrap();
        assert!(matches!(
            client.clear_issues(),
            Err(IssueError::Transport(_))
        ));
    }
}
