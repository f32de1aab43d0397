//! Loopback HTTP server and backend doubles shared by unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

use crate::core::backend::{Backend, BackendError};

#[derive(Clone, Debug)]
pub struct CannedResponse {
    status: u16,
    body: String,
    delay: Option<Duration>,
}

impl CannedResponse {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Clone, Debug)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.clone())
    }
}

/// Serves the given responses in order, one per connection, and records each
/// request it receives.
pub struct TestServer {
    url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl TestServer {
    pub async fn spawn(responses: Vec<CannedResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener should bind");
        let addr = listener.local_addr().expect("local addr should resolve");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&requests);

        tokio::spawn(async move {
            let mut responses = VecDeque::from(responses);
            while let Some(canned) = responses.pop_front() {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                let Ok(request) = read_http_request(&mut stream).await else {
                    continue;
                };
                captured.lock().await.push(request);
                if let Some(delay) = canned.delay {
                    tokio::time::sleep(delay).await;
                }
                let _ = write_http_response(&mut stream, &canned).await;
            }
        });

        Self {
            url: format!("http://{addr}"),
            requests,
        }
    }

    pub fn url(&self) -> String {
        self.url.clone()
    }

    pub async fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().await.clone()
    }
}

/// A base URL on which nothing is listening.
pub async fn unused_local_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("local addr should resolve");
    drop(listener);
    format!("http://{addr}")
}

async fn read_http_request(stream: &mut TcpStream) -> Result<CapturedRequest, String> {
    let mut buffer = Vec::new();
    let mut header_end = None;
    while header_end.is_none() {
        let mut chunk = [0_u8; 1024];
        let read = stream.read(&mut chunk).await.map_err(|err| err.to_string())?;
        if read == 0 {
            return Err("Unexpected EOF while reading HTTP headers".to_string());
        }
        buffer.extend_from_slice(&chunk[..read]);
        header_end = buffer
            .windows(4)
            .position(|window| window == b"\r\n\r\n")
            .map(|index| index + 4);
    }

    let header_end = header_end.expect("header end should exist");
    let header_text =
        std::str::from_utf8(&buffer[..header_end]).map_err(|err| err.to_string())?;
    let mut lines = header_text.split("\r\n").filter(|line| !line.is_empty());
    let request_line = lines
        .next()
        .ok_or_else(|| "Missing HTTP request line".to_string())?
        .to_string();

    let mut headers = Vec::new();
    let mut content_length = 0_usize;
    for line in lines {
        let mut parts = line.splitn(2, ':');
        let Some(name) = parts.next() else {
            continue;
        };
        let value = parts.next().unwrap_or_default().trim().to_string();
        if name.eq_ignore_ascii_case("content-length") {
            content_length = value.parse::<usize>().map_err(|err| err.to_string())?;
        }
        headers.push((name.to_string(), value));
    }

    let mut body = buffer[header_end..].to_vec();
    while body.len() < content_length {
        let mut chunk = vec![0_u8; content_length - body.len()];
        let read = stream.read(&mut chunk).await.map_err(|err| err.to_string())?;
        if read == 0 {
            return Err("Unexpected EOF while reading HTTP body".to_string());
        }
        body.extend_from_slice(&chunk[..read]);
    }
    body.truncate(content_length);

    Ok(CapturedRequest {
        request_line,
        headers,
        body,
    })
}

async fn write_http_response(
    stream: &mut TcpStream,
    canned: &CannedResponse,
) -> std::io::Result<()> {
    let response = format!(
        "HTTP/1.1 {} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        canned.status,
        canned.body.len(),
        canned.body
    );
    stream.write_all(response.as_bytes()).await?;
    stream.flush().await
}

/// In-memory [`Backend`] that replays scripted outcomes and counts calls.
#[derive(Default)]
pub struct ScriptedBackend {
    pub hello_result: Option<Result<String, BackendError>>,
    pub ask_results: std::sync::Mutex<VecDeque<Result<String, BackendError>>>,
    pub questions: std::sync::Mutex<Vec<String>>,
    hello_calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn with_hello(result: Result<String, BackendError>) -> Self {
        Self {
            hello_result: Some(result),
            ..Self::default()
        }
    }

    pub fn with_answers(results: Vec<Result<String, BackendError>>) -> Self {
        Self {
            ask_results: std::sync::Mutex::new(results.into()),
            ..Self::default()
        }
    }

    pub fn hello_calls(&self) -> usize {
        self.hello_calls.load(Ordering::SeqCst)
    }

    pub fn ask_calls(&self) -> usize {
        self.questions.lock().unwrap().len()
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn hello(&self) -> Result<String, BackendError> {
        self.hello_calls.fetch_add(1, Ordering::SeqCst);
        self.hello_result
            .clone()
            .unwrap_or_else(|| Err(BackendError::TransportError("unscripted".into())))
    }

    async fn health(&self) -> Result<String, BackendError> {
        Ok("healthy".to_string())
    }

    async fn ask(&self, question: &str) -> Result<String, BackendError> {
        self.questions.lock().unwrap().push(question.to_string());
        self.ask_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::TransportError("unscripted".into())))
    }
}
