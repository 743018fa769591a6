//! MCP transport layer.
//!
//! Newline-delimited JSON-RPC over any async byte stream; stdio is the
//! production instance.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, trace, warn};

use crate::error::{Error, Result};
use crate::mcp::protocol::{
    error_codes, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse, RequestId,
};

const CHANNEL_CAPACITY: usize = 100;

/// A message that can be sent or received.
#[derive(Debug, Clone)]
pub enum Message {
    Request(JsonRpcRequest),
    Response(JsonRpcResponse),
    Notification(JsonRpcNotification),
}

impl Message {
    /// Classify one line of input. Requests carry an id, notifications do not.
    pub fn parse(line: &str) -> Option<Message> {
        if let Ok(req) = serde_json::from_str::<JsonRpcRequest>(line) {
            Some(Message::Request(req))
        } else if let Ok(notif) = serde_json::from_str::<JsonRpcNotification>(line) {
            Some(Message::Notification(notif))
        } else {
            None
        }
    }

    fn to_line(&self) -> serde_json::Result<String> {
        match self {
            Message::Request(req) => serde_json::to_string(req),
            Message::Response(res) => serde_json::to_string(res),
            Message::Notification(notif) => serde_json::to_string(notif),
        }
    }
}

/// Answer for a line that [`Message::parse`] rejected.
///
/// Invalid JSON is a parse error; valid JSON of the wrong shape is an
/// invalid request. The id is never known, so it is `null`.
pub fn reject_line(line: &str) -> JsonRpcResponse {
    match serde_json::from_str::<serde_json::Value>(line) {
        Err(e) => JsonRpcResponse::failure(
            RequestId::Null,
            error_codes::PARSE_ERROR,
            format!("Parse error: {}", e),
        ),
        Ok(_) => JsonRpcResponse::failure(
            RequestId::Null,
            error_codes::INVALID_REQUEST,
            "Invalid request: expected a JSON-RPC request or notification",
        ),
    }
}

/// Transport trait for MCP communication.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Start the transport, returning channels for messages.
    async fn start(&mut self) -> Result<(mpsc::Receiver<Message>, mpsc::Sender<Message>)>;

    /// Stop the transport.
    ///
    /// Callers drop their outgoing sender first; stopping waits until every
    /// queued message has been written.
    async fn stop(&mut self) -> Result<()>;
}

/// Line-delimited transport over an arbitrary reader and writer.
pub struct LineTransport<R, W> {
    io: Option<(R, W)>,
    writer: Option<JoinHandle<()>>,
}

impl<R, W> LineTransport<R, W>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            io: Some((reader, writer)),
            writer: None,
        }
    }
}

/// Stdio transport for MCP.
pub type StdioTransport = LineTransport<tokio::io::Stdin, tokio::io::Stdout>;

impl StdioTransport {
    /// Create a transport over the process's stdin and stdout.
    pub fn stdio() -> Self {
        LineTransport::new(tokio::io::stdin(), tokio::io::stdout())
    }
}

#[async_trait]
impl<R, W> Transport for LineTransport<R, W>
where
    R: AsyncRead + Unpin + Send + Sync + 'static,
    W: AsyncWrite + Unpin + Send + Sync + 'static,
{
    async fn start(&mut self) -> Result<(mpsc::Receiver<Message>, mpsc::Sender<Message>)> {
        let (reader, writer) = self
            .io
            .take()
            .ok_or_else(|| Error::McpProtocol("Transport already started".to_string()))?;

        let (incoming_tx, incoming_rx) = mpsc::channel::<Message>(CHANNEL_CAPACITY);
        let (outgoing_tx, outgoing_rx) = mpsc::channel::<Message>(CHANNEL_CAPACITY);

        tokio::spawn(read_loop(reader, incoming_tx, outgoing_tx.clone()));
        self.writer = Some(tokio::spawn(write_loop(writer, outgoing_rx)));

        Ok((incoming_rx, outgoing_tx))
    }

    async fn stop(&mut self) -> Result<()> {
        if let Some(writer) = self.writer.take() {
            writer
                .await
                .map_err(|e| Error::McpProtocol(format!("Writer task failed: {}", e)))?;
        }
        Ok(())
    }
}

/// Reads lines until EOF. Rejected lines are answered directly on `replies`,
/// which is released at EOF so the writer can finish.
async fn read_loop<R: AsyncRead + Unpin>(
    reader: R,
    tx: mpsc::Sender<Message>,
    replies: mpsc::Sender<Message>,
) {
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) => {
                debug!("EOF on input, stopping transport");
                break;
            }
            Ok(_) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                trace!("Received: {}", trimmed);

                match Message::parse(trimmed) {
                    Some(msg) => {
                        if tx.send(msg).await.is_err() {
                            break;
                        }
                    }
                    None => {
                        warn!("Failed to parse message: {}", trimmed);
                        let reply = Message::Response(reject_line(trimmed));
                        if replies.send(reply).await.is_err() {
                            break;
                        }
                    }
                }
            }
            Err(e) => {
                error!("Error reading input: {}", e);
                break;
            }
        }
    }
}

async fn write_loop<W: AsyncWrite + Unpin>(mut writer: W, mut rx: mpsc::Receiver<Message>) {
    while let Some(msg) = rx.recv().await {
        let mut line = match msg.to_line() {
            Ok(line) => line,
            Err(e) => {
                error!("Error serializing message: {}", e);
                continue;
            }
        };

        trace!("Sending: {}", line);
        line.push('\n');

        if let Err(e) = writer.write_all(line.as_bytes()).await {
            error!("Error writing output: {}", e);
            break;
        }
        if let Err(e) = writer.flush().await {
            error!("Error flushing output: {}", e);
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tokio::io::{duplex, AsyncReadExt};

    #[test]
    fn test_parse_request_and_notification() {
        let req = Message::parse(r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#);
        assert!(matches!(req, Some(Message::Request(ref r)) if r.method == "ping"));

        let notif = Message::parse(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#);
        assert!(matches!(notif, Some(Message::Notification(_))));

        assert!(Message::parse("not json").is_none());
    }

    #[tokio::test]
    async fn test_line_transport_round_trip() {
        let (client_in, server_in) = duplex(1024);
        let (server_out, mut client_out) = duplex(1024);

        let mut transport = LineTransport::new(server_in, server_out);
        let (mut incoming, outgoing) = transport.start().await.unwrap();

        let mut client_in = client_in;
        client_in
            .write_all(b"\n{\"jsonrpc\":\"2.0\",\"id\":7,\"method\":\"ping\"}\n")
            .await
            .unwrap();

        match incoming.recv().await {
            Some(Message::Request(req)) => assert_eq!(req.id, RequestId::Number(7)),
            other => panic!("unexpected message: {:?}", other),
        }

        outgoing
            .send(Message::Response(JsonRpcResponse::success(
                RequestId::Number(7),
                json!({}),
            )))
            .await
            .unwrap();
        drop(outgoing);
        drop(client_in);
        transport.stop().await.unwrap();

        let mut written = String::new();
        client_out.read_to_string(&mut written).await.unwrap();
        assert_eq!(written, "{\"jsonrpc\":\"2.0\",\"id\":7,\"result\":{}}\n");
    }

    #[tokio::test]
    async fn test_stop_drains_queued_responses() {
        let (client_in, server_in) = duplex(1024);
        let (server_out, mut client_out) = duplex(4096);

        let mut transport = LineTransport::new(server_in, server_out);
        let (_incoming, outgoing) = transport.start().await.unwrap();
        drop(client_in);

        for id in 1..=5 {
            outgoing
                .send(Message::Response(JsonRpcResponse::success(
                    RequestId::Number(id),
                    json!({ "n": id }),
                )))
                .await
                .unwrap();
        }
        drop(outgoing);
        transport.stop().await.unwrap();

        let mut written = String::new();
        client_out.read_to_string(&mut written).await.unwrap();
        let ids: Vec<i64> = written
            .lines()
            .map(|l| serde_json::from_str::<Value>(l).unwrap()["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_malformed_lines_are_answered() {
        let (mut client_in, server_in) = duplex(1024);
        let (server_out, mut client_out) = duplex(1024);

        let mut transport = LineTransport::new(server_in, server_out);
        let (_incoming, outgoing) = transport.start().await.unwrap();
        drop(outgoing);

        client_in.write_all(b"not json\n[1,2]\n").await.unwrap();
        drop(client_in);
        transport.stop().await.unwrap();

        let mut written = String::new();
        client_out.read_to_string(&mut written).await.unwrap();
        let replies: Vec<Value> = written
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0]["id"], Value::Null);
        assert_eq!(replies[0]["error"]["code"], error_codes::PARSE_ERROR);
        assert_eq!(replies[1]["error"]["code"], error_codes::INVALID_REQUEST);
    }

    #[test]
    fn test_reject_line_codes() {
        let parse = reject_line("{oops");
        assert_eq!(parse.id, RequestId::Null);
        assert_eq!(parse.error.unwrap().code, error_codes::PARSE_ERROR);

        let shape = reject_line(r#"{"jsonrpc":"2.0","id":3}"#);
        assert_eq!(shape.error.unwrap().code, error_codes::INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_start_twice_fails() {
        let (_a, reader) = duplex(64);
        let (writer, _b) = duplex(64);
        let mut transport = LineTransport::new(reader, writer);

        assert!(transport.start().await.is_ok());
        assert!(transport.start().await.is_err());
    }
}
