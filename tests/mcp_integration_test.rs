//! Binary integration tests.
//!
//! These spawn the built binary: once in one-shot mode to render a package
//! file, and once as an MCP server driven over stdio with JSON-RPC.

#![allow(deprecated)] // Allow deprecated cargo_bin for now

use assert_cmd::cargo::CommandCargoExt;
use assert_cmd::Command as AssertCommand;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use tempfile::TempDir;

/// MCP Test Client that communicates with the server via stdio
struct McpTestClient {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    request_id: i64,
}

impl McpTestClient {
    /// Spawn a new MCP server and connect to it
    fn spawn() -> Result<Self, Box<dyn std::error::Error>> {
        let mut child = Command::cargo_bin("context-assembler")?
            .arg("--transport")
            .arg("stdio")
            .arg("--now")
            .arg("2024-06-01T12:00:00Z")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let stdin = child.stdin.take().expect("Failed to get stdin");
        let stdout = BufReader::new(child.stdout.take().expect("Failed to get stdout"));

        Ok(Self {
            child,
            stdin,
            stdout,
            request_id: 0,
        })
    }

    /// Send a JSON-RPC request and get the response
    fn request(&mut self, method: &str, params: Value) -> Result<Value, Box<dyn std::error::Error>> {
        self.request_id += 1;
        let request = json!({
            "jsonrpc": "2.0",
            "id": self.request_id,
            "method": method,
            "params": params
        });

        writeln!(self.stdin, "{}", serde_json::to_string(&request)?)?;
        self.stdin.flush()?;

        let mut response_line = String::new();
        self.stdout.read_line(&mut response_line)?;

        Ok(serde_json::from_str(&response_line)?)
    }

    fn notify(&mut self, method: &str) -> Result<(), Box<dyn std::error::Error>> {
        let notification = json!({ "jsonrpc": "2.0", "method": method });
        writeln!(self.stdin, "{}", serde_json::to_string(&notification)?)?;
        self.stdin.flush()?;
        Ok(())
    }

    fn initialize(&mut self) -> Result<Value, Box<dyn std::error::Error>> {
        let response = self.request(
            "initialize",
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": { "name": "test-client", "version": "1.0.0" }
            }),
        )?;
        self.notify("notifications/initialized")?;
        Ok(response)
    }

    fn call_tool(&mut self, name: &str, arguments: Value) -> Result<Value, Box<dyn std::error::Error>> {
        self.request("tools/call", json!({ "name": name, "arguments": arguments }))
    }
}

impl Drop for McpTestClient {
    fn drop(&mut self) {
        let _ = self.child.kill();
    }
}

fn sample_package() -> Value {
    json!({
        "taskType": "bugfix",
        "priority": "high",
        "completenessScore": 72,
        "sessionId": "sess-42",
        "timestamp": "2024-06-01T11:00:00Z",
        "userInput": "Login fails after token refresh",
        "systemInstructions": ["Reproduce first", "Add a regression test"],
        "shortTermMemory": [
            {
                "timestamp": "2024-06-01T09:00:00Z",
                "userInput": "Investigated the auth middleware",
                "outcome": "partial_success",
                "actions": ["read", "grep"]
            }
        ]
    })
}

fn write_package(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("Failed to write package");
    path
}

fn result_text(response: &Value) -> &str {
    response["result"]["content"][0]["text"]
        .as_str()
        .expect("Expected text content")
}

// ============================================================================
// CLI Tests
// ============================================================================

#[test]
fn test_binary_help() {
    AssertCommand::cargo_bin("context-assembler")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("context packages"));
}

#[test]
fn test_binary_version() {
    AssertCommand::cargo_bin("context-assembler")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("context-assembler"));
}

#[test]
fn test_one_shot_json_package() {
    let dir = TempDir::new().unwrap();
    let path = write_package(&dir, "package.json", &sample_package().to_string());

    AssertCommand::cargo_bin("context-assembler")
        .unwrap()
        .arg("--package")
        .arg(&path)
        .arg("--now")
        .arg("2024-06-01T12:00:00Z")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# 🤖 AI Context Package"))
        .stdout(predicate::str::contains("**Task Type**: 🐛 Bug Fix"))
        .stdout(predicate::str::contains("**Priority**: 🔴 High"))
        .stdout(predicate::str::contains("> Login fails after token refresh"))
        .stdout(predicate::str::contains("1. Reproduce first\n2. Add a regression test"))
        .stdout(predicate::str::contains("*No project context available.*"))
        .stdout(predicate::str::contains("3 hours ago"))
        .stdout(predicate::str::contains("(2 actions)"))
        .stdout(predicate::str::contains("👌 Fair (72/100)"));
}

#[test]
fn test_one_shot_yaml_package() {
    let dir = TempDir::new().unwrap();
    let path = write_package(
        &dir,
        "package.yaml",
        "taskType: refactor\nuserInput: Split the billing module\n",
    );

    AssertCommand::cargo_bin("context-assembler")
        .unwrap()
        .arg("--package")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("> Split the billing module"))
        .stdout(predicate::str::contains(
            "*This is a new session with no previous conversation history.*",
        ));
}

#[test]
fn test_one_shot_rejects_malformed_package() {
    let dir = TempDir::new().unwrap();
    let path = write_package(&dir, "package.json", r#"{ "userInput": "missing type" }"#);

    AssertCommand::cargo_bin("context-assembler")
        .unwrap()
        .arg("--package")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_one_shot_rejects_bad_now() {
    let dir = TempDir::new().unwrap();
    let path = write_package(&dir, "package.json", r#"{ "taskType": "general" }"#);

    AssertCommand::cargo_bin("context-assembler")
        .unwrap()
        .arg("--package")
        .arg(&path)
        .arg("--now")
        .arg("next week")
        .assert()
        .failure();
}

// ============================================================================
// MCP Tests
// ============================================================================

#[test]
fn test_mcp_initialize() {
    let mut client = McpTestClient::spawn().expect("Failed to spawn MCP server");

    let response = client.initialize().expect("Failed to initialize");
    let result = &response["result"];
    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "context-assembler");
    assert!(result["capabilities"].get("tools").is_some());
}

#[test]
fn test_mcp_list_tools() {
    let mut client = McpTestClient::spawn().expect("Failed to spawn MCP server");
    client.initialize().expect("Failed to initialize");

    let response = client.request("tools/list", json!({})).expect("Failed to list tools");
    let tools = response["result"]["tools"]
        .as_array()
        .expect("tools should be array");

    let tool_names: Vec<&str> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
    assert!(tool_names.contains(&"assemble_context"));
    assert!(tool_names.contains(&"render_section"));
    assert!(tool_names.contains(&"derive_search_queries"));
    assert!(tool_names.contains(&"format_search_results"));
}

#[test]
fn test_mcp_assemble_context() {
    let mut client = McpTestClient::spawn().expect("Failed to spawn MCP server");
    client.initialize().expect("Failed to initialize");

    let response = client
        .call_tool("assemble_context", json!({ "package": sample_package() }))
        .expect("Failed to call assemble_context");

    assert_eq!(response["result"]["isError"], false);
    let text = result_text(&response);
    assert!(text.contains("## 📋 Current Task"));
    assert!(text.contains("3 hours ago"));
}

#[test]
fn test_mcp_assemble_is_deterministic() {
    let mut client = McpTestClient::spawn().expect("Failed to spawn MCP server");
    client.initialize().expect("Failed to initialize");

    let first = client
        .call_tool("assemble_context", json!({ "package": sample_package() }))
        .expect("Failed to call assemble_context");
    let second = client
        .call_tool("assemble_context", json!({ "package": sample_package() }))
        .expect("Failed to call assemble_context");

    assert_eq!(result_text(&first), result_text(&second));
}

#[test]
fn test_mcp_derive_search_queries() {
    let mut client = McpTestClient::spawn().expect("Failed to spawn MCP server");
    client.initialize().expect("Failed to initialize");

    let response = client
        .call_tool(
            "derive_search_queries",
            json!({ "task_type": "feature", "user_input": "Add a django REST api for invoices" }),
        )
        .expect("Failed to call derive_search_queries");

    let queries: Value = serde_json::from_str(result_text(&response)).unwrap();
    assert_eq!(queries["codeSearch"], "django rest api");
    assert_eq!(queries["librarySearch"], json!(["django"]));
    assert!(queries["webSearch"].as_str().unwrap().ends_with("latest"));
}

#[test]
fn test_mcp_invalid_package_is_tool_error() {
    let mut client = McpTestClient::spawn().expect("Failed to spawn MCP server");
    client.initialize().expect("Failed to initialize");

    let response = client
        .call_tool("assemble_context", json!({ "package": { "priority": "low" } }))
        .expect("Failed to call assemble_context");

    assert_eq!(response["result"]["isError"], true);
    assert!(result_text(&response).contains("Invalid context package"));
}

#[test]
fn test_mcp_invalid_tool() {
    let mut client = McpTestClient::spawn().expect("Failed to spawn MCP server");
    client.initialize().expect("Failed to initialize");

    let response = client
        .call_tool("nonexistent_tool", json!({}))
        .expect("Failed to call tool");
    assert_eq!(response["error"]["code"], -32602);
}

#[test]
fn test_mcp_unknown_method() {
    let mut client = McpTestClient::spawn().expect("Failed to spawn MCP server");
    client.initialize().expect("Failed to initialize");

    let response = client
        .request("resources/list", json!({}))
        .expect("Failed to send request");
    assert_eq!(response["error"]["code"], -32601);
}

#[test]
fn test_mcp_answers_everything_before_exit_on_eof() {
    let mut child = Command::cargo_bin("context-assembler")
        .expect("Failed to find binary")
        .arg("--transport")
        .arg("stdio")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to spawn MCP server");

    {
        let mut stdin = child.stdin.take().expect("Failed to get stdin");
        let mut lines = vec![json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": { "protocolVersion": "2024-11-05", "capabilities": {} }
        })];
        lines.push(json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }));
        for id in 2..=6 {
            lines.push(json!({
                "jsonrpc": "2.0",
                "id": id,
                "method": "tools/call",
                "params": {
                    "name": "derive_search_queries",
                    "arguments": { "task_type": "bugfix", "user_input": "fix the redis timeout" }
                }
            }));
        }
        for line in &lines {
            writeln!(stdin, "{}", line).expect("Failed to write request");
        }
        writeln!(stdin, "this is not json").expect("Failed to write garbage");
        // stdin closes here
    }

    let output = child.wait_with_output().expect("Failed to wait for server");
    assert!(output.status.success());

    let responses: Vec<Value> = String::from_utf8(output.stdout)
        .expect("stdout should be utf-8")
        .lines()
        .map(|l| serde_json::from_str(l).expect("Each line should be JSON"))
        .collect();

    let mut ids: Vec<i64> = responses.iter().filter_map(|r| r["id"].as_i64()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);

    let parse_errors: Vec<&Value> = responses.iter().filter(|r| r["id"].is_null()).collect();
    assert_eq!(parse_errors.len(), 1);
    assert_eq!(parse_errors[0]["error"]["code"], -32700);
}
