//! Scripted in-memory transport and record-map builders shared by the
//! integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use notion_reader::error::{NotionError, Result};
use notion_reader::transport::{Method, Transport};
use serde_json::{json, Value};

/// One request as the transport saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub body: Value,
}

/// Replays canned responses in order and records every request.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Vec<u8>>>>,
    requests: Mutex<Vec<Recorded>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, body: Value) -> Self {
        self.push(Ok(serde_json::to_vec(&body).unwrap()))
    }

    pub fn respond_raw(self, body: &str) -> Self {
        self.push(Ok(body.as_bytes().to_vec()))
    }

    pub fn fail(self, error: NotionError) -> Self {
        self.push(Err(error))
    }

    fn push(self, response: Result<Vec<u8>>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Vec<u8>> {
        let body = body
            .map(|bytes| serde_json::from_slice(&bytes).unwrap())
            .unwrap_or(Value::Null);
        self.requests.lock().unwrap().push(Recorded {
            method,
            path: path.to_string(),
            body,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(NotionError::Transport("script exhausted".into())))
    }
}

// ── Record builders ────────────────────────────────────────────

pub fn block(id: &str, block_type: &str, content: &[&str]) -> Value {
    json!({
        "id": id,
        "type": block_type,
        "content": content,
        "alive": true,
        "version": 1,
    })
}

pub fn titled(mut block: Value, title: &str) -> Value {
    block["properties"] = json!({"title": [[title]]});
    block
}

pub fn chunk(blocks: Vec<Value>, cursor: Value) -> Value {
    let table: serde_json::Map<String, Value> = blocks
        .into_iter()
        .map(|b| {
            let id = b["id"].as_str().unwrap().to_string();
            (id, json!({"role": "reader", "value": b}))
        })
        .collect();
    json!({"recordMap": {"block": table}, "cursor": cursor})
}

pub fn cursor_at(page_id: &str, index: u64) -> Value {
    json!({"stack": [[{"table": "block", "id": page_id, "index": index}]]})
}

pub fn end_cursor() -> Value {
    json!({"stack": []})
}
