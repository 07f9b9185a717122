#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use debate_client::{ByteStream, DebateError, DebateRequest, DebateTransport, Result};
use futures::StreamExt;
use serde_json::{json, Value};
use tokio::sync::mpsc;

pub fn argument(claim: &str) -> Value {
    json!({
        "claim": claim,
        "reasoning": "Lower run cost frees budget",
        "evidence": "assumption: usage grows 10% per quarter",
        "risk": "Team needs retraining",
        "confidence": 0.75,
    })
}

pub fn verdict() -> Value {
    json!({
        "decision": "conditional_go",
        "winner": "pro",
        "confidence": 0.64,
        "summary": "Proceed once the pilot confirms latency targets",
        "scorecard": [
            {"criterion": "Cost", "weight": 0.3, "pro_score": 8, "con_score": 6, "rationale": "cheaper"},
            {"criterion": "Risk", "weight": 0.7, "pro_score": 5, "con_score": 7, "rationale": "migration"},
        ],
        "key_risks": ["data loss", "timeline slip"],
        "assumptions_to_verify": ["current SLA is 99.9%"],
        "next_48h_actions": ["run pilot", "collect quotes"],
        "needs_more_info": true,
        "clarifying_questions": ["What is the budget ceiling?"],
    })
}

pub fn frame(event: &str, payload: &Value) -> String {
    format!("event: {}\r\ndata: {}\r\n\r\n", event, payload)
}

/// The seven-event happy path, with one malformed frame in the middle.
pub fn full_debate_stream() -> String {
    let mut stream = String::new();
    stream += &frame("progress", &json!({"agent": "pro", "status": "thinking"}));
    stream += &frame("progress", &json!({"agent": "con", "status": "thinking"}));
    stream += &frame("result", &json!({"agent": "pro", "data": [argument("Быстрее"), argument("Cheaper")]}));
    stream += "event: progress\ndata: {not json\n\n";
    stream += &frame("progress", &json!({"agent": "judge", "status": "thinking"}));
    stream += &frame("result", &json!({"agent": "con", "data": [argument("Risky")]}));
    stream += &frame("result", &json!({"agent": "judge", "data": verdict()}));
    stream += &frame("done", &json!({}));
    stream
}

/// Split `bytes` into chunks of random length, ignoring character boundaries.
pub fn random_chunks(bytes: &[u8], rng: &mut fastrand::Rng, max: usize) -> Vec<Vec<u8>> {
    let mut chunks = Vec::new();
    let mut rest = bytes;
    while !rest.is_empty() {
        let take = rng.usize(1..=rest.len().min(max));
        let (chunk, tail) = rest.split_at(take);
        chunks.push(chunk.to_vec());
        rest = tail;
    }
    chunks
}

/// Transport replaying a fixed body.
pub struct ScriptedTransport {
    chunks: Vec<std::result::Result<Vec<u8>, String>>,
}

impl ScriptedTransport {
    pub fn new(chunks: Vec<std::result::Result<Vec<u8>, String>>) -> Self {
        Self { chunks }
    }

    pub fn from_chunks(chunks: Vec<Vec<u8>>) -> Self {
        Self::new(chunks.into_iter().map(Ok).collect())
    }
}

#[async_trait]
impl DebateTransport for ScriptedTransport {
    async fn open(&self, _request: &DebateRequest) -> Result<ByteStream> {
        let items: Vec<Result<Bytes>> = self
            .chunks
            .iter()
            .map(|chunk| match chunk {
                Ok(bytes) => Ok(Bytes::from(bytes.clone())),
                Err(message) => Err(DebateError::Network(message.clone())),
            })
            .collect();
        Ok(futures::stream::iter(items).boxed())
    }
}

/// Transport whose bodies are fed by the test, one channel per `open` call.
pub struct ChannelTransport {
    bodies: Mutex<VecDeque<mpsc::UnboundedReceiver<Bytes>>>,
}

impl ChannelTransport {
    pub fn new(runs: usize) -> (Self, Vec<mpsc::UnboundedSender<Bytes>>) {
        let mut senders = Vec::new();
        let mut bodies = VecDeque::new();
        for _ in 0..runs {
            let (tx, rx) = mpsc::unbounded_channel();
            senders.push(tx);
            bodies.push_back(rx);
        }
        (
            Self {
                bodies: Mutex::new(bodies),
            },
            senders,
        )
    }
}

#[async_trait]
impl DebateTransport for ChannelTransport {
    async fn open(&self, _request: &DebateRequest) -> Result<ByteStream> {
        let rx = self
            .bodies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| DebateError::Network("no body scripted".into()))?;

        let body = futures::stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|bytes| (Ok::<_, DebateError>(bytes), rx))
        });
        Ok(body.boxed())
    }
}
