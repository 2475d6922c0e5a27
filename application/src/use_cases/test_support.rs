//! In-memory chat backend and recording observer shared by use case tests.

use crate::ports::chat_backend::{ChatBackend, GatewayError};
use crate::ports::session_events::SessionObserver;
use async_trait::async_trait;
use mcp_chat_domain::{Message, Model, Prompt, RoleTranscripts, ServerRegistration, Thread, ThreadId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Backend operations that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Op {
    ListThreads,
    ListModels,
    ListServers,
    Fetch,
    Send,
    Register,
}

/// Behaves like the real backend: a successful send appends the prompt and
/// an echo reply to the thread's transcripts, and registering a server adds
/// it to the server listing.
#[derive(Default)]
pub(crate) struct FakeBackend {
    thread_ids: Mutex<Vec<ThreadId>>,
    transcripts: Mutex<HashMap<ThreadId, RoleTranscripts>>,
    models: Mutex<Vec<Model>>,
    servers: Mutex<Vec<String>>,
    failing: Mutex<HashSet<Op>>,
    fetch_gates: Mutex<HashMap<ThreadId, Arc<Notify>>>,
    send_gate: Mutex<Option<Arc<Notify>>>,
    /// Signalled each time a fetch reaches the backend
    pub fetch_started: Notify,
    /// Signalled each time a send reaches the backend
    pub send_started: Notify,
    calls: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threads(self, ids: &[&str]) -> Self {
        *self.thread_ids.lock().unwrap() = ids.iter().map(|id| ThreadId::new(*id)).collect();
        self
    }

    pub fn with_models(self, models: &[&str]) -> Self {
        *self.models.lock().unwrap() = models.iter().map(|m| Model::new(*m)).collect();
        self
    }

    pub fn with_servers(self, servers: &[&str]) -> Self {
        *self.servers.lock().unwrap() = servers.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_transcript(self, id: &str, human: &[&str], ai: &[&str], tool: &[&str]) -> Self {
        let owned = |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        self.transcripts.lock().unwrap().insert(
            ThreadId::new(id),
            RoleTranscripts::new(owned(human), owned(ai), owned(tool)),
        );
        self
    }

    pub fn fail(&self, op: Op) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn recover(&self, op: Op) {
        self.failing.lock().unwrap().remove(&op);
    }

    /// Hold fetches of `id` until the returned gate is notified
    pub fn gate_fetch(&self, id: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.fetch_gates
            .lock()
            .unwrap()
            .insert(ThreadId::new(id), Arc::clone(&gate));
        gate
    }

    /// Hold the next sends until the returned gate is notified
    pub fn gate_send(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.send_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, op: Op) -> Result<(), GatewayError> {
        if self.failing.lock().unwrap().contains(&op) {
            Err(GatewayError::Status(500))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ChatBackend for FakeBackend {
    async fn list_thread_ids(&self) -> Result<Vec<ThreadId>, GatewayError> {
        self.record("list_thread_ids".to_string());
        self.check(Op::ListThreads)?;
        Ok(self.thread_ids.lock().unwrap().clone())
    }

    async fn list_models(&self) -> Result<Vec<Model>, GatewayError> {
        self.record("list_models".to_string());
        self.check(Op::ListModels)?;
        Ok(self.models.lock().unwrap().clone())
    }

    async fn list_servers(&self) -> Result<Vec<String>, GatewayError> {
        self.record("list_servers".to_string());
        self.check(Op::ListServers)?;
        Ok(self.servers.lock().unwrap().clone())
    }

    async fn fetch_messages(&self, thread_id: &ThreadId) -> Result<RoleTranscripts, GatewayError> {
        self.record(format!("fetch_messages {}", thread_id));
        self.fetch_started.notify_one();
        let gate = self.fetch_gates.lock().unwrap().get(thread_id).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.check(Op::Fetch)?;
        Ok(self
            .transcripts
            .lock()
            .unwrap()
            .get(thread_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn send_prompt(
        &self,
        thread_id: &ThreadId,
        model: &Model,
        prompt: &Prompt,
    ) -> Result<(), GatewayError> {
        self.record(format!("send_prompt {} {} {}", thread_id, model, prompt));
        self.send_started.notify_one();
        let gate = self.send_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.check(Op::Send)?;

        let mut transcripts = self.transcripts.lock().unwrap();
        let transcript = transcripts.entry(thread_id.clone()).or_default();
        transcript.human.push(prompt.content().to_string());
        transcript.ai.push(format!("echo: {}", prompt.content()));
        drop(transcripts);

        let mut ids = self.thread_ids.lock().unwrap();
        if !ids.contains(thread_id) {
            ids.push(thread_id.clone());
        }
        Ok(())
    }

    async fn register_server(
        &self,
        registration: &ServerRegistration,
    ) -> Result<(), GatewayError> {
        self.record(format!(
            "register_server {} {}",
            registration.name(),
            registration.url()
        ));
        self.check(Op::Register)?;
        self.servers
            .lock()
            .unwrap()
            .push(registration.name().to_string());
        Ok(())
    }
}

/// Observer that records every notification
#[derive(Default)]
pub(crate) struct RecordingObserver {
    pub busy: Mutex<Vec<bool>>,
    pub timelines: Mutex<Vec<Vec<Message>>>,
    pub thread_counts: Mutex<Vec<usize>>,
}

impl SessionObserver for RecordingObserver {
    fn on_busy_changed(&self, busy: bool) {
        self.busy.lock().unwrap().push(busy);
    }

    fn on_timeline_changed(&self, _active: Option<&ThreadId>, timeline: &[Message]) {
        self.timelines.lock().unwrap().push(timeline.to_vec());
    }

    fn on_threads_changed(&self, threads: &[Thread]) {
        self.thread_counts.lock().unwrap().push(threads.len());
    }
}
