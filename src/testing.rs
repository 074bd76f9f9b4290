//! In-memory fakes for the external service traits.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::llm::{GenerationRequest, GenerationResponse, GenerationResult, TextGenerator};
use crate::storage::{ObjectLocation, ObjectStore};
use crate::warehouse::{QueryExecutor, StatementState, StatementStatus};

#[derive(Default)]
pub struct MemoryObjectStore {
    objects: HashMap<(String, String), Vec<u8>>,
}

impl MemoryObjectStore {
    pub fn with_object(mut self, bucket: &str, key: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.objects
            .insert((bucket.to_string(), key.to_string()), bytes.into());
        self
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn read_bytes_optional(&self, location: &ObjectLocation) -> Result<Option<Vec<u8>>> {
        Ok(self
            .objects
            .get(&(location.bucket.clone(), location.key.clone()))
            .cloned())
    }
}

/// What the fake warehouse does with the n-th submitted statement.
#[derive(Clone)]
pub enum Script {
    /// Report these states in order; the last one repeats.
    Statuses(Vec<StatementStatus>),
    /// Reject the submission itself.
    RejectSubmit,
}

impl Script {
    pub fn finishes_after(polls: usize) -> Self {
        let mut statuses = vec![StatementStatus::new(StatementState::Started); polls];
        statuses.push(StatementStatus::new(StatementState::Finished));
        Self::Statuses(statuses)
    }

    pub fn fails(error: &str) -> Self {
        Self::Statuses(vec![
            StatementStatus::new(StatementState::Submitted),
            StatementStatus::failed(error),
        ])
    }

    pub fn never_finishes() -> Self {
        Self::Statuses(vec![StatementStatus::new(StatementState::Started)])
    }
}

#[derive(Default)]
pub struct ScriptedExecutor {
    scripts: Mutex<VecDeque<Script>>,
    pending: Mutex<HashMap<String, VecDeque<StatementStatus>>>,
    submitted: Mutex<Vec<String>>,
    polls: Mutex<usize>,
}

impl ScriptedExecutor {
    pub fn new(scripts: Vec<Script>) -> Self {
        Self {
            scripts: Mutex::new(scripts.into()),
            ..Default::default()
        }
    }

    /// SQL text of every submission attempt, in order.
    pub fn submitted(&self) -> Vec<String> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn poll_count(&self) -> usize {
        *self.polls.lock().unwrap()
    }
}

#[async_trait]
impl QueryExecutor for ScriptedExecutor {
    async fn execute_statement(&self, sql: &str) -> Result<String> {
        let mut submitted = self.submitted.lock().unwrap();
        submitted.push(sql.to_string());
        let id = format!("stmt-{}", submitted.len());

        let script = self
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Script::finishes_after(0));
        match script {
            Script::RejectSubmit => Err(AppError::query("submit", "ValidationException")),
            Script::Statuses(statuses) => {
                self.pending.lock().unwrap().insert(id.clone(), statuses.into());
                Ok(id)
            }
        }
    }

    async fn describe_statement(&self, statement_id: &str) -> Result<StatementStatus> {
        *self.polls.lock().unwrap() += 1;
        let mut pending = self.pending.lock().unwrap();
        let statuses = pending
            .get_mut(statement_id)
            .ok_or_else(|| AppError::query(statement_id, "unknown statement"))?;
        if statuses.len() > 1 {
            Ok(statuses.pop_front().unwrap())
        } else {
            Ok(statuses.front().cloned().unwrap())
        }
    }
}

/// Model fake that replays one reply and records prompts.
pub struct FakeGenerator {
    reply: Option<Vec<Option<String>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl FakeGenerator {
    /// Replies with a single result carrying `text`.
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Some(vec![Some(text.to_string())]),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Replies with an empty `results` list.
    pub fn empty() -> Self {
        Self {
            reply: Some(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every call errors.
    pub fn failing() -> Self {
        Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Some(texts) => Ok(GenerationResponse {
                results: texts
                    .iter()
                    .map(|text| GenerationResult {
                        output_text: text.clone(),
                    })
                    .collect(),
            }),
            None => Err(AppError::model("AccessDeniedException")),
        }
    }
}
