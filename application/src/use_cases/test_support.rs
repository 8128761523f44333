//! Test doubles shared by the use case tests.

use crate::ports::clock::Clock;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::llm_gateway::{
    ChatCompletionGateway, CompletionRequest, GatewayError, StreamHandle,
};
use crate::ports::progress::TurnObserver;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use raimon_domain::{
    FileName, Model, RepositoryError, StreamEvent, TranscriptRecord, TranscriptRepository,
};
use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

// ==================== Repository ====================

/// Map-backed repository; `BTreeMap` order gives the file name ordering.
#[derive(Default)]
pub(crate) struct InMemoryRepository {
    records: Mutex<BTreeMap<FileName, TranscriptRecord>>,
    fail_removals: AtomicBool,
}

impl InMemoryRepository {
    pub(crate) fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub(crate) fn fail_removals(&self) {
        self.fail_removals.store(true, Ordering::SeqCst);
    }
}

impl TranscriptRepository for InMemoryRepository {
    fn list(&self) -> Result<Vec<TranscriptRecord>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .values()
            .rev()
            .cloned()
            .collect())
    }

    fn write(&self, record: &TranscriptRecord) -> Result<(), RepositoryError> {
        self.records
            .lock()
            .unwrap()
            .insert(record.file_name.clone(), record.clone());
        Ok(())
    }

    fn remove(&self, file_name: &FileName) -> Result<(), RepositoryError> {
        if self.fail_removals.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("locked".to_string()));
        }
        self.records.lock().unwrap().remove(file_name);
        Ok(())
    }
}

// ==================== Clock ====================

/// Starts at 2025-01-01 12:00:00 and moves one second per reading.
pub(crate) struct SteppingClock {
    next: Mutex<NaiveDateTime>,
}

impl SteppingClock {
    pub(crate) fn new() -> Self {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        Self {
            next: Mutex::new(start),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> NaiveDateTime {
        let mut next = self.next.lock().unwrap();
        let now = *next;
        *next = now + TimeDelta::seconds(1);
        now
    }
}

// ==================== Gateway ====================

/// Scripted gateway: each call pops the next list of events.
#[derive(Default)]
pub(crate) struct MockGateway {
    scripts: Mutex<VecDeque<Result<Vec<StreamEvent>, GatewayError>>>,
    pub(crate) requests: Mutex<Vec<CompletionRequest>>,
}

impl MockGateway {
    pub(crate) fn with_answers(answers: &[&[&str]]) -> Self {
        let gateway = Self::default();
        for chunks in answers {
            let mut events: Vec<StreamEvent> = chunks
                .iter()
                .map(|c| StreamEvent::Delta(c.to_string()))
                .collect();
            events.push(StreamEvent::Completed(chunks.concat()));
            gateway.push(Ok(events));
        }
        gateway
    }

    pub(crate) fn push(&self, script: Result<Vec<StreamEvent>, GatewayError>) {
        self.scripts.lock().unwrap().push_back(script);
    }
}

#[async_trait]
impl ChatCompletionGateway for MockGateway {
    async fn stream_completion(
        &self,
        request: CompletionRequest,
    ) -> Result<StreamHandle, GatewayError> {
        self.requests.lock().unwrap().push(request);
        let script = self
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Other("No more responses".to_string())))?;
        Ok(StreamHandle::from_events(script))
    }
}

// ==================== Observers ====================

/// Records every callback so tests can check ordering.
#[derive(Default)]
pub(crate) struct RecordingObserver {
    pub(crate) calls: Mutex<Vec<String>>,
}

impl TurnObserver for RecordingObserver {
    fn on_stream_start(&self, model: &Model) {
        self.calls.lock().unwrap().push(format!("start:{}", model));
    }

    fn on_stream_chunk(&self, chunk: &str) {
        self.calls.lock().unwrap().push(format!("chunk:{}", chunk));
    }

    fn on_stream_end(&self) {
        self.calls.lock().unwrap().push("end".to_string());
    }
}

#[derive(Default)]
pub(crate) struct RecordingLogger {
    pub(crate) events: Mutex<Vec<&'static str>>,
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.events.lock().unwrap().push(event.event_type);
    }
}
