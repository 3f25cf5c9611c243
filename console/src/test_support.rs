//! Test utilities for the console crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Only compiled for tests or with the `test-support` feature.

use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::Error;
use crate::domain::ports::{HttpTransport, NavigationError, Navigator, Notifier};

/// HTTP verb of a recorded or scripted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`.
    Get,
    /// `POST`.
    Post,
    /// `PATCH`.
    Patch,
    /// `DELETE`.
    Delete,
}

/// One request seen by [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Verb.
    pub method: Method,
    /// Path relative to the base URL.
    pub path: String,
    /// Query parameters, empty for writes.
    pub params: Vec<(String, String)>,
    /// JSON body, `None` for reads and deletes.
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
struct Script {
    queued: HashMap<(Method, String), VecDeque<Result<Value, Error>>>,
    fallback: HashMap<(Method, String), Result<Value, Error>>,
    calls: Vec<RecordedCall>,
}

/// Transport answering from a script and recording every request.
///
/// Queued responses are consumed in order; once a route's queue is empty
/// its standing response (if any) answers. Unscripted routes fail with
/// [`crate::domain::ErrorCode::NotFound`].
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: Mutex<Script>,
}

impl ScriptedTransport {
    /// Transport with no scripted routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every `method path` request with `response`.
    pub fn always(&self, method: Method, path: &str, response: Result<Value, Error>) {
        self.lock()
            .fallback
            .insert((method, path.to_owned()), response);
    }

    /// Answer the next unanswered `method path` request with `response`.
    pub fn once(&self, method: Method, path: &str, response: Result<Value, Error>) {
        self.lock()
            .queued
            .entry((method, path.to_owned()))
            .or_default()
            .push_back(response);
    }

    /// Every request so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    /// Number of `method path` requests so far.
    pub fn call_count(&self, method: Method, path: &str) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.method == method && call.path == path)
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn answer(&self, call: RecordedCall) -> Result<Value, Error> {
        let mut script = self.lock();
        let route = (call.method, call.path.clone());
        script.calls.push(call);
        if let Some(response) = script.queued.get_mut(&route).and_then(VecDeque::pop_front) {
            return response;
        }
        script.fallback.get(&route).cloned().unwrap_or_else(|| {
            Err(Error::not_found(format!(
                "no scripted response for {:?} {}",
                route.0, route.1
            )))
        })
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn get(&self, path: &str, params: &[(String, String)]) -> Result<Value, Error> {
        self.answer(RecordedCall {
            method: Method::Get,
            path: path.to_owned(),
            params: params.to_vec(),
            body: None,
        })
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, Error> {
        self.answer(RecordedCall {
            method: Method::Post,
            path: path.to_owned(),
            params: Vec::new(),
            body: Some(body.clone()),
        })
    }

    async fn patch(&self, path: &str, body: &Value) -> Result<Value, Error> {
        self.answer(RecordedCall {
            method: Method::Patch,
            path: path.to_owned(),
            params: Vec::new(),
            body: Some(body.clone()),
        })
    }

    async fn delete(&self, path: &str) -> Result<Value, Error> {
        self.answer(RecordedCall {
            method: Method::Delete,
            path: path.to_owned(),
            params: Vec::new(),
            body: None,
        })
    }
}

/// Notifier keeping every message it was asked to show.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    /// Messages shown so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_owned());
    }
}

/// Navigator accepting every path and keeping the visit order.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    /// Paths pushed so far, oldest first.
    pub fn visits(&self) -> Vec<String> {
        self.visits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, path: &str) -> Result<(), NavigationError> {
        self.visits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_owned());
        Ok(())
    }
}

/// Temporary directory plus a token file path inside it.
///
/// The file itself is not created. Keep the directory alive for as long as
/// the path is used.
///
/// # Errors
///
/// Returns an error when the temporary directory cannot be created.
pub fn temp_token_path() -> std::io::Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("token");
    Ok((dir, path))
}
