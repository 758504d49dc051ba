#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::{Value, json};
use tempfile::TempDir;

use talentdir::error::{DirectoryError, Result};
use talentdir::remote::{ListRequest, RemoteClient};

// ============================================================================
// Binary runner
// ============================================================================

/// Runs the `talentdir` binary against a config file inside a temp directory
pub struct DirectoryTest {
    pub temp_dir: TempDir,
    binary_path: PathBuf,
}

impl DirectoryTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        DirectoryTest {
            temp_dir,
            binary_path: PathBuf::from(env!("CARGO_BIN_EXE_talentdir")),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("config.yaml")
    }

    pub fn write_config(&self, yaml: &str) {
        std::fs::write(self.config_path(), yaml).expect("Failed to write config");
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(&self.binary_path)
            .arg("--config")
            .arg(self.config_path())
            .args(args)
            .current_dir(self.temp_dir.path())
            .env_remove("TALENTDIR_API_URL")
            .env_remove("TALENTDIR_CONFIG")
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to execute talentdir")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }
}

// ============================================================================
// Mock directory API
// ============================================================================

#[derive(Debug, Clone)]
enum Outcome {
    Body(Value),
    Unreachable,
    Status(u16),
}

/// One scripted answer, returned after `delay`
#[derive(Debug, Clone)]
pub struct Reply {
    delay: Duration,
    outcome: Outcome,
}

impl Reply {
    pub fn body(body: Value) -> Self {
        Self {
            delay: Duration::ZERO,
            outcome: Outcome::Body(body),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            delay: Duration::ZERO,
            outcome: Outcome::Unreachable,
        }
    }

    pub fn status(code: u16) -> Self {
        Self {
            delay: Duration::ZERO,
            outcome: Outcome::Status(code),
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Default)]
struct MockState {
    requests: Vec<ListRequest>,
    replies: VecDeque<Reply>,
}

/// Recording `RemoteClient` with scripted replies.
///
/// Replies are consumed in request order; once the script runs out every
/// request gets an empty array.
#[derive(Clone, Default)]
pub struct MockClient {
    state: Arc<Mutex<MockState>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies(replies: impl IntoIterator<Item = Reply>) -> Self {
        let client = Self::new();
        client.state.lock().replies.extend(replies);
        client
    }

    pub fn push(&self, reply: Reply) {
        self.state.lock().replies.push_back(reply);
    }

    pub fn requests(&self) -> Vec<ListRequest> {
        self.state.lock().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().requests.len()
    }
}

impl RemoteClient for MockClient {
    async fn get_json(&self, request: &ListRequest) -> Result<Value> {
        let reply = {
            let mut state = self.state.lock();
            state.requests.push(request.clone());
            state.replies.pop_front()
        };
        let reply = reply.unwrap_or_else(|| Reply::body(json!([])));

        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }

        match reply.outcome {
            Outcome::Body(body) => Ok(body),
            Outcome::Unreachable => Err(DirectoryError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
            Outcome::Status(code) => Err(DirectoryError::Status {
                status: reqwest::StatusCode::from_u16(code).expect("valid status code"),
                url: format!("http://mock{}", request.path),
            }),
        }
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn talent_json(id: &str, name: &str, skills: &[&str], cohort: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "role": "Frontend Developer",
        "skills": skills,
        "availability": "Full-time",
        "cohort": cohort,
    })
}

pub fn project_json(title: &str, project_type: &str, tech: &[&str], created_at: &str) -> Value {
    json!({
        "_id": title.to_lowercase().replace(' ', "-"),
        "title": title,
        "description": format!("{title} description"),
        "projectType": project_type,
        "techStack": tech,
        "createdBy": ["Ama Mensah"],
        "createdAt": created_at,
    })
}

/// `count` talents named `Talent 001`, `Talent 002`, ...
pub fn numbered_talents(count: usize) -> Vec<Value> {
    (1..=count)
        .map(|i| {
            talent_json(
                &format!("t{i}"),
                &format!("Talent {i:03}"),
                &["React"],
                "Cohort 5",
            )
        })
        .collect()
}

/// Let spawned tasks run until they block
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}
