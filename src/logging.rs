//! Interaction logging and tracing setup.
//!
//! Every model invocation produces one [`Interaction`] that is fanned out to
//! the configured sinks. Sinks observe; they never change what the pipeline
//! returns.

use chrono::{DateTime, Local};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{info, warn};

use crate::config::PlannerConfig;
use crate::error::Result;

const FILE_PROMPT_CHARS: usize = 200;
const FILE_RESPONSE_CHARS: usize = 500;
const CONSOLE_PREVIEW_CHARS: usize = 100;

/// One completed agent call
#[derive(Debug, Clone)]
pub struct Interaction {
    pub agent_name: String,
    pub task_name: String,
    pub prompt: String,
    pub response: String,
    pub elapsed: Duration,
    pub timestamp: DateTime<Local>,
}

/// Destination for interaction records
pub trait InteractionSink: Send + Sync {
    fn record(&self, interaction: &Interaction) -> std::io::Result<()>;
}

/// Append-only text file
pub struct FileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileSink {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InteractionSink for FileSink {
    /// Blocking append of one short entry, made inline on the calling task.
    fn record(&self, interaction: &Interaction) -> std::io::Result<()> {
        let entry = format!(
            "{timestamp} - AGENT: {agent} | TASK: {task} | elapsed: {elapsed:.3}s\n  prompt: {prompt}\n  response: {response}\n",
            timestamp = interaction.timestamp.format("%Y-%m-%d %H:%M:%S"),
            agent = interaction.agent_name,
            task = interaction.task_name,
            elapsed = interaction.elapsed.as_secs_f64(),
            prompt = single_line(&truncate_chars(&interaction.prompt, FILE_PROMPT_CHARS)),
            response = single_line(&truncate_chars(&interaction.response, FILE_RESPONSE_CHARS)),
        );

        let mut file = self.file.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        file.write_all(entry.as_bytes())?;
        file.flush()
    }
}

/// Console output through `tracing`
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl InteractionSink for ConsoleSink {
    fn record(&self, interaction: &Interaction) -> std::io::Result<()> {
        info!(
            target: "trip_agent::interactions",
            agent = %interaction.agent_name,
            task = %interaction.task_name,
            elapsed_secs = interaction.elapsed.as_secs_f64(),
            prompt = %truncate_chars(&interaction.prompt, CONSOLE_PREVIEW_CHARS),
            response = %truncate_chars(&interaction.response, CONSOLE_PREVIEW_CHARS),
            "agent task completed"
        );
        Ok(())
    }
}

/// Keeps every record in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Interaction>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Interaction> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn task_names(&self) -> Vec<String> {
        self.records()
            .into_iter()
            .map(|interaction| interaction.task_name)
            .collect()
    }
}

impl InteractionSink for MemorySink {
    fn record(&self, interaction: &Interaction) -> std::io::Result<()> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(interaction.clone());
        Ok(())
    }
}

/// Shared handle over a set of sinks, cheap to clone
#[derive(Clone, Default)]
pub struct InteractionLog {
    sinks: Vec<Arc<dyn InteractionSink>>,
}

impl InteractionLog {
    /// A log with no sinks
    pub fn new() -> Self {
        Self::default()
    }

    /// Console only
    pub fn console() -> Self {
        Self::new().with_sink(Arc::new(ConsoleSink))
    }

    /// Console plus the configured log file, if any
    pub fn from_config(config: &PlannerConfig) -> Result<Self> {
        let mut log = Self::console();
        if let Some(path) = &config.log_file {
            let sink = FileSink::open(path)?;
            info!(path = %sink.path().display(), "interaction log file opened");
            log = log.with_sink(Arc::new(sink));
        }
        Ok(log)
    }

    pub fn with_sink(mut self, sink: Arc<dyn InteractionSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    pub fn record(&self, interaction: &Interaction) {
        for sink in &self.sinks {
            if let Err(err) = sink.record(interaction) {
                warn!(
                    task = %interaction.task_name,
                    "failed to write interaction log: {}",
                    err
                );
            }
        }
    }
}

impl fmt::Debug for InteractionLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionLog")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

/// Install the global fmt subscriber, honoring `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).try_init().ok();
}

/// Cut `text` to at most `max` characters, marking the cut with `...`
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

fn single_line(text: &str) -> String {
    text.replace('\n', " ")
}
