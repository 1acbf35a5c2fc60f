//! Scripted input timelines for headless runs.
//!
//! A script is a JSON array of `{ "at": seconds, "input": { "action": ... } }`
//! entries. Entries fire on the first tick whose start time reaches `at`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use lane_runner::InputEvent;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptEntry {
    pub at: f32,
    pub input: InputEvent,
}

#[derive(Debug, Clone, Default)]
pub struct InputScript {
    entries: Vec<ScriptEntry>,
    cursor: usize,
}

impl InputScript {
    pub fn new(mut entries: Vec<ScriptEntry>) -> Self {
        entries.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self { entries, cursor: 0 }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<ScriptEntry> =
            serde_json::from_str(json).context("input script is not a list of {at, input} entries")?;
        if let Some(bad) = entries.iter().find(|e| !e.at.is_finite() || e.at < 0.0) {
            anyhow::bail!("input script entry at {} is not a valid time", bad.at);
        }
        Ok(Self::new(entries))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries not yet fired.
    pub fn remaining(&self) -> usize {
        self.entries.len() - self.cursor
    }

    /// Fire every entry scheduled at or before `time`, in order.
    pub fn due(&mut self, time: f32) -> Vec<InputEvent> {
        let start = self.cursor;
        while self.cursor < self.entries.len() && self.entries[self.cursor].at <= time {
            self.cursor += 1;
        }
        self.entries[start..self.cursor].iter().map(|e| e.input).collect()
    }
}
