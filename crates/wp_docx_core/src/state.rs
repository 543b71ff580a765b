use std::path::{Path, PathBuf};

use crate::view_model::{AppViewModel, Notice};

pub type RunId = u64;

/// Where the document is saved when the user picks no destination.
pub const DEFAULT_DESTINATION: &str = "wp-export-structured.docx";
pub const MISSING_EXPORT_MESSAGE: &str = "Please attach your WordPress XML export file.";
pub const NO_URLS_MESSAGE: &str = "Please enter at least one URL.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RunStatus {
    #[default]
    Idle,
    Running {
        run_id: RunId,
    },
    Succeeded {
        output_path: PathBuf,
        matched: usize,
    },
    /// Inputs failed validation; no run was started.
    Rejected {
        message: String,
    },
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunResult {
    Saved { output_path: PathBuf, matched: usize },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    export_path: Option<PathBuf>,
    destination: Option<PathBuf>,
    urls_input: String,
    status: RunStatus,
    last_run_id: RunId,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            status: self.status.clone(),
            notice: Notice::for_status(&self.status),
        }
    }

    pub fn status(&self) -> &RunStatus {
        &self.status
    }

    pub fn is_running(&self) -> bool {
        matches!(self.status, RunStatus::Running { .. })
    }

    pub fn export_path(&self) -> Option<&Path> {
        self.export_path.as_deref()
    }

    pub fn effective_destination(&self) -> PathBuf {
        self.destination
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DESTINATION))
    }

    pub fn urls(&self) -> Vec<String> {
        parse_url_list(&self.urls_input)
    }

    pub(crate) fn set_export_path(&mut self, path: Option<PathBuf>) {
        // An empty path is what a cancelled file dialog hands back.
        self.export_path = path.filter(|p| !p.as_os_str().is_empty());
    }

    pub(crate) fn set_destination(&mut self, path: PathBuf) {
        self.destination = (!path.as_os_str().is_empty()).then_some(path);
    }

    pub(crate) fn set_urls_input(&mut self, raw: String) {
        self.urls_input = raw;
    }

    pub(crate) fn begin_run(&mut self) -> RunId {
        self.last_run_id += 1;
        self.status = RunStatus::Running {
            run_id: self.last_run_id,
        };
        self.last_run_id
    }

    pub(crate) fn reject(&mut self, message: &str) {
        self.status = RunStatus::Rejected {
            message: message.to_string(),
        };
    }

    /// Apply a run result; results for runs other than the current one are ignored.
    pub(crate) fn finish_run(&mut self, run_id: RunId, result: RunResult) {
        match self.status {
            RunStatus::Running { run_id: current } if current == run_id => {}
            _ => return,
        }
        self.status = match result {
            RunResult::Saved {
                output_path,
                matched,
            } => RunStatus::Succeeded {
                output_path,
                matched,
            },
            RunResult::Failed { message } => RunStatus::Failed { message },
        };
    }
}

/// Split newline-separated input into normalized URLs: whitespace trimmed,
/// trailing `/` removed, blank lines and duplicates dropped, order kept.
pub fn parse_url_list(raw: &str) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    for line in raw.lines() {
        let url = line.trim().trim_end_matches('/');
        if url.is_empty() || urls.iter().any(|seen| seen == url) {
            continue;
        }
        urls.push(url.to_string());
    }
    urls
}
