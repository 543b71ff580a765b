use crate::RunStatus;

/// What the shell shows after a message is applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub status: RunStatus,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// The popup shown once a run is accepted, rejected or finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn for_status(status: &RunStatus) -> Option<Self> {
        match status {
            RunStatus::Idle | RunStatus::Running { .. } => None,
            RunStatus::Succeeded { output_path, .. } => Some(Notice {
                kind: NoticeKind::Success,
                title: "Success".to_string(),
                message: format!("File saved as {}", output_path.display()),
            }),
            RunStatus::Rejected { message } | RunStatus::Failed { message } => Some(Notice {
                kind: NoticeKind::Error,
                title: "Error".to_string(),
                message: message.clone(),
            }),
        }
    }
}
