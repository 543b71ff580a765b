use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User attached a WordPress XML export file.
    ExportFileChosen(PathBuf),
    /// User removed the attached export file.
    ExportFileCleared,
    /// User picked where the document is saved.
    DestinationChosen(PathBuf),
    /// User edited the URL list (one URL per line).
    UrlsEdited(String),
    /// User clicked Generate.
    GenerateClicked,
    /// Engine finished a run.
    RunFinished {
        run_id: crate::RunId,
        result: crate::RunResult,
    },
}
