use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    RunExport(ExportJob),
}

/// Everything the engine needs for one run, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    pub run_id: crate::RunId,
    pub export_path: PathBuf,
    pub destination: PathBuf,
    pub urls: Vec<String>,
}
