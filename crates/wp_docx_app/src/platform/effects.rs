use engine_logging::{engine_info, engine_warn};
use wp_docx_core::{Effect, ExportJob, Msg, RunResult};
use wp_docx_engine::{ExportRequest, ExportSettings, ExportSummary, Exporter, UrlFilter};

/// Executes core effects synchronously and turns their outcome back into messages.
pub struct EffectRunner {
    exporter: Exporter,
    last_summary: Option<ExportSummary>,
}

impl EffectRunner {
    pub fn new(settings: ExportSettings) -> Self {
        Self {
            exporter: Exporter::new(settings),
            last_summary: None,
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        effects
            .into_iter()
            .map(|effect| match effect {
                Effect::RunExport(job) => self.run_export(job),
            })
            .collect()
    }

    pub fn take_summary(&mut self) -> Option<ExportSummary> {
        self.last_summary.take()
    }

    fn run_export(&mut self, job: ExportJob) -> Msg {
        engine_info!(
            "RunExport run_id={} export={:?} urls={}",
            job.run_id,
            job.export_path,
            job.urls.len()
        );
        let request = ExportRequest::new(
            job.export_path,
            job.destination,
            UrlFilter::new(&job.urls),
        );
        let result = match self.exporter.run(&request) {
            Ok(summary) => {
                let result = RunResult::Saved {
                    output_path: summary.output_path.clone(),
                    matched: summary.matched,
                };
                self.last_summary = Some(summary);
                result
            }
            Err(err) => {
                engine_warn!("Run {} failed ({}): {}", job.run_id, err.kind(), err);
                RunResult::Failed {
                    message: err.to_string(),
                }
            }
        };
        Msg::RunFinished {
            run_id: job.run_id,
            result,
        }
    }
}
