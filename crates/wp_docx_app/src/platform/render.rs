use std::io::Write;

use serde_json::json;
use wp_docx_core::{AppViewModel, NoticeKind, RunStatus};
use wp_docx_engine::ExportSummary;

/// Print the run outcome: the notice as text, or a JSON object with `--json`.
pub fn render(
    out: &mut dyn Write,
    err: &mut dyn Write,
    view: &AppViewModel,
    summary: Option<&ExportSummary>,
    as_json: bool,
) -> std::io::Result<()> {
    let Some(notice) = view.notice.as_ref() else {
        return Ok(());
    };

    if as_json {
        let value = match (&view.status, summary) {
            (RunStatus::Succeeded { .. }, Some(summary)) => json!({
                "status": "success",
                "message": notice.message,
                "summary": summary,
            }),
            _ => json!({
                "status": "error",
                "message": notice.message,
            }),
        };
        return writeln!(out, "{value:#}");
    }

    match notice.kind {
        NoticeKind::Success => {
            writeln!(out, "{}: {}", notice.title, notice.message)?;
            if let Some(summary) = summary {
                writeln!(
                    out,
                    "{} of {} export items matched, {} blocks written",
                    summary.matched, summary.items_seen, summary.blocks
                )?;
            }
            Ok(())
        }
        NoticeKind::Error => writeln!(err, "{}: {}", notice.title, notice.message),
    }
}
