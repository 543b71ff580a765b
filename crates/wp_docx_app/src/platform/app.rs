use std::collections::VecDeque;
use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use engine_logging::{engine_debug, engine_error, engine_info};
use wp_docx_core::{update, AppState, Msg, RunStatus};
use wp_docx_engine::ExportSettings;

use super::cli::Args;
use super::effects::EffectRunner;
use super::{logging, render};

pub fn run_app() -> ExitCode {
    let args = Args::parse();
    logging::initialize(args.log, logging::level_for(args.verbose));

    match run(args) {
        Ok(code) => code,
        Err(err) => {
            engine_error!("wp_docx failed: {err:#}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let mut settings = ExportSettings::default();
    if let Some(title) = args.title.clone() {
        settings.document_title = title;
    }

    let mut inbox: VecDeque<Msg> = VecDeque::new();
    if let Some(export) = args.export.clone() {
        inbox.push_back(Msg::ExportFileChosen(export));
    }
    if let Some(out) = args.out.clone() {
        inbox.push_back(Msg::DestinationChosen(out));
    }
    inbox.push_back(Msg::UrlsEdited(args.url_input()?));
    inbox.push_back(Msg::GenerateClicked);

    let mut state = AppState::new();
    let mut runner = EffectRunner::new(settings);
    while let Some(msg) = inbox.pop_front() {
        engine_debug!("Msg {msg:?}");
        let (next, effects) = update(state, msg);
        state = next;
        inbox.extend(runner.run(effects));
    }

    let view = state.view();
    let summary = runner.take_summary();
    let stdout = io::stdout();
    let stderr = io::stderr();
    render::render(
        &mut stdout.lock(),
        &mut stderr.lock(),
        &view,
        summary.as_ref(),
        args.json,
    )
    .context("write run result")?;

    match view.status {
        RunStatus::Succeeded { matched, .. } => {
            engine_info!("Export finished with {matched} matched items");
            Ok(ExitCode::SUCCESS)
        }
        _ => Ok(ExitCode::FAILURE),
    }
}
