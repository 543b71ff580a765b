use crate::effect::ExportJob;
use crate::{AppState, Effect, Msg, MISSING_EXPORT_MESSAGE, NO_URLS_MESSAGE};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ExportFileChosen(path) => {
            state.set_export_path(Some(path));
            Vec::new()
        }
        Msg::ExportFileCleared => {
            state.set_export_path(None);
            Vec::new()
        }
        Msg::DestinationChosen(path) => {
            state.set_destination(path);
            Vec::new()
        }
        Msg::UrlsEdited(raw) => {
            state.set_urls_input(raw);
            Vec::new()
        }
        Msg::GenerateClicked => {
            // One run at a time.
            if state.is_running() {
                return (state, Vec::new());
            }
            let Some(export_path) = state.export_path().map(|path| path.to_path_buf()) else {
                state.reject(MISSING_EXPORT_MESSAGE);
                return (state, Vec::new());
            };
            let urls = state.urls();
            if urls.is_empty() {
                state.reject(NO_URLS_MESSAGE);
                return (state, Vec::new());
            }

            let destination = state.effective_destination();
            let run_id = state.begin_run();
            vec![Effect::RunExport(ExportJob {
                run_id,
                export_path,
                destination,
                urls,
            })]
        }
        Msg::RunFinished { run_id, result } => {
            state.finish_run(run_id, result);
            Vec::new()
        }
    };

    (state, effects)
}
