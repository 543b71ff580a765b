//! wp_docx core: pure form state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, ExportJob};
pub use msg::Msg;
pub use state::{
    parse_url_list, AppState, RunId, RunResult, RunStatus, DEFAULT_DESTINATION,
    MISSING_EXPORT_MESSAGE, NO_URLS_MESSAGE,
};
pub use update::update;
pub use view_model::{AppViewModel, Notice, NoticeKind};
