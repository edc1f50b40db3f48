mod state;
mod status;

pub use state::PreviewState;
pub use status::{READY_STATUS, StatusLine};
