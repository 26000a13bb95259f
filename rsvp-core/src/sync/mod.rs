//! Keeping the visible roster in step with local and remote storage.

mod orchestrator;
mod status;

pub use orchestrator::{Delivery, SubmitOutcome, SyncOrchestrator};
pub use status::{SyncSnapshot, SyncStatus};
