mod closeout;
mod commands;
pub mod event_processor;
mod reconcile;

pub use event_processor::{
    process_tracker_event, EventDisposition, EventProcessor, ReconcileContext, ReconcileEngine,
};
