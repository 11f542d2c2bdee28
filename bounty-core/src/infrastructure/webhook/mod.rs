pub mod payload;
pub mod signature;

pub use payload::{parse_event, EVENT_ISSUES, EVENT_ISSUE_COMMENT};
pub use signature::SignatureValidator;
