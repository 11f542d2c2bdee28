//! Domain layer: pure bounty lifecycle logic, no I/O.

pub mod address;
pub mod command;
pub mod comment;
pub mod label;
pub mod lifecycle;
pub mod model;
pub mod record;

pub use address::{bounty_address, derive_bounty_addresses, BountyAddresses};
pub use command::IssueCommand;
pub use label::BountyLabel;
pub use lifecycle::BountyState;
pub use model::{BountyScope, IssueRef, IssueSnapshot, RepoLocator, TrackerEvent};
pub use record::BountyRecord;
