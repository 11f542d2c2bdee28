pub mod config;
pub mod ledger;
pub mod tracker;
pub mod webhook;
