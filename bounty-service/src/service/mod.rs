pub mod flow;
pub mod metrics;

pub use flow::ServiceFlow;
pub use metrics::Metrics;
