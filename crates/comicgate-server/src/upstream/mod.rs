//! Upstream gateway: signs, forwards and bounds calls to the catalog API

pub mod deadline;
pub mod gateway;
pub mod target;

pub use deadline::{Deadline, DeadlineExceeded};
pub use gateway::UpstreamGateway;
pub use target::target_url;
