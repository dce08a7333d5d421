//! Dig dispatch engine.
//!
//! Requests are admitted into a bounded pending queue. A single matching
//! task pairs each pending request with the inbox of an idle worker; the
//! worker digs and writes the outcome into the request's result channel.

mod broker;
mod request;
mod stats;
mod worker;

pub use broker::DigDispatcher;
pub use request::{DigRequest, DigResult, ResultHandle};
pub use stats::{DispatcherStats, DispatcherStatsSnapshot};
pub use worker::{DigWorker, Inbox, WorkerHandle};
