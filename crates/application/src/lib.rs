//! dnsdig Application Layer
//!
//! Ports implemented by the infrastructure crate, the dig dispatcher with
//! its worker pool, and the admission use cases feeding it.
pub mod dispatch;
pub mod ports;
pub mod services;
pub mod use_cases;

pub use dispatch::{DigDispatcher, DigRequest, DigResult, ResultHandle};
