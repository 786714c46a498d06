//! gomon control plane
//!
//! Wires the watcher, the supervisor, operator input and termination signals
//! into a single event loop.

pub mod control;
pub mod operator;
pub mod signals;

pub use control::{ControlPlane, Inputs};
pub use operator::ManualRestart;
pub use signals::ShutdownSignal;
