//! Visit analytics
//!
//! - `sink`: where visit records are written
//! - `recorder`: best-effort, time-bounded recording off the request path

pub mod recorder;
pub mod sink;

pub use recorder::VisitRecorder;
pub use sink::VisitSink;
