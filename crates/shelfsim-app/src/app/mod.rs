//! Use cases

pub mod accuracy;
pub mod scan_session;

pub use accuracy::{AccuracySample, AccuracyStats};
pub use scan_session::{ScanSession, SessionSummary};
