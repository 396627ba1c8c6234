//! Domain model for the practice tracker document.
//!
//! # Responsibility
//! - Define the fixed topic catalog and the question record.
//! - Define the edit intents produced by presentation layers.
//!
//! # Invariants
//! - The topic catalog is a process-wide constant; it is never derived from
//!   document text.
//! - Parsed questions are disposable projections of the raw document.

pub mod intent;
pub mod question;
pub mod topic;
