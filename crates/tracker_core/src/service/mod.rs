//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store reads/writes around the pure parser and mutator.
//! - Keep presentation layers decoupled from storage details.

pub mod tracker_service;
