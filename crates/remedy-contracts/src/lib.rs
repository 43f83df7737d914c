//! # remedy-contracts
//!
//! Shared types and error definitions for the Remedy symptom triage engine.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate beyond small helpers on the data definitions and error types.

pub mod dosage;
pub mod error;
pub mod interaction;
pub mod medicine;
pub mod symptom;
