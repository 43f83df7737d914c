//! Pharmacy reference workflows.
//!
//! Each scenario is a self-contained module that drives a shared
//! `SymptomEngine` with mock patient data and prints what a pharmacist's
//! console would show.

pub mod medication_review;
pub mod symptom_check;
