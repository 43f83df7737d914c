//! Remedy Pharmacy Reference Runtime: Demo CLI
//!
//! Runs the pharmacy workflows against the built-in knowledge tables, or a
//! TOML knowledge document given with `--knowledge`.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- symptom-check "headache, fever"
//!   cargo run -p demo -- medication-review M012 M008 --age 71 --weight 64
//!   cargo run -p demo -- advice "common cold"
//!   cargo run -p demo -- dosage M001 --age 5 --weight 20
//!   cargo run -p demo -- --json symptom-check "cough" --suppress-on-critical

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use remedy_contracts::error::{RemedyError, RemedyResult};
use remedy_core::SymptomEngine;
use remedy_ref_pharmacy::{
    build_engine,
    mock_data::{self, PatientProfile},
    scenarios::{
        medication_review,
        symptom_check::{self, TriagePolicy},
    },
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Remedy: symptom triage and medicine recommendation demo.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "Remedy pharmacy reference runtime demo",
    long_about = "Runs Remedy pharmacy workflows: symptom triage, ranked medicine\n\
                  recommendations, interaction checks and dosage guidance."
)]
struct Cli {
    /// Knowledge TOML to use instead of the built-in pharmacy tables.
    #[arg(long, global = true)]
    knowledge: Option<PathBuf>,

    /// Engine config TOML (max_recommendations, otc_only, ...).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print reports as JSON instead of console text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run both pharmacy scenarios over every mock patient.
    RunAll,
    /// Triage comma-separated symptoms and recommend medicines.
    SymptomCheck {
        /// Symptoms as typed at the console, e.g. "headache, fever".
        symptoms: String,
        /// Withhold recommendations when a symptom needs a clinician.
        #[arg(long)]
        suppress_on_critical: bool,
    },
    /// Check held medicines for interactions, side effects and dosage.
    MedicationReview {
        /// Catalog ids, e.g. M012 M008.
        #[arg(required_unless_present = "patient")]
        ids: Vec<String>,
        /// Use the medicines, age and weight of a mock patient (e.g. pt-1003).
        #[arg(
            long,
            value_parser = parse_patient,
            conflicts_with_all = ["ids", "age", "weight"]
        )]
        patient: Option<&'static PatientProfile>,
        #[arg(long, default_value_t = 30)]
        age: i32,
        #[arg(long, default_value_t = 70.0)]
        weight: f64,
    },
    /// Show health advice for a condition.
    Advice { condition: String },
    /// Show dosage guidance for one medicine.
    Dosage {
        medicine_id: String,
        #[arg(long)]
        age: i32,
        #[arg(long)]
        weight: f64,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for per-operation traces.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> RemedyResult<()> {
    let engine = build_engine(cli.knowledge.as_deref(), cli.config.as_deref())?;
    debug!(json = cli.json, "dispatching command");

    match cli.command {
        Command::RunAll => run_all(&engine),
        Command::SymptomCheck {
            symptoms,
            suppress_on_critical,
        } => {
            let policy = if suppress_on_critical {
                TriagePolicy::SuppressOnCritical
            } else {
                TriagePolicy::Independent
            };
            let report = symptom_check::consult(&engine, &symptoms, policy);
            if cli.json {
                print_json(&report)
            } else {
                symptom_check::print_report(&report);
                Ok(())
            }
        }
        Command::MedicationReview {
            ids,
            patient,
            age,
            weight,
        } => {
            let review = match patient {
                Some(p) => medication_review::review(
                    &engine,
                    p.medications.iter().copied(),
                    p.age_years,
                    p.weight_kg,
                ),
                None => medication_review::review(&engine, &ids, age, weight),
            };
            if cli.json {
                print_json(&review)
            } else {
                medication_review::print_review(&review);
                Ok(())
            }
        }
        Command::Advice { condition } => {
            let advice = engine.health_advice(&condition);
            if cli.json {
                return print_json(&advice);
            }
            if advice.is_empty() {
                println!("No advice recorded for '{}'.", condition);
            } else {
                println!("Advice for {}:", condition.trim());
                for line in &advice {
                    println!("  - {}", line);
                }
            }
            Ok(())
        }
        Command::Dosage {
            medicine_id,
            age,
            weight,
        } => {
            let text = engine.suggested_dosage(&medicine_id, age, weight);
            if cli.json {
                print_json(&text)
            } else {
                println!("{}", text);
                Ok(())
            }
        }
    }
}

fn parse_patient(id: &str) -> Result<&'static PatientProfile, String> {
    mock_data::patient(id).ok_or_else(|| {
        let known: Vec<&str> = mock_data::PATIENTS.iter().map(|p| p.patient_id).collect();
        format!("unknown mock patient '{}' (known: {})", id, known.join(", "))
    })
}

// ── Scenario dispatch ─────────────────────────────────────────────────────────

fn run_all(engine: &SymptomEngine) -> RemedyResult<()> {
    print_banner();
    symptom_check::run_scenario(engine);
    medication_review::run_scenario(engine);
    println!("All scenarios completed successfully.");
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> RemedyResult<()> {
    let text = serde_json::to_string_pretty(value).map_err(|e| RemedyError::Serialization {
        reason: e.to_string(),
    })?;
    println!("{}", text);
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("Remedy: Symptom Triage & Medicine Recommendation");
    println!("Pharmacy Reference Demo");
    println!("=================================================");
    println!();
    println!("Per consultation:");
    println!("  [1] Symptoms normalized (trimmed, lower-cased, deduplicated)");
    println!("  [2] Triage against the critical symptom set");
    println!("  [3] Medicines ranked by how many symptoms they cover");
    println!("  [4] Precautions merged, specialist scores summed");
    println!("  [5] Held medicines cross-checked for interactions and dosage");
    println!();
    println!("All data is fictional. This is not medical advice.");
    println!();
}
