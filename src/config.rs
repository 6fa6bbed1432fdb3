// src/config.rs

use std::env;
use dotenvy::dotenv;
use serde::Deserialize;

/// Number of questions in a randomly generated practice test when the caller
/// does not ask for a specific count.
pub const DEFAULT_TEST_SIZE: i64 = 10;

/// Target number of questions drawn when composing an exam.
pub const DEFAULT_EXAM_SIZE: i64 = 30;

/// Default exam duration in minutes.
pub const DEFAULT_EXAM_DURATION_MIN: i64 = 30;

/// Minimum percentage of correct answers for a submission to pass.
pub const DEFAULT_PASS_THRESHOLD: f64 = 70.0;

/// A category created by the seeding routine when none exist yet.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedCategory {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,

    /// Pass threshold for graded submissions, percent. `PASS_THRESHOLD`.
    pub pass_threshold: f64,

    /// Categories the seeding routine creates. `SEED_CATEGORIES` as a JSON
    /// array of `{"name": ..., "description": ...}` objects.
    pub seed_categories: Vec<SeedCategory>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:autotest.db?mode=rwc".to_string());

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let pass_threshold = match env::var("PASS_THRESHOLD") {
            Ok(raw) => raw
                .parse::<f64>()
                .expect("PASS_THRESHOLD must be a number between 0 and 100"),
            Err(_) => DEFAULT_PASS_THRESHOLD,
        };

        let seed_categories = match env::var("SEED_CATEGORIES") {
            Ok(raw) => serde_json::from_str(&raw)
                .expect("SEED_CATEGORIES must be a JSON array of {name, description}"),
            Err(_) => default_seed_categories(),
        };

        Self {
            database_url,
            rust_log,
            pass_threshold,
            seed_categories,
        }
    }
}

/// The built-in driving-theory categories, matching the embedded question bank.
pub fn default_seed_categories() -> Vec<SeedCategory> {
    [
        ("Traffic Signs", "Questions about road signs and signals"),
        ("Traffic Rules", "Regulations and rules of the road"),
        ("Road Safety", "Safe and defensive driving"),
        ("Vehicle Mechanics", "Technical aspects and maintenance of the vehicle"),
    ]
    .into_iter()
    .map(|(name, description)| SeedCategory {
        name: name.to_string(),
        description: Some(description.to_string()),
    })
    .collect()
}
