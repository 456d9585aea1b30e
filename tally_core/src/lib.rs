#![forbid(unsafe_code)]

//! Core domain model and business logic for the Daytally tracker.
//!
//! This crate provides:
//! - Domain types (profiles, counters, progress snapshots)
//! - Daily goal formulas (water, calories)
//! - Durable profile store with atomic counter updates
//! - Progress engine
//! - External lookup collaborators (weather, nutrition)

pub mod types;
pub mod error;
pub mod goals;
pub mod config;
pub mod logging;
pub mod store;
pub mod weather;
pub mod nutrition;
pub mod progress;
pub mod engine;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use goals::{calories_goal, water_goal, workout_water_bonus_ml, WORKOUT_BURN_KCAL};
pub use store::ProfileStore;
pub use weather::{OpenWeatherClient, WeatherLookup, FALLBACK_TEMP_C};
pub use nutrition::{LlmNutritionClient, NutritionLookup};
pub use progress::{calorie_progress, water_progress};
pub use engine::Tracker;
