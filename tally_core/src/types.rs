//! Core domain types for the Daytally tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - User profiles with derived daily goals and same-day counters
//! - Progress snapshots (water, calories)
//! - Result records returned by the tracker engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Profile
// ============================================================================

/// A user's profile, derived daily goals and same-day counters.
///
/// One record per `user_id`. Resubmitting a profile replaces the record
/// wholesale and zeroes the three counters: a profile change starts a
/// fresh tracking day.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub user_id: i64,
    /// Free-text location, used only as weather-lookup input.
    pub city: String,
    /// Body weight in kilograms.
    pub weight: f64,
    /// Height in centimetres.
    pub height: f64,
    /// Age in years.
    pub age: u32,
    /// Minutes of daily activity.
    pub activity_minutes: f64,
    /// Daily water target in millilitres. Derived, never user-set.
    pub water_goal: f64,
    /// Daily calorie target in kilocalories. Derived, never user-set.
    pub calories_goal: f64,
    /// Water logged today, millilitres.
    pub logged_water: f64,
    /// Calories eaten today, kilocalories.
    pub logged_calories: f64,
    /// Calories burned by workouts today, kilocalories.
    pub burned_calories: f64,
    /// When the goals were last (re)computed, i.e. the start of the
    /// current tracking day.
    pub goals_set_at: DateTime<Utc>,
}

// ============================================================================
// Progress Snapshots
// ============================================================================

/// Water progress against the daily goal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaterProgress {
    /// Millilitres logged so far today.
    pub consumed: f64,
    /// Daily goal in millilitres.
    pub goal: f64,
    /// Millilitres still to drink, clamped at zero.
    pub remaining: f64,
}

/// Calorie progress against the daily goal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalorieProgress {
    /// Kilocalories eaten so far today.
    pub consumed: f64,
    /// Daily goal in kilocalories.
    pub goal: f64,
    /// Kilocalories burned by workouts today.
    pub burned: f64,
    /// Net balance (consumed - burned). May be negative.
    pub net: f64,
}

// ============================================================================
// Engine Result Records
// ============================================================================

/// Outcome of logging a water intake.
#[derive(Clone, Debug, PartialEq)]
pub struct WaterLogged {
    pub added: f64,
    pub total: f64,
    pub goal: f64,
    pub remaining: f64,
}

/// Outcome of logging a food item.
#[derive(Clone, Debug, PartialEq)]
pub struct FoodLogged {
    pub food: String,
    pub grams: f64,
    /// As reported by the nutrition lookup; 0.0 when the lookup degraded.
    pub calories_per_100g: f64,
    pub calories_added: f64,
    pub total: f64,
}

/// Outcome of logging a workout.
#[derive(Clone, Debug, PartialEq)]
pub struct WorkoutLogged {
    pub workout: String,
    pub minutes: f64,
    pub burned: f64,
    /// Advisory extra water for long workouts; never stored.
    pub extra_water_ml: Option<f64>,
}
