//! Progress engine.
//!
//! Stateless computations over a fetched profile: every query
//! recomputes from the latest stored counters and goals, there is no
//! state machine.

use crate::{CalorieProgress, UserProfile, WaterProgress};

/// Water progress: consumed, goal and remaining (clamped at zero).
pub fn water_progress(profile: &UserProfile) -> WaterProgress {
    WaterProgress {
        consumed: profile.logged_water,
        goal: profile.water_goal,
        remaining: (profile.water_goal - profile.logged_water).max(0.0),
    }
}

/// Calorie progress: consumed, goal, burned and the net balance.
///
/// The net balance is informational and deliberately not clamped; a
/// deficit shows as a negative number.
pub fn calorie_progress(profile: &UserProfile) -> CalorieProgress {
    CalorieProgress {
        consumed: profile.logged_calories,
        goal: profile.calories_goal,
        burned: profile.burned_calories,
        net: profile.logged_calories - profile.burned_calories,
    }
}
