//! Tracker engine: the orchestration-facing surface of the core.
//!
//! Owns the profile store plus the two injected lookup collaborators
//! and wires them together: profile setup derives goals, log commands
//! increment counters, progress queries recompute from stored state.

use crate::{
    goals, progress, Error, FoodLogged, NutritionLookup, ProfileStore, Result, UserProfile,
    WaterLogged, WeatherLookup, WorkoutLogged, CalorieProgress, WaterProgress,
};

/// The daily hydration and calorie tracker.
pub struct Tracker {
    store: ProfileStore,
    weather: Box<dyn WeatherLookup>,
    nutrition: Box<dyn NutritionLookup>,
}

impl Tracker {
    pub fn new(
        store: ProfileStore,
        weather: Box<dyn WeatherLookup>,
        nutrition: Box<dyn NutritionLookup>,
    ) -> Self {
        Self {
            store,
            weather,
            nutrition,
        }
    }

    /// Set up (or replace) a user's profile.
    ///
    /// Looks up the city's temperature, derives both daily goals and
    /// stores the profile with zeroed counters. A degraded weather
    /// lookup feeds the documented fallback into the water formula
    /// rather than failing the setup.
    pub fn setup_profile(
        &self,
        user_id: i64,
        city: &str,
        weight: f64,
        height: f64,
        age: u32,
        activity_minutes: f64,
    ) -> Result<UserProfile> {
        let temperature = self.weather.temperature_c(city);
        let water_goal = goals::water_goal(weight, activity_minutes, temperature);
        let calories_goal = goals::calories_goal(weight, activity_minutes, height, age);

        tracing::info!(
            "Computed goals for user {}: {} mL water, {} kcal ({} at {} C)",
            user_id,
            water_goal,
            calories_goal,
            city,
            temperature
        );

        self.store.upsert_profile(
            user_id,
            city,
            weight,
            height,
            age,
            activity_minutes,
            water_goal,
            calories_goal,
        )
    }

    /// Log water intake in millilitres.
    pub fn log_water(&self, user_id: i64, amount_ml: f64) -> Result<WaterLogged> {
        self.require_profile(user_id)?;
        let updated = self.store.add_water(user_id, amount_ml)?;

        Ok(WaterLogged {
            added: amount_ml,
            total: updated.logged_water,
            goal: updated.water_goal,
            remaining: (updated.water_goal - updated.logged_water).max(0.0),
        })
    }

    /// Log a food item by name and weight in grams.
    ///
    /// The nutrition lookup may legitimately report 0 kcal per 100 g
    /// (unknown food, degraded lookup); the entry is still recorded.
    pub fn log_food(&self, user_id: i64, food: &str, grams: f64) -> Result<FoodLogged> {
        self.require_profile(user_id)?;

        let calories_per_100g = self.nutrition.calories_per_100g(food);
        let calories_added = calories_per_100g * grams / 100.0;
        let updated = self.store.add_calories(user_id, calories_added)?;

        Ok(FoodLogged {
            food: food.to_string(),
            grams,
            calories_per_100g,
            calories_added,
            total: updated.logged_calories,
        })
    }

    /// Log a workout by type and duration in minutes.
    ///
    /// Credits a fixed burn regardless of type or duration, and
    /// recommends extra water for every complete 30-minute block. The
    /// recommendation is advisory text only and is never stored.
    pub fn log_workout(&self, user_id: i64, workout: &str, minutes: f64) -> Result<WorkoutLogged> {
        self.require_profile(user_id)?;

        let burned = goals::WORKOUT_BURN_KCAL;
        self.store.add_burned_calories(user_id, burned)?;

        let extra_water_ml = if minutes >= 30.0 {
            Some(goals::workout_water_bonus_ml(minutes))
        } else {
            None
        };

        Ok(WorkoutLogged {
            workout: workout.to_string(),
            minutes,
            burned,
            extra_water_ml,
        })
    }

    /// Report progress against both daily goals.
    pub fn check_progress(&self, user_id: i64) -> Result<(WaterProgress, CalorieProgress)> {
        let profile = self.require_profile(user_id)?;
        Ok((
            progress::water_progress(&profile),
            progress::calorie_progress(&profile),
        ))
    }

    fn require_profile(&self, user_id: i64) -> Result<UserProfile> {
        self.store
            .get(user_id)?
            .ok_or(Error::ProfileNotFound { user_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FALLBACK_TEMP_C;

    /// Weather stub returning a fixed temperature.
    struct FixedWeather(f64);

    impl WeatherLookup for FixedWeather {
        fn temperature_c(&self, _city: &str) -> f64 {
            self.0
        }
    }

    /// Nutrition stub returning a fixed calorie density.
    struct FixedNutrition(f64);

    impl NutritionLookup for FixedNutrition {
        fn calories_per_100g(&self, _food: &str) -> f64 {
            self.0
        }
    }

    fn tracker(temp_c: f64, kcal_per_100g: f64) -> (tempfile::TempDir, Tracker) {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::open(temp_dir.path()).unwrap();
        let tracker = Tracker::new(
            store,
            Box::new(FixedWeather(temp_c)),
            Box::new(FixedNutrition(kcal_per_100g)),
        );
        (temp_dir, tracker)
    }

    #[test]
    fn test_setup_profile_derives_goals() {
        let (_dir, tracker) = tracker(30.0, 89.0);

        let profile = tracker
            .setup_profile(1, "Lisbon", 70.0, 175.0, 30, 45.0)
            .unwrap();

        // 2100 + 500 (one activity block) + 500 (hot weather)
        assert_eq!(profile.water_goal, 3100.0);
        // 700 + 1093.75 - 150 + 200
        assert_eq!(profile.calories_goal, 1843.75);
        assert_eq!(profile.logged_water, 0.0);
    }

    #[test]
    fn test_setup_profile_with_fallback_weather() {
        // A degraded lookup hands the engine 20.0, which is below the
        // hot-weather threshold: no bonus, no error.
        let (_dir, tracker) = tracker(FALLBACK_TEMP_C, 0.0);

        let profile = tracker
            .setup_profile(1, "Nowhere", 70.0, 175.0, 30, 45.0)
            .unwrap();

        assert_eq!(profile.water_goal, 2600.0);
    }

    #[test]
    fn test_log_water_reports_remaining() {
        let (_dir, tracker) = tracker(20.0, 0.0);
        tracker.setup_profile(1, "Lisbon", 70.0, 175.0, 30, 0.0).unwrap();

        let logged = tracker.log_water(1, 300.0).unwrap();
        assert_eq!(logged.added, 300.0);
        assert_eq!(logged.total, 300.0);
        assert_eq!(logged.goal, 2100.0);
        assert_eq!(logged.remaining, 1800.0);

        let logged = tracker.log_water(1, 2000.0).unwrap();
        assert_eq!(logged.total, 2300.0);
        assert_eq!(logged.remaining, 0.0);
    }

    #[test]
    fn test_log_food_converts_per_100g() {
        let (_dir, tracker) = tracker(20.0, 89.0);
        tracker.setup_profile(1, "Lisbon", 70.0, 175.0, 30, 0.0).unwrap();

        let logged = tracker.log_food(1, "banana", 150.0).unwrap();
        assert_eq!(logged.calories_per_100g, 89.0);
        assert_eq!(logged.calories_added, 133.5);
        assert_eq!(logged.total, 133.5);
    }

    #[test]
    fn test_log_food_with_degraded_lookup_records_zero() {
        let (_dir, tracker) = tracker(20.0, 0.0);
        tracker.setup_profile(1, "Lisbon", 70.0, 175.0, 30, 0.0).unwrap();

        let logged = tracker.log_food(1, "mystery snack", 150.0).unwrap();
        assert_eq!(logged.calories_added, 0.0);
        assert_eq!(logged.total, 0.0);
    }

    #[test]
    fn test_log_workout_fixed_burn_and_water_advice() {
        let (_dir, tracker) = tracker(20.0, 0.0);
        tracker.setup_profile(1, "Lisbon", 70.0, 175.0, 30, 0.0).unwrap();

        let short = tracker.log_workout(1, "run", 20.0).unwrap();
        assert_eq!(short.burned, 300.0);
        assert_eq!(short.extra_water_ml, None);

        let long = tracker.log_workout(1, "swim", 75.0).unwrap();
        assert_eq!(long.burned, 300.0);
        assert_eq!(long.extra_water_ml, Some(400.0));

        let (_, calories) = tracker.check_progress(1).unwrap();
        assert_eq!(calories.burned, 600.0);
    }

    #[test]
    fn test_check_progress_combines_counters() {
        let (_dir, tracker) = tracker(20.0, 100.0);
        tracker.setup_profile(1, "Lisbon", 70.0, 175.0, 30, 0.0).unwrap();

        tracker.log_water(1, 500.0).unwrap();
        tracker.log_food(1, "oatmeal", 500.0).unwrap();
        tracker.log_workout(1, "run", 40.0).unwrap();

        let (water, calories) = tracker.check_progress(1).unwrap();
        assert_eq!(water.consumed, 500.0);
        assert_eq!(water.remaining, 1600.0);
        assert_eq!(calories.consumed, 500.0);
        assert_eq!(calories.burned, 300.0);
        assert_eq!(calories.net, 200.0);
    }

    #[test]
    fn test_operations_require_a_profile() {
        let (_dir, tracker) = tracker(20.0, 0.0);

        assert!(matches!(
            tracker.log_water(9, 100.0),
            Err(Error::ProfileNotFound { user_id: 9 })
        ));
        assert!(matches!(
            tracker.log_food(9, "banana", 100.0),
            Err(Error::ProfileNotFound { user_id: 9 })
        ));
        assert!(matches!(
            tracker.log_workout(9, "run", 30.0),
            Err(Error::ProfileNotFound { user_id: 9 })
        ));
        assert!(matches!(
            tracker.check_progress(9),
            Err(Error::ProfileNotFound { user_id: 9 })
        ));
    }

    #[test]
    fn test_resubmitting_profile_resets_tracking_day() {
        let (_dir, tracker) = tracker(20.0, 0.0);
        tracker.setup_profile(1, "Lisbon", 70.0, 175.0, 30, 0.0).unwrap();
        tracker.log_water(1, 800.0).unwrap();

        tracker.setup_profile(1, "Porto", 70.0, 175.0, 30, 0.0).unwrap();

        let (water, _) = tracker.check_progress(1).unwrap();
        assert_eq!(water.consumed, 0.0);
    }
}
