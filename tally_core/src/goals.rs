//! Daily goal formulas.
//!
//! Pure, deterministic functions converting profile and environment
//! into daily water and calorie targets, plus the workout constants.

/// Kilocalories credited per logged workout, regardless of type or
/// duration. Kept as the observable contract pending a per-type table.
pub const WORKOUT_BURN_KCAL: f64 = 300.0;

/// Temperature above which the hot-weather water bonus applies, in °C.
const HOT_WEATHER_THRESHOLD_C: f64 = 25.0;

/// Daily water goal in millilitres.
///
/// Base hydration scales linearly with body mass; every complete
/// 30-minute block of daily activity adds a fixed 500 mL; weather above
/// 25 °C adds a flat 500 mL step, not scaled with temperature.
pub fn water_goal(weight_kg: f64, activity_minutes: f64, weather_temp_c: f64) -> f64 {
    let base = 30.0 * weight_kg;
    let activity_add = 500.0 * (activity_minutes / 30.0).floor();
    let weather_add = if weather_temp_c > HOT_WEATHER_THRESHOLD_C {
        500.0
    } else {
        0.0
    };
    base + activity_add + weather_add
}

/// Daily calorie goal in kilocalories.
///
/// Simplified basal-metabolic-rate estimate plus a flat 200 kcal bonus
/// for any non-zero daily activity. Not clamped: extreme inputs can
/// produce low or non-positive goals and callers must tolerate that.
pub fn calories_goal(weight_kg: f64, activity_minutes: f64, height_cm: f64, age_years: u32) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years);
    let activity_add = if activity_minutes > 0.0 { 200.0 } else { 0.0 };
    base + activity_add
}

/// Advisory extra water for a workout, in millilitres: 200 mL per
/// complete 30-minute block. Purely a recommendation, never stored.
pub fn workout_water_bonus_ml(minutes: f64) -> f64 {
    200.0 * (minutes / 30.0).floor()
}
