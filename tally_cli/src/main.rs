use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tally_core::{
    Config, Error, LlmNutritionClient, OpenWeatherClient, ProfileStore, Result, Tracker,
};

mod form;

use form::ProfileForm;

#[derive(Parser)]
#[command(name = "daytally")]
#[command(about = "Daily hydration and calorie balance tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// User id to track (defaults to the configured user)
    #[arg(long, global = true)]
    user: Option<i64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Set up (or replace) your profile and recompute daily goals
    SetProfile,

    /// Log water intake in millilitres, e.g. `log-water 200`
    LogWater {
        /// Amount of water in mL
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Log food eaten, e.g. `log-food banana 150`
    LogFood {
        /// Food name followed by the weight in grams
        #[arg(allow_hyphen_values = true)]
        entry: Vec<String>,
    },

    /// Log a workout, e.g. `log-workout running 30`
    LogWorkout {
        /// Workout type followed by the duration in minutes
        #[arg(allow_hyphen_values = true)]
        entry: Vec<String>,
    },

    /// Show progress against both daily goals
    Progress,
}

fn main() {
    tally_core::logging::init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => {}
        Err(Error::ProfileNotFound { .. }) => {
            println!("You don't have a profile yet. Run `daytally set-profile` first.");
            std::process::exit(1);
        }
        Err(Error::InvalidInput(msg)) => {
            println!("{}", msg);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let user_id = cli.user.unwrap_or(config.user.default_id);

    let store = ProfileStore::open(data_dir)?;
    let tracker = Tracker::new(
        store,
        Box::new(OpenWeatherClient::new(&config.weather)),
        Box::new(LlmNutritionClient::new(&config.nutrition)),
    );

    match cli.command {
        Commands::SetProfile => cmd_set_profile(&tracker, user_id),
        Commands::LogWater { amount } => cmd_log_water(&tracker, user_id, &amount),
        Commands::LogFood { entry } => cmd_log_food(&tracker, user_id, &entry),
        Commands::LogWorkout { entry } => cmd_log_workout(&tracker, user_id, &entry),
        Commands::Progress => cmd_progress(&tracker, user_id),
    }
}

fn cmd_set_profile(tracker: &Tracker, user_id: i64) -> Result<()> {
    let mut form = ProfileForm::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while let Some(prompt) = form.prompt() {
        println!("{}", prompt);
        print!("> ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(Error::InvalidInput(
                    "Profile setup cancelled before all questions were answered.".into(),
                ))
            }
        };

        if let Err(reask) = form.submit(&line) {
            println!("{}", reask);
        }
    }

    let answers = form
        .into_answers()
        .ok_or_else(|| Error::InvalidInput("Profile setup incomplete.".into()))?;

    let profile = tracker.setup_profile(
        user_id,
        &answers.city,
        answers.weight,
        answers.height,
        answers.age,
        answers.activity_minutes,
    )?;

    println!(
        "Profile saved! City: {}. Goals: {:.0} mL water, {:.2} kcal.",
        profile.city, profile.water_goal, profile.calories_goal
    );
    Ok(())
}

fn cmd_log_water(tracker: &Tracker, user_id: i64, amount: &str) -> Result<()> {
    let amount = parse_amount(amount, "amount of water in mL")?;
    let logged = tracker.log_water(user_id, amount)?;

    println!("Logged: {:.0} mL.", logged.added);
    println!("Total: {:.0} / {:.0} mL.", logged.total, logged.goal);
    println!("Remaining: {:.0} mL.", logged.remaining);
    Ok(())
}

fn cmd_log_food(tracker: &Tracker, user_id: i64, entry: &[String]) -> Result<()> {
    let (food, grams) = split_entry(entry, "grams", "daytally log-food banana 150")?;
    let logged = tracker.log_food(user_id, &food, grams)?;

    println!(
        "{} ({:.0} g): {:.1} kcal.",
        logged.food, logged.grams, logged.calories_added
    );
    println!("(per 100 g: {} kcal)", logged.calories_per_100g);
    println!("Total today: {:.1} kcal.", logged.total);
    Ok(())
}

fn cmd_log_workout(tracker: &Tracker, user_id: i64, entry: &[String]) -> Result<()> {
    let (workout, minutes) = split_entry(entry, "minutes", "daytally log-workout running 30")?;
    let logged = tracker.log_workout(user_id, &workout, minutes)?;

    println!(
        "{} ({:.0} min): burned ~{:.0} kcal.",
        logged.workout, logged.minutes, logged.burned
    );
    if let Some(extra) = logged.extra_water_ml {
        println!("Recommendation: drink an extra {:.0} mL of water.", extra);
    }
    Ok(())
}

fn cmd_progress(tracker: &Tracker, user_id: i64) -> Result<()> {
    let (water, calories) = tracker.check_progress(user_id)?;

    println!("Water:");
    println!("- Drunk: {:.0} mL of {:.0} mL.", water.consumed, water.goal);
    println!("- Remaining: {:.0} mL.", water.remaining);
    println!();
    println!("Calories:");
    println!(
        "- Consumed: {:.0} kcal of {:.0} kcal.",
        calories.consumed, calories.goal
    );
    println!("- Burned: {:.0} kcal.", calories.burned);
    println!("- Balance (consumed - burned): {:.0} kcal.", calories.net);
    Ok(())
}

/// Parse a user-entered amount. Negative and non-finite values are
/// rejected here at the orchestration boundary; the core applies
/// whatever it is handed.
fn parse_amount(input: &str, what: &str) -> Result<f64> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| Error::InvalidInput(format!("Enter the {} as a number.", what)))?;
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidInput(format!(
            "The {} can't be negative.",
            what
        )));
    }
    Ok(value)
}

/// Split a free-text entry into a name and a trailing number, the way
/// the log commands expect: the last token is the number, everything
/// before it is the name.
fn split_entry(entry: &[String], what: &str, example: &str) -> Result<(String, f64)> {
    if entry.len() < 2 {
        return Err(Error::InvalidInput(format!(
            "Enter a name and the {}, e.g. `{}`.",
            what, example
        )));
    }

    let value = parse_amount(&entry[entry.len() - 1], what)?;
    Ok((entry[..entry.len() - 1].join(" "), value))
}
