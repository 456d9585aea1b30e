//! Interactive profile-setup form.
//!
//! A linear state machine walking the user through the profile
//! questions one at a time: weight, height, age, daily activity, city.
//! Invalid input re-asks the current question and never advances the
//! form. Owned by the CLI; the core only sees the final answers.

/// Current question of the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormStep {
    Weight,
    Height,
    Age,
    ActivityMinutes,
    City,
    Done,
}

/// Answers collected by a completed form.
#[derive(Clone, Debug, PartialEq)]
pub struct ProfileAnswers {
    pub weight: f64,
    pub height: f64,
    pub age: u32,
    pub activity_minutes: f64,
    pub city: String,
}

/// Profile-setup form state.
#[derive(Debug)]
pub struct ProfileForm {
    step: FormStep,
    weight: Option<f64>,
    height: Option<f64>,
    age: Option<u32>,
    activity_minutes: Option<f64>,
    city: Option<String>,
}

impl ProfileForm {
    pub fn new() -> Self {
        Self {
            step: FormStep::Weight,
            weight: None,
            height: None,
            age: None,
            activity_minutes: None,
            city: None,
        }
    }

    pub fn step(&self) -> FormStep {
        self.step
    }

    pub fn is_done(&self) -> bool {
        self.step() == FormStep::Done
    }

    /// The question to ask for the current step, or `None` once done.
    pub fn prompt(&self) -> Option<&'static str> {
        match self.step() {
            FormStep::Weight => Some("Your weight (kg):"),
            FormStep::Height => Some("Your height (cm):"),
            FormStep::Age => Some("Your age (years):"),
            FormStep::ActivityMinutes => Some("Minutes of activity per day:"),
            FormStep::City => Some("Which city are you in?"),
            FormStep::Done => None,
        }
    }

    /// Feed one line of user input into the form.
    ///
    /// On success the form advances to the next step; on failure it
    /// stays put and returns a re-ask message.
    pub fn submit(&mut self, input: &str) -> Result<(), String> {
        let input = input.trim();
        match self.step() {
            FormStep::Weight => {
                self.weight = Some(parse_positive(input, "weight")?);
                self.step = FormStep::Height;
            }
            FormStep::Height => {
                self.height = Some(parse_positive(input, "height")?);
                self.step = FormStep::Age;
            }
            FormStep::Age => {
                self.age = Some(
                    input
                        .parse::<u32>()
                        .map_err(|_| "That doesn't look like an age. Enter a whole number.".to_string())?,
                );
                self.step = FormStep::ActivityMinutes;
            }
            FormStep::ActivityMinutes => {
                self.activity_minutes = Some(parse_non_negative(input, "activity minutes")?);
                self.step = FormStep::City;
            }
            FormStep::City => {
                if input.is_empty() {
                    return Err("Please enter a city name.".to_string());
                }
                self.city = Some(input.to_string());
                self.step = FormStep::Done;
            }
            FormStep::Done => {}
        }
        Ok(())
    }

    /// The collected answers, once the form has reached `Done`.
    pub fn into_answers(self) -> Option<ProfileAnswers> {
        if !self.is_done() {
            return None;
        }
        Some(ProfileAnswers {
            weight: self.weight?,
            height: self.height?,
            age: self.age?,
            activity_minutes: self.activity_minutes?,
            city: self.city?,
        })
    }
}

fn parse_positive(input: &str, what: &str) -> Result<f64, String> {
    let value = parse_non_negative(input, what)?;
    if value == 0.0 {
        return Err(format!("Your {} must be greater than zero.", what));
    }
    Ok(value)
}

fn parse_non_negative(input: &str, what: &str) -> Result<f64, String> {
    let value: f64 = input
        .parse()
        .map_err(|_| format!("That doesn't look like a number. Enter your {} again.", what))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("Your {} can't be negative.", what));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(form: &mut ProfileForm, inputs: &[&str]) {
        for input in inputs {
            form.submit(input).unwrap();
        }
    }

    #[test]
    fn test_happy_path_walks_all_steps() {
        let mut form = ProfileForm::new();
        assert_eq!(form.step(), FormStep::Weight);

        fill(&mut form, &["70", "175", "30", "45", "Lisbon"]);
        assert!(form.is_done());
        assert_eq!(form.prompt(), None);

        let answers = form.into_answers().unwrap();
        assert_eq!(
            answers,
            ProfileAnswers {
                weight: 70.0,
                height: 175.0,
                age: 30,
                activity_minutes: 45.0,
                city: "Lisbon".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_input_does_not_advance() {
        let mut form = ProfileForm::new();

        assert!(form.submit("seventy").is_err());
        assert_eq!(form.step(), FormStep::Weight);

        form.submit("70").unwrap();
        assert_eq!(form.step(), FormStep::Height);
    }

    #[test]
    fn test_negative_and_zero_values_rejected() {
        let mut form = ProfileForm::new();
        assert!(form.submit("-70").is_err());
        assert!(form.submit("0").is_err());
        form.submit("70").unwrap();

        // Zero activity is fine; negative is not
        fill(&mut form, &["175", "30"]);
        assert!(form.submit("-10").is_err());
        form.submit("0").unwrap();
        assert_eq!(form.step(), FormStep::City);
    }

    #[test]
    fn test_fractional_age_rejected() {
        let mut form = ProfileForm::new();
        fill(&mut form, &["70", "175"]);
        assert!(form.submit("30.5").is_err());
        assert_eq!(form.step(), FormStep::Age);
    }

    #[test]
    fn test_empty_city_rejected() {
        let mut form = ProfileForm::new();
        fill(&mut form, &["70", "175", "30", "45"]);
        assert!(form.submit("   ").is_err());
        form.submit("Lisbon").unwrap();
        assert!(form.is_done());
    }

    #[test]
    fn test_unfinished_form_has_no_answers() {
        let mut form = ProfileForm::new();
        form.submit("70").unwrap();
        assert!(form.into_answers().is_none());
    }
}
