use thiserror::Error;

use crate::models::{AdaptedWorkout, WorkoutExercise};

pub const PARSED_FEEDBACK: &str = "Great start! Focus on maintaining proper form.";
pub const FALLBACK_FEEDBACK: &str = "Default workout generated - focus on perfecting form!";

/// Image query used for the fallback exercise
pub const FALLBACK_IMAGE_QUERY: &str = "bodyweight squats proper form";

#[derive(Error, Debug, PartialEq)]
pub enum ExerciseParseError {
    #[error("Line {line:?} has no value after its label")]
    MissingValue { line: String },
    #[error("Intensity {value:?} is not a whole percentage")]
    InvalidIntensity { value: String },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Label {
    Exercise,
    Type,
    Sets,
    Reps,
    Intensity,
}

impl Label {
    const ALL: [(Label, &'static str); 5] = [
        (Label::Exercise, "exercise:"),
        (Label::Type, "type:"),
        (Label::Sets, "sets:"),
        (Label::Reps, "reps/duration:"),
        (Label::Intensity, "intensity:"),
    ];

    fn detect(line: &str) -> Option<Label> {
        let lower = line.to_lowercase();
        Self::ALL
            .iter()
            .find(|(_, prefix)| lower.starts_with(prefix))
            .map(|(label, _)| *label)
    }
}

fn label_value(line: &str) -> Result<&str, ExerciseParseError> {
    line.split_once(": ")
        .map(|(_, value)| value.trim())
        .ok_or_else(|| ExerciseParseError::MissingValue {
            line: line.to_string(),
        })
}

fn parse_intensity(value: &str) -> Result<i32, ExerciseParseError> {
    value
        .replace('%', "")
        .trim()
        .parse()
        .map_err(|_| ExerciseParseError::InvalidIntensity {
            value: value.to_string(),
        })
}

/// Parse line-oriented model output into exercises.
///
/// Expected shape, labels case-insensitive:
///
/// ```text
/// Exercise: Push Ups
/// Type: Strength
/// Sets: 4
/// Reps/Duration: 12
/// Intensity: 70%
/// ```
///
/// Every `Exercise:` line opens a new record seeded with the defaults from
/// [`WorkoutExercise::new`]; the other labels overwrite fields of the open
/// record. Unknown lines, and field lines before the first exercise, are
/// skipped.
pub fn parse_exercise_plan(text: &str) -> Result<Vec<WorkoutExercise>, ExerciseParseError> {
    let mut exercises = Vec::new();
    let mut current: Option<WorkoutExercise> = None;

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let Some(label) = Label::detect(line) else {
            continue;
        };
        let value = label_value(line)?;

        match label {
            Label::Exercise => {
                if let Some(finished) = current.take() {
                    exercises.push(finished);
                }
                current = Some(WorkoutExercise::new(value));
            }
            Label::Type => {
                if let Some(exercise) = current.as_mut() {
                    exercise.exercise_type = value.to_string();
                }
            }
            Label::Sets => {
                if let Some(exercise) = current.as_mut() {
                    exercise.sets = value.to_string();
                }
            }
            Label::Reps => {
                if let Some(exercise) = current.as_mut() {
                    exercise.reps = value.to_string();
                }
            }
            Label::Intensity => {
                let intensity = parse_intensity(value)?;
                if let Some(exercise) = current.as_mut() {
                    exercise.intensity = intensity;
                }
            }
        }
    }

    if let Some(finished) = current {
        exercises.push(finished);
    }

    Ok(exercises)
}

/// The fixed single-exercise plan served when model output cannot be parsed
pub fn fallback_workout(image: Option<String>) -> AdaptedWorkout {
    AdaptedWorkout {
        exercises: vec![WorkoutExercise {
            name: "Bodyweight Squats".to_string(),
            exercise_type: "Strength".to_string(),
            sets: "3".to_string(),
            reps: "12-15".to_string(),
            intensity: 60,
            image,
        }],
        feedback: FALLBACK_FEEDBACK.to_string(),
    }
}
