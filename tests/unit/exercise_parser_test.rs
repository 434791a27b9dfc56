use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use primal_fit::models::WorkoutExercise;
use primal_fit::services::{parse_exercise_plan, ExerciseParseError};
use proptest::prelude::*;

#[test]
fn test_documented_example() {
    let exercises =
        parse_exercise_plan("Exercise: Push Ups\nSets: 4\nExercise: Plank\nIntensity: 70%").unwrap();

    assert_eq!(
        exercises,
        vec![
            WorkoutExercise {
                name: "Push Ups".to_string(),
                exercise_type: "General".to_string(),
                sets: "4".to_string(),
                reps: "10-12".to_string(),
                intensity: 60,
                image: None,
            },
            WorkoutExercise {
                name: "Plank".to_string(),
                exercise_type: "General".to_string(),
                sets: "3".to_string(),
                reps: "10-12".to_string(),
                intensity: 70,
                image: None,
            },
        ]
    );
}

#[test]
fn test_chatty_model_output() {
    let text = "Sure! Here's a routine:\n\nExercise: Jump Rope\nType: Cardio\nReps/Duration: 3 minutes\nIntensity: 80 %\n\nStay hydrated!";

    let exercises = parse_exercise_plan(text).unwrap();

    assert_eq!(exercises.len(), 1);
    assert_eq!(exercises[0].exercise_type, "Cardio");
    assert_eq!(exercises[0].reps, "3 minutes");
    assert_eq!(exercises[0].intensity, 80);
}

#[test]
fn test_decimal_intensity_fails() {
    assert_matches!(
        parse_exercise_plan("Exercise: Rows\nIntensity: 72.5%"),
        Err(ExerciseParseError::InvalidIntensity { .. })
    );
}

proptest! {
    #[test]
    fn one_record_per_exercise_line(names in prop::collection::vec("[A-Za-z][A-Za-z ]{0,15}[A-Za-z]", 0..8)) {
        let text: String = names
            .iter()
            .map(|name| format!("Exercise: {}\nSets: 3\n", name))
            .collect();

        let exercises = parse_exercise_plan(&text).unwrap();

        prop_assert_eq!(exercises.len(), names.len());
        for (exercise, name) in exercises.iter().zip(&names) {
            prop_assert_eq!(&exercise.name, name);
        }
    }

    #[test]
    fn whole_percentages_parse(intensity in 0i32..=100) {
        let exercises = parse_exercise_plan(&format!("Exercise: Squat\nIntensity: {}%", intensity)).unwrap();

        prop_assert_eq!(exercises[0].intensity, intensity);
    }
}
