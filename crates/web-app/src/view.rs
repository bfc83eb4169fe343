use std::fmt::Display;

use chrono::TimeZone;
use rand::Rng;
use workout_generator_domain as domain;

use crate::session::{Model, Muscles};

const PLACEHOLDER_OPTION: &str = "Select a muscle";
const FAILED_OPTION: &str = "(failed to load)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuscleOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutItem {
    pub id: domain::ExerciseID,
    pub name: String,
    pub tags: Vec<String>,
    pub description: String,
    pub prescription: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedEntry {
    pub id: domain::SavedWorkoutID,
    pub title: String,
    pub created_at: String,
}

/// Options of the muscle selector, starting with an option without value.
#[must_use]
pub fn muscle_options(model: &Model) -> Vec<MuscleOption> {
    let selected = model.settings.muscle_id();
    match &model.muscles {
        Muscles::Loading => vec![],
        Muscles::Failed => vec![MuscleOption {
            value: String::new(),
            label: FAILED_OPTION.to_string(),
            selected: true,
        }],
        Muscles::Loaded(muscles) => {
            let mut options = vec![MuscleOption {
                value: String::new(),
                label: PLACEHOLDER_OPTION.to_string(),
                selected: selected.is_none(),
            }];
            options.extend(muscles.iter().map(|muscle| MuscleOption {
                value: muscle.id.to_string(),
                label: muscle.label(),
                selected: selected == Some(muscle.id),
            }));
            options
        }
    }
}

/// Display data of the exercises. Prescriptions are drawn anew on every call.
#[must_use]
pub fn workout_items(items: &[domain::Exercise], rng: &mut impl Rng) -> Vec<WorkoutItem> {
    items
        .iter()
        .map(|exercise| WorkoutItem {
            id: exercise.id,
            name: exercise.name.clone(),
            tags: domain::tags(exercise),
            description: domain::plain_description(exercise),
            prescription: domain::prescribe(exercise, rng),
        })
        .collect()
}

#[must_use]
pub fn saved_entries<Tz: TimeZone>(
    saved_workouts: &[domain::SavedWorkout],
    time_zone: &Tz,
) -> Vec<SavedEntry>
where
    Tz::Offset: Display,
{
    saved_workouts
        .iter()
        .map(|saved_workout| SavedEntry {
            id: saved_workout.id.clone(),
            title: saved_workout.title.clone(),
            created_at: saved_workout
                .created_at
                .with_timezone(time_zone)
                .format("%x, %X")
                .to_string(),
        })
        .collect()
}
