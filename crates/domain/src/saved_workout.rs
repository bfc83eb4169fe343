use chrono::{DateTime, Utc};
use derive_more::{AsRef, Display};
use uuid::Uuid;

use crate::{Exercise, ReadError, WriteError};

pub trait SavedWorkoutService {
    /// Saves a snapshot of the workout as newest entry.
    fn save_workout(&self, title: String, items: &[Exercise]) -> Result<SavedWorkout, WriteError>;
    /// Saved workouts, newest first. Unreadable data results in an empty list.
    fn get_saved_workouts(&self) -> Vec<SavedWorkout>;
    fn get_saved_workout(&self, id: &SavedWorkoutID) -> Option<SavedWorkout>;
    fn delete_saved_workout(&self, id: &SavedWorkoutID) -> Result<(), WriteError>;
}

/// Blob store holding the complete collection of saved workouts.
pub trait SavedWorkoutRepository {
    fn read_saved_workouts(&self) -> Result<Vec<SavedWorkout>, ReadError>;
    fn write_saved_workouts(&self, saved_workouts: &[SavedWorkout]) -> Result<(), WriteError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedWorkout {
    pub id: SavedWorkoutID,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<Exercise>,
}

impl SavedWorkout {
    #[must_use]
    pub fn new(title: String, items: &[Exercise]) -> Self {
        Self {
            id: SavedWorkoutID::generate(),
            title,
            created_at: Utc::now(),
            items: items.to_vec(),
        }
    }
}

#[derive(AsRef, Display, Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SavedWorkoutID(String);

impl SavedWorkoutID {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }
}

impl From<String> for SavedWorkoutID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SavedWorkoutID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
