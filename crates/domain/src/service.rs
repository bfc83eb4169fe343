use log::{debug, error};

use crate::{
    CatalogExercise, CatalogRepository, CatalogService, Exercise, LanguageID, MuscleRef,
    ReadError, SavedWorkout, SavedWorkoutID, SavedWorkoutRepository, SavedWorkoutService,
    StorageError, WriteError,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($result: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $result;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: CatalogRepository> CatalogService for Service<R> {
    async fn get_muscles(&self) -> Result<Vec<MuscleRef>, ReadError> {
        log_on_error!(
            self.repository.read_muscles().await,
            ReadError,
            "get",
            "muscles"
        )
    }

    async fn get_exercises(&self, language: LanguageID) -> Result<Vec<CatalogExercise>, ReadError> {
        log_on_error!(
            self.repository.read_exercises(language).await,
            ReadError,
            "get",
            "exercises"
        )
    }
}

impl<R: SavedWorkoutRepository> Service<R> {
    fn read_saved_workouts_or_empty(&self) -> Result<Vec<SavedWorkout>, ReadError> {
        match self.repository.read_saved_workouts() {
            Err(ReadError::Corrupt(reason)) => {
                debug!("ignoring corrupt saved workouts: {reason}");
                Ok(vec![])
            }
            result => log_on_error!(result, ReadError, "read", "saved workouts"),
        }
    }
}

impl<R: SavedWorkoutRepository> SavedWorkoutService for Service<R> {
    fn save_workout(&self, title: String, items: &[Exercise]) -> Result<SavedWorkout, WriteError> {
        let mut saved_workouts = self.read_saved_workouts_or_empty()?;
        let saved_workout = SavedWorkout::new(title, items);
        saved_workouts.insert(0, saved_workout.clone());
        log_on_error!(
            self.repository.write_saved_workouts(&saved_workouts),
            WriteError,
            "save",
            "workout"
        )?;
        Ok(saved_workout)
    }

    fn get_saved_workouts(&self) -> Vec<SavedWorkout> {
        self.read_saved_workouts_or_empty().unwrap_or_default()
    }

    fn get_saved_workout(&self, id: &SavedWorkoutID) -> Option<SavedWorkout> {
        self.get_saved_workouts().into_iter().find(|w| w.id == *id)
    }

    fn delete_saved_workout(&self, id: &SavedWorkoutID) -> Result<(), WriteError> {
        let mut saved_workouts = self.read_saved_workouts_or_empty()?;
        let len = saved_workouts.len();
        saved_workouts.retain(|w| w.id != *id);
        if saved_workouts.len() == len {
            return Ok(());
        }
        log_on_error!(
            self.repository.write_saved_workouts(&saved_workouts),
            WriteError,
            "delete",
            "saved workout"
        )
    }
}
