use workout_generator_domain as domain;

pub trait SettingsService {
    /// Stored settings, or the defaults if none are stored or they cannot be read.
    fn get_settings(&self) -> Settings;
    fn set_settings(&self, settings: &Settings);
}

#[allow(clippy::missing_errors_doc)]
pub trait SettingsRepository {
    fn read_settings(&self) -> Result<Settings, String>;
    fn write_settings(&self, settings: &Settings) -> Result<(), String>;
}

/// Last state of the workout controls.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub muscle: Option<u32>,
    pub workout_size: usize,
    pub bodyweight_only: bool,
}

impl Settings {
    #[must_use]
    pub fn muscle_id(&self) -> Option<domain::MuscleID> {
        self.muscle.map(domain::MuscleID::from)
    }

    #[must_use]
    pub fn workout_size(&self) -> domain::WorkoutSize {
        #[allow(clippy::cast_precision_loss)]
        domain::WorkoutSize::new(self.workout_size as f64)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            muscle: None,
            workout_size: *domain::WorkoutSize::default(),
            bodyweight_only: false,
        }
    }
}
