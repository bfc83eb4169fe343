//! Local Storage
//!
//! Every entity is kept as one JSON document under a fixed key and is always read and written as
//! a whole.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use gloo_storage::Storage as _;
use serde::{Deserialize, Serialize};
use workout_generator_domain as domain;
use workout_generator_web_app::{Settings, SettingsRepository, log};

pub const KEY_SAVED_WORKOUTS: &str = "workout_generator_saved_v1";
const KEY_SETTINGS: &str = "settings";
const KEY_LOG: &str = "log";

const MAX_LOG_ENTRIES: usize = 100;

pub trait RawStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, domain::StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), domain::StorageError>;
}

#[derive(Clone, Copy)]
pub struct GlooStorage;

impl RawStorage for GlooStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, domain::StorageError> {
        gloo_storage::LocalStorage::raw()
            .get_item(key)
            .map_err(|_| domain::StorageError::Unavailable)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), domain::StorageError> {
        gloo_storage::LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| domain::StorageError::Other(format!("{err:?}").into()))
    }
}

#[derive(Clone)]
pub struct LocalStorage<S: RawStorage> {
    pub storage: S,
}

impl LocalStorage<GlooStorage> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            storage: GlooStorage,
        }
    }
}

impl Default for LocalStorage<GlooStorage> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RawStorage> domain::SavedWorkoutRepository for LocalStorage<S> {
    fn read_saved_workouts(&self) -> Result<Vec<domain::SavedWorkout>, domain::ReadError> {
        let Some(raw) = self.storage.get_item(KEY_SAVED_WORKOUTS)? else {
            return Ok(vec![]);
        };
        serde_json::from_str::<Vec<SavedWorkout>>(&raw)
            .map(|saved_workouts| {
                saved_workouts
                    .into_iter()
                    .map(domain::SavedWorkout::from)
                    .collect()
            })
            .map_err(|err| domain::ReadError::Corrupt(err.to_string()))
    }

    fn write_saved_workouts(
        &self,
        saved_workouts: &[domain::SavedWorkout],
    ) -> Result<(), domain::WriteError> {
        let saved_workouts = saved_workouts
            .iter()
            .map(SavedWorkout::from)
            .collect::<Vec<_>>();
        let raw = serde_json::to_string(&saved_workouts)
            .map_err(|err| domain::WriteError::Other(err.into()))?;
        Ok(self.storage.set_item(KEY_SAVED_WORKOUTS, &raw)?)
    }
}

impl<S: RawStorage> SettingsRepository for LocalStorage<S> {
    fn read_settings(&self) -> Result<Settings, String> {
        match self.storage.get_item(KEY_SETTINGS) {
            Ok(Some(raw)) => serde_json::from_str(&raw).map_err(|err| err.to_string()),
            Ok(None) => Ok(Settings::default()),
            Err(err) => Err(err.to_string()),
        }
    }

    fn write_settings(&self, settings: &Settings) -> Result<(), String> {
        let raw = serde_json::to_string(settings).map_err(|err| err.to_string())?;
        self.storage
            .set_item(KEY_SETTINGS, &raw)
            .map_err(|err| err.to_string())
    }
}

impl<S: RawStorage + Send + Sync + 'static> log::Repository for LocalStorage<S> {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        match self.storage.get_item(KEY_LOG) {
            Ok(Some(raw)) => {
                serde_json::from_str(&raw).map_err(|err| log::Error::Unknown(err.to_string()))
            }
            Ok(None) => Ok(VecDeque::new()),
            Err(err) => Err(log::Error::Unknown(err.to_string())),
        }
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries().unwrap_or_default();
        entries.push_front(entry);
        entries.truncate(MAX_LOG_ENTRIES);
        let raw =
            serde_json::to_string(&entries).map_err(|err| log::Error::Unknown(err.to_string()))?;
        self.storage
            .set_item(KEY_LOG, &raw)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavedWorkout {
    id: String,
    title: String,
    #[serde(with = "timestamp")]
    created_at: DateTime<Utc>,
    #[serde(default)]
    items: Vec<Exercise>,
}

impl From<SavedWorkout> for domain::SavedWorkout {
    fn from(value: SavedWorkout) -> Self {
        domain::SavedWorkout {
            id: value.id.into(),
            title: value.title,
            created_at: value.created_at,
            items: value.items.into_iter().map(domain::Exercise::from).collect(),
        }
    }
}

impl From<&domain::SavedWorkout> for SavedWorkout {
    fn from(value: &domain::SavedWorkout) -> Self {
        SavedWorkout {
            id: value.id.to_string(),
            title: value.title.clone(),
            created_at: value.created_at,
            items: value.items.iter().map(Exercise::from).collect(),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Exercise {
    id: u32,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    equipment_names: Vec<String>,
    #[serde(default)]
    is_bodyweight: bool,
}

impl From<Exercise> for domain::Exercise {
    fn from(value: Exercise) -> Self {
        domain::Exercise {
            id: value.id.into(),
            name: value.name,
            description: value.description,
            equipment: value.equipment_names,
        }
    }
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Exercise {
            id: *value.id,
            name: value.name.clone(),
            description: value.description.clone(),
            equipment_names: value.equipment.clone(),
            is_bodyweight: value.is_bodyweight(),
        }
    }
}

mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let value = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&value)
            .map(|date_time| date_time.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
