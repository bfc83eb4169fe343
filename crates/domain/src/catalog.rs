use derive_more::{Deref, Display};

use crate::{ExerciseID, ReadError};

pub const LANGUAGE_ENGLISH: LanguageID = LanguageID(2);

#[allow(async_fn_in_trait)]
pub trait CatalogService {
    async fn get_muscles(&self) -> Result<Vec<MuscleRef>, ReadError>;
    async fn get_exercises(&self, language: LanguageID) -> Result<Vec<CatalogExercise>, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait CatalogRepository {
    async fn read_muscles(&self) -> Result<Vec<MuscleRef>, ReadError>;
    async fn read_exercises(&self, language: LanguageID)
    -> Result<Vec<CatalogExercise>, ReadError>;
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct MuscleID(u32);

impl From<u32> for MuscleID {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl TryFrom<&str> for MuscleID {
    type Error = MuscleIDError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(MuscleIDError::Empty);
        }
        trimmed
            .parse::<u32>()
            .map(Self)
            .map_err(|_| MuscleIDError::Invalid(trimmed.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MuscleIDError {
    #[error("No muscle selected")]
    Empty,
    #[error("Invalid muscle ID ({0})")]
    Invalid(String),
}

#[derive(Deref, Display, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageID(u32);

impl From<u32> for LanguageID {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// A muscle as listed by the remote catalog.
///
/// `name` is the preferred raw name (English name if the catalog has one) and may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuscleRef {
    pub id: MuscleID,
    pub name: String,
}

impl MuscleRef {
    /// Label for the muscle selector.
    #[must_use]
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            format!("Muscle {}", self.id)
        } else {
            friendly_muscle_name(&self.name)
        }
    }
}

/// Name of the muscle with the given ID as used in titles and summaries.
#[must_use]
pub fn muscle_name(muscles: &[MuscleRef], id: MuscleID) -> String {
    match muscles.iter().find(|m| m.id == id) {
        Some(muscle) if !muscle.name.is_empty() => friendly_muscle_name(&muscle.name),
        _ => String::from("muscle"),
    }
}

#[must_use]
pub fn friendly_muscle_name(name: &str) -> String {
    const GROUPS: &[(&[&str], &str)] = &[
        (&["abdom"], "Abs"),
        (&["pectoral"], "Chest"),
        (&["latissimus", "trapezius", "back"], "Back"),
        (&["deltoid", "shoulder"], "Shoulders"),
        (&["biceps", "triceps", "forearm"], "Arms"),
        (&["quadriceps", "hamstring", "glute", "calf"], "Legs"),
    ];

    let lower = name.to_lowercase();
    GROUPS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map_or_else(|| name.to_string(), |(_, group)| (*group).to_string())
}

/// An exercise record of the remote catalog after its references have been normalized.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CatalogExercise {
    pub id: ExerciseID,
    pub translations: Vec<Translation>,
    pub name: String,
    pub description: String,
    pub muscles: Vec<MuscleID>,
    pub muscles_secondary: Vec<MuscleID>,
    pub equipment: Vec<String>,
}

impl CatalogExercise {
    #[must_use]
    pub fn targets(&self, muscle_id: MuscleID) -> bool {
        self.muscles.contains(&muscle_id) || self.muscles_secondary.contains(&muscle_id)
    }

    /// Name and description in the given language.
    ///
    /// Records without translations carry their text at the top level. A record with
    /// translations but none in the requested language has no text.
    #[must_use]
    pub fn text(&self, language: LanguageID) -> (&str, &str) {
        if self.translations.is_empty() {
            return (&self.name, &self.description);
        }
        self.translations
            .iter()
            .find(|t| t.language == language)
            .map_or(("", ""), |t| (t.name.as_str(), t.description.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub language: LanguageID,
    pub name: String,
    pub description: String,
}
