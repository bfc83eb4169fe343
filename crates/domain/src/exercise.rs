use derive_more::{Deref, Display};

use crate::{CatalogExercise, LanguageID};

const NON_ENGLISH_MARKERS: &[&str] = &[
    "respiración",
    "técnica",
    "consciente",
    "pierna",
    "ejercicio",
    "flexión",
    "schritt",
    "auf",
    "und",
    "mit",
    "para",
    "conectar",
    "mejorar",
];

const MAX_NON_ASCII_CHARS: usize = 3;

#[derive(Deref, Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(u32);

impl From<u32> for ExerciseID {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Normalized projection of a catalog exercise.
///
/// The description may contain HTML markup. An exercise without equipment is a bodyweight
/// exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: String,
    pub description: String,
    pub equipment: Vec<String>,
}

impl Exercise {
    #[must_use]
    pub fn project(exercise: &CatalogExercise, language: LanguageID) -> Self {
        let (name, description) = exercise.text(language);
        Self {
            id: exercise.id,
            name: name.to_string(),
            description: description.to_string(),
            equipment: equipment_names(&exercise.equipment),
        }
    }

    #[must_use]
    pub fn is_bodyweight(&self) -> bool {
        self.equipment.is_empty()
    }

    /// Whether the exercise has a name and a description that look like English text.
    #[must_use]
    pub fn has_quality_text(&self) -> bool {
        !self.name.is_empty()
            && !self.description.is_empty()
            && looks_english(&format!("{} {}", self.name, self.description))
    }
}

/// Trimmed equipment names without the catalog placeholders for "no equipment".
#[must_use]
pub fn equipment_names(equipment: &[String]) -> Vec<String> {
    equipment
        .iter()
        .map(|e| e.trim())
        .filter(|e| !e.is_empty())
        .filter(|e| {
            let lower = e.to_lowercase();
            !lower.contains("none") && !lower.contains("bodyweight")
        })
        .map(String::from)
        .collect()
}

/// Coarse check whether a text is English.
///
/// Rejects texts containing one of the known non-English markers or more than three non-ASCII
/// characters. Marker matching is substring based, so English words like "around" are rejected
/// too.
#[must_use]
pub fn looks_english(text: &str) -> bool {
    let lower = text.to_lowercase();
    if NON_ENGLISH_MARKERS.iter().any(|m| lower.contains(m)) {
        return false;
    }
    text.chars().filter(|c| !c.is_ascii()).count() <= MAX_NON_ASCII_CHARS
}
