use crate::{CatalogExercise, Exercise, LanguageID, MuscleID};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolQuery {
    pub muscle_id: MuscleID,
    pub bodyweight_only: bool,
    pub language: LanguageID,
}

/// Exercises of the catalog that match the query, in catalog order.
///
/// An exercise is part of the pool if it targets the muscle as primary or secondary muscle, has
/// an English name and description and, if requested, needs no equipment.
#[must_use]
pub fn build_pool(catalog: &[CatalogExercise], query: &PoolQuery) -> Vec<Exercise> {
    catalog
        .iter()
        .filter(|e| e.targets(query.muscle_id))
        .map(|e| Exercise::project(e, query.language))
        .filter(Exercise::has_quality_text)
        .filter(|e| !query.bodyweight_only || e.is_bodyweight())
        .collect()
}
