use std::collections::HashSet;

use derive_more::{Deref, Display};
use rand::Rng;

use crate::{Exercise, ExerciseID};

/// Number of exercises of a workout, between 1 and 12.
#[derive(Deref, Display, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutSize(usize);

impl WorkoutSize {
    pub const MIN: WorkoutSize = WorkoutSize(1);
    pub const MAX: WorkoutSize = WorkoutSize(12);

    /// Clamps the value into the valid range, truncating fractions.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::MIN;
        }
        #[allow(clippy::cast_precision_loss)]
        let value = value.trunc().clamp(Self::MIN.0 as f64, Self::MAX.0 as f64);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Self(value as usize)
    }
}

impl Default for WorkoutSize {
    fn default() -> Self {
        Self(6)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SwapError {
    #[error("no more unique exercises to swap in")]
    NoCandidates,
}

/// Randomly permutes the pool and takes up to `size` exercises.
#[must_use]
pub fn pick(pool: &[Exercise], size: WorkoutSize, rng: &mut impl Rng) -> Vec<Exercise> {
    let mut exercises = pool.to_vec();
    shuffle(&mut exercises, rng);
    exercises.truncate(*size);
    exercises
}

/// Replaces the first occurrence of `target` by a random pool exercise that is not part of the
/// workout yet. All other positions stay unchanged.
pub fn swap(
    current: &[Exercise],
    target: ExerciseID,
    pool: &[Exercise],
    rng: &mut impl Rng,
) -> Result<Vec<Exercise>, SwapError> {
    let used = current.iter().map(|e| e.id).collect::<HashSet<_>>();
    let candidates = pool
        .iter()
        .filter(|e| !used.contains(&e.id))
        .collect::<Vec<_>>();

    if candidates.is_empty() {
        return Err(SwapError::NoCandidates);
    }

    let replacement = candidates[rng.gen_range(0..candidates.len())];
    let mut result = current.to_vec();
    if let Some(position) = result.iter().position(|e| e.id == target) {
        result[position] = replacement.clone();
    }
    Ok(result)
}

/// Fisher-Yates shuffle.
fn shuffle<T>(items: &mut [T], rng: &mut impl Rng) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}
