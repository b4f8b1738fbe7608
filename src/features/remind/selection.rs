//! Fair note selection
//!
//! A note can only be picked while no other note has a strictly lower
//! lifetime send count; ties are broken uniformly at random.

use std::collections::HashMap;

use rand::seq::IndexedRandom;

use crate::core::errors::RemindError;
use crate::database::NoteId;

/// Pick one note id among those tied for the minimum send count.
///
/// Fails with [`RemindError::EmptyPopulation`] when `stats` is empty.
pub fn select_least_repeated(stats: &HashMap<NoteId, i64>) -> Result<NoteId, RemindError> {
    let min_count = stats
        .values()
        .copied()
        .min()
        .ok_or(RemindError::EmptyPopulation)?;

    let tied: Vec<&NoteId> = stats
        .iter()
        .filter(|(_, count)| **count == min_count)
        .map(|(note_id, _)| note_id)
        .collect();

    tied.choose(&mut rand::rng())
        .map(|note_id| (*note_id).clone())
        .ok_or(RemindError::EmptyPopulation)
}
