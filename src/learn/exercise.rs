use serde::{
    Deserialize,
    Serialize,
};
use uuid::Uuid;

use crate::core::ConceptCard;

/// Pedagogical mode of one practice unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    Discovery,
    Summary,
    Match,
    MatchReverse,
    Scaffold,
    Produce,
}

impl ExerciseType {
    /// Fixed block order within a lesson.
    pub const GROUP_ORDER: [ExerciseType; 6] = [
        ExerciseType::Discovery,
        ExerciseType::Summary,
        ExerciseType::Match,
        ExerciseType::MatchReverse,
        ExerciseType::Scaffold,
        ExerciseType::Produce,
    ];

    /// Discovery and summary are presentation-only; no timing or outcome
    /// is recorded for them.
    pub fn is_tracked(&self) -> bool {
        !matches!(self, ExerciseType::Discovery | ExerciseType::Summary)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExercisePayload {
    None,
    /// Full lesson card list in input order, shown once after discovery.
    Summary { all_cards: Vec<ConceptCard> },
    /// Card order for the match grid, shared by every match-type exercise
    /// of the lesson.
    MatchGrid { all_cards: Vec<ConceptCard> },
}

/// Ephemeral: generated fresh per lesson, never persisted.
#[derive(Debug, Clone)]
pub struct Exercise {
    pub id: Uuid,
    pub exercise_type: ExerciseType,
    pub card: Option<ConceptCard>,
    pub payload: ExercisePayload,
}

impl Exercise {
    pub(crate) fn new(
        exercise_type: ExerciseType,
        card: Option<ConceptCard>,
        payload: ExercisePayload,
    ) -> Self {
        Self { id: Uuid::new_v4(), exercise_type, card, payload }
    }

    pub fn concept_id(&self) -> Option<i64> {
        self.card.as_ref().map(|card| card.concept_id())
    }
}
