use rand::{
    seq::SliceRandom,
    Rng,
};

use super::exercise::{
    Exercise,
    ExercisePayload,
    ExerciseType,
};
use crate::core::ConceptCard;

/// Production entry point: unseeded source, so two lessons over the same
/// cards come out in different orders on purpose.
pub fn generate_lesson(cards: &[ConceptCard]) -> Vec<Exercise> {
    generate_exercises(cards, &mut rand::rng())
}

/// Builds the exercise sequence for one lesson: N discovery, 1 summary,
/// then N each of match, match-reverse, scaffold and produce (5N + 1 in
/// total), grouped in that fixed order.
///
/// Discovery, match and match-reverse each draw their own card order.
/// Match and match-reverse share one extra shuffle that fixes the grid
/// layout across both groups, so the learner sees the cards in the same
/// positions for the whole lesson.
pub fn generate_exercises<R: Rng + ?Sized>(cards: &[ConceptCard], rng: &mut R) -> Vec<Exercise> {
    let mut exercises = Vec::with_capacity(cards.len() * 5 + 1);

    let mut discovery_order = cards.to_vec();
    discovery_order.shuffle(rng);
    for card in discovery_order {
        exercises.push(Exercise::new(ExerciseType::Discovery, Some(card), ExercisePayload::None));
    }

    // Summary carries the unshuffled input list.
    exercises.push(Exercise::new(
        ExerciseType::Summary,
        None,
        ExercisePayload::Summary { all_cards: cards.to_vec() },
    ));

    let mut grid_order = cards.to_vec();
    grid_order.shuffle(rng);

    let mut match_order = cards.to_vec();
    match_order.shuffle(rng);
    for card in match_order {
        exercises.push(Exercise::new(
            ExerciseType::Match,
            Some(card),
            ExercisePayload::MatchGrid { all_cards: grid_order.clone() },
        ));
    }

    let mut reverse_order = cards.to_vec();
    reverse_order.shuffle(rng);
    for card in reverse_order {
        exercises.push(Exercise::new(
            ExerciseType::MatchReverse,
            Some(card),
            ExercisePayload::MatchGrid { all_cards: grid_order.clone() },
        ));
    }

    // No generated payload for these two yet; they keep input order.
    for card in cards {
        exercises.push(Exercise::new(ExerciseType::Scaffold, Some(card.clone()), ExercisePayload::None));
    }
    for card in cards {
        exercises.push(Exercise::new(ExerciseType::Produce, Some(card.clone()), ExercisePayload::None));
    }

    exercises
}

#[cfg(test)]
mod tests {
    use rand::{
        rngs::StdRng,
        SeedableRng,
    };

    use super::*;
    use crate::core::{
        CefrLevel,
        Concept,
        ConceptCard,
        Lemma,
        PartOfSpeech,
    };

    fn lemma(id: i64, concept_id: i64, language_code: &str, translation: &str) -> Lemma {
        Lemma {
            id,
            concept_id,
            language_code: language_code.to_string(),
            translation: translation.to_string(),
            ipa: None,
            description: None,
            audio_path: None,
            gender: None,
            article: None,
        }
    }

    fn card(id: i64, term: &str) -> ConceptCard {
        ConceptCard {
            concept: Concept {
                id,
                term: term.to_string(),
                description: None,
                part_of_speech: PartOfSpeech::Noun,
                level: CefrLevel::A1,
                topic_id: None,
                image_url: None,
            },
            learning_lemma: lemma(id * 10, id, "es", term),
            native_lemma: lemma(id * 10 + 1, id, "en", term),
            leitner_bin: None,
        }
    }

    fn cards(n: i64) -> Vec<ConceptCard> {
        (1..=n).map(|id| card(id, &format!("term-{id}"))).collect()
    }

    fn concept_ids(exercises: &[Exercise], exercise_type: ExerciseType) -> Vec<i64> {
        exercises
            .iter()
            .filter(|e| e.exercise_type == exercise_type)
            .filter_map(Exercise::concept_id)
            .collect()
    }

    #[test]
    fn five_per_card_plus_one_summary() {
        for n in [1, 2, 7] {
            let input = cards(n);
            let exercises = generate_exercises(&input, &mut StdRng::seed_from_u64(1));
            assert_eq!(exercises.len() as i64, 5 * n + 1);

            let summaries =
                exercises.iter().filter(|e| e.exercise_type == ExerciseType::Summary).count();
            assert_eq!(summaries, 1);
        }
    }

    #[test]
    fn empty_input_yields_lone_summary() {
        let exercises = generate_exercises(&[], &mut StdRng::seed_from_u64(1));
        assert_eq!(exercises.len(), 1);
        assert_eq!(exercises[0].exercise_type, ExerciseType::Summary);
    }

    #[test]
    fn types_form_contiguous_blocks_in_fixed_order() {
        let input = cards(4);
        let exercises = generate_exercises(&input, &mut StdRng::seed_from_u64(7));

        let sequence: Vec<ExerciseType> = exercises.iter().map(|e| e.exercise_type).collect();
        let mut expected = Vec::new();
        for exercise_type in ExerciseType::GROUP_ORDER {
            let count = if exercise_type == ExerciseType::Summary { 1 } else { 4 };
            expected.extend(std::iter::repeat(exercise_type).take(count));
        }
        assert_eq!(sequence, expected);

        // Summary sits immediately after the discovery block.
        assert_eq!(exercises[4].exercise_type, ExerciseType::Summary);
    }

    #[test]
    fn each_group_covers_every_card() {
        let input = cards(5);
        let all_ids: Vec<i64> = input.iter().map(ConceptCard::concept_id).collect();
        let exercises = generate_exercises(&input, &mut StdRng::seed_from_u64(3));

        for exercise_type in [
            ExerciseType::Discovery,
            ExerciseType::Match,
            ExerciseType::MatchReverse,
            ExerciseType::Scaffold,
            ExerciseType::Produce,
        ] {
            let mut ids = concept_ids(&exercises, exercise_type);
            ids.sort();
            assert_eq!(ids, all_ids, "{:?} group should cover every card", exercise_type);
        }
    }

    #[test]
    fn match_groups_share_one_grid_permutation() {
        let input = cards(6);
        let exercises = generate_exercises(&input, &mut StdRng::seed_from_u64(11));

        let grids: Vec<&Vec<ConceptCard>> = exercises
            .iter()
            .filter_map(|e| match &e.payload {
                ExercisePayload::MatchGrid { all_cards } => Some(all_cards),
                _ => None,
            })
            .collect();

        // Both match blocks, every exercise: one identical permutation.
        assert_eq!(grids.len(), 12);
        for grid in &grids {
            assert_eq!(*grid, grids[0]);
        }
    }

    #[test]
    fn summary_payload_is_unshuffled_input() {
        let input = cards(3);
        let exercises = generate_exercises(&input, &mut StdRng::seed_from_u64(5));
        assert_eq!(exercises.len(), 16);

        let summary = &exercises[3];
        assert_eq!(summary.exercise_type, ExerciseType::Summary);
        assert!(summary.card.is_none());
        match &summary.payload {
            ExercisePayload::Summary { all_cards } => {
                assert_eq!(all_cards.len(), 3);
                assert_eq!(*all_cards, input);
            }
            other => panic!("Expected summary payload, got {:?}", other),
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let input = cards(8);
        let first = generate_exercises(&input, &mut StdRng::seed_from_u64(42));
        let second = generate_exercises(&input, &mut StdRng::seed_from_u64(42));

        let order = |exercises: &[Exercise]| -> Vec<(ExerciseType, Option<i64>)> {
            exercises.iter().map(|e| (e.exercise_type, e.concept_id())).collect()
        };
        assert_eq!(order(&first), order(&second));
    }
}
