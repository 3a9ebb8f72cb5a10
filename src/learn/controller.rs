use std::collections::HashMap;

use chrono::{
    DateTime,
    Utc,
};
use uuid::Uuid;

use super::{
    exercise::Exercise,
    generator,
    performance::{
        ExerciseOutcome,
        ExercisePerformance,
        ReportCard,
    },
};
use crate::{
    api::ApiClient,
    core::{
        ConceptCard,
        FilterState,
    },
    tasks::{
        TaskManager,
        TaskResult,
    },
};

pub const DEFAULT_LESSON_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonPhase {
    Idle,
    Active { index: usize },
    ReportCard,
}

/// Drives one lesson through the generated exercise sequence and collects
/// timing/outcome telemetry for the report card. Everything here is
/// process-local; nothing survives an exit.
pub struct LearnController {
    phase: LessonPhase,
    exercises: Vec<Exercise>,
    performance: Vec<ExercisePerformance>,
    open_windows: HashMap<Uuid, DateTime<Utc>>,
    report: Option<ReportCard>,

    filter: FilterState,
    pub cards: Vec<ConceptCard>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for LearnController {
    fn default() -> Self {
        Self::new()
    }
}

impl LearnController {
    pub fn new() -> Self {
        Self {
            phase: LessonPhase::Idle,
            exercises: Vec::new(),
            performance: Vec::new(),
            open_windows: HashMap::new(),
            report: None,
            filter: FilterState::new(),
            cards: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn phase(&self) -> LessonPhase {
        self.phase
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn current_exercise(&self) -> Option<&Exercise> {
        match self.phase {
            LessonPhase::Active { index } => self.exercises.get(index),
            _ => None,
        }
    }

    pub fn performance_log(&self) -> &[ExercisePerformance] {
        &self.performance
    }

    pub fn report_card(&self) -> Option<&ReportCard> {
        self.report.as_ref()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Generates a fresh sequence from the loaded cards and enters the
    /// lesson. Any previous log or open timers are discarded.
    pub fn start_lesson(&mut self) {
        let exercises = generator::generate_lesson(&self.cards);
        self.start_lesson_with(exercises);
    }

    pub fn start_lesson_with(&mut self, exercises: Vec<Exercise>) {
        self.exercises = exercises;
        self.performance.clear();
        self.open_windows.clear();
        self.report = None;
        self.phase = LessonPhase::Active { index: 0 };
    }

    /// Bounded forward move; no-op on the last exercise or outside a
    /// lesson.
    pub fn next_card(&mut self) {
        if let LessonPhase::Active { index } = self.phase {
            if index + 1 < self.exercises.len() {
                self.phase = LessonPhase::Active { index: index + 1 };
            }
        }
    }

    pub fn previous_card(&mut self) {
        if let LessonPhase::Active { index } = self.phase {
            if index > 0 {
                self.phase = LessonPhase::Active { index: index - 1 };
            }
        }
    }

    pub fn finish_lesson(&mut self) {
        if matches!(self.phase, LessonPhase::Active { .. }) {
            self.report = Some(ReportCard::from_log(&self.performance));
            self.phase = LessonPhase::ReportCard;
        }
    }

    /// Abandons the lesson; the in-progress log is discarded.
    pub fn dismiss_lesson(&mut self) {
        if matches!(self.phase, LessonPhase::Active { .. }) {
            self.exercises.clear();
            self.performance.clear();
            self.open_windows.clear();
            self.phase = LessonPhase::Idle;
        }
    }

    pub fn dismiss_report_card(&mut self) {
        if self.phase == LessonPhase::ReportCard {
            self.exercises.clear();
            self.performance.clear();
            self.report = None;
            self.phase = LessonPhase::Idle;
        }
    }

    /// Opens a timing window for the exercise. Ignored for untracked
    /// types and when a window for this id is already open (re-entering a
    /// card must not reset its timer).
    pub fn start_exercise_tracking(&mut self, exercise: &Exercise) {
        if !exercise.exercise_type.is_tracked() {
            return;
        }
        self.open_windows.entry(exercise.id).or_insert_with(Utc::now);
    }

    /// Closes the window and appends one record. Always appends, never
    /// overwrites: redoing an exercise yields a second record. The start
    /// entry is cleared so a redo gets a fresh timer.
    pub fn complete_exercise_tracking(
        &mut self,
        exercise: &Exercise,
        outcome: ExerciseOutcome,
        hint_count: u32,
        failure_reason: Option<String>,
    ) {
        if !exercise.exercise_type.is_tracked() {
            return;
        }

        let finished_at = Utc::now();
        // Missing start (e.g. tracking began mid-card) degrades to a
        // zero-length window rather than dropping the attempt.
        let started_at = self.open_windows.remove(&exercise.id).unwrap_or(finished_at);

        self.performance.push(ExercisePerformance {
            exercise_id: exercise.id,
            concept_id: exercise.concept_id(),
            exercise_type: exercise.exercise_type,
            started_at,
            finished_at,
            outcome,
            hint_count,
            failure_reason,
        });
    }

    /// Replacing the filter invalidates the loaded candidates, so a
    /// reload is kicked off immediately.
    pub fn set_filter(&mut self, filter: FilterState, tasks: &TaskManager, client: &ApiClient) {
        if self.filter != filter {
            self.filter = filter;
            self.load_new_cards(tasks, client);
        }
    }

    pub fn load_new_cards(&mut self, tasks: &TaskManager, client: &ApiClient) {
        self.loading = true;
        self.error = None;
        tasks.load_lesson_cards(client.clone(), self.filter.clone(), DEFAULT_LESSON_SIZE);
    }

    pub fn handle_result(&mut self, result: &TaskResult) {
        if let TaskResult::LessonCardsLoaded(outcome) = result {
            self.loading = false;
            match outcome {
                Ok(cards) => self.cards = cards.clone(),
                Err(message) => self.error = Some(message.clone()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{
        rngs::StdRng,
        SeedableRng,
    };

    use super::*;
    use crate::{
        core::{
            CefrLevel,
            Concept,
            Lemma,
            PartOfSpeech,
        },
        learn::exercise::ExerciseType,
    };

    fn lemma(id: i64, concept_id: i64, language_code: &str) -> Lemma {
        Lemma {
            id,
            concept_id,
            language_code: language_code.to_string(),
            translation: format!("word-{concept_id}"),
            ipa: None,
            description: None,
            audio_path: None,
            gender: None,
            article: None,
        }
    }

    fn cards(n: i64) -> Vec<ConceptCard> {
        (1..=n)
            .map(|id| ConceptCard {
                concept: Concept {
                    id,
                    term: format!("term-{id}"),
                    description: None,
                    part_of_speech: PartOfSpeech::Noun,
                    level: CefrLevel::A1,
                    topic_id: None,
                    image_url: None,
                },
                learning_lemma: lemma(id * 10, id, "es"),
                native_lemma: lemma(id * 10 + 1, id, "en"),
                leitner_bin: None,
            })
            .collect()
    }

    fn active_controller(n: i64) -> LearnController {
        let mut controller = LearnController::new();
        let exercises =
            generator::generate_exercises(&cards(n), &mut StdRng::seed_from_u64(9));
        controller.start_lesson_with(exercises);
        controller
    }

    fn find_exercise(controller: &LearnController, exercise_type: ExerciseType) -> Exercise {
        controller
            .exercises()
            .iter()
            .find(|e| e.exercise_type == exercise_type)
            .expect("lesson should contain the requested type")
            .clone()
    }

    #[test]
    fn lesson_lifecycle() {
        let mut controller = active_controller(2);
        assert_eq!(controller.phase(), LessonPhase::Active { index: 0 });
        assert_eq!(controller.exercises().len(), 11);

        controller.finish_lesson();
        assert_eq!(controller.phase(), LessonPhase::ReportCard);
        assert!(controller.report_card().is_some());

        controller.dismiss_report_card();
        assert_eq!(controller.phase(), LessonPhase::Idle);
        assert!(controller.performance_log().is_empty());
        assert!(controller.report_card().is_none());
    }

    #[test]
    fn navigation_is_bounded() {
        let mut controller = active_controller(1);
        let last = controller.exercises().len() - 1;

        controller.previous_card();
        assert_eq!(controller.phase(), LessonPhase::Active { index: 0 });

        for _ in 0..20 {
            controller.next_card();
        }
        assert_eq!(controller.phase(), LessonPhase::Active { index: last });

        // Outside a lesson both moves are no-ops.
        controller.dismiss_lesson();
        controller.next_card();
        assert_eq!(controller.phase(), LessonPhase::Idle);
    }

    #[test]
    fn dismiss_discards_in_progress_log() {
        let mut controller = active_controller(2);
        let exercise = find_exercise(&controller, ExerciseType::Match);

        controller.start_exercise_tracking(&exercise);
        controller.complete_exercise_tracking(&exercise, ExerciseOutcome::Correct, 0, None);
        assert_eq!(controller.performance_log().len(), 1);

        controller.dismiss_lesson();
        assert!(controller.performance_log().is_empty());
        assert_eq!(controller.phase(), LessonPhase::Idle);
    }

    #[test]
    fn every_complete_appends_one_record() {
        let mut controller = active_controller(2);
        let exercise = find_exercise(&controller, ExerciseType::Produce);

        controller.start_exercise_tracking(&exercise);
        controller.complete_exercise_tracking(&exercise, ExerciseOutcome::Incorrect, 1, Some("typo".to_string()));

        // Redo of the same exercise: appended, not overwritten.
        controller.start_exercise_tracking(&exercise);
        controller.complete_exercise_tracking(&exercise, ExerciseOutcome::Correct, 0, None);

        // Never started: still appended, zero-length window.
        controller.complete_exercise_tracking(&exercise, ExerciseOutcome::Correct, 0, None);

        let log = controller.performance_log();
        assert_eq!(log.len(), 3);
        assert_eq!(log[0].outcome, ExerciseOutcome::Incorrect);
        assert_eq!(log[0].failure_reason.as_deref(), Some("typo"));
        assert_eq!(log[2].started_at, log[2].finished_at);
        for record in log {
            assert!(record.finished_at >= record.started_at);
        }
    }

    #[test]
    fn repeated_start_keeps_original_window() {
        let mut controller = active_controller(1);
        let exercise = find_exercise(&controller, ExerciseType::Scaffold);

        controller.start_exercise_tracking(&exercise);
        let before = *controller.open_windows.get(&exercise.id).unwrap();
        controller.start_exercise_tracking(&exercise);
        assert_eq!(*controller.open_windows.get(&exercise.id).unwrap(), before);
    }

    #[test]
    fn untracked_types_are_ignored() {
        let mut controller = active_controller(2);
        let discovery = find_exercise(&controller, ExerciseType::Discovery);
        let summary = find_exercise(&controller, ExerciseType::Summary);

        controller.start_exercise_tracking(&discovery);
        controller.start_exercise_tracking(&summary);
        controller.complete_exercise_tracking(&discovery, ExerciseOutcome::Correct, 0, None);
        controller.complete_exercise_tracking(&summary, ExerciseOutcome::Correct, 0, None);

        assert!(controller.open_windows.is_empty());
        assert!(controller.performance_log().is_empty());
    }

    #[test]
    fn starting_a_lesson_resets_previous_state() {
        let mut controller = active_controller(2);
        let exercise = find_exercise(&controller, ExerciseType::Match);
        controller.start_exercise_tracking(&exercise);
        controller.complete_exercise_tracking(&exercise, ExerciseOutcome::Correct, 0, None);
        controller.finish_lesson();

        controller.cards = cards(3);
        controller.start_lesson();
        assert_eq!(controller.phase(), LessonPhase::Active { index: 0 });
        assert_eq!(controller.exercises().len(), 16);
        assert!(controller.performance_log().is_empty());
        assert!(controller.report_card().is_none());
    }
}
