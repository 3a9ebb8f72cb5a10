use chrono::{
    DateTime,
    Utc,
};
use serde::Serialize;
use uuid::Uuid;

use super::exercise::ExerciseType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseOutcome {
    Correct,
    Incorrect,
}

/// One closed timing window for one attempt at one exercise. Redoing an
/// exercise appends another record; nothing is overwritten.
#[derive(Debug, Clone, Serialize)]
pub struct ExercisePerformance {
    pub exercise_id: Uuid,
    pub concept_id: Option<i64>,
    pub exercise_type: ExerciseType,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcome: ExerciseOutcome,
    pub hint_count: u32,
    pub failure_reason: Option<String>,
}

impl ExercisePerformance {
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

#[derive(Debug, Clone)]
pub struct ReportRow {
    pub exercise_type: ExerciseType,
    pub attempts: usize,
    pub correct: usize,
    pub hints: u32,
    pub avg_duration_secs: f64,
}

/// End-of-lesson aggregates over the performance log, one row per
/// exercise type that was attempted.
#[derive(Debug, Clone, Default)]
pub struct ReportCard {
    pub rows: Vec<ReportRow>,
    pub total_attempts: usize,
    pub total_correct: usize,
    pub total_hints: u32,
}

impl ReportCard {
    pub fn from_log(log: &[ExercisePerformance]) -> Self {
        let mut rows = Vec::new();

        for exercise_type in ExerciseType::GROUP_ORDER {
            let records: Vec<&ExercisePerformance> =
                log.iter().filter(|r| r.exercise_type == exercise_type).collect();
            if records.is_empty() {
                continue;
            }

            let correct =
                records.iter().filter(|r| r.outcome == ExerciseOutcome::Correct).count();
            let hints = records.iter().map(|r| r.hint_count).sum();
            let total_secs: f64 =
                records.iter().map(|r| r.duration().num_milliseconds() as f64 / 1000.0).sum();

            rows.push(ReportRow {
                exercise_type,
                attempts: records.len(),
                correct,
                hints,
                avg_duration_secs: total_secs / records.len() as f64,
            });
        }

        ReportCard {
            total_attempts: log.len(),
            total_correct: log.iter().filter(|r| r.outcome == ExerciseOutcome::Correct).count(),
            total_hints: log.iter().map(|r| r.hint_count).sum(),
            rows,
        }
    }

    pub fn accuracy(&self) -> f64 {
        if self.total_attempts == 0 {
            return 0.0;
        }
        self.total_correct as f64 / self.total_attempts as f64
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    fn record(
        exercise_type: ExerciseType,
        outcome: ExerciseOutcome,
        secs: i64,
        hints: u32,
    ) -> ExercisePerformance {
        let started_at = Utc::now();
        ExercisePerformance {
            exercise_id: Uuid::new_v4(),
            concept_id: Some(1),
            exercise_type,
            started_at,
            finished_at: started_at + TimeDelta::seconds(secs),
            outcome,
            hint_count: hints,
            failure_reason: None,
        }
    }

    #[test]
    fn aggregates_per_type_and_overall() {
        let log = vec![
            record(ExerciseType::Match, ExerciseOutcome::Correct, 4, 0),
            record(ExerciseType::Match, ExerciseOutcome::Incorrect, 6, 2),
            record(ExerciseType::Produce, ExerciseOutcome::Correct, 10, 1),
        ];

        let report = ReportCard::from_log(&log);
        assert_eq!(report.total_attempts, 3);
        assert_eq!(report.total_correct, 2);
        assert_eq!(report.total_hints, 3);
        assert!((report.accuracy() - 2.0 / 3.0).abs() < 1e-9);

        assert_eq!(report.rows.len(), 2);
        let match_row = &report.rows[0];
        assert_eq!(match_row.exercise_type, ExerciseType::Match);
        assert_eq!(match_row.attempts, 2);
        assert_eq!(match_row.correct, 1);
        assert_eq!(match_row.hints, 2);
        assert!((match_row.avg_duration_secs - 5.0).abs() < 1e-9);
    }

    #[test]
    fn empty_log_is_a_zero_report() {
        let report = ReportCard::from_log(&[]);
        assert!(report.rows.is_empty());
        assert_eq!(report.accuracy(), 0.0);
    }
}
