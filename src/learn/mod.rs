pub mod controller;
pub mod exercise;
pub mod generator;
pub mod performance;

pub use controller::{
    LearnController,
    LessonPhase,
};
pub use exercise::{
    Exercise,
    ExercisePayload,
    ExerciseType,
};
pub use generator::{
    generate_exercises,
    generate_lesson,
};
pub use performance::{
    ExerciseOutcome,
    ExercisePerformance,
    ReportCard,
};
