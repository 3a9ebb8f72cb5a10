pub mod errors;
pub mod filters;
pub mod models;

pub use errors::ArchipelagoError;
pub use filters::{ DictionaryRequest, FilterQuery, FilterState, LearningStatus };
pub use models::{
    CefrLevel,
    Concept,
    ConceptCard,
    Language,
    LeitnerConfig,
    Lemma,
    PartOfSpeech,
    Topic,
    User,
};
