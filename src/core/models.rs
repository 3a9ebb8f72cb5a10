use serde::{
    Deserialize,
    Serialize,
};

/// CEFR proficiency band a concept is pitched at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl CefrLevel {
    pub const ALL: [CefrLevel; 6] = [
        CefrLevel::A1,
        CefrLevel::A2,
        CefrLevel::B1,
        CefrLevel::B2,
        CefrLevel::C1,
        CefrLevel::C2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Preposition,
    Conjunction,
    Interjection,
    Phrase,
}

/// Language-independent dictionary entry. Owned by the server; the client
/// only ever holds read-only copies fetched per screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    pub id: i64,
    pub term: String,                // canonical form in the reference language
    pub description: Option<String>, // disambiguation hint, not a translation
    pub part_of_speech: PartOfSpeech,
    pub level: CefrLevel,
    pub topic_id: Option<i64>,
    pub image_url: Option<String>,
}

/// Single-language realization of a concept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lemma {
    pub id: i64,
    pub concept_id: i64,
    pub language_code: String,
    pub translation: String,
    pub ipa: Option<String>,
    pub description: Option<String>,
    pub audio_path: Option<String>,
    pub gender: Option<String>,
    pub article: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

/// Per-user Leitner box intervals, configured through the profile screen
/// and applied server-side. Consumed here read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeitnerConfig {
    pub intervals_days: Vec<u32>,
}

impl LeitnerConfig {
    pub fn bin_count(&self) -> usize {
        self.intervals_days.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub native_language: String,
    pub learning_languages: Vec<String>,
    pub leitner_config: LeitnerConfig,
}

/// One lesson unit as returned by the card endpoints: a concept with its
/// learning/native lemma pairing already resolved by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptCard {
    pub concept: Concept,
    pub learning_lemma: Lemma,
    pub native_lemma: Lemma,
    pub leitner_bin: Option<u8>,
}

impl ConceptCard {
    pub fn concept_id(&self) -> i64 {
        self.concept.id
    }
}
