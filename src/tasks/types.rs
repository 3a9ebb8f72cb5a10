use crate::{
    api::{
        concepts::{
            ConceptDetail,
            ConceptPreview,
        },
        dictionary::{
            DictionaryEntry,
            DictionaryPage,
        },
        flashcards::{
            BulkAudioReport,
            DescriptionJob,
            DescriptionJobStatus,
        },
        stats::StatsBundle,
    },
    core::{
        Concept,
        ConceptCard,
        Language,
        Lemma,
        Topic,
        User,
    },
};

/// Terminal (or progress) message of one background operation, drained by
/// the shell via `TaskManager::poll_results`.
#[derive(Debug, Clone)]
pub enum TaskResult {
    ServerConnection(bool),
    SessionRestored(Option<User>),
    LoggedIn(Result<User, String>),
    Registered(Result<User, String>),
    UserUpdated(Result<User, String>),
    AccountDeleted(Result<(), String>),

    LanguagesLoaded(Result<Vec<Language>, String>),
    TopicsLoaded(Result<Vec<Topic>, String>),

    LessonCardsLoaded(Result<Vec<ConceptCard>, String>),

    DictionaryPageLoaded(Result<DictionaryPage, String>),
    DictionaryExportReady(Result<Vec<DictionaryEntry>, String>),
    PdfExported(Result<Vec<u8>, String>),

    ConceptPreviewReady(Result<ConceptPreview, String>),
    ConceptSaved(Result<Concept, String>),
    ConceptDeleted(Result<i64, String>),
    ConceptDetailLoaded(Result<ConceptDetail, String>),
    MissingLanguagesLoaded { concept_id: i64, result: Result<Vec<String>, String> },

    LemmasGenerated(Result<Vec<Lemma>, String>),
    LemmaSaved(Result<Lemma, String>),
    AudioBulkFinished(BulkAudioReport),
    DescriptionJobStarted(Result<DescriptionJob, String>),
    DescriptionJobStatus(Result<DescriptionJobStatus, String>),

    StatsLoaded(Result<StatsBundle, String>),

    LoadingMessage(String),
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::ServerConnection(_) => "server_connection",
            TaskResult::SessionRestored(_) => "session_restored",
            TaskResult::LoggedIn(_) => "logged_in",
            TaskResult::Registered(_) => "registered",
            TaskResult::UserUpdated(_) => "user_updated",
            TaskResult::AccountDeleted(_) => "account_deleted",
            TaskResult::LanguagesLoaded(_) => "languages",
            TaskResult::TopicsLoaded(_) => "topics",
            TaskResult::LessonCardsLoaded(_) => "lesson_cards",
            TaskResult::DictionaryPageLoaded(_) => "dictionary_page",
            TaskResult::DictionaryExportReady(_) => "dictionary_export",
            TaskResult::PdfExported(_) => "pdf_export",
            TaskResult::ConceptPreviewReady(_) => "concept_preview",
            TaskResult::ConceptSaved(_) => "concept_saved",
            TaskResult::ConceptDeleted(_) => "concept_deleted",
            TaskResult::ConceptDetailLoaded(_) => "concept_detail",
            TaskResult::MissingLanguagesLoaded { .. } => "missing_languages",
            TaskResult::LemmasGenerated(_) => "lemmas_generated",
            TaskResult::LemmaSaved(_) => "lemma_saved",
            TaskResult::AudioBulkFinished(_) => "audio_bulk",
            TaskResult::DescriptionJobStarted(_) => "description_job_started",
            TaskResult::DescriptionJobStatus(_) => "description_job_status",
            TaskResult::StatsLoaded(_) => "stats",
            TaskResult::LoadingMessage(_) => "loading_message",
        }
    }
}
