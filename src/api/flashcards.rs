use serde::{
    Deserialize,
    Serialize,
};

use super::ApiClient;
use crate::core::{
    ArchipelagoError,
    FilterState,
    Lemma,
};

#[derive(Serialize)]
struct GenerateDescriptionsRequest<'a> {
    concept_ids: &'a [i64],
}

#[derive(Serialize)]
struct JobStatusRequest<'a> {
    job_id: &'a str,
}

#[derive(Serialize)]
struct GenerateAudioRequest {
    lemma_id: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DescriptionJob {
    pub job_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Pending,
    Running,
    Finished,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DescriptionJobStatus {
    pub state: JobState,
    pub completed: u32,
    pub total: u32,
    #[serde(default)]
    pub message: Option<String>,
}

/// Outcome of a bulk audio run. Failures are collected per lemma, the
/// loop itself never aborts early.
#[derive(Debug, Clone, Default)]
pub struct BulkAudioReport {
    pub generated: Vec<i64>,
    pub failed: Vec<(i64, String)>,
}

/// Kicks off server-side LLM description generation; progress is pulled
/// via `description_status`.
pub async fn generate_descriptions(
    client: &ApiClient,
    concept_ids: &[i64],
) -> Result<DescriptionJob, ArchipelagoError> {
    client
        .post_json("/flashcards/generate-descriptions", &GenerateDescriptionsRequest { concept_ids })
        .await
}

pub async fn description_status(
    client: &ApiClient,
    job_id: &str,
) -> Result<DescriptionJobStatus, ArchipelagoError> {
    client.post_json("/flashcards/generate-descriptions/status", &JobStatusRequest { job_id }).await
}

/// Renders the current filter selection to a printable PDF. Returns the
/// raw document bytes; the shell decides where to write them.
pub async fn export_pdf(
    client: &ApiClient,
    filter: &FilterState,
) -> Result<Vec<u8>, ArchipelagoError> {
    client.post_bytes("/flashcard-export/pdf", &filter.query()).await
}

pub async fn generate_audio(client: &ApiClient, lemma_id: i64) -> Result<Lemma, ArchipelagoError> {
    client.post_json("/lemma-audio/generate", &GenerateAudioRequest { lemma_id }).await
}

/// Generates audio for each lemma in turn. Strictly sequential: each
/// iteration blocks on the previous response so the TTS backend is never
/// hit with a burst.
pub async fn generate_audio_bulk(
    client: &ApiClient,
    lemma_ids: &[i64],
    progress_callback: Option<Box<dyn Fn(String) + Send>>,
) -> BulkAudioReport {
    let mut report = BulkAudioReport::default();

    for (index, &lemma_id) in lemma_ids.iter().enumerate() {
        if let Some(callback) = &progress_callback {
            callback(format!("Generating audio {} of {}...", index + 1, lemma_ids.len()));
        }

        match generate_audio(client, lemma_id).await {
            Ok(_) => report.generated.push(lemma_id),
            Err(err) => report.failed.push((lemma_id, err.user_message())),
        }
    }

    report
}
