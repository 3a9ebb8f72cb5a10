use serde::{
    Deserialize,
    Serialize,
};

use super::ApiClient;
use crate::core::{
    ArchipelagoError,
    CefrLevel,
    Concept,
    Lemma,
    PartOfSpeech,
    Topic,
};

/// User-entered form state for a new concept, before the server has
/// generated anything.
#[derive(Debug, Clone, Serialize)]
pub struct ConceptDraft {
    pub term: String,
    pub part_of_speech: PartOfSpeech,
    pub level: CefrLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub generate_image: bool,
    pub language_codes: Vec<String>,
}

/// Server-generated candidate: the concept plus generated lemmas, held
/// client-side (and possibly edited) until the user confirms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptPreview {
    pub concept: Concept,
    pub lemmas: Vec<Lemma>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ConceptUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<PartOfSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<CefrLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Everything the concept detail screen needs, fetched in one fan-out.
#[derive(Debug, Clone)]
pub struct ConceptDetail {
    pub concept: Concept,
    pub lemmas: Vec<Lemma>,
    pub topic: Option<Topic>,
}

#[derive(Serialize)]
struct MissingLanguagesRequest {
    concept_id: i64,
}

pub async fn preview(
    client: &ApiClient,
    draft: &ConceptDraft,
) -> Result<ConceptPreview, ArchipelagoError> {
    client.post_json("/concepts/preview", draft).await
}

pub async fn confirm(
    client: &ApiClient,
    preview: &ConceptPreview,
) -> Result<Concept, ArchipelagoError> {
    client.post_json("/concepts/confirm", preview).await
}

/// Generation without persistence: same payload as `preview` but the
/// server discards the result after responding.
pub async fn generate_only(
    client: &ApiClient,
    draft: &ConceptDraft,
) -> Result<ConceptPreview, ArchipelagoError> {
    client.post_json("/concepts/generate-only", draft).await
}

/// Language codes the user is learning for which this concept has no
/// lemma yet.
pub async fn missing_languages(
    client: &ApiClient,
    concept_id: i64,
) -> Result<Vec<String>, ArchipelagoError> {
    client.post_json("/concepts/missing-languages", &MissingLanguagesRequest { concept_id }).await
}

pub async fn get(client: &ApiClient, id: i64) -> Result<Concept, ArchipelagoError> {
    client.get_json(&format!("/concepts/{id}"), &[]).await
}

pub async fn update(
    client: &ApiClient,
    id: i64,
    update: &ConceptUpdate,
) -> Result<Concept, ArchipelagoError> {
    client.put_json(&format!("/concepts/{id}"), update).await
}

pub async fn delete(client: &ApiClient, id: i64) -> Result<(), ArchipelagoError> {
    client.delete(&format!("/concepts/{id}")).await
}

pub async fn topics(client: &ApiClient) -> Result<Vec<Topic>, ArchipelagoError> {
    client.get_json("/topics", &[]).await
}

/// Concept, lemmas and topic list are independent requests, so they are
/// issued concurrently and joined. Latency only; each request still fails
/// independently through the common error path.
pub async fn load_detail(client: &ApiClient, id: i64) -> Result<ConceptDetail, ArchipelagoError> {
    let (concept, lemmas, topic_list) =
        tokio::try_join!(get(client, id), super::lemmas::for_concept(client, id), topics(client))?;

    let topic =
        concept.topic_id.and_then(|topic_id| topic_list.into_iter().find(|t| t.id == topic_id));

    Ok(ConceptDetail { concept, lemmas, topic })
}
