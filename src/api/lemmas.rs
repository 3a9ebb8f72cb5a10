use serde::Serialize;

use super::ApiClient;
use crate::core::{
    ArchipelagoError,
    Lemma,
};

#[derive(Serialize)]
struct GenerateLemmaRequest<'a> {
    concept_id: i64,
    language_code: &'a str,
}

#[derive(Serialize)]
struct GenerateBatchRequest<'a> {
    concept_id: i64,
    language_codes: &'a [String],
}

#[derive(Serialize)]
struct GenerateForConceptsRequest<'a> {
    concept_ids: &'a [i64],
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LemmaUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<String>,
}

pub async fn generate(
    client: &ApiClient,
    concept_id: i64,
    language_code: &str,
) -> Result<Lemma, ArchipelagoError> {
    client.post_json("/lemma/generate", &GenerateLemmaRequest { concept_id, language_code }).await
}

/// One concept, several target languages in a single round trip.
pub async fn generate_batch(
    client: &ApiClient,
    concept_id: i64,
    language_codes: &[String],
) -> Result<Vec<Lemma>, ArchipelagoError> {
    client
        .post_json("/lemma/generate-batch", &GenerateBatchRequest { concept_id, language_codes })
        .await
}

/// Several concepts, the user's configured languages.
pub async fn generate_for_concepts(
    client: &ApiClient,
    concept_ids: &[i64],
) -> Result<Vec<Lemma>, ArchipelagoError> {
    client.post_json("/lemmas/generate", &GenerateForConceptsRequest { concept_ids }).await
}

pub async fn for_concept(
    client: &ApiClient,
    concept_id: i64,
) -> Result<Vec<Lemma>, ArchipelagoError> {
    client.get_json(&format!("/lemmas/concept/{concept_id}"), &[]).await
}

pub async fn update(
    client: &ApiClient,
    id: i64,
    update: &LemmaUpdate,
) -> Result<Lemma, ArchipelagoError> {
    client.put_json(&format!("/lemmas/{id}"), update).await
}
