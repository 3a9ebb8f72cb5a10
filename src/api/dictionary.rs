use serde::{
    Deserialize,
    Serialize,
};

use super::ApiClient;
use crate::core::{
    ArchipelagoError,
    Concept,
    ConceptCard,
    FilterState,
    Lemma,
};

pub const EXPORT_PAGE_SIZE: u32 = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub concept: Concept,
    pub lemmas: Vec<Lemma>,
    pub leitner_bin: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DictionaryPage {
    pub entries: Vec<DictionaryEntry>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
}

#[derive(Serialize)]
struct LessonCardsRequest {
    #[serde(flatten)]
    filter: crate::core::FilterQuery,
    limit: u32,
}

/// Unfiltered paged listing.
pub async fn list(
    client: &ApiClient,
    page: u32,
    page_size: u32,
) -> Result<DictionaryPage, ArchipelagoError> {
    client
        .get_json(
            "/dictionary",
            &[("page", page.to_string()), ("page_size", page_size.to_string())],
        )
        .await
}

/// Filtered search; the filter body only carries active dimensions.
pub async fn search(
    client: &ApiClient,
    filter: &FilterState,
    page: u32,
    page_size: u32,
) -> Result<DictionaryPage, ArchipelagoError> {
    client.post_json("/dictionary", &filter.to_request(page, page_size)).await
}

/// Candidate cards for a lesson, lemma pairing resolved server-side.
pub async fn lesson_cards(
    client: &ApiClient,
    filter: &FilterState,
    limit: u32,
) -> Result<Vec<ConceptCard>, ArchipelagoError> {
    client
        .post_json("/dictionary/lesson-cards", &LessonCardsRequest { filter: filter.query(), limit })
        .await
}

/// Fetches every page matching the filter. Pages are requested one at a
/// time: each iteration blocks on the previous response, which keeps the
/// result ordering stable and avoids flooding the server.
pub async fn export_entries(
    client: &ApiClient,
    filter: &FilterState,
) -> Result<Vec<DictionaryEntry>, ArchipelagoError> {
    let mut entries: Vec<DictionaryEntry> = Vec::new();
    let mut page = 1;

    loop {
        let batch = search(client, filter, page, EXPORT_PAGE_SIZE).await?;
        let received = batch.entries.len();
        entries.extend(batch.entries);

        if received == 0 || entries.len() as u64 >= batch.total {
            break;
        }
        page += 1;
    }

    Ok(entries)
}
