use std::collections::BTreeSet;

use serde::{
    Deserialize,
    Serialize,
};

use super::models::{
    CefrLevel,
    PartOfSpeech,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningStatus {
    New,
    Learning,
    Known,
}

/// Filter toggles mirrored across the dictionary, learn and profile
/// screens. Pure query-parameter builder; nothing here is validated
/// against the server.
///
/// Boolean pairs (images, audio, completeness) are toggled independently.
/// Both flags off means "include all", and so does both on. Existing
/// product behavior, kept as-is (see DESIGN.md).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub topic_ids: BTreeSet<i64>,
    pub levels: BTreeSet<CefrLevel>,
    pub parts_of_speech: BTreeSet<PartOfSpeech>,
    pub has_images: bool,
    pub has_no_images: bool,
    pub has_audio: bool,
    pub has_no_audio: bool,
    pub complete: bool,
    pub incomplete: bool,
    pub leitner_bins: BTreeSet<u8>,
    pub learning_status: Option<LearningStatus>,
    pub search: String,
}

fn pair(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, false) => Some(true),
        (false, true) => Some(false),
        _ => None,
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tri-state view of the image pair: `None` = include all.
    pub fn image_filter(&self) -> Option<bool> {
        pair(self.has_images, self.has_no_images)
    }

    pub fn audio_filter(&self) -> Option<bool> {
        pair(self.has_audio, self.has_no_audio)
    }

    pub fn completeness_filter(&self) -> Option<bool> {
        pair(self.complete, self.incomplete)
    }

    pub fn toggle_topic(&mut self, topic_id: i64) {
        if !self.topic_ids.remove(&topic_id) {
            self.topic_ids.insert(topic_id);
        }
    }

    pub fn toggle_level(&mut self, level: CefrLevel) {
        if !self.levels.remove(&level) {
            self.levels.insert(level);
        }
    }

    pub fn toggle_part_of_speech(&mut self, pos: PartOfSpeech) {
        if !self.parts_of_speech.remove(&pos) {
            self.parts_of_speech.insert(pos);
        }
    }

    pub fn toggle_leitner_bin(&mut self, bin: u8) {
        if !self.leitner_bins.remove(&bin) {
            self.leitner_bins.insert(bin);
        }
    }

    /// Wire form of the active filter dimensions. Inactive dimensions are
    /// omitted from the serialized body entirely.
    pub fn query(&self) -> FilterQuery {
        FilterQuery {
            search: if self.search.trim().is_empty() {
                None
            } else {
                Some(self.search.trim().to_string())
            },
            topic_ids: self.topic_ids.iter().copied().collect(),
            levels: self.levels.iter().copied().collect(),
            parts_of_speech: self.parts_of_speech.iter().copied().collect(),
            has_image: self.image_filter(),
            has_audio: self.audio_filter(),
            complete: self.completeness_filter(),
            leitner_bins: self.leitner_bins.iter().copied().collect(),
            learning_status: self.learning_status,
        }
    }

    pub fn to_request(&self, page: u32, page_size: u32) -> DictionaryRequest {
        DictionaryRequest { filter: self.query(), page, page_size }
    }
}

/// Filter dimensions shared by the dictionary search and the statistics
/// endpoints (which take the same body minus paging).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub topic_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub levels: Vec<CefrLevel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parts_of_speech: Vec<PartOfSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_image: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_audio: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub leitner_bins: Vec<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_status: Option<LearningStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DictionaryRequest {
    #[serde(flatten)]
    pub filter: FilterQuery,
    pub page: u32,
    pub page_size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_pairs_are_tri_state() {
        let mut filter = FilterState::new();
        assert_eq!(filter.image_filter(), None);

        filter.has_images = true;
        assert_eq!(filter.image_filter(), Some(true));

        filter.has_no_images = true;
        // Both on collapses back to include-all, same as both off.
        assert_eq!(filter.image_filter(), None);

        filter.has_images = false;
        assert_eq!(filter.image_filter(), Some(false));
    }

    #[test]
    fn default_filter_serializes_to_paging_only() {
        let body = serde_json::to_value(FilterState::new().to_request(1, 50)).unwrap();
        let object = body.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["page"], 1);
        assert_eq!(object["page_size"], 50);
    }

    #[test]
    fn active_dimensions_appear_in_request_body() {
        let mut filter = FilterState::new();
        filter.toggle_topic(7);
        filter.toggle_level(CefrLevel::B1);
        filter.toggle_part_of_speech(PartOfSpeech::Verb);
        filter.has_no_images = true;
        filter.toggle_leitner_bin(2);
        filter.search = "  isla ".to_string();

        let body = serde_json::to_value(filter.to_request(3, 25)).unwrap();
        assert_eq!(body["topic_ids"], serde_json::json!([7]));
        assert_eq!(body["levels"], serde_json::json!(["B1"]));
        assert_eq!(body["parts_of_speech"], serde_json::json!(["verb"]));
        assert_eq!(body["has_image"], serde_json::json!(false));
        assert_eq!(body["leitner_bins"], serde_json::json!([2]));
        assert_eq!(body["search"], serde_json::json!("isla"));
        assert_eq!(body["page"], 3);
        assert!(body.get("has_audio").is_none());
        assert!(body.get("complete").is_none());
    }

    #[test]
    fn toggles_flip_membership() {
        let mut filter = FilterState::new();
        filter.toggle_topic(1);
        assert!(filter.topic_ids.contains(&1));
        filter.toggle_topic(1);
        assert!(filter.topic_ids.is_empty());
    }
}
