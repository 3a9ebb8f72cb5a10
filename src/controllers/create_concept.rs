use crate::{
    api::{
        concepts::{
            ConceptDraft,
            ConceptPreview,
        },
        ApiClient,
    },
    core::{
        CefrLevel,
        Concept,
        PartOfSpeech,
    },
    tasks::{
        TaskManager,
        TaskResult,
    },
};

/// Form state for the create-concept screen: draft -> preview -> confirm.
/// The preview is held (and may be edited by the shell) until the user
/// commits it.
pub struct CreateConceptController {
    pub term: String,
    pub part_of_speech: PartOfSpeech,
    pub level: CefrLevel,
    pub topic_id: Option<i64>,
    pub description: String,
    pub generate_image: bool,
    pub language_codes: Vec<String>,

    pub preview: Option<ConceptPreview>,
    pub saved: Option<Concept>,
    pub busy: bool,
    pub error: Option<String>,
}

impl Default for CreateConceptController {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateConceptController {
    pub fn new() -> Self {
        Self {
            term: String::new(),
            part_of_speech: PartOfSpeech::Noun,
            level: CefrLevel::A1,
            topic_id: None,
            description: String::new(),
            generate_image: true,
            language_codes: Vec::new(),
            preview: None,
            saved: None,
            busy: false,
            error: None,
        }
    }

    pub fn draft(&self) -> Result<ConceptDraft, String> {
        let term = self.term.trim();
        if term.is_empty() {
            return Err("Enter a term first".to_string());
        }
        if self.language_codes.is_empty() {
            return Err("Select at least one language".to_string());
        }

        Ok(ConceptDraft {
            term: term.to_string(),
            part_of_speech: self.part_of_speech,
            level: self.level,
            topic_id: self.topic_id,
            description: if self.description.trim().is_empty() {
                None
            } else {
                Some(self.description.trim().to_string())
            },
            generate_image: self.generate_image,
            language_codes: self.language_codes.clone(),
        })
    }

    pub fn request_preview(&mut self, tasks: &TaskManager, client: &ApiClient) {
        match self.draft() {
            Ok(draft) => {
                self.busy = true;
                self.error = None;
                self.saved = None;
                tasks.preview_concept(client.clone(), draft);
            }
            Err(message) => self.error = Some(message),
        }
    }

    pub fn confirm(&mut self, tasks: &TaskManager, client: &ApiClient) {
        match &self.preview {
            Some(preview) => {
                self.busy = true;
                self.error = None;
                tasks.confirm_concept(client.clone(), preview.clone());
            }
            None => self.error = Some("Nothing to confirm yet".to_string()),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn handle_result(&mut self, result: &TaskResult) {
        match result {
            TaskResult::ConceptPreviewReady(outcome) => {
                self.busy = false;
                match outcome {
                    Ok(preview) => self.preview = Some(preview.clone()),
                    Err(message) => self.error = Some(message.clone()),
                }
            }
            TaskResult::ConceptSaved(outcome) => {
                self.busy = false;
                match outcome {
                    Ok(concept) => {
                        self.saved = Some(concept.clone());
                        self.preview = None;
                    }
                    Err(message) => self.error = Some(message.clone()),
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        Concept,
        Lemma,
    };

    fn preview_fixture() -> ConceptPreview {
        ConceptPreview {
            concept: Concept {
                id: 1,
                term: "island".to_string(),
                description: None,
                part_of_speech: PartOfSpeech::Noun,
                level: CefrLevel::A1,
                topic_id: None,
                image_url: None,
            },
            lemmas: vec![Lemma {
                id: 1,
                concept_id: 1,
                language_code: "es".to_string(),
                translation: "isla".to_string(),
                ipa: None,
                description: None,
                audio_path: None,
                gender: Some("f".to_string()),
                article: Some("la".to_string()),
            }],
            warnings: Vec::new(),
        }
    }

    #[test]
    fn draft_requires_term_and_languages() {
        let mut controller = CreateConceptController::new();
        assert!(controller.draft().is_err());

        controller.term = "  island  ".to_string();
        assert!(controller.draft().is_err());

        controller.language_codes = vec!["es".to_string()];
        let draft = controller.draft().unwrap();
        assert_eq!(draft.term, "island");
        assert!(draft.description.is_none());
    }

    #[test]
    fn preview_then_save_flow() {
        let mut controller = CreateConceptController::new();
        controller.busy = true;

        controller.handle_result(&TaskResult::ConceptPreviewReady(Ok(preview_fixture())));
        assert!(!controller.busy);
        assert!(controller.preview.is_some());

        let concept = preview_fixture().concept;
        controller.handle_result(&TaskResult::ConceptSaved(Ok(concept.clone())));
        assert_eq!(controller.saved, Some(concept));
        assert!(controller.preview.is_none());
    }

    #[test]
    fn errors_surface_without_clearing_form() {
        let mut controller = CreateConceptController::new();
        controller.term = "island".to_string();
        controller.language_codes = vec!["es".to_string()];

        controller.handle_result(&TaskResult::ConceptPreviewReady(Err("boom".to_string())));
        assert_eq!(controller.error.as_deref(), Some("boom"));
        assert_eq!(controller.term, "island");
    }
}
