use std::{
    sync::{
        mpsc,
        Arc,
    },
    thread,
};

use tokio::runtime::Runtime;

use super::TaskResult;
use crate::{
    api::{
        self,
        auth::RegisterRequest,
        concepts::{
            ConceptDraft,
            ConceptPreview,
        },
        lemmas::LemmaUpdate,
        ApiClient,
    },
    core::{
        FilterQuery,
        FilterState,
        LeitnerConfig,
    },
    session,
};

/// Bridges the synchronous shell and the async API: each operation runs on
/// its own thread against a shared runtime and reports back over a channel
/// the shell polls once per frame.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
}

impl Default for TaskManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskManager {
    pub fn new() -> Self {
        let runtime = Arc::new(Runtime::new().expect("Failed to create TaskManager runtime"));
        let (sender, receiver) = mpsc::channel();

        Self { runtime, receiver, sender }
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>) {
        (self.sender.clone(), self.runtime.clone())
    }

    pub fn check_server_connection(&self, client: ApiClient) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let connected =
                runtime.block_on(async { api::languages::list(&client).await.is_ok() });
            let _ = sender.send(TaskResult::ServerConnection(connected));
        });
    }

    /// Reads the current_user blob off the UI thread.
    pub fn restore_session(&self) {
        let (sender, _) = self.task_context();

        thread::spawn(move || {
            let _ = sender.send(TaskResult::SessionRestored(session::load()));
        });
    }

    pub fn login(&self, client: ApiClient, email: String, password: String) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                let user = api::auth::login(&client, &email, &password)
                    .await
                    .map_err(|e| e.user_message())?;

                if let Err(err) = session::save(&user) {
                    eprintln!("Failed to persist session: {}", err);
                }
                Ok(user)
            });

            let _ = sender.send(TaskResult::LoggedIn(result));
        });
    }

    pub fn register(&self, client: ApiClient, request: RegisterRequest) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                let user =
                    api::auth::register(&client, &request).await.map_err(|e| e.user_message())?;

                if let Err(err) = session::save(&user) {
                    eprintln!("Failed to persist session: {}", err);
                }
                Ok(user)
            });

            let _ = sender.send(TaskResult::Registered(result));
        });
    }

    pub fn update_languages(
        &self,
        client: ApiClient,
        native_language: String,
        learning_languages: Vec<String>,
    ) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                api::auth::update_languages(&client, &native_language, &learning_languages)
                    .await
                    .map_err(|e| e.user_message())
            });

            let _ = sender.send(TaskResult::UserUpdated(result));
        });
    }

    pub fn update_leitner_config(&self, client: ApiClient, config: LeitnerConfig) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                api::auth::update_leitner_config(&client, &config)
                    .await
                    .map_err(|e| e.user_message())
            });

            let _ = sender.send(TaskResult::UserUpdated(result));
        });
    }

    /// Wipes the account server-side, then drops the local session blob.
    pub fn delete_account(&self, client: ApiClient) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                api::auth::delete_user_data(&client).await.map_err(|e| e.user_message())?;

                if let Err(err) = session::clear() {
                    eprintln!("Failed to clear session: {}", err);
                }
                Ok(())
            });

            let _ = sender.send(TaskResult::AccountDeleted(result));
        });
    }

    /// Languages and topics feed the filter dropdowns; both are fetched
    /// concurrently at startup and reported separately.
    pub fn load_reference_data(&self, client: ApiClient) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let (languages, topics) = runtime.block_on(async {
                futures::future::join(
                    api::languages::list(&client),
                    api::concepts::topics(&client),
                )
                .await
            });

            let _ = sender
                .send(TaskResult::LanguagesLoaded(languages.map_err(|e| e.user_message())));
            let _ = sender.send(TaskResult::TopicsLoaded(topics.map_err(|e| e.user_message())));
        });
    }

    pub fn load_languages(&self, client: ApiClient) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                api::languages::list(&client).await.map_err(|e| e.user_message())
            });

            let _ = sender.send(TaskResult::LanguagesLoaded(result));
        });
    }

    pub fn load_topics(&self, client: ApiClient) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                api::concepts::topics(&client).await.map_err(|e| e.user_message())
            });

            let _ = sender.send(TaskResult::TopicsLoaded(result));
        });
    }

    pub fn load_lesson_cards(&self, client: ApiClient, filter: FilterState, limit: u32) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                api::dictionary::lesson_cards(&client, &filter, limit)
                    .await
                    .map_err(|e| e.user_message())
            });

            let _ = sender.send(TaskResult::LessonCardsLoaded(result));
        });
    }

    pub fn load_dictionary_page(
        &self,
        client: ApiClient,
        filter: FilterState,
        page: u32,
        page_size: u32,
    ) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                api::dictionary::search(&client, &filter, page, page_size)
                    .await
                    .map_err(|e| e.user_message())
            });

            let _ = sender.send(TaskResult::DictionaryPageLoaded(result));
        });
    }

    pub fn export_dictionary(&self, client: ApiClient, filter: FilterState) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let _ = sender.send(TaskResult::LoadingMessage("Exporting dictionary...".to_string()));

            let result = runtime.block_on(async {
                api::dictionary::export_entries(&client, &filter)
                    .await
                    .map_err(|e| e.user_message())
            });

            let _ = sender.send(TaskResult::DictionaryExportReady(result));
        });
    }

    pub fn export_pdf(&self, client: ApiClient, filter: FilterState) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let _ = sender.send(TaskResult::LoadingMessage("Rendering PDF...".to_string()));

            let result = runtime.block_on(async {
                api::flashcards::export_pdf(&client, &filter).await.map_err(|e| e.user_message())
            });

            let _ = sender.send(TaskResult::PdfExported(result));
        });
    }

    pub fn preview_concept(&self, client: ApiClient, draft: ConceptDraft) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                api::concepts::preview(&client, &draft).await.map_err(|e| e.user_message())
            });

            let _ = sender.send(TaskResult::ConceptPreviewReady(result));
        });
    }

    pub fn confirm_concept(&self, client: ApiClient, preview: ConceptPreview) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                api::concepts::confirm(&client, &preview).await.map_err(|e| e.user_message())
            });

            let _ = sender.send(TaskResult::ConceptSaved(result));
        });
    }

    pub fn delete_concept(&self, client: ApiClient, concept_id: i64) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                api::concepts::delete(&client, concept_id)
                    .await
                    .map(|_| concept_id)
                    .map_err(|e| e.user_message())
            });

            let _ = sender.send(TaskResult::ConceptDeleted(result));
        });
    }

    pub fn load_concept_detail(&self, client: ApiClient, concept_id: i64) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                api::concepts::load_detail(&client, concept_id)
                    .await
                    .map_err(|e| e.user_message())
            });

            let _ = sender.send(TaskResult::ConceptDetailLoaded(result));
        });
    }

    pub fn load_missing_languages(&self, client: ApiClient, concept_id: i64) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                api::concepts::missing_languages(&client, concept_id)
                    .await
                    .map_err(|e| e.user_message())
            });

            let _ = sender.send(TaskResult::MissingLanguagesLoaded { concept_id, result });
        });
    }

    pub fn generate_lemmas(&self, client: ApiClient, concept_ids: Vec<i64>) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                api::lemmas::generate_for_concepts(&client, &concept_ids)
                    .await
                    .map_err(|e| e.user_message())
            });

            let _ = sender.send(TaskResult::LemmasGenerated(result));
        });
    }

    pub fn save_lemma(&self, client: ApiClient, lemma_id: i64, update: LemmaUpdate) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                api::lemmas::update(&client, lemma_id, &update).await.map_err(|e| e.user_message())
            });

            let _ = sender.send(TaskResult::LemmaSaved(result));
        });
    }

    /// Sequential bulk audio run; per-lemma progress surfaces as loading
    /// messages while the run is in flight.
    pub fn generate_audio_bulk(&self, client: ApiClient, lemma_ids: Vec<i64>) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let progress_sender = sender.clone();
            let progress_callback = Box::new(move |message: String| {
                let _ = progress_sender.send(TaskResult::LoadingMessage(message));
            });

            let report = runtime.block_on(async {
                api::flashcards::generate_audio_bulk(&client, &lemma_ids, Some(progress_callback))
                    .await
            });

            let _ = sender.send(TaskResult::AudioBulkFinished(report));
        });
    }

    pub fn start_description_job(&self, client: ApiClient, concept_ids: Vec<i64>) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                api::flashcards::generate_descriptions(&client, &concept_ids)
                    .await
                    .map_err(|e| e.user_message())
            });

            let _ = sender.send(TaskResult::DescriptionJobStarted(result));
        });
    }

    pub fn poll_description_job(&self, client: ApiClient, job_id: String) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                api::flashcards::description_status(&client, &job_id)
                    .await
                    .map_err(|e| e.user_message())
            });

            let _ = sender.send(TaskResult::DescriptionJobStatus(result));
        });
    }

    pub fn load_statistics(&self, client: ApiClient, filter: FilterQuery) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                api::stats::load_bundle(&client, &filter).await.map_err(|e| e.user_message())
            });

            let _ = sender.send(TaskResult::StatsLoaded(result));
        });
    }
}
