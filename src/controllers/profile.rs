use crate::{
    api::{
        stats::StatsBundle,
        ApiClient,
    },
    core::{
        FilterState,
        LeitnerConfig,
        User,
    },
    session,
    tasks::{
        TaskManager,
        TaskResult,
    },
};

/// Profile/statistics screen state: the signed-in user, their statistics
/// bundle, and the settings update flows.
pub struct ProfileController {
    pub user: Option<User>,
    filter: FilterState,
    pub stats: Option<StatsBundle>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for ProfileController {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileController {
    pub fn new() -> Self {
        Self { user: None, filter: FilterState::new(), stats: None, loading: false, error: None }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn load_statistics(&mut self, tasks: &TaskManager, client: &ApiClient) {
        self.loading = true;
        self.error = None;
        tasks.load_statistics(client.clone(), self.filter.query());
    }

    /// Statistics follow the filter, so a change refetches the bundle.
    pub fn set_filter(&mut self, filter: FilterState, tasks: &TaskManager, client: &ApiClient) {
        if self.filter != filter {
            self.filter = filter;
            self.load_statistics(tasks, client);
        }
    }

    pub fn submit_languages(
        &mut self,
        native_language: String,
        learning_languages: Vec<String>,
        tasks: &TaskManager,
        client: &ApiClient,
    ) {
        self.error = None;
        tasks.update_languages(client.clone(), native_language, learning_languages);
    }

    pub fn submit_leitner_config(
        &mut self,
        config: LeitnerConfig,
        tasks: &TaskManager,
        client: &ApiClient,
    ) {
        self.error = None;
        tasks.update_leitner_config(client.clone(), config);
    }

    pub fn delete_account(&mut self, tasks: &TaskManager, client: &ApiClient) {
        self.error = None;
        tasks.delete_account(client.clone());
    }

    /// Local-only: drops the session blob and the in-memory user.
    pub fn log_out(&mut self) {
        if let Err(err) = session::clear() {
            eprintln!("Failed to clear session: {}", err);
        }
        self.user = None;
        self.stats = None;
    }

    pub fn handle_result(&mut self, result: &TaskResult) {
        match result {
            TaskResult::SessionRestored(user) => {
                self.user = user.clone();
            }
            TaskResult::LoggedIn(outcome) | TaskResult::Registered(outcome) => match outcome {
                Ok(user) => self.user = Some(user.clone()),
                Err(message) => self.error = Some(message.clone()),
            },
            TaskResult::UserUpdated(outcome) => match outcome {
                Ok(user) => {
                    self.user = Some(user.clone());
                    // Keep the restored-session blob in sync with the server.
                    if let Err(err) = session::save(user) {
                        eprintln!("Failed to persist session: {}", err);
                    }
                }
                Err(message) => self.error = Some(message.clone()),
            },
            TaskResult::AccountDeleted(outcome) => match outcome {
                Ok(()) => {
                    self.user = None;
                    self.stats = None;
                }
                Err(message) => self.error = Some(message.clone()),
            },
            TaskResult::StatsLoaded(outcome) => {
                self.loading = false;
                match outcome {
                    Ok(bundle) => self.stats = Some(bundle.clone()),
                    Err(message) => self.error = Some(message.clone()),
                }
            }
            _ => {}
        }
    }
}
