use crate::{
    api::{
        dictionary::DictionaryEntry,
        ApiClient,
    },
    core::FilterState,
    tasks::{
        TaskManager,
        TaskResult,
    },
};

pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Paged, filterable dictionary view. Any filter change resets to the
/// first page and refetches; page moves are bounded by the server-reported
/// total.
pub struct DictionaryController {
    filter: FilterState,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub entries: Vec<DictionaryEntry>,
    pub last_export: Option<Vec<DictionaryEntry>>,
    pub loading: bool,
    pub exporting: bool,
    pub error: Option<String>,
}

impl Default for DictionaryController {
    fn default() -> Self {
        Self::new()
    }
}

impl DictionaryController {
    pub fn new() -> Self {
        Self {
            filter: FilterState::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total: 0,
            entries: Vec::new(),
            last_export: None,
            loading: false,
            exporting: false,
            error: None,
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn total_pages(&self) -> u32 {
        if self.total == 0 {
            return 1;
        }
        self.total.div_ceil(self.page_size as u64) as u32
    }

    pub fn refresh(&mut self, tasks: &TaskManager, client: &ApiClient) {
        self.loading = true;
        self.error = None;
        tasks.load_dictionary_page(client.clone(), self.filter.clone(), self.page, self.page_size);
    }

    pub fn set_filter(&mut self, filter: FilterState, tasks: &TaskManager, client: &ApiClient) {
        if self.filter != filter {
            self.filter = filter;
            self.page = 1;
            self.refresh(tasks, client);
        }
    }

    pub fn next_page(&mut self, tasks: &TaskManager, client: &ApiClient) {
        if self.page < self.total_pages() {
            self.page += 1;
            self.refresh(tasks, client);
        }
    }

    pub fn previous_page(&mut self, tasks: &TaskManager, client: &ApiClient) {
        if self.page > 1 {
            self.page -= 1;
            self.refresh(tasks, client);
        }
    }

    /// Full filtered export; the fetch itself pages sequentially in the
    /// background task.
    pub fn export(&mut self, tasks: &TaskManager, client: &ApiClient) {
        self.exporting = true;
        self.error = None;
        tasks.export_dictionary(client.clone(), self.filter.clone());
    }

    pub fn handle_result(&mut self, result: &TaskResult) {
        match result {
            TaskResult::DictionaryPageLoaded(outcome) => {
                self.loading = false;
                match outcome {
                    Ok(page) => {
                        self.entries = page.entries.clone();
                        self.total = page.total;
                        self.page = page.page;
                    }
                    Err(message) => self.error = Some(message.clone()),
                }
            }
            TaskResult::DictionaryExportReady(outcome) => {
                self.exporting = false;
                match outcome {
                    Ok(entries) => self.last_export = Some(entries.clone()),
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
    use crate::api::dictionary::DictionaryPage;

    #[test]
    fn total_pages_rounds_up() {
        let mut controller = DictionaryController::new();
        assert_eq!(controller.total_pages(), 1);

        controller.total = 101;
        controller.page_size = 50;
        assert_eq!(controller.total_pages(), 3);
    }

    #[test]
    fn page_load_updates_view_state() {
        let mut controller = DictionaryController::new();
        controller.loading = true;

        controller.handle_result(&TaskResult::DictionaryPageLoaded(Ok(DictionaryPage {
            entries: Vec::new(),
            page: 2,
            page_size: 50,
            total: 120,
        })));

        assert!(!controller.loading);
        assert_eq!(controller.page, 2);
        assert_eq!(controller.total, 120);
        assert_eq!(controller.total_pages(), 3);
    }

    #[test]
    fn failed_load_keeps_previous_entries() {
        let mut controller = DictionaryController::new();
        controller.total = 10;

        controller.handle_result(&TaskResult::DictionaryPageLoaded(Err("offline".to_string())));
        assert_eq!(controller.error.as_deref(), Some("offline"));
        assert_eq!(controller.total, 10);
    }
}
