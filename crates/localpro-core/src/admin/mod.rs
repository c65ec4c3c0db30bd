//! Admin console
//!
//! The [`AdminConsole`] wires the record store to the provider form, the
//! two-step delete flow and the admin list search, and reports successful
//! mutations through a [`Notifier`].
//!
//! ## Event Flow
//!
//! 1. `load()` hydrates the store (snapshot first, bootstrap otherwise)
//! 2. User input mutates the form, search term or delete selection
//! 3. `submit()` / `confirm_delete()` mutate the store, which persists
//! 4. `view()` recomputes the list from the full collection

pub mod delete_flow;
pub mod form;

pub use delete_flow::DeleteFlow;
pub use form::{FormOutcome, ProviderForm};

use tokio::sync::mpsc;
use tracing::{error, warn};

use crate::config::LocalProConfig;
use crate::error::{Error, Result};
use crate::filter::admin_search;
use crate::model::{ProviderFields, ProviderRecord};
use crate::notify::{Notification, Notifier};
use crate::store::{HydrateSource, RecordStore};

/// Message shown in place of the list when loading failed
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load electricians data";

/// What the admin list should display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminView<'a> {
    /// Records matching the admin search, most recent first
    pub records: Vec<&'a ProviderRecord>,
    /// Count shown next to the list heading
    pub total: usize,
    /// Placeholder when `records` is empty
    pub empty_message: Option<&'static str>,
    /// Set when loading failed; the view offers a retry instead of a list
    pub load_error: Option<&'a str>,
}

/// Admin surface over a [`RecordStore`]
pub struct AdminConsole {
    store: RecordStore,
    form: ProviderForm,
    deletion: DeleteFlow,
    search: String,
    load_error: Option<String>,
    notifier: Notifier,
}

impl AdminConsole {
    /// Create a console and the receiver for its notifications
    pub fn new(
        store: RecordStore,
        config: &LocalProConfig,
    ) -> (Self, mpsc::Receiver<Notification>) {
        let (notifier, rx) = Notifier::channel(
            config.admin.notification_channel_capacity,
            config.admin.notification_display(),
        );

        let console = Self {
            store,
            form: ProviderForm::new(config.store.default_city.clone()),
            deletion: DeleteFlow::Idle,
            search: String::new(),
            load_error: None,
            notifier,
        };

        (console, rx)
    }

    /// Hydrate the store
    ///
    /// On failure the console keeps an empty list and shows the load error
    /// until the next successful `load()`.
    pub async fn load(&mut self) -> Result<HydrateSource> {
        match self.store.hydrate().await {
            Ok(source) => {
                self.load_error = None;
                Ok(source)
            }
            Err(e) => {
                error!("Error loading electricians: {}", e);
                self.load_error = Some(LOAD_ERROR_MESSAGE.to_string());
                Err(e)
            }
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn form(&self) -> &ProviderForm {
        &self.form
    }

    /// Form fields as the user edits them
    pub fn form_mut(&mut self) -> &mut ProviderFields {
        self.form.fields_mut()
    }

    pub fn deletion(&self) -> &DeleteFlow {
        &self.deletion
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Update the admin list search term
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Recompute the admin list
    pub fn view(&self) -> AdminView<'_> {
        if let Some(message) = self.load_error.as_deref() {
            return AdminView {
                records: Vec::new(),
                total: 0,
                empty_message: None,
                load_error: Some(message),
            };
        }

        let records = admin_search(self.store.records(), &self.search);
        let empty_message = records.is_empty().then(|| {
            if self.search.is_empty() {
                "No electricians added yet"
            } else {
                "No electricians match your search"
            }
        });

        AdminView {
            total: records.len(),
            records,
            empty_message,
            load_error: None,
        }
    }

    /// Put the form in edit mode for `id`
    ///
    /// Returns `false`, leaving the form untouched, if the id is unknown.
    pub fn begin_edit(&mut self, id: i64) -> bool {
        match self.store.find(id) {
            Some(record) => {
                self.form.begin_edit(record);
                true
            }
            None => false,
        }
    }

    /// Leave edit mode and clear the form
    pub fn cancel_edit(&mut self) {
        self.form.reset();
    }

    /// Submit the form
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))`: Record created or updated
    /// - `Ok(None)`: The edited record no longer exists; nothing changed
    /// - `Err(Error)`: Validation or storage failure; the form keeps its input
    pub async fn submit(&mut self) -> Result<Option<ProviderRecord>> {
        let outcome = match self.form.submit(&mut self.store).await {
            Ok(outcome) => outcome,
            Err(e) => {
                if !is_validation_error(&e) {
                    error!("Error saving electrician: {}", e);
                    self.notifier.error("Failed to save electrician");
                }
                return Err(e);
            }
        };

        match outcome {
            FormOutcome::Created(record) => {
                self.notifier.success("Electrician added successfully");
                Ok(Some(record))
            }
            FormOutcome::Updated(record) => {
                self.notifier.success("Electrician updated successfully");
                Ok(Some(record))
            }
            FormOutcome::TargetMissing(id) => {
                warn!("Ignored submit for missing provider {}", id);
                Ok(None)
            }
        }
    }

    /// Select a record for deletion, returning the name to confirm
    pub fn select_delete(&mut self, id: i64) -> Option<&str> {
        self.deletion.select(id, &self.store)
    }

    /// Dismiss the delete confirmation
    pub fn cancel_delete(&mut self) {
        self.deletion.cancel();
    }

    /// Delete the selected record
    pub async fn confirm_delete(&mut self) -> Result<Option<ProviderRecord>> {
        let removed = match self.deletion.confirm(&mut self.store).await {
            Ok(removed) => removed,
            Err(e) => {
                error!("Error deleting electrician: {}", e);
                self.notifier.error("Failed to delete electrician");
                return Err(e);
            }
        };
        if removed.is_some() {
            self.notifier.success("Electrician deleted successfully");
        }
        Ok(removed)
    }
}

/// Form input problems the user fixes in place
fn is_validation_error(e: &Error) -> bool {
    matches!(e, Error::MissingField(_) | Error::InvalidInput(_))
}
