//! Public directory
//!
//! A read-only copy of the provider collection with the combined
//! search/area/verified filter. The directory loads through the same
//! [`RecordStore::hydrate`] as the admin console, so the snapshot store is the
//! single source of truth for both surfaces.

use tracing::{debug, error};

use crate::error::Result;
use crate::filter::{FilterSpec, filter_directory};
use crate::model::ProviderRecord;
use crate::session::SearchHandoff;
use crate::store::RecordStore;

/// Summary line shown when loading failed
pub const LOAD_ERROR_SUMMARY: &str = "Error loading electricians. Please refresh the page.";

/// Load state of the directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Ready,
    Failed(String),
}

/// A provider as shown on a directory card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderCard {
    pub id: i64,
    pub name: String,
    pub service: String,
    /// `"<area>, <city>"`
    pub location: String,
    /// `"<n> years experience"`
    pub experience: String,
    pub verified: bool,
    pub photo: String,
    pub description: String,
    /// `tel:` link
    pub call_link: String,
    /// WhatsApp click-to-chat link
    pub whatsapp_link: String,
}

impl From<&ProviderRecord> for ProviderCard {
    fn from(record: &ProviderRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            service: record.service.clone(),
            location: format!("{}, {}", record.area, record.city),
            experience: format!("{} years experience", record.experience),
            verified: record.verified,
            photo: record.photo.clone(),
            description: record.description.clone(),
            call_link: record.call_link(),
            whatsapp_link: record.whatsapp_link(),
        }
    }
}

/// Body of the directory page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryBody {
    Results(Vec<ProviderCard>),
    NoResults,
    LoadFailed(String),
}

/// Rendered directory state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryView {
    /// Results count line
    pub summary: String,
    pub body: DirectoryBody,
}

impl DirectoryView {
    /// Whether the "no results" state is shown
    pub fn is_no_results(&self) -> bool {
        matches!(self.body, DirectoryBody::NoResults)
    }
}

/// Directory surface
#[derive(Debug, Clone)]
pub struct Directory {
    records: Vec<ProviderRecord>,
    load: LoadState,
    filter: FilterSpec,
}

impl Directory {
    /// Hydrate `store` and take a read-only copy of its records
    ///
    /// A load failure yields a directory in the failed state rather than an
    /// error, matching what the page shows.
    pub async fn load(store: &mut RecordStore) -> Self {
        match store.hydrate().await {
            Ok(source) => {
                debug!("Directory loaded {} records ({:?})", store.len(), source);
                Self::from_records(store.records().to_vec())
            }
            Err(e) => {
                error!("Error loading electricians: {}", e);
                Self {
                    records: Vec::new(),
                    load: LoadState::Failed(e.to_string()),
                    filter: FilterSpec::default(),
                }
            }
        }
    }

    /// Directory over an already-loaded collection
    pub fn from_records(records: Vec<ProviderRecord>) -> Self {
        Self {
            records,
            load: LoadState::Ready,
            filter: FilterSpec::default(),
        }
    }

    /// Pre-fill the search box from the home page handoff
    ///
    /// Returns the consumed term, if there was one.
    pub async fn apply_handoff(&mut self, handoff: &SearchHandoff) -> Result<Option<String>> {
        let term = handoff.take().await?;
        if let Some(term) = &term {
            debug!("Applying search handoff: {}", term);
            self.filter.search_text = term.clone();
        }
        Ok(term)
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.filter.search_text = text.into();
    }

    /// Select an area; `None` or an empty string shows every area
    pub fn set_area(&mut self, area: Option<String>) {
        self.filter.area = area;
    }

    pub fn set_verified_only(&mut self, verified_only: bool) {
        self.filter.verified_only = verified_only;
    }

    /// Reset search, area and verified filters
    pub fn clear_filters(&mut self) {
        self.filter = FilterSpec::default();
    }

    /// Records matching the current filter, in collection order
    pub fn matches(&self) -> Vec<&ProviderRecord> {
        filter_directory(&self.records, &self.filter)
    }

    /// Recompute the page from the full collection
    pub fn view(&self) -> DirectoryView {
        if let LoadState::Failed(message) = &self.load {
            return DirectoryView {
                summary: LOAD_ERROR_SUMMARY.to_string(),
                body: DirectoryBody::LoadFailed(message.clone()),
            };
        }

        let matches = self.matches();
        match matches.len() {
            0 => DirectoryView {
                summary: "No electricians found".to_string(),
                body: DirectoryBody::NoResults,
            },
            count => DirectoryView {
                summary: format!(
                    "Showing {} electrician{}",
                    count,
                    if count == 1 { "" } else { "s" }
                ),
                body: DirectoryBody::Results(
                    matches.into_iter().map(ProviderCard::from).collect(),
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, name: &str, verified: bool) -> ProviderRecord {
        ProviderRecord {
            id,
            name: name.to_string(),
            service: "Wiring".to_string(),
            city: "Uyo".to_string(),
            area: "Osongama".to_string(),
            phone: "0801 234".to_string(),
            whatsapp: "+234-801".to_string(),
            experience: 6,
            verified,
            photo: String::new(),
            description: String::new(),
        }
    }

    #[test]
    fn test_summary_pluralization() {
        let mut directory = Directory::from_records(vec![record(1, "Tom", true), record(2, "Ben", false)]);
        assert_eq!(directory.view().summary, "Showing 2 electricians");

        directory.set_verified_only(true);
        assert_eq!(directory.view().summary, "Showing 1 electrician");

        directory.set_search("nobody");
        let view = directory.view();
        assert_eq!(view.summary, "No electricians found");
        assert!(view.is_no_results());

        directory.clear_filters();
        assert_eq!(directory.filter(), &FilterSpec::default());
    }

    #[test]
    fn test_card_fields() {
        let card = ProviderCard::from(&record(1, "Tom", true));
        assert_eq!(card.location, "Osongama, Uyo");
        assert_eq!(card.experience, "6 years experience");
        assert_eq!(card.call_link, "tel:0801 234");
        assert!(card.whatsapp_link.starts_with("https://wa.me/234801?text=Hi+Tom%2C"));
    }
}
