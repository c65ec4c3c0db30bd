//! Search and filter predicates
//!
//! Both surfaces filter by re-scanning the full collection on every input
//! change. Results keep the collection's order.

use crate::model::ProviderRecord;

/// Directory search/filter inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// Free text matched against name, area, service and description
    pub search_text: String,
    /// Exact area to keep; `None` or empty keeps every area
    pub area: Option<String>,
    /// Keep only verified providers
    pub verified_only: bool,
}

impl FilterSpec {
    /// Filter with only a search term
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search_text: text.into(),
            ..Self::default()
        }
    }

    /// Whether no filter is active
    pub fn is_empty(&self) -> bool {
        self.search_text.trim().is_empty() && self.selected_area().is_none() && !self.verified_only
    }

    /// The selected area, treating an empty selection as none
    pub fn selected_area(&self) -> Option<&str> {
        self.area.as_deref().filter(|area| !area.is_empty())
    }

    /// Whether `record` satisfies all three clauses
    pub fn matches(&self, record: &ProviderRecord) -> bool {
        let needle = self.search_text.trim().to_lowercase();
        self.matches_with_needle(record, &needle)
    }

    fn matches_with_needle(&self, record: &ProviderRecord, needle: &str) -> bool {
        let matches_search = needle.is_empty()
            || [
                &record.name,
                &record.area,
                &record.service,
                &record.description,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(needle));

        let matches_area = self
            .selected_area()
            .is_none_or(|area| record.area == area);

        let matches_verified = !self.verified_only || record.verified;

        matches_search && matches_area && matches_verified
    }
}

/// Directory view: records matching every clause of `spec`, in order
pub fn filter_directory<'a>(
    records: &'a [ProviderRecord],
    spec: &FilterSpec,
) -> Vec<&'a ProviderRecord> {
    let needle = spec.search_text.trim().to_lowercase();
    records
        .iter()
        .filter(|record| spec.matches_with_needle(record, &needle))
        .collect()
}

/// Admin list search over name, area and service
///
/// An empty term keeps everything. The term is used as typed.
pub fn admin_search<'a>(records: &'a [ProviderRecord], term: &str) -> Vec<&'a ProviderRecord> {
    if term.is_empty() {
        return records.iter().collect();
    }

    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| {
            [&record.name, &record.area, &record.service]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, name: &str, area: &str, verified: bool) -> ProviderRecord {
        ProviderRecord {
            id,
            name: name.to_string(),
            service: "Electrical repairs".to_string(),
            city: "Uyo".to_string(),
            area: area.to_string(),
            phone: "0801".to_string(),
            whatsapp: "234801".to_string(),
            experience: 4,
            verified,
            photo: String::new(),
            description: "Solar panel installs".to_string(),
        }
    }

    fn ids(records: &[&ProviderRecord]) -> Vec<i64> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_search_is_case_insensitive_and_trimmed() {
        let records = vec![record(1, "Tom", "Uyo", false), record(2, "Ben", "Itu", false)];

        let spec = FilterSpec::search("  TOM ");
        assert_eq!(ids(&filter_directory(&records, &spec)), vec![1]);
    }

    #[test]
    fn test_search_covers_description() {
        let records = vec![record(1, "Tom", "Uyo", false)];

        assert_eq!(ids(&filter_directory(&records, &FilterSpec::search("solar"))), vec![1]);
        // The admin list does not look at descriptions
        assert!(admin_search(&records, "solar").is_empty());
    }

    #[test]
    fn test_area_is_exact_and_case_sensitive() {
        let records = vec![record(1, "Tom", "Uyo", false), record(2, "Ben", "Itu", false)];

        let spec = FilterSpec {
            area: Some("Itu".to_string()),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&filter_directory(&records, &spec)), vec![2]);

        let spec = FilterSpec {
            area: Some("itu".to_string()),
            ..FilterSpec::default()
        };
        assert!(filter_directory(&records, &spec).is_empty());

        let spec = FilterSpec {
            area: Some(String::new()),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&filter_directory(&records, &spec)), vec![1, 2]);
        assert!(spec.is_empty());
    }

    #[test]
    fn test_verified_only() {
        let records = vec![record(1, "Tom", "Uyo", true), record(2, "Ben", "Itu", false)];

        let spec = FilterSpec {
            verified_only: true,
            ..FilterSpec::default()
        };
        assert_eq!(ids(&filter_directory(&records, &spec)), vec![1]);
        assert!(spec.matches(&records[0]));
        assert!(!spec.matches(&records[1]));
    }

    #[test]
    fn test_admin_search_uses_term_as_typed() {
        let records = vec![record(1, "Tom", "Uyo", false), record(2, "Ben", "Itu", false)];

        assert_eq!(ids(&admin_search(&records, "")), vec![1, 2]);
        assert_eq!(ids(&admin_search(&records, "iTu")), vec![2]);
        assert!(admin_search(&records, " tom").is_empty());
    }
}
