//! Create/edit form state
//!
//! One form serves both modes. `editing_id == None` means a submit creates a
//! record; `Some(id)` means it replaces record `id`.

use tracing::warn;

use crate::error::{Error, Result};
use crate::model::{ProviderFields, ProviderRecord, is_default_avatar};
use crate::store::RecordStore;

/// Outcome of a successful form submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Created(ProviderRecord),
    Updated(ProviderRecord),
    /// The record being edited no longer exists; nothing was written
    TargetMissing(i64),
}

/// Provider form in create or edit mode
#[derive(Debug, Clone)]
pub struct ProviderForm {
    editing_id: Option<i64>,
    fields: ProviderFields,
    default_city: String,
}

impl ProviderForm {
    /// Empty form in create mode
    pub fn new(default_city: impl Into<String>) -> Self {
        let default_city = default_city.into();
        Self {
            editing_id: None,
            fields: ProviderFields::with_city(default_city.clone()),
            default_city,
        }
    }

    /// Id of the record being edited, `None` in create mode
    pub fn editing_id(&self) -> Option<i64> {
        self.editing_id
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn fields(&self) -> &ProviderFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut ProviderFields {
        &mut self.fields
    }

    /// Form heading
    pub fn title(&self) -> &'static str {
        if self.is_editing() {
            "Edit Electrician"
        } else {
            "Add New Electrician"
        }
    }

    /// Submit button label
    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Update Electrician"
        } else {
            "Add Electrician"
        }
    }

    /// Whether the cancel button is shown
    pub fn shows_cancel(&self) -> bool {
        self.is_editing()
    }

    /// Switch to edit mode and populate every field from `record`
    ///
    /// A generated avatar shows as an empty photo field, so saving without
    /// touching it regenerates the avatar from the (possibly new) name.
    pub fn begin_edit(&mut self, record: &ProviderRecord) {
        let mut fields = ProviderFields::from(record);
        if is_default_avatar(&fields.photo) {
            fields.photo.clear();
        }

        self.editing_id = Some(record.id);
        self.fields = fields;
    }

    /// Back to create mode with default fields
    pub fn reset(&mut self) {
        self.editing_id = None;
        self.fields = ProviderFields::with_city(self.default_city.clone());
    }

    /// Create or update depending on the mode
    ///
    /// Errors leave the form as it is. Any other outcome resets the form to
    /// create mode.
    pub async fn submit(&mut self, store: &mut RecordStore) -> Result<FormOutcome> {
        let fields = self.fields.clone();

        let outcome = match self.editing_id {
            None => FormOutcome::Created(store.create(fields).await?),
            Some(id) => match store.update(id, fields).await {
                Ok(record) => FormOutcome::Updated(record),
                Err(Error::NotFound(id)) => {
                    warn!("Provider {} disappeared while being edited", id);
                    FormOutcome::TargetMissing(id)
                }
                Err(e) => return Err(e),
            },
        };

        self.reset();
        Ok(outcome)
    }
}
