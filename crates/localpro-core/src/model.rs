//! Provider record model
//!
//! [`ProviderRecord`] is the only persisted entity. [`ProviderFields`] is the
//! form payload used to create or replace a record; it carries everything
//! except the id, which the [`RecordStore`](crate::store::RecordStore) mints.

use serde::{Deserialize, Serialize};
use url::Url;
use url::form_urlencoded;

use crate::error::{Error, Result};

/// Placeholder avatar service used when a record has no photo
const AVATAR_ENDPOINT: &str = "https://ui-avatars.com/api/";

/// Host of the placeholder avatar service
const AVATAR_HOST: &str = "ui-avatars.com";

/// WhatsApp click-to-chat endpoint
const WHATSAPP_ENDPOINT: &str = "https://wa.me/";

/// A service provider listed in the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRecord {
    /// Unique id, minted from the creation timestamp
    pub id: i64,
    pub name: String,
    pub service: String,
    pub city: String,
    /// Neighborhood, one of the configured areas
    pub area: String,
    /// Phone number exactly as entered
    pub phone: String,
    pub whatsapp: String,
    /// Years of experience
    pub experience: u32,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub description: String,
}

impl ProviderRecord {
    /// Build a record from validated form fields
    ///
    /// An empty photo falls back to the generated avatar for the saved name.
    pub(crate) fn from_fields(id: i64, fields: ProviderFields) -> Self {
        let photo = if fields.photo.is_empty() {
            default_avatar_url(&fields.name)
        } else {
            fields.photo
        };

        Self {
            id,
            name: fields.name,
            service: fields.service,
            city: fields.city,
            area: fields.area,
            phone: fields.phone,
            whatsapp: fields.whatsapp,
            experience: fields.experience,
            verified: fields.verified,
            photo,
            description: fields.description,
        }
    }

    /// `tel:` link built from the raw phone field
    pub fn call_link(&self) -> String {
        format!("tel:{}", self.phone)
    }

    /// WhatsApp chat link with a greeting that names the provider
    pub fn whatsapp_link(&self) -> String {
        let digits: String = self.whatsapp.chars().filter(char::is_ascii_digit).collect();
        let greeting = format!(
            "Hi {}, I found you on LocalPro and need electrical services.",
            self.name
        );
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("text", &greeting)
            .finish();

        format!("{WHATSAPP_ENDPOINT}{digits}?{query}")
    }
}

/// Editable fields of a provider record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderFields {
    pub name: String,
    pub service: String,
    pub city: String,
    pub area: String,
    pub phone: String,
    pub whatsapp: String,
    pub experience: u32,
    pub verified: bool,
    /// Photo URL; empty means "use the generated avatar"
    pub photo: String,
    pub description: String,
}

impl ProviderFields {
    /// Empty fields with the given default city
    pub fn with_city(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            ..Self::default()
        }
    }

    /// Trim every string field and validate the required ones
    ///
    /// When `areas` is non-empty the area must be one of its entries.
    pub fn normalized(mut self, areas: &[String]) -> Result<Self> {
        for value in [
            &mut self.name,
            &mut self.service,
            &mut self.city,
            &mut self.area,
            &mut self.phone,
            &mut self.whatsapp,
            &mut self.photo,
            &mut self.description,
        ] {
            *value = value.trim().to_string();
        }

        let required = [
            ("name", &self.name),
            ("service", &self.service),
            ("city", &self.city),
            ("area", &self.area),
            ("phone", &self.phone),
            ("whatsapp", &self.whatsapp),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.is_empty()) {
            return Err(Error::MissingField(*field));
        }

        if !areas.is_empty() && !areas.iter().any(|a| a == &self.area) {
            return Err(Error::invalid_input(format!(
                "Unknown area '{}'. Known areas: {}",
                self.area,
                areas.join(", ")
            )));
        }

        Ok(self)
    }
}

impl From<&ProviderRecord> for ProviderFields {
    fn from(record: &ProviderRecord) -> Self {
        Self {
            name: record.name.clone(),
            service: record.service.clone(),
            city: record.city.clone(),
            area: record.area.clone(),
            phone: record.phone.clone(),
            whatsapp: record.whatsapp.clone(),
            experience: record.experience,
            verified: record.verified,
            photo: record.photo.clone(),
            description: record.description.clone(),
        }
    }
}

/// Deterministic placeholder avatar URL for a provider name
pub fn default_avatar_url(name: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("name", name.trim())
        .append_pair("background", "0D3B66")
        .append_pair("color", "F4D35E")
        .append_pair("size", "200")
        .append_pair("bold", "true")
        .finish();

    format!("{AVATAR_ENDPOINT}?{query}")
}

/// Whether a photo URL points at the generated placeholder avatar
pub fn is_default_avatar(photo: &str) -> bool {
    Url::parse(photo)
        .ok()
        .is_some_and(|url| url.host_str() == Some(AVATAR_HOST))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> ProviderFields {
        ProviderFields {
            name: "  Tom Obi ".to_string(),
            service: "Wiring".to_string(),
            city: "Uyo".to_string(),
            area: "Ewet Housing".to_string(),
            phone: "+234 801 234 5678".to_string(),
            whatsapp: "+234 (801) 234-5678".to_string(),
            experience: 7,
            verified: true,
            photo: String::new(),
            description: "Residential wiring".to_string(),
        }
    }

    #[test]
    fn test_avatar_is_deterministic() {
        let a = default_avatar_url("Tom Obi");
        let b = default_avatar_url("Tom Obi");
        assert_eq!(a, b);
        assert!(a.starts_with("https://ui-avatars.com/api/?name=Tom+Obi&"));
        assert!(a.ends_with("background=0D3B66&color=F4D35E&size=200&bold=true"));
        assert!(is_default_avatar(&a));
        assert!(!is_default_avatar("https://example.com/tom.jpg"));
        assert!(!is_default_avatar(""));
    }

    #[test]
    fn test_normalized_trims_and_validates() {
        let fields = fields().normalized(&[]).unwrap();
        assert_eq!(fields.name, "Tom Obi");

        let mut missing = self::fields();
        missing.service = "   ".to_string();
        let err = missing.normalized(&[]).unwrap_err();
        assert!(matches!(err, Error::MissingField("service")));
    }

    #[test]
    fn test_normalized_rejects_unknown_area() {
        let areas = vec!["Osongama".to_string()];
        let err = fields().normalized(&areas).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_photo_fallback_uses_saved_name() {
        let fields = fields().normalized(&[]).unwrap();
        let record = ProviderRecord::from_fields(1, fields);
        assert_eq!(record.photo, default_avatar_url("Tom Obi"));

        let mut custom = self::fields();
        custom.photo = "https://example.com/tom.jpg".to_string();
        let record = ProviderRecord::from_fields(2, custom.normalized(&[]).unwrap());
        assert_eq!(record.photo, "https://example.com/tom.jpg");
    }

    #[test]
    fn test_contact_links() {
        let record = ProviderRecord::from_fields(1, fields().normalized(&[]).unwrap());
        assert_eq!(record.call_link(), "tel:+234 801 234 5678");

        let link = record.whatsapp_link();
        assert!(link.starts_with("https://wa.me/2348012345678?text=Hi+Tom+Obi%2C+I+found+you"));
    }

    #[test]
    fn test_record_json_field_names() {
        let record = ProviderRecord::from_fields(42, fields().normalized(&[]).unwrap());
        let json = serde_json::to_value(&record).unwrap();
        for key in [
            "id",
            "name",
            "service",
            "city",
            "area",
            "phone",
            "whatsapp",
            "experience",
            "verified",
            "photo",
            "description",
        ] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
        let back: ProviderRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
