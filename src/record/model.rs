//! Data models for extracted and combined business records.

use serde::{Deserialize, Deserializer, Serialize};

/// Entity name used when an extraction carries no business name.
pub const UNKNOWN_BUSINESS: &str = "Unknown Business";

// ============================================================================
// Nested Types
// ============================================================================

/// General company information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyInfo {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_string")]
    pub sector: String,
    #[serde(deserialize_with = "lenient_string")]
    pub founding_year: String,
}

/// Social network profiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Social {
    #[serde(deserialize_with = "lenient_string")]
    pub linkedin: String,
    #[serde(deserialize_with = "lenient_string")]
    pub twitter: String,
    #[serde(deserialize_with = "lenient_string")]
    pub instagram: String,
}

/// Contact channels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_object")]
    pub social: Social,
}

/// Postal address of a location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    #[serde(deserialize_with = "lenient_string")]
    pub street: String,
    #[serde(deserialize_with = "lenient_string")]
    pub city: String,
    #[serde(deserialize_with = "lenient_string")]
    pub region: String,
    #[serde(deserialize_with = "lenient_string")]
    pub postal_code: String,
}

impl Address {
    /// True when every field is empty.
    pub fn is_blank(&self) -> bool {
        self.street.is_empty()
            && self.city.is_empty()
            && self.region.is_empty()
            && self.postal_code.is_empty()
    }

    /// Single-line rendering, skipping empty parts.
    pub fn one_line(&self) -> String {
        [&self.street, &self.city, &self.region, &self.postal_code]
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Opening hours for one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpeningHours {
    #[serde(deserialize_with = "lenient_string")]
    pub day: String,
    #[serde(deserialize_with = "lenient_string")]
    pub open_time: String,
    #[serde(deserialize_with = "lenient_string")]
    pub close_time: String,
}

/// A physical location of the business.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    /// Kind of site (headquarters, store, warehouse, ...).
    #[serde(deserialize_with = "lenient_string")]
    pub kind: String,
    #[serde(deserialize_with = "lenient_object")]
    pub address: Address,
    #[serde(deserialize_with = "lenient_list")]
    pub hours: Vec<OpeningHours>,
}

// ============================================================================
// Records
// ============================================================================

/// One partial observation of a business, produced by a single extraction pass.
///
/// Every field may be absent or blank on input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub business_name: String,
    #[serde(deserialize_with = "lenient_object")]
    pub company_info: CompanyInfo,
    #[serde(deserialize_with = "lenient_object")]
    pub contact: Contact,
    #[serde(deserialize_with = "lenient_list")]
    pub locations: Vec<Location>,
    #[serde(deserialize_with = "lenient_string")]
    pub extra_info: String,
}

impl ExtractedRecord {
    /// The merge key for this record, falling back to [`UNKNOWN_BUSINESS`].
    pub fn entity_name(&self) -> &str {
        let name = self.business_name.trim();
        if name.is_empty() {
            UNKNOWN_BUSINESS
        } else {
            name
        }
    }
}

/// The accumulated view of one business across all extractions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombinedRecord {
    pub company_info: CompanyInfo,
    pub contact: Contact,
    pub locations: Vec<Location>,
    pub extra_info: String,
}

impl Default for CombinedRecord {
    /// Blank shape: empty scalars and a single blank location.
    fn default() -> Self {
        Self {
            company_info: CompanyInfo::default(),
            contact: Contact::default(),
            locations: vec![Location::default()],
            extra_info: String::new(),
        }
    }
}

impl CombinedRecord {
    /// First location with a non-blank address.
    pub fn primary_location(&self) -> Option<&Location> {
        self.locations.iter().find(|l| !l.address.is_blank())
    }

    /// Total number of opening-hours entries across all locations.
    pub fn hours_count(&self) -> usize {
        self.locations.iter().map(|l| l.hours.len()).sum()
    }
}

impl From<CombinedRecord> for ExtractedRecord {
    fn from(combined: CombinedRecord) -> Self {
        Self {
            business_name: String::new(),
            company_info: combined.company_info,
            contact: combined.contact,
            locations: combined.locations,
            extra_info: combined.extra_info,
        }
    }
}

// ============================================================================
// Lenient Deserialization
// ============================================================================

/// Accept strings, numbers, booleans and null where a string is expected.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Treat null or a malformed nested object as the blank default.
fn lenient_object<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Treat null or a non-array as an empty list; drop entries that are not objects.
fn lenient_list<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter(serde_json::Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}
