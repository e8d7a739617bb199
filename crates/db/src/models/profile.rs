//! Profile document model and DTOs.
//!
//! Profiles are stored document-style: a fixed set of top-level columns plus
//! a JSONB `preferences` object. The row id is the owning credential's id,
//! never generated here.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use tandem_core::types::{Timestamp, UserId};

/// Display preferences embedded in the profile document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            language: default_language(),
        }
    }
}

fn default_theme() -> String {
    "light".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

/// Full profile row from the `profiles` table.
///
/// The `email` column is a denormalized copy of the credential email and may
/// transiently lag it; reads must go through enrichment before leaving the
/// service.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub preferences: Json<Preferences>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a profile alongside a new credential.
#[derive(Debug)]
pub struct CreateProfile {
    /// The owning credential's id.
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Partial patch for a profile. `None` fields are left unchanged.
#[derive(Debug, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub preferences: Option<PreferencesPatch>,
}

/// Partial patch for the preferences object. Serializes only the provided
/// keys so the store can merge it over the existing JSONB value.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PreferencesPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}
