use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Job board a posting was scraped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum SourcePlatform {
    Linkedin,
    Seek,
    Indeed,
    Glassdoor,
    Jora,
    CompanySite,
    Other,
}

/// Stored as TEXT; unknown values decode to `Other` rather than failing the row.
impl From<String> for SourcePlatform {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "linkedin" => SourcePlatform::Linkedin,
            "seek" => SourcePlatform::Seek,
            "indeed" => SourcePlatform::Indeed,
            "glassdoor" => SourcePlatform::Glassdoor,
            "jora" => SourcePlatform::Jora,
            "company_site" => SourcePlatform::CompanySite,
            _ => SourcePlatform::Other,
        }
    }
}

/// A scraped job posting. Owned by the job store; read-only here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPosting {
    pub id: Uuid,
    pub title: String,
    pub company: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    #[sqlx(try_from = "String")]
    pub source: SourcePlatform,
    pub url: String,
    pub discovered_at: DateTime<Utc>,
}
