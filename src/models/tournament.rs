//! Tournament record types.
//!
//! Wire format matches the original public API: camelCase field names,
//! Japanese category labels, ISO dates.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Tournament category, a fixed enumeration.
///
/// Serialized as the Japanese labels used by federation sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "一般")]
    General,
    #[serde(rename = "学生")]
    Student,
    #[serde(rename = "高校生")]
    HighSchool,
    #[serde(rename = "中学生")]
    JuniorHigh,
    #[serde(rename = "小学生")]
    Elementary,
    #[serde(rename = "シニア")]
    Senior,
    #[serde(rename = "実業団")]
    Corporate,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::General,
        Category::Student,
        Category::HighSchool,
        Category::JuniorHigh,
        Category::Elementary,
        Category::Senior,
        Category::Corporate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "一般",
            Self::Student => "学生",
            Self::HighSchool => "高校生",
            Self::JuniorHigh => "中学生",
            Self::Elementary => "小学生",
            Self::Senior => "シニア",
            Self::Corporate => "実業団",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.iter().find(|c| c.as_str() == s).copied()
    }
}

/// Publication status. Only published records are externally queryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    Draft,
    Published,
}

/// A canonical tournament record as stored and served.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    /// Surrogate id assigned by the store on creation.
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub prefecture: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Entry fee in yen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_fee: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_entries: Option<u32>,
    /// Registration deadline, on or before the start date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub status: TournamentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tournament {
    /// The uniqueness key used for deduplication.
    pub fn dedup_key(&self) -> (&str, NaiveDate, &str) {
        (&self.name, self.start_date, &self.prefecture)
    }
}

/// Fields for a record not yet persisted; the store assigns id and
/// timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTournament {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub prefecture: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    pub category: Category,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub entry_fee: Option<u32>,
    #[serde(default)]
    pub max_entries: Option<u32>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub contact_info: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default = "default_status")]
    pub status: TournamentStatus,
}

fn default_status() -> TournamentStatus {
    TournamentStatus::Published
}

impl NewTournament {
    /// Minimal record with only the required fields set.
    pub fn new(name: String, start_date: NaiveDate, prefecture: String, category: Category) -> Self {
        Self {
            name,
            description: None,
            start_date,
            end_date: None,
            prefecture,
            city: None,
            venue: None,
            category,
            level: None,
            entry_fee: None,
            max_entries: None,
            deadline: None,
            contact_info: None,
            source_url: None,
            status: TournamentStatus::Published,
        }
    }
}

/// Outcome of a scrape run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrapeStatus {
    Success,
    Error,
}

/// Append-only log entry, one per ingestion pipeline invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeLogEntry {
    pub source: String,
    pub url: String,
    pub status: ScrapeStatus,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ScrapeLogEntry {
    pub fn new(source: &str, url: &str, status: ScrapeStatus, message: String) -> Self {
        Self {
            source: source.to_string(),
            url: url.to_string(),
            status,
            message,
            created_at: Utc::now(),
        }
    }
}
