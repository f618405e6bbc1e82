//! Field validation and sanitization for untrusted input.
//!
//! Validation is whole-object: every violation is collected so callers can
//! report all problems at once. Sanitization is a separate escaping step
//! applied to free-text fields before storage, independent of whether the
//! injection-pattern check already rejected the value.

use std::sync::OnceLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::models::{canonical_prefecture, Category, NewTournament, TournamentStatus};
use crate::query::SearchQuery;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// Whether the start date must lie in the future.
///
/// Manual submissions require a future date; scraped candidates may
/// reference dates already public on the source site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRule {
    FutureOnly,
    AllowPast,
}

/// Raw tournament submission, as received from the outside.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentInput {
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
    pub category: String,
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
}

/// Raw search parameters, as received from the query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(default)]
    pub prefecture: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

fn injection_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)<script|javascript:|data:").expect("valid regex"))
}

/// True if the text contains a markup/script injection pattern.
pub fn contains_injection(text: &str) -> bool {
    injection_pattern().is_match(text)
}

/// HTML-escape the five characters `< > " ' /`.
///
/// Idempotent: the replacement entities contain none of the escaped
/// characters, so a second pass is a no-op.
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
    out
}

fn check_text(
    errors: &mut Vec<ValidationError>,
    field: &'static str,
    value: &str,
    max_chars: usize,
    too_long: &str,
) {
    if value.chars().count() > max_chars {
        errors.push(ValidationError::new(field, too_long));
    }
    if contains_injection(value) {
        errors.push(ValidationError::new(field, "不正な文字が含まれています"));
    }
}

fn check_text_opt(
    errors: &mut Vec<ValidationError>,
    field: &'static str,
    value: &Option<String>,
    max_chars: usize,
    too_long: &str,
) {
    if let Some(v) = value {
        check_text(errors, field, v, max_chars, too_long);
    }
}

/// Validate a tournament submission and convert it to a persistable record.
///
/// Collects every violation instead of stopping at the first one.
pub fn validate_tournament(
    input: &TournamentInput,
    rule: DateRule,
) -> Result<NewTournament, Vec<ValidationError>> {
    validate_tournament_at(input, rule, Utc::now().date_naive())
}

fn validate_tournament_at(
    input: &TournamentInput,
    rule: DateRule,
    today: NaiveDate,
) -> Result<NewTournament, Vec<ValidationError>> {
    let mut errors = Vec::new();

    if input.name.is_empty() {
        errors.push(ValidationError::new("name", "大会名は必須です"));
    }
    check_text(
        &mut errors,
        "name",
        &input.name,
        200,
        "大会名は200文字以内で入力してください",
    );
    check_text_opt(
        &mut errors,
        "description",
        &input.description,
        1000,
        "説明は1000文字以内で入力してください",
    );
    check_text_opt(
        &mut errors,
        "city",
        &input.city,
        50,
        "市区町村名は50文字以内で入力してください",
    );
    check_text_opt(
        &mut errors,
        "venue",
        &input.venue,
        200,
        "会場名は200文字以内で入力してください",
    );
    check_text_opt(
        &mut errors,
        "level",
        &input.level,
        50,
        "レベルは50文字以内で入力してください",
    );
    check_text_opt(
        &mut errors,
        "contactInfo",
        &input.contact_info,
        500,
        "問い合わせ先は500文字以内で入力してください",
    );

    if rule == DateRule::FutureOnly && input.start_date < today {
        errors.push(ValidationError::new(
            "startDate",
            "開催日は今日以降の日付を入力してください",
        ));
    }
    if let Some(end) = input.end_date {
        if end < input.start_date {
            errors.push(ValidationError::new(
                "endDate",
                "終了日は開始日以降の日付を入力してください",
            ));
        }
    }
    if let Some(deadline) = input.deadline {
        if deadline > input.start_date {
            errors.push(ValidationError::new(
                "deadline",
                "申込締切は開催日以前の日付を入力してください",
            ));
        }
    }

    let prefecture = if input.prefecture.is_empty() {
        errors.push(ValidationError::new("prefecture", "都道府県は必須です"));
        None
    } else {
        let canonical = canonical_prefecture(&input.prefecture);
        if canonical.is_none() {
            errors.push(ValidationError::new(
                "prefecture",
                "都道府県名が正しくありません",
            ));
        }
        canonical
    };

    let category = Category::from_label(&input.category);
    if category.is_none() {
        errors.push(ValidationError::new(
            "category",
            "有効なカテゴリーを選択してください",
        ));
    }

    if let Some(fee) = input.entry_fee {
        if fee > 100_000 {
            errors.push(ValidationError::new(
                "entryFee",
                "参加費は100,000円以下で入力してください",
            ));
        }
    }
    if let Some(max) = input.max_entries {
        if max == 0 {
            errors.push(ValidationError::new(
                "maxEntries",
                "定員は1名以上で入力してください",
            ));
        } else if max > 10_000 {
            errors.push(ValidationError::new(
                "maxEntries",
                "定員は10,000名以下で入力してください",
            ));
        }
    }
    if let Some(url) = input.source_url.as_deref() {
        if !url.is_empty() && Url::parse(url).is_err() {
            errors.push(ValidationError::new("sourceUrl", "有効なURLを入力してください"));
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewTournament {
        name: input.name.clone(),
        description: input.description.clone(),
        start_date: input.start_date,
        end_date: input.end_date,
        prefecture: prefecture.unwrap_or_default().to_string(),
        city: input.city.clone(),
        venue: input.venue.clone(),
        category: category.unwrap_or(Category::General),
        level: input.level.clone(),
        entry_fee: input.entry_fee,
        max_entries: input.max_entries,
        deadline: input.deadline,
        contact_info: input.contact_info.clone(),
        source_url: input.source_url.clone(),
        status: TournamentStatus::Published,
    })
}

/// Escape every free-text field of a record before it enters the store.
pub fn sanitize_tournament(mut record: NewTournament) -> NewTournament {
    record.name = sanitize(&record.name);
    record.description = record.description.map(|v| sanitize(&v));
    record.city = record.city.map(|v| sanitize(&v));
    record.venue = record.venue.map(|v| sanitize(&v));
    record.level = record.level.map(|v| sanitize(&v));
    record.contact_info = record.contact_info.map(|v| sanitize(&v));
    record
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Validate search parameters into a query the engine accepts.
///
/// Page and limit fall back to their defaults when missing, unparsable,
/// or non-positive; limit is capped at 100.
pub fn validate_search(params: &SearchParams) -> Result<SearchQuery, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let keyword = non_empty(&params.keyword);
    if let Some(kw) = keyword.as_deref() {
        if kw.chars().count() > 100 {
            errors.push(ValidationError::new(
                "keyword",
                "キーワードは100文字以内で入力してください",
            ));
        }
        if contains_injection(kw) {
            errors.push(ValidationError::new("keyword", "不正な文字が含まれています"));
        }
    }

    let category = match non_empty(&params.category) {
        Some(label) => match Category::from_label(&label) {
            Some(cat) => Some(cat),
            None => {
                errors.push(ValidationError::new(
                    "category",
                    "有効なカテゴリーを選択してください",
                ));
                None
            }
        },
        None => None,
    };

    let date_from = parse_filter_date(&mut errors, "startDate", &params.start_date);
    let date_to = parse_filter_date(&mut errors, "endDate", &params.end_date);

    if !errors.is_empty() {
        return Err(errors);
    }

    let page = parse_positive(&params.page).unwrap_or(1);
    let limit = parse_positive(&params.limit).unwrap_or(20).min(100);

    Ok(SearchQuery {
        prefecture: non_empty(&params.prefecture),
        city: non_empty(&params.city),
        category,
        date_from,
        date_to,
        keyword,
        page,
        limit,
    })
}

fn parse_filter_date(
    errors: &mut Vec<ValidationError>,
    field: &'static str,
    value: &Option<String>,
) -> Option<NaiveDate> {
    let raw = non_empty(value)?;
    match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(ValidationError::new(field, "有効な日付を入力してください"));
            None
        }
    }
}

fn parse_positive(value: &Option<String>) -> Option<u32> {
    non_empty(value)?.parse::<u32>().ok().filter(|v| *v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, start: NaiveDate) -> TournamentInput {
        TournamentInput {
            name: name.to_string(),
            description: None,
            start_date: start,
            end_date: None,
            prefecture: "東京都".to_string(),
            city: None,
            venue: None,
            category: "一般".to_string(),
            level: None,
            entry_fee: None,
            max_entries: None,
            deadline: None,
            contact_info: None,
            source_url: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 28).unwrap()
    }

    fn errors_for(input: &TournamentInput) -> Vec<ValidationError> {
        validate_tournament_at(input, DateRule::FutureOnly, today()).unwrap_err()
    }

    #[test]
    fn sanitize_escapes_and_is_idempotent() {
        let once = sanitize("<b>\"it's\" a/b</b>");
        assert_eq!(once, "&lt;b&gt;&quot;it&#x27;s&quot; a&#x2F;b&lt;&#x2F;b&gt;");
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn valid_submission_passes() {
        let result = validate_tournament_at(
            &input("市民大会", today()),
            DateRule::FutureOnly,
            today(),
        );
        let record = result.unwrap();
        assert_eq!(record.status, TournamentStatus::Published);
        assert_eq!(record.category, Category::General);
    }

    #[test]
    fn collects_multiple_violations() {
        let mut bad = input("", today());
        bad.prefecture = "東京".to_string();
        bad.category = "プロ".to_string();
        let errors = errors_for(&bad);
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"prefecture"));
        assert!(fields.contains(&"category"));
    }

    #[test]
    fn end_date_before_start_is_rejected() {
        let mut bad = input("市民大会", today());
        bad.end_date = Some(today().pred_opt().unwrap());
        let errors = errors_for(&bad);
        assert!(errors.iter().any(|e| e.field == "endDate"));
    }

    #[test]
    fn deadline_after_start_is_rejected() {
        let mut bad = input("市民大会", today());
        bad.deadline = Some(today().succ_opt().unwrap());
        let errors = errors_for(&bad);
        assert!(errors.iter().any(|e| e.field == "deadline"));
    }

    #[test]
    fn past_start_date_rejected_only_for_manual_submissions() {
        let past = input("市民大会", today().pred_opt().unwrap());
        assert!(validate_tournament_at(&past, DateRule::FutureOnly, today()).is_err());
        assert!(validate_tournament_at(&past, DateRule::AllowPast, today()).is_ok());
    }

    #[test]
    fn injection_patterns_are_a_distinct_failure() {
        for bad_name in ["<script>alert(1)</script>", "JavaScript:void(0)", "data:text/html"] {
            let errors = errors_for(&input(bad_name, today()));
            assert!(
                errors
                    .iter()
                    .any(|e| e.field == "name" && e.message == "不正な文字が含まれています"),
                "expected injection failure for {bad_name}"
            );
        }
    }

    #[test]
    fn entry_fee_and_max_entries_bounds() {
        let mut bad = input("市民大会", today());
        bad.entry_fee = Some(100_001);
        bad.max_entries = Some(10_001);
        let errors = errors_for(&bad);
        assert!(errors.iter().any(|e| e.field == "entryFee"));
        assert!(errors.iter().any(|e| e.field == "maxEntries"));
    }

    #[test]
    fn malformed_source_url_is_rejected_but_empty_is_allowed() {
        let mut ok = input("市民大会", today());
        ok.source_url = Some(String::new());
        assert!(validate_tournament_at(&ok, DateRule::FutureOnly, today()).is_ok());

        let mut bad = input("市民大会", today());
        bad.source_url = Some("not a url".to_string());
        let errors = errors_for(&bad);
        assert!(errors.iter().any(|e| e.field == "sourceUrl"));
    }

    #[test]
    fn search_defaults_and_clamping() {
        let query = validate_search(&SearchParams::default()).unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 20);

        let query = validate_search(&SearchParams {
            page: Some("0".to_string()),
            limit: Some("9999".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 100);
    }

    #[test]
    fn search_rejects_bad_category_and_dates() {
        let errors = validate_search(&SearchParams {
            category: Some("プロ".to_string()),
            start_date: Some("2024/12/15".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"category"));
        assert!(fields.contains(&"startDate"));
    }

    #[test]
    fn search_keyword_injection_rejected() {
        let errors = validate_search(&SearchParams {
            keyword: Some("<script>".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(errors.iter().any(|e| e.field == "keyword"));
    }
}
