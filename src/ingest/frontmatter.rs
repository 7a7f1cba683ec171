use chrono::{DateTime, NaiveDate, NaiveDateTime};
use sea_orm::entity::prelude::DateTimeWithTimeZone;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("file does not start with a '---' front matter block")]
    MissingHeader,
    #[error("front matter block is not closed with '---'")]
    Unterminated,
    #[error("invalid front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Metadata header of a markdown content file.
///
/// Required keys are optional here so a file missing one can be reported and
/// skipped instead of failing to parse.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub author: Option<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub tags: serde_yaml::Value,
    pub featured_image: Option<String>,
    pub publish_date: Option<serde_yaml::Value>,
    pub title_pt: Option<String>,
    pub summary_pt: Option<String>,
    pub content_pt: Option<String>,
}

impl FrontMatter {
    /// Names of required keys that are absent or blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [("title", &self.title), ("slug", &self.slug), ("author", &self.author)]
            .into_iter()
            .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
            .map(|(name, _)| name)
            .collect()
    }

    /// Tag names from either a YAML list or a comma-separated string.
    pub fn tag_names(&self) -> Vec<String> {
        match &self.tags {
            serde_yaml::Value::Null => Vec::new(),
            serde_yaml::Value::String(csv) => split_tags(csv),
            serde_yaml::Value::Sequence(items) => items
                .iter()
                .filter_map(|item| item.as_str())
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect(),
            other => {
                tracing::warn!(?other, "tags should be a list of strings, ignoring");
                Vec::new()
            }
        }
    }

    pub fn publish_date(&self) -> Option<DateTimeWithTimeZone> {
        let raw = match self.publish_date.as_ref()? {
            serde_yaml::Value::String(s) => s.clone(),
            serde_yaml::Value::Number(n) => n.to_string(),
            _ => return None,
        };
        let parsed = parse_publish_date(&raw);
        if parsed.is_none() {
            tracing::warn!(value = %raw, "could not parse publish_date, leaving it empty");
        }
        parsed
    }
}

fn split_tags(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// RFC 3339, or a naive date / date-time read as UTC.
pub fn parse_publish_date(raw: &str) -> Option<DateTimeWithTimeZone> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date);
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

/// A parsed content file: front matter plus the markdown body.
#[derive(Debug, Clone)]
pub struct Document {
    pub meta: FrontMatter,
    pub body: String,
}

pub fn parse_document(text: &str) -> Result<Document, FrontMatterError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.split_inclusive('\n');

    match lines.next() {
        Some(first) if first.trim_end() == "---" => {}
        _ => return Err(FrontMatterError::MissingHeader),
    }

    let mut header = String::new();
    let mut closed = false;
    for line in lines.by_ref() {
        if line.trim_end() == "---" {
            closed = true;
            break;
        }
        header.push_str(line);
    }
    if !closed {
        return Err(FrontMatterError::Unterminated);
    }

    let meta = if header.trim().is_empty() {
        FrontMatter::default()
    } else {
        serde_yaml::from_str(&header)?
    };
    let body: String = lines.collect();

    Ok(Document { meta, body: body.trim().to_string() })
}
