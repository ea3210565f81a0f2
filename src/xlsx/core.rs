//! Core package properties (`docProps/core.xml`).

use super::xml::XmlElement;
use crate::error::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorePropertiesNode {
    pub created: Option<DateTime<Utc>>,
    pub creator: Option<String>,
    pub modified: Option<DateTime<Utc>>,
    pub last_modified_by: Option<String>,
    pub subject: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
}

impl CorePropertiesNode {
    pub fn parse(xml: &str) -> Result<Self> {
        let root = XmlElement::parse(xml)?;
        let text = |name: &str| root.child(name).map(|el| el.text.clone());
        let timestamp = |name: &str| {
            root.child(name).and_then(|el| {
                let parsed = parse_w3c_datetime(&el.text);
                if parsed.is_none() {
                    log::warn!("Ignoring unparsable {} timestamp {:?}", name, el.text);
                }
                parsed
            })
        };

        Ok(Self {
            created: timestamp("created"),
            creator: text("creator"),
            modified: timestamp("modified"),
            last_modified_by: text("lastModifiedBy"),
            subject: text("subject"),
            title: text("title"),
            description: text("description"),
            language: text("language"),
        })
    }
}

/// W3CDTF timestamp; values without an offset are taken as UTC.
pub fn parse_w3c_datetime(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
