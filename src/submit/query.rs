//! Form values and query-string construction.

use chrono::{Duration, NaiveDate};

use crate::config::DEFAULT_RANGE_DAYS;
use crate::models::AnalysisRequest;

/// The analysis form's fields, in form order. Keys may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    fields: Vec<(String, String)>,
}

impl FormValues {
    /// Empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    /// All fields in form order.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// First value of `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl From<&AnalysisRequest> for FormValues {
    fn from(request: &AnalysisRequest) -> Self {
        let mut form = FormValues::new();
        form.push("site", request.site.as_str())
            .push("start_date", request.start_date.format("%Y-%m-%d").to_string())
            .push("end_date", request.end_date.format("%Y-%m-%d").to_string());
        if let Some(alert_type) = request.alert_type {
            form.push("alert_type", alert_type.as_str());
        }
        for (key, value) in &request.filters {
            form.push(key.as_str(), value.as_str());
        }
        form
    }
}

/// Encodes `form` as a query string.
///
/// With `site_override` set (a site picked outside the form), every `site`
/// field of the form is dropped and the override is sent first instead.
pub fn build_query(form: &FormValues, site_override: Option<&str>) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    if let Some(site) = site_override {
        serializer.append_pair("site", site);
    }
    for (key, value) in form.fields() {
        if site_override.is_some() && key == "site" {
            continue;
        }
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// The form's default window: the last seven days up to and including `today`.
pub fn default_date_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(DEFAULT_RANGE_DAYS), today)
}
