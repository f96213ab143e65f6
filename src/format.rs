//! Text formatting rules
//!
//! Raw stored text is lightly cleaned before it reaches the canvas: a
//! handful of markdown markers are removed literally (no parsing), model
//! identifiers are shortened to their display segment, and timestamps are
//! reformatted when they parse.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const DATE_DISPLAY: &str = "%d/%m/%Y %H:%M";

/// Strip bold and level-2/3 heading markers by literal removal.
///
/// Longest marker first so a level-3 heading does not leave a stray `#`.
/// Other markdown (italics, links, lists) passes through unchanged.
pub fn strip_markers(text: &str) -> String {
    text.replace("**", "").replace("###", "").replace("##", "")
}

/// Display form of a model identifier: everything after the first `/` of a
/// `provider/modelname` composite, the identifier itself otherwise.
pub fn display_model_name(model: &str) -> &str {
    match model.split_once('/') {
        Some((_, name)) => name,
        None => model,
    }
}

/// Format an ISO-8601 timestamp as `DD/MM/YYYY HH:MM`.
///
/// Accepts offset-bearing datetimes, naive datetimes and bare dates. On any
/// parse failure the raw input is returned verbatim; the field is never
/// dropped and never an error.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DATE_DISPLAY).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(DATE_DISPLAY).to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_time(NaiveTime::MIN).format(DATE_DISPLAY).to_string();
    }
    raw.to_string()
}
