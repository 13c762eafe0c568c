//! Parse model output into per-pass results

use crate::error::ExtractorError;
use crate::knowledge::{PartialKnowledge, SupportingContent};
use crate::passes::{PassDescriptor, PassKind, ResponseShape};
use gazette_domain::{FeatureArticle, Highlight, StrategicInsights};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Parse a model response into the shape the pass asked for
///
/// The descriptor's [`ResponseShape`] decides how the body is read; the pass
/// kind decides which record it becomes.
pub fn parse_response(
    descriptor: &PassDescriptor,
    response: &str,
) -> Result<PartialKnowledge, ExtractorError> {
    let kind = descriptor.kind;
    let body = match descriptor.shape {
        ResponseShape::PlainText => Value::String(parse_prose(kind, response)?),
        ResponseShape::JsonArray => Value::Array(parse_array(kind, response)?),
        ResponseShape::JsonObject => parse_object(kind, response)?,
    };

    match (kind, body) {
        (PassKind::ExecutiveSummary, Value::String(text)) => Ok(PartialKnowledge::Summary(text)),
        (PassKind::KeyHighlights, Value::Array(items)) => {
            let highlights: Vec<Highlight> = entries(kind, items)?;
            Ok(PartialKnowledge::Highlights(
                highlights
                    .into_iter()
                    .filter(|h| !h.title.is_empty() || !h.description.is_empty())
                    .collect(),
            ))
        }
        (PassKind::FeatureArticles, Value::Array(items)) => {
            let articles: Vec<FeatureArticle> = entries(kind, items)?;
            Ok(PartialKnowledge::Articles(
                articles.into_iter().filter(|a| !a.title.is_empty()).collect(),
            ))
        }
        (PassKind::SupportingContent, body @ Value::Object(_)) => {
            record::<SupportingContent>(kind, body).map(PartialKnowledge::Supporting)
        }
        (PassKind::StrategicInsights, body @ Value::Object(_)) => {
            record::<StrategicInsights>(kind, body).map(PartialKnowledge::Insights)
        }
        (kind, _) => Err(ExtractorError::InvalidFormat(format!(
            "{}: response shape {:?} does not fit this pass",
            kind, descriptor.shape
        ))),
    }
}

/// Plain prose, with any code fence or echoed pass title removed
fn parse_prose(kind: PassKind, response: &str) -> Result<String, ExtractorError> {
    let text = strip_fence(response.trim());
    let text = strip_label(text, kind.title());

    if text.is_empty() {
        return Err(ExtractorError::InvalidFormat(format!("{}: empty response", kind)));
    }
    Ok(text.to_string())
}

fn parse_array(kind: PassKind, response: &str) -> Result<Vec<Value>, ExtractorError> {
    match parse_json(response, '[', ']')? {
        Value::Array(items) => Ok(items),
        _ => Err(ExtractorError::InvalidFormat(format!(
            "{}: expected JSON array",
            kind
        ))),
    }
}

fn parse_object(kind: PassKind, response: &str) -> Result<Value, ExtractorError> {
    let value = parse_json(response, '{', '}')?;
    if !value.is_object() {
        return Err(ExtractorError::InvalidFormat(format!(
            "{}: expected JSON object",
            kind
        )));
    }
    Ok(value)
}

/// Deserialize array entries, skipping the ones that do not fit
fn entries<T: DeserializeOwned>(kind: PassKind, items: Vec<Value>) -> Result<Vec<T>, ExtractorError> {
    let total = items.len();
    let parsed: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("{} entry {} skipped: {}", kind, idx, e);
                None
            }
        })
        .collect();

    if total > 0 && parsed.is_empty() {
        return Err(ExtractorError::Aggregation(format!(
            "{}: none of {} entries match the expected shape",
            kind, total
        )));
    }
    Ok(parsed)
}

fn record<T: DeserializeOwned>(kind: PassKind, body: Value) -> Result<T, ExtractorError> {
    serde_json::from_value(body).map_err(|e| ExtractorError::Aggregation(format!("{}: {}", kind, e)))
}

/// Parse JSON, tolerating code fences and prose around the payload
fn parse_json(response: &str, open: char, close: char) -> Result<Value, ExtractorError> {
    let body = extract_json(response)?;

    match serde_json::from_str(body) {
        Ok(value) => Ok(value),
        Err(e) => match (body.find(open), body.rfind(close)) {
            (Some(start), Some(end)) if start < end => Ok(serde_json::from_str(&body[start..=end])?),
            _ => Err(e.into()),
        },
    }
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<&str, ExtractorError> {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return Err(ExtractorError::InvalidFormat("Empty response".to_string()));
    }

    let body = strip_fence(trimmed);
    if body.is_empty() {
        return Err(ExtractorError::InvalidFormat("Empty code block".to_string()));
    }
    Ok(body)
}

/// Contents of the first fenced block, or the input when there is none
fn strip_fence(text: &str) -> &str {
    let Some(open) = text.find("```") else {
        return text;
    };

    // Skip the language tag line
    let after = &text[open + 3..];
    let Some((_, inner)) = after.split_once('\n') else {
        return "";
    };
    match inner.find("```") {
        Some(close) => inner[..close].trim(),
        None => inner.trim(),
    }
}

fn strip_label<'a>(text: &'a str, label: &str) -> &'a str {
    let starts_with_label = text
        .get(..label.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(label));
    if !starts_with_label {
        return text;
    }
    text[label.len()..]
        .trim_start_matches(|c: char| c == ':' || c == '*' || c == '#')
        .trim()
}
