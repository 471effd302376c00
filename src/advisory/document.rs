//! Advisory document schema
//!
//! The upstream model is asked to fill exactly this structure, but nothing
//! guarantees it does. Any JSON object is accepted: text leaves take strings,
//! numbers or booleans, `null` and missing leaves stay unset, and unknown keys
//! are carried through in `extra` at every level. A section whose shape does
//! not fit at all is kept verbatim under `extra` instead of its typed slot.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct AdvisoryDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_season: Option<SeasonInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fertilizers: Option<Recommendations>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecticides: Option<Recommendations>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Conditions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub techniques: Option<TitledList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Timeline>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precautions: Option<TitledList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub care_tips: Option<TitledList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yield_info: Option<YieldInfo>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Map<String, Value>> for AdvisoryDocument {
    fn from(map: Map<String, Value>) -> Self {
        let mut doc = AdvisoryDocument::default();
        let mut extra = Map::new();

        for (key, value) in map {
            match key.as_str() {
                "crop" => doc.crop = text_or_extra(&mut extra, key, value),
                "emoji" => doc.emoji = text_or_extra(&mut extra, key, value),
                "overview" => doc.overview = text_or_extra(&mut extra, key, value),
                "best_season" => doc.best_season = section_or_extra(&mut extra, key, value),
                "fertilizers" => doc.fertilizers = section_or_extra(&mut extra, key, value),
                "insecticides" => doc.insecticides = section_or_extra(&mut extra, key, value),
                "conditions" => doc.conditions = section_or_extra(&mut extra, key, value),
                "techniques" => doc.techniques = section_or_extra(&mut extra, key, value),
                "timeline" => doc.timeline = section_or_extra(&mut extra, key, value),
                "precautions" => doc.precautions = section_or_extra(&mut extra, key, value),
                "care_tips" => doc.care_tips = section_or_extra(&mut extra, key, value),
                "yield_info" => doc.yield_info = section_or_extra(&mut extra, key, value),
                _ => {
                    extra.insert(key, value);
                }
            }
        }

        doc.extra = extra;
        doc
    }
}

fn text_or_extra(extra: &mut Map<String, Value>, key: String, value: Value) -> Option<String> {
    match scalar_text(value) {
        Ok(Some(text)) => Some(text),
        Ok(None) => {
            extra.insert(key, Value::Null);
            None
        }
        Err(value) => {
            extra.insert(key, value);
            None
        }
    }
}

fn section_or_extra<T: DeserializeOwned>(
    extra: &mut Map<String, Value>,
    key: String,
    value: Value,
) -> Option<T> {
    match T::deserialize(&value) {
        Ok(section) => Some(section),
        Err(e) => {
            tracing::debug!(section = %key, error = %e, "advisory section kept verbatim");
            extra.insert(key, value);
            None
        }
    }
}

/// Strings pass through, numbers and booleans are rendered, `null` is unset.
/// Arrays and objects are handed back.
fn scalar_text(value: Value) -> Result<Option<String>, Value> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(other),
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    scalar_text(Value::deserialize(deserializer)?)
        .map_err(|other| D::Error::custom(format!("expected text, found {other}")))
}

/// A list of text entries; a lone scalar counts as a one-entry list
fn lenient_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    let items = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(None),
        Value::Array(items) => items,
        scalar => vec![scalar],
    };

    let mut list = Vec::with_capacity(items.len());
    for item in items {
        match scalar_text(item) {
            Ok(Some(text)) => list.push(text),
            Ok(None) => {}
            Err(other) => {
                return Err(D::Error::custom(format!(
                    "expected text list entry, found {other}"
                )))
            }
        }
    }
    Ok(Some(list))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonInfo {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fertilizer or pest-control recommendations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub soil: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub water: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub sunlight: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub spacing: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitledList {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phases: Option<Vec<Phase>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YieldInfo {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub average: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
