// Field-level deserializers for the backend's inconsistent record shapes.
//
// Every function here goes through `serde_json::Value` and never fails on
// an unexpected shape: the field simply decodes as absent. Used through
// `#[serde(default, deserialize_with = "...")]` on the `Raw*` models.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::{RawTimestamp, Relation};

/// Scalar to string. Numbers and booleans are stringified; blank strings,
/// arrays and objects are absent.
pub(crate) fn string<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(d)?.and_then(scalar_to_string))
}

/// Identifier: string, number, or a Mongo extended-JSON `{"$oid": "..."}`.
pub(crate) fn id<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(d)?.and_then(|value| match value {
        Value::Object(map) => map.get("$oid").cloned().and_then(scalar_to_string),
        other => scalar_to_string(other),
    }))
}

/// Boolean flag: `true`/`false`, `"true"`/`"false"`, `1`/`0`.
pub(crate) fn flag<'de, D>(d: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(d)?.and_then(|value| match value {
        Value::Bool(b) => Some(b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }))
}

/// List of strings: a JSON array of scalars, or a comma separated string.
pub(crate) fn string_list<'de, D>(d: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Array(items)) => items.into_iter().filter_map(scalar_to_string).collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_owned)
            .collect(),
        _ => Vec::new(),
    })
}

/// Relation field: an embedded record or a plain name.
pub(crate) fn relation<'de, D>(d: D) -> Result<Option<Relation>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(d)?.and_then(|value| match value {
        Value::Object(map) => {
            let id = ["_id", "id"]
                .iter()
                .find_map(|key| map.get(*key).cloned().and_then(scalar_to_string));
            let name = ["name", "title", "username"]
                .iter()
                .find_map(|key| map.get(*key).cloned().and_then(scalar_to_string));
            Some(Relation::Record { id, name })
        }
        Value::String(s) if !s.trim().is_empty() => Some(Relation::Name(s.trim().to_owned())),
        _ => None,
    }))
}

/// Timestamp: text (parsed later) or epoch milliseconds.
pub(crate) fn timestamp<'de, D>(d: D) -> Result<Option<RawTimestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(d)?.and_then(|value| match value {
        Value::Number(n) => n.as_i64().map(RawTimestamp::EpochMillis),
        Value::String(s) if !s.trim().is_empty() => Some(RawTimestamp::Text(s)),
        _ => None,
    }))
}

/// Whole minutes: a number or a string with a leading number (`"5 min read"`).
pub(crate) fn minutes<'de, D>(d: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(d)?.and_then(|value| match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => {
            let digits: String = s.trim().chars().take_while(char::is_ascii_digit).collect();
            digits.parse().ok()
        }
        _ => None,
    }))
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else if trimmed.len() == s.len() {
                Some(s)
            } else {
                Some(trimmed.to_owned())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;

    use crate::models::{RawTimestamp, Relation};

    #[derive(Debug, Default, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "super::string")]
        text: Option<String>,
        #[serde(default, deserialize_with = "super::id")]
        id: Option<String>,
        #[serde(default, deserialize_with = "super::flag")]
        flag: Option<bool>,
        #[serde(default, deserialize_with = "super::string_list")]
        list: Vec<String>,
        #[serde(default, deserialize_with = "super::relation")]
        relation: Option<Relation>,
        #[serde(default, deserialize_with = "super::timestamp")]
        at: Option<RawTimestamp>,
        #[serde(default, deserialize_with = "super::minutes")]
        minutes: Option<u32>,
    }

    fn probe(value: serde_json::Value) -> Probe {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn scalars_are_stringified() {
        assert_eq!(probe(json!({"text": 42})).text.as_deref(), Some("42"));
        assert_eq!(probe(json!({"text": true})).text.as_deref(), Some("true"));
        assert_eq!(probe(json!({"text": "  padded "})).text.as_deref(), Some("padded"));
    }

    #[test]
    fn wrong_shapes_decode_as_absent() {
        let p = probe(json!({
            "text": {"nested": 1},
            "flag": [1],
            "list": 12,
            "relation": 7,
            "at": false,
            "minutes": "soon"
        }));
        assert!(p.text.is_none());
        assert!(p.flag.is_none());
        assert!(p.list.is_empty());
        assert!(p.relation.is_none());
        assert!(p.at.is_none());
        assert!(p.minutes.is_none());
    }

    #[test]
    fn null_and_missing_are_absent() {
        let p = probe(json!({"text": null, "id": null}));
        assert!(p.text.is_none());
        assert!(p.id.is_none());
        assert!(probe(json!({})).list.is_empty());
    }

    #[test]
    fn ids_accept_numbers_and_oid_objects() {
        assert_eq!(probe(json!({"id": 17})).id.as_deref(), Some("17"));
        assert_eq!(
            probe(json!({"id": {"$oid": "65f0c0ffee"}})).id.as_deref(),
            Some("65f0c0ffee")
        );
    }

    #[test]
    fn flags_accept_strings_and_numbers() {
        assert_eq!(probe(json!({"flag": "TRUE"})).flag, Some(true));
        assert_eq!(probe(json!({"flag": 0})).flag, Some(false));
        assert_eq!(probe(json!({"flag": "maybe"})).flag, None);
    }

    #[test]
    fn lists_accept_comma_separated_strings() {
        assert_eq!(
            probe(json!({"list": "react, node ,, rust"})).list,
            vec!["react", "node", "rust"]
        );
        assert_eq!(probe(json!({"list": ["a", 2, null]})).list, vec!["a", "2"]);
    }

    #[test]
    fn relation_is_record_or_name() {
        assert_eq!(
            probe(json!({"relation": {"_id": "u1", "name": "Dana"}})).relation,
            Some(Relation::Record {
                id: Some("u1".into()),
                name: Some("Dana".into())
            })
        );
        assert_eq!(
            probe(json!({"relation": "Branding"})).relation,
            Some(Relation::Name("Branding".into()))
        );
        assert_eq!(probe(json!({"relation": "   "})).relation, None);
    }

    #[test]
    fn timestamps_and_minutes() {
        assert_eq!(
            probe(json!({"at": 1_700_000_000_000_i64})).at,
            Some(RawTimestamp::EpochMillis(1_700_000_000_000))
        );
        assert_eq!(probe(json!({"minutes": "5 min read"})).minutes, Some(5));
        assert_eq!(probe(json!({"minutes": 8})).minutes, Some(8));
    }
}
