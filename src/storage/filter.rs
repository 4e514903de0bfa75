//! Backend-neutral document filters.
//!
//! A [`Filter`] is evaluated in process by [`Filter::matches`] and compiled to
//! SQL by the Postgres backend; both must agree. [`Filter::to_json`] renders the
//! document-query shape used in logs and by clients that speak that dialect.

use serde_json::{json, Map, Value};

/// Predicate over a stored document.
///
/// Field names are dotted paths into the document (`data.name`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `_id` equals the value.
    Id(String),
    /// The string at `field` is one of `values`.
    In { field: String, values: Vec<String> },
    /// The array at `field` contains `value`.
    Contains { field: String, value: String },
    /// Some entry of `data.creators` has the given address and verified flag.
    Creator {
        address: Option<String>,
        verified: Option<bool>,
    },
    /// Any branch matches; an empty `Or` matches nothing.
    Or(Vec<Filter>),
    /// Every branch matches; an empty `And` matches everything.
    And(Vec<Filter>),
}

/// Path of the creator array inside a metadata document.
pub const CREATORS_PATH: [&str; 2] = ["data", "creators"];

impl Filter {
    pub fn id(id: impl Into<String>) -> Self {
        Filter::Id(id.into())
    }

    pub fn field_in(field: impl Into<String>, values: Vec<String>) -> Self {
        Filter::In {
            field: field.into(),
            values,
        }
    }

    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Contains {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Evaluates the filter against one document.
    #[must_use]
    pub fn matches(&self, document: &Value) -> bool {
        match self {
            Filter::Id(id) => document.get("_id").and_then(Value::as_str) == Some(id.as_str()),
            Filter::In { field, values } => lookup(document, field)
                .and_then(Value::as_str)
                .is_some_and(|found| values.iter().any(|v| v == found)),
            Filter::Contains { field, value } => lookup(document, field)
                .and_then(Value::as_array)
                .is_some_and(|items| items.iter().any(|item| item.as_str() == Some(value))),
            Filter::Creator { address, verified } => document
                .get(CREATORS_PATH[0])
                .and_then(|data| data.get(CREATORS_PATH[1]))
                .and_then(Value::as_array)
                .is_some_and(|creators| {
                    creators.iter().any(|creator| {
                        address.as_deref().map_or(true, |address| {
                            creator.get("address").and_then(Value::as_str) == Some(address)
                        }) && verified.map_or(true, |verified| {
                            creator.get("verified").and_then(Value::as_bool) == Some(verified)
                        })
                    })
                }),
            Filter::Or(branches) => branches.iter().any(|b| b.matches(document)),
            Filter::And(branches) => branches.iter().all(|b| b.matches(document)),
        }
    }

    /// Document-query rendering, e.g. `{"$or":[{"data":{"creators":{"address":"9"}}},{"mint":["M"]}]}`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Filter::Id(id) => json!({ "_id": id }),
            Filter::In { field, values } => nest(field, json!(values)),
            Filter::Contains { field, value } => nest(field, json!({ "$in": [value] })),
            Filter::Creator { address, verified } => {
                let mut creator = Map::new();
                if let Some(address) = address {
                    creator.insert("address".to_string(), json!(address));
                }
                if let Some(verified) = verified {
                    creator.insert("verified".to_string(), json!(verified));
                }
                nest(&CREATORS_PATH.join("."), Value::Object(creator))
            }
            Filter::Or(branches) => {
                json!({ "$or": branches.iter().map(Filter::to_json).collect::<Vec<_>>() })
            }
            Filter::And(branches) => {
                json!({ "$and": branches.iter().map(Filter::to_json).collect::<Vec<_>>() })
            }
        }
    }
}

/// Follows a dotted path through nested objects.
pub(crate) fn lookup<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(document, |value, segment| value.get(segment))
}

/// Builds `{"a":{"b":leaf}}` from `a.b`.
fn nest(path: &str, leaf: Value) -> Value {
    path.rsplit('.').fold(leaf, |inner, segment| {
        let mut object = Map::new();
        object.insert(segment.to_string(), inner);
        Value::Object(object)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artwork() -> Value {
        json!({
            "_id": "art",
            "mint": "M",
            "storeIds": ["1", "2"],
            "data": {
                "name": "piece",
                "creators": [
                    { "address": "9", "verified": false },
                    { "address": "8", "verified": true }
                ]
            }
        })
    }

    #[test]
    fn test_filter_shapes() {
        assert_eq!(
            Filter::Creator { address: Some("9".into()), verified: None }.to_json(),
            json!({ "data": { "creators": { "address": "9" } } })
        );
        assert_eq!(
            Filter::field_in("mint", vec!["M".into()]).to_json(),
            json!({ "mint": ["M"] })
        );
        assert_eq!(
            Filter::Or(vec![
                Filter::Creator { address: Some("9".into()), verified: Some(true) },
                Filter::field_in("mint", vec!["M".into()]),
            ])
            .to_json(),
            json!({ "$or": [
                { "data": { "creators": { "address": "9", "verified": true } } },
                { "mint": ["M"] }
            ] })
        );
        assert_eq!(
            Filter::contains("storeIds", "1").to_json(),
            json!({ "storeIds": { "$in": ["1"] } })
        );
    }

    #[test]
    fn test_field_filters() {
        let doc = artwork();
        assert!(Filter::id("art").matches(&doc));
        assert!(!Filter::id("other").matches(&doc));
        assert!(Filter::field_in("mint", vec!["X".into(), "M".into()]).matches(&doc));
        assert!(!Filter::field_in("mint", Vec::new()).matches(&doc));
        assert!(Filter::field_in("data.name", vec!["piece".into()]).matches(&doc));
        assert!(Filter::contains("storeIds", "2").matches(&doc));
        assert!(!Filter::contains("storeIds", "3").matches(&doc));
        assert!(!Filter::contains("mint", "M").matches(&doc));
    }

    #[test]
    fn test_creator_filter_matches_one_entry() {
        let doc = artwork();
        let creator = |address: &str, verified: Option<bool>| Filter::Creator {
            address: Some(address.to_string()),
            verified,
        };
        assert!(creator("9", None).matches(&doc));
        assert!(!creator("9", Some(true)).matches(&doc));
        assert!(creator("8", Some(true)).matches(&doc));
        assert!(!creator("7", None).matches(&doc));
        assert!(Filter::Creator { address: None, verified: Some(true) }.matches(&doc));
        assert!(!Filter::Creator { address: None, verified: None }.matches(&json!({ "_id": "x" })));
    }

    #[test]
    fn test_combinators() {
        let doc = artwork();
        assert!(!Filter::Or(Vec::new()).matches(&doc));
        assert!(Filter::And(Vec::new()).matches(&doc));
        assert!(Filter::Or(vec![Filter::id("nope"), Filter::id("art")]).matches(&doc));
        assert!(!Filter::And(vec![Filter::id("nope"), Filter::id("art")]).matches(&doc));
    }
}
