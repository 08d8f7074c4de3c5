//! Field-level change records stored in the `*_logs` tables.
//!
//! A log row's `changes` column holds `{"field": {"from": old, "to": new}}`
//! for every field an edit actually altered.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Old and new value of one field.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FieldChange {
    pub from: Value,
    pub to: Value,
}

/// Changes keyed by column name, in column-name order.
pub type ChangeSet = BTreeMap<String, FieldChange>;

/// Compare a partial update against the current record.
///
/// `update` is a JSON object holding only the fields being set (the shape the
/// `*Update` builders serialize to). Fields whose new value equals the current
/// one are left out. Fields absent from `current` are compared against `null`.
#[must_use]
pub fn diff_update(current: &Value, update: &Value) -> ChangeSet {
    let Some(fields) = update.as_object() else {
        return ChangeSet::new();
    };
    fields
        .iter()
        .filter_map(|(key, to)| {
            let from = current.get(key).cloned().unwrap_or(Value::Null);
            (from != *to).then(|| {
                (
                    key.clone(),
                    FieldChange {
                        from,
                        to: to.clone(),
                    },
                )
            })
        })
        .collect()
}

/// A change set with a single entry.
#[must_use]
pub fn single_change(field: &str, from: Value, to: Value) -> ChangeSet {
    ChangeSet::from([(field.to_string(), FieldChange { from, to })])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn unchanged_fields_are_dropped() {
        let current = json!({"business_name": "Shree Textiles", "city": "Surat", "state": null});
        let update = json!({"business_name": "Shree Textiles", "city": "Navsari", "state": "Gujarat"});
        let changes = diff_update(&current, &update);
        assert_eq!(changes.len(), 2);
        assert_eq!(
            changes["city"],
            FieldChange {
                from: json!("Surat"),
                to: json!("Navsari")
            }
        );
        assert_eq!(changes["state"].from, Value::Null);
    }

    #[test]
    fn clearing_a_field_is_recorded() {
        let current = json!({"email": "a@b.in"});
        let update = json!({"email": null});
        let changes = diff_update(&current, &update);
        assert_eq!(changes["email"].to, Value::Null);
    }

    #[test]
    fn serialized_shape() {
        let changes = single_change("inventory_classification", Value::Null, json!("good"));
        assert_eq!(
            serde_json::to_value(&changes).unwrap(),
            json!({"inventory_classification": {"from": null, "to": "good"}})
        );
    }
}
