//! Typed payloads of the JSON columns, with tolerant parsers.
//!
//! Rows written by older form versions hold these columns as JSON strings,
//! arrays, or single objects. Each parser accepts every shape seen in the
//! tables and returns an empty collection for anything it cannot read.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One `{size, quantity}` entry of a stitching challan's `product_size`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SizeQuantity {
    pub size: String,
    pub quantity: i64,
}

/// One `{quality_name, rate}` entry of a weaver challan's `quality_details`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct QualityDetail {
    #[serde(default)]
    pub quality_name: Option<String>,
    #[serde(default)]
    pub rate: Option<f64>,
}

/// One line item of a purchase order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PurchaseOrderItem {
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub total_price: f64,
}

impl PurchaseOrderItem {
    /// Line total; a missing `total_price` falls back to `quantity × unit_price`.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        if self.total_price == 0.0 {
            self.quantity * self.unit_price
        } else {
            self.total_price
        }
    }
}

/// Unwrap a JSON column that may hold its payload as an encoded string.
fn decode(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => serde_json::from_str(s).ok(),
        other => Some(other.clone()),
    }
}

fn single_size(value: &Value) -> Option<SizeQuantity> {
    let obj = value.as_object()?;
    let size = match obj.get("size")? {
        Value::String(s) if !s.is_empty() => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let quantity = match obj.get("quantity")? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    Some(SizeQuantity { size, quantity })
}

/// Normalize a `product_size` column into `{size, quantity}` entries.
///
/// Accepts NULL, a JSON string encoding an array or a single object, an array,
/// or a single object. A single object needs a non-empty `size` and a present
/// `quantity`. Array elements that do not have that shape are skipped.
#[must_use]
pub fn parse_size_details(value: Option<&Value>) -> Vec<SizeQuantity> {
    let Some(decoded) = value.and_then(decode) else {
        return Vec::new();
    };
    match &decoded {
        Value::Array(items) => items.iter().filter_map(single_size).collect(),
        Value::Object(_) => single_size(&decoded).into_iter().collect(),
        _ => Vec::new(),
    }
}

/// Normalize a `quality_details` column. Non-array payloads read as empty.
#[must_use]
pub fn parse_quality_details(value: Option<&Value>) -> Vec<QualityDetail> {
    match value.and_then(decode) {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}

/// Normalize a purchase order `items` column.
#[must_use]
pub fn parse_po_items(value: Option<&Value>) -> Vec<PurchaseOrderItem> {
    match value.and_then(decode) {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}

/// Normalize a text-array column (`batch_number`, `expense_for`, `cloth_type`).
///
/// A bare non-JSON string is treated as a one-element list.
#[must_use]
pub fn parse_string_list(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Vec::new();
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) if !s.is_empty() => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Ok(Value::String(s)) if !s.is_empty() => vec![s],
        _ => vec![raw.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn sq(size: &str, quantity: i64) -> SizeQuantity {
        SizeQuantity {
            size: size.into(),
            quantity,
        }
    }

    #[rstest]
    #[case::null(json!(null), vec![])]
    #[case::array(json!([{"size": "M", "quantity": 10}, {"size": "L", "quantity": 4}]), vec![sq("M", 10), sq("L", 4)])]
    #[case::encoded_array(json!("[{\"size\":\"XL\",\"quantity\":2}]"), vec![sq("XL", 2)])]
    #[case::single_object(json!({"size": "S", "quantity": 7}), vec![sq("S", 7)])]
    #[case::encoded_object(json!("{\"size\":\"S\",\"quantity\":0}"), vec![sq("S", 0)])]
    #[case::empty_size(json!({"size": "", "quantity": 7}), vec![])]
    #[case::missing_quantity(json!({"size": "M"}), vec![])]
    #[case::garbage_string(json!("not json"), vec![])]
    #[case::number(json!(42), vec![])]
    #[case::skips_bad_elements(json!([{"size": "M", "quantity": 1}, {"oops": true}]), vec![sq("M", 1)])]
    fn size_details_shapes(#[case] input: Value, #[case] expected: Vec<SizeQuantity>) {
        assert_eq!(parse_size_details(Some(&input)), expected);
    }

    #[test]
    fn size_details_missing_column() {
        assert!(parse_size_details(None).is_empty());
    }

    #[test]
    fn quality_details_tolerates_partial_entries() {
        let raw = json!([{"quality_name": "Cotton 60", "rate": 42.5}, {"quality_name": "Rayon"}, {}]);
        let parsed = parse_quality_details(Some(&raw));
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0].rate, Some(42.5));
        assert_eq!(parsed[1].rate, None);
        assert_eq!(parsed[2].quality_name, None);
    }

    #[test]
    fn quality_details_non_array_is_empty() {
        assert!(parse_quality_details(Some(&json!({"quality_name": "x"}))).is_empty());
    }

    #[test]
    fn po_item_total_falls_back_to_quantity_times_price() {
        let item = PurchaseOrderItem {
            item_name: "Thread".into(),
            quantity: 3.0,
            unit_price: 12.5,
            ..Default::default()
        };
        assert!((item.line_total() - 37.5).abs() < f64::EPSILON);
    }

    #[test]
    fn string_list_shapes() {
        assert_eq!(parse_string_list(Some("[\"B-1\",\"B-2\"]")), vec!["B-1", "B-2"]);
        assert_eq!(parse_string_list(Some("B-9")), vec!["B-9"]);
        assert_eq!(parse_string_list(Some("")), Vec::<String>::new());
        assert_eq!(parse_string_list(None), Vec::<String>::new());
    }
}
