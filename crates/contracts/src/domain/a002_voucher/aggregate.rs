use crate::dashboards::d400_sales_forecast::SaleRecord;
use crate::domain::common::AggregateRoot;
use crate::shared::lenient::{self, SaleDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Completed sale (voucher) recorded at the point of sale.
///
/// Fields the backend does not interpret are kept verbatim, either in a
/// `Value` field or in `extra`, so one oddly typed entry never makes the
/// whole store unreadable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: i64,
    /// Number printed on the voucher
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voucher_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<Value>,
    #[serde(
        default,
        deserialize_with = "lenient::sale_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<SaleDate>,
    /// Line items as posted by the sale screen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Value>,
    #[serde(
        default,
        deserialize_with = "lenient::amount",
        serialize_with = "lenient::serialize_amount"
    )]
    pub sub_total: f64,
    #[serde(
        default,
        deserialize_with = "lenient::amount",
        serialize_with = "lenient::serialize_amount"
    )]
    pub tax: f64,
    /// Tax percentage applied when the voucher was issued
    #[serde(
        default,
        deserialize_with = "lenient::optional_amount",
        serialize_with = "lenient::serialize_optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub tax_rate: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::amount",
        serialize_with = "lenient::serialize_amount"
    )]
    pub grand_total: f64,
    #[serde(
        default,
        deserialize_with = "lenient::flag",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub deleted: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Voucher {
    /// Build a voucher from a posted JSON object, assigning `id` when the
    /// object carries no integer id of its own.
    pub fn from_json(mut body: Map<String, Value>, fallback_id: i64) -> Result<Self, String> {
        let id = body.get("id").and_then(Value::as_i64).unwrap_or(fallback_id);
        body.insert("id".to_string(), Value::from(id));
        serde_json::from_value(Value::Object(body)).map_err(|e| format!("Invalid voucher: {}", e))
    }

    /// Shallow merge of `changes` into this voucher. The id never changes.
    pub fn merged(&self, changes: Map<String, Value>) -> Result<Self, String> {
        let mut current = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return Err("Voucher is not a JSON object".into()),
            Err(e) => return Err(format!("Invalid voucher: {}", e)),
        };
        for (key, value) in changes {
            if key != "id" {
                current.insert(key, value);
            }
        }
        Self::from_json(current, self.id)
    }

    /// Projection consumed by the sales forecast
    pub fn as_sale_record(&self) -> SaleRecord {
        SaleRecord {
            date: self.date.clone(),
            grand_total: self.grand_total,
            deleted: self.deleted,
        }
    }
}

impl AggregateRoot for Voucher {
    fn id(&self) -> i64 {
        self.id
    }
    fn aggregate_index() -> &'static str {
        "a002"
    }
    fn collection_name() -> &'static str {
        "vouchers"
    }
    fn element_name() -> &'static str {
        "Voucher"
    }
    fn list_name() -> &'static str {
        "Vouchers"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_from_json_assigns_id_and_keeps_extra_fields() {
        let voucher = Voucher::from_json(
            body(json!({
                "username": "Su Su",
                "phoneNumber": "0912345678",
                "voucherId": "VC-0042",
                "date": "2024-03-01T08:00:00.000Z",
                "items": [{"product": {"name": "Tea"}, "quantity": 2, "cost": 1000}],
                "subTotal": 1000,
                "tax": 80,
                "taxRate": 8,
                "grandTotal": 1080,
                "note": "paid by card"
            })),
            5,
        )
        .unwrap();

        assert_eq!(voucher.id, 5);
        assert_eq!(voucher.grand_total, 1080.0);
        assert_eq!(voucher.tax_rate, Some(8.0));
        assert_eq!(voucher.items.as_ref().and_then(Value::as_array).map(Vec::len), Some(1));
        assert_eq!(voucher.extra.get("note"), Some(&json!("paid by card")));

        let out = serde_json::to_value(&voucher).unwrap();
        assert_eq!(out["grandTotal"], json!(1080));
        assert_eq!(out["taxRate"], json!(8));
        assert_eq!(out["note"], json!("paid by card"));
    }

    #[test]
    fn test_from_json_keeps_posted_id() {
        let voucher = Voucher::from_json(body(json!({"id": 17, "grandTotal": 10})), 3).unwrap();
        assert_eq!(voucher.id, 17);
    }

    #[test]
    fn test_merged_soft_delete() {
        let voucher = Voucher::from_json(body(json!({"grandTotal": 50, "date": "2024-01-01"})), 1)
            .unwrap();
        let deleted = voucher
            .merged(body(json!({"deleted": true, "id": 99})))
            .unwrap();
        assert_eq!(deleted.id, 1);
        assert!(deleted.deleted);
        assert_eq!(deleted.grand_total, 50.0);
    }

    #[test]
    fn test_odd_contact_fields_are_kept_verbatim() {
        let voucher = Voucher::from_json(
            body(json!({
                "id": 2,
                "date": "2024-03-02",
                "grandTotal": 150,
                "username": 42,
                "phoneNumber": 912345678,
                "items": "[]"
            })),
            1,
        )
        .unwrap();
        assert_eq!(voucher.phone_number, Some(json!(912345678)));

        let out = serde_json::to_value(&voucher).unwrap();
        assert_eq!(out["username"], json!(42));
        assert_eq!(out["phoneNumber"], json!(912345678));
        assert_eq!(out["items"], json!("[]"));
    }

    #[test]
    fn test_round_trip_keeps_integer_spelling() {
        let raw = json!({
            "id": 4,
            "date": 1709294400000_i64,
            "subTotal": 100,
            "tax": 8,
            "grandTotal": 108,
            "note": "window seat"
        });
        let voucher: Voucher = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&voucher).unwrap(), raw);
    }

    #[test]
    fn test_numeric_string_amount_is_written_as_number() {
        let voucher: Voucher =
            serde_json::from_value(json!({"id": "6", "grandTotal": "250"})).unwrap();
        assert_eq!(voucher.id, 6);
        let out = serde_json::to_value(&voucher).unwrap();
        assert_eq!(out["grandTotal"], json!(250));
    }

    #[test]
    fn test_as_sale_record() {
        let voucher = Voucher::from_json(body(json!({"grandTotal": "250", "date": "2024-02-02T10:00"})), 1)
            .unwrap();
        let record = voucher.as_sale_record();
        assert_eq!(record.day().as_deref(), Some("2024-02-02"));
        assert_eq!(record.grand_total, 250.0);
    }
}
