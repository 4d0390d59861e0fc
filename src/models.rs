use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============ Normalized Aggregator Models ============

/// A selectable insurance provider from the biller directory.
///
/// Created fresh on every paginated fetch; nothing is cached across pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Biller {
    /// Opaque identifier, stable key used in all subsequent calls.
    pub biller_id: String,
    /// Display name.
    pub biller_name: String,
    /// Unavailable billers are shown but not selectable.
    pub is_available: bool,
    /// Geographic descriptor (city, else state, else "PAN India").
    pub coverage: String,
    /// Optional provider icon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// Data type tag for a biller input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataType {
    Numeric,
    Alphanumeric,
}

/// One field descriptor from a biller's required-input schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputParameter {
    /// Human-facing label (falls back to the machine name upstream).
    pub name: String,
    /// Machine field name keyed in the enquiry parameter map.
    pub param_name: String,
    pub data_type: DataType,
    pub min_length: u32,
    pub max_length: u32,
    /// Optional validation pattern supplied by the biller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    pub mandatory: bool,
    /// Optional human description shown as a hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

/// Whether the biller accepts only the enquired amount or any amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentAmountExactness {
    Exact,
    Any,
}

/// The schema of one biller's required fields, fetched after selection.
///
/// `input_parameters` ordering is preserved from upstream and drives both
/// form rendering order and validation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillerDetails {
    pub input_parameters: Vec<InputParameter>,
    /// Non-empty; a fixed default set is substituted when upstream
    /// supplies none.
    pub payment_modes: Vec<String>,
    /// Opaque capability flag passed through from upstream.
    pub fetch_requirement: String,
    /// Opaque capability flag passed through from upstream.
    pub support_validation: String,
    pub payment_amount_exactness: PaymentAmountExactness,
}

/// Outcome of a pre-payment enquiry for one (biller, parameters) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryResult {
    /// Correlates to the client-generated external reference when upstream
    /// omits its own.
    pub enquiry_reference_id: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// Pagination meta for the biller directory; always fully populated even
/// when the upstream meta block is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillerMeta {
    pub total_pages: u32,
    pub current_page: u32,
    pub total_records: u64,
    pub records_on_current_page: u64,
    pub record_from: u64,
    pub record_to: u64,
}

/// Success body of `POST /bbps/billers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillerPage {
    pub records: Vec<Biller>,
    pub meta: BillerMeta,
}

// ============ Inbound Route Bodies ============

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInput {
    pub page_number: Option<u32>,
    pub records_per_page: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiltersInput {
    pub category_key: Option<String>,
}

/// Body of `POST /bbps/billers`; every field has a default, so malformed
/// or empty bodies are tolerated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BillersRequest {
    #[serde(default)]
    pub pagination: Option<PaginationInput>,
    #[serde(default)]
    pub filters: Option<FiltersInput>,
}

/// Body of `POST /bbps/biller-details`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillerDetailsRequest {
    pub biller_id: Option<String>,
}

/// Body of `POST /bbps/pre-enquiry`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreEnquiryRequest {
    pub biller_id: Option<String>,
    pub input_parameters: Option<HashMap<String, String>>,
    pub external_ref: Option<String>,
    pub transaction_amount: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn biller_serializes_with_camel_case_wire_names() {
        let b = Biller {
            biller_id: "B1".to_string(),
            biller_name: "Acme Life".to_string(),
            is_available: true,
            coverage: "PAN India".to_string(),
            icon_url: None,
        };
        let v = serde_json::to_value(&b).unwrap();
        assert_eq!(v["billerId"], "B1");
        assert_eq!(v["isAvailable"], true);
        assert!(v.get("iconUrl").is_none());
    }

    #[test]
    fn data_type_uses_upstream_spelling() {
        assert_eq!(
            serde_json::to_value(DataType::Numeric).unwrap(),
            serde_json::json!("NUMERIC")
        );
        assert_eq!(
            serde_json::to_value(PaymentAmountExactness::Exact).unwrap(),
            serde_json::json!("EXACT")
        );
    }

    #[test]
    fn billers_request_tolerates_empty_object() {
        let req: BillersRequest = serde_json::from_str("{}").unwrap();
        assert!(req.pagination.is_none());
        assert!(req.filters.is_none());
    }
}
