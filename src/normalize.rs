//! Normalization of heterogeneous aggregator response shapes.
//!
//! The aggregator's provider variants disagree on field names and nesting.
//! Each entity gets one dedicated normalization function that is total over
//! the declared accepted shapes (absent fields fall back per contract) and
//! fails closed with a decode error on anything else, instead of silently
//! producing a half-populated object.

use crate::errors::AppError;
use crate::models::{
    Biller, BillerDetails, BillerMeta, BillerPage, DataType, EnquiryResult, InputParameter,
    PaymentAmountExactness,
};
use serde_json::Value;

/// Fixed payment-mode set substituted when upstream supplies none.
pub const DEFAULT_PAYMENT_MODES: [&str; 7] = [
    "UPI",
    "Internet_Banking",
    "Debit_Card",
    "Credit_Card",
    "Account_Transfer",
    "NEFT",
    "Bharat_QR",
];

/// Coverage used when neither city nor state carries a usable value.
pub const DEFAULT_COVERAGE: &str = "PAN India";

/// String or number field, coerced to an owned string.
fn string_like(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First present key on `obj` that holds a string-like value.
fn first_string(obj: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find_map(string_like)
        .filter(|s| !s.is_empty())
}

/// Number or numeric-string field.
fn number_like(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Loose truthiness matching the aggregator's habit of sending booleans as
/// numbers or strings.
fn truthy(v: Option<&Value>) -> bool {
    match v {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Some(Value::String(s)) => !s.is_empty(),
        _ => false,
    }
}

/// Meta field: missing, zero, or non-numeric collapses to the default.
fn meta_field(meta: &Value, key: &str, default: u64) -> u64 {
    meta.get(key)
        .and_then(number_like)
        .map(|f| f as u64)
        .filter(|n| *n != 0)
        .unwrap_or(default)
}

/// Coverage fallback chain: city, else state, else the nationwide default.
/// A value of `"-"` is treated as absent. Never returns an empty string.
fn coverage_of(record: &Value) -> String {
    for key in ["coverageCity", "coverageState"] {
        if let Some(v) = record.get(key).and_then(|v| v.as_str()) {
            if !v.is_empty() && v != "-" {
                return v.to_string();
            }
        }
    }
    DEFAULT_COVERAGE.to_string()
}

fn normalize_biller(record: &Value) -> Result<Biller, AppError> {
    let biller_id = first_string(record, &["billerId", "id"]).ok_or_else(|| {
        AppError::ExternalApi("Aggregator biller record missing billerId".to_string())
    })?;
    let biller_name = first_string(record, &["billerName", "name"]).ok_or_else(|| {
        AppError::ExternalApi("Aggregator biller record missing billerName".to_string())
    })?;

    // Explicit boolean wins; otherwise availability is the status string
    // equalling "ACTIVE" exactly.
    let is_available = match record.get("isAvailable") {
        Some(Value::Bool(b)) => *b,
        _ => record
            .get("billerStatus")
            .and_then(|v| v.as_str())
            .map(|s| s == "ACTIVE")
            .unwrap_or(false),
    };

    Ok(Biller {
        biller_id,
        biller_name,
        is_available,
        coverage: coverage_of(record),
        icon_url: record
            .get("iconUrl")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    })
}

/// Normalizes the biller-directory envelope.
///
/// The records list is accepted at `data.records`, `records`, or `data`
/// (first array wins); an envelope with no records array anywhere is a
/// decode error. Meta fields are always populated, defaulting to the
/// requested page and the observed record count.
pub fn normalize_biller_page(envelope: &Value, requested_page: u32) -> Result<BillerPage, AppError> {
    let list = [
        envelope.get("data").and_then(|d| d.get("records")),
        envelope.get("records"),
        envelope.get("data"),
    ]
    .into_iter()
    .flatten()
    .find_map(Value::as_array)
    .ok_or_else(|| {
        AppError::ExternalApi("Aggregator billers response has no records list".to_string())
    })?;

    let records = list
        .iter()
        .map(normalize_biller)
        .collect::<Result<Vec<_>, _>>()?;

    let empty = Value::Object(Default::default());
    let meta_raw = envelope
        .get("data")
        .and_then(|d| d.get("meta"))
        .unwrap_or(&empty);

    let count = records.len() as u64;
    let meta = BillerMeta {
        total_pages: meta_field(meta_raw, "totalPages", 1) as u32,
        current_page: meta_field(meta_raw, "currentPage", requested_page.max(1) as u64) as u32,
        total_records: meta_field(meta_raw, "totalRecords", count),
        records_on_current_page: meta_field(meta_raw, "recordsOnCurrentPage", count),
        record_from: meta_field(meta_raw, "recordFrom", 1),
        record_to: meta_field(meta_raw, "recordTo", count),
    };

    Ok(BillerPage { records, meta })
}

fn normalize_parameter(p: &Value) -> InputParameter {
    let desc = p
        .get("desc")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    let raw_name = first_string(p, &["name", "paramName"]).unwrap_or_default();

    InputParameter {
        // Display label prefers the description, falling back to the raw name
        name: desc.clone().unwrap_or_else(|| raw_name.clone()),
        param_name: raw_name,
        data_type: match p.get("inputType").and_then(|v| v.as_str()) {
            Some("NUMERIC") => DataType::Numeric,
            _ => DataType::Alphanumeric,
        },
        min_length: p
            .get("minLength")
            .and_then(number_like)
            .map(|f| f as u32)
            .unwrap_or(0),
        max_length: p
            .get("maxLength")
            .and_then(number_like)
            .map(|f| f as u32)
            .filter(|n| *n != 0)
            .unwrap_or(256),
        regex: p
            .get("regex")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        mandatory: truthy(p.get("mandatory")),
        desc,
    }
}

/// Normalizes the biller-details envelope.
///
/// The details object is `data` or the root; the parameter list arrives
/// under `inputParameters` or `parameters`. An absent list is an empty
/// schema, but a present non-array fails closed.
pub fn normalize_biller_details(envelope: &Value) -> Result<BillerDetails, AppError> {
    let details = envelope.get("data").unwrap_or(envelope);
    if !details.is_object() {
        return Err(AppError::ExternalApi(
            "Aggregator biller-details response is not an object".to_string(),
        ));
    }

    let params_src = ["inputParameters", "parameters"]
        .iter()
        .find_map(|k| details.get(*k))
        .filter(|v| !v.is_null());
    let input_parameters = match params_src {
        Some(v) => v
            .as_array()
            .ok_or_else(|| {
                AppError::ExternalApi(
                    "Aggregator biller-details inputParameters is not a list".to_string(),
                )
            })?
            .iter()
            .map(normalize_parameter)
            .collect(),
        None => Vec::new(),
    };

    // Modes arrive as plain strings or as {name} objects
    let mut payment_modes: Vec<String> = details
        .get("paymentModes")
        .and_then(|v| v.as_array())
        .map(|modes| {
            modes
                .iter()
                .filter_map(|m| first_string(m, &["name"]).or_else(|| string_like(m)))
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();
    if payment_modes.is_empty() {
        payment_modes = DEFAULT_PAYMENT_MODES.iter().map(|s| s.to_string()).collect();
    }

    Ok(BillerDetails {
        input_parameters,
        payment_modes,
        fetch_requirement: first_string(details, &["fetchRequirement"])
            .unwrap_or_else(|| "SUPPORTED".to_string()),
        support_validation: first_string(details, &["supportValidation"])
            .unwrap_or_else(|| "SUPPORTED".to_string()),
        payment_amount_exactness: match details
            .get("paymentAmountExactness")
            .and_then(|v| v.as_str())
        {
            Some("ANY") => PaymentAmountExactness::Any,
            _ => PaymentAmountExactness::Exact,
        },
    })
}

/// Normalizes the pre-payment enquiry envelope.
///
/// Every field has a declared fallback, so this is total: the reference id
/// defaults to the client-generated external reference and the amount to 0.
pub fn normalize_enquiry(envelope: &Value, external_ref: &str) -> EnquiryResult {
    let e = envelope.get("data").unwrap_or(envelope);

    EnquiryResult {
        enquiry_reference_id: first_string(e, &["enquiryReferenceId"])
            .unwrap_or_else(|| external_ref.to_string()),
        amount: e.get("amount").and_then(number_like).unwrap_or(0.0),
        customer_name: first_string(e, &["customerName"]),
        policy_status: first_string(e, &["policyStatus"]),
        due_date: first_string(e, &["dueDate"]),
    }
}
