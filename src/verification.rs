//! Read-only payment-status viewer.
//!
//! Decodes a verification payload delivered either URL-encoded in a query
//! parameter or as manually pasted JSON, and renders it into a view model
//! where every field independently defaults to a placeholder. No state
//! transitions, no network calls.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder shown for any absent display field.
const PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerParam {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Value")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyData {
    #[serde(rename = "enquiryReferenceId")]
    pub enquiry_reference_id: Option<String>,
    #[serde(rename = "CustomerName")]
    pub customer_name: Option<String>,
    #[serde(rename = "BillNumber")]
    pub bill_number: Option<String>,
    #[serde(rename = "BillPeriod")]
    pub bill_period: Option<String>,
    #[serde(rename = "BillDate")]
    pub bill_date: Option<String>,
    #[serde(rename = "BillDueDate")]
    pub bill_due_date: Option<String>,
    /// Arrives as a number or a numeric string depending on the variant.
    #[serde(rename = "BillAmount")]
    pub bill_amount: Option<Value>,
    #[serde(rename = "CustomerParamsDetails")]
    pub customer_params_details: Option<Vec<CustomerParam>>,
    #[serde(rename = "BillDetails")]
    pub bill_details: Option<Vec<Value>>,
    #[serde(rename = "AdditionalDetails")]
    pub additional_details: Option<Vec<Value>>,
}

/// Raw verification payload as delivered by the payment rail.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyPayload {
    pub statuscode: Option<String>,
    pub status: Option<String>,
    pub data: Option<VerifyData>,
    pub timestamp: Option<String>,
    pub ipay_uuid: Option<String>,
    pub orderid: Option<String>,
    pub environment: Option<String>,
    pub actcode: Option<String>,
    #[serde(rename = "internalCode")]
    pub internal_code: Option<String>,
}

/// Styling bucket derived from the status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusBadge {
    Success,
    Pending,
    Failure,
}

impl StatusBadge {
    /// `TXN` is success, `PEN` is pending, anything else (including an
    /// absent code) is failure styling. Comparison is case-insensitive.
    pub fn from_code(code: Option<&str>) -> Self {
        match code.unwrap_or("").to_uppercase().as_str() {
            "TXN" => StatusBadge::Success,
            "PEN" => StatusBadge::Pending,
            _ => StatusBadge::Failure,
        }
    }
}

/// Decodes the payload, preferring the URL-carried value. Manual paste is
/// attempted only when the URL value is absent or fails to decode.
pub fn decode_payload(query: Option<&str>, manual: Option<&str>) -> Option<VerifyPayload> {
    if let Some(raw) = query {
        if let Ok(payload) = serde_json::from_str(raw) {
            return Some(payload);
        }
    }
    manual.and_then(|raw| serde_json::from_str(raw).ok())
}

/// Formats an amount with Indian-system digit grouping and two decimals,
/// e.g. `150000` becomes `1,50,000.00`.
pub fn format_inr(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let grouped = if whole.len() <= 3 {
        whole.to_string()
    } else {
        // Last three digits, then groups of two
        let (head, tail) = whole.split_at(whole.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac)
}

fn amount_of(v: Option<&Value>) -> f64 {
    match v {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn display(v: &Option<String>) -> String {
    match v {
        Some(s) if !s.is_empty() => s.clone(),
        _ => PLACEHOLDER.to_string(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerParamView {
    pub name: String,
    pub value: String,
}

/// Render-safe projection of a verification payload. When no payload could
/// be decoded, `present` is false and the caller shows the paste affordance
/// instead of data.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationView {
    pub present: bool,
    pub badge: StatusBadge,
    pub statuscode: String,
    pub status: String,
    pub enquiry_reference_id: String,
    pub customer_name: String,
    pub bill_number: String,
    pub bill_period: String,
    pub bill_date: String,
    pub bill_due_date: String,
    pub amount: String,
    pub customer_params: Vec<CustomerParamView>,
    pub bill_details: Vec<Value>,
    pub additional_details: Vec<Value>,
    pub timestamp: String,
    pub uuid: String,
    pub order_id: String,
    pub environment: String,
    pub act_code: String,
    pub internal_code: String,
}

impl VerificationView {
    pub fn from_payload(payload: Option<VerifyPayload>) -> Self {
        let present = payload.is_some();
        let payload = payload.unwrap_or_default();
        let data = payload.data.unwrap_or_default();

        Self {
            present,
            badge: StatusBadge::from_code(payload.statuscode.as_deref()),
            statuscode: display(&payload.statuscode),
            status: display(&payload.status),
            enquiry_reference_id: display(&data.enquiry_reference_id),
            customer_name: display(&data.customer_name),
            bill_number: display(&data.bill_number),
            bill_period: display(&data.bill_period),
            bill_date: display(&data.bill_date),
            bill_due_date: display(&data.bill_due_date),
            amount: format_inr(amount_of(data.bill_amount.as_ref())),
            customer_params: data
                .customer_params_details
                .unwrap_or_default()
                .into_iter()
                .map(|p| CustomerParamView {
                    name: display(&p.name),
                    value: display(&p.value),
                })
                .collect(),
            bill_details: data.bill_details.unwrap_or_default(),
            additional_details: data.additional_details.unwrap_or_default(),
            timestamp: display(&payload.timestamp),
            uuid: display(&payload.ipay_uuid),
            order_id: display(&payload.orderid),
            environment: display(&payload.environment),
            act_code: display(&payload.actcode),
            internal_code: display(&payload.internal_code),
        }
    }
}
