use crate::config::UpstreamMode;
use crate::errors::AppError;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;

const BILLERS_PATH: &str = "/marketplace/utilityPayments/billers";
const BILLER_DETAILS_PATH: &str = "/marketplace/utilityPayments/billerDetails";
const PRE_ENQUIRY_PATH: &str = "/marketplace/utilityPayments/prePaymentEnquiry";

/// Client for the BBPS billing aggregator.
///
/// Issues one POST per operation, either directly with the `X-Ipay-*`
/// authentication headers or through a delegated internal proxy with no
/// added authentication, depending on the configured mode. Responses are
/// never cached (`Cache-Control: no-store` on every request).
#[derive(Clone)]
pub struct AggregatorClient {
    client: reqwest::Client,
    mode: UpstreamMode,
}

impl AggregatorClient {
    pub fn new(mode: UpstreamMode) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AppError::ExternalApi(format!("Failed to create aggregator client: {}", e))
            })?;

        Ok(Self { client, mode })
    }

    /// Lists billers for one page of the given category.
    ///
    /// Returns the raw JSON envelope; normalization happens at the route
    /// layer.
    pub async fn list_billers(
        &self,
        page_number: u32,
        records_per_page: u32,
        category_key: &str,
    ) -> Result<Value, AppError> {
        let body = json!({
            "pagination": {
                "pageNumber": page_number,
                "recordsPerPage": records_per_page,
            },
            "filters": {
                "categoryKey": category_key,
                "updatedAfterDate": "",
            },
        });
        self.post(BILLERS_PATH, &body).await
    }

    /// Fetches one biller's input-parameter schema and payment-mode list.
    pub async fn biller_details(&self, biller_id: &str) -> Result<Value, AppError> {
        let body = json!({ "billerId": biller_id });
        self.post(BILLER_DETAILS_PATH, &body).await
    }

    /// Performs the pre-payment enquiry for a filled-in parameter set.
    ///
    /// The fixed initChannel/deviceInfo/remarks block is part of the
    /// aggregator's wire contract for agent-initiated enquiries.
    pub async fn pre_payment_enquiry(
        &self,
        biller_id: &str,
        input_parameters: &HashMap<String, String>,
        external_ref: &str,
        transaction_amount: f64,
    ) -> Result<Value, AppError> {
        let body = json!({
            "billerId": biller_id,
            "initChannel": "AGT",
            "externalRef": external_ref,
            "inputParameters": input_parameters,
            "deviceInfo": { "ip": "0.0.0.0", "mac": "BC-BE-33-65-E6-AC" },
            "remarks": { "param1": 9999999999u64 },
            "transactionAmount": transaction_amount,
        });
        self.post(PRE_ENQUIRY_PATH, &body).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, AppError> {
        let url = format!("{}{}", self.mode.base_url(), path);
        tracing::info!("POST aggregator {}", url);

        let mut request = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .header("Cache-Control", "no-store")
            .json(body);

        // Delegated mode relies on the proxy to authenticate
        if let UpstreamMode::Direct { credentials, .. } = &self.mode {
            request = request
                .header("X-Ipay-Auth-Code", "1")
                .header("X-Ipay-Client-Id", &credentials.client_id)
                .header("X-Ipay-Client-Secret", &credentials.client_secret)
                .header("X-Ipay-Endpoint-Ip", &credentials.endpoint_ip)
                .header("X-Ipay-Outlet-Id", &credentials.outlet_id);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Aggregator request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            // Relay the raw upstream body rather than interpreting it
            let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
            return Err(AppError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let data = response.json().await.map_err(|e| {
            AppError::ExternalApi(format!("Failed to parse aggregator response: {}", e))
        })?;

        Ok(data)
    }
}
