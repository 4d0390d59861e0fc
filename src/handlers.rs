use crate::aggregator::AggregatorClient;
use crate::config::Config;
use crate::errors::AppError;
use crate::models::*;
use crate::normalize;
use crate::verification::{self, VerificationView};
use axum::{extract::Query, extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
///
/// Configuration is assembled once at startup; handlers never read the
/// process environment.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub aggregator: AggregatorClient,
}

const DEFAULT_PAGE_NUMBER: u32 = 1;
const DEFAULT_RECORDS_PER_PAGE: u32 = 50;

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "rust-bbps-api",
            "version": "0.1.0"
        })),
    )
}

/// POST /bbps/billers
///
/// Lists billers for one page of the insurance category. Every body field
/// has a default, so a malformed or empty body is tolerated by substituting
/// an empty request.
pub async fn list_billers(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<BillerPage>, AppError> {
    let req: BillersRequest = serde_json::from_str(&body).unwrap_or_default();

    let pagination = req.pagination.unwrap_or_default();
    let page_number = pagination.page_number.unwrap_or(DEFAULT_PAGE_NUMBER);
    let records_per_page = pagination
        .records_per_page
        .unwrap_or(DEFAULT_RECORDS_PER_PAGE);
    let category_key = req
        .filters
        .and_then(|f| f.category_key)
        .unwrap_or_else(|| state.config.default_category_key.clone());

    tracing::info!(
        "POST /bbps/billers - page {} ({} per page, category {})",
        page_number,
        records_per_page,
        category_key
    );

    let envelope = state
        .aggregator
        .list_billers(page_number, records_per_page, &category_key)
        .await?;
    let page = normalize::normalize_biller_page(&envelope, page_number)?;

    tracing::info!(
        "Returning {} billers (page {}/{})",
        page.records.len(),
        page.meta.current_page,
        page.meta.total_pages
    );
    Ok(Json(page))
}

/// POST /bbps/biller-details
///
/// Fetches and normalizes one biller's required-field schema. Missing
/// `billerId` is a 400; a body that is not JSON surfaces as a 500 parse
/// error, as this route has no defaults to fall back on.
pub async fn biller_details(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<BillerDetails>, AppError> {
    let req: BillerDetailsRequest =
        serde_json::from_str(&body).map_err(|e| AppError::Internal(e.to_string()))?;

    let biller_id = req
        .biller_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("billerId is required".to_string()))?;

    tracing::info!("POST /bbps/biller-details - biller {}", biller_id);

    let envelope = state.aggregator.biller_details(&biller_id).await?;
    let details = normalize::normalize_biller_details(&envelope)?;

    Ok(Json(details))
}

/// POST /bbps/pre-enquiry
///
/// Performs the pre-payment enquiry and returns the normalized result.
/// All fields but `transactionAmount` are required.
pub async fn pre_enquiry(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<EnquiryResult>, AppError> {
    let req: PreEnquiryRequest =
        serde_json::from_str(&body).map_err(|e| AppError::Internal(e.to_string()))?;

    let (biller_id, input_parameters, external_ref) = match (
        req.biller_id.filter(|s| !s.is_empty()),
        req.input_parameters,
        req.external_ref.filter(|s| !s.is_empty()),
    ) {
        (Some(b), Some(p), Some(r)) => (b, p, r),
        _ => {
            return Err(AppError::BadRequest(
                "billerId, inputParameters, externalRef are required".to_string(),
            ))
        }
    };

    tracing::info!(
        "POST /bbps/pre-enquiry - biller {} (ref {})",
        biller_id,
        external_ref
    );

    let envelope = state
        .aggregator
        .pre_payment_enquiry(
            &biller_id,
            &input_parameters,
            &external_ref,
            req.transaction_amount.unwrap_or(0.0),
        )
        .await?;
    let result = normalize::normalize_enquiry(&envelope, &external_ref);

    tracing::info!(
        "Enquiry {} resolved, amount {}",
        result.enquiry_reference_id,
        result.amount
    );
    Ok(Json(result))
}

#[derive(Debug, Default, Deserialize)]
pub struct VerifyQuery {
    /// URL-carried encoded JSON blob (the extractor percent-decodes it).
    pub payload: Option<String>,
}

/// GET /bbps/verify-payment
///
/// Read-only status viewer. Decodes the payload from the `payload` query
/// parameter, falling back to a manually pasted request body only when the
/// query value is absent or undecodable. Never calls the aggregator.
pub async fn verify_payment(
    Query(query): Query<VerifyQuery>,
    body: String,
) -> Json<VerificationView> {
    let manual = if body.trim().is_empty() {
        None
    } else {
        Some(body.as_str())
    };
    let payload = verification::decode_payload(query.payload.as_deref(), manual);
    Json(VerificationView::from_payload(payload))
}
