//! Four-step premium-payment wizard.
//!
//! The session is a plain synchronous state machine: user actions return
//! typed request values (`BillerPageRequest`, `DetailsRequest`,
//! `EnquiryRequest`) for the caller to execute against the proxy routes,
//! and outcomes are applied back through the `apply_*` methods. Pagination
//! responses carry a generation token so a stale in-flight fetch can never
//! overwrite state after a newer page has been requested.

use crate::models::{Biller, BillerDetails, BillerMeta, EnquiryResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

/// Billers shown per directory page.
pub const WIZARD_PAGE_SIZE: u32 = 9;

/// The fixed payment modes offered at the verification step.
pub const PAYMENT_MODE_CHOICES: [&str; 4] = ["Cash", "UPI", "Card", "Net Banking"];

const EXTERNAL_REF_PREFIX: &str = "SABPE_";

static LAST_REF_TOKEN: AtomicI64 = AtomicI64::new(0);

/// Generates a client-side external reference: a fixed prefix plus a
/// strictly increasing millisecond-timestamp token. The atomic max guards
/// against duplicates when two refs land in the same millisecond.
pub fn next_external_ref() -> String {
    let now = chrono::Utc::now().timestamp_millis();
    let mut prev = LAST_REF_TOKEN.load(Ordering::SeqCst);
    loop {
        let next = now.max(prev + 1);
        match LAST_REF_TOKEN.compare_exchange(prev, next, Ordering::SeqCst, Ordering::SeqCst) {
            Ok(_) => return format!("{}{}", EXTERNAL_REF_PREFIX, next),
            Err(observed) => prev = observed,
        }
    }
}

/// The wizard's four steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardStep {
    SelectBiller,
    EnterDetails,
    VerifyAmount,
    MakePayment,
}

impl WizardStep {
    /// 1-based step index as shown in the progress bar.
    pub fn index(&self) -> u8 {
        match self {
            WizardStep::SelectBiller => 1,
            WizardStep::EnterDetails => 2,
            WizardStep::VerifyAmount => 3,
            WizardStep::MakePayment => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Info,
    Error,
    Success,
}

/// Single advisory alert; setting a new one replaces the prior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    fn info(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Info,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            message: message.into(),
        }
    }
}

/// Request to fetch one directory page; `generation` must be echoed back
/// into `apply_billers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillerPageRequest {
    pub page_number: u32,
    pub records_per_page: u32,
    pub generation: u64,
}

/// Request to fetch the selected biller's field schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsRequest {
    pub biller_id: String,
}

/// Request to run the pre-payment enquiry for the filled-in form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnquiryRequest {
    pub biller_id: String,
    pub input_parameters: HashMap<String, String>,
    pub external_ref: String,
}

/// Read-only summary shown on the terminal step.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentSummary {
    pub provider: String,
    pub amount: f64,
    pub payment_mode: String,
}

/// Client-local, ephemeral wizard session. Held in memory for the duration
/// of the visit; nothing is persisted.
#[derive(Debug)]
pub struct WizardSession {
    step: WizardStep,
    billers: Vec<Biller>,
    meta: Option<BillerMeta>,
    page_number: u32,
    fetch_generation: u64,
    search: String,
    selected_biller: Option<Biller>,
    biller_details: Option<BillerDetails>,
    form_values: HashMap<String, String>,
    enquiry: Option<EnquiryResult>,
    selected_payment_mode: Option<String>,
    loading_billers: bool,
    loading_enquiry: bool,
    alert: Option<Alert>,
}

impl WizardSession {
    /// Creates a session on step 1 and issues the page-1 directory fetch.
    pub fn new() -> (Self, BillerPageRequest) {
        let session = Self {
            step: WizardStep::SelectBiller,
            billers: Vec::new(),
            meta: None,
            page_number: 1,
            fetch_generation: 1,
            search: String::new(),
            selected_biller: None,
            biller_details: None,
            form_values: HashMap::new(),
            enquiry: None,
            selected_payment_mode: None,
            loading_billers: true,
            loading_enquiry: false,
            alert: None,
        };
        let request = BillerPageRequest {
            page_number: 1,
            records_per_page: WIZARD_PAGE_SIZE,
            generation: 1,
        };
        (session, request)
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn billers(&self) -> &[Biller] {
        &self.billers
    }

    pub fn meta(&self) -> Option<&BillerMeta> {
        self.meta.as_ref()
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn selected_biller(&self) -> Option<&Biller> {
        self.selected_biller.as_ref()
    }

    pub fn biller_details(&self) -> Option<&BillerDetails> {
        self.biller_details.as_ref()
    }

    pub fn enquiry(&self) -> Option<&EnquiryResult> {
        self.enquiry.as_ref()
    }

    pub fn selected_payment_mode(&self) -> Option<&str> {
        self.selected_payment_mode.as_deref()
    }

    pub fn is_loading_billers(&self) -> bool {
        self.loading_billers
    }

    pub fn is_loading_enquiry(&self) -> bool {
        self.loading_enquiry
    }

    /// Requests another directory page, clamped to [1, totalPages]. Returns
    /// `None` when the clamped page is the one already shown. Issuing a new
    /// request supersedes any fetch still in flight.
    pub fn request_page(&mut self, page: u32) -> Option<BillerPageRequest> {
        let mut target = page.max(1);
        if let Some(meta) = &self.meta {
            target = target.min(meta.total_pages.max(1));
        }
        if target == self.page_number && !self.billers.is_empty() && !self.loading_billers {
            return None;
        }

        self.page_number = target;
        self.fetch_generation += 1;
        self.loading_billers = true;
        Some(BillerPageRequest {
            page_number: target,
            records_per_page: WIZARD_PAGE_SIZE,
            generation: self.fetch_generation,
        })
    }

    /// Applies a directory-fetch outcome. A response whose generation is
    /// not the latest issued belongs to a superseded request and is
    /// discarded without touching state.
    pub fn apply_billers(
        &mut self,
        generation: u64,
        outcome: Result<(Vec<Biller>, BillerMeta), String>,
    ) {
        if generation != self.fetch_generation {
            return;
        }
        self.loading_billers = false;
        match outcome {
            Ok((records, meta)) => {
                self.billers = records;
                self.meta = Some(meta);
                self.alert = None;
            }
            Err(message) => {
                self.alert = Some(Alert::error(if message.is_empty() {
                    "Failed to load billers".to_string()
                } else {
                    message
                }));
            }
        }
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Case-insensitive substring filter over the already-fetched page;
    /// never triggers a fetch.
    pub fn filtered_billers(&self) -> Vec<&Biller> {
        let q = self.search.to_lowercase();
        self.billers
            .iter()
            .filter(|b| b.biller_name.to_lowercase().contains(&q))
            .collect()
    }

    /// Selects a biller card. Unavailable or unknown billers are a no-op:
    /// no state change and no request. Otherwise shows the transient
    /// loading alert and asks for the biller's schema.
    pub fn select_biller(&mut self, biller_id: &str) -> Option<DetailsRequest> {
        let biller = self
            .billers
            .iter()
            .find(|b| b.biller_id == biller_id && b.is_available)?
            .clone();

        self.alert = Some(Alert::info("Loading policy details form..."));
        self.selected_biller = Some(biller);
        Some(DetailsRequest {
            biller_id: biller_id.to_string(),
        })
    }

    /// Applies the schema-fetch outcome: success clears the alert and
    /// advances to step 2; failure keeps the user on step 1 with an error.
    pub fn apply_biller_details(&mut self, outcome: Result<BillerDetails, String>) {
        match outcome {
            Ok(details) => {
                self.biller_details = Some(details);
                self.alert = None;
                self.step = WizardStep::EnterDetails;
            }
            Err(message) => {
                self.alert = Some(Alert::error(if message.is_empty() {
                    "Failed to load biller details".to_string()
                } else {
                    message
                }));
            }
        }
    }

    pub fn set_field(&mut self, param_name: impl Into<String>, value: impl Into<String>) {
        self.form_values.insert(param_name.into(), value.into());
    }

    /// Walks the parameters in declared order and reports the first
    /// violation, or `None` when the form is acceptable.
    fn first_violation(details: &BillerDetails, values: &HashMap<String, String>) -> Option<String> {
        for p in &details.input_parameters {
            let value = values.get(&p.param_name).map(String::as_str).unwrap_or("");
            if p.mandatory && value.is_empty() {
                return Some(format!("Please enter {}", p.name));
            }
            if !value.is_empty() {
                if let Some(pattern) = &p.regex {
                    // A biller-supplied pattern that fails to compile is
                    // skipped rather than blocking the user
                    if let Ok(re) = Regex::new(pattern) {
                        if !re.is_match(value) {
                            return Some(format!("Invalid {}", p.name));
                        }
                    }
                }
                if (value.chars().count() as u32) < p.min_length {
                    return Some(format!(
                        "{} must be at least {} characters",
                        p.name, p.min_length
                    ));
                }
            }
        }
        None
    }

    /// Submits the details form. On the first validation violation the
    /// session stays on step 2 with an error alert naming the field. On a
    /// clean form the wizard advances to step 3 immediately (optimistic)
    /// and returns the enquiry to execute; `apply_enquiry` may revert.
    pub fn submit_details(&mut self) -> Option<EnquiryRequest> {
        if self.step != WizardStep::EnterDetails || self.loading_enquiry {
            return None;
        }
        let details = self.biller_details.as_ref()?;
        let biller = self.selected_biller.as_ref()?;

        if let Some(message) = Self::first_violation(details, &self.form_values) {
            self.alert = Some(Alert::error(message));
            return None;
        }

        self.step = WizardStep::VerifyAmount;
        self.loading_enquiry = true;
        Some(EnquiryRequest {
            biller_id: biller.biller_id.clone(),
            input_parameters: self.form_values.clone(),
            external_ref: next_external_ref(),
        })
    }

    /// Applies the enquiry outcome. Failure reverts the optimistic 2→3
    /// transition, leaving the user back on the details form with an error.
    pub fn apply_enquiry(&mut self, outcome: Result<EnquiryResult, String>) {
        self.loading_enquiry = false;
        match outcome {
            Ok(result) => {
                self.enquiry = Some(result);
                self.alert = None;
            }
            Err(message) => {
                self.alert = Some(Alert::error(if message.is_empty() {
                    "Failed to fetch premium details".to_string()
                } else {
                    message
                }));
                self.step = WizardStep::EnterDetails;
            }
        }
    }

    /// Picks one of the fixed payment modes; anything else is rejected.
    /// No step transition happens here.
    pub fn select_payment_mode(&mut self, mode: &str) -> bool {
        if PAYMENT_MODE_CHOICES.contains(&mode) {
            self.selected_payment_mode = Some(mode.to_string());
            true
        } else {
            false
        }
    }

    /// Advances 3→4 once a payment mode is chosen. Step 4 is terminal.
    pub fn proceed_to_payment(&mut self) -> bool {
        if self.step != WizardStep::VerifyAmount {
            return false;
        }
        if self.selected_payment_mode.is_none() {
            self.alert = Some(Alert::error("Please select a payment mode"));
            return false;
        }
        self.step = WizardStep::MakePayment;
        true
    }

    /// Explicit back action from steps 2 and 3. Previously fetched data is
    /// kept in the session.
    pub fn go_back(&mut self) {
        self.step = match self.step {
            WizardStep::EnterDetails => WizardStep::SelectBiller,
            WizardStep::VerifyAmount => WizardStep::EnterDetails,
            other => other,
        };
    }

    /// Terminal summary, available once on step 4.
    pub fn summary(&self) -> Option<PaymentSummary> {
        if self.step != WizardStep::MakePayment {
            return None;
        }
        Some(PaymentSummary {
            provider: self
                .selected_biller
                .as_ref()
                .map(|b| b.biller_name.clone())
                .unwrap_or_else(|| "-".to_string()),
            amount: self.enquiry.as_ref().map(|e| e.amount).unwrap_or(0.0),
            payment_mode: self
                .selected_payment_mode
                .clone()
                .unwrap_or_else(|| "-".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DataType, InputParameter, PaymentAmountExactness};

    fn biller(id: &str, name: &str, available: bool) -> Biller {
        Biller {
            biller_id: id.to_string(),
            biller_name: name.to_string(),
            is_available: available,
            coverage: "PAN India".to_string(),
            icon_url: None,
        }
    }

    fn meta(total_pages: u32, current_page: u32) -> BillerMeta {
        BillerMeta {
            total_pages,
            current_page,
            total_records: 20,
            records_on_current_page: 9,
            record_from: 1,
            record_to: 9,
        }
    }

    fn param(name: &str, mandatory: bool, min: u32, regex: Option<&str>) -> InputParameter {
        InputParameter {
            name: name.to_string(),
            param_name: name.to_lowercase().replace(' ', "_"),
            data_type: DataType::Alphanumeric,
            min_length: min,
            max_length: 256,
            regex: regex.map(str::to_string),
            mandatory,
            desc: None,
        }
    }

    fn details(params: Vec<InputParameter>) -> BillerDetails {
        BillerDetails {
            input_parameters: params,
            payment_modes: vec!["UPI".to_string()],
            fetch_requirement: "SUPPORTED".to_string(),
            support_validation: "SUPPORTED".to_string(),
            payment_amount_exactness: PaymentAmountExactness::Exact,
        }
    }

    /// Session loaded to step 2 with the given parameter schema.
    fn session_on_details(params: Vec<InputParameter>) -> WizardSession {
        let (mut s, req) = WizardSession::new();
        s.apply_billers(
            req.generation,
            Ok((vec![biller("B1", "Acme Life", true)], meta(1, 1))),
        );
        let _ = s.select_biller("B1").unwrap();
        s.apply_biller_details(Ok(details(params)));
        assert_eq!(s.step(), WizardStep::EnterDetails);
        s
    }

    #[test]
    fn initial_fetch_lands_on_step_one() {
        let (mut s, req) = WizardSession::new();
        assert_eq!(req.page_number, 1);
        assert_eq!(req.records_per_page, WIZARD_PAGE_SIZE);
        assert!(s.is_loading_billers());

        s.apply_billers(
            req.generation,
            Ok((vec![biller("B1", "Acme Life", true)], meta(2, 1))),
        );
        assert_eq!(s.step(), WizardStep::SelectBiller);
        assert_eq!(s.billers().len(), 1);
        assert!(!s.is_loading_billers());
        assert!(s.alert().is_none());
    }

    #[test]
    fn initial_fetch_failure_stays_on_step_one_with_alert() {
        let (mut s, req) = WizardSession::new();
        s.apply_billers(req.generation, Err("boom".to_string()));
        assert_eq!(s.step(), WizardStep::SelectBiller);
        assert_eq!(s.alert().unwrap().kind, AlertKind::Error);
    }

    #[test]
    fn stale_page_response_is_discarded() {
        // Request page 2, then page 1 before page 2 resolves. The slow
        // page-2 response must not overwrite page 1's data.
        let (mut s, first) = WizardSession::new();
        s.apply_billers(first.generation, Ok((vec![biller("A", "A", true)], meta(3, 1))));

        let req2 = s.request_page(2).unwrap();
        let req1 = s.request_page(1).unwrap();
        assert!(req1.generation > req2.generation);

        s.apply_billers(
            req1.generation,
            Ok((vec![biller("P1", "Page One Co", true)], meta(3, 1))),
        );
        // Page 2 arrives late
        s.apply_billers(
            req2.generation,
            Ok((vec![biller("P2", "Page Two Co", true)], meta(3, 2))),
        );

        assert_eq!(s.billers()[0].biller_id, "P1");
        assert_eq!(s.meta().unwrap().current_page, 1);
    }

    #[test]
    fn page_requests_are_bounds_checked() {
        let (mut s, first) = WizardSession::new();
        s.apply_billers(first.generation, Ok((vec![biller("A", "A", true)], meta(3, 1))));

        // Below 1 clamps to 1, which is already shown
        assert!(s.request_page(0).is_none());
        // Above totalPages clamps to totalPages
        let req = s.request_page(99).unwrap();
        assert_eq!(req.page_number, 3);
    }

    #[test]
    fn search_filters_without_fetching() {
        let (mut s, first) = WizardSession::new();
        s.apply_billers(
            first.generation,
            Ok((
                vec![
                    biller("B1", "Acme Life", true),
                    biller("B2", "Zen General", true),
                ],
                meta(1, 1),
            )),
        );
        s.set_search("ACME");
        let filtered = s.filtered_billers();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].biller_id, "B1");
    }

    #[test]
    fn selecting_unavailable_biller_is_a_no_op() {
        let (mut s, first) = WizardSession::new();
        s.apply_billers(
            first.generation,
            Ok((vec![biller("B1", "Acme Life", false)], meta(1, 1))),
        );
        assert!(s.select_biller("B1").is_none());
        assert!(s.select_biller("unknown").is_none());
        assert_eq!(s.step(), WizardStep::SelectBiller);
        assert!(s.selected_biller().is_none());
        assert!(s.alert().is_none());
    }

    #[test]
    fn selecting_available_biller_shows_loading_then_advances() {
        let (mut s, first) = WizardSession::new();
        s.apply_billers(
            first.generation,
            Ok((vec![biller("B1", "Acme Life", true)], meta(1, 1))),
        );

        let req = s.select_biller("B1").unwrap();
        assert_eq!(req.biller_id, "B1");
        assert_eq!(s.alert().unwrap().kind, AlertKind::Info);
        assert_eq!(s.step(), WizardStep::SelectBiller);

        s.apply_biller_details(Ok(details(vec![param("Policy Number", true, 0, None)])));
        assert_eq!(s.step(), WizardStep::EnterDetails);
        assert!(s.alert().is_none());
    }

    #[test]
    fn details_fetch_failure_keeps_step_one() {
        let (mut s, first) = WizardSession::new();
        s.apply_billers(
            first.generation,
            Ok((vec![biller("B1", "Acme Life", true)], meta(1, 1))),
        );
        let _ = s.select_biller("B1").unwrap();
        s.apply_biller_details(Err("upstream down".to_string()));
        assert_eq!(s.step(), WizardStep::SelectBiller);
        assert_eq!(s.alert().unwrap().kind, AlertKind::Error);
    }

    #[test]
    fn validation_reports_only_first_failing_field() {
        // Two invalid fields; only the first parameter's label may appear.
        let mut s = session_on_details(vec![
            param("Policy Number", true, 0, None),
            param("Date Of Birth", true, 0, None),
        ]);
        assert!(s.submit_details().is_none());
        let alert = s.alert().unwrap();
        assert_eq!(alert.message, "Please enter Policy Number");
        assert!(!alert.message.contains("Date Of Birth"));
        assert_eq!(s.step(), WizardStep::EnterDetails);
    }

    #[test]
    fn validation_checks_regex_then_min_length() {
        let mut s = session_on_details(vec![param("Policy Number", true, 5, Some("^[0-9]+$"))]);

        s.set_field("policy_number", "abc");
        assert!(s.submit_details().is_none());
        assert_eq!(s.alert().unwrap().message, "Invalid Policy Number");

        s.set_field("policy_number", "123");
        assert!(s.submit_details().is_none());
        assert_eq!(
            s.alert().unwrap().message,
            "Policy Number must be at least 5 characters"
        );

        s.set_field("policy_number", "12345");
        assert!(s.submit_details().is_some());
    }

    #[test]
    fn optional_empty_field_passes_validation() {
        let mut s = session_on_details(vec![param("Email", false, 5, Some("@"))]);
        assert!(s.submit_details().is_some());
    }

    #[test]
    fn clean_submit_advances_optimistically() {
        let mut s = session_on_details(vec![param("Policy Number", true, 0, None)]);
        s.set_field("policy_number", "POL123");

        let req = s.submit_details().unwrap();
        assert_eq!(req.biller_id, "B1");
        assert_eq!(req.input_parameters["policy_number"], "POL123");
        assert!(req.external_ref.starts_with("SABPE_"));
        // Step 3 entered before the enquiry resolves
        assert_eq!(s.step(), WizardStep::VerifyAmount);
        assert!(s.is_loading_enquiry());
    }

    #[test]
    fn enquiry_failure_reverts_to_step_two() {
        let mut s = session_on_details(vec![param("Policy Number", true, 0, None)]);
        s.set_field("policy_number", "POL123");
        let _ = s.submit_details().unwrap();

        s.apply_enquiry(Err("aggregator returned 500".to_string()));
        assert_eq!(s.step(), WizardStep::EnterDetails);
        assert_eq!(s.alert().unwrap().kind, AlertKind::Error);
        assert!(!s.is_loading_enquiry());
    }

    #[test]
    fn repeated_submit_while_loading_is_refused() {
        let mut s = session_on_details(vec![param("Policy Number", true, 0, None)]);
        s.set_field("policy_number", "POL123");
        assert!(s.submit_details().is_some());
        // Still loading: no second enquiry may be issued
        assert!(s.submit_details().is_none());
    }

    #[test]
    fn proceed_requires_payment_mode() {
        let mut s = session_on_details(vec![]);
        let _ = s.submit_details().unwrap();
        s.apply_enquiry(Ok(EnquiryResult {
            enquiry_reference_id: "SABPE_1".to_string(),
            amount: 1500.0,
            customer_name: Some("Jane Doe".to_string()),
            policy_status: None,
            due_date: None,
        }));

        assert!(!s.proceed_to_payment());
        assert_eq!(s.alert().unwrap().message, "Please select a payment mode");
        assert_eq!(s.step(), WizardStep::VerifyAmount);

        assert!(!s.select_payment_mode("Bitcoin"));
        assert!(s.select_payment_mode("UPI"));
        assert!(s.proceed_to_payment());
        assert_eq!(s.step(), WizardStep::MakePayment);

        let summary = s.summary().unwrap();
        assert_eq!(summary.provider, "Acme Life");
        assert_eq!(summary.amount, 1500.0);
        assert_eq!(summary.payment_mode, "UPI");
    }

    #[test]
    fn back_navigation_keeps_fetched_data() {
        let mut s = session_on_details(vec![param("Policy Number", true, 0, None)]);
        s.set_field("policy_number", "POL123");
        let _ = s.submit_details().unwrap();
        s.apply_enquiry(Ok(EnquiryResult {
            enquiry_reference_id: "SABPE_2".to_string(),
            amount: 900.0,
            customer_name: None,
            policy_status: None,
            due_date: None,
        }));

        s.go_back();
        assert_eq!(s.step(), WizardStep::EnterDetails);
        assert!(s.enquiry().is_some());
        assert!(s.biller_details().is_some());

        s.go_back();
        assert_eq!(s.step(), WizardStep::SelectBiller);
        assert!(s.biller_details().is_some());
    }

    #[test]
    fn new_alert_replaces_previous_one() {
        let (mut s, first) = WizardSession::new();
        s.apply_billers(first.generation, Err("first failure".to_string()));
        assert_eq!(s.alert().unwrap().message, "first failure");

        // A mismatched generation never touches the alert
        s.apply_billers(999, Err("ignored, stale".to_string()));
        assert_eq!(s.alert().unwrap().message, "first failure");

        let req = s.request_page(2).unwrap();
        s.apply_billers(req.generation, Err("second failure".to_string()));
        assert_eq!(s.alert().unwrap().message, "second failure");
    }

    #[test]
    fn external_refs_are_strictly_increasing() {
        let tokens: Vec<i64> = (0..100)
            .map(|_| {
                next_external_ref()
                    .trim_start_matches(EXTERNAL_REF_PREFIX)
                    .parse()
                    .unwrap()
            })
            .collect();
        for pair in tokens.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }
}
