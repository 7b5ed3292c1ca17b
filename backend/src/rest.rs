//! HTTP surface over the domain services.
//!
//! Handlers stay thin: build an `Identity` and a command from the
//! request, call the service, map the outcome. Identity fields travel
//! with every request; there is no server-side session.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use chrono::{Local, NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use shared::{
    BillDto, BillListResponse, CreatePaymentRequest, DeletePaymentResponse, ErrorResponse,
    PaymentListResponse, PaymentRecordDto, ReportResponse, ReportTotalsDto, UpdatePaymentRequest,
};

use crate::domain::commands::payments::{CreatePaymentCommand, UpdatePaymentCommand};
use crate::domain::eligibility::is_payable;
use crate::domain::models::bill::Bill;
use crate::domain::models::identity::Identity;
use crate::domain::models::payment::PaymentRecord;
use crate::domain::search::{filter_bills, CategoryFilter};
use crate::domain::DomainError;
use crate::Backend;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<Backend>,
}

impl AppState {
    pub fn new(backend: Arc<Backend>) -> Self {
        Self { backend }
    }
}

/// The `/api` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/bills", get(list_bills))
        .route("/bills/:id", get(get_bill))
        .route("/my-bills", get(list_my_payments).post(create_payment))
        .route("/my-bills/report", get(payment_report))
        .route("/my-bills/:id", put(update_payment).delete(delete_payment))
}

/// Identity fields accompanying a request. `user_id` absent or blank
/// means the caller is not signed in.
#[derive(Deserialize, Debug, Default)]
pub struct IdentityParams {
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl IdentityParams {
    fn into_identity(self) -> Option<Identity> {
        let user_id = self.user_id?;
        if user_id.trim().is_empty() {
            return None;
        }
        Some(Identity {
            user_id,
            email: self.email,
            display_name: self.display_name,
        })
    }
}

/// Query parameters for catalog browsing.
#[derive(Deserialize, Debug, Default)]
pub struct BillListParams {
    pub category: Option<String>,
    pub search: Option<String>,
}

struct BillMapper;

impl BillMapper {
    fn to_dto(bill: Bill, today: NaiveDate) -> BillDto {
        let payable = is_payable(&bill, today);
        BillDto {
            id: bill.id,
            category: bill.category.as_str().to_string(),
            title: bill.title,
            description: bill.description,
            location: bill.location,
            amount: bill.amount,
            date: bill.date,
            image: bill.image,
            payable,
        }
    }
}

struct PaymentMapper;

impl PaymentMapper {
    fn to_dto(record: PaymentRecord) -> PaymentRecordDto {
        PaymentRecordDto {
            id: record.id,
            bill_id: record.bill_id,
            bill_title: record.bill_title,
            user_id: record.user_id,
            payer_name: record.payer_name,
            email: record.email,
            address: record.address,
            phone: record.phone,
            note: record.note,
            amount: record.amount,
            date: record.date,
            paid_at: record.paid_at.to_rfc3339(),
        }
    }
}

fn error_response(err: DomainError) -> Response {
    let status = match &err {
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
        DomainError::NotEligible(_) => StatusCode::CONFLICT,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::EmptyReport => StatusCode::CONFLICT,
        DomainError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    tracing::error!("Request failed: {}", err);
    let body = ErrorResponse {
        kind: err.kind().to_string(),
        error: err.to_string(),
    };
    (status, Json(body)).into_response()
}

/// GET /api/bills?category=&search=
pub async fn list_bills(
    State(state): State<AppState>,
    Query(params): Query<BillListParams>,
) -> impl IntoResponse {
    info!("GET /api/bills - params: {:?}", params);

    let bills = match state.backend.bill_catalog.list_bills() {
        Ok(bills) => bills,
        Err(e) => return error_response(e),
    };
    let total = bills.len();

    let category = CategoryFilter::parse(params.category.as_deref().unwrap_or("All"));
    let term = params.search.unwrap_or_default();
    let filtered = filter_bills(&bills, &category, &term);

    let today = Local::now().date_naive();
    let response = BillListResponse {
        bills: filtered
            .into_iter()
            .map(|bill| BillMapper::to_dto(bill, today))
            .collect(),
        total,
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// GET /api/bills/:id
pub async fn get_bill(
    State(state): State<AppState>,
    Path(bill_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/bills/{}", bill_id);

    match state.backend.bill_catalog.get_bill(&bill_id) {
        Ok(bill) => {
            let today = Local::now().date_naive();
            (StatusCode::OK, Json(BillMapper::to_dto(bill, today))).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// GET /api/my-bills?user_id=
pub async fn list_my_payments(
    State(state): State<AppState>,
    Query(params): Query<IdentityParams>,
) -> impl IntoResponse {
    info!("GET /api/my-bills - params: {:?}", params);

    let identity = params.into_identity();
    match state.backend.payment_service.list_payments(identity.as_ref()) {
        Ok(records) => {
            let total_amount = state.backend.report_service.aggregate(&records).total_amount;
            let response = PaymentListResponse {
                payments: records.into_iter().map(PaymentMapper::to_dto).collect(),
                total_amount,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// POST /api/my-bills
pub async fn create_payment(
    State(state): State<AppState>,
    Json(request): Json<CreatePaymentRequest>,
) -> impl IntoResponse {
    info!("POST /api/my-bills - bill_id: {}", request.bill_id);

    let identity = IdentityParams {
        user_id: Some(request.user_id.clone()),
        email: request.email.clone(),
        display_name: request.display_name.clone(),
    }
    .into_identity();

    let command = CreatePaymentCommand {
        bill_id: request.bill_id,
        payer_name: request.payer_name,
        address: request.address,
        phone: request.phone,
        note: request.note,
    };

    match state
        .backend
        .payment_service
        .create_payment(identity.as_ref(), command)
    {
        Ok(record) => (StatusCode::CREATED, Json(PaymentMapper::to_dto(record))).into_response(),
        Err(e) => error_response(e),
    }
}

/// PUT /api/my-bills/:id
pub async fn update_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<String>,
    Json(request): Json<UpdatePaymentRequest>,
) -> impl IntoResponse {
    info!("PUT /api/my-bills/{}", payment_id);

    let identity = IdentityParams {
        user_id: Some(request.user_id.clone()),
        ..Default::default()
    }
    .into_identity();

    let patch = UpdatePaymentCommand {
        amount: request.amount,
        address: request.address,
        phone: request.phone,
        date: request.date,
    };

    match state
        .backend
        .payment_service
        .update_payment(identity.as_ref(), &payment_id, patch)
    {
        Ok(record) => (StatusCode::OK, Json(PaymentMapper::to_dto(record))).into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/my-bills/:id?user_id=
pub async fn delete_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<String>,
    Query(params): Query<IdentityParams>,
) -> impl IntoResponse {
    info!("DELETE /api/my-bills/{}", payment_id);

    let identity = params.into_identity();
    match state
        .backend
        .payment_service
        .delete_payment(identity.as_ref(), &payment_id)
    {
        Ok(()) => {
            let body = DeletePaymentResponse {
                deleted_id: payment_id,
                success_message: "Bill payment record deleted".to_string(),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// GET /api/my-bills/report?user_id=
pub async fn payment_report(
    State(state): State<AppState>,
    Query(params): Query<IdentityParams>,
) -> impl IntoResponse {
    info!("GET /api/my-bills/report - params: {:?}", params);

    let identity = match params.into_identity() {
        Some(identity) => identity,
        None => return error_response(DomainError::Unauthorized),
    };

    let records = match state.backend.payment_service.list_payments(Some(&identity)) {
        Ok(records) => records,
        Err(e) => return error_response(e),
    };

    let generated_at = Utc::now();
    let report = match state
        .backend
        .report_service
        .build_report(&records, &identity, generated_at)
    {
        Ok(report) => report,
        Err(e) => return error_response(e),
    };

    let response = ReportResponse {
        filename: report.filename.clone(),
        content: state.backend.report_service.render(&report),
        totals: ReportTotalsDto {
            count: report.totals.count,
            total_amount: report.totals.total_amount,
        },
        generated_at: report.generated_at.to_rfc3339(),
        identity_label: report.identity_label.clone(),
    };
    (StatusCode::OK, Json(response)).into_response()
}
