//! Dashboard and store status HTTP handlers.

use actix_web::{get, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::StoreStatus;
use crate::domain::{DashboardOverview, RecordKind};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_optional_date};

/// State of one in-memory store.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreStatusBody {
    #[schema(example = "advances")]
    pub name: String,
    /// Whether a mutation is in flight.
    pub loading: bool,
    pub last_error: Option<String>,
    pub record_count: usize,
    pub revision: u64,
}

impl From<&StoreStatus> for StoreStatusBody {
    fn from(value: &StoreStatus) -> Self {
        Self {
            name: value.name.to_owned(),
            loading: value.loading,
            last_error: value.last_error.clone(),
            record_count: value.record_count,
            revision: value.revision,
        }
    }
}

/// Requests awaiting review for one record kind.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PendingCountBody {
    pub kind: RecordKind,
    pub count: usize,
}

/// Head count.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HeadCountBody {
    pub total: usize,
    pub active: usize,
}

/// Attendance counts for the dashboard date.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceTodayBody {
    pub present: usize,
    pub late: usize,
    pub half_day: usize,
    pub absent: usize,
    pub on_leave: usize,
    pub not_recorded: usize,
}

/// Dashboard snapshot.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub as_of: String,
    pub head_count: HeadCountBody,
    pub pending: Vec<PendingCountBody>,
    #[schema(value_type = String)]
    pub outstanding_advances: Decimal,
    #[schema(value_type = String)]
    pub pending_expense_amount: Decimal,
    pub attendance_today: AttendanceTodayBody,
    /// Documents expiring within 30 days.
    pub documents_expiring: usize,
    /// Approved leave starting within 7 days.
    pub upcoming_leave: usize,
    pub stores: Vec<StoreStatusBody>,
}

impl From<&DashboardOverview> for DashboardResponse {
    fn from(value: &DashboardOverview) -> Self {
        let today = value.attendance_today;
        Self {
            as_of: value.as_of.to_string(),
            head_count: HeadCountBody {
                total: value.head_count.total,
                active: value.head_count.active,
            },
            pending: value
                .pending
                .iter()
                .map(|pending| PendingCountBody {
                    kind: pending.kind,
                    count: pending.count,
                })
                .collect(),
            outstanding_advances: value.outstanding_advances,
            pending_expense_amount: value.pending_expense_amount,
            attendance_today: AttendanceTodayBody {
                present: today.present,
                late: today.late,
                half_day: today.half_day,
                absent: today.absent,
                on_leave: today.on_leave,
                not_recorded: today.not_recorded,
            },
            documents_expiring: value.documents_expiring,
            upcoming_leave: value.upcoming_leave,
            stores: value.stores.iter().map(StoreStatusBody::from).collect(),
        }
    }
}

/// Query string for the dashboard.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    pub as_of: Option<String>,
}

/// Dashboard overview.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    params(
        ("asOf" = Option<String>, Query, description = "Reference date, YYYY-MM-DD; defaults to today")
    ),
    responses(
        (status = 200, description = "Dashboard snapshot", body = DashboardResponse),
        (status = 400, description = "Malformed date", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "dashboard"
)]
#[get("/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<DashboardQuery>,
) -> ApiResult<web::Json<DashboardResponse>> {
    session.require_principal()?;
    let as_of = parse_optional_date(query.into_inner().as_of, FieldName::new("asOf"))?
        .unwrap_or_else(|| state.clock.utc().date_naive());
    let overview = state.dashboard.overview(as_of).await?;
    Ok(web::Json(DashboardResponse::from(&overview)))
}

/// Status of every in-memory store.
#[utoipa::path(
    get,
    path = "/api/v1/stores",
    responses(
        (status = 200, description = "One entry per store", body = [StoreStatusBody]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "storeStatuses"
)]
#[get("/stores")]
pub async fn store_statuses(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<StoreStatusBody>>> {
    session.require_principal()?;
    Ok(web::Json(
        state.stores.statuses().iter().map(StoreStatusBody::from).collect(),
    ))
}
