//! Air ticket request HTTP handlers.

use actix_web::{HttpResponse, post, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{TicketDraft, TicketRequest, TravelClass, TravelPurpose};
use crate::inbound::http::ApiResult;
use crate::inbound::http::records::{DecisionRequest, RecordHeader, record_endpoints, resolve_owner};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_date, parse_label, parse_optional_date, require,
};

/// Request payload for a new ticket request.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketSubmission {
    pub employee_id: Option<String>,
    #[schema(example = "DXB")]
    pub origin: Option<String>,
    #[schema(example = "MNL")]
    pub destination: Option<String>,
    #[schema(example = "2026-07-01")]
    pub departure_date: Option<String>,
    pub return_date: Option<String>,
    #[schema(example = "economy")]
    pub travel_class: Option<String>,
    #[schema(example = "annual_leave")]
    pub purpose: Option<String>,
    #[schema(value_type = Option<String>, example = "1450.00")]
    pub estimated_cost: Option<Decimal>,
}

/// Response payload for a ticket request.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponse {
    #[serde(flatten)]
    pub record: RecordHeader,
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub return_date: Option<String>,
    pub travel_class: TravelClass,
    pub purpose: TravelPurpose,
    #[schema(value_type = String)]
    pub estimated_cost: Decimal,
}

impl From<&TicketRequest> for TicketResponse {
    fn from(value: &TicketRequest) -> Self {
        Self {
            record: RecordHeader::of(value),
            origin: value.origin().to_owned(),
            destination: value.destination().to_owned(),
            departure_date: value.departure_date().to_string(),
            return_date: value.return_date().map(|date| date.to_string()),
            travel_class: value.travel_class(),
            purpose: value.purpose(),
            estimated_cost: value.estimated_cost(),
        }
    }
}

/// Request an air ticket.
#[utoipa::path(
    post,
    path = "/api/v1/tickets",
    request_body = TicketSubmission,
    responses(
        (status = 201, description = "Ticket requested", body = TicketResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Submitting for another employee", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "submitTicket"
)]
#[post("/tickets")]
pub async fn submit_ticket(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<TicketSubmission>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let payload = payload.into_inner();
    let origin = require(payload.origin, FieldName::new("origin"))?;
    let destination = require(payload.destination, FieldName::new("destination"))?;
    let departure_date = parse_date(
        require(payload.departure_date, FieldName::new("departureDate"))?,
        FieldName::new("departureDate"),
    )?;
    let return_date = parse_optional_date(payload.return_date, FieldName::new("returnDate"))?;
    let travel_class: TravelClass = parse_label(
        require(payload.travel_class, FieldName::new("travelClass"))?,
        FieldName::new("travelClass"),
    )?;
    let purpose: TravelPurpose = parse_label(
        require(payload.purpose, FieldName::new("purpose"))?,
        FieldName::new("purpose"),
    )?;
    let estimated_cost = require(payload.estimated_cost, FieldName::new("estimatedCost"))?;
    let employee = resolve_owner(state.employees.as_ref(), &principal, payload.employee_id).await?;

    let ticket = state
        .tickets
        .command
        .submit(TicketDraft {
            employee,
            origin,
            destination,
            departure_date,
            return_date,
            travel_class,
            purpose,
            estimated_cost,
        })
        .await?;
    Ok(HttpResponse::Created().json(TicketResponse::from(&ticket)))
}

record_endpoints! {
    ports: tickets,
    response: TicketResponse,
    tag: "tickets",
    list: list_tickets("/tickets", "/api/v1/tickets", "listTickets"),
    get: get_ticket("/tickets/{id}", "/api/v1/tickets/{id}", "getTicket"),
    decide: decide_ticket(
        "/tickets/{id}/decision",
        "/api/v1/tickets/{id}/decision",
        "decideTicket"
    ),
    delete: delete_ticket("/tickets/{id}", "/api/v1/tickets/{id}", "deleteTicket"),
}
