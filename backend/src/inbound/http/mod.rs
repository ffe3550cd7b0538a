//! HTTP inbound adapter exposing REST endpoints.

pub mod advances;
pub mod attendance;
pub mod dashboard;
pub mod documents;
pub mod employees;
pub mod error;
pub mod expenses;
pub mod health;
pub mod leave;
pub mod overtime;
pub mod payroll;
pub mod records;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod tickets;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every `/api/v1` handler on `cfg`.
///
/// Fixed paths such as `/advances/summaries` are registered before the
/// matching `/{id}` routes so they are not captured as identifiers.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::query_config())
        .service(users::login)
        .service(users::logout)
        .service(users::current_principal)
        .service(employees::list_employees)
        .service(employees::create_employee)
        .service(employees::get_employee)
        .service(employees::update_employee)
        .service(advances::loan_summaries)
        .service(advances::submit_advance)
        .service(advances::record_repayment)
        .service(advances::list_advances)
        .service(advances::get_advance)
        .service(advances::decide_advance)
        .service(advances::delete_advance)
        .service(expenses::expense_summaries)
        .service(expenses::submit_expense)
        .service(expenses::list_expenses)
        .service(expenses::get_expense)
        .service(expenses::decide_expense)
        .service(expenses::delete_expense)
        .service(documents::document_summaries)
        .service(documents::submit_document)
        .service(documents::list_documents)
        .service(documents::get_document)
        .service(documents::decide_document)
        .service(documents::delete_document)
        .service(tickets::submit_ticket)
        .service(tickets::list_tickets)
        .service(tickets::get_ticket)
        .service(tickets::decide_ticket)
        .service(tickets::delete_ticket)
        .service(overtime::submit_overtime)
        .service(overtime::list_overtime)
        .service(overtime::get_overtime)
        .service(overtime::decide_overtime)
        .service(leave::balances)
        .service(leave::submit_leave)
        .service(leave::list_leave)
        .service(leave::get_leave)
        .service(leave::decide_leave)
        .service(leave::delete_leave)
        .service(attendance::attendance_summaries)
        .service(attendance::list_attendance)
        .service(attendance::check_in)
        .service(attendance::check_out)
        .service(attendance::mark_attendance)
        .service(payroll::preview_payroll)
        .service(dashboard::dashboard)
        .service(dashboard::store_statuses);
}
