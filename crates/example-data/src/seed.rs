//! Generated workforce seed types.
//!
//! These types are independent of backend domain types to avoid circular
//! dependencies. Enums mirror their backend counterparts by name; the backend
//! converts them when loading its mock stores.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Final review outcome of a generated request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeSeed {
    /// Awaiting a decision.
    #[default]
    Pending,
    /// Approved by a manager.
    Approved,
    /// Rejected by a manager.
    Rejected,
}

/// Expense category for a generated claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategorySeed {
    /// Flights, trains and similar travel.
    Travel,
    /// Client or team meals.
    Meals,
    /// Local transport such as taxis.
    Transport,
    /// Office supplies.
    Supplies,
    /// Courses and certifications.
    Training,
}

/// Overtime day classification for a generated overtime entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertimeKindSeed {
    /// Regular working day.
    Weekday,
    /// Weekend day.
    Weekend,
    /// Public holiday.
    Holiday,
}

/// Leave type for a generated leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveTypeSeed {
    /// Paid annual leave.
    Annual,
    /// Sick leave.
    Sick,
    /// Emergency leave.
    Emergency,
    /// Unpaid leave.
    Unpaid,
}

/// Document kind for a generated employee document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKindSeed {
    /// Passport.
    Passport,
    /// Residence or work visa.
    Visa,
    /// National identity card.
    NationalId,
    /// Employment contract.
    Contract,
}

/// A generated employee record.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use example_data::EmployeeSeed;
///
/// let employee = EmployeeSeed {
///     employee_id: "EMP-0001".to_owned(),
///     name: "Ada Lovelace".to_owned(),
///     department: "Engineering".to_owned(),
///     position: "Analyst".to_owned(),
///     email: "ada.lovelace@example.com".to_owned(),
///     join_date: NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"),
///     monthly_salary: 6500,
/// };
///
/// assert_eq!(employee.employee_id, "EMP-0001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSeed {
    /// Stable employee identifier, `EMP-0001` onwards.
    pub employee_id: String,
    /// Full name.
    pub name: String,
    /// Department drawn from the registry.
    pub department: String,
    /// Job title.
    pub position: String,
    /// Work email address.
    pub email: String,
    /// Date the employee joined.
    pub join_date: NaiveDate,
    /// Monthly salary in whole currency units.
    pub monthly_salary: u32,
}

/// A generated salary advance request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceSeed {
    /// Owning employee identifier.
    pub employee_id: String,
    /// Principal amount in whole currency units.
    pub amount: u32,
    /// Amount deducted from each payroll run.
    pub monthly_deduction: u32,
    /// Free-text reason.
    pub reason: String,
    /// Review outcome.
    pub outcome: OutcomeSeed,
    /// Date the decision was taken, when not pending.
    pub decided_on: NaiveDate,
    /// Number of monthly instalments already repaid.
    pub installments_paid: u32,
}

/// A generated expense claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSeed {
    /// Owning employee identifier.
    pub employee_id: String,
    /// Expense category.
    pub category: ExpenseCategorySeed,
    /// Claimed amount in whole currency units.
    pub amount: u32,
    /// Date the expense was incurred.
    pub expense_date: NaiveDate,
    /// Free-text description.
    pub description: String,
    /// Review outcome.
    pub outcome: OutcomeSeed,
}

/// A generated overtime entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeSeed {
    /// Owning employee identifier.
    pub employee_id: String,
    /// Day the overtime was worked.
    pub work_date: NaiveDate,
    /// Whole hours worked.
    pub hours: u8,
    /// Day classification.
    pub kind: OvertimeKindSeed,
    /// Free-text reason.
    pub reason: String,
    /// Review outcome.
    pub outcome: OutcomeSeed,
}

/// A generated leave request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveSeed {
    /// Owning employee identifier.
    pub employee_id: String,
    /// Leave type.
    pub leave_type: LeaveTypeSeed,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave, inclusive.
    pub end_date: NaiveDate,
    /// Free-text reason.
    pub reason: String,
    /// Review outcome.
    pub outcome: OutcomeSeed,
}

/// A generated employee document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSeed {
    /// Owning employee identifier.
    pub employee_id: String,
    /// Document kind.
    pub kind: DocumentKindSeed,
    /// Display title.
    pub title: String,
    /// Expiry date, if the document expires.
    pub expiry_date: Option<NaiveDate>,
    /// Review outcome.
    pub outcome: OutcomeSeed,
}

/// Everything generated for one seed definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleWorkforce {
    /// Generated employees.
    pub employees: Vec<EmployeeSeed>,
    /// Salary advance requests.
    pub advances: Vec<AdvanceSeed>,
    /// Expense claims.
    pub expenses: Vec<ExpenseSeed>,
    /// Overtime entries.
    pub overtime: Vec<OvertimeSeed>,
    /// Leave requests.
    pub leave: Vec<LeaveSeed>,
    /// Employee documents.
    pub documents: Vec<DocumentSeed>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_seed_defaults_to_pending() {
        assert_eq!(OutcomeSeed::default(), OutcomeSeed::Pending);
    }

    #[test]
    fn enums_serialize_snake_case() {
        let kind = serde_json::to_string(&DocumentKindSeed::NationalId).expect("serialize");
        assert_eq!(kind, "\"national_id\"");
    }

    #[test]
    fn workforce_serializes_to_camel_case() {
        let workforce = ExampleWorkforce {
            employees: vec![EmployeeSeed {
                employee_id: "EMP-0001".to_owned(),
                name: "Test Person".to_owned(),
                department: "Ops".to_owned(),
                position: "Clerk".to_owned(),
                email: "test.person@example.com".to_owned(),
                join_date: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
                monthly_salary: 4000,
            }],
            ..ExampleWorkforce::default()
        };
        let json = serde_json::to_string(&workforce).expect("serialize");
        assert!(json.contains("employeeId"));
        assert!(json.contains("joinDate"));
        assert!(json.contains("monthlySalary"));
    }
}
