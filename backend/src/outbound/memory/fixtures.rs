//! Directory entries for the fixture login accounts.
//!
//! A console started without example data still needs the employees the
//! login accounts are linked to, or every self-service submission would
//! fail with `unknown_employee`.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::{Employee, EmployeeDraft, EmployeeId, EmploymentStatus, Error};

struct AccountEmployee {
    id: &'static str,
    name: &'static str,
    department: &'static str,
    position: &'static str,
    email: &'static str,
    joined: (i32, u32, u32),
    monthly_salary: i64,
}

const ACCOUNT_EMPLOYEES: [AccountEmployee; 3] = [
    AccountEmployee {
        id: "EMP-0001",
        name: "Amina Haddad",
        department: "Administration",
        position: "System Administrator",
        email: "amina.haddad@example.com",
        joined: (2019, 4, 1),
        monthly_salary: 9_500,
    },
    AccountEmployee {
        id: "EMP-0002",
        name: "Omar Nasser",
        department: "People",
        position: "HR Manager",
        email: "omar.nasser@example.com",
        joined: (2020, 9, 15),
        monthly_salary: 8_200,
    },
    AccountEmployee {
        id: "EMP-0003",
        name: "Lina Saleh",
        department: "Operations",
        position: "Coordinator",
        email: "lina.saleh@example.com",
        joined: (2023, 2, 6),
        monthly_salary: 4_300,
    },
];

/// One active employee per fixture login account, in account order.
pub fn account_employees() -> Result<Vec<Employee>, Error> {
    ACCOUNT_EMPLOYEES
        .iter()
        .map(|entry| {
            let (year, month, day) = entry.joined;
            let join_date = NaiveDate::from_ymd_opt(year, month, day)
                .ok_or_else(|| Error::internal(format!("invalid join date for {}", entry.id)))?;
            let id = EmployeeId::new(entry.id)
                .map_err(|err| Error::internal(format!("invalid fixture employee id: {err}")))?;
            Employee::try_from_draft(EmployeeDraft {
                id,
                name: entry.name.to_owned(),
                department: entry.department.to_owned(),
                position: entry.position.to_owned(),
                email: entry.email.to_owned(),
                join_date,
                monthly_salary: Decimal::from(entry.monthly_salary),
                status: EmploymentStatus::Active,
            })
            .map_err(|err| Error::internal(format!("invalid fixture employee {}: {err}", entry.id)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_employees_are_active_and_ordered() {
        let employees = account_employees().expect("fixture employees");
        let ids: Vec<&str> = employees.iter().map(|e| e.id().as_ref()).collect();
        assert_eq!(ids, vec!["EMP-0001", "EMP-0002", "EMP-0003"]);
        assert!(employees.iter().all(Employee::is_active));
    }
}
