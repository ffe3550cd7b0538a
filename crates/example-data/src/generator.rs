//! Deterministic workforce generation from seed definitions.
//!
//! The same seed value and registry always produce identical output: one RNG
//! seeded from the definition drives every choice, and all dates are offsets
//! from the registry's reference date rather than the wall clock.

use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};
use fake::Fake;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::GenerationError;
use crate::registry::{SeedDefinition, SeedRegistry};
use crate::seed::{
    AdvanceSeed, DocumentKindSeed, DocumentSeed, EmployeeSeed, ExampleWorkforce,
    ExpenseCategorySeed, ExpenseSeed, LeaveSeed, LeaveTypeSeed, OutcomeSeed, OvertimeKindSeed,
    OvertimeSeed,
};
use crate::validation::{
    EMPLOYEE_NAME_MAX, email_for, is_valid_employee_name, sanitize_employee_name,
};

/// Maximum number of attempts to generate a valid employee name.
const MAX_NAME_ATTEMPTS: usize = 100;

const POSITIONS: &[&str] = &[
    "Analyst",
    "Coordinator",
    "Engineer",
    "Specialist",
    "Team Lead",
    "Officer",
    "Administrator",
];

const ADVANCE_REASONS: &[&str] = &[
    "Medical bills",
    "School fees",
    "Housing deposit",
    "Family emergency",
    "Vehicle repair",
];

const OVERTIME_REASONS: &[&str] = &[
    "Month-end close",
    "Release support",
    "Inventory count",
    "Customer escalation",
];

/// Salary band, in units of 50.
const SALARY_STEPS: std::ops::RangeInclusive<u32> = 60..=240;

/// Generates an example workforce from a seed definition.
///
/// Uses the seed's `seed` value to initialise a deterministic RNG. Each
/// employee receives an `EMP-nnnn` identifier, a valid name and derived
/// email, and a handful of sample requests with mixed review outcomes.
///
/// # Errors
///
/// Returns [`GenerationError`] if name generation fails after maximum
/// retries or a generated date falls outside the calendar range.
///
/// # Example
///
/// ```
/// use example_data::{SeedRegistry, generate_example_workforce};
///
/// let json = r#"{
///     "version": 1,
///     "referenceDate": "2026-01-15",
///     "departments": ["Engineering"],
///     "seeds": [{"name": "test", "seed": 42, "employeeCount": 3}]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid");
/// let seed_def = registry.find_seed("test").expect("found");
/// let first = generate_example_workforce(&registry, seed_def).expect("generated");
/// let second = generate_example_workforce(&registry, seed_def).expect("generated");
///
/// assert_eq!(first.employees.len(), 3);
/// assert_eq!(first, second);
/// ```
pub fn generate_example_workforce(
    registry: &SeedRegistry,
    seed_def: &SeedDefinition,
) -> Result<ExampleWorkforce, GenerationError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed_def.seed());
    let reference = registry.reference_date();
    let mut workforce = ExampleWorkforce {
        employees: Vec::with_capacity(seed_def.employee_count()),
        ..ExampleWorkforce::default()
    };

    for index in 1..=seed_def.employee_count() {
        let employee = generate_employee(&mut rng, registry, index)?;
        let employee_id = employee.employee_id.clone();
        workforce.employees.push(employee);

        for _ in 0..rng.random_range(0..=2_u8) {
            workforce
                .advances
                .push(generate_advance(&mut rng, &employee_id, reference)?);
        }
        for _ in 0..rng.random_range(0..=3_u8) {
            workforce
                .expenses
                .push(generate_expense(&mut rng, &employee_id, reference)?);
        }
        for _ in 0..rng.random_range(0..=2_u8) {
            workforce
                .overtime
                .push(generate_overtime(&mut rng, &employee_id, reference)?);
        }
        if rng.random_bool(0.6) {
            workforce
                .leave
                .push(generate_leave(&mut rng, &employee_id, reference)?);
        }
        workforce
            .documents
            .extend(generate_documents(&mut rng, &employee_id, reference)?);
    }

    Ok(workforce)
}

fn generate_employee(
    rng: &mut ChaCha8Rng,
    registry: &SeedRegistry,
    index: usize,
) -> Result<EmployeeSeed, GenerationError> {
    let name = generate_name(rng)?;
    let department = registry
        .departments()
        .choose(rng)
        .cloned()
        .unwrap_or_default();
    let position = POSITIONS.choose(rng).copied().unwrap_or("Analyst");
    let join_date = offset(registry.reference_date(), -rng.random_range(30..=2000_i64))?;

    Ok(EmployeeSeed {
        employee_id: format!("EMP-{index:04}"),
        email: email_for(&name),
        name,
        department,
        position: position.to_owned(),
        join_date,
        monthly_salary: rng.random_range(SALARY_STEPS) * 50,
    })
}

/// Generates a valid employee name, retrying when sanitising leaves too little.
fn generate_name(rng: &mut ChaCha8Rng) -> Result<String, GenerationError> {
    for _ in 0..MAX_NAME_ATTEMPTS {
        let first: String = FirstName(EN).fake_with_rng(rng);
        let last: String = LastName(EN).fake_with_rng(rng);
        let sanitized = sanitize_employee_name(&format!("{first} {last}"));
        let truncated: String = sanitized.trim().chars().take(EMPLOYEE_NAME_MAX).collect();

        if is_valid_employee_name(&truncated) {
            return Ok(truncated);
        }
    }

    Err(GenerationError::NameGenerationFailed {
        max_attempts: MAX_NAME_ATTEMPTS,
    })
}

fn generate_advance(
    rng: &mut ChaCha8Rng,
    employee_id: &str,
    reference: NaiveDate,
) -> Result<AdvanceSeed, GenerationError> {
    let amount = rng.random_range(4..=40_u32) * 250;
    let installments = rng.random_range(4..=10_u32);
    let outcome = pick_outcome(rng);
    let installments_paid = match outcome {
        OutcomeSeed::Approved => rng.random_range(0..=installments),
        OutcomeSeed::Pending | OutcomeSeed::Rejected => 0,
    };

    Ok(AdvanceSeed {
        employee_id: employee_id.to_owned(),
        amount,
        monthly_deduction: amount.div_ceil(installments),
        reason: pick(rng, ADVANCE_REASONS),
        outcome,
        decided_on: offset(reference, -rng.random_range(20..=240_i64))?,
        installments_paid,
    })
}

fn generate_expense(
    rng: &mut ChaCha8Rng,
    employee_id: &str,
    reference: NaiveDate,
) -> Result<ExpenseSeed, GenerationError> {
    let category = [
        ExpenseCategorySeed::Travel,
        ExpenseCategorySeed::Meals,
        ExpenseCategorySeed::Transport,
        ExpenseCategorySeed::Supplies,
        ExpenseCategorySeed::Training,
    ]
    .choose(rng)
    .copied()
    .unwrap_or(ExpenseCategorySeed::Supplies);
    let description = match category {
        ExpenseCategorySeed::Travel => "Client site visit",
        ExpenseCategorySeed::Meals => "Team lunch",
        ExpenseCategorySeed::Transport => "Airport taxi",
        ExpenseCategorySeed::Supplies => "Printer toner",
        ExpenseCategorySeed::Training => "Certification exam",
    };

    Ok(ExpenseSeed {
        employee_id: employee_id.to_owned(),
        category,
        amount: rng.random_range(20..=1500),
        expense_date: offset(reference, -rng.random_range(1..=90_i64))?,
        description: description.to_owned(),
        outcome: pick_outcome(rng),
    })
}

fn generate_overtime(
    rng: &mut ChaCha8Rng,
    employee_id: &str,
    reference: NaiveDate,
) -> Result<OvertimeSeed, GenerationError> {
    let work_date = offset(reference, -rng.random_range(1..=60_i64))?;
    let kind = if rng.random_ratio(1, 20) {
        OvertimeKindSeed::Holiday
    } else if matches!(work_date.weekday(), Weekday::Sat | Weekday::Sun) {
        OvertimeKindSeed::Weekend
    } else {
        OvertimeKindSeed::Weekday
    };

    Ok(OvertimeSeed {
        employee_id: employee_id.to_owned(),
        work_date,
        hours: rng.random_range(1..=6),
        kind,
        reason: pick(rng, OVERTIME_REASONS),
        outcome: pick_outcome(rng),
    })
}

fn generate_leave(
    rng: &mut ChaCha8Rng,
    employee_id: &str,
    reference: NaiveDate,
) -> Result<LeaveSeed, GenerationError> {
    let leave_type = match rng.random_range(0..10_u8) {
        0..=5 => LeaveTypeSeed::Annual,
        6..=7 => LeaveTypeSeed::Sick,
        8 => LeaveTypeSeed::Emergency,
        _ => LeaveTypeSeed::Unpaid,
    };
    let start_date = offset(reference, rng.random_range(-60..=45_i64))?;
    let end_date = offset(start_date, rng.random_range(0..=9_i64))?;

    Ok(LeaveSeed {
        employee_id: employee_id.to_owned(),
        leave_type,
        start_date,
        end_date,
        reason: "Personal time".to_owned(),
        outcome: pick_outcome(rng),
    })
}

fn generate_documents(
    rng: &mut ChaCha8Rng,
    employee_id: &str,
    reference: NaiveDate,
) -> Result<Vec<DocumentSeed>, GenerationError> {
    let mut documents = vec![DocumentSeed {
        employee_id: employee_id.to_owned(),
        kind: DocumentKindSeed::Contract,
        title: "Employment contract".to_owned(),
        expiry_date: None,
        outcome: OutcomeSeed::Approved,
    }];

    if rng.random_bool(0.7) {
        let kind = [
            DocumentKindSeed::Passport,
            DocumentKindSeed::Visa,
            DocumentKindSeed::NationalId,
        ]
        .choose(rng)
        .copied()
        .unwrap_or(DocumentKindSeed::Passport);
        let title = match kind {
            DocumentKindSeed::Passport => "Passport",
            DocumentKindSeed::Visa => "Work visa",
            DocumentKindSeed::NationalId | DocumentKindSeed::Contract => "National ID card",
        };
        documents.push(DocumentSeed {
            employee_id: employee_id.to_owned(),
            kind,
            title: title.to_owned(),
            expiry_date: Some(offset(reference, rng.random_range(-30..=900_i64))?),
            outcome: pick_outcome(rng),
        });
    }

    Ok(documents)
}

/// Picks an outcome weighted towards approval: 60% approved, 25% pending,
/// 15% rejected.
fn pick_outcome(rng: &mut ChaCha8Rng) -> OutcomeSeed {
    match rng.random_range(0..100_u8) {
        0..60 => OutcomeSeed::Approved,
        60..85 => OutcomeSeed::Pending,
        _ => OutcomeSeed::Rejected,
    }
}

fn pick(rng: &mut ChaCha8Rng, options: &[&str]) -> String {
    options.choose(rng).copied().unwrap_or_default().to_owned()
}

fn offset(date: NaiveDate, days: i64) -> Result<NaiveDate, GenerationError> {
    date.checked_add_signed(TimeDelta::days(days))
        .ok_or(GenerationError::DateOutOfRange { days })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::{fixture, rstest};

    use super::*;

    const TEST_REGISTRY_JSON: &str = r#"{
        "version": 1,
        "referenceDate": "2026-01-15",
        "departments": ["Engineering", "Finance", "Operations"],
        "seeds": [
            {"name": "test-seed", "seed": 42, "employeeCount": 10},
            {"name": "small-seed", "seed": 123, "employeeCount": 2}
        ]
    }"#;

    #[fixture]
    fn test_registry() -> SeedRegistry {
        SeedRegistry::from_json(TEST_REGISTRY_JSON).expect("valid test registry")
    }

    fn generate(registry: &SeedRegistry, seed_name: &str) -> ExampleWorkforce {
        let seed_def = registry.find_seed(seed_name).expect("seed should be found");
        generate_example_workforce(registry, seed_def).expect("generation should succeed")
    }

    #[rstest]
    fn generates_correct_employee_count(test_registry: SeedRegistry) {
        assert_eq!(generate(&test_registry, "test-seed").employees.len(), 10);
    }

    #[rstest]
    fn generation_is_deterministic(test_registry: SeedRegistry) {
        assert_eq!(
            generate(&test_registry, "test-seed"),
            generate(&test_registry, "test-seed")
        );
    }

    #[rstest]
    fn different_seeds_produce_different_names(test_registry: SeedRegistry) {
        let first = generate(&test_registry, "test-seed");
        let second = generate(&test_registry, "small-seed");

        assert_ne!(
            first.employees.first().map(|e| e.name.clone()),
            second.employees.first().map(|e| e.name.clone())
        );
    }

    #[rstest]
    fn employee_ids_are_sequential_and_unique(test_registry: SeedRegistry) {
        let workforce = generate(&test_registry, "test-seed");
        let ids: HashSet<_> = workforce.employees.iter().map(|e| &e.employee_id).collect();

        assert_eq!(ids.len(), 10);
        assert_eq!(
            workforce.employees.first().map(|e| e.employee_id.as_str()),
            Some("EMP-0001")
        );
    }

    #[rstest]
    fn records_reference_generated_employees(test_registry: SeedRegistry) {
        let workforce = generate(&test_registry, "test-seed");
        let ids: HashSet<_> = workforce
            .employees
            .iter()
            .map(|e| e.employee_id.clone())
            .collect();

        let owners = workforce
            .advances
            .iter()
            .map(|r| &r.employee_id)
            .chain(workforce.expenses.iter().map(|r| &r.employee_id))
            .chain(workforce.overtime.iter().map(|r| &r.employee_id))
            .chain(workforce.leave.iter().map(|r| &r.employee_id))
            .chain(workforce.documents.iter().map(|r| &r.employee_id));
        for owner in owners {
            assert!(ids.contains(owner), "unknown owner {owner}");
        }
    }

    #[rstest]
    fn departments_come_from_registry(test_registry: SeedRegistry) {
        let workforce = generate(&test_registry, "test-seed");
        for employee in &workforce.employees {
            assert!(
                test_registry.departments().contains(&employee.department),
                "unexpected department {}",
                employee.department
            );
        }
    }

    #[rstest]
    fn advances_are_internally_consistent(test_registry: SeedRegistry) {
        let workforce = generate(&test_registry, "test-seed");
        for advance in &workforce.advances {
            assert!(advance.monthly_deduction > 0);
            assert!(advance.monthly_deduction <= advance.amount);
            if advance.outcome != OutcomeSeed::Approved {
                assert_eq!(advance.installments_paid, 0);
            }
        }
    }

    #[rstest]
    fn leave_never_ends_before_it_starts(test_registry: SeedRegistry) {
        let workforce = generate(&test_registry, "test-seed");
        for leave in &workforce.leave {
            assert!(leave.end_date >= leave.start_date);
        }
    }

    #[rstest]
    fn every_employee_has_a_contract(test_registry: SeedRegistry) {
        let workforce = generate(&test_registry, "test-seed");
        for employee in &workforce.employees {
            assert!(workforce.documents.iter().any(|doc| {
                doc.employee_id == employee.employee_id && doc.kind == DocumentKindSeed::Contract
            }));
        }
    }

    #[test]
    fn offset_rejects_out_of_range_dates() {
        let result = offset(NaiveDate::MAX, 1);
        assert_eq!(result, Err(GenerationError::DateOutOfRange { days: 1 }));
    }
}
