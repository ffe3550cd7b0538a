//! Money helpers shared by payroll, advances and summaries.

use rust_decimal::{Decimal, RoundingStrategy};

/// Largest amount accepted for any single salary, advance, claim, cost or
/// repayment.
///
/// Summaries and payroll add and multiply validated amounts; capping the
/// inputs keeps that arithmetic far from `Decimal`'s overflow bound.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Round a monetary amount to two decimal places, half away from zero.
///
/// # Examples
/// ```
/// use hr_console::domain::round_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_money(Decimal::new(10005, 3)), Decimal::new(1001, 2));
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Sum amounts, starting from zero.
pub fn sum_money<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts.into_iter().fold(Decimal::ZERO, |acc, value| acc + value)
}
