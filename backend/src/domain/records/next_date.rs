//! Selection rule for "next date" fields in per-employee summaries.

use chrono::NaiveDate;

use crate::domain::labels::labelled_enum;

labelled_enum! {
    /// How a summary picks one date when several records supply one.
    #[derive(Default)]
    pub enum NextDatePolicy ("next date policy") {
        /// Date from the last record, in fold order, that supplied one.
        #[default]
        LastSeen => "last_seen",
        /// Earliest of the supplied dates; independent of input order.
        EarliestDue => "earliest_due",
    }
}

impl NextDatePolicy {
    /// Fold `candidate` into the date chosen so far.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use hr_console::domain::NextDatePolicy;
    ///
    /// let may = NaiveDate::from_ymd_opt(2026, 5, 1);
    /// let march = NaiveDate::from_ymd_opt(2026, 3, 1);
    /// assert_eq!(NextDatePolicy::EarliestDue.fold(may, march), march);
    /// assert_eq!(NextDatePolicy::LastSeen.fold(march, may), may);
    /// assert_eq!(NextDatePolicy::LastSeen.fold(may, None), may);
    /// assert_eq!(NextDatePolicy::default(), NextDatePolicy::LastSeen);
    /// ```
    pub fn fold(self, current: Option<NaiveDate>, candidate: Option<NaiveDate>) -> Option<NaiveDate> {
        match (self, current, candidate) {
            (_, current, None) => current,
            (Self::LastSeen, _, candidate) => candidate,
            (Self::EarliestDue, None, candidate) => candidate,
            (Self::EarliestDue, Some(current), Some(candidate)) => Some(current.min(candidate)),
        }
    }
}
