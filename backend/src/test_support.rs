//! Test utilities for the backend crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled when running tests
//! or with the `test-support` feature.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

/// Clock whose time only moves when a test says so.
///
/// # Examples
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use hr_console::test_support::MutableClock;
/// use mockable::Clock;
///
/// let start = Utc.with_ymd_and_hms(2026, 5, 4, 9, 0, 0).unwrap();
/// let clock = MutableClock::new(start);
/// clock.advance_seconds(90);
/// assert_eq!((clock.utc() - start).num_seconds(), 90);
/// ```
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: Duration) {
        let delta = match TimeDelta::from_std(delta) {
            Ok(delta) => delta,
            Err(error) => {
                panic!("failed to convert Duration to TimeDelta: {error}; delta={delta:?}",)
            }
        };
        *self.lock_clock() += delta;
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    /// Jump to `now`, forwards or backwards.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock_clock() = now;
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

pub mod openapi {
    //! OpenAPI schema traversal helpers.
    //!
    //! Provides utilities for extracting and inspecting utoipa `Schema` types,
    //! particularly for resolving `RefOr<Schema>` wrappers to concrete `Object`
    //! schemas with diagnostic error messages on type mismatches.

    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::{Object, Schema};

    /// Extract an `Object` schema, panicking with a diagnostic if not an Object.
    ///
    /// Provides detailed error messages for refs, combinators, and other schema types.
    pub fn unwrap_object_schema<'a>(schema: &'a RefOr<Schema>, name: &str) -> &'a Object {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj,
            RefOr::Ref(reference) => {
                panic!(
                    "schema '{name}' is a $ref to '{}'; resolve the reference first",
                    reference.ref_location
                );
            }
            RefOr::T(Schema::AllOf(_)) => {
                panic!("schema '{name}' is an AllOf combinator; inspect composed schemas");
            }
            RefOr::T(Schema::OneOf(_)) => {
                panic!("schema '{name}' is a OneOf combinator; inspect variant schemas");
            }
            RefOr::T(Schema::AnyOf(_)) => {
                panic!("schema '{name}' is an AnyOf combinator; inspect variant schemas");
            }
            RefOr::T(Schema::Array(_)) => {
                panic!("schema '{name}' is an Array, not an Object");
            }
            _ => panic!("schema '{name}' has unexpected type"),
        }
    }

    /// Get a property from an Object schema by name.
    ///
    /// Panics if the property does not exist.
    pub fn get_property<'a>(obj: &'a Object, field: &str) -> &'a RefOr<Schema> {
        match obj.properties.get(field) {
            Some(property) => property,
            None => panic!("property '{field}' not found"),
        }
    }
}
