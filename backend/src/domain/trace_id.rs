//! Correlation identifier shared by request logs and error payloads.
//!
//! The HTTP middleware places one [`TraceId`] in task-local scope per request;
//! [`crate::domain::Error`] constructors read it back so every failure names
//! the request it came from. Spawned tasks do not inherit the scope.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Header used to exchange trace identifiers with the console front end.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static CURRENT: TraceId;
}

/// UUID naming one request.
///
/// # Examples
/// ```
/// use hr_console::TraceId;
///
/// let id: TraceId = "6f1d0c52-8f0e-4b8e-9a57-6a8d7c1f2e3b".parse().expect("uuid");
/// assert_eq!(id.to_string(), "6f1d0c52-8f0e-4b8e-9a57-6a8d7c1f2e3b");
/// assert!(TraceId::current().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random identifier.
    #[must_use]
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Accept an identifier supplied by a client.
    ///
    /// Surrounding whitespace is ignored. The nil UUID is refused because
    /// clients send it as a placeholder rather than a real correlation id.
    #[must_use]
    pub fn from_header(raw: &str) -> Option<Self> {
        let uuid = Uuid::parse_str(raw.trim()).ok()?;
        (!uuid.is_nil()).then_some(Self(uuid))
    }

    /// Identifier of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Drive `fut` with `trace_id` as the current identifier.
    pub async fn scope<Fut: Future>(trace_id: Self, fut: Fut) -> Fut::Output {
        CURRENT.scope(trace_id, fut).await
    }

    /// Run `f` with `trace_id` as the current identifier.
    pub fn sync_scope<F: FnOnce() -> R, R>(trace_id: Self, f: F) -> R {
        CURRENT.sync_scope(trace_id, f)
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[tokio::test]
    async fn scopes_nest_and_unwind() {
        let outer = TraceId::generate();
        let inner = TraceId::generate();
        let seen = TraceId::scope(outer, async move {
            let nested = TraceId::scope(inner, async { TraceId::current() }).await;
            (nested, TraceId::current())
        })
        .await;
        assert_eq!(seen, (Some(inner), Some(outer)));
        assert_eq!(TraceId::current(), None);
    }

    #[test]
    fn sync_scope_exposes_the_identifier() {
        let id = TraceId::generate();
        assert_eq!(TraceId::sync_scope(id, TraceId::current), Some(id));
    }

    #[rstest]
    #[case(" 6f1d0c52-8f0e-4b8e-9a57-6a8d7c1f2e3b ", true)]
    #[case("6F1D0C52-8F0E-4B8E-9A57-6A8D7C1F2E3B", true)]
    #[case("00000000-0000-0000-0000-000000000000", false)]
    #[case("req-42", false)]
    #[case("", false)]
    fn header_values_must_be_real_uuids(#[case] raw: &str, #[case] accepted: bool) {
        assert_eq!(TraceId::from_header(raw).is_some(), accepted);
    }

    #[test]
    fn display_is_lowercase_hyphenated() {
        let id = TraceId::from_header("6F1D0C52-8F0E-4B8E-9A57-6A8D7C1F2E3B").expect("uuid");
        assert_eq!(id.to_string(), "6f1d0c52-8f0e-4b8e-9a57-6a8d7c1f2e3b");
    }
}
