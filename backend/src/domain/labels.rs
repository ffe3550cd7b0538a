//! Helper macro for closed vocabularies exchanged as snake_case labels.
//!
//! Statuses, categories and kinds travel through query strings, JSON bodies
//! and log fields. The macro keeps the wire label, `Display` and `FromStr`
//! for each vocabulary in one place.

use std::fmt;

/// Error returned when a label does not belong to its vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel {
    vocabulary: &'static str,
    value: String,
}

impl UnknownLabel {
    /// Build an error for `value` rejected by `vocabulary`.
    pub fn new(vocabulary: &'static str, value: impl Into<String>) -> Self {
        Self {
            vocabulary,
            value: value.into(),
        }
    }

    /// Name of the vocabulary that rejected the value.
    pub fn vocabulary(&self) -> &'static str {
        self.vocabulary
    }

    /// The rejected input.
    pub fn value(&self) -> &str {
        self.value.as_str()
    }
}

impl fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.vocabulary, self.value)
    }
}

impl std::error::Error for UnknownLabel {}

macro_rules! labelled_enum {
    (
        $(#[$outer:meta])*
        pub enum $name:ident ($vocabulary:literal) {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $label:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize,
            ::utoipa::ToSchema,
        )]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Stable snake_case label used on the wire and in logs.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::domain::UnknownLabel;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value.trim() {
                    $($label => Ok(Self::$variant),)+
                    other => Err($crate::domain::UnknownLabel::new($vocabulary, other)),
                }
            }
        }
    };
}

pub(crate) use labelled_enum;
