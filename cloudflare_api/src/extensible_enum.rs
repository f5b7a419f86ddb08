//! Open enumerations: named constants plus an escape hatch for values the
//! server adds later.
//!
//! Types are declared with [`extensible_enum!`](crate::extensible_enum!).
//! Construction from any string succeeds, serialization writes the raw
//! string back unchanged, and equality/hashing follow the [`CaseRule`]
//! chosen once per type.
//!
//! ```
//! cloudflare_api::extensible_enum! {
//!     /// Access granted to a token.
//!     pub struct AccessLevel: Ordinal {
//!         READ_ONLY = "read-only",
//!         READ_WRITE = "read-write",
//!     }
//! }
//!
//! assert_eq!(AccessLevel::new("read-only"), AccessLevel::READ_ONLY);
//! assert_eq!(AccessLevel::new("admin").as_str(), "admin");
//! ```

use std::hash::{Hash, Hasher};

/// How two raw values of one open enum are compared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaseRule {
    /// Byte-for-byte comparison.
    Ordinal,
    /// ASCII letters compare equal regardless of case.
    IgnoreAsciiCase,
}

impl CaseRule {
    pub fn eq(self, a: &str, b: &str) -> bool {
        match self {
            CaseRule::Ordinal => a == b,
            CaseRule::IgnoreAsciiCase => a.eq_ignore_ascii_case(b),
        }
    }

    /// Hashes consistently with [`CaseRule::eq`].
    pub fn hash<H: Hasher>(self, value: &str, state: &mut H) {
        match self {
            CaseRule::Ordinal => value.hash(state),
            CaseRule::IgnoreAsciiCase => {
                for byte in value.bytes() {
                    state.write_u8(byte.to_ascii_lowercase());
                }
                state.write_u8(0xff);
            }
        }
    }
}

/// Behaviour shared by every type declared with `extensible_enum!`.
pub trait ExtensibleEnum: Sized + 'static {
    const CASE_RULE: CaseRule;

    /// Raw values of the pre-registered constants.
    const KNOWN: &'static [&'static str];

    fn as_str(&self) -> &str;

    /// True when the value matches one of the registered constants.
    fn is_known(&self) -> bool {
        Self::KNOWN
            .iter()
            .any(|known| Self::CASE_RULE.eq(known, self.as_str()))
    }
}

/// Declares an open enum backed by a string.
///
/// The case rule is either `Ordinal` or `IgnoreAsciiCase`.
#[macro_export]
macro_rules! extensible_enum {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident : $rule:ident {
            $(
                $(#[$const_meta:meta])*
                $konst:ident = $value:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone)]
        $vis struct $name(::std::borrow::Cow<'static, str>);

        #[allow(dead_code)]
        impl $name {
            $(
                $(#[$const_meta])*
                pub const $konst: Self = Self(::std::borrow::Cow::Borrowed($value));
            )*

            /// Wraps any string. Unknown values are kept verbatim.
            pub fn new(value: impl Into<String>) -> Self {
                Self(::std::borrow::Cow::Owned(value.into()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_known(&self) -> bool {
                <Self as $crate::extensible_enum::ExtensibleEnum>::is_known(self)
            }
        }

        impl $crate::extensible_enum::ExtensibleEnum for $name {
            const CASE_RULE: $crate::extensible_enum::CaseRule =
                $crate::extensible_enum::CaseRule::$rule;
            const KNOWN: &'static [&'static str] = &[$($value),*];

            fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::std::cmp::PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                <Self as $crate::extensible_enum::ExtensibleEnum>::CASE_RULE.eq(&self.0, &other.0)
            }
        }

        impl ::std::cmp::Eq for $name {}

        impl ::std::cmp::PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                <Self as $crate::extensible_enum::ExtensibleEnum>::CASE_RULE.eq(&self.0, other)
            }
        }

        impl ::std::cmp::PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                <Self as $crate::extensible_enum::ExtensibleEnum>::CASE_RULE.eq(&self.0, other)
            }
        }

        impl ::std::hash::Hash for $name {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                <Self as $crate::extensible_enum::ExtensibleEnum>::CASE_RULE.hash(&self.0, state);
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.as_str()).finish()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::std::convert::AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl ::std::convert::From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl ::std::convert::From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::std::convert::Infallible;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                Ok(Self::new(s))
            }
        }

        impl $crate::__serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__serde::Serializer,
            {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> $crate::__serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::__serde::Deserializer<'de>,
            {
                <String as $crate::__serde::Deserialize>::deserialize(deserializer).map(Self::new)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    crate::extensible_enum! {
        /// Test enum compared byte-for-byte.
        pub struct Mode: Ordinal {
            READ_ONLY = "read-only",
            READ_WRITE = "read-write",
        }
    }

    crate::extensible_enum! {
        /// Test enum compared without regard to ASCII case.
        pub struct Kind: IgnoreAsciiCase {
            ALPHA = "Alpha",
            BETA = "beta",
        }
    }

    #[test]
    fn constant_equals_value_built_from_same_string() {
        assert_eq!(Mode::new("read-only"), Mode::READ_ONLY);
        assert_eq!(Mode::READ_ONLY, "read-only");
        assert!(Mode::READ_WRITE.is_known());
    }

    #[test]
    fn ordinal_rule_is_case_sensitive() {
        assert_ne!(Mode::new("READ-ONLY"), Mode::READ_ONLY);
        assert!(!Mode::new("READ-ONLY").is_known());
    }

    #[test]
    fn ignore_case_rule_matches_any_ascii_case() {
        assert_eq!(Kind::new("ALPHA"), Kind::ALPHA);
        assert_eq!(Kind::new("Beta"), Kind::BETA);
        assert!(Kind::new("bEtA").is_known());
    }

    #[test]
    fn hash_agrees_with_case_rule() {
        let mut set = HashSet::new();
        set.insert(Kind::new("alpha"));
        assert!(set.contains(&Kind::ALPHA));

        let mut set = HashSet::new();
        set.insert(Mode::new("read-only"));
        assert!(!set.contains(&Mode::new("Read-Only")));
    }

    #[test]
    fn unknown_value_is_accepted_and_preserved() {
        let mode: Mode = "write-only-v2".parse().unwrap();
        assert_eq!(mode.as_str(), "write-only-v2");
        assert!(!mode.is_known());
        assert_eq!(mode.to_string(), "write-only-v2");
    }

    #[test]
    fn round_trip_preserves_raw_bytes() {
        for raw in ["read-only", "brand-new", "MiXeD_Case", "", "ünïcödé"] {
            let encoded = serde_json::to_string(&Kind::new(raw)).unwrap();
            let decoded: Kind = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded.as_str(), raw);
            assert_eq!(decoded, Kind::new(raw));
        }
    }

    #[test]
    fn serializes_constants_as_plain_strings() {
        assert_eq!(
            serde_json::to_string(&Mode::READ_WRITE).unwrap(),
            "\"read-write\""
        );
    }

    #[test]
    fn debug_shows_type_and_raw_value() {
        assert_eq!(format!("{:?}", Kind::new("x")), "Kind(\"x\")");
    }
}
