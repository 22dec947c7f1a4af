//! Enum → wire token canonicalization.
//!
//! Every enumerated request parameter goes through `wire_token`, which
//! lowercases the variant name. Variant names are spelled in PascalCase on the
//! Rust side and must lowercase to exactly the server's token.

use crate::error::ApiError;

/// An enumerated parameter whose variants map one-to-one to server tokens.
pub trait WireToken: Copy + 'static {
    /// All variants, in declaration order.
    const VARIANTS: &'static [Self];

    /// The variant's name as declared.
    fn variant_name(self) -> &'static str;
}

/// The lowercase server token for `value`.
pub fn wire_token<T: WireToken>(value: T) -> String {
    value.variant_name().to_lowercase()
}

/// Case-insensitive lookup of a variant by name or token.
pub fn parse_token<T: WireToken>(input: &str) -> Result<T, ApiError> {
    T::VARIANTS
        .iter()
        .copied()
        .find(|v| v.variant_name().eq_ignore_ascii_case(input.trim()))
        .ok_or_else(|| ApiError::InvalidArgument(format!("unknown token: {input:?}")))
}

/// Implements `WireToken`, `Display` and `FromStr` for a fieldless enum.
macro_rules! wire_enum {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        impl $crate::token::WireToken for $ty {
            const VARIANTS: &'static [Self] = &[$($ty::$variant),+];

            fn variant_name(self) -> &'static str {
                match self {
                    $($ty::$variant => stringify!($variant)),+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&$crate::token::wire_token(*self))
            }
        }

        impl std::str::FromStr for $ty {
            type Err = $crate::error::ApiError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $crate::token::parse_token(s)
            }
        }
    };
}

pub(crate) use wire_enum;
