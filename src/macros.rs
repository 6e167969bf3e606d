//! Macros for string-keyed enums

/// Generate `as_str`, `ALL`, `Display` and a case-insensitive `FromStr` for a
/// unit enum. Parse failures become `$error_variant(input)`.
///
/// ```rust,ignore
/// string_enum!(
///     InvoiceStatus,
///     BackofficeError::Other,
///     {
///         Draft => "draft",
///         Paid => "paid",
///     }
/// );
/// ```
#[macro_export]
macro_rules! string_enum {
    (
        $enum_name:ident,
        $error_variant:path,
        { $($variant:ident => $str:expr),+ $(,)? }
    ) => {
        impl $enum_name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$enum_name] = &[$($enum_name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($enum_name::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::error::BackofficeError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok($enum_name::$variant),)+
                    _ => Err($error_variant(s.to_string())),
                }
            }
        }
    };
}
