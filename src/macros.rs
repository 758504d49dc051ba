//! Macros to reduce boilerplate in the codebase

/// Macro to generate Display and FromStr implementations for enums
///
/// Parsing is case-insensitive, so wire codes like `FINTECH` and CLI input
/// like `fintech` resolve to the same variant.
///
/// # Usage
///
/// ```rust,ignore
/// use crate::error::DirectoryError;
///
/// enum_display_fromstr!(
///     MyEnum,
///     DirectoryError::InvalidMyEnum,
///     {
///         Variant1 => "variant1",
///         Variant2 => "variant2",
///     }
/// );
/// ```
#[macro_export]
macro_rules! enum_display_fromstr {
    (
        $enum_name:ident,
        $error_variant:path,
        { $($variant:ident => $str:expr),+ $(,)? }
    ) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $($enum_name::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::error::DirectoryError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if unicase::eq(s, $str) {
                        return Ok($enum_name::$variant);
                    }
                )+
                Err($error_variant(s.to_string()))
            }
        }
    };
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum TestEnum {
        A,
        Bee,
    }

    enum_display_fromstr!(
        TestEnum,
        crate::error::DirectoryError::InvalidSearchField,
        { A => "a", Bee => "BEE" }
    );

    #[test]
    fn test_display() {
        assert_eq!(TestEnum::A.to_string(), "a");
        assert_eq!(TestEnum::Bee.to_string(), "BEE");
    }

    #[test]
    fn test_from_str_ignores_case_and_padding() {
        assert_eq!(TestEnum::from_str(" A ").unwrap(), TestEnum::A);
        assert_eq!(TestEnum::from_str("bee").unwrap(), TestEnum::Bee);
        assert!(TestEnum::from_str("c").is_err());
    }
}
