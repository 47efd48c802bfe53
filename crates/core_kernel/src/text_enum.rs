//! Text codec for closed enums stored as lowercase strings

/// Implements `Display` and a case-insensitive `FromStr` for an enum that
/// already has `as_str()`. Unknown text becomes `DomainError::Validation`.
///
/// ```rust
/// use core_kernel::text_enum;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Tier { Gold, Silver }
///
/// impl Tier {
///     fn as_str(&self) -> &'static str {
///         match self { Tier::Gold => "gold", Tier::Silver => "silver" }
///     }
/// }
///
/// text_enum!(Tier, "tier", [Tier::Gold, Tier::Silver]);
///
/// assert_eq!("GOLD".parse::<Tier>().unwrap(), Tier::Gold);
/// assert_eq!(Tier::Silver.to_string(), "silver");
/// ```
#[macro_export]
macro_rules! text_enum {
    ($ty:ty, $label:literal, $all:expr) => {
        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $ty {
            type Err = $crate::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.to_ascii_lowercase();
                $all
                    .into_iter()
                    .find(|v: &$ty| v.as_str() == wanted)
                    .ok_or_else(|| {
                        $crate::DomainError::validation(format!("unknown {} '{}'", $label, s))
                    })
            }
        }
    };
}
