use std::fmt;

/// A closed set of lifecycle states with fixed wire spellings.
///
/// Implemented by every status enum so columns can enumerate options and
/// parse filter input without knowing the concrete type.
pub trait Status: Copy + Eq + fmt::Debug + 'static {
    /// Every variant, in workflow order.
    const ALL: &'static [Self];

    /// Short noun used in error messages ("task", "idea", ...).
    const KIND: &'static str;

    /// The wire spelling of this status.
    fn as_str(&self) -> &'static str;

    /// Parses a wire spelling, case-insensitively.
    fn parse(value: &str) -> crate::Result<Self> {
        let trimmed = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| crate::Error::UnknownStatus {
                kind: Self::KIND,
                value: value.to_string(),
            })
    }

    /// Wire spellings of every variant.
    fn options() -> Vec<String> {
        Self::ALL.iter().map(|s| s.as_str().to_string()).collect()
    }
}

/// Implements `Display` and `FromStr` in terms of [`Status`].
macro_rules! status_impls {
    ($ty:ty) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::Status::as_str(self))
            }
        }

        impl std::str::FromStr for $ty {
            type Err = $crate::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as $crate::Status>::parse(s)
            }
        }
    };
}

pub(crate) use status_impls;
