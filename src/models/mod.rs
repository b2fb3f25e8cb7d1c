//! Data models for the TSAK website backend.
//!
//! Wire types use camelCase to match the frontend TypeScript interfaces.

/// Declares a closed enumeration whose wire form is a fixed lowercase string.
///
/// Variants are ordered by declaration, which several listings rely on
/// (member positions, for example).
macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        pub enum $name {
            $(#[serde(rename = $text)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            /// Parse the wire form, ignoring case and surrounding whitespace.
            pub fn parse(s: &str) -> Option<Self> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

mod announcement;
mod event;
mod experience;
mod locale;
mod member;
mod scholarship;
mod seed;
mod sponsor;

pub use announcement::*;
pub use event::*;
pub use experience::*;
pub use locale::*;
pub use member::*;
pub use scholarship::*;
pub use seed::*;
pub use sponsor::*;

/// Resolve a stored media path against the configured media base URL.
///
/// Absolute URLs and paths without a base are returned unchanged.
pub fn media_url(base: Option<&str>, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    match base {
        Some(base) => format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        ),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_url_joins_base() {
        assert_eq!(
            media_url(Some("http://localhost:8000/media/"), "/events/a.png"),
            "http://localhost:8000/media/events/a.png"
        );
    }

    #[test]
    fn test_media_url_keeps_absolute_and_unbased() {
        assert_eq!(
            media_url(Some("http://cdn"), "https://x.org/a.png"),
            "https://x.org/a.png"
        );
        assert_eq!(media_url(None, "events/a.png"), "events/a.png");
    }

    #[test]
    fn test_string_enum_parse_is_case_insensitive() {
        assert_eq!(EventStatus::parse(" Open "), Some(EventStatus::Open));
        assert_eq!(Department::parse("PR"), Some(Department::Pr));
        assert_eq!(EventStatus::parse("pending"), None);
    }
}
