//! System language detection for the geocoder culture hint.

use std::env;

/// Environment variables consulted, in priority order.
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// Returns the system language as a BCP 47 style tag (`en-US`), if any.
///
/// Best effort: the first non-empty of `LC_ALL`, `LC_MESSAGES` and `LANG`
/// is normalized with [`normalize_locale`].
#[must_use]
pub fn system_locale() -> Option<String> {
    LOCALE_VARS
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find(|value| !value.is_empty())
        .and_then(|value| normalize_locale(&value))
}

/// Converts a POSIX locale name into a culture tag.
///
/// Drops the codeset and modifier (`en_US.UTF-8@euro` -> `en-US`). The `C`
/// and `POSIX` locales carry no language and yield `None`.
#[must_use]
pub fn normalize_locale(raw: &str) -> Option<String> {
    let base = raw
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();

    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }

    Some(base.replace('_', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_codeset_and_modifier() {
        assert_eq!(normalize_locale("en_US.UTF-8").as_deref(), Some("en-US"));
        assert_eq!(normalize_locale("de_DE@euro").as_deref(), Some("de-DE"));
        assert_eq!(normalize_locale("es").as_deref(), Some("es"));
    }

    #[test]
    fn c_locale_has_no_language() {
        assert_eq!(normalize_locale("C"), None);
        assert_eq!(normalize_locale("POSIX"), None);
        assert_eq!(normalize_locale("C.UTF-8"), None);
        assert_eq!(normalize_locale(""), None);
    }
}
