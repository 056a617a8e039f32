//! Hex color normalization
//!
//! Theme colors are scraped out of hand-written CSS, so the input shapes
//! vary: shorthand `#abc`, full `#aabbcc`, alpha-carrying `#aabbccdd`,
//! stray whitespace, or plain garbage. Everything funnels through
//! [`normalize`] before landing in a generated resource file.

/// Canonicalize a hex color string.
///
/// Accepts `#`-prefixed 3, 6, or 8 digit forms; shorthand digits are
/// doubled (`#abc` -> `#aabbcc`). The result is always lowercase. Any
/// other input yields `fallback` unchanged.
pub fn normalize(raw: &str, fallback: &str) -> String {
    let trimmed = raw.trim();
    let Some(hex) = trimmed.strip_prefix('#') else {
        return fallback.to_string();
    };
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return fallback.to_string();
    }
    match hex.len() {
        3 => {
            let doubled: String = hex.chars().flat_map(|c| [c, c]).collect();
            format!("#{}", doubled.to_lowercase())
        }
        6 | 8 => format!("#{}", hex.to_lowercase()),
        _ => fallback.to_string(),
    }
}

/// Derive the 8-digit ARGB form used by the status-bar plugin.
///
/// A 6-digit color gains an opaque `ff` alpha prefix; anything else is
/// returned unchanged (8-digit colors already carry their alpha).
pub fn to_argb8(color: &str) -> String {
    let hex = color.strip_prefix('#').unwrap_or("");
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        format!("#ff{hex}")
    } else {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FALLBACK: &str = "#ffffff";

    #[test]
    fn test_normalize_shorthand_doubles_digits() {
        assert_eq!(normalize("#abc", FALLBACK), "#aabbcc");
        assert_eq!(normalize("#F0A", FALLBACK), "#ff00aa");
    }

    #[test]
    fn test_normalize_full_forms_lowercase() {
        assert_eq!(normalize("#AABBCC", FALLBACK), "#aabbcc");
        assert_eq!(normalize("#11223344", FALLBACK), "#11223344");
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(normalize("  #123456 ", FALLBACK), "#123456");
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert_eq!(normalize("", FALLBACK), FALLBACK);
        assert_eq!(normalize("red", FALLBACK), FALLBACK);
        assert_eq!(normalize("#12345", FALLBACK), FALLBACK);
        assert_eq!(normalize("#12345g", FALLBACK), FALLBACK);
        assert_eq!(normalize("123456", FALLBACK), FALLBACK);
    }

    #[test]
    fn test_to_argb8_prefixes_opaque_alpha() {
        assert_eq!(to_argb8("#aabbcc"), "#ffaabbcc");
    }

    #[test]
    fn test_to_argb8_leaves_other_shapes_alone() {
        assert_eq!(to_argb8("#11223344"), "#11223344");
        assert_eq!(to_argb8("transparent"), "transparent");
    }

    proptest! {
        #[test]
        fn normalized_valid_input_is_canonical(hex in "[0-9a-fA-F]{6}") {
            let result = normalize(&format!("#{hex}"), FALLBACK);
            prop_assert_eq!(result, format!("#{}", hex.to_lowercase()));
        }

        #[test]
        fn normalized_shorthand_has_full_length(hex in "[0-9a-fA-F]{3}") {
            let result = normalize(&format!("#{hex}"), FALLBACK);
            prop_assert_eq!(result.len(), 7);
            prop_assert!(result.starts_with('#'));
            prop_assert!(result[1..].chars().all(|c| c.is_ascii_hexdigit()));
        }

        #[test]
        fn unprefixed_input_always_falls_back(raw in "[^#]*") {
            prop_assert_eq!(normalize(&raw, FALLBACK), FALLBACK);
        }

        #[test]
        fn argb_of_normalized_six_digit_is_opaque(hex in "[0-9a-fA-F]{6}") {
            let normalized = normalize(&format!("#{hex}"), FALLBACK);
            let argb = to_argb8(&normalized);
            prop_assert_eq!(argb.len(), 9);
            prop_assert!(argb.starts_with("#ff"));
        }
    }
}
