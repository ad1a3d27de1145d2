//! Filename naming-convention codec
//!
//! Brand assets are named `{GYMCODE}-{assetType}-{descriptor}-v{variant}.{ext}`,
//! e.g. `OASIS-logo-horizontal-dark-v1.png`. This module provides the builder
//! and parser pair for that format, plus filename sanitization and variant
//! numbering helpers used by the ingestion pipeline.
//!
//! Parsing never fails: a filename that does not match the grammar decodes to
//! a [`ParsedFilename`] with `is_valid = false` and the original name
//! preserved. Callers decide policy (warning vs. hard error) per flow.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Strict grammar: `{GYMCODE}-{type}-{descriptor}-v{N}.{ext}`, case-insensitive.
static FILENAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([A-Z0-9]+)-([A-Z0-9]+)-([A-Z0-9-]+)-v(\d+)\.([A-Z0-9]+)$")
        .expect("filename grammar regex is valid")
});

/// A structured asset name. Fields are normalized on encode, so degenerate
/// input still produces a string (possibly with empty segments) rather than
/// an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConvention {
    /// Uppercase alphanumeric gym identifier, e.g. `OASIS`.
    pub gym_code: String,
    /// Lowercase alphanumeric asset type, e.g. `logo`, `hero`, `icon`.
    pub asset_type: String,
    /// Lowercase alphanumeric/hyphen descriptor, e.g. `horizontal-dark`.
    pub descriptor: String,
    /// Variant number disambiguating assets sharing gym/type/descriptor.
    pub variant: u32,
    /// Lowercase file extension without the leading dot.
    pub extension: String,
}

impl NamingConvention {
    /// Render the convention as a filename, normalizing every field first.
    pub fn encode(&self) -> String {
        let gym_code: String = self
            .gym_code
            .to_uppercase()
            .chars()
            .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
            .collect();
        let asset_type: String = self
            .asset_type
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            .collect();
        let descriptor: String = self
            .descriptor
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        let extension = self
            .extension
            .to_lowercase()
            .trim_start_matches('.')
            .to_string();

        format!(
            "{}-{}-{}-v{}.{}",
            gym_code, asset_type, descriptor, self.variant, extension
        )
    }
}

/// Result of decoding a filename against the naming convention.
///
/// When `is_valid` is false all string fields are empty, `variant` is 1, and
/// `original_name` holds the input verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFilename {
    pub gym_code: String,
    pub asset_type: String,
    pub descriptor: String,
    pub variant: u32,
    pub extension: String,
    pub is_valid: bool,
    pub original_name: String,
}

impl ParsedFilename {
    fn invalid(original_name: &str) -> Self {
        ParsedFilename {
            gym_code: String::new(),
            asset_type: String::new(),
            descriptor: String::new(),
            variant: 1,
            extension: String::new(),
            is_valid: false,
            original_name: original_name.to_string(),
        }
    }
}

/// Decode a filename against the strict grammar.
///
/// Total: any input yields a `ParsedFilename`; non-matches are reported via
/// `is_valid` only. Used by the bulk-upload flow and by [`next_variant`].
pub fn decode(filename: &str) -> ParsedFilename {
    let Some(caps) = FILENAME_PATTERN.captures(filename) else {
        return ParsedFilename::invalid(filename);
    };

    // An absurd digit run overflowing u32 is treated as a non-match.
    let Ok(variant) = caps[4].parse::<u32>() else {
        return ParsedFilename::invalid(filename);
    };

    ParsedFilename {
        gym_code: caps[1].to_uppercase(),
        asset_type: caps[2].to_lowercase(),
        descriptor: caps[3].to_lowercase(),
        variant,
        extension: caps[5].to_lowercase(),
        is_valid: true,
        original_name: filename.to_string(),
    }
}

/// Decode a filename, additionally accepting a bare leading gym code.
///
/// Campaign uploads often arrive named `OASIS-spring-promo.jpg` without the
/// full `type-descriptor-vN` suffix. This variant tries the strict grammar
/// first; on failure it matches the leading `-`-delimited token against the
/// caller's known gym codes (case-insensitive) and fills in best-effort
/// type/descriptor from the remaining tokens. The result still reports
/// `is_valid = false` for such partial matches; only `gym_code` is trusted.
///
/// Used only by the campaign ingestion flow. The bulk flow uses [`decode`].
pub fn decode_with_gym_codes(filename: &str, known_codes: &[String]) -> ParsedFilename {
    let strict = decode(filename);
    if strict.is_valid {
        return strict;
    }

    let extension = file_extension(filename);
    let stem = match filename.rfind('.') {
        Some(idx) if idx + 1 < filename.len() => &filename[..idx],
        _ => filename,
    };

    let mut tokens = stem.split('-');
    let Some(first) = tokens.next() else {
        return ParsedFilename::invalid(filename);
    };
    let candidate = first.to_uppercase();
    if !known_codes.iter().any(|c| c.eq_ignore_ascii_case(&candidate)) {
        return ParsedFilename::invalid(filename);
    }

    let asset_type = tokens.next().unwrap_or("").to_lowercase();
    let descriptor = tokens.collect::<Vec<_>>().join("-").to_lowercase();

    ParsedFilename {
        gym_code: candidate,
        asset_type,
        descriptor,
        variant: 1,
        extension,
        is_valid: false,
        original_name: filename.to_string(),
    }
}

/// Last `.`-delimited segment of a filename, lowercased; empty if no dot.
pub fn file_extension(filename: &str) -> String {
    match filename.rfind('.') {
        Some(idx) if idx + 1 < filename.len() => filename[idx + 1..].to_lowercase(),
        _ => String::new(),
    }
}

/// Sanitize arbitrary text into a filename-safe token.
///
/// Characters outside `[A-Za-z0-9.-]` become `-`, runs of `-` collapse to
/// one, and leading/trailing `-` are stripped. Idempotent.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_hyphen = false;
    for c in text.chars() {
        let mapped = if c.is_ascii_alphanumeric() || c == '.' {
            c
        } else {
            '-'
        };
        if mapped == '-' {
            if !last_was_hyphen {
                out.push('-');
            }
            last_was_hyphen = true;
        } else {
            out.push(mapped);
            last_was_hyphen = false;
        }
    }
    out.trim_matches('-').to_string()
}

/// Next free variant number among `existing` names sharing `base`.
///
/// Names that start with `base` but fail to decode contribute variant 0
/// rather than being excluded, matching the established numbering behavior
/// of existing asset libraries. No prefixed names at all yields 1.
pub fn next_variant(existing: &[String], base: &str) -> u32 {
    let max = existing
        .iter()
        .filter(|name| name.starts_with(base))
        .map(|name| {
            let parsed = decode(name);
            if parsed.is_valid {
                parsed.variant
            } else {
                0
            }
        })
        .max();

    match max {
        Some(v) => v + 1,
        None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convention() -> NamingConvention {
        NamingConvention {
            gym_code: "OASIS".to_string(),
            asset_type: "logo".to_string(),
            descriptor: "horizontal-dark".to_string(),
            variant: 1,
            extension: "png".to_string(),
        }
    }

    #[test]
    fn encode_normalizes_fields() {
        let c = NamingConvention {
            gym_code: "oa sis!".to_string(),
            asset_type: "Logo".to_string(),
            descriptor: "Horizontal Dark".to_string(),
            variant: 3,
            extension: ".PNG".to_string(),
        };
        assert_eq!(c.encode(), "OASIS-logo-horizontal-dark-v3.png");
    }

    #[test]
    fn encode_is_total_on_degenerate_input() {
        let c = NamingConvention {
            gym_code: "!!!".to_string(),
            asset_type: String::new(),
            descriptor: String::new(),
            variant: 1,
            extension: String::new(),
        };
        // Degenerate but still a string, never an error.
        assert_eq!(c.encode(), "---v1.");
    }

    #[test]
    fn decode_round_trips_valid_conventions() {
        let c = convention();
        let parsed = decode(&c.encode());
        assert!(parsed.is_valid);
        assert_eq!(parsed.gym_code, c.gym_code);
        assert_eq!(parsed.asset_type, c.asset_type);
        assert_eq!(parsed.descriptor, c.descriptor);
        assert_eq!(parsed.variant, c.variant);
        assert_eq!(parsed.extension, c.extension);
    }

    #[test]
    fn decode_is_case_insensitive_and_normalizes() {
        let parsed = decode("oasis-LOGO-Horizontal-Dark-V2.PNG");
        assert!(parsed.is_valid);
        assert_eq!(parsed.gym_code, "OASIS");
        assert_eq!(parsed.asset_type, "logo");
        assert_eq!(parsed.descriptor, "horizontal-dark");
        assert_eq!(parsed.variant, 2);
        assert_eq!(parsed.extension, "png");
    }

    #[test]
    fn decode_never_panics_on_arbitrary_input() {
        for input in [
            "",
            "no-hyphens",
            "RANDOMTEXT.png",
            "A-b-c-d-e-f-g-v1.png.extra",
            "----",
            "OASIS-logo-x-v.png",
            "OASIS-logo-x-v99999999999999999999.png",
            "名前-logo-dark-v1.png",
        ] {
            let parsed = decode(input);
            assert!(!parsed.is_valid, "expected invalid: {input}");
            assert_eq!(parsed.original_name, input);
            assert_eq!(parsed.variant, 1);
            assert_eq!(parsed.gym_code, "");
        }
    }

    #[test]
    fn decode_end_to_end_example() {
        let parsed = decode("OASIS-logo-horizontal-dark-v1.png");
        assert!(parsed.is_valid);
        assert_eq!(parsed.gym_code, "OASIS");
        assert_eq!(parsed.asset_type, "logo");
        assert_eq!(parsed.descriptor, "horizontal-dark");
        assert_eq!(parsed.variant, 1);
        assert_eq!(parsed.extension, "png");
    }

    #[test]
    fn permissive_decode_accepts_bare_gym_prefix() {
        let codes = vec!["OASIS".to_string(), "IRONWORKS".to_string()];
        let parsed = decode_with_gym_codes("oasis-spring-promo.jpg", &codes);
        assert!(!parsed.is_valid);
        assert_eq!(parsed.gym_code, "OASIS");
        assert_eq!(parsed.asset_type, "spring");
        assert_eq!(parsed.descriptor, "promo");
        assert_eq!(parsed.extension, "jpg");
        assert_eq!(parsed.variant, 1);
    }

    #[test]
    fn permissive_decode_prefers_strict_grammar() {
        let codes = vec!["OASIS".to_string()];
        let parsed = decode_with_gym_codes("OASIS-logo-horizontal-dark-v1.png", &codes);
        assert!(parsed.is_valid);
        assert_eq!(parsed.descriptor, "horizontal-dark");
    }

    #[test]
    fn permissive_decode_rejects_unknown_prefix() {
        let codes = vec!["OASIS".to_string()];
        let parsed = decode_with_gym_codes("SUMMIT-spring-promo.jpg", &codes);
        assert!(!parsed.is_valid);
        assert_eq!(parsed.gym_code, "");
    }

    #[test]
    fn file_extension_cases() {
        assert_eq!(file_extension("photo.PNG"), "png");
        assert_eq!(file_extension("archive.tar.gz"), "gz");
        assert_eq!(file_extension("noext"), "");
        assert_eq!(file_extension("trailing."), "");
        assert_eq!(file_extension(".hidden"), "hidden");
    }

    #[test]
    fn sanitize_replaces_and_collapses() {
        assert_eq!(sanitize("Spring Promo (final)!.png"), "Spring-Promo-final-.png");
        assert_eq!(sanitize("a///b"), "a-b");
        assert_eq!(sanitize("--edge--"), "edge");
    }

    #[test]
    fn sanitize_is_idempotent() {
        for input in [
            "Spring Promo (final)!.png",
            "a///b",
            "--edge--",
            "already-clean.png",
            "",
            "!!!",
        ] {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "not idempotent for: {input}");
        }
    }

    #[test]
    fn next_variant_base_case() {
        assert_eq!(next_variant(&[], "ANY"), 1);
    }

    #[test]
    fn next_variant_is_monotonic_over_existing() {
        let existing = vec![
            "GYM-logo-a-v1.png".to_string(),
            "GYM-logo-a-v3.png".to_string(),
        ];
        assert_eq!(next_variant(&existing, "GYM-logo-a"), 4);
    }

    #[test]
    fn variant_of_unparseable_prefixed_names_is_zero() {
        // Prefixed names that fail to decode participate as variant 0, so a
        // library of only malformed names still starts numbering at 1.
        let existing = vec!["GYM-logo-a-final.png".to_string()];
        assert_eq!(next_variant(&existing, "GYM-logo-a"), 1);

        // And they do not suppress real variants.
        let mixed = vec![
            "GYM-logo-a-final.png".to_string(),
            "GYM-logo-a-v2.png".to_string(),
        ];
        assert_eq!(next_variant(&mixed, "GYM-logo-a"), 3);
    }

    #[test]
    fn next_variant_ignores_other_bases() {
        let existing = vec![
            "GYM-logo-b-v7.png".to_string(),
            "OTHER-logo-a-v9.png".to_string(),
        ];
        assert_eq!(next_variant(&existing, "GYM-logo-a"), 1);
    }
}
