use std::sync::LazyLock;

use regex::Regex;

use super::Value;
use crate::ingest::MISSING;

static MULTI_SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());

/// The form widget appends this terminator row to selection lists. Matched
/// case-sensitively against the whitespace-normalized answer, before any
/// casing transform.
const END_SELECTION: &str = "End selection";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStyle {
    Upper,
    Capitalized,
    Title,
}

/// Normalize underscore/hyphen/whitespace variants of a free-text token and
/// apply the requested casing. The terminator label and the missing sentinel
/// both map to the sentinel regardless of style; repeated cleaning is a
/// no-op.
pub fn canonicalize(raw: &str, style: CaseStyle) -> String {
    let spaced = raw.replace(['_', '-'], " ");
    let collapsed = MULTI_SPACE_RE.replace_all(&spaced, " ");
    let trimmed = collapsed.trim();

    if trimmed == END_SELECTION || trimmed == MISSING {
        return MISSING.to_string();
    }

    match style {
        CaseStyle::Upper => trimmed.to_uppercase(),
        CaseStyle::Capitalized => capitalize(trimmed),
        CaseStyle::Title => trimmed
            .split(' ')
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// First character uppercase, remainder lowercase.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

/// Single-select flag: Yes → 1, No/missing → 0, anything else passes
/// through cleaned but verbatim.
pub fn classify_flag(raw: &str) -> Value {
    let cleaned = canonicalize(raw, CaseStyle::Capitalized);
    match cleaned.as_str() {
        "Yes" => Value::Int(1),
        "No" | MISSING => Value::Int(0),
        _ => Value::Text(cleaned),
    }
}

/// Capitalized yes/no text, with missing answers reading as "No". The
/// consumables checklist keeps these textual rather than coding them 0/1.
pub fn yes_no(raw: &str) -> String {
    let cleaned = canonicalize(raw, CaseStyle::Capitalized);
    if cleaned == MISSING {
        "No".to_string()
    } else {
        cleaned
    }
}

/// "Other" free-text presence pair: missing → ("None", 0), answered →
/// (cleaned label, 1).
pub fn classify_presence(raw: &str) -> (String, i64) {
    let cleaned = canonicalize(raw, CaseStyle::Capitalized);
    if cleaned == MISSING {
        ("None".to_string(), 0)
    } else {
        (cleaned, 1)
    }
}

/// Expand a space-delimited multi-select answer into a presence vector over
/// the canonical option order. Pure set membership; the order tokens arrived
/// in from the form widget is irrelevant.
pub fn expand(raw: &str, options: &[String]) -> Vec<u8> {
    if raw == MISSING || raw.trim().is_empty() {
        return vec![0; options.len()];
    }
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    options
        .iter()
        .map(|option| u8::from(tokens.contains(&option.as_str())))
        .collect()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalize_styles() {
        assert_eq!(canonicalize("john_smith", CaseStyle::Upper), "JOHN SMITH");
        assert_eq!(
            canonicalize("john_smith", CaseStyle::Capitalized),
            "John smith"
        );
        assert_eq!(canonicalize("john_smith", CaseStyle::Title), "John Smith");
        assert_eq!(
            canonicalize("  plant--industries ", CaseStyle::Title),
            "Plant Industries"
        );
    }

    #[test]
    fn terminator_maps_to_sentinel_in_every_style() {
        for style in [CaseStyle::Upper, CaseStyle::Capitalized, CaseStyle::Title] {
            assert_eq!(canonicalize("End selection", style), MISSING);
            assert_eq!(canonicalize("End_selection", style), MISSING);
        }
        // Case-sensitive: a lowercase variant is an ordinary token
        assert_eq!(canonicalize("end selection", CaseStyle::Upper), "END SELECTION");
    }

    #[test]
    fn cleaning_twice_equals_cleaning_once() {
        for style in [CaseStyle::Upper, CaseStyle::Capitalized, CaseStyle::Title] {
            for raw in ["john_smith", "End selection", "nan", "  a  b "] {
                let once = canonicalize(raw, style);
                assert_eq!(canonicalize(&once, style), once);
            }
        }
    }

    #[test]
    fn flag_classification() {
        assert_eq!(classify_flag("yes"), Value::Int(1));
        assert_eq!(classify_flag("YES"), Value::Int(1));
        assert_eq!(classify_flag("no"), Value::Int(0));
        assert_eq!(classify_flag("nan"), Value::Int(0));
        assert_eq!(classify_flag("35"), Value::Text("35".into()));
        assert_eq!(classify_flag("maybe"), Value::Text("Maybe".into()));
    }

    #[test]
    fn yes_no_text_form() {
        assert_eq!(yes_no("yes"), "Yes");
        assert_eq!(yes_no("nan"), "No");
        assert_eq!(yes_no(""), "No");
    }

    #[test]
    fn presence_pair() {
        assert_eq!(classify_presence("nan"), ("None".to_string(), 0));
        assert_eq!(
            classify_presence("battery_swelling"),
            ("Battery swelling".to_string(), 1)
        );
    }

    #[test]
    fn expansion_is_order_invariant() {
        let options: Vec<String> = ["A", "B", "C"].map(String::from).to_vec();
        assert_eq!(expand("B A", &options), vec![1, 1, 0]);
        assert_eq!(expand("A B", &options), vec![1, 1, 0]);
    }

    #[test]
    fn missing_answer_expands_to_zero_vector() {
        let options: Vec<String> = ["A", "B", "C"].map(String::from).to_vec();
        assert_eq!(expand("nan", &options), vec![0, 0, 0]);
        assert_eq!(expand("", &options), vec![0, 0, 0]);
    }

    #[test]
    fn expansion_length_matches_option_count() {
        let options: Vec<String> = ["birds", "controlled_airspace", "powerlines"]
            .map(String::from)
            .to_vec();
        assert_eq!(expand("powerlines", &options).len(), options.len());
        assert_eq!(expand("powerlines birds unknown_extra", &options), vec![1, 0, 1]);
    }
}
