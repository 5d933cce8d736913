use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::record::SocialFields;
use crate::extract::FieldRule;

/// Mutually exclusive checkbox categories, in the order the sheet lists
/// them. The scan order is load-bearing: the first category found with a
/// marker wins.
pub const RISK_LEVELS: [&str; 4] = ["Alto", "Medio", "Bajo", "Ninguno"];

/// How many lines below the section header the checkbox block can sit.
const RISK_WINDOW_LINES: usize = 10;

const RISK_HEADER: &str = "Nivel de Riesgo Social";

static FULL_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Nombres\s+y\s+apellidos\s*:?\s*([^\n]+)").unwrap());

static DNI_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)DNI\s*:?\s*(\d{8})").unwrap());

/// Ordered rule table for the ficha social template, used by the debug
/// surface to report rule-by-rule outcomes.
pub const RULES: &[FieldRule] = &[
    FieldRule::new("full_name", full_name),
    FieldRule::new("dni", dni),
    FieldRule::new("risk_level", risk_level),
];

/// Applies every rule in its fixed order. Missing fields stay empty.
pub fn extract(text: &str) -> SocialFields {
    SocialFields {
        full_name: full_name(text).unwrap_or_default(),
        dni: dni(text).unwrap_or_default(),
        risk_level: risk_level(text).unwrap_or_default(),
    }
}

pub fn full_name(text: &str) -> Option<String> {
    FULL_NAME_RE
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
}

pub fn dni(text: &str) -> Option<String> {
    DNI_RE.captures(text).map(|caps| caps[1].to_string())
}

/// Finds the section header, then scans a bounded window below it. Each
/// window line is matched against the categories in their fixed order; a
/// category is accepted when a marker sits on the same line, the next line,
/// or the line after, checked in that precedence. A header whose window
/// yields nothing does not stop the search for a later header occurrence.
pub fn risk_level(text: &str) -> Option<String> {
    let lines: Vec<&str> = text.lines().collect();

    for (i, line) in lines.iter().enumerate() {
        if !line.contains(RISK_HEADER) {
            continue;
        }

        let window_end = (i + RISK_WINDOW_LINES).min(lines.len());
        for j in i..window_end {
            let current = lines[j].trim();
            let next = lines.get(j + 1).map(|l| l.trim()).unwrap_or("");
            let after_next = lines.get(j + 2).map(|l| l.trim()).unwrap_or("");

            for level in RISK_LEVELS {
                if !current.eq_ignore_ascii_case(level) {
                    continue;
                }
                if has_inline_marker(current) || is_marker(next) || is_marker(after_next) {
                    return Some(level.to_string());
                }
                // The line is this category's label but no marker follows;
                // the other categories cannot match the same line.
                break;
            }
        }
    }

    None
}

fn has_inline_marker(line: &str) -> bool {
    line.contains('X') || line.contains('x')
}

fn is_marker(line: &str) -> bool {
    line == "X" || line == "x"
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_full_name_after_label() {
        let text = "Ficha Social\nNombres y apellidos: ROSA QUISPE HUAMAN\nEdad: 20";
        assert_eq!(full_name(text).as_deref(), Some("ROSA QUISPE HUAMAN"));
    }

    #[test]
    fn full_name_label_is_case_insensitive_and_colon_optional() {
        let text = "NOMBRES Y APELLIDOS  Carlos Mamani";
        assert_eq!(full_name(text).as_deref(), Some("Carlos Mamani"));
    }

    #[test]
    fn extracts_eight_digit_dni() {
        assert_eq!(dni("DNI: 12345678").as_deref(), Some("12345678"));
    }

    #[test]
    fn seven_digit_dni_does_not_match() {
        assert_eq!(dni("DNI: 1234567"), None);
    }

    #[test]
    fn marked_category_on_next_line_wins() {
        let text = "Nivel de Riesgo Social\n\nMedio\nX\nBajo";
        assert_eq!(risk_level(text).as_deref(), Some("Medio"));
    }

    #[test]
    fn marker_two_below_counts_for_the_earlier_category() {
        // The X under Medio is also two lines below Alto; Alto is scanned
        // first, so it takes the marker. Load-bearing scan order.
        let text = "Nivel de Riesgo Social\nAlto\nMedio\nX";
        assert_eq!(risk_level(text).as_deref(), Some("Alto"));
    }

    #[test]
    fn marker_two_lines_below_still_counts() {
        let text = "Nivel de Riesgo Social\nNinguno\n\nx";
        assert_eq!(risk_level(text).as_deref(), Some("Ninguno"));
    }

    #[test]
    fn unmarked_categories_leave_field_empty() {
        let text = "Nivel de Riesgo Social\nAlto\nMedio\nBajo\nNinguno";
        assert_eq!(risk_level(text), None);
    }

    #[test]
    fn category_outside_window_is_ignored() {
        let mut text = String::from("Nivel de Riesgo Social\n");
        for _ in 0..10 {
            text.push_str("relleno\n");
        }
        text.push_str("Medio\nX\n");
        assert_eq!(risk_level(&text), None);
    }

    #[test]
    fn second_header_occurrence_is_scanned_when_first_is_unmarked() {
        let text = "Nivel de Riesgo Social\nAlto\n\nNivel de Riesgo Social\nBajo\nX";
        assert_eq!(risk_level(text).as_deref(), Some("Bajo"));
    }

    #[test]
    fn extract_fills_all_fields() {
        let text = "Nombres y apellidos: ROSA QUISPE\nDNI: 87654321\n\
                    Nivel de Riesgo Social\nMedio\nX";
        let fields = extract(text);
        assert_eq!(
            fields,
            SocialFields {
                full_name: "ROSA QUISPE".into(),
                dni: "87654321".into(),
                risk_level: "Medio".into(),
            }
        );
    }

    #[test]
    fn extraction_is_pure() {
        let text = "Nombres y apellidos: A B\nDNI: 11112222";
        assert_eq!(extract(text), extract(text));
    }

    #[test]
    fn rules_run_in_declared_order() {
        let names: Vec<_> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["full_name", "dni", "risk_level"]);
    }
}
