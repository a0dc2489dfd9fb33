//! Weekday tables for the two markup conventions in play: English element
//! ids on the Kooperativet page, Swedish text everywhere else.

/// Section ids on the Kooperativet page, Monday first.
pub(super) const ENGLISH_IDS: [&str; 5] = ["monday", "tuesday", "wednesday", "thursday", "friday"];

const SWEDISH: [&str; 5] = ["måndag", "tisdag", "onsdag", "torsdag", "fredag"];

/// Swedish names with å/ä/ö folded, for headings typed with or without
/// diacritics.
const SWEDISH_FOLDED: [&str; 5] = ["mandag", "tisdag", "onsdag", "torsdag", "fredag"];

fn fold_diacritics(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'å' | 'ä' => 'a',
            'ö' => 'o',
            'Å' | 'Ä' => 'A',
            'Ö' => 'O',
            _ => c,
        })
        .collect()
}

/// Weekday index (0 = Monday) of a heading that merely *contains* a Swedish
/// weekday name, e.g. "Måndag 7 april".
pub(super) fn from_heading(text: &str) -> Option<usize> {
    let folded = fold_diacritics(text).to_lowercase();
    SWEDISH_FOLDED.iter().position(|day| folded.contains(day))
}

/// Weekday index of a paragraph whose whole text is a Swedish weekday name.
pub(super) fn from_exact(text: &str) -> Option<usize> {
    let lowered = text.trim().to_lowercase();
    SWEDISH.iter().position(|day| *day == lowered)
}

/// "CHICKEN VINDALOO" -> "Chicken Vindaloo". Interior whitespace collapses
/// to single spaces.
pub(super) fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            for c in chars {
                out.extend(c.to_lowercase());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_match_tolerates_decorations_and_diacritics() {
        assert_eq!(from_heading("Måndag 7 april"), Some(0));
        assert_eq!(from_heading("MANDAG"), Some(0));
        assert_eq!(from_heading("Vecka 15 – Fredag"), Some(4));
        assert_eq!(from_heading("Övriga alternativ"), None);
    }

    #[test]
    fn exact_match_requires_the_bare_name() {
        assert_eq!(from_exact("Måndag"), Some(0));
        assert_eq!(from_exact("  TISDAG  "), Some(1));
        assert_eq!(from_exact("Måndag 7 april"), None);
    }

    #[test]
    fn title_case_per_word() {
        assert_eq!(title_case("BEEF BOMBAY SPECIAL"), "Beef Bombay Special");
        assert_eq!(title_case("lamm  korma"), "Lamm Korma");
    }
}
