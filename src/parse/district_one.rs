use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use scraper::{ElementRef, Html};

use super::weekday;
use crate::menu::{Meal, MenuDay};
use crate::static_selector;
use crate::week;

/// Parses the District One lunch page: one flat run of paragraphs where a
/// bare Swedish weekday name opens a day, underline styling marks a
/// category and anything else under an open day and category is a meal.
/// Decorative dot/dash separators are skipped and the footer ("Kontakta
/// oss" / "Öppettider") ends the scan outright.
#[must_use]
pub fn menu_days(html: &str, reference: DateTime<Utc>) -> Vec<MenuDay> {
    static_selector!(P_SELECTOR <- "p");
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    let separator =
        SEPARATOR.get_or_init(|| Regex::new(r"^[\s.\-–—]*$").expect("regex should be valid"));

    let monday = week::monday_of(reference, week::TIME_ZONE);
    let document = Html::parse_document(html);

    let mut days = Vec::new();
    let mut current_day = None;
    let mut current_category: Option<String> = None;
    let mut pending: Vec<Meal> = Vec::new();
    for paragraph in document.select(&P_SELECTOR) {
        let text: String = paragraph.text().collect();
        let text = text.trim();
        if separator.is_match(text) {
            continue;
        }
        let lowered = text.to_lowercase();
        if lowered == "kontakta oss" || lowered == "öppettider" {
            break;
        }
        if let Some(index) = weekday::from_exact(text) {
            flush(&mut days, current_day, &mut pending, monday);
            current_day = Some(index);
            current_category = None;
        } else if has_underline(paragraph) {
            current_category = Some(text.to_string());
        } else if let (Some(_), Some(category)) = (current_day, &current_category) {
            pending.push(Meal::new(category.clone(), text));
        }
    }
    flush(&mut days, current_day, &mut pending, monday);
    days
}

fn flush(
    days: &mut Vec<MenuDay>,
    current_day: Option<usize>,
    pending: &mut Vec<Meal>,
    monday: DateTime<Utc>,
) {
    if let Some(index) = current_day {
        if !pending.is_empty() {
            days.push(MenuDay::new(
                week::weekday_date(monday, index),
                std::mem::take(pending),
            ));
        }
    }
    pending.clear();
}

/// The site builder puts the underline on a span inside the paragraph as
/// often as on the paragraph itself, so both are checked.
fn has_underline(paragraph: ElementRef) -> bool {
    paragraph
        .descendants()
        .filter_map(ElementRef::wrap)
        .any(|element| {
            element.value().attr("style").is_some_and(|style| {
                let folded: String = style
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect::<String>()
                    .to_lowercase();
                folded.contains("text-decoration:underline")
                    || folded.contains("text-decoration-line:underline")
            })
        })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use std::fs;

    #[test]
    fn parses_the_flat_page_fixture() {
        let html = fs::read_to_string("./src/parse/html_examples/district_one.html").unwrap();
        // Tuesday 2025-03-25.
        let reference = Utc.with_ymd_and_hms(2025, 3, 25, 10, 0, 0).unwrap();
        let days = menu_days(&html, reference);

        assert_eq!(days.len(), 2);
        assert_eq!(
            days[0].date,
            Utc.with_ymd_and_hms(2025, 3, 23, 23, 1, 0).unwrap()
        );
        assert_eq!(
            days[0].meals,
            vec![
                Meal::new("Ramen", "Sidfläsk, kyckling och misobuljong"),
                Meal::new("Ramen", "Vegetarisk shoyu med tofu"),
                Meal::new("Fisk", "Pocherad torskfile med brynt smör"),
            ]
        );
        assert_eq!(
            days[1].date,
            Utc.with_ymd_and_hms(2025, 3, 24, 23, 1, 0).unwrap()
        );
        assert_eq!(
            days[1].meals,
            vec![Meal::new("Kött", "Boeuf bourguignon med potatispuré")]
        );
    }

    #[test]
    fn underlined_category_carries_until_replaced() {
        let html = r#"<html><body>
            <p>Måndag</p>
            <p><span style="text-decoration: underline;">Ramen</span></p>
            <p>Sidfläsk och kyckling</p>
            <p>Vegetarisk shoyu</p>
        </body></html>"#;
        let reference = Utc.with_ymd_and_hms(2025, 3, 25, 10, 0, 0).unwrap();
        let days = menu_days(html, reference);
        assert_eq!(days.len(), 1);
        assert_eq!(
            days[0].meals,
            vec![
                Meal::new("Ramen", "Sidfläsk och kyckling"),
                Meal::new("Ramen", "Vegetarisk shoyu"),
            ]
        );
    }

    #[test]
    fn text_after_a_footer_sentinel_is_never_read() {
        let html = r#"<html><body>
            <p>Måndag</p>
            <p style="text-decoration-line: underline">Sallad</p>
            <p>Caesarsallad</p>
            <p>ÖPPETTIDER</p>
            <p>Tisdag</p>
            <p>Vardagar 11-14</p>
        </body></html>"#;
        let reference = Utc.with_ymd_and_hms(2025, 3, 25, 10, 0, 0).unwrap();
        let days = menu_days(html, reference);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].meals, vec![Meal::new("Sallad", "Caesarsallad")]);
    }

    #[test]
    fn meals_require_both_an_open_day_and_a_category() {
        let html = r#"<html><body>
            <p><span style="text-decoration: underline;">Ramen</span></p>
            <p>Utan dagrubrik</p>
            <p>Måndag</p>
            <p>Utan kategori efter dagbyte</p>
        </body></html>"#;
        let reference = Utc.with_ymd_and_hms(2025, 3, 25, 10, 0, 0).unwrap();
        assert!(menu_days(html, reference).is_empty());
    }
}
