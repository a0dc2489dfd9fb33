use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html};

use super::category_fold::category_fold;
use super::weekday::ENGLISH_IDS;
use crate::menu::MenuDay;
use crate::static_selector;
use crate::week;

/// Parses the Kooperativet week page. Each weekday lives in a section whose
/// element id is the lowercase English weekday name; inside it, a single
/// content wrapper holds one paragraph per category. Days are walked in
/// fixed Monday..Friday order regardless of where their sections sit in the
/// document.
#[must_use]
pub fn menu_days(html: &str, reference: DateTime<Utc>) -> Vec<MenuDay> {
    static_selector!(DAY_SECTION_SELECTOR <- "#monday, #tuesday, #wednesday, #thursday, #friday");
    static_selector!(CONTENT_SELECTOR <- ".entry-content-wrapper");
    static_selector!(P_SELECTOR <- "p");

    let monday = week::monday_of(reference, week::TIME_ZONE);
    let document = Html::parse_document(html);

    let mut sections: [Option<ElementRef>; 5] = [None; 5];
    for section in document.select(&DAY_SECTION_SELECTOR) {
        if let Some(index) = section
            .value()
            .id()
            .and_then(|id| ENGLISH_IDS.iter().position(|day| *day == id))
        {
            sections[index].get_or_insert(section);
        }
    }

    let mut days = Vec::new();
    for (index, section) in sections.into_iter().enumerate() {
        let Some(section) = section else { continue };
        // A section without its content wrapper carries no menu that day.
        let Some(content) = section.select(&CONTENT_SELECTOR).next() else {
            continue;
        };
        let meals = category_fold(content.select(&P_SELECTOR), false);
        if meals.is_empty() {
            continue;
        }
        days.push(MenuDay::new(week::weekday_date(monday, index), meals));
    }
    days
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::menu::Meal;
    use std::fs;

    #[test]
    fn parses_the_week_page_fixture() {
        let html = fs::read_to_string("./src/parse/html_examples/kooperativet.html").unwrap();
        // Tuesday 2025-03-25.
        let reference = Utc.with_ymd_and_hms(2025, 3, 25, 8, 0, 0).unwrap();
        let days = menu_days(&html, reference);

        // Wednesday has no content wrapper, Thursday is absent and Friday's
        // wrapper is empty; only Monday and Tuesday survive.
        assert_eq!(days.len(), 2);
        assert_eq!(
            days[0].date,
            Utc.with_ymd_and_hms(2025, 3, 23, 23, 1, 0).unwrap()
        );
        assert_eq!(
            days[0].meals,
            vec![
                Meal::new(
                    "SALLADER",
                    "Caesarsallad – romansallad toppad med kyckling & bacon"
                ),
                Meal::new(
                    "SALLADER",
                    "Västkust Caesarsallad – romansallad toppad med räkor & rökt lax"
                ),
                Meal::new(
                    "KÖTT",
                    "Kooperativets klassiska Kalv Köttbullar med potatispuré"
                ),
                Meal::new("FISK", "Pocherad torsk serveras med potatispuré"),
            ]
        );
        assert_eq!(
            days[1].date,
            Utc.with_ymd_and_hms(2025, 3, 24, 23, 1, 0).unwrap()
        );
        assert_eq!(
            days[1].meals,
            vec![
                Meal::new("KÖTT", "Schnitzel, pommes & bea"),
                Meal::new("THAI", "Green curry chicken – wokad kyckling"),
            ]
        );
    }

    #[test]
    fn single_day_section_anchors_to_that_weekday() {
        let html = r#"<html><body>
            <section id="monday"><div class="entry-content-wrapper">
                <p><strong>KÖTT</strong> Meatballs with gravy</p>
            </div></section>
        </body></html>"#;
        let reference = Utc.with_ymd_and_hms(2025, 3, 25, 12, 0, 0).unwrap();
        let days = menu_days(html, reference);
        assert_eq!(days.len(), 1);
        // Monday 00:01 Europe/Stockholm, expressed in UTC.
        assert_eq!(
            days[0].date,
            Utc.with_ymd_and_hms(2025, 3, 23, 23, 1, 0).unwrap()
        );
        assert_eq!(
            days[0].meals,
            vec![Meal::new("KÖTT", "Meatballs with gravy")]
        );
    }

    #[test]
    fn empty_document_yields_no_days() {
        let reference = Utc.with_ymd_and_hms(2025, 3, 25, 12, 0, 0).unwrap();
        assert!(menu_days("<html><body></body></html>", reference).is_empty());
    }
}
