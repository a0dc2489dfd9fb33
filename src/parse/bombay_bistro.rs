use chrono::{DateTime, Datelike, Utc};
use scraper::{Html, Selector};

use super::weekday;
use crate::menu::{Meal, MenuDay};
use crate::static_selector;
use crate::week;

/// Parses the Bombay Bistro lunch page. The page holds four week variants
/// the kitchen rotates through; the variant for the reference date is
/// picked from its ISO week number and read as a flat run of headings
/// (weekday names) and paragraphs (bold category, italic meal). Bold runs
/// carrying a `KR` price marker belong to the à-la-carte block and are not
/// part of the lunch rotation.
#[must_use]
pub fn menu_days(html: &str, reference: DateTime<Utc>) -> Vec<MenuDay> {
    static_selector!(SCAN_SELECTOR <- "h1, h2, h3, h4, h5, h6, p");
    static_selector!(BOLD_SELECTOR <- "strong, b");
    static_selector!(ITALIC_SELECTOR <- "em, i");

    let monday = week::monday_of(reference, week::TIME_ZONE);
    let week_number = reference.with_timezone(&week::TIME_ZONE).iso_week().week();
    let menu_week = menu_week_for(week_number);

    let document = Html::parse_document(html);
    let Ok(container_selector) = Selector::parse(&format!("#vecka-{menu_week}")) else {
        return Vec::new();
    };
    let Some(container) = document.select(&container_selector).next() else {
        tracing::warn!(week_number, menu_week, "menu week container not found");
        return Vec::new();
    };

    let mut days = Vec::new();
    let mut current_day = None;
    let mut pending: Vec<Meal> = Vec::new();
    for element in container.select(&SCAN_SELECTOR) {
        let text: String = element.text().collect();
        if element.value().name() != "p" {
            // Every day transition flushes whatever is pending; a heading
            // that names no weekday just closes the current day.
            flush(&mut days, current_day, &mut pending, monday);
            current_day = weekday::from_heading(&text);
        } else if current_day.is_some() {
            let Some(bold) = element.select(&BOLD_SELECTOR).next() else {
                continue;
            };
            let Some(italic) = element.select(&ITALIC_SELECTOR).next() else {
                continue;
            };
            let bold_text: String = bold.text().collect();
            let bold_text = bold_text.trim();
            if bold_text.contains("KR") {
                continue;
            }
            let name: String = italic.text().collect();
            let name = name.trim();
            let category = weekday::title_case(bold_text);
            if category.is_empty() || name.is_empty() {
                continue;
            }
            pending.push(Meal::new(category, name));
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

/// Reproduces the site's own week -> menu-week rotation: a counter that
/// restarts on weeks 1, 5, 9, ... and counts up in between; its value at
/// the target week number selects the variant container.
fn menu_week_for(week_number: u32) -> u32 {
    let mut menu_week = 0;
    for week in 1..=52 {
        if (week - 1) % 4 == 0 {
            menu_week = 0;
        }
        menu_week += 1;
        if week == week_number {
            break;
        }
    }
    menu_week
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use std::fs;

    #[test]
    fn rotation_restarts_every_fourth_week_number() {
        assert_eq!(menu_week_for(1), 1);
        assert_eq!(menu_week_for(2), 2);
        assert_eq!(menu_week_for(4), 4);
        assert_eq!(menu_week_for(5), 1);
        assert_eq!(menu_week_for(15), 3);
        assert_eq!(menu_week_for(52), 4);
        // Week 53 is past the loop; the counter keeps its final value.
        assert_eq!(menu_week_for(53), 4);
    }

    #[test]
    fn parses_the_rotating_fixture() {
        let html = fs::read_to_string("./src/parse/html_examples/bombay_bistro.html").unwrap();
        // Tuesday 2025-04-08 is ISO week 15 -> menu week 3.
        let reference = Utc.with_ymd_and_hms(2025, 4, 8, 9, 0, 0).unwrap();
        let days = menu_days(&html, reference);

        assert_eq!(days.len(), 2);
        // Monday 2025-04-07 00:01 CEST.
        assert_eq!(
            days[0].date,
            Utc.with_ymd_and_hms(2025, 4, 6, 22, 1, 0).unwrap()
        );
        assert_eq!(
            days[0].meals,
            vec![
                Meal::new(
                    "Chicken Vindaloo",
                    "Kycklingryta med ursprung från Goa består av rödvin, kanel, röd chili."
                ),
                Meal::new(
                    "Lamm Korma",
                    "Lammköttgryta gjord av grädde tomat, kardemumma och smör."
                ),
            ]
        );
        assert_eq!(
            days[1].date,
            Utc.with_ymd_and_hms(2025, 4, 7, 22, 1, 0).unwrap()
        );
        assert_eq!(
            days[1].meals,
            vec![Meal::new(
                "Hariyali Chicken",
                "Kycklingfile i en örtsås som består av basilika och mynta."
            )]
        );
    }

    #[test]
    fn missing_variant_container_is_non_fatal() {
        let html = r#"<html><body><div id="vecka-1"><h4>Måndag</h4>
            <p><strong>BUTTER CHICKEN</strong> <em>Kycklinggryta</em></p>
        </div></body></html>"#;
        // ISO week 15 wants #vecka-3, which this document lacks.
        let reference = Utc.with_ymd_and_hms(2025, 4, 8, 9, 0, 0).unwrap();
        assert!(menu_days(html, reference).is_empty());
    }

    #[test]
    fn price_paragraphs_and_dayless_meals_are_excluded() {
        let html = r#"<html><body><div id="vecka-1">
            <h4>Måndag</h4>
            <p><strong>BUTTER CHICKEN</strong> <em>Kycklinggryta</em></p>
            <p><strong>EXTRA NAAN 25 KR</strong> <em>Nybakat bröd</em></p>
            <h4>Övriga alternativ</h4>
            <p><strong>BIRYANI</strong> <em>Basmatiris med kyckling</em></p>
        </div></body></html>"#;
        // 2025-01-01 is ISO week 1 -> menu week 1.
        let reference = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let days = menu_days(html, reference);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].meals, vec![Meal::new("Butter Chicken", "Kycklinggryta")]);
    }
}
