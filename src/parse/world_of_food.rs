use chrono::NaiveDate;
use quick_xml::events::Event;
use quick_xml::Reader;
use scraper::Html;

use super::category_fold::category_fold;
use crate::menu::MenuDay;
use crate::static_selector;

/// Parses the World of Food RSS feed. Item titles carry the day as their
/// second comma-separated segment in `DD-MM-YYYY` form; item descriptions
/// carry the menu as an HTML fragment (escaped or in CDATA) with the same
/// bold-run category layout as the Kooperativet page.
///
/// The feed names absolute dates, so no reference date is involved: the
/// date is taken literally, at midnight, with no time-zone interpretation.
#[must_use]
pub fn menu_days(rss: &str) -> Vec<MenuDay> {
    let mut reader = Reader::from_str(rss);

    #[derive(Clone, Copy, PartialEq)]
    enum Field {
        Title,
        Description,
    }

    let mut days = Vec::new();
    let mut in_item = false;
    let mut field = None;
    let mut title = String::new();
    let mut description = String::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"item" => {
                    in_item = true;
                    title.clear();
                    description.clear();
                }
                b"title" if in_item => field = Some(Field::Title),
                b"description" if in_item => field = Some(Field::Description),
                _ => field = None,
            },
            Ok(Event::Text(text)) => {
                if let (Some(field), Ok(text)) = (field, text.unescape()) {
                    match field {
                        Field::Title => title.push_str(&text),
                        Field::Description => description.push_str(&text),
                    }
                }
            }
            Ok(Event::CData(cdata)) => {
                if let Some(field) = field {
                    let text = String::from_utf8_lossy(&cdata.into_inner());
                    match field {
                        Field::Title => title.push_str(&text),
                        Field::Description => description.push_str(&text),
                    }
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"item" => {
                    in_item = false;
                    if let Some(day) = menu_day(&title, &description) {
                        days.push(day);
                    }
                }
                b"title" | b"description" => field = None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                tracing::warn!("malformed rss feed: {e}");
                break;
            }
            Ok(_) => {}
        }
        buf.clear();
    }
    days
}

/// One `<item>` -> one `MenuDay`, or nothing if the title lacks its date
/// segment, the date does not parse, or the description yields no meals.
fn menu_day(title: &str, description: &str) -> Option<MenuDay> {
    static_selector!(P_SELECTOR <- "p");

    let date_segment = title.split(',').nth(1)?;
    let date = NaiveDate::parse_from_str(date_segment.trim(), "%d-%m-%Y").ok()?;

    let fragment = Html::parse_fragment(description);
    let meals = category_fold(fragment.select(&P_SELECTOR), true);
    if meals.is_empty() {
        return None;
    }
    Some(MenuDay::new(
        date.and_hms_opt(0, 0, 0)
            .expect("midnight is a valid time")
            .and_utc(),
        meals,
    ))
}
