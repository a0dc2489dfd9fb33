use scraper::ElementRef;

use crate::menu::Meal;
use crate::static_selector;

/// Paragraph fold shared by the Kooperativet day sections and the World of
/// Food item descriptions. A `<strong>` run opens a category that persists
/// until the next one; the rest of that paragraph and any following
/// categoryless paragraphs become meals under it.
///
/// The category text is removed from the paragraph by literal first-match
/// substring removal, matching the upstream pages' flat structure. The
/// `strip_colon` variant additionally drops a trailing `:` from the
/// category label (the RSS descriptions write "Earth:").
pub(super) fn category_fold<'a>(
    paragraphs: impl Iterator<Item = ElementRef<'a>>,
    strip_colon: bool,
) -> Vec<Meal> {
    static_selector!(STRONG_SELECTOR <- "strong");

    let mut current_category = String::new();
    let mut meals = Vec::new();
    for paragraph in paragraphs {
        let text: String = paragraph.text().collect();
        let text = text.trim();
        if let Some(strong) = paragraph.select(&STRONG_SELECTOR).next() {
            let bold: String = strong.text().collect();
            let bold = bold.trim();
            current_category = if strip_colon {
                bold.strip_suffix(':').unwrap_or(bold).trim_end().to_string()
            } else {
                bold.to_string()
            };
            let remainder = text.replacen(bold, "", 1);
            let remainder = remainder.trim();
            if !current_category.is_empty() && !remainder.is_empty() {
                meals.push(Meal::new(current_category.clone(), remainder));
            }
        } else if !current_category.is_empty() && !text.is_empty() {
            meals.push(Meal::new(current_category.clone(), text));
        }
    }
    meals
}
