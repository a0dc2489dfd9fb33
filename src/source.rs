use chrono::{DateTime, Utc};
use url::Url;

use crate::menu::MenuDay;
use crate::parse;

/// The four scraped restaurants. Each variant pairs a page URL with the
/// parser that understands that page's markup; there is deliberately no
/// shared parsing machinery behind this dispatch, because every site has
/// its own format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Kooperativet,
    WorldOfFood,
    BombayBistro,
    DistrictOne,
}

impl Source {
    pub const ALL: [Self; 4] = [
        Self::Kooperativet,
        Self::WorldOfFood,
        Self::BombayBistro,
        Self::DistrictOne,
    ];

    /// Restaurant name as seeded in the store.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Kooperativet => "Kooperativet",
            Self::WorldOfFood => "World of Food",
            Self::BombayBistro => "Bombay Bistro",
            Self::DistrictOne => "District One",
        }
    }

    #[must_use]
    pub fn url(self) -> Url {
        match self {
            Self::Kooperativet => "https://www.kooperativet.se/",
            Self::WorldOfFood => {
                "https://www.compass-group.se/menuapi/feed/rss/current-week?costNumber=448305&language=sv"
            }
            Self::BombayBistro => "https://lindholmen.restaurangbombay.se/lunch/",
            Self::DistrictOne => "https://districtone.se/lunch.html",
        }
        .parse()
        .expect("static source url should be valid")
    }

    /// Runs this source's parser. Parsing is pure and total: malformed or
    /// unexpected markup degrades to fewer (or zero) days, never an error.
    #[must_use]
    pub fn parse(self, markup: &str, reference: DateTime<Utc>) -> Vec<MenuDay> {
        match self {
            Self::Kooperativet => parse::kooperativet::menu_days(markup, reference),
            Self::WorldOfFood => parse::world_of_food::menu_days(markup),
            Self::BombayBistro => parse::bombay_bistro::menu_days(markup, reference),
            Self::DistrictOne => parse::district_one::menu_days(markup, reference),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_sources_have_distinct_names_and_urls() {
        for (i, a) in Source::ALL.iter().enumerate() {
            for b in &Source::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
                assert_ne!(a.url(), b.url());
            }
        }
    }
}
