use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// All four restaurants publish their menus in Swedish local time.
pub const TIME_ZONE: Tz = chrono_tz::Europe::Stockholm;

/// Monday (ISO weekday 1) of the week containing `reference`, evaluated in
/// `tz` and pinned to 00:01 local time. The one minute past midnight keeps
/// anchored meals strictly inside the half-open `[day, day + 1)` ranges the
/// queries use, even right at a day boundary.
#[must_use]
pub fn monday_of(reference: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    let local_date = reference.with_timezone(&tz).date_naive();
    let monday =
        local_date - Duration::days(i64::from(local_date.weekday().num_days_from_monday()));
    local_instant(monday, tz, 0, 1)
}

/// Day `offset` (0 = Monday .. 4 = Friday) of the week starting at `monday`.
#[must_use]
pub fn weekday_date(monday: DateTime<Utc>, offset: usize) -> DateTime<Utc> {
    monday + Duration::days(offset as i64)
}

/// `[Monday 00:00, Saturday 00:00)` of the week containing `reference`,
/// evaluated in `tz`.
#[must_use]
pub fn week_bounds(reference: DateTime<Utc>, tz: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let local_date = reference.with_timezone(&tz).date_naive();
    let monday =
        local_date - Duration::days(i64::from(local_date.weekday().num_days_from_monday()));
    (
        local_instant(monday, tz, 0, 0),
        local_instant(monday + Duration::days(5), tz, 0, 0),
    )
}

/// `[date 00:00, date + 1 day 00:00)` evaluated in `tz`.
#[must_use]
pub fn day_bounds(date: NaiveDate, tz: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    (
        local_instant(date, tz, 0, 0),
        local_instant(date + Duration::days(1), tz, 0, 0),
    )
}

fn local_instant(date: NaiveDate, tz: Tz, hour: u32, minute: u32) -> DateTime<Utc> {
    let naive = date
        .and_hms_opt(hour, minute, 0)
        .expect("hour and minute are in range");
    // Midnight is never skipped by a European DST transition, but resolve
    // ambiguity towards the earlier instant anyway.
    tz.from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
        .with_timezone(&Utc)
}
