//! Unit tests for the task module.


use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockall::mock;

mock! {
    pub FixedClock {}

    impl mockable::Clock for FixedClock {
        fn local(&self) -> DateTime<Local>;
        fn utc(&self) -> DateTime<Utc>;
    }
}

/// Noon UTC on 2030-06-15, the "today" of every unit test.
pub(super) fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 6, 15, 12, 0, 0)
        .single()
        .expect("valid fixed instant")
}

pub(super) fn today() -> NaiveDate {
    noon().date_naive()
}

pub(super) fn day_offset(days: i64) -> NaiveDate {
    today() + chrono::Duration::days(days)
}

/// Clock pinned to [`noon`].
pub(super) fn fixed_clock() -> MockFixedClock {
    let mut clock = MockFixedClock::new();
    clock.expect_utc().returning(noon);
    clock
        .expect_local()
        .returning(|| noon().with_timezone(&Local));
    clock
}
