//! Development seed data.
//!
//! Running the seed twice leaves the database in the same state: every row is
//! upserted by its natural key.

use chrono::NaiveDate;
use duxcall_core::models::{
    news::NewsPriority,
    schedule::{parse_time_of_day, DayHours},
};
use eyre::{eyre, Result};
use sqlx::{PgConnection, Pool, Postgres};
use tracing::info;
use uuid::Uuid;

use crate::repositories::{hospital, news, route, schedule};

pub const DEV_HOSPITAL_CODE: &str = "tokyo-clinic";

/// Open/close pairs from Monday to Sunday; `None` is a closed day.
type Week = [Option<(&'static str, &'static str)>; 7];

const RESERVATION_WEEK: Week = [
    Some(("09:00", "17:00")),
    Some(("09:00", "17:00")),
    Some(("09:00", "17:00")),
    Some(("09:00", "17:00")),
    Some(("09:00", "17:00")),
    Some(("09:00", "12:00")),
    None,
];

const VISIT_WEEK: Week = [
    Some(("13:00", "16:00")),
    Some(("13:00", "16:00")),
    Some(("13:00", "16:00")),
    Some(("13:00", "16:00")),
    Some(("13:00", "16:00")),
    None,
    None,
];

const VISIT_YEAR_END_WEEK: Week = [
    Some(("14:00", "15:00")),
    Some(("14:00", "15:00")),
    Some(("14:00", "15:00")),
    Some(("14:00", "15:00")),
    Some(("14:00", "15:00")),
    None,
    None,
];

fn day_hours(day: Option<(&str, &str)>) -> Result<DayHours> {
    let Some((open, close)) = day else {
        return Ok(DayHours::closed());
    };
    let open = parse_time_of_day(open).ok_or_else(|| eyre!("Invalid seed time: {}", open))?;
    let close = parse_time_of_day(close).ok_or_else(|| eyre!("Invalid seed time: {}", close))?;
    Ok(DayHours::open(open, close))
}

fn seed_date(y: i32, m: u32, d: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| eyre!("Invalid seed date: {}-{}-{}", y, m, d))
}

async fn seed_weekly(conn: &mut PgConnection, route_id: Uuid, week: &Week) -> Result<()> {
    for (dow, day) in week.iter().enumerate() {
        schedule::upsert_weekly_hours(conn, route_id, dow as i16, day_hours(*day)?).await?;
    }
    Ok(())
}

/// Loads the sample hospital, its two routes, a year-end exception for
/// visits, and one announcement. Returns the hospital code.
pub async fn seed_dev_data(pool: &Pool<Postgres>) -> Result<String> {
    let mut tx = pool.begin().await?;

    let hospital = hospital::upsert_hospital(
        &mut *tx,
        DEV_HOSPITAL_CODE,
        "Tokyo Sample Hospital",
        "Asia/Tokyo",
    )
    .await?;

    let reservation = route::upsert_route(
        &mut *tx,
        hospital.id,
        "reservation",
        "Reservations",
        "0312345678",
        true,
        Some(10),
    )
    .await?;
    let visit = route::upsert_route(
        &mut *tx,
        hospital.id,
        "visit",
        "Visits",
        "0399990000",
        true,
        Some(20),
    )
    .await?;

    seed_weekly(&mut *tx, reservation.id, &RESERVATION_WEEK).await?;
    seed_weekly(&mut *tx, visit.id, &VISIT_WEEK).await?;

    let start_date = seed_date(2026, 3, 20)?;
    let end_date = seed_date(2026, 3, 31)?;
    let exception =
        match schedule::find_exception_by_range(&mut *tx, visit.id, start_date, end_date).await? {
            Some(existing) => existing,
            None => {
                schedule::create_exception(
                    &mut *tx,
                    visit.id,
                    start_date,
                    end_date,
                    Some("Fiscal year-end hours (test)"),
                )
                .await?
            }
        };
    for (dow, day) in VISIT_YEAR_END_WEEK.iter().enumerate() {
        schedule::upsert_exception_hours(&mut *tx, exception.id, dow as i16, day_hours(*day)?)
            .await?;
    }

    news::upsert_news(
        &mut *tx,
        hospital.id,
        "Visiting hours (sample)",
        Some("Check the Visits route in the app for today's visiting hours."),
        NewsPriority::High,
    )
    .await?;

    tx.commit().await?;

    info!("Development data seeded for hospital {}", DEV_HOSPITAL_CODE);
    Ok(hospital.hospital_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use pretty_assertions::assert_eq;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_every_seed_week_parses() {
        for week in [&RESERVATION_WEEK, &VISIT_WEEK, &VISIT_YEAR_END_WEEK] {
            for day in week.iter() {
                assert!(day_hours(*day).is_ok());
            }
        }
    }

    #[test]
    fn test_reservation_saturday_is_a_half_day() {
        assert_eq!(
            day_hours(RESERVATION_WEEK[5]).unwrap(),
            DayHours::open(time(9, 0), time(12, 0))
        );
        assert_eq!(day_hours(RESERVATION_WEEK[6]).unwrap(), DayHours::closed());
    }

    #[test]
    fn test_visits_close_on_weekends() {
        assert!(day_hours(VISIT_WEEK[5]).unwrap().is_closed);
        assert!(day_hours(VISIT_WEEK[6]).unwrap().is_closed);
        assert!(day_hours(VISIT_YEAR_END_WEEK[6]).unwrap().is_closed);
    }

    #[test]
    fn test_invalid_seed_time_is_an_error() {
        assert!(day_hours(Some(("9am", "17:00"))).is_err());
    }
}
