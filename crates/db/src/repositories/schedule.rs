use crate::models::{DbDayHours, DbRouteException};
use chrono::NaiveDate;
use duxcall_core::models::schedule::DayHours;
use eyre::Result;
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

/// The newest exception of `route_id` whose range contains `date`.
/// Exact `created_at` ties go to the larger id.
pub async fn find_latest_exception(
    pool: &Pool<Postgres>,
    route_id: Uuid,
    date: NaiveDate,
) -> Result<Option<DbRouteException>> {
    let exception = sqlx::query_as::<_, DbRouteException>(
        r#"
        SELECT id, route_id, start_date, end_date, title, created_at
        FROM route_exceptions
        WHERE route_id = $1
          AND start_date <= $2
          AND end_date >= $2
        ORDER BY created_at DESC, id DESC
        LIMIT 1
        "#,
    )
    .bind(route_id)
    .bind(date)
    .fetch_optional(pool)
    .await?;

    Ok(exception)
}

pub async fn get_exception_hours(
    pool: &Pool<Postgres>,
    exception_id: Uuid,
    dow: i16,
) -> Result<Option<DbDayHours>> {
    let hours = sqlx::query_as::<_, DbDayHours>(
        r#"
        SELECT dow, open_time, close_time, is_closed
        FROM route_exception_hours
        WHERE exception_id = $1 AND dow = $2
        "#,
    )
    .bind(exception_id)
    .bind(dow)
    .fetch_optional(pool)
    .await?;

    Ok(hours)
}

pub async fn get_weekly_hours(
    pool: &Pool<Postgres>,
    route_id: Uuid,
    dow: i16,
) -> Result<Option<DbDayHours>> {
    let hours = sqlx::query_as::<_, DbDayHours>(
        r#"
        SELECT dow, open_time, close_time, is_closed
        FROM route_weekly_hours
        WHERE route_id = $1 AND dow = $2
        "#,
    )
    .bind(route_id)
    .bind(dow)
    .fetch_optional(pool)
    .await?;

    Ok(hours)
}

pub async fn get_weekly_hours_for_route(
    pool: &Pool<Postgres>,
    route_id: Uuid,
) -> Result<Vec<DbDayHours>> {
    let hours = sqlx::query_as::<_, DbDayHours>(
        r#"
        SELECT dow, open_time, close_time, is_closed
        FROM route_weekly_hours
        WHERE route_id = $1
        ORDER BY dow ASC
        "#,
    )
    .bind(route_id)
    .fetch_all(pool)
    .await?;

    Ok(hours)
}

/// Stores `hours` (normalized) for one day of the route's week.
pub async fn upsert_weekly_hours(
    conn: &mut PgConnection,
    route_id: Uuid,
    dow: i16,
    hours: DayHours,
) -> Result<()> {
    let hours = hours.normalized();

    sqlx::query(
        r#"
        INSERT INTO route_weekly_hours (route_id, dow, open_time, close_time, is_closed)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (route_id, dow) DO UPDATE
        SET open_time = EXCLUDED.open_time,
            close_time = EXCLUDED.close_time,
            is_closed = EXCLUDED.is_closed
        "#,
    )
    .bind(route_id)
    .bind(dow)
    .bind(hours.open_time)
    .bind(hours.close_time)
    .bind(hours.is_closed)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Stores every submitted day in one transaction.
pub async fn save_weekly_hours(
    pool: &Pool<Postgres>,
    route_id: Uuid,
    days: &[(i16, DayHours)],
) -> Result<()> {
    let mut tx = pool.begin().await?;

    for (dow, hours) in days {
        upsert_weekly_hours(&mut *tx, route_id, *dow, *hours).await?;
    }

    tx.commit().await?;

    tracing::debug!("Saved {} weekly hours rows for route {}", days.len(), route_id);
    Ok(())
}

pub async fn find_exception_by_range(
    conn: &mut PgConnection,
    route_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<Option<DbRouteException>> {
    let exception = sqlx::query_as::<_, DbRouteException>(
        r#"
        SELECT id, route_id, start_date, end_date, title, created_at
        FROM route_exceptions
        WHERE route_id = $1 AND start_date = $2 AND end_date = $3
        ORDER BY created_at DESC, id DESC
        LIMIT 1
        "#,
    )
    .bind(route_id)
    .bind(start_date)
    .bind(end_date)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(exception)
}

pub async fn create_exception(
    conn: &mut PgConnection,
    route_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
    title: Option<&str>,
) -> Result<DbRouteException> {
    let exception = sqlx::query_as::<_, DbRouteException>(
        r#"
        INSERT INTO route_exceptions (route_id, start_date, end_date, title)
        VALUES ($1, $2, $3, $4)
        RETURNING id, route_id, start_date, end_date, title, created_at
        "#,
    )
    .bind(route_id)
    .bind(start_date)
    .bind(end_date)
    .bind(title)
    .fetch_one(&mut *conn)
    .await?;

    tracing::debug!(
        "Exception created: id={}, route_id={}, {}..={}",
        exception.id,
        route_id,
        start_date,
        end_date
    );
    Ok(exception)
}

/// Stores `hours` (normalized) for one day of an exception.
pub async fn upsert_exception_hours(
    conn: &mut PgConnection,
    exception_id: Uuid,
    dow: i16,
    hours: DayHours,
) -> Result<()> {
    let hours = hours.normalized();

    sqlx::query(
        r#"
        INSERT INTO route_exception_hours (exception_id, dow, open_time, close_time, is_closed)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (exception_id, dow) DO UPDATE
        SET open_time = EXCLUDED.open_time,
            close_time = EXCLUDED.close_time,
            is_closed = EXCLUDED.is_closed
        "#,
    )
    .bind(exception_id)
    .bind(dow)
    .bind(hours.open_time)
    .bind(hours.close_time)
    .bind(hours.is_closed)
    .execute(&mut *conn)
    .await?;

    Ok(())
}
