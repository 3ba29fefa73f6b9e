use crate::models::DbRoute;
use duxcall_core::models::route::{MoveDirection, DEFAULT_SORT_ORDER};
use eyre::{eyre, Result};
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

/// Enabled routes of a hospital in display order.
pub async fn get_enabled_routes(pool: &Pool<Postgres>, hospital_id: Uuid) -> Result<Vec<DbRoute>> {
    let routes = sqlx::query_as::<_, DbRoute>(
        r#"
        SELECT id, hospital_id, key, label, phone, is_enabled, sort_order, created_at, updated_at
        FROM routes
        WHERE hospital_id = $1 AND is_enabled = TRUE
        ORDER BY sort_order ASC, id ASC
        "#,
    )
    .bind(hospital_id)
    .fetch_all(pool)
    .await?;

    Ok(routes)
}

/// Every route of a hospital in display order, disabled ones included.
pub async fn get_routes(pool: &Pool<Postgres>, hospital_id: Uuid) -> Result<Vec<DbRoute>> {
    let routes = sqlx::query_as::<_, DbRoute>(
        r#"
        SELECT id, hospital_id, key, label, phone, is_enabled, sort_order, created_at, updated_at
        FROM routes
        WHERE hospital_id = $1
        ORDER BY sort_order ASC, id ASC
        "#,
    )
    .bind(hospital_id)
    .fetch_all(pool)
    .await?;

    Ok(routes)
}

pub async fn get_route_by_key(
    pool: &Pool<Postgres>,
    hospital_id: Uuid,
    key: &str,
) -> Result<Option<DbRoute>> {
    let route = sqlx::query_as::<_, DbRoute>(
        r#"
        SELECT id, hospital_id, key, label, phone, is_enabled, sort_order, created_at, updated_at
        FROM routes
        WHERE hospital_id = $1 AND key = $2
        "#,
    )
    .bind(hospital_id)
    .bind(key)
    .fetch_optional(pool)
    .await?;

    Ok(route)
}

/// Creates the route or refreshes it, keyed by hospital and route key.
///
/// Without `sort_order` a new route is placed at [`DEFAULT_SORT_ORDER`] and an
/// existing route keeps its position.
pub async fn upsert_route(
    conn: &mut PgConnection,
    hospital_id: Uuid,
    key: &str,
    label: &str,
    phone: &str,
    is_enabled: bool,
    sort_order: Option<i32>,
) -> Result<DbRoute> {
    let route = sqlx::query_as::<_, DbRoute>(
        r#"
        INSERT INTO routes (hospital_id, key, label, phone, is_enabled, sort_order)
        VALUES ($1, $2, $3, $4, $5, COALESCE($6, $7))
        ON CONFLICT (hospital_id, key) DO UPDATE
        SET label = EXCLUDED.label,
            phone = EXCLUDED.phone,
            is_enabled = EXCLUDED.is_enabled,
            sort_order = COALESCE($6, routes.sort_order),
            updated_at = NOW()
        RETURNING id, hospital_id, key, label, phone, is_enabled, sort_order, created_at, updated_at
        "#,
    )
    .bind(hospital_id)
    .bind(key)
    .bind(label)
    .bind(phone)
    .bind(is_enabled)
    .bind(sort_order)
    .bind(DEFAULT_SORT_ORDER)
    .fetch_one(&mut *conn)
    .await?;

    tracing::debug!(
        "Route upserted: id={}, key={}, enabled={}",
        route.id,
        key,
        route.is_enabled
    );
    Ok(route)
}

/// Swaps the route's sort order with its neighbour in `direction`.
///
/// Returns the route's new sort order, or `None` when it is already first
/// (moving up) or last (moving down).
pub async fn move_route(
    pool: &Pool<Postgres>,
    route_id: Uuid,
    direction: MoveDirection,
) -> Result<Option<i32>> {
    let mut tx = pool.begin().await?;

    let current = sqlx::query_as::<_, (Uuid, i32)>(
        r#"
        SELECT hospital_id, sort_order
        FROM routes
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(route_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| eyre!("Route not found"))?;
    let (hospital_id, current_order) = current;

    let neighbour_query = match direction {
        MoveDirection::Up => {
            r#"
            SELECT id, sort_order
            FROM routes
            WHERE hospital_id = $1 AND sort_order < $2
            ORDER BY sort_order DESC, id DESC
            LIMIT 1
            FOR UPDATE
            "#
        }
        MoveDirection::Down => {
            r#"
            SELECT id, sort_order
            FROM routes
            WHERE hospital_id = $1 AND sort_order > $2
            ORDER BY sort_order ASC, id ASC
            LIMIT 1
            FOR UPDATE
            "#
        }
    };

    let neighbour = sqlx::query_as::<_, (Uuid, i32)>(neighbour_query)
        .bind(hospital_id)
        .bind(current_order)
        .fetch_optional(&mut *tx)
        .await?;

    let Some((neighbour_id, neighbour_order)) = neighbour else {
        tracing::debug!("Route {} is already at the edge, nothing to move", route_id);
        tx.commit().await?;
        return Ok(None);
    };

    for (id, sort_order) in [(route_id, neighbour_order), (neighbour_id, current_order)] {
        sqlx::query(
            r#"
            UPDATE routes
            SET sort_order = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(sort_order)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::debug!(
        "Route {} moved from {} to {} (swapped with {})",
        route_id,
        current_order,
        neighbour_order,
        neighbour_id
    );
    Ok(Some(neighbour_order))
}
