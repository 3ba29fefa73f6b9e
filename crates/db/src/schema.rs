use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create hospitals table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS hospitals (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            hospital_code VARCHAR(64) NOT NULL UNIQUE,
            name VARCHAR(255) NOT NULL,
            timezone VARCHAR(64) NOT NULL DEFAULT 'Asia/Tokyo',
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create routes table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS routes (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            hospital_id UUID NOT NULL REFERENCES hospitals(id) ON DELETE CASCADE,
            key VARCHAR(50) NOT NULL,
            label VARCHAR(50) NOT NULL,
            phone VARCHAR(20) NOT NULL,
            is_enabled BOOLEAN NOT NULL DEFAULT TRUE,
            sort_order INTEGER NOT NULL DEFAULT 10,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT uq_routes_hospital_key UNIQUE (hospital_id, key)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create route_weekly_hours table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS route_weekly_hours (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            route_id UUID NOT NULL REFERENCES routes(id) ON DELETE CASCADE,
            dow SMALLINT NOT NULL CHECK (dow BETWEEN 0 AND 6),
            open_time TIME NULL,
            close_time TIME NULL,
            is_closed BOOLEAN NOT NULL DEFAULT FALSE,
            CONSTRAINT uq_weekly_route_dow UNIQUE (route_id, dow)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create route_exceptions table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS route_exceptions (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            route_id UUID NOT NULL REFERENCES routes(id) ON DELETE CASCADE,
            start_date DATE NOT NULL,
            end_date DATE NOT NULL,
            title VARCHAR(255) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create route_exception_hours table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS route_exception_hours (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            exception_id UUID NOT NULL REFERENCES route_exceptions(id) ON DELETE CASCADE,
            dow SMALLINT NOT NULL CHECK (dow BETWEEN 0 AND 6),
            open_time TIME NULL,
            close_time TIME NULL,
            is_closed BOOLEAN NOT NULL DEFAULT FALSE,
            CONSTRAINT uq_ex_hours_exception_dow UNIQUE (exception_id, dow)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create news table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS news (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            hospital_id UUID NOT NULL REFERENCES hospitals(id) ON DELETE CASCADE,
            title VARCHAR(255) NOT NULL,
            body TEXT NULL,
            priority VARCHAR(16) NOT NULL DEFAULT 'normal' CHECK (priority IN ('high', 'normal')),
            is_published BOOLEAN NOT NULL DEFAULT TRUE,
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create patient_registrations table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS patient_registrations (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            hospital_code VARCHAR(64) NOT NULL,
            user_agent VARCHAR(255) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes (prepared statements take one command each)
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_routes_hospital_id ON routes(hospital_id)",
        "CREATE INDEX IF NOT EXISTS idx_route_exceptions_route_dates ON route_exceptions(route_id, start_date, end_date)",
        "CREATE INDEX IF NOT EXISTS idx_news_hospital_id ON news(hospital_id)",
        "CREATE INDEX IF NOT EXISTS idx_patient_registrations_code ON patient_registrations(hospital_code)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
