//! Initial database migration.
//!
//! Creates users, billing cycles with their ordered entries, and categories.
//! The schema only carries constraints that cannot drift from the validator:
//! NOT NULL, range checks and foreign keys.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(BILLING_CYCLES_SQL).await?;
        db.execute_unprepared(BILLING_CYCLE_ENTRIES_SQL).await?;
        db.execute_unprepared(CATEGORIES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE debt_status AS ENUM ('PAGO', 'PENDENTE', 'AGENDADO');
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const BILLING_CYCLES_SQL: &str = r"
CREATE TABLE billing_cycles (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name VARCHAR(255) NOT NULL,
    month INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
    year INTEGER NOT NULL CHECK (year BETWEEN 1970 AND 2100),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Listing order: newest period first
CREATE INDEX idx_billing_cycles_user_period ON billing_cycles(user_id, year DESC, month DESC);
";

const BILLING_CYCLE_ENTRIES_SQL: &str = r"
CREATE TABLE billing_cycle_credits (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    billing_cycle_id UUID NOT NULL REFERENCES billing_cycles(id) ON DELETE CASCADE,
    position INTEGER NOT NULL CHECK (position >= 0),
    name VARCHAR(255) NOT NULL,
    value NUMERIC(14, 2) NOT NULL CHECK (value >= 0),
    UNIQUE (billing_cycle_id, position)
);

CREATE TABLE billing_cycle_debts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    billing_cycle_id UUID NOT NULL REFERENCES billing_cycles(id) ON DELETE CASCADE,
    position INTEGER NOT NULL CHECK (position >= 0),
    name VARCHAR(255) NOT NULL,
    value NUMERIC(14, 2) NOT NULL CHECK (value >= 0),
    status debt_status NOT NULL,
    payment_day INTEGER NOT NULL CHECK (payment_day BETWEEN 1 AND 31),
    payment_date TIMESTAMPTZ,
    category VARCHAR(255),
    UNIQUE (billing_cycle_id, position),
    CONSTRAINT chk_payment_date_unless_scheduled
        CHECK (status = 'AGENDADO' OR payment_date IS NOT NULL)
);

-- Category deletion guard
CREATE INDEX idx_billing_cycle_debts_category ON billing_cycle_debts(category)
    WHERE category IS NOT NULL;
";

const CATEGORIES_SQL: &str = r"
CREATE TABLE categories (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    description VARCHAR(255) NOT NULL CHECK (length(trim(description)) > 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (user_id, description)
);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS categories CASCADE;
DROP TABLE IF EXISTS billing_cycle_debts CASCADE;
DROP TABLE IF EXISTS billing_cycle_credits CASCADE;
DROP TABLE IF EXISTS billing_cycles CASCADE;
DROP TABLE IF EXISTS users CASCADE;
DROP TYPE IF EXISTS debt_status;
";
