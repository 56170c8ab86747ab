//! Database migration runner for MyMoney.
//!
//! Reads `DATABASE_URL` (a `.env` file is honored).
//!
//! Usage:
//!   migrator up      - Apply pending migrations
//!   migrator down    - Roll back the last migration
//!   migrator status  - List applied and pending migrations
//!   migrator fresh   - Drop every table and re-apply all migrations

use mymoney_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    cli::run_cli(Migrator).await;
}
