use rusqlite::Connection;

use crate::error::LunchError;

pub fn run_migrations(conn: &Connection) -> Result<(), LunchError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS plans (
            id TEXT PRIMARY KEY,
            date TEXT NOT NULL,
            main TEXT NOT NULL,
            sides TEXT NOT NULL DEFAULT '[]',
            drink TEXT,
            notes TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS prep_steps (
            id TEXT PRIMARY KEY,
            plan_id TEXT NOT NULL REFERENCES plans(id) ON DELETE CASCADE,
            text TEXT NOT NULL DEFAULT '',
            timing TEXT NOT NULL
                CHECK (timing IN ('night_before', 'morning_of')),
            position INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_plans_date ON plans(date);
        CREATE INDEX IF NOT EXISTS idx_steps_plan ON prep_steps(plan_id, position);
        ",
    )?;
    Ok(())
}
