use super::HoldingStore;
use crate::error::{Error, Result};
use crate::portfolio::holding::now;
use crate::portfolio::{Holding, HoldingUpdate, NewHolding};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS holdings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        symbol TEXT NOT NULL,
        shares REAL NOT NULL,
        avg_price REAL NOT NULL,
        last_price REAL NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
";

const COLUMNS: &str = "id, symbol, shares, avg_price, last_price, created_at, updated_at";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_connection(Connection::open(path)?)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(SqliteStore {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::Storage("database connection lock poisoned".to_string()))
    }
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<Holding> {
    Ok(Holding {
        id: row.get::<_, i64>(0)? as u64,
        symbol: row.get(1)?,
        shares: row.get(2)?,
        average_cost: row.get(3)?,
        current_price: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

fn find(conn: &Connection, id: i64) -> Result<Option<Holding>> {
    let holding = conn
        .query_row(
            &format!("SELECT {} FROM holdings WHERE id = ?1", COLUMNS),
            params![id],
            from_row,
        )
        .optional()?;
    Ok(holding)
}

impl HoldingStore for SqliteStore {
    fn create(&self, new_holding: NewHolding) -> Result<Holding> {
        let new_holding = new_holding.validate()?;
        let conn = self.conn()?;
        let created_at = now();

        conn.execute(
            "INSERT INTO holdings (symbol, shares, avg_price, last_price, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![
                new_holding.symbol,
                new_holding.shares,
                new_holding.average_cost,
                new_holding.current_price,
                created_at,
            ],
        )?;
        let id = conn.last_insert_rowid() as u64;
        tracing::debug!("Inserted holding {} ({})", id, new_holding.symbol);

        Ok(new_holding.into_holding(id, created_at))
    }

    fn list(&self) -> Result<Vec<Holding>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("SELECT {} FROM holdings ORDER BY id", COLUMNS))?;
        let holdings = stmt
            .query_map([], from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(holdings)
    }

    fn get(&self, id: u64) -> Result<Option<Holding>> {
        let Ok(id) = i64::try_from(id) else {
            return Ok(None);
        };
        let conn = self.conn()?;
        find(&conn, id)
    }

    fn update(&self, id: u64, update: HoldingUpdate) -> Result<Holding> {
        let update = update.validate()?;
        let row_id = i64::try_from(id).map_err(|_| Error::NotFound(id))?;
        let conn = self.conn()?;

        let mut holding = find(&conn, row_id)?.ok_or(Error::NotFound(id))?;
        holding.apply(update, now());

        conn.execute(
            "UPDATE holdings
             SET symbol = ?1, shares = ?2, avg_price = ?3, last_price = ?4, updated_at = ?5
             WHERE id = ?6",
            params![
                holding.symbol,
                holding.shares,
                holding.average_cost,
                holding.current_price,
                holding.updated_at,
                row_id,
            ],
        )?;

        Ok(holding)
    }

    fn delete(&self, id: u64) -> Result<bool> {
        let Ok(id) = i64::try_from(id) else {
            return Ok(false);
        };
        let removed = self
            .conn()?
            .execute("DELETE FROM holdings WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }
}
