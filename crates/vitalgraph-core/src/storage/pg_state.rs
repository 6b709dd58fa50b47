//! Relational backend: one jsonb row in Postgres.
//!
//! Every mutation runs inside a transaction that first takes a row lock
//! (`SELECT … FOR UPDATE`) on the single state row, so concurrent
//! processes serialize at the database even though each also holds its
//! own in-process gate. Serialization failures surface as
//! `VitalError::Concurrency` so callers know to retry.

use crate::state::AppState;
use crate::types::VitalError;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::sql_types::{Jsonb, Text};

/// Primary key of the single state row.
const APP_STATE_KEY: &str = "app";

const ENSURE_SCHEMA_SQL: &str = "\
    CREATE TABLE IF NOT EXISTS app_state (\n\
        key TEXT PRIMARY KEY,\n\
        data JSONB NOT NULL,\n\
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),\n\
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()\n\
    )";

#[derive(QueryableByName)]
struct StateRow {
    #[diesel(sql_type = Jsonb)]
    data: serde_json::Value,
}

impl From<diesel::result::Error> for VitalError {
    fn from(error: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};
        match &error {
            Error::DatabaseError(DatabaseErrorKind::SerializationFailure, _) => {
                VitalError::Concurrency(error.to_string())
            }
            _ => VitalError::Io(error.to_string()),
        }
    }
}

/// Postgres-backed persistence of the aggregate document.
pub struct PgStateStore {
    pool: Pool<ConnectionManager<PgConnection>>,
    url: String,
}

impl std::fmt::Debug for PgStateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgStateStore").finish_non_exhaustive()
    }
}

impl PgStateStore {
    /// Connect, create the table if missing, and seed the state row.
    pub fn open(database_url: &str) -> Result<Self, VitalError> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(4)
            .build(manager)
            .map_err(|e| VitalError::Io(e.to_string()))?;
        let store = Self {
            pool,
            url: database_url.to_owned(),
        };
        store.ensure_state_row()?;
        Ok(store)
    }

    /// The connection string used to open this store.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    fn connection(
        &self,
    ) -> Result<PooledConnection<ConnectionManager<PgConnection>>, VitalError> {
        self.pool.get().map_err(|e| VitalError::Io(e.to_string()))
    }

    fn ensure_state_row(&self) -> Result<(), VitalError> {
        let mut conn = self.connection()?;
        diesel::sql_query(ENSURE_SCHEMA_SQL).execute(&mut conn)?;
        let empty = serde_json::to_value(AppState::default())
            .map_err(|e| VitalError::Serialization(e.to_string()))?;
        diesel::sql_query(
            "INSERT INTO app_state (key, data) VALUES ($1, $2) ON CONFLICT (key) DO NOTHING",
        )
        .bind::<Text, _>(APP_STATE_KEY)
        .bind::<Jsonb, _>(&empty)
        .execute(&mut conn)?;
        Ok(())
    }

    fn decode(value: serde_json::Value) -> AppState {
        // Unknown or stale shapes read as blank, matching the file backend.
        serde_json::from_value(value).unwrap_or_default()
    }

    /// Read the current document without locking.
    pub fn load(&self) -> Result<AppState, VitalError> {
        let mut conn = self.connection()?;
        let rows: Vec<StateRow> =
            diesel::sql_query("SELECT data FROM app_state WHERE key = $1 LIMIT 1")
                .bind::<Text, _>(APP_STATE_KEY)
                .load(&mut conn)?;
        Ok(rows
            .into_iter()
            .next()
            .map_or_else(AppState::default, |row| Self::decode(row.data)))
    }

    /// Run `mutator` against a row-locked copy of the document; commit the
    /// updated document only when the mutator succeeds.
    pub fn mutate_with<T>(
        &self,
        mutator: impl FnOnce(&mut AppState) -> Result<T, VitalError>,
    ) -> Result<T, VitalError> {
        let mut conn = self.connection()?;
        conn.transaction::<T, VitalError, _>(|conn| {
            diesel::sql_query("SELECT key FROM app_state WHERE key = $1 FOR UPDATE")
                .bind::<Text, _>(APP_STATE_KEY)
                .execute(conn)?;
            let rows: Vec<StateRow> =
                diesel::sql_query("SELECT data FROM app_state WHERE key = $1 LIMIT 1")
                    .bind::<Text, _>(APP_STATE_KEY)
                    .load(conn)?;
            let mut state = rows
                .into_iter()
                .next()
                .map_or_else(AppState::default, |row| Self::decode(row.data));
            let result = mutator(&mut state)?;
            let data = serde_json::to_value(&state)
                .map_err(|e| VitalError::Serialization(e.to_string()))?;
            diesel::sql_query(
                "UPDATE app_state SET data = $1, updated_at = now() WHERE key = $2",
            )
            .bind::<Jsonb, _>(&data)
            .bind::<Text, _>(APP_STATE_KEY)
            .execute(conn)?;
            Ok(result)
        })
    }
}
