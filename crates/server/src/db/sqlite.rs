use std::{fmt, marker::PhantomData};

use anyhow::anyhow;
use async_trait::async_trait;
use deadpool_sqlite::Pool;
use exemplar::Model;
use rusqlite::{Connection, TransactionBehavior};
use shared::{
    model::{Exercise, ExerciseField, Filter, Record, WorkoutPlan, WorkoutPlanField},
    types::Uuid,
};
use tracing::{debug, instrument};

use crate::db::{Gateway, GatewayError};

/// Synchronous row operations a record needs to be stored in sqlite
pub trait SqliteRecord: Record {
    fn insert(conn: &Connection, record: &Self) -> Result<(), anyhow::Error>;

    fn fetch_by_id(conn: &Connection, id: &Uuid) -> Result<Option<Self>, anyhow::Error>;

    fn fetch_where(
        conn: &Connection,
        filter: Option<&Filter<Self::Field>>,
    ) -> Result<Vec<Self>, anyhow::Error>;

    /// Returns the number of rows written
    fn update(conn: &Connection, record: &Self) -> Result<usize, anyhow::Error>;

    /// Returns the number of rows removed
    fn delete(conn: &Connection, id: &Uuid) -> Result<usize, anyhow::Error>;
}

impl SqliteRecord for WorkoutPlan {
    fn insert(conn: &Connection, record: &Self) -> Result<(), anyhow::Error> {
        record.insert(conn)
    }

    fn fetch_by_id(conn: &Connection, id: &Uuid) -> Result<Option<Self>, anyhow::Error> {
        WorkoutPlan::fetch_by_id(conn, id)
    }

    fn fetch_where(
        conn: &Connection,
        filter: Option<&Filter<WorkoutPlanField>>,
    ) -> Result<Vec<Self>, anyhow::Error> {
        WorkoutPlan::fetch_where(conn, filter)
    }

    fn update(conn: &Connection, record: &Self) -> Result<usize, anyhow::Error> {
        record.update(conn)
    }

    fn delete(conn: &Connection, id: &Uuid) -> Result<usize, anyhow::Error> {
        WorkoutPlan::delete(conn, id)
    }
}

impl SqliteRecord for Exercise {
    fn insert(conn: &Connection, record: &Self) -> Result<(), anyhow::Error> {
        Model::insert(record, conn)?;
        Ok(())
    }

    fn fetch_by_id(conn: &Connection, id: &Uuid) -> Result<Option<Self>, anyhow::Error> {
        Exercise::fetch_by_id(conn, id)
    }

    fn fetch_where(
        conn: &Connection,
        filter: Option<&Filter<ExerciseField>>,
    ) -> Result<Vec<Self>, anyhow::Error> {
        Exercise::fetch_where(conn, filter)
    }

    fn update(_conn: &Connection, record: &Self) -> Result<usize, anyhow::Error> {
        Err(anyhow!("{} {} can't be updated in place", Self::NAME, record.id))
    }

    fn delete(conn: &Connection, id: &Uuid) -> Result<usize, anyhow::Error> {
        Exercise::delete(conn, id)
    }
}

/// [`Gateway`] backed by the pooled sqlite database. Each call checks out a
/// connection and runs on the pool's blocking thread via `interact`. Writes
/// that read first take the write lock up front so a commit from another
/// connection can't invalidate their snapshot
pub struct SqliteGateway<R> {
    pool: Pool,
    _record: PhantomData<fn() -> R>,
}

impl<R> SqliteGateway<R> {
    pub fn new(pool: Pool) -> Self {
        Self { pool, _record: PhantomData }
    }
}

impl<R> Clone for SqliteGateway<R> {
    fn clone(&self) -> Self {
        // pool uses an Arc internally so clone is cheap
        Self::new(self.pool.clone())
    }
}

impl<R> fmt::Debug for SqliteGateway<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteGateway").field("pool", &self.pool.status()).finish()
    }
}

impl<R: SqliteRecord> SqliteGateway<R> {
    async fn interact<T, F>(&self, f: F) -> Result<T, GatewayError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T, GatewayError> + Send + 'static,
    {
        let conn = self.pool.get().await.map_err(|e| GatewayError::Storage(e.into()))?;
        conn.interact(f)
            .await
            .map_err(|e| GatewayError::Storage(anyhow!("Database interaction failed: {e:?}")))?
    }
}

#[async_trait]
impl<R: SqliteRecord> Gateway<R> for SqliteGateway<R> {
    #[instrument(skip(self), fields(record = R::NAME))]
    async fn create(&self, fields: R::New) -> Result<R, GatewayError> {
        let record = R::from_new(Uuid::new_v4(), fields);
        self.interact(move |conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let created = {
                R::insert(&tx, &record)?;
                R::fetch_by_id(&tx, record.id())?
                    .ok_or_else(|| anyhow!("{} {} missing after insert", R::NAME, record.id()))?
            };
            tx.commit()?;

            debug!("Created {} {}", R::NAME, created.id());
            Ok(created)
        })
        .await
    }

    #[instrument(skip(self), fields(record = R::NAME))]
    async fn find_one(&self, id: &Uuid) -> Result<R, GatewayError> {
        let id = *id;
        self.interact(move |conn| R::fetch_by_id(conn, &id)?.ok_or(GatewayError::NotFound))
            .await
    }

    #[instrument(skip(self), fields(record = R::NAME))]
    async fn find_many(&self, filter: Option<Filter<R::Field>>) -> Result<Vec<R>, GatewayError> {
        self.interact(move |conn| Ok(R::fetch_where(conn, filter.as_ref())?)).await
    }

    #[instrument(skip(self), fields(record = R::NAME))]
    async fn update(&self, id: &Uuid, changes: R::Changes) -> Result<R, GatewayError> {
        let id = *id;
        self.interact(move |conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let updated = {
                let mut record = R::fetch_by_id(&tx, &id)?.ok_or(GatewayError::NotFound)?;
                record.apply(changes);
                R::update(&tx, &record)?;
                record
            };
            tx.commit()?;

            debug!("Updated {} {}", R::NAME, id);
            Ok(updated)
        })
        .await
    }

    #[instrument(skip(self), fields(record = R::NAME))]
    async fn delete(&self, id: &Uuid) -> Result<(), GatewayError> {
        let id = *id;
        self.interact(move |conn| match R::delete(conn, &id)? {
            0 => Err(GatewayError::NotFound),
            _ => {
                debug!("Deleted {} {}", R::NAME, id);
                Ok(())
            },
        })
        .await
    }
}
