use std::{
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use dashmap::DashMap;
use shared::{
    model::{Filter, Record},
    types::Uuid,
};
use tracing::debug;

use crate::db::{Gateway, GatewayError};

type Rows<R> = DashMap<Uuid, (u64, R)>;
type Cascade = Arc<dyn Fn(&Uuid) + Send + Sync>;

/// In process [`Gateway`] with the same contract as the sqlite one. Rows are
/// tagged with an insertion sequence so lists come back in creation order
pub struct MemoryGateway<R> {
    rows: Arc<Rows<R>>,
    sequence: Arc<AtomicU64>,
    cascades: Vec<Cascade>,
}

impl<R: Record> MemoryGateway<R> {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(DashMap::new()),
            sequence: Arc::new(AtomicU64::new(0)),
            cascades: vec![],
        }
    }

    /// Deleting a row of this gateway also deletes the rows of `child` whose
    /// `field` references it, like `ON DELETE CASCADE`
    pub fn cascade_to<C: Record>(mut self, child: &MemoryGateway<C>, field: C::Field) -> Self {
        let child_rows = child.rows.clone();
        self.cascades.push(Arc::new(move |id: &Uuid| {
            let filter = Filter::eq(field, *id);
            child_rows.retain(|_, (_, row)| !filter.matches(row));
        }));
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<R: Record> Default for MemoryGateway<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for MemoryGateway<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryGateway")
            .field("rows", &self.rows.len())
            .field("cascades", &self.cascades.len())
            .finish()
    }
}

#[async_trait]
impl<R: Record> Gateway<R> for MemoryGateway<R> {
    async fn create(&self, fields: R::New) -> Result<R, GatewayError> {
        let record = R::from_new(Uuid::new_v4(), fields);
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        self.rows.insert(*record.id(), (sequence, record.clone()));
        debug!("Created {} {}", R::NAME, record.id());
        Ok(record)
    }

    async fn find_one(&self, id: &Uuid) -> Result<R, GatewayError> {
        self.rows.get(id).map(|row| row.value().1.clone()).ok_or(GatewayError::NotFound)
    }

    async fn find_many(&self, filter: Option<Filter<R::Field>>) -> Result<Vec<R>, GatewayError> {
        let mut rows: Vec<(u64, R)> = self
            .rows
            .iter()
            .filter(|row| filter.as_ref().map_or(true, |filter| filter.matches(&row.value().1)))
            .map(|row| row.value().clone())
            .collect();
        rows.sort_by_key(|(sequence, _)| *sequence);
        Ok(rows.into_iter().map(|(_, record)| record).collect())
    }

    async fn update(&self, id: &Uuid, changes: R::Changes) -> Result<R, GatewayError> {
        let mut row = self.rows.get_mut(id).ok_or(GatewayError::NotFound)?;
        row.1.apply(changes);
        Ok(row.1.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), GatewayError> {
        self.rows.remove(id).ok_or(GatewayError::NotFound)?;
        for cascade in &self.cascades {
            cascade(id);
        }
        debug!("Deleted {} {}", R::NAME, id);
        Ok(())
    }
}
