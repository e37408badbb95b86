//! In-memory repository
//!
//! Rows live in a map keyed by id; a separate insertion-order index keeps
//! `list` and tie-breaking in `latest` independent of map iteration order.
//! Writes are last-write-wins with no cross-request ordering.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use vitals::Clock;

use crate::record::Record;
use crate::repository::Repository;

struct Table<R> {
  rows: HashMap<Uuid, R>,
  order: Vec<Uuid>,
}

impl<R> Default for Table<R> {
  fn default() -> Self {
    Self { rows: HashMap::new(), order: Vec::new() }
  }
}

pub struct MemoryRepository<R: Record> {
  clock: Arc<dyn Clock>,
  table: RwLock<Table<R>>,
}

impl<R: Record> MemoryRepository<R> {
  pub fn new(clock: Arc<dyn Clock>) -> Self {
    Self { clock, table: RwLock::new(Table::default()) }
  }

  pub async fn len(&self) -> usize {
    self.table.read().await.rows.len()
  }

  pub async fn is_empty(&self) -> bool {
    self.len().await == 0
  }
}

#[async_trait]
impl<R: Record> Repository<R> for MemoryRepository<R> {
  async fn create(&self, draft: R::Draft) -> Result<R> {
    let record = R::from_draft(Uuid::new_v4(), self.clock.now(), draft);

    let mut table = self.table.write().await;
    table.order.push(record.id());
    table.rows.insert(record.id(), record.clone());

    tracing::debug!(kind = R::KIND, id = %record.id(), "record created");
    Ok(record)
  }

  async fn get(&self, id: Uuid) -> Result<Option<R>> {
    Ok(self.table.read().await.rows.get(&id).cloned())
  }

  async fn latest(&self) -> Result<Option<R>> {
    let table = self.table.read().await;
    let mut latest: Option<&R> = None;
    for id in &table.order {
      let Some(candidate) = table.rows.get(id) else { continue };
      if latest.map_or(true, |current| candidate.recorded_at() >= current.recorded_at()) {
        latest = Some(candidate);
      }
    }
    Ok(latest.cloned())
  }

  async fn update(&self, id: Uuid, patch: R::Patch) -> Result<Option<R>> {
    let mut table = self.table.write().await;
    let Some(record) = table.rows.get_mut(&id) else {
      return Ok(None);
    };
    record.apply(patch);

    tracing::debug!(kind = R::KIND, %id, "record updated");
    Ok(Some(record.clone()))
  }

  async fn delete(&self, id: Uuid) -> Result<bool> {
    let mut table = self.table.write().await;
    if table.rows.remove(&id).is_none() {
      return Ok(false);
    }
    table.order.retain(|existing| *existing != id);

    tracing::debug!(kind = R::KIND, %id, "record deleted");
    Ok(true)
  }

  async fn list(&self) -> Result<Vec<R>> {
    let table = self.table.read().await;
    Ok(table.order.iter().filter_map(|id| table.rows.get(id).cloned()).collect())
  }
}
