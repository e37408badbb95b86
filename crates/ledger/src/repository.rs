//! Repository interface
//!
//! The interface is generic over the record type; risk and user lookups that
//! only make sense for one record type live in extension traits with default
//! implementations, so every backend gets them for free.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use vitals::{RiskEntry, User};

use crate::record::Record;

#[async_trait]
pub trait Repository<R: Record>: Send + Sync {
  /// Store a new record with a fresh id and the current time
  async fn create(&self, draft: R::Draft) -> Result<R>;

  async fn get(&self, id: Uuid) -> Result<Option<R>>;

  /// Record with the greatest creation timestamp. Ties go to the later insert.
  async fn latest(&self) -> Result<Option<R>>;

  /// Merge the patch into the stored record. `None` when the id is unknown.
  async fn update(&self, id: Uuid, patch: R::Patch) -> Result<Option<R>>;

  /// `false` when the id is unknown
  async fn delete(&self, id: Uuid) -> Result<bool>;

  /// All records, oldest insert first
  async fn list(&self) -> Result<Vec<R>>;
}

/// Highest severity first; equal severities keep insertion order
pub fn sort_by_severity(risks: &mut [RiskEntry]) {
  risks.sort_by(|a, b| b.severity.cmp(&a.severity));
}

#[async_trait]
pub trait RiskRegister: Repository<RiskEntry> {
  async fn all_by_severity(&self) -> Result<Vec<RiskEntry>> {
    let mut risks = self.list().await?;
    sort_by_severity(&mut risks);
    Ok(risks)
  }

  async fn by_min_severity(&self, min_severity: f64) -> Result<Vec<RiskEntry>> {
    let mut risks: Vec<RiskEntry> =
      self.list().await?.into_iter().filter(|risk| risk.severity as f64 >= min_severity).collect();
    sort_by_severity(&mut risks);
    Ok(risks)
  }
}

impl<T: Repository<RiskEntry> + ?Sized> RiskRegister for T {}

#[async_trait]
pub trait UserDirectory: Repository<User> {
  async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
    Ok(self.list().await?.into_iter().find(|user| user.username == username))
  }
}

impl<T: Repository<User> + ?Sized> UserDirectory for T {}
