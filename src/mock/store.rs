//! In-memory resource repositories.
//!
//! Each resource domain owns one [`Repository`]. Handlers hold the lock for
//! the whole of their synchronous body, so a mutation is atomic with respect
//! to every other handler.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::mock::error::{MockError, MockResult};
use crate::model::Page;

/// A record stored in a repository.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    fn id(&self) -> &str;
    fn updated_at(&self) -> DateTime<Utc>;
    fn set_updated_at(&mut self, at: DateTime<Utc>);

    /// Restamp `updatedAt` to now, never earlier than `floor`.
    fn touch(&mut self, floor: DateTime<Utc>) {
        self.set_updated_at(Utc::now().max(floor));
    }
}

/// Page request parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, page_size: 10 }
    }
}

impl PageRequest {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size,
        }
    }

    /// Slice an already-filtered list.
    pub fn apply<T>(&self, filtered: Vec<T>) -> Page<T> {
        let total = filtered.len();
        let start = (self.page - 1).saturating_mul(self.page_size);
        let list = filtered
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect();
        Page {
            list,
            total,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Ordered, lock-protected collection of records.
#[derive(Debug)]
pub struct Repository<T: Record> {
    name: &'static str,
    seed: Vec<T>,
    items: RwLock<Vec<T>>,
}

impl<T: Record> Repository<T> {
    pub fn new(name: &'static str, seed: Vec<T>) -> Self {
        Self {
            name,
            items: RwLock::new(seed.clone()),
            seed,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Restore the seeded records.
    pub fn reset(&self) -> MockResult<()> {
        let mut items = self.items.write().map_err(|_| MockError::Poisoned(self.name))?;
        *items = self.seed.clone();
        Ok(())
    }

    pub fn len(&self) -> MockResult<usize> {
        Ok(self.items.read().map_err(|_| MockError::Poisoned(self.name))?.len())
    }

    pub fn is_empty(&self) -> MockResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Filter, then paginate.
    pub fn list<F>(&self, filter: F, page: PageRequest) -> MockResult<Page<T>>
    where
        F: Fn(&T) -> bool,
    {
        let items = self.items.read().map_err(|_| MockError::Poisoned(self.name))?;
        let filtered: Vec<T> = items.iter().filter(|r| filter(r)).cloned().collect();
        Ok(page.apply(filtered))
    }

    pub fn all(&self) -> MockResult<Vec<T>> {
        Ok(self.items.read().map_err(|_| MockError::Poisoned(self.name))?.clone())
    }

    pub fn find(&self, id: &str) -> MockResult<Option<T>> {
        let items = self.items.read().map_err(|_| MockError::Poisoned(self.name))?;
        Ok(items.iter().find(|r| r.id() == id).cloned())
    }

    pub fn insert(&self, record: T) -> MockResult<T> {
        let mut items = self.items.write().map_err(|_| MockError::Poisoned(self.name))?;
        items.push(record.clone());
        Ok(record)
    }

    /// Mutate a record in place and restamp it.
    ///
    /// `Ok(None)` when no record has that id. A failing mutation leaves the
    /// record untouched.
    pub fn modify<F>(&self, id: &str, mutate: F) -> MockResult<Option<T>>
    where
        F: FnOnce(&mut T) -> MockResult<()>,
    {
        let mut items = self.items.write().map_err(|_| MockError::Poisoned(self.name))?;
        let Some(slot) = items.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };
        let stamped = slot.updated_at();
        let mut updated = slot.clone();
        mutate(&mut updated)?;
        updated.touch(stamped);
        *slot = updated.clone();
        Ok(Some(updated))
    }

    /// Merge JSON fields from `patch` into a record.
    ///
    /// `id`, `createdAt` and `updatedAt` are never overwritten.
    pub fn merge(&self, id: &str, patch: &Value) -> MockResult<Option<T>> {
        self.modify(id, |record| {
            let mut current = serde_json::to_value(&*record)?;
            if let (Value::Object(target), Value::Object(fields)) = (&mut current, patch) {
                for (key, value) in fields {
                    if matches!(key.as_str(), "id" | "createdAt" | "updatedAt") {
                        continue;
                    }
                    target.insert(key.clone(), value.clone());
                }
            }
            *record = serde_json::from_value(current).map_err(MockError::InvalidBody)?;
            Ok(())
        })
    }

    /// Apply a mutation to every record, returning how many were touched.
    pub fn modify_all<F>(&self, mut mutate: F) -> MockResult<usize>
    where
        F: FnMut(&mut T),
    {
        let mut items = self.items.write().map_err(|_| MockError::Poisoned(self.name))?;
        for record in items.iter_mut() {
            let stamped = record.updated_at();
            mutate(record);
            record.touch(stamped);
        }
        Ok(items.len())
    }
}

/// Generates domain-prefixed identities from a strictly increasing
/// millisecond clock.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next stamp: wall-clock milliseconds, bumped past the previous stamp.
    pub fn next_stamp(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let next = now.max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, next, Ordering::SeqCst, Ordering::Relaxed)
            {
                Ok(_) => return next,
                Err(actual) => prev = actual,
            }
        }
    }

    pub fn next_id(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.next_stamp())
    }
}

/// Today's date in UTC.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
