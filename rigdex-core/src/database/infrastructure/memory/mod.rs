//! In-process catalog storage.
//!
//! Backs the `--in-memory` server mode and the service/HTTP test suites. All
//! repositories built from the same [`MemoryStore`] share one set of tables,
//! so a chipset sees the socket rows written through the dictionary
//! repository and deleting a parent cascades to its children the same way
//! the Postgres schema does.

mod dictionary;
mod fan_sizes;
mod linked;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rigdex_model::{
    DictionaryEntry, DictionaryKind, FanSize, LinkedKind, Page, PageRequest,
    SortDirection,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::ports::health::StoreHealth;
use crate::error::Result;

pub use dictionary::InMemoryDictionaryRepository;
pub use fan_sizes::InMemoryFanSizeRepository;
pub use linked::InMemoryLinkedRepository;

/// Child row as stored: the parent is kept by id and resolved on read.
#[derive(Debug, Clone)]
pub(crate) struct LinkedRecord {
    pub id: Uuid,
    pub name: String,
    pub parent_id: Uuid,
}

#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub dictionaries: HashMap<DictionaryKind, Vec<DictionaryEntry>>,
    pub linked: HashMap<LinkedKind, Vec<LinkedRecord>>,
    pub fan_sizes: Vec<FanSize>,
}

impl Tables {
    pub fn dictionary(&self, kind: DictionaryKind) -> &[DictionaryEntry] {
        self.dictionaries
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn dictionary_mut(
        &mut self,
        kind: DictionaryKind,
    ) -> &mut Vec<DictionaryEntry> {
        self.dictionaries.entry(kind).or_default()
    }

    pub fn linked(&self, kind: LinkedKind) -> &[LinkedRecord] {
        self.linked.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn linked_mut(&mut self, kind: LinkedKind) -> &mut Vec<LinkedRecord> {
        self.linked.entry(kind).or_default()
    }

    /// Drop every child row pointing at a removed parent.
    pub fn cascade_delete(&mut self, parent: DictionaryKind, parent_id: Uuid) {
        for kind in LinkedKind::ALL {
            if kind.parent() == parent {
                self.linked_mut(kind)
                    .retain(|record| record.parent_id != parent_id);
            }
        }
    }
}

/// Shared tables behind every in-memory repository.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn tables(&self) -> &RwLock<Tables> {
        &self.tables
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// Sort `rows`, then cut the requested window out of them.
pub(crate) fn paginate<T>(
    mut rows: Vec<T>,
    request: PageRequest,
    compare: impl Fn(&T, &T) -> Ordering,
) -> Page<T> {
    rows.sort_by(|a, b| match request.direction {
        SortDirection::Asc => compare(a, b),
        SortDirection::Desc => compare(b, a),
    });

    let total = rows.len() as u64;
    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(request.limit()).unwrap_or(usize::MAX);
    let content = rows.into_iter().skip(offset).take(limit).collect();

    Page::new(content, request, total)
}
