use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use dashmap::DashMap;
use retort_core::ErrorCode;
use uuid::Uuid;

use super::model::{ArchiveTicket, Item, ItemUpdate, NewItem};
use crate::error::StoreError;

/// Concurrent in-memory item store
///
/// Names are unique ignoring case. Every change to an item's name holds the
/// name index lock, and the index is always locked before the item map.
#[derive(Debug)]
pub struct ItemStore {
    items: DashMap<Uuid, Item>,
    names: Mutex<HashMap<String, Uuid>>,
    max_items: usize,
}

impl ItemStore {
    pub fn new(max_items: usize) -> Self {
        Self {
            items: DashMap::new(),
            names: Mutex::new(HashMap::new()),
            max_items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Fetch an item by id
    pub fn get(&self, id: Uuid) -> Result<Item, ErrorCode> {
        self.items
            .get(&id)
            .map(|item| item.clone())
            .ok_or(ErrorCode::NotFound)
    }

    /// Create an item with a fresh id
    pub fn create(&self, new_item: NewItem) -> Result<Item, StoreError> {
        let name = validate_name(&new_item.name)?;
        let mut names = self.lock_names();
        self.insert(&mut names, name, new_item.description)
    }

    /// Create several items, all or none
    ///
    /// The whole batch is checked under one index lock, so a failure leaves
    /// the store untouched.
    pub fn import(&self, batch: Vec<NewItem>) -> Result<Vec<Item>, StoreError> {
        let mut names = self.lock_names();

        if self.items.len() + batch.len() > self.max_items {
            return Err(StoreError::Full {
                capacity: self.max_items,
            });
        }

        let mut created = Vec::with_capacity(batch.len());
        for new_item in batch {
            let inserted = validate_name(&new_item.name)
                .and_then(|name| self.insert(&mut names, name, new_item.description));

            match inserted {
                Ok(item) => created.push(item),
                Err(e) => {
                    for item in &created {
                        self.items.remove(&item.id);
                        names.remove(&name_key(&item.name));
                    }
                    return Err(e);
                }
            }
        }

        Ok(created)
    }

    /// Apply a partial update
    pub fn update(&self, id: Uuid, update: ItemUpdate) -> Result<Item, StoreError> {
        let new_name = update.name.as_deref().map(validate_name).transpose()?;

        let mut names = self.lock_names();
        let mut item = self.items.get_mut(&id).ok_or(StoreError::NotFound { id })?;

        if let Some(new_name) = new_name {
            let old_key = name_key(&item.name);
            let new_key = name_key(new_name);

            if new_key != old_key {
                if names.contains_key(&new_key) {
                    return Err(StoreError::Duplicate {
                        name: new_name.to_owned(),
                    });
                }
                names.remove(&old_key);
                names.insert(new_key, id);
            }

            new_name.clone_into(&mut item.name);
        }

        if update.description.is_some() {
            item.description = update.description;
        }

        Ok(item.clone())
    }

    /// Delete an item
    pub fn remove(&self, id: Uuid) -> Result<Item, StoreError> {
        let mut names = self.lock_names();
        let (_, item) = self.items.remove(&id).ok_or(StoreError::NotFound { id })?;
        names.remove(&name_key(&item.name));
        Ok(item)
    }

    /// Mark an item archived and hand out a ticket
    pub fn archive(&self, id: Uuid) -> Result<ArchiveTicket, ErrorCode> {
        let mut item = self.items.get_mut(&id).ok_or(ErrorCode::NotFound)?;
        if item.archived {
            return Err(ErrorCode::Conflict);
        }
        item.archived = true;

        Ok(ArchiveTicket {
            ticket_id: Uuid::new_v4(),
            item_id: id,
        })
    }

    /// Add a tag to an item
    pub fn add_tag(&self, id: Uuid, tag: &str) -> Result<(), ErrorCode> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(ErrorCode::BadRequest);
        }

        let mut item = self.items.get_mut(&id).ok_or(ErrorCode::NotFound)?;
        if item.tags.insert(tag.to_lowercase()) {
            Ok(())
        } else {
            Err(ErrorCode::Conflict)
        }
    }

    fn lock_names(&self) -> MutexGuard<'_, HashMap<String, Uuid>> {
        self.names.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn insert(
        &self,
        names: &mut HashMap<String, Uuid>,
        name: &str,
        description: Option<String>,
    ) -> Result<Item, StoreError> {
        if self.items.len() >= self.max_items {
            return Err(StoreError::Full {
                capacity: self.max_items,
            });
        }

        let key = name_key(name);
        if names.contains_key(&key) {
            return Err(StoreError::Duplicate { name: name.to_owned() });
        }

        let item = Item {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            description,
            tags: BTreeSet::new(),
            archived: false,
        };
        names.insert(key, item.id);
        self.items.insert(item.id, item.clone());

        Ok(item)
    }
}

fn validate_name(name: &str) -> Result<&str, StoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::Invalid("name must not be blank".to_owned()));
    }
    if name.chars().count() > 200 {
        return Err(StoreError::Invalid("name must be at most 200 characters".to_owned()));
    }
    Ok(name)
}

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}
