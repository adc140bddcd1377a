use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{domain::{ItemPatch, ItemTypePatch, NewItem, NewItemType}, models::{Item, ItemType}, store::{Repository, Store}};

use super::{Lifecycle, LifecycleError};

impl<S: Store> Lifecycle<S> {
    #[tracing::instrument(
        "Creating item type",
        skip(self)
    )]
    pub fn create_item_type(&self, new: NewItemType) -> Result<ItemType, LifecycleError> {
        new.validate()?;

        self.store.transaction::<_, LifecycleError, _>(|repo| {
            ensure_item_type_name_free(repo, &new.name, None)?;

            let item_type = ItemType{
                item_type_id: Uuid::new_v4(),
                name: new.name,
                display_name: new.display_name,
                deleted_at: None
            };
            repo.insert_item_type(&item_type)?;

            Ok(item_type)
        })
    }

    #[tracing::instrument(
        "Updating item type",
        skip(self)
    )]
    pub fn update_item_type(&self, id: Uuid, patch: ItemTypePatch) -> Result<ItemType, LifecycleError> {
        patch.validate()?;

        self.store.transaction::<_, LifecycleError, _>(|repo| {
            let mut item_type = repo.find_item_type(id)?
                .filter(ItemType::is_live)
                .ok_or(LifecycleError::NotFound("item type", id))?;

            if let Some(name) = patch.name {
                if name != item_type.name {
                    ensure_item_type_name_free(repo, &name, Some(id))?;
                }
                item_type.name = name;
            }
            if let Some(display_name) = patch.display_name {
                item_type.display_name = display_name;
            }

            repo.update_item_type(&item_type)?;
            Ok(item_type)
        })
    }

    // Items keep pointing at a deleted type; only new references are refused
    #[tracing::instrument(
        "Deleting item type",
        skip(self)
    )]
    pub fn delete_item_type(&self, id: Uuid) -> Result<(), LifecycleError> {
        self.store.transaction::<_, LifecycleError, _>(|repo| {
            if repo.soft_delete_item_type(id, Utc::now())? == 0 {
                return Err(LifecycleError::NotFound("item type", id));
            }
            Ok(())
        })
    }

    #[tracing::instrument(
        "Listing item types",
        skip(self)
    )]
    pub fn list_item_types(&self) -> Result<Vec<ItemType>, LifecycleError> {
        self.store.transaction::<_, LifecycleError, _>(|repo| Ok(repo.list_item_types()?))
    }

    #[tracing::instrument(
        "Creating item",
        skip(self)
    )]
    pub fn create_item(&self, new: NewItem) -> Result<Item, LifecycleError> {
        new.validate()?;

        self.store.transaction::<_, LifecycleError, _>(|repo| {
            ensure_live_item_type(repo, new.item_type_id)?;

            let item = Item{
                item_id: Uuid::new_v4(),
                name: new.name,
                abbreviation: new.abbreviation,
                price: new.price,
                key: new.key,
                assignee: new.assignee,
                item_type_id: new.item_type_id,
                deleted_at: None
            };
            repo.insert_item(&item)?;

            Ok(item)
        })
    }

    #[tracing::instrument(
        "Getting item",
        skip(self)
    )]
    pub fn get_item(&self, id: Uuid) -> Result<Item, LifecycleError> {
        self.store.transaction::<_, LifecycleError, _>(|repo| {
            repo.find_item(id)?
                .filter(Item::is_live)
                .ok_or(LifecycleError::NotFound("item", id))
        })
    }

    #[tracing::instrument(
        "Listing items",
        skip(self)
    )]
    pub fn list_items(&self) -> Result<Vec<Item>, LifecycleError> {
        self.store.transaction::<_, LifecycleError, _>(|repo| Ok(repo.list_items()?))
    }

    #[tracing::instrument(
        "Updating item",
        skip(self)
    )]
    pub fn update_item(&self, id: Uuid, patch: ItemPatch) -> Result<Item, LifecycleError> {
        patch.validate()?;

        self.store.transaction::<_, LifecycleError, _>(|repo| {
            let mut item = repo.find_item(id)?
                .filter(Item::is_live)
                .ok_or(LifecycleError::NotFound("item", id))?;

            if let Some(item_type_id) = patch.item_type_id {
                if item_type_id != item.item_type_id {
                    ensure_live_item_type(repo, item_type_id)?;
                }
                item.item_type_id = item_type_id;
            }
            if let Some(name) = patch.name {
                item.name = name;
            }
            if let Some(abbreviation) = patch.abbreviation {
                item.abbreviation = abbreviation;
            }
            if let Some(price) = patch.price {
                item.price = price;
            }
            if let Some(key) = patch.key {
                item.key = key;
            }
            if let Some(assignee) = patch.assignee {
                item.assignee = assignee;
            }

            repo.update_item(&item)?;
            Ok(item)
        })
    }

    #[tracing::instrument(
        "Deleting item",
        skip(self)
    )]
    pub fn delete_item(&self, id: Uuid) -> Result<(), LifecycleError> {
        self.store.transaction::<_, LifecycleError, _>(|repo| {
            if repo.soft_delete_item(id, Utc::now())? == 0 {
                return Err(LifecycleError::NotFound("item", id));
            }
            Ok(())
        })
    }
}

fn ensure_live_item_type(repo: &mut dyn Repository, id: Uuid) -> Result<(), LifecycleError> {
    match repo.find_item_type(id)? {
        Some(item_type) if item_type.is_live() => Ok(()),
        _ => Err(LifecycleError::validation(format!("item type {} does not exist", id)))
    }
}

fn ensure_item_type_name_free(
    repo: &mut dyn Repository,
    name: &str,
    owner: Option<Uuid>
) -> Result<(), LifecycleError> {
    match repo.find_live_item_type_by_name(name)? {
        Some(existing) if Some(existing.item_type_id) != owner => {
            Err(LifecycleError::validation(format!("item type name {} is already in use", name)))
        },
        _ => Ok(())
    }
}
