use chrono::Utc;
use uuid::Uuid;

use crate::{domain::{WorkItem, WorkStatus}, models::WorkItemRecord, store::{Store, StoreError}};

use super::{Lifecycle, LifecycleError};

impl<S: Store> Lifecycle<S> {
    #[tracing::instrument(
        "Listing work items",
        skip(self)
    )]
    pub fn list_work_items(&self, status: Option<WorkStatus>) -> Result<Vec<WorkItem>, LifecycleError> {
        self.store.transaction::<_, LifecycleError, _>(|repo| {
            repo.find_work_items(status.as_ref().map(WorkStatus::as_str))?
                .into_iter()
                .map(to_work_item)
                .collect()
        })
    }

    #[tracing::instrument(
        "Getting work item",
        skip(self)
    )]
    pub fn get_work_item(&self, id: Uuid) -> Result<WorkItem, LifecycleError> {
        self.store.transaction::<_, LifecycleError, _>(|repo| {
            let record = repo.find_work_item(id)?
                .ok_or(LifecycleError::NotFound("work item", id))?;
            to_work_item(record)
        })
    }

    // Any status may follow any other; preparation is sometimes redone
    #[tracing::instrument(
        "Updating work item status",
        skip(self)
    )]
    pub fn update_work_item_status(&self, id: Uuid, status: WorkStatus) -> Result<WorkItem, LifecycleError> {
        self.store.transaction::<_, LifecycleError, _>(|repo| {
            if repo.update_work_item_status(id, status.as_str(), Utc::now())? == 0 {
                return Err(LifecycleError::NotFound("work item", id));
            }

            let record = repo.find_work_item(id)?
                .ok_or(LifecycleError::NotFound("work item", id))?;
            to_work_item(record)
        })
    }
}

fn to_work_item(record: WorkItemRecord) -> Result<WorkItem, LifecycleError> {
    WorkItem::try_from(record)
        .map_err(|e| StoreError::CorruptRow(e).into())
}
