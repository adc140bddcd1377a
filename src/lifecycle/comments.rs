use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{domain::NewComment, models::Comment, store::Store};

use super::{orders::find_order, Lifecycle, LifecycleError};

impl<S: Store> Lifecycle<S> {
    #[tracing::instrument(
        "Listing order comments",
        skip(self)
    )]
    pub fn list_comments(&self, order_id: Uuid) -> Result<Vec<Comment>, LifecycleError> {
        self.store.transaction::<_, LifecycleError, _>(|repo| {
            find_order(repo, order_id)?;
            Ok(repo.comments_for(order_id)?)
        })
    }

    #[tracing::instrument(
        "Adding order comment",
        skip(self, new)
    )]
    pub fn add_comment(&self, order_id: Uuid, new: NewComment) -> Result<Comment, LifecycleError> {
        new.validate()?;

        self.store.transaction::<_, LifecycleError, _>(|repo| {
            find_order(repo, order_id)?;

            let comment = Comment{
                comment_id: Uuid::new_v4(),
                order_id,
                author: new.author,
                text: new.text,
                created_at: Utc::now()
            };
            repo.insert_comments(std::slice::from_ref(&comment))?;

            Ok(comment)
        })
    }
}
