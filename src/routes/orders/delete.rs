use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{lifecycle::Lifecycle, routes::{run_lifecycle, ApiError}, store::Store};

#[tracing::instrument(
    "Deleting order by id",
    skip(lifecycle)
)]
pub async fn delete_order<S: Store>(
    lifecycle: web::Data<Lifecycle<S>>,
    path: web::Path<Uuid>
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    run_lifecycle(lifecycle, move |l| l.delete_order(id)).await?;
    Ok(HttpResponse::NoContent().finish())
}
