use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{domain::OrderPatch, lifecycle::Lifecycle, routes::{run_lifecycle, ApiError}, store::Store};

#[tracing::instrument(
    "Updating order",
    skip(lifecycle)
)]
pub async fn update_order<S: Store>(
    lifecycle: web::Data<Lifecycle<S>>,
    path: web::Path<Uuid>,
    json: web::Json<OrderPatch>
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let order = run_lifecycle(lifecycle, move |l| l.update_order(id, json.into_inner())).await?;
    Ok(HttpResponse::Ok().json(order))
}
