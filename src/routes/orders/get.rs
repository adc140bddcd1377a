use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{lifecycle::Lifecycle, routes::{run_lifecycle, ApiError}, store::Store};

#[tracing::instrument(
    "Getting list of orders",
    skip(lifecycle)
)]
pub async fn list_orders<S: Store>(
    lifecycle: web::Data<Lifecycle<S>>
) -> Result<HttpResponse, ApiError> {
    let orders = run_lifecycle(lifecycle, |l| l.list_orders()).await?;
    Ok(HttpResponse::Ok().json(orders))
}

#[tracing::instrument(
    "Getting order by id",
    skip(lifecycle)
)]
pub async fn get_order<S: Store>(
    lifecycle: web::Data<Lifecycle<S>>,
    path: web::Path<Uuid>
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let order = run_lifecycle(lifecycle, move |l| l.get_order(id)).await?;
    Ok(HttpResponse::Ok().json(order))
}
