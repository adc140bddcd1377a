use actix_web::{web, HttpResponse};

use crate::{domain::NewOrder, lifecycle::Lifecycle, routes::{run_lifecycle, ApiError}, store::Store};

#[tracing::instrument(
    "Posting order",
    skip(lifecycle)
)]
pub async fn post_order<S: Store>(
    lifecycle: web::Data<Lifecycle<S>>,
    json: web::Json<NewOrder>
) -> Result<HttpResponse, ApiError> {
    let order = run_lifecycle(lifecycle, move |l| l.create_order(json.into_inner())).await?;
    Ok(HttpResponse::Created().json(order))
}
