mod comments;
mod error;
mod health_check;
mod item_types;
mod items;
mod orders;
mod work_items;

pub use comments::*;
pub use error::ApiError;
pub use health_check::*;
pub use item_types::*;
pub use items::*;
pub use orders::*;
pub use work_items::*;

use actix_web::{error::{JsonPayloadError, PathError, QueryPayloadError}, web, HttpRequest};

use crate::{lifecycle::{Lifecycle, LifecycleError}, store::Store, telemetry::spawn_blocking_with_tracing};

/// Runs one lifecycle operation on the blocking pool, inside the request span.
pub async fn run_lifecycle<S, F, T>(
    lifecycle: web::Data<Lifecycle<S>>,
    f: F
) -> Result<T, ApiError>
where
    S: Store,
    F: FnOnce(&Lifecycle<S>) -> Result<T, LifecycleError> + Send + 'static,
    T: Send + 'static
{
    let res = spawn_blocking_with_tracing(move || f(&lifecycle)).await??;
    Ok(res)
}

pub fn configure<S: Store>(cfg: &mut web::ServiceConfig) {
    cfg
        .app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .route("/health", web::get().to(health_check))
        .service(
            web::resource("/item-types")
                .route(web::get().to(list_item_types::<S>))
                .route(web::post().to(post_item_type::<S>))
        )
        .service(
            web::resource("/item-types/{id}")
                .route(web::put().to(update_item_type::<S>))
                .route(web::delete().to(delete_item_type::<S>))
        )
        .service(
            web::resource("/items")
                .route(web::get().to(list_items::<S>))
                .route(web::post().to(post_item::<S>))
        )
        .service(
            web::resource("/items/{id}")
                .route(web::get().to(get_item::<S>))
                .route(web::put().to(update_item::<S>))
                .route(web::delete().to(delete_item::<S>))
        )
        .service(
            web::resource("/orders")
                .route(web::get().to(list_orders::<S>))
                .route(web::post().to(post_order::<S>))
        )
        .service(
            web::resource("/orders/{id}")
                .route(web::get().to(get_order::<S>))
                .route(web::put().to(update_order::<S>))
                .route(web::delete().to(delete_order::<S>))
        )
        .route("/orders/{id}/ready", web::patch().to(mark_ready::<S>))
        .route("/orders/{id}/served", web::patch().to(mark_served::<S>))
        .service(
            web::resource("/orders/{id}/comments")
                .route(web::get().to(list_comments::<S>))
                .route(web::post().to(post_comment::<S>))
        )
        .route("/work-items", web::get().to(list_work_items::<S>))
        .route("/work-items/{id}", web::get().to(get_work_item::<S>))
        .route("/work-items/{id}/status", web::patch().to(update_work_item_status::<S>));
}

fn json_error(err: JsonPayloadError, _: &HttpRequest) -> actix_web::Error {
    ApiError::BadRequest(err.to_string()).into()
}

// A malformed id is a bad request rather than a missing route
fn path_error(err: PathError, _: &HttpRequest) -> actix_web::Error {
    ApiError::BadRequest(err.to_string()).into()
}

fn query_error(err: QueryPayloadError, _: &HttpRequest) -> actix_web::Error {
    ApiError::BadRequest(err.to_string()).into()
}
