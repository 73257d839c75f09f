use actix_web::{HttpRequest, HttpResponse, Responder, get, web};

use crate::forms::movements::MovementFilterQuery;
use crate::repository::DieselRepository;
use crate::routes::blocking_failed;
use crate::services::api as api_service;

#[get("/v1/movimentos")]
pub async fn api_v1_movements(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let query = match MovementFilterQuery::parse(req.query_string()) {
        Ok(query) => query,
        Err(err) => {
            log::warn!("Rejected malformed movement filters: {err}");
            return HttpResponse::BadRequest().finish();
        }
    };

    let result = web::block(move || api_service::list_movements(repo.get_ref(), &query)).await;

    match result {
        Ok(Ok(response)) => HttpResponse::Ok().json(response),
        Ok(Err(err)) => {
            log::error!("Failed to list movements: {err}");
            HttpResponse::InternalServerError().finish()
        }
        Err(err) => blocking_failed(err),
    }
}
