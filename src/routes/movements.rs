use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::types::MovementId;
use crate::dto::movements::FilterView;
use crate::forms::movements::{MovementFilterQuery, NewMovementFormData, SaveMovementForm};
use crate::repository::DieselRepository;
use crate::routes::{base_context, blocking_failed, redirect, render_template, today};
use crate::services::ServiceError;
use crate::services::movements::{self as movements_service, CreateOutcome, SaveOutcome};

fn filter_query(req: &HttpRequest) -> MovementFilterQuery {
    MovementFilterQuery::parse(req.query_string()).unwrap_or_else(|err| {
        log::warn!("Ignoring malformed movement filters: {err}");
        MovementFilterQuery::default()
    })
}

/// List URL keeping the filters of `query`.
fn list_url(query: &MovementFilterQuery) -> String {
    let filters = FilterView::from(&query.to_filter()).query;
    if filters.is_empty() {
        "/movimentos".to_string()
    } else {
        format!("/movimentos?{filters}")
    }
}

#[get("/movimentos")]
pub async fn show_movements(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = filter_query(&req);
    let page = match web::block(move || {
        movements_service::load_movement_list(repo.get_ref(), &query)
    })
    .await
    {
        Ok(page) => page,
        Err(err) => return blocking_failed(err),
    };

    let mut context = base_context(&flash_messages, "movements");
    context.insert("page", &page);

    render_template(&tera, "movements/index.html", &context)
}

#[post("/movimentos/{movement_id}/salvar")]
pub async fn save_movement(
    req: HttpRequest,
    movement_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    form: web::Bytes,
) -> impl Responder {
    let query = filter_query(&req);
    let back = list_url(&query);

    let Ok(id) = MovementId::new(movement_id.into_inner()) else {
        FlashMessage::error("Movimento não encontrado.").send();
        return redirect(&back);
    };

    let form = match SaveMovementForm::parse(&form) {
        Ok(form) => form,
        Err(err) => {
            log::error!("Failed to parse movement form: {err}");
            FlashMessage::error("Dados do movimento inválidos.").send();
            return redirect(&back);
        }
    };

    let outcome = match web::block(move || {
        movements_service::save_movement(repo.get_ref(), id, &query, &form)
    })
    .await
    {
        Ok(outcome) => outcome,
        Err(err) => return blocking_failed(err),
    };

    match outcome {
        Ok(SaveOutcome::Saved) => {
            FlashMessage::success("Movimento atualizado.").send();
            redirect(&back)
        }
        Ok(SaveOutcome::Failed(page)) => {
            let mut context = base_context(&flash_messages, "movements");
            context.insert("page", &page);
            render_template(&tera, "movements/index.html", &context)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Movimento não encontrado.").send();
            redirect(&back)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(format!("Dados do movimento inválidos: {message}")).send();
            redirect(&back)
        }
        Err(err) => {
            log::error!("Failed to save movement {id}: {err}");
            FlashMessage::error("Falha ao salvar o movimento.").send();
            redirect(&back)
        }
    }
}

#[get("/movimentos/novo")]
pub async fn new_movement(
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let today = today();
    let page = match web::block(move || {
        movements_service::load_new_movement_page(repo.get_ref(), today)
    })
    .await
    {
        Ok(page) => page,
        Err(err) => return blocking_failed(err),
    };

    let mut context = base_context(&flash_messages, "new_movement");
    context.insert("page", &page);

    render_template(&tera, "movements/new.html", &context)
}

#[post("/movimentos/novo")]
pub async fn create_movement(
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    form: web::Bytes,
) -> impl Responder {
    let form = match NewMovementFormData::parse(&form) {
        Ok(form) => form,
        Err(err) => {
            log::error!("Failed to parse new movement form: {err}");
            FlashMessage::error("Dados do movimento inválidos.").send();
            return redirect("/movimentos/novo");
        }
    };

    let today = today();
    let outcome = match web::block(move || {
        movements_service::create_movement(repo.get_ref(), today, &form)
    })
    .await
    {
        Ok(outcome) => outcome,
        Err(err) => return blocking_failed(err),
    };

    match outcome {
        Ok(CreateOutcome::Created(id)) => {
            FlashMessage::success("Movimento registrado.").send();
            redirect(&format!("/movimentos?created={id}"))
        }
        Ok(CreateOutcome::Rejected(page)) => {
            let mut context = base_context(&flash_messages, "new_movement");
            context.insert("page", &page);
            render_template(&tera, "movements/new.html", &context)
        }
        Err(err) => {
            log::error!("Failed to create movement: {err}");
            FlashMessage::error("Dados do movimento inválidos.").send();
            redirect("/movimentos/novo")
        }
    }
}

#[get("/movimentos/exportar.csv")]
pub async fn export_movements(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let query = filter_query(&req);
    let result = web::block(move || {
        movements_service::export_movements_csv(repo.get_ref(), &query)
    })
    .await;

    match result {
        Err(err) => blocking_failed(err),
        Ok(Ok(body)) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"movimentos.csv\"",
            ))
            .body(body),
        Ok(Err(err)) => {
            log::error!("Failed to export movements: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
