use actix_web::{HttpRequest, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::forms::movements::DashboardQuery;
use crate::repository::DieselRepository;
use crate::routes::{base_context, blocking_failed, render_template};
use crate::services::dashboard as dashboard_service;

#[get("/dashboard")]
pub async fn show_dashboard(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = DashboardQuery::parse(req.query_string()).unwrap_or_else(|err| {
        log::warn!("Ignoring malformed dashboard query: {err}");
        DashboardQuery::default()
    });

    let project = query.project();
    let page = match web::block(move || {
        dashboard_service::load_dashboard_page(repo.get_ref(), project)
    })
    .await
    {
        Ok(page) => page,
        Err(err) => return blocking_failed(err),
    };

    let mut context = base_context(&flash_messages, "dashboard");
    context.insert("page", &page);

    render_template(&tera, "dashboard/index.html", &context)
}
