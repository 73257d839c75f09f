//! HTTP handlers and the helpers they share for templates and redirects.

use std::collections::HashMap;

use actix_web::error::BlockingError;
use actix_web::http::header;
use actix_web::{HttpResponse, Responder, get};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use tera::{Context, Tera, Value};

use crate::format::{format_brl, format_date_br, format_percent};

pub mod api;
pub mod dashboard;
pub mod movements;

/// Maps a flash message level to the CSS alert class used by the templates.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Context shared by every page: pending flash alerts and the active menu item.
pub fn base_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Answer for a request whose repository work never came back from the
/// blocking thread pool.
pub fn blocking_failed(err: BlockingError) -> HttpResponse {
    log::error!("Blocking repository task failed: {err}");
    HttpResponse::InternalServerError().finish()
}

/// Current local date, used to prefill date inputs.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn number_arg(value: &Value, filter: &str) -> tera::Result<Option<Decimal>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(number) => Ok(number.as_f64().and_then(Decimal::from_f64)),
        other => Err(tera::Error::msg(format!(
            "Filter `{filter}` expects a number, got {other}"
        ))),
    }
}

fn moeda_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let amount = number_arg(value, "moeda")?.unwrap_or_default();
    Ok(Value::String(format_brl(amount)))
}

fn percentual_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(format_percent(number_arg(value, "percentual")?)))
}

fn data_br_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let raw = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("Filter `data_br` expects an ISO date string"))?;
    let date = raw
        .get(..10)
        .and_then(|day| day.parse::<NaiveDate>().ok())
        .ok_or_else(|| tera::Error::msg(format!("Filter `data_br` cannot parse '{raw}'")))?;
    Ok(Value::String(format_date_br(date)))
}

/// Registers the pt-BR presentation filters: `moeda`, `percentual`, `data_br`.
pub fn register_filters(tera: &mut Tera) {
    tera.register_filter("moeda", moeda_filter);
    tera.register_filter("percentual", percentual_filter);
    tera.register_filter("data_br", data_br_filter);
}

#[get("/")]
pub async fn index() -> impl Responder {
    redirect("/dashboard")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn filters_format_money_percent_and_dates() {
        let mut tera = Tera::default();
        register_filters(&mut tera);
        let mut context = Context::new();
        context.insert("valor", &1234.5);
        context.insert("pct", &json!(null));
        context.insert("dia", "2025-02-28");

        let rendered = tera
            .render_str(
                "{{ valor | moeda }} {{ pct | percentual }} {{ dia | data_br }}",
                &context,
            )
            .unwrap();

        assert_eq!(rendered, "R$ 1.234,50 - 28/02/2025");
    }

    #[test]
    fn moeda_rejects_text() {
        let args = HashMap::new();

        assert!(moeda_filter(&json!("abc"), &args).is_err());
    }
}
