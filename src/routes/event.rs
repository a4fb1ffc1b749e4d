use actix_web::http::Method;
use actix_web::{web, web::Data, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::actions;
use crate::client;
use crate::config::Config;
use crate::errortype::RelayError;
use crate::models::event::ChangeEvent;

#[derive(Debug, Deserialize)]
pub struct ChannelQuery {
    #[serde(rename = "channelId")]
    pub channel_id: Option<String>,
}

pub async fn post(
    config: Data<Config>,
    backlog: Data<client::backlog::Client>,
    slack: Data<client::slack::Client>,
    request: HttpRequest,
    query: web::Query<ChannelQuery>,
    body: web::Bytes,
) -> HttpResponse {
    if request.method() != Method::POST {
        return HttpResponse::BadRequest().body("not allowed");
    }

    log::debug!("webhook body: {}", String::from_utf8_lossy(&body));

    let event: ChangeEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(error) => {
            log::error!("cannot parse body: {}", error);
            return HttpResponse::BadRequest().body("invalid body");
        }
    };

    let channel_id = query.into_inner().channel_id.unwrap_or_default();

    match actions::event::process_event(
        &backlog,
        &slack,
        &config.backlog_base_url,
        &event,
        &channel_id,
    )
    .await
    {
        Ok(()) => HttpResponse::Ok().body("OK"),
        Err(RelayError::Fetch(detail)) => {
            log::error!("{}", detail);
            HttpResponse::BadRequest().body("cannot fetch users")
        }
        Err(RelayError::Post(error)) => HttpResponse::InternalServerError().body(error.to_string()),
    }
}
