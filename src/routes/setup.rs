use actix_web::{rt, web, web::Data, HttpRequest, HttpResponse};

use crate::actions;
use crate::client;
use crate::config::Config;
use crate::middleware;
use crate::models::command::SetupCommand;

/// Slash-command entry point. Acks 200 right away and defers the real work;
/// from then on the outcome is reported through the channel itself.
pub async fn post(
    config: Data<Config>,
    backlog: Data<client::backlog::Client>,
    slack: Data<client::slack::Client>,
    request: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    if !middleware::validate_slack_request(&config.slack_signing_secret, &request, &body) {
        return HttpResponse::BadRequest().body("not allowed");
    }

    let command: SetupCommand = match serde_urlencoded::from_bytes(&body) {
        Ok(command) => command,
        Err(error) => {
            // without a channel id there is nowhere to report into
            log::error!("cannot parse body: {}", error);
            return HttpResponse::BadRequest().body("invalid body");
        }
    };

    rt::spawn(async move {
        actions::setup::run(&config, &backlog, &slack, command).await;
    });

    HttpResponse::Ok().body("OK")
}
