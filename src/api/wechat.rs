use axum::extract::{Extension, Query};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::wechat;

#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    signature: Option<String>,
    timestamp: Option<String>,
    nonce: Option<String>,
    echostr: Option<String>,
}

// GET /wechat — the platform's one-time URL ownership handshake.
pub async fn verify_url(
    Extension(config): Extension<Config>,
    Query(params): Query<VerifyParams>,
) -> Response {
    let Some(token) = config.wechat_token.as_deref() else {
        error!("WECHAT_TOKEN is not configured; cannot verify webhook URL");
        return (StatusCode::INTERNAL_SERVER_ERROR, "wechat token not configured").into_response();
    };

    let (Some(signature), Some(timestamp), Some(nonce), Some(echostr)) = (
        params.signature.as_deref(),
        params.timestamp.as_deref(),
        params.nonce.as_deref(),
        params.echostr.as_deref(),
    ) else {
        return (StatusCode::BAD_REQUEST, "missing verification parameters").into_response();
    };

    if wechat::signature::verify(token, signature, timestamp, nonce) {
        // Echoing the challenge back verbatim completes the handshake.
        (StatusCode::OK, echostr.to_string()).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, "Failed verification").into_response()
    }
}

// POST /wechat — message delivery. The platform retries anything that is
// not a 200 within its timeout window, so every branch answers 200.
pub async fn receive_message(body: String) -> Response {
    let msg = match wechat::parse(&body) {
        Ok(msg) => msg,
        Err(e) => {
            warn!("unparseable wechat message: {}", e);
            return (StatusCode::OK, "success").into_response();
        }
    };

    if msg.is_menu_click() {
        if let Some(article) = msg.event_key.as_deref().and_then(wechat::article_for_key) {
            info!("replying to menu click {:?}", msg.event_key);
            let reply = wechat::news_reply(&msg, article, chrono::Utc::now().timestamp());
            return (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
                reply,
            )
                .into_response();
        }
        warn!("unrecognized menu key {:?}", msg.event_key);
    }

    // Text messages and everything else get an empty acknowledgement.
    StatusCode::OK.into_response()
}
