//! Axum glue: every request falls through to the dynamic routing table.

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;

use routegate_core::Reply;

use crate::app_state::AppState;
use crate::dispatch;
use crate::request::RequestCtx;

pub fn build_router(state: AppState) -> Router {
    Router::new().fallback(dispatch_any).with_state(state)
}

async fn dispatch_any(State(state): State<AppState>, req: Request<Body>) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    let mut ctx = RequestCtx::new(method, path);
    let session_header = state.cfg().gateway.session_header.as_str();
    if let Some(sid) = req
        .headers()
        .get(session_header)
        .and_then(|v| v.to_str().ok())
    {
        ctx.set_session_id(sid);
        if let Some(principal) = state.sessions().principal(sid).await {
            ctx.set_principal(principal);
        }
    }

    let provider = state.authorization();
    if let Err(e) = dispatch::dispatch(state.table(), provider.as_ref(), &mut ctx).await {
        tracing::error!(error = %e, path = %ctx.path(), "handler failed");
        ctx.reply(500, &Reply::<()>::fail500(e.client_code().as_str()));
    }

    into_axum_response(ctx)
}

fn into_axum_response(ctx: RequestCtx) -> Response {
    match ctx.into_response() {
        Some(parts) => {
            let status =
                StatusCode::from_u16(parts.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, axum::Json(parts.body)).into_response()
        }
        // Handler ran but wrote nothing.
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
