//! Request dispatch: resolve, evaluate guards, invoke the handler.

use std::sync::Arc;

use routegate_core::{Reply, Result};

use crate::auth::AuthorizationProvider;
use crate::request::RequestCtx;
use crate::routing::RouteTable;

/// Run one request through the table.
///
/// Guards on the matched chain are evaluated outermost to innermost, each at
/// most once per request; the first deny terminates the request and inner
/// guards (and their role lookups) never run. A request that is already
/// handled skips everything.
pub async fn dispatch(
    table: &RouteTable,
    provider: Option<&Arc<dyn AuthorizationProvider>>,
    ctx: &mut RequestCtx,
) -> Result<()> {
    let Some(resolved) = table.resolve(ctx.path()) else {
        ctx.reply(404, &Reply::<()>::fail404("no such route"));
        return Ok(());
    };

    for policy in &resolved.guards {
        if ctx.is_handled() {
            return Ok(());
        }
        match provider {
            Some(provider) => {
                let decision = provider.authorize(ctx, policy).await;
                if !decision.allow {
                    return Ok(());
                }
            }
            None => {
                // A guarded subtree with no installed provider denies: an
                // unevaluable policy must not fail open.
                tracing::warn!(policy = %policy, path = %ctx.path(), "no authorization provider installed");
                ctx.reply(403, &Reply::<()>::fail403("authorization not configured"));
                return Ok(());
            }
        }
    }

    if ctx.is_handled() {
        return Ok(());
    }
    resolved.handler.handle(ctx).await
}
