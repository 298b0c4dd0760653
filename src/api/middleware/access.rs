use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use serde_json::json;

use crate::auth::security::{current_user, verify_access, AuthenticatedUser};
use crate::config::state::AppState;
use crate::utils::response_handler::HandlerResponse;

/// The identity resolved for this request, stored in request extensions.
/// Always empty today since authentication is stubbed out.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<AuthenticatedUser>);

/// Middleware invoked per request: verify access, resolve the caller and
/// consult the authorization engine before forwarding to the handler.
pub async fn access_control_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, HandlerResponse> {
    // 1. Access verification (always succeeds with the stub)
    verify_access(&request)?;

    // 2. Identity resolution (always absent with the stub)
    let user: Option<AuthenticatedUser> = current_user(&request);

    // 3. Authorization decision
    if !state.authz.check(&request, user.as_ref(), None) {
        return Err(HandlerResponse::new(StatusCode::FORBIDDEN)
            .message("Request rejected by authorization policy")
            .data(json!({ "error": "forbidden" })));
    }

    // 4. Make the (absent) identity available to handlers
    request.extensions_mut().insert(CurrentUser(user));

    // 5. Proceed
    Ok(next.run(request).await)
}
