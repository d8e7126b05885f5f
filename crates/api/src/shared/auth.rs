use crate::error::EventideError;
use actix_web::HttpRequest;
use eventide_domain::ID;

/// Header set by the upstream authentication gateway
pub const USER_HEADER: &str = "eventide-user";

/// Resolves the authenticated principal of the request. Requests without
/// one are rejected before any scheduling logic runs.
pub fn protect_route(req: &HttpRequest) -> Result<ID, EventideError> {
    let header = req.headers().get(USER_HEADER).ok_or_else(|| {
        EventideError::Unauthorized(format!("Missing the `{}` header", USER_HEADER))
    })?;

    header
        .to_str()
        .ok()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<ID>().ok())
        .ok_or_else(|| {
            EventideError::Unauthorized(format!("Malformed `{}` header", USER_HEADER))
        })
}
