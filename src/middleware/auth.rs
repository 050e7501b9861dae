use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::identity::{self, UserContext};

/// Bearer-token authentication middleware.
///
/// Extracts `Authorization: Bearer <token>`, verifies the token against the
/// identity provider and injects the resulting [`UserContext`] into request
/// extensions. Every failure rejects the request before any handler logic.
pub async fn require_identity(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(ApiError::unauthorized)?;

    let user = identity::verify(&token).await?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Extract the bearer token from the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty bearer token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(v) = value {
            headers.insert("authorization", HeaderValue::from_str(v).unwrap());
        }
        headers
    }

    #[test]
    fn test_extracts_bearer_token() {
        let headers = headers_with(Some("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_rejects_missing_header() {
        assert!(extract_bearer_token(&headers_with(None)).is_err());
    }

    #[test]
    fn test_rejects_non_bearer_scheme() {
        let headers = headers_with(Some("Basic dXNlcjpwYXNz"));
        assert!(extract_bearer_token(&headers).is_err());
    }

    #[test]
    fn test_rejects_empty_token() {
        let headers = headers_with(Some("Bearer   "));
        assert!(extract_bearer_token(&headers).is_err());
    }
}
