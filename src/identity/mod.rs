// Identity verification against the external provider's public-key
// infrastructure. The provider mints RS256 ID tokens; this module only
// verifies them - there is no local token minting.

pub mod keys;

use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;

use crate::config;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Unknown signing key: {0}")]
    UnknownKey(String),

    #[error("Key fetch failed: {0}")]
    KeyFetch(String),

    #[error("Verifier not configured: {0}")]
    NotConfigured(String),
}

/// Claims carried by a provider ID token. Audience, issuer and expiry are
/// checked by the jsonwebtoken Validation; the rest is profile data.
#[derive(Debug, Deserialize)]
pub struct IdTokenClaims {
    pub sub: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

/// Authenticated caller context derived from a verified ID token
#[derive(Clone, Debug)]
pub struct UserContext {
    pub email: String,
    pub name: Option<String>,
    pub photo: Option<String>,
}

impl UserContext {
    /// Display name, falling back to the email's local part when the
    /// provider supplied none
    pub fn display_name(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => self
                .email
                .split('@')
                .next()
                .unwrap_or(&self.email)
                .to_string(),
        }
    }
}

impl TryFrom<IdTokenClaims> for UserContext {
    type Error = IdentityError;

    fn try_from(claims: IdTokenClaims) -> Result<Self, Self::Error> {
        let email = claims
            .email
            .filter(|e| !e.is_empty())
            .ok_or_else(|| IdentityError::InvalidToken("token carries no email".to_string()))?;

        Ok(UserContext {
            email,
            name: claims.name,
            photo: claims.picture,
        })
    }
}

/// Verify a bearer ID token and produce the authenticated user context.
///
/// Checks, in order: well-formed JWT header with a key id, a matching
/// provider signing key (fetched/cached by `keys`), RS256 signature, expiry,
/// audience (the configured project id) and issuer.
pub async fn verify(token: &str) -> Result<UserContext, IdentityError> {
    let project_id = config::config()
        .identity
        .resolve_project_id()
        .ok_or_else(|| {
            IdentityError::NotConfigured(
                "no identity project id; set IDENTITY_PROJECT_ID or IDENTITY_CREDENTIALS_B64"
                    .to_string(),
            )
        })?;

    let header =
        decode_header(token).map_err(|e| IdentityError::InvalidToken(e.to_string()))?;
    let kid = header
        .kid
        .ok_or_else(|| IdentityError::InvalidToken("token header has no kid".to_string()))?;

    let signing_key = keys::signing_key(&kid).await?;
    let decoding_key = DecodingKey::from_rsa_components(&signing_key.n, &signing_key.e)
        .map_err(|e| IdentityError::KeyFetch(format!("malformed signing key: {}", e)))?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[&project_id]);
    validation.set_issuer(&[format!("https://securetoken.google.com/{}", project_id)]);

    let token_data = decode::<IdTokenClaims>(token, &decoding_key, &validation)
        .map_err(|e| IdentityError::InvalidToken(e.to_string()))?;

    UserContext::try_from(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(email: Option<&str>, name: Option<&str>) -> IdTokenClaims {
        IdTokenClaims {
            sub: "uid-1".to_string(),
            email: email.map(String::from),
            name: name.map(String::from),
            picture: None,
            exp: 0,
            iat: 0,
        }
    }

    #[test]
    fn test_user_context_requires_email() {
        assert!(UserContext::try_from(claims(None, Some("A. Student"))).is_err());
        assert!(UserContext::try_from(claims(Some(""), None)).is_err());

        let user = UserContext::try_from(claims(Some("a@x.com"), Some("A. Student"))).unwrap();
        assert_eq!(user.email, "a@x.com");
    }

    #[test]
    fn test_display_name_falls_back_to_local_part() {
        let named = UserContext::try_from(claims(Some("a@x.com"), Some("A. Student"))).unwrap();
        assert_eq!(named.display_name(), "A. Student");

        let unnamed = UserContext::try_from(claims(Some("a@x.com"), None)).unwrap();
        assert_eq!(unnamed.display_name(), "a");

        let blank_name = UserContext::try_from(claims(Some("b@x.com"), Some("  "))).unwrap();
        assert_eq!(blank_name.display_name(), "b");
    }
}
