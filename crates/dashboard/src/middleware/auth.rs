//! Session authentication.
//!
//! The identity provider issues signed JWTs; the dashboard only verifies
//! them. [`session_middleware`] runs on every request and, when a valid token
//! is present, stores the caller's [`UserId`] in the request extensions.
//! Handlers read it back through the [`Principal`] extractor.
//!
//! A missing, malformed, expired or wrongly signed token is treated the same
//! as no session at all.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use secrecy::ExposeSecret;
use serde::Deserialize;

use duka_kuu_core::UserId;

use crate::config::{AuthConfig, JwtKey};
use crate::error::{AppError, set_sentry_user};
use crate::state::AppState;

/// Cookie set by the identity provider's frontend SDK.
pub const SESSION_COOKIE: &str = "__session";

/// Claims we read from a session token. `exp` is checked by `jsonwebtoken`.
#[derive(Debug, Deserialize)]
struct SessionClaims {
    sub: String,
}

/// Verifies session tokens issued by the identity provider.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithms", &self.validation.algorithms)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl TokenVerifier {
    /// Build a verifier from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the RS256 public key is not valid PEM.
    pub fn from_config(config: &AuthConfig) -> Result<Self, jsonwebtoken::errors::Error> {
        let (key, algorithm) = match &config.key {
            JwtKey::Hs256(secret) => (
                DecodingKey::from_secret(secret.expose_secret().as_bytes()),
                Algorithm::HS256,
            ),
            JwtKey::Rs256(pem) => (DecodingKey::from_rsa_pem(pem.as_bytes())?, Algorithm::RS256),
        };

        let mut validation = Validation::new(algorithm);
        validation.set_required_spec_claims(&["exp", "sub"]);
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }

        Ok(Self { key, validation })
    }

    /// Verify a token and return the user id from its `sub` claim.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed, expired or wrongly signed token.
    pub fn verify(&self, token: &str) -> Result<UserId, jsonwebtoken::errors::Error> {
        let data = decode::<SessionClaims>(token, &self.key, &self.validation)?;
        Ok(UserId::new(data.claims.sub))
    }
}

/// Find the session token in the `Authorization` header or the session cookie.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from);

    bearer.or_else(|| {
        CookieJar::from_headers(headers)
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|token| !token.is_empty())
    })
}

/// Middleware that resolves the session into a [`UserId`] request extension.
///
/// Never rejects a request; routes decide whether a principal is required.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = extract_token(request.headers()) {
        match state.verifier().verify(&token) {
            Ok(user_id) => {
                set_sentry_user(user_id.as_str());
                request.extensions_mut().insert(user_id);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid session token");
            }
        }
    }

    next.run(request).await
}

/// The authenticated user making the request, if any.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(principal: Principal) -> Result<String, AppError> {
///     let user_id = principal.require()?;
///     Ok(format!("Hello, {user_id}!"))
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Principal(pub Option<UserId>);

impl Principal {
    /// The user id, or [`AppError::Unauthenticated`] when there is no session.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthenticated` if the request carried no valid token.
    pub fn require(&self) -> Result<&UserId, AppError> {
        self.0.as_ref().ok_or(AppError::Unauthenticated)
    }
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<UserId>().cloned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use secrecy::SecretString;
    use serde::Serialize;

    use super::*;

    const SECRET: &str = "kP9#vR2$wX7!qL4@zN8%mT3^bJ6&hF1*";

    #[derive(Serialize)]
    struct TestClaims<'a> {
        sub: &'a str,
        exp: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        iss: Option<&'a str>,
    }

    fn verifier(issuer: Option<&str>) -> TokenVerifier {
        TokenVerifier::from_config(&AuthConfig {
            key: JwtKey::Hs256(SecretString::from(SECRET)),
            issuer: issuer.map(String::from),
        })
        .unwrap()
    }

    fn token(sub: &str, exp_offset: i64, iss: Option<&str>) -> String {
        let claims = TestClaims {
            sub,
            exp: chrono::Utc::now().timestamp() + exp_offset,
            iss,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_verify_valid_token() {
        let user_id = verifier(None).verify(&token("user_1", 3600, None)).unwrap();
        assert_eq!(user_id.as_str(), "user_1");
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        assert!(verifier(None).verify(&token("user_1", -3600, None)).is_err());
    }

    #[test]
    fn test_verify_checks_issuer() {
        let verifier = verifier(Some("https://auth.duka.dev"));
        assert!(
            verifier
                .verify(&token("user_1", 3600, Some("https://auth.duka.dev")))
                .is_ok()
        );
        assert!(
            verifier
                .verify(&token("user_1", 3600, Some("https://evil.dev")))
                .is_err()
        );
    }

    #[test]
    fn test_extract_token_prefers_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("__session=cookie"));
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer header"),
        );
        assert_eq!(extract_token(&headers).as_deref(), Some("header"));
    }

    #[test]
    fn test_extract_token_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; __session=abc.def.ghi"),
        );
        assert_eq!(extract_token(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_extract_token_from_repeated_cookie_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(
            header::COOKIE,
            HeaderValue::from_static("__session=abc.def.ghi; lang=sw"),
        );
        assert_eq!(extract_token(&headers).as_deref(), Some("abc.def.ghi"));

        let mut empty = HeaderMap::new();
        empty.insert(header::COOKIE, HeaderValue::from_static("__session="));
        assert_eq!(extract_token(&empty), None);
    }

    #[test]
    fn test_extract_token_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic xyz"));
        assert_eq!(extract_token(&headers), None);
    }

    #[test]
    fn test_principal_require() {
        assert!(matches!(
            Principal(None).require(),
            Err(AppError::Unauthenticated)
        ));
        let principal = Principal(Some(UserId::new("user_1")));
        assert_eq!(principal.require().unwrap().as_str(), "user_1");
    }
}
