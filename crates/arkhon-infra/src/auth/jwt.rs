//! JWT token service implementation.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use arkhon_core::domain::UserId;
use arkhon_core::ports::{AuthError, TokenClaims, TokenError, TokenService};

/// JWT token service configuration.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration: TimeDelta,
}

impl JwtConfig {
    /// Tokens stay valid for seven days.
    pub const DEFAULT_EXPIRATION_DAYS: i64 = 7;

    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiration: TimeDelta::days(Self::DEFAULT_EXPIRATION_DAYS),
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("expiration", &self.expiration)
            .finish()
    }
}

/// Internal JWT claims structure for serialization.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user id
    exp: i64,    // expiration timestamp
    iat: i64,    // issued at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nbf: Option<i64>,
}

/// Header fields read before full decoding.
#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

const ACCEPTED_ALGORITHMS: [&str; 3] = ["HS256", "HS384", "HS512"];

/// The `alg` named in the token header, if the header segment decodes.
fn header_algorithm(token: &str) -> Option<String> {
    let (header_b64, _) = token.split_once('.')?;
    let bytes = URL_SAFE_NO_PAD.decode(header_b64).ok()?;
    serde_json::from_slice::<RawHeader>(&bytes)
        .ok()
        .map(|header| header.alg)
}

/// HMAC-signed JWT service.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiration: TimeDelta,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        // Only the HMAC family is accepted; the header's alg must be one of these.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.validate_nbf = true;
        validation.leeway = 0;

        Self {
            encoding_key,
            decoding_key,
            validation,
            expiration: config.expiration,
        }
    }

    /// Issue a token as if it were `now`.
    pub fn issue_at(&self, user_id: UserId, now: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + self.expiration).timestamp(),
            iat: now.timestamp(),
            nbf: None,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: UserId) -> Result<String, AuthError> {
        self.issue_at(user_id, Utc::now())
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        // jsonwebtoken cannot parse algorithms it has no variant for (`none`).
        if let Some(alg) =
            header_algorithm(token).filter(|alg| !ACCEPTED_ALGORITHMS.contains(&alg.as_str()))
        {
            return Err(TokenError::Unhandled(format!("unexpected signing method: {alg}")));
        }

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidToken
                    | ErrorKind::Base64(_)
                    | ErrorKind::Json(_)
                    | ErrorKind::Utf8(_) => TokenError::Malformed(e.to_string()),
                    ErrorKind::ExpiredSignature | ErrorKind::ImmatureSignature => {
                        TokenError::ExpiredOrNotYetValid(e.to_string())
                    }
                    _ => TokenError::Unhandled(e.to_string()),
                }
            })?;

        tracing::debug!(subject = %token_data.claims.sub, "Token verified");

        Ok(TokenClaims {
            subject: token_data.claims.sub,
            exp: token_data.claims.exp,
        })
    }
}
