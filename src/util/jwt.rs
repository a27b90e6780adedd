use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;
use crate::config::JwtConfig;

/// Which kind of session a token was issued for. Carried in every token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalKind {
    User,
    Admin,
}

impl PrincipalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalKind::User => "user",
            PrincipalKind::Admin => "admin",
        }
    }
}

/// Verified identity attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    User { user_id: String },
    Admin { admin_id: String },
}

impl Principal {
    pub fn kind(&self) -> PrincipalKind {
        match self {
            Principal::User { .. } => PrincipalKind::User,
            Principal::Admin { .. } => PrincipalKind::Admin,
        }
    }

    pub fn subject(&self) -> &str {
        match self {
            Principal::User { user_id } => user_id,
            Principal::Admin { admin_id } => admin_id,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Principal::Admin { .. })
    }
}

/// JWT token claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ObjectId hex or admin id)
    pub sub: String,
    /// Principal kind discriminant
    pub kind: PrincipalKind,
    /// Role marker ("user" or "admin")
    pub role: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// JWT ID (unique identifier for the token)
    pub jti: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

impl Claims {
    pub fn principal(&self) -> Principal {
        match self.kind {
            PrincipalKind::User => Principal::User { user_id: self.sub.clone() },
            PrincipalKind::Admin => Principal::Admin { admin_id: self.sub.clone() },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    pub token: String,
    /// Lifetime in seconds
    pub expires_in: i64,
    pub token_type: String,
}

/// Error types for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Failed to encode JWT token: {0}")]
    EncodingFailed(String),
    #[error("Failed to decode JWT token: {0}")]
    DecodingFailed(String),
    #[error("Token has expired")]
    TokenExpired,
    #[error("Invalid token format")]
    InvalidToken,
}

pub trait JwtTokenUtils {
    fn issue_token(&self, principal: &Principal) -> Result<IssuedToken, JwtError>;
    fn verify_token(&self, token: &str) -> Result<Claims, JwtError>;
    fn extract_token_from_header(&self, auth_header: &str) -> Result<String, JwtError>;
    /// Extract, verify and resolve the principal behind an `Authorization` header value.
    fn authenticate_header(&self, auth_header: &str) -> Result<Principal, JwtError>;
}

#[derive(Debug, Clone)]
pub struct JwtTokenUtilsImpl {
    pub jwt_config: JwtConfig,
}

impl JwtTokenUtilsImpl {
    pub fn new(jwt_config: JwtConfig) -> Self {
        JwtTokenUtilsImpl { jwt_config }
    }

    /// Lifetime in minutes for a principal kind.
    pub fn lifetime_minutes(&self, kind: PrincipalKind) -> i64 {
        match kind {
            PrincipalKind::User => self.jwt_config.user_token_expiration,
            PrincipalKind::Admin => self.jwt_config.admin_token_expiration,
        }
    }

    fn encode_claims(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(Algorithm::HS256);
        let encoding_key = EncodingKey::from_secret(self.jwt_config.jwt_secret.as_bytes());
        encode(&header, claims, &encoding_key).map_err(|err| {
            error!("Failed to encode JWT token: {}", err);
            JwtError::EncodingFailed(err.to_string())
        })
    }
}

impl JwtTokenUtils for JwtTokenUtilsImpl {
    fn issue_token(&self, principal: &Principal) -> Result<IssuedToken, JwtError> {
        let kind = principal.kind();
        debug!("Generating {} token for: {}", kind.as_str(), principal.subject());

        let minutes = self.lifetime_minutes(kind);
        let now = Utc::now();
        let expiration = now + Duration::minutes(minutes);

        let claims = Claims {
            sub: principal.subject().to_string(),
            kind,
            role: kind.as_str().to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            jti: Uuid::new_v4().to_string(),
            iss: self.jwt_config.jwt_issuer.clone(),
        };

        let token = self.encode_claims(&claims)?;
        info!("Issued {} token for: {}", kind.as_str(), principal.subject());
        Ok(IssuedToken {
            token,
            expires_in: minutes * 60,
            token_type: "Bearer".to_string(),
        })
    }

    fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        debug!("Validating JWT token");

        let decoding_key = DecodingKey::from_secret(self.jwt_config.jwt_secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(ref issuer) = self.jwt_config.jwt_issuer {
            validation.set_issuer(&[issuer]);
        }

        match decode::<Claims>(token, &decoding_key, &validation) {
            Ok(token_data) => {
                debug!("Token validation successful for: {}", token_data.claims.sub);
                Ok(token_data.claims)
            }
            Err(err) if matches!(err.kind(), ErrorKind::ExpiredSignature) => {
                warn!("Token has expired");
                Err(JwtError::TokenExpired)
            }
            Err(err) => {
                warn!("Failed to decode JWT token: {}", err);
                Err(JwtError::DecodingFailed(err.to_string()))
            }
        }
    }

    fn extract_token_from_header(&self, auth_header: &str) -> Result<String, JwtError> {
        let token = match auth_header.trim_start().split_once(' ') {
            Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => token.trim(),
            _ => return Err(JwtError::InvalidToken),
        };

        if token.is_empty() {
            warn!("Empty token in authorization header");
            return Err(JwtError::InvalidToken);
        }
        Ok(token.to_string())
    }

    fn authenticate_header(&self, auth_header: &str) -> Result<Principal, JwtError> {
        let token = self.extract_token_from_header(auth_header)?;
        let claims = self.verify_token(&token)?;
        Ok(claims.principal())
    }
}
