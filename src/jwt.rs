//! Compact JWS decoding and verification
//!
//! Tokens are `header.payload.signature`, each segment base64url without
//! padding. The caller's key function sees the decoded (unverified) token and
//! returns the key to verify it with. After the signature checks out, the
//! `exp`, `iat` and `nbf` claims are validated against the current time.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use docassert_core::Value;
use docassert_wire::{decode_slice, DEFAULT_MAX_DEPTH};
use ring::{hmac, signature};
use std::fmt::{self, Display};
use thiserror::Error;

/// JWT decoding or verification failure
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    /// Segments, encodings or JSON are broken
    #[error("token is malformed: {0}")]
    Malformed(String),

    /// No usable key or algorithm
    #[error("token is unverifiable: {0}")]
    Unverifiable(String),

    /// Signature does not match
    #[error("token signature is invalid")]
    SignatureInvalid,

    /// `exp` is in the past
    #[error("token is expired")]
    Expired,

    /// `iat` is in the future
    #[error("token used before issued")]
    UsedBeforeIssued,

    /// `nbf` is in the future
    #[error("token is not valid yet")]
    NotValidYet,
}

/// Key material for signature verification
#[derive(Clone, PartialEq, Eq)]
pub enum VerificationKey {
    /// Shared secret for HS256/384/512
    Hmac(Vec<u8>),
    /// PKCS#1 `RSAPublicKey` DER for RS* and PS*
    RsaPublicKeyDer(Vec<u8>),
    /// Uncompressed EC point for ES256/384
    EcdsaPublicKey(Vec<u8>),
}

impl fmt::Debug for VerificationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            VerificationKey::Hmac(_) => "Hmac",
            VerificationKey::RsaPublicKeyDer(_) => "RsaPublicKeyDer",
            VerificationKey::EcdsaPublicKey(_) => "EcdsaPublicKey",
        };
        write!(f, "VerificationKey::{}(..)", kind)
    }
}

/// Supported signing algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Algorithm {
    HS256,
    HS384,
    HS512,
    RS256,
    RS384,
    RS512,
    PS256,
    PS384,
    PS512,
    ES256,
    ES384,
}

impl Algorithm {
    /// Look up an algorithm by its `alg` header name
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "HS256" => Algorithm::HS256,
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            "RS256" => Algorithm::RS256,
            "RS384" => Algorithm::RS384,
            "RS512" => Algorithm::RS512,
            "PS256" => Algorithm::PS256,
            "PS384" => Algorithm::PS384,
            "PS512" => Algorithm::PS512,
            "ES256" => Algorithm::ES256,
            "ES384" => Algorithm::ES384,
            _ => return None,
        })
    }

    /// The `alg` header name
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::HS256 => "HS256",
            Algorithm::HS384 => "HS384",
            Algorithm::HS512 => "HS512",
            Algorithm::RS256 => "RS256",
            Algorithm::RS384 => "RS384",
            Algorithm::RS512 => "RS512",
            Algorithm::PS256 => "PS256",
            Algorithm::PS384 => "PS384",
            Algorithm::PS512 => "PS512",
            Algorithm::ES256 => "ES256",
            Algorithm::ES384 => "ES384",
        }
    }

    fn verify(self, key: &VerificationKey, message: &[u8], sig: &[u8]) -> Result<(), JwtError> {
        let outcome = match (self, key) {
            (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512, VerificationKey::Hmac(secret)) => {
                let algorithm = match self {
                    Algorithm::HS256 => hmac::HMAC_SHA256,
                    Algorithm::HS384 => hmac::HMAC_SHA384,
                    _ => hmac::HMAC_SHA512,
                };
                hmac::verify(&hmac::Key::new(algorithm, secret), message, sig)
            }
            (
                Algorithm::RS256
                | Algorithm::RS384
                | Algorithm::RS512
                | Algorithm::PS256
                | Algorithm::PS384
                | Algorithm::PS512,
                VerificationKey::RsaPublicKeyDer(der),
            ) => {
                let algorithm: &'static dyn signature::VerificationAlgorithm = match self {
                    Algorithm::RS256 => &signature::RSA_PKCS1_2048_8192_SHA256,
                    Algorithm::RS384 => &signature::RSA_PKCS1_2048_8192_SHA384,
                    Algorithm::RS512 => &signature::RSA_PKCS1_2048_8192_SHA512,
                    Algorithm::PS256 => &signature::RSA_PSS_2048_8192_SHA256,
                    Algorithm::PS384 => &signature::RSA_PSS_2048_8192_SHA384,
                    _ => &signature::RSA_PSS_2048_8192_SHA512,
                };
                signature::UnparsedPublicKey::new(algorithm, der).verify(message, sig)
            }
            (Algorithm::ES256 | Algorithm::ES384, VerificationKey::EcdsaPublicKey(point)) => {
                let algorithm: &'static dyn signature::VerificationAlgorithm = match self {
                    Algorithm::ES256 => &signature::ECDSA_P256_SHA256_FIXED,
                    _ => &signature::ECDSA_P384_SHA384_FIXED,
                };
                signature::UnparsedPublicKey::new(algorithm, point).verify(message, sig)
            }
            _ => {
                return Err(JwtError::Unverifiable(format!(
                    "key is of invalid type for {}",
                    self
                )))
            }
        };
        outcome.map_err(|_| JwtError::SignatureInvalid)
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded token
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Token {
    /// The compact serialization as received
    pub raw: String,
    /// Decoded header object
    pub header: Value,
    /// Decoded payload (claims) object
    pub claims: Value,
    /// Raw signature bytes
    pub signature: Vec<u8>,
    /// The header's `alg`
    pub algorithm: String,
}

impl Token {
    /// One claim from the payload
    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.claims.as_object().and_then(|claims| claims.get(name))
    }

    /// One field from the header
    pub fn header_field(&self, name: &str) -> Option<&Value> {
        self.header.as_object().and_then(|header| header.get(name))
    }
}

/// Decode and verify a compact JWS
///
/// `key` receives the decoded token before verification; an error from it
/// makes the token unverifiable.
///
/// ```
/// use docassert::jwt::{parse, JwtError, VerificationKey};
///
/// let err = parse("not-a-token", |_| Ok::<_, String>(VerificationKey::Hmac(vec![]))).unwrap_err();
/// assert!(matches!(err, JwtError::Malformed(_)));
/// ```
pub fn parse<F, E>(raw: &str, key: F) -> Result<Token, JwtError>
where
    F: FnOnce(&Token) -> Result<VerificationKey, E>,
    E: Display,
{
    let mut segments = raw.split('.');
    let (Some(header_part), Some(claims_part), Some(signature_part), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(JwtError::Malformed(
            "token contains an invalid number of segments".to_string(),
        ));
    };

    let header = decode_segment(header_part, "header")?;
    let algorithm = match header.as_object().and_then(|h| h.get("alg")) {
        Some(Value::String(alg)) => alg.clone(),
        _ => {
            return Err(JwtError::Malformed(
                "header has no string \"alg\"".to_string(),
            ))
        }
    };
    let claims = decode_segment(claims_part, "claims")?;
    if claims.as_object().is_none() {
        return Err(JwtError::Malformed("claims are not a JSON object".to_string()));
    }
    let signature = URL_SAFE_NO_PAD
        .decode(signature_part)
        .map_err(|err| JwtError::Malformed(format!("could not base64 decode signature: {}", err)))?;

    let token = Token {
        raw: raw.to_string(),
        header,
        claims,
        signature,
        algorithm,
    };

    let Some(alg) = Algorithm::from_name(&token.algorithm) else {
        return Err(JwtError::Unverifiable(format!(
            "signing method {:?} is invalid",
            token.algorithm
        )));
    };
    let key = key(&token)
        .map_err(|err| JwtError::Unverifiable(format!("error while executing keyfunc: {}", err)))?;

    let signing_input = &raw[..header_part.len() + 1 + claims_part.len()];
    alg.verify(&key, signing_input.as_bytes(), &token.signature)?;
    validate_time_claims(&token)?;

    tracing::trace!(algorithm = %alg, "verified JWT");
    Ok(token)
}

fn decode_segment(segment: &str, name: &str) -> Result<Value, JwtError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|err| JwtError::Malformed(format!("could not base64 decode {}: {}", name, err)))?;
    decode_slice(&bytes, DEFAULT_MAX_DEPTH)
        .map_err(|err| JwtError::Malformed(format!("could not JSON decode {}: {}", name, err)))
}

fn validate_time_claims(token: &Token) -> Result<(), JwtError> {
    let now = Utc::now().timestamp_millis() as f64 / 1000.0;
    if let Some(exp) = numeric_claim(token, "exp")? {
        if now >= exp {
            return Err(JwtError::Expired);
        }
    }
    if let Some(iat) = numeric_claim(token, "iat")? {
        if now < iat {
            return Err(JwtError::UsedBeforeIssued);
        }
    }
    if let Some(nbf) = numeric_claim(token, "nbf")? {
        if now < nbf {
            return Err(JwtError::NotValidYet);
        }
    }
    Ok(())
}

fn numeric_claim(token: &Token, name: &str) -> Result<Option<f64>, JwtError> {
    match token.claim(name) {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(Some(*n)),
        Some(_) => Err(JwtError::Malformed(format!(
            "invalid type for claim {:?}",
            name
        ))),
    }
}
