//! JWT Assertion Tests

use crate::{check, hs256_token, secret_key, SECRET};
use chrono::{Duration, Utc};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use docassert::jwt::{Token, VerificationKey};
use ring::rand::SystemRandom;
use ring::signature::{self, KeyPair, RsaEncoding, RsaKeyPair};

/// 2048-bit RSA key, PKCS#8 DER
const RSA_KEY: &[u8] = include_bytes!("../fixtures/rsa-2048.pk8");

fn document(token: &str) -> String {
    format!(r#"{{"key": "{}"}}"#, token)
}

/// Sign `claims` with the fixture RSA key; returns the token and the public key
fn rsa_token(alg: &str, encoding: &'static dyn RsaEncoding, claims: &str) -> (String, Vec<u8>) {
    let pair = RsaKeyPair::from_pkcs8(RSA_KEY).unwrap();
    let input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(format!(r#"{{"alg":"{}","typ":"JWT"}}"#, alg)),
        URL_SAFE_NO_PAD.encode(claims)
    );
    let mut sig = vec![0; pair.public().modulus_len()];
    pair.sign(encoding, &SystemRandom::new(), input.as_bytes(), &mut sig).unwrap();
    let token = format!("{}.{}", input, URL_SAFE_NO_PAD.encode(&sig));
    (token, pair.public_key().as_ref().to_vec())
}

#[test]
fn valid_token_passes_header_and_payload_checks() {
    let token = hs256_token(r#"{"sub":"user-1","name":"Ann","admin":false}"#, SECRET);
    check(document(&token), |json| {
        json.node("key")
            .is_jwt(secret_key)
            .with_algorithm("HS256")
            .with_subject("user-1")
            .with_header(|header| {
                header.node("typ").is_string().equal_to("JWT");
            })
            .with_payload(|payload| {
                payload.node("name").is_string().equal_to("Ann");
                payload.node("admin").is_false();
            });
    })
    .assert_no_messages();
}

#[test]
fn wrong_secret_fails_signature() {
    let token = hs256_token(r#"{"sub":"user-1"}"#, b"another-secret");
    let recorder = check(document(&token), |json| {
        json.node("key")
            .is_jwt(secret_key)
            .with_algorithm("HS256")
            .with_payload(|_| panic!("payload of an unverified token"));
    });
    recorder.assert_messages(&[r#""key" is JWT: token signature is invalid"#]);
}

#[test]
fn key_function_chooses_by_header() {
    let token = hs256_token(r#"{}"#, SECRET);
    let recorder = check(document(&token), |json| {
        json.node("key").is_jwt(|token: &Token| match token.algorithm.as_str() {
            "RS256" => Ok(VerificationKey::RsaPublicKeyDer(Vec::new())),
            other => Err(format!("unexpected algorithm {}", other)),
        });
    });
    recorder.assert_messages(&[
        r#""key" is JWT: token is unverifiable: error while executing keyfunc: unexpected algorithm HS256"#,
    ]);
}

#[test]
fn rsa_pss_tokens_verify() {
    let cases: [(&str, &'static dyn RsaEncoding); 3] = [
        ("PS256", &signature::RSA_PSS_SHA256),
        ("PS384", &signature::RSA_PSS_SHA384),
        ("PS512", &signature::RSA_PSS_SHA512),
    ];
    for (alg, encoding) in cases {
        let (token, public) = rsa_token(alg, encoding, r#"{"sub":"service"}"#);
        check(document(&token), |json| {
            json.node("key")
                .is_jwt(|_: &Token| Ok::<_, String>(VerificationKey::RsaPublicKeyDer(public)))
                .with_algorithm(alg)
                .with_subject("service");
        })
        .assert_no_messages();
    }
}

#[test]
fn rsa_pkcs1_token_verifies_and_rejects_other_padding() {
    let (token, public) = rsa_token("RS256", &signature::RSA_PKCS1_SHA256, r#"{"iss":"auth"}"#);
    check(document(&token), |json| {
        json.node("key")
            .is_jwt(|_: &Token| Ok::<_, String>(VerificationKey::RsaPublicKeyDer(public.clone())))
            .with_issuer("auth");
    })
    .assert_no_messages();

    // A PSS signature under an RS256 header does not verify
    let (pss, _) = rsa_token("RS256", &signature::RSA_PSS_SHA256, r#"{"iss":"auth"}"#);
    let recorder = check(document(&pss), |json| {
        json.node("key")
            .is_jwt(|_: &Token| Ok::<_, String>(VerificationKey::RsaPublicKeyDer(public)));
    });
    recorder.assert_messages(&[r#""key" is JWT: token signature is invalid"#]);
}

#[test]
fn expired_token_is_rejected() {
    let expired = (Utc::now() - Duration::hours(1)).timestamp();
    let token = hs256_token(&format!(r#"{{"exp":{}}}"#, expired), SECRET);
    let recorder = check(document(&token), |json| {
        json.node("key").is_jwt(secret_key);
    });
    recorder.assert_messages(&[r#""key" is JWT: token is expired"#]);
}

#[test]
fn token_issued_in_the_future_is_rejected() {
    let issued = (Utc::now() + Duration::hours(1)).timestamp();
    let token = hs256_token(&format!(r#"{{"iat":{}}}"#, issued), SECRET);
    let recorder = check(document(&token), |json| {
        json.node("key")
            .is_jwt(secret_key)
            .with_issued_at()
            .after(Utc::now());
    });
    recorder.assert_messages(&[r#""key" is JWT: token used before issued"#]);
}

#[test]
fn time_claims_yield_time_assertions() {
    let now = Utc::now();
    let claims = format!(
        r#"{{"iat":{},"nbf":{},"exp":{}}}"#,
        now.timestamp(),
        (now - Duration::minutes(1)).timestamp(),
        (now + Duration::hours(1)).timestamp()
    );
    let token = hs256_token(&claims, SECRET);
    let recorder = check(document(&token), |json| {
        json.node("key")
            .is_jwt(secret_key)
            .with_issued_at()
            .before_or_equal_to(now);
        json.node("key")
            .is_jwt(secret_key)
            .with_expires_at()
            .after(now)
            .before(now);
    });
    assert_eq!(recorder.len(), 1);
    assert!(recorder.messages()[0].contains(r#""key" is JWT with expires at ("exp") before"#));
}

#[test]
fn jwt_value_shortcut() {
    let token = hs256_token(r#"{"jti":"abc"}"#, SECRET);
    check(document(&token), |json| {
        let decoded = json.node("key").jwt(secret_key);
        assert_eq!(decoded.claim("jti").and_then(|v| v.as_str()), Some("abc"));
        assert_eq!(decoded.raw, token);
    })
    .assert_no_messages();
}

#[test]
fn non_string_node_is_not_jwt() {
    let recorder = check(r#"{"key": 5}"#, |json| {
        json.node("key").is_jwt(secret_key).with_algorithm("HS256");
    });
    recorder.assert_messages(&[r#""key" is string"#]);
}
