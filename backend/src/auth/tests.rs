use super::*;
use jsonwebtoken::{EncodingKey, Header, encode};
use std::env;

const TEST_SECRET: &str = "supersecretjwtsecretforunittesting123";

fn set_env_vars() {
    unsafe {
        env::set_var("JWT_SECRET", TEST_SECRET);
    }
}

fn sign(claims: &Claims) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

#[test]
fn test_validate_bearer_token_success() {
    set_env_vars();
    let my_claims = Claims {
        sub: "123e4567-e89b-12d3-a456-426614174000".to_string(),
        role: "company".to_string(),
        company_id: Some("223e4567-e89b-12d3-a456-426614174000".to_string()),
        email: Some("owner@salon.example".to_string()),
        exp: 9999999999, // far future
    };

    let token = sign(&my_claims);

    let claims = validate_bearer_token(&token).expect("Valid token should pass");
    assert_eq!(claims.sub, my_claims.sub);
    assert_eq!(claims.role, my_claims.role);
    assert_eq!(claims.company_id, my_claims.company_id);
}

#[test]
fn test_validate_bearer_token_expired() {
    set_env_vars();
    let my_claims = Claims {
        sub: "123e4567-e89b-12d3-a456-426614174000".to_string(),
        role: "company".to_string(),
        company_id: None,
        email: None,
        exp: 1, // past
    };

    let token = sign(&my_claims);

    let result = validate_bearer_token(&token);
    assert!(result.is_err());
}

#[test]
fn test_validate_bearer_token_wrong_secret() {
    set_env_vars();
    let my_claims = Claims {
        sub: "123e4567-e89b-12d3-a456-426614174000".to_string(),
        role: "admin".to_string(),
        company_id: None,
        email: None,
        exp: 9999999999,
    };

    let token = encode(
        &Header::default(),
        &my_claims,
        &EncodingKey::from_secret(b"someoneelsessecret"),
    )
    .unwrap();

    let result = validate_bearer_token(&token);
    assert!(result.is_err());
}
