/// Unit tests for the credential lifecycle
///
/// Each test follows GIVEN / WHEN / THEN.
use chrono::Utc;
use crypto_core::{Claims, JwtKeys};
use std::sync::Arc;

use super::fixtures::*;
use crate::db::CredentialStore;
use crate::error::AuthError;
use crate::models::Identity;

// ============================================================================
// Registrar
// ============================================================================

#[tokio::test]
async fn test_register_stores_hash_not_plaintext() {
    // GIVEN: an empty store
    let h = harness();

    // WHEN: registering a user
    h.registrar
        .register(TEST_USERNAME, TEST_PASSWORD, None)
        .await
        .unwrap();

    // THEN: the stored credential is an Argon2id hash
    let stored = h.store.find_by_username(TEST_USERNAME).await.unwrap().unwrap();
    assert_ne!(stored.password_hash, TEST_PASSWORD);
    assert!(stored.password_hash.starts_with("$argon2id$"));
}

#[tokio::test]
async fn test_register_duplicate_conflicts() {
    // GIVEN: an existing user
    let h = harness_with_user().await;

    // WHEN: registering the same username again
    let result = h.registrar.register(TEST_USERNAME, "other", None).await;

    // THEN: conflict, and the original record is untouched
    assert!(matches!(result, Err(AuthError::Conflict)));
    assert_eq!(h.store.insert_count(), 1);
}

#[tokio::test]
async fn test_register_empty_fields_never_reach_store() {
    // GIVEN: a store that fails every call
    let h = harness();
    h.store.set_unavailable(true);

    // WHEN: registering with an empty username or password
    let empty_user = h.registrar.register("", "x", None).await;
    let empty_pass = h.registrar.register("x", "", None).await;

    // THEN: input errors, not store errors
    assert!(matches!(empty_user, Err(AuthError::InvalidInput(_))));
    assert!(matches!(empty_pass, Err(AuthError::InvalidInput(_))));
}

#[tokio::test]
async fn test_register_store_failure() {
    let h = harness();
    h.store.set_unavailable(true);

    let result = h.registrar.register(TEST_USERNAME, TEST_PASSWORD, None).await;
    assert!(matches!(result, Err(AuthError::StoreUnavailable(_))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registration_single_winner() {
    // GIVEN: a shared registrar
    let h = Arc::new(harness());

    // WHEN: two registrations for the same name race
    let a = {
        let h = h.clone();
        tokio::spawn(async move { h.registrar.register("same", "p1", None).await })
    };
    let b = {
        let h = h.clone();
        tokio::spawn(async move { h.registrar.register("same", "p2", None).await })
    };
    let results = [a.await.unwrap(), b.await.unwrap()];

    // THEN: exactly one Created and one Conflict
    let created = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(AuthError::Conflict)))
        .count();
    assert_eq!(created, 1);
    assert_eq!(conflicts, 1);
    assert_eq!(h.store.len(), 1);
}

// ============================================================================
// Authenticator
// ============================================================================

#[tokio::test]
async fn test_login_then_verify_round_trip() {
    // GIVEN: a registered user
    let h = harness_with_user().await;

    // WHEN: logging in and verifying the issued token
    let token = h
        .authenticator
        .login(TEST_USERNAME, TEST_PASSWORD, Some(TEST_CALLER))
        .await
        .unwrap();
    let subject = h.verifier.verify(Some(&bearer(&token)), None).unwrap();

    // THEN: the subject is the username
    assert_eq!(subject, TEST_USERNAME);
}

#[tokio::test]
async fn test_login_token_lifetime_is_one_hour() {
    let h = harness_with_user().await;
    let token = h
        .authenticator
        .login(TEST_USERNAME, TEST_PASSWORD, None)
        .await
        .unwrap();

    let claims = h.keys.validate(&token).unwrap();
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[tokio::test]
async fn test_unknown_user_and_wrong_password_are_indistinguishable() {
    // GIVEN: one registered user
    let h = harness_with_user().await;

    // WHEN: logging in as a ghost and with a wrong password
    let ghost = h.authenticator.login("ghost", "anything", None).await.unwrap_err();
    let wrong = h
        .authenticator
        .login(TEST_USERNAME, "WrongPass123!", None)
        .await
        .unwrap_err();

    // THEN: same error, same public message
    assert!(matches!(ghost, AuthError::InvalidCredentials));
    assert!(matches!(wrong, AuthError::InvalidCredentials));
    assert_eq!(ghost.public_message(), wrong.public_message());
}

#[tokio::test]
async fn test_login_empty_fields_unauthorized() {
    let h = harness_with_user().await;

    assert!(matches!(
        h.authenticator.login("", TEST_PASSWORD, None).await,
        Err(AuthError::InvalidCredentials)
    ));
    assert!(matches!(
        h.authenticator.login(TEST_USERNAME, "", None).await,
        Err(AuthError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn test_login_corrupt_stored_hash_unauthorized() {
    // GIVEN: a record whose hash cannot be parsed
    let h = harness();
    h.store
        .insert(&Identity {
            username: "broken".to_string(),
            password_hash: "plaintext-from-old-revision".to_string(),
        })
        .await
        .unwrap();

    // WHEN / THEN: login fails like any bad credential
    let err = h
        .authenticator
        .login("broken", "plaintext-from-old-revision", None)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn test_login_store_failure_is_internal() {
    let h = harness_with_user().await;
    h.store.set_unavailable(true);

    let err = h
        .authenticator
        .login(TEST_USERNAME, TEST_PASSWORD, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::StoreUnavailable(_)));
    assert_eq!(err.public_message(), "Internal server error");
}

// ============================================================================
// TokenVerifier
// ============================================================================

#[test]
fn test_expiry_boundary() {
    // GIVEN: tokens expiring one second either side of now
    let h = harness();
    let now = Utc::now().timestamp();
    let sign = |exp: i64| {
        h.keys
            .sign(&Claims {
                sub: TEST_USERNAME.to_string(),
                iat: now - 60,
                exp,
            })
            .unwrap()
    };
    let expired = sign(now - 1);
    let live = sign(now + 1);

    // WHEN / THEN: verified at the same instant
    assert!(matches!(
        h.verifier.verify_at(Some(&bearer(&expired)), None, now),
        Err(AuthError::InvalidToken)
    ));
    assert_eq!(
        h.verifier.verify_at(Some(&bearer(&live)), None, now).unwrap(),
        TEST_USERNAME
    );
}

#[test]
fn test_forged_tokens_rejected() {
    let h = harness();

    // Signed with another secret
    let (foreign, _) = JwtKeys::from_secret(b"some-other-secret-entirely")
        .issue(TEST_USERNAME, chrono::Duration::seconds(60))
        .unwrap();
    assert!(matches!(
        h.verifier.verify(Some(&bearer(&foreign)), None),
        Err(AuthError::InvalidToken)
    ));

    // Claims swapped, signature kept
    let (genuine, _) = h
        .keys
        .issue(TEST_USERNAME, chrono::Duration::seconds(60))
        .unwrap();
    let (other, _) = h.keys.issue("admin", chrono::Duration::seconds(60)).unwrap();
    let g: Vec<&str> = genuine.split('.').collect();
    let o: Vec<&str> = other.split('.').collect();
    let tampered = format!("{}.{}.{}", g[0], o[1], g[2]);
    assert!(matches!(
        h.verifier.verify(Some(&bearer(&tampered)), None),
        Err(AuthError::InvalidToken)
    ));
}

#[test]
fn test_malformed_headers_rejected() {
    let h = harness();

    for header in [None, Some("Token abc"), Some("Bearer "), Some("bearer abc")] {
        let err = h.verifier.verify(header, None).unwrap_err();
        assert!(
            matches!(err, AuthError::MalformedToken),
            "header {:?} should be malformed",
            header
        );
    }
}

#[test]
fn test_garbage_token_rejected() {
    let h = harness();
    assert!(matches!(
        h.verifier.verify(Some("Bearer not.a.jwt"), None),
        Err(AuthError::InvalidToken)
    ));
}
