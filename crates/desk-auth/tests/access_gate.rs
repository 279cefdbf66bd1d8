//! Access gate flows over an in-memory backend.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use pretty_assertions::assert_eq;

use desk_auth::{AccessGate, AuthError, Claims};
use desk_config::AuthConfig;
use desk_core::enums::Role;
use desk_db::{Backend, DatabaseError, MemoryBackend};

const SECRET: &str = "test-secret";

fn gate() -> (AccessGate, Arc<dyn Backend>) {
    let backend: Arc<dyn Backend> = Arc::new(MemoryBackend::new());
    (
        AccessGate::new(Arc::clone(&backend), SECRET, TimeDelta::hours(24)),
        backend,
    )
}

async fn gate_with_admin() -> AccessGate {
    let (gate, _) = gate();
    gate.create_admin("admin@example.com", "audit@2025", "audit@2025")
        .await
        .unwrap();
    gate
}

#[tokio::test]
async fn login_token_is_accepted_by_verify() {
    let gate = gate_with_admin().await;
    let login = gate.login("admin@example.com", "audit@2025").await.unwrap();
    assert_eq!(login.user.email, "admin@example.com");
    assert_eq!(login.user.role, Role::Admin);

    let claims = gate.verify(&login.token).unwrap();
    assert_eq!(claims.sub, login.user.id);
    assert_eq!(claims.exp - claims.iat, 24 * 3600);
    assert_eq!(claims.user_info(), login.user);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_identical() {
    let gate = gate_with_admin().await;
    let wrong = gate.login("admin@example.com", "not-the-password").await.unwrap_err();
    let unknown = gate.login("nobody@example.com", "audit@2025").await.unwrap_err();

    assert!(matches!(wrong, AuthError::InvalidCredentials));
    assert!(matches!(unknown, AuthError::InvalidCredentials));
    assert_eq!(wrong.to_string(), unknown.to_string());
}

#[tokio::test]
async fn login_validates_shape_before_lookup() {
    let gate = gate_with_admin().await;
    match gate.login("", "short").await.unwrap_err() {
        AuthError::Validation(errors) => {
            assert!(errors.has_field("email"));
            assert!(errors.has_field("password"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn login_email_is_case_insensitive() {
    let gate = gate_with_admin().await;
    assert!(gate.login(" ADMIN@example.com ", "audit@2025").await.is_ok());
}

#[tokio::test]
async fn verify_rejects_tampered_foreign_and_expired_tokens() {
    let gate = gate_with_admin().await;
    let token = gate.login("admin@example.com", "audit@2025").await.unwrap().token;

    let mut tampered = token.clone();
    tampered.push('x');
    assert!(matches!(gate.verify(&tampered), Err(AuthError::InvalidToken)));
    assert!(matches!(gate.verify("not.a.jwt"), Err(AuthError::InvalidToken)));

    let (other, _) = gate_other_secret();
    assert!(matches!(other.verify(&token), Err(AuthError::InvalidToken)));

    let expired = Claims {
        sub: 1,
        email: "admin@example.com".into(),
        role: Role::Admin,
        iat: (Utc::now() - TimeDelta::hours(48)).timestamp(),
        exp: (Utc::now() - TimeDelta::hours(24)).timestamp(),
    };
    let expired = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &expired,
        &jsonwebtoken::EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();
    assert!(matches!(gate.verify(&expired), Err(AuthError::InvalidToken)));
}

fn gate_other_secret() -> (AccessGate, Arc<dyn Backend>) {
    let backend: Arc<dyn Backend> = Arc::new(MemoryBackend::new());
    (
        AccessGate::new(Arc::clone(&backend), "another-secret", TimeDelta::hours(24)),
        backend,
    )
}

#[tokio::test]
async fn create_admin_rules() {
    let (gate, _) = gate();
    match gate.create_admin("admin@example.com", "short", "other").await.unwrap_err() {
        AuthError::Validation(errors) => {
            assert!(errors.has_field("password"));
            assert!(errors.has_field("confirmPassword"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    gate.create_admin("admin@example.com", "audit@2025", "audit@2025")
        .await
        .unwrap();
    let duplicate = gate
        .create_admin("Admin@Example.com", "audit@2025", "audit@2025")
        .await
        .unwrap_err();
    assert!(matches!(
        duplicate,
        AuthError::Database(DatabaseError::Conflict(_))
    ));
}

#[tokio::test]
async fn update_password_requires_current_password() {
    let (gate, backend) = gate();
    let user = gate
        .create_admin("admin@example.com", "audit@2025", "audit@2025")
        .await
        .unwrap();

    match gate
        .update_password(user.id, "wrong-current", "new-password", "new-password")
        .await
        .unwrap_err()
    {
        AuthError::Validation(errors) => assert!(errors.has_field("currentPassword")),
        other => panic!("expected validation error, got {other:?}"),
    }

    match gate
        .update_password(user.id, "audit@2025", "new-password", "mismatch!")
        .await
        .unwrap_err()
    {
        AuthError::Validation(errors) => assert!(errors.has_field("confirmPassword")),
        other => panic!("expected validation error, got {other:?}"),
    }

    let before = backend.find_user_by_id(user.id).await.unwrap().unwrap();
    gate.update_password(user.id, "audit@2025", "new-password", "new-password")
        .await
        .unwrap();
    let after = backend.find_user_by_id(user.id).await.unwrap().unwrap();
    assert_ne!(before.password_hash, after.password_hash);

    assert!(gate.login("admin@example.com", "audit@2025").await.is_err());
    assert!(gate.login("admin@example.com", "new-password").await.is_ok());

    assert!(matches!(
        gate.update_password(999, "x", "new-password", "new-password").await,
        Err(AuthError::InvalidToken)
    ));
}

#[tokio::test]
async fn ensure_default_admin_is_idempotent() {
    let (gate, _) = gate();
    assert!(gate.ensure_default_admin("admin@example.com", "audit@2025").await.unwrap());
    assert!(!gate.ensure_default_admin("ADMIN@example.com", "different-pass").await.unwrap());
    assert!(gate.login("admin@example.com", "audit@2025").await.is_ok());
}

#[test]
fn from_config_rejects_out_of_range_lifetimes() {
    let backend: Arc<dyn Backend> = Arc::new(MemoryBackend::new());
    for hours in [0, desk_config::MAX_TOKEN_TTL_HOURS + 1, 10_000_000_000, i64::MAX / 1000] {
        let config = AuthConfig {
            jwt_secret: SECRET.into(),
            token_ttl_hours: hours,
            ..Default::default()
        };
        let err = AccessGate::from_config(Arc::clone(&backend), &config).err().unwrap();
        assert!(matches!(err, AuthError::TokenLifetime(h) if h == hours));
    }

    let config = AuthConfig {
        jwt_secret: SECRET.into(),
        token_ttl_hours: desk_config::MAX_TOKEN_TTL_HOURS,
        ..Default::default()
    };
    assert!(AccessGate::from_config(backend, &config).is_ok());
}

#[tokio::test]
async fn unrepresentable_expiry_fails_login_without_panicking() {
    let backend: Arc<dyn Backend> = Arc::new(MemoryBackend::new());
    let gate = AccessGate::new(backend, SECRET, TimeDelta::MAX);
    gate.create_admin("admin@example.com", "audit@2025", "audit@2025")
        .await
        .unwrap();

    let err = gate.login("admin@example.com", "audit@2025").await.unwrap_err();
    assert!(matches!(err, AuthError::Signing(_)));
}
