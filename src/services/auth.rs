//! Authentication and authorization service
//!
//! Handles account signup/signin, session-token issuing and verification,
//! and the role gate applied to admin operations. Token verification lives
//! here once and is consumed by the HTTP middleware layer so no route
//! duplicates it.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::AuthConfig;
use crate::database::UserRepository;
use crate::models::user::{CreateUserRequest, User, UserProfile, UserRole};
use crate::utils::errors::{EventBuddyError, Result};

/// Verified session-token contents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub email: String,
    pub role: UserRole,
    pub exp: i64,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Outcome of a successful signin
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(users: UserRepository, config: AuthConfig) -> Self {
        Self { users, config }
    }

    /// Create a new account.
    ///
    /// Signing up with the admin role requires the configured admin code;
    /// emails are stored lowercase and must be unique.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
        admin_code: Option<&str>,
    ) -> Result<UserProfile> {
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(EventBuddyError::InvalidInput(
                "Name, email, and password are required".to_string()
            ));
        }

        if role == UserRole::Admin && admin_code != Some(self.config.admin_signup_code.as_str()) {
            warn!(email = email, "Signup with invalid admin code");
            return Err(EventBuddyError::PermissionDenied(
                "Invalid admin code".to_string()
            ));
        }

        let email = email.to_lowercase();
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(EventBuddyError::InvalidInput(
                "User with this email already exists".to_string()
            ));
        }

        let password_hash = hash_password(password)?;
        let user = self.users.create(CreateUserRequest {
            name: name.to_string(),
            email,
            password_hash,
            role,
        }).await?;

        info!(user_id = user.id, role = %user.role, "User account created");
        Ok(UserProfile::from(&user))
    }

    /// Verify credentials and issue a session token
    pub async fn signin(&self, email: &str, password: &str) -> Result<Session> {
        let email = email.to_lowercase();
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| EventBuddyError::Authentication("Invalid credentials".to_string()))?;

        if !verify_password(password, &user.password_hash)? {
            warn!(user_id = user.id, "Signin with invalid password");
            return Err(EventBuddyError::Authentication("Invalid credentials".to_string()));
        }

        let token = self.issue_token(&user)?;
        debug!(user_id = user.id, "Session token issued");

        Ok(Session {
            token,
            user: UserProfile::from(&user),
        })
    }

    /// Sign a session token for a user
    pub fn issue_token(&self, user: &User) -> Result<String> {
        let claims = Claims {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
            exp: (Utc::now() + Duration::days(self.config.token_ttl_days)).timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Verify a session token and return its claims.
    ///
    /// Expired or tampered tokens surface as authentication errors.
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(data.claims)
    }

    /// Require the admin role, or fail with a permission error
    pub fn require_admin(&self, claims: &Claims) -> Result<()> {
        if claims.is_admin() {
            Ok(())
        } else {
            warn!(user_id = claims.user_id, "Unauthorized admin access attempt");
            Err(EventBuddyError::PermissionDenied(
                "Admin access required".to_string()
            ))
        }
    }
}

/// Hash a password with Argon2 and a fresh salt
fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| EventBuddyError::ServiceUnavailable(format!("Failed to hash password: {e}")))
}

/// Verify a password against a stored hash
fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| EventBuddyError::Authentication(format!("Invalid password hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service(secret: &str) -> AuthService {
        // connect_lazy never touches the network; good enough for the
        // token paths, which don't hit the repository.
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgresql://localhost/eventbuddy_test")
            .unwrap();
        AuthService::new(
            UserRepository::new(pool),
            AuthConfig {
                jwt_secret: secret.to_string(),
                token_ttl_days: 7,
                admin_signup_code: "ADMIN123".to_string(),
            },
        )
    }

    fn test_user(role: UserRole) -> User {
        User {
            id: 42,
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password_hash: String::new(),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_token_round_trip() {
        let service = test_service("test-secret");
        let user = test_user(UserRole::Admin);

        let token = service.issue_token(&user).unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.email, "test@example.com");
        assert!(claims.is_admin());
    }

    #[tokio::test]
    async fn test_token_rejected_with_wrong_secret() {
        let issuer = test_service("secret-a");
        let verifier = test_service("secret-b");
        let token = issuer.issue_token(&test_user(UserRole::User)).unwrap();

        assert!(verifier.verify_token(&token).is_err());
    }

    #[tokio::test]
    async fn test_require_admin_gate() {
        let service = test_service("test-secret");
        let token = service.issue_token(&test_user(UserRole::User)).unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert!(service.require_admin(&claims).is_err());
    }

    #[test]
    fn test_password_hash_round_trip() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &hash).unwrap());
        assert!(!verify_password("wrong password", &hash).unwrap());
    }

    #[test]
    fn test_claims_admin_check() {
        let claims = Claims {
            user_id: 1,
            email: "admin@example.com".to_string(),
            role: UserRole::Admin,
            exp: (Utc::now() + Duration::days(1)).timestamp(),
        };
        assert!(claims.is_admin());

        let claims = Claims { role: UserRole::User, ..claims };
        assert!(!claims.is_admin());
    }
}
