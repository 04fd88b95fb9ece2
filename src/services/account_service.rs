use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::{password, JwtService},
    errors::{AppError, AppResult},
    models::{
        domain::{user::normalize_email, User},
        dto::{
            request::{ForgotPasswordRequest, LoginRequest, RegisterRequest},
            response::{AuthResponse, MessageResponse},
        },
    },
    repositories::UserRepository,
};

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const FORGOT_PASSWORD_REPLY: &str =
    "If an account with that email exists, password reset instructions have been sent.";

pub struct AccountService {
    repository: Arc<dyn UserRepository>,
    jwt_service: Arc<JwtService>,
}

impl AccountService {
    pub fn new(repository: Arc<dyn UserRepository>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            repository,
            jwt_service,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        request.validate()?;

        let email = normalize_email(&request.email);
        let username = request.username.trim().to_string();

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AppError::ValidationError(
                "Email already registered".to_string(),
            ));
        }
        if self.repository.find_by_username(&username).await?.is_some() {
            return Err(AppError::ValidationError(
                "Username already taken".to_string(),
            ));
        }

        let password_hash = hash_off_thread(request.password).await?;
        let user = self
            .repository
            .create(User::new(&username, &email, password_hash))
            .await?;

        log::info!("New user registered: {}", user.email);

        self.issue(&user)
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        request.validate()?;

        let email = normalize_email(&request.email);
        let Some(user) = self.repository.find_by_email(&email).await? else {
            verify_off_thread(request.password, password::dummy_hash().to_string()).await?;
            log::warn!("Login failed for unknown email");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !verify_off_thread(request.password, user.password_hash.clone()).await? {
            log::warn!("Login failed for user {}", user.id);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        log::info!("User logged in: {}", user.email);

        self.issue(&user)
    }

    /// Always answers with the same message so callers cannot probe for accounts.
    pub async fn forgot_password(&self, request: ForgotPasswordRequest) -> AppResult<MessageResponse> {
        request.validate()?;

        let email = normalize_email(&request.email);
        match self.repository.find_by_email(&email).await? {
            Some(user) => log::info!("Password reset requested for user {}", user.id),
            None => log::info!("Password reset requested for an unregistered email"),
        }

        Ok(MessageResponse::new(FORGOT_PASSWORD_REPLY))
    }

    fn issue(&self, user: &User) -> AppResult<AuthResponse> {
        let token = self.jwt_service.create_token(user)?;
        Ok(AuthResponse {
            user_id: user.id.clone(),
            username: user.username.clone(),
            token,
        })
    }
}

async fn hash_off_thread(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || password::hash_password(&password))
        .await
        .map_err(|e| AppError::InternalError(format!("Password hashing task failed: {}", e)))?
}

async fn verify_off_thread(password: String, stored_hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || password::verify_password(&password, &stored_hash))
        .await
        .map_err(|e| AppError::InternalError(format!("Password verification task failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, repositories::MockUserRepository};

    fn service(repository: MockUserRepository) -> AccountService {
        AccountService::new(
            Arc::new(repository),
            Arc::new(JwtService::new(&Config::test_config())),
        )
    }

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            username: "alice".to_string(),
            email: "Alice@Example.com".to_string(),
            password: "Secret123".to_string(),
        }
    }

    fn stored_user(password: &str) -> User {
        User::new(
            "alice",
            "alice@example.com",
            password::hash_password(password).unwrap(),
        )
    }

    #[tokio::test]
    async fn register_creates_user_and_returns_token() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().times(1).returning(|_| Ok(None));
        repo.expect_find_by_username().times(1).returning(|_| Ok(None));
        repo.expect_create().times(1).returning(|user| {
            assert_eq!(user.email, "alice@example.com");
            assert!(user.password_hash.starts_with("$argon2"));
            Ok(user)
        });

        let response = service(repo).register(register_request()).await.unwrap();

        assert_eq!(response.username, "alice");
        assert_eq!(response.token.split('.').count(), 3);
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email_without_writing() {
        let existing = stored_user("Secret123");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_create().never();

        let err = service(repo).register(register_request()).await.unwrap_err();

        match err {
            AppError::ValidationError(msg) => assert_eq!(msg, "Email already registered"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn register_rejects_duplicate_username_without_writing() {
        let existing = stored_user("Secret123");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_find_by_username()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_create().never();

        let err = service(repo).register(register_request()).await.unwrap_err();

        match err {
            AppError::ValidationError(msg) => assert_eq!(msg, "Username already taken"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn register_rejects_weak_password_before_touching_store() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().never();
        repo.expect_create().never();

        let mut request = register_request();
        request.password = "weak".to_string();

        assert!(matches!(
            service(repo).register(request).await,
            Err(AppError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn login_with_correct_password_returns_token_for_user() {
        let user = stored_user("Secret123");
        let user_id = user.id.clone();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let svc = service(repo);
        let response = svc
            .login(LoginRequest {
                email: "ALICE@example.com".to_string(),
                password: "Secret123".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.user_id, user_id);
        let claims = svc.jwt_service.validate_token(&response.token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.email, "alice@example.com");
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let user = stored_user("Secret123");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(move |email| {
            if email == "alice@example.com" {
                Ok(Some(user.clone()))
            } else {
                Ok(None)
            }
        });
        let svc = service(repo);

        let wrong_password = svc
            .login(LoginRequest {
                email: "alice@example.com".to_string(),
                password: "Wrong1234".to_string(),
            })
            .await
            .unwrap_err();
        let unknown_email = svc
            .login(LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "Secret123".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AppError::Unauthorized(_)));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn forgot_password_reply_does_not_reveal_accounts() {
        let user = stored_user("Secret123");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(move |email| {
            Ok((email == "alice@example.com").then(|| user.clone()))
        });
        let svc = service(repo);

        let known = svc
            .forgot_password(ForgotPasswordRequest {
                email: "alice@example.com".to_string(),
            })
            .await
            .unwrap();
        let unknown = svc
            .forgot_password(ForgotPasswordRequest {
                email: "nobody@example.com".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(known.message, unknown.message);
    }
}
