use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing;
use uuid::Uuid;

use campus_core::types::User;
use campus_core::{keys, CampusContext, StoreError};

const MIN_PASSWORD_LEN: usize = 6;

/// E-mail domains accepted at sign-up.
const UNIVERSITY_DOMAINS: &[&str] = &[
    "@iqra.edu.pk",
    "@student.university.edu",
    "@stu.university.edu",
    "@university.edu.pk",
    "@ccp.edu.pk",
    "@student.ccp.edu.pk",
    "@comsats.edu.pk",
    "@pu.edu.pk",
    "@lums.edu.pk",
    "@nust.edu.pk",
];

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("please use a university e-mail address to register")]
    NotUniversityEmail,

    #[error("password must be at least {MIN_PASSWORD_LEN} characters long")]
    PasswordTooShort,

    #[error("an account with this e-mail already exists")]
    EmailTaken,

    #[error("invalid e-mail or password")]
    InvalidCredentials,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Account record stored under `registered_users`, keyed by lowercased
/// e-mail. The password is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Account {
    id: String,
    email: String,
    full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    student_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    department: Option<String>,
    registered_at: DateTime<Utc>,
    password: String,
}

impl Account {
    fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            full_name: self.full_name.clone(),
            email: self.email.clone(),
        }
    }
}

type AccountMap = BTreeMap<String, Account>;

#[derive(Debug, Clone)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub student_id: Option<String>,
    pub department: Option<String>,
}

#[derive(Clone)]
pub struct AuthService {
    ctx: CampusContext,
}

impl AuthService {
    pub fn new(ctx: CampusContext) -> Self {
        Self { ctx }
    }

    /// Create an account and sign it in.
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<User, AuthError> {
        let email = request.email.trim().to_lowercase();
        if !is_university_email(&email) {
            return Err(AuthError::NotUniversityEmail);
        }
        if request.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::PasswordTooShort);
        }

        let _guard = self.ctx.store.lock_key(keys::REGISTERED_USERS).await;

        let mut accounts: AccountMap = self
            .ctx
            .store
            .get(keys::REGISTERED_USERS)
            .await?
            .unwrap_or_default();
        if accounts.contains_key(&email) {
            return Err(AuthError::EmailTaken);
        }

        let account = Account {
            id: Uuid::new_v4().to_string(),
            email: email.clone(),
            full_name: request.full_name,
            student_id: request.student_id,
            department: request.department,
            registered_at: Utc::now(),
            password: request.password,
        };
        let user = account.to_user();

        accounts.insert(email.clone(), account);
        self.ctx.store.set(keys::REGISTERED_USERS, &accounts).await?;
        self.ctx.store.set(keys::AUTH_SESSION, &user).await?;

        tracing::info!(email = %email, "account created");
        Ok(user)
    }

    /// Match `email`/`password` against the stored accounts and open a
    /// session. Unknown e-mail and wrong password are indistinguishable to
    /// the caller.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = email.trim().to_lowercase();

        let accounts: AccountMap = self
            .ctx
            .store
            .get(keys::REGISTERED_USERS)
            .await?
            .unwrap_or_default();

        let account = accounts
            .get(&email)
            .filter(|account| account.password == password)
            .ok_or(AuthError::InvalidCredentials)?;

        let user = account.to_user();
        self.ctx.store.set(keys::AUTH_SESSION, &user).await?;

        tracing::info!(email = %email, "signed in");
        Ok(user)
    }

    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.ctx.store.remove(keys::AUTH_SESSION).await?;
        tracing::info!("signed out");
        Ok(())
    }

    /// The signed-in user, if a session exists. Never fails; a broken
    /// session record reads as signed-out.
    pub async fn current_user(&self) -> Option<User> {
        match self.ctx.store.get(keys::AUTH_SESSION).await {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!(error = %err, "session read failed, treating as signed out");
                None
            }
        }
    }
}

fn is_university_email(email: &str) -> bool {
    UNIVERSITY_DOMAINS
        .iter()
        .any(|domain| email.ends_with(domain))
}
