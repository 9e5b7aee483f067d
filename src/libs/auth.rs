//! Password hashing and the login attempt state machine.
//!
//! ## Hashing
//!
//! Passwords are stored as Argon2id PHC strings
//! (`$argon2id$v=19$m=19456,t=2,p=1$...`). The cost parameters are fixed
//! constants; a fresh random salt is drawn for every hash.
//!
//! ## Login flow
//!
//! ```text
//!                 attempt(ok)
//!   AwaitingInput ───────────▶ Success
//!      │    ▲
//!      │    │ attempt(bad), failures < 3
//!      └────┘
//!      │ attempt(bad), failures == 3      abort()
//!      └───────────────────────▶ Locked    ──────▶ Aborted
//! ```
//!
//! `Success`, `Locked` and `Aborted` are terminal. Once locked, credentials
//! are not even evaluated. After a failure with attempts remaining the caller
//! waits `base * 2^(failures - 1)` before prompting again.

use crate::db::users::{Role, Users};
use crate::libs::error::AppError;
use crate::libs::messages::Message;
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use std::time::Duration;
use tracing::{debug, warn};

pub const HASH_MEMORY_KIB: u32 = 19_456;
pub const HASH_ITERATIONS: u32 = 2;
pub const HASH_LANES: u32 = 1;

pub const MAX_LOGIN_ATTEMPTS: u32 = 3;
pub const BASE_BACKOFF: Duration = Duration::from_secs(1);

/// Verified against when the username does not exist, so both paths cost one
/// Argon2 run with the same parameters. No password matches it.
pub const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$MCI5DIvtxdfCYjToFILQNg$XTOrrgVSx4+6bC8ROeRh5EmfeBk39QQHb6ZbB2Pip38";

fn hasher() -> Result<Argon2<'static>, AppError> {
    let params = Params::new(HASH_MEMORY_KIB, HASH_ITERATIONS, HASH_LANES, None)
        .map_err(|e| AppError::Hashing(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Hashing(e.to_string()))
}

/// Checks `password` against a stored PHC string. Malformed hashes never match.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        warn!("stored password hash is not a valid PHC string");
        return false;
    };

    match hasher() {
        Ok(argon2) => argon2.verify_password(password.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

/// Burns one verification for an unknown username.
pub(crate) fn verify_against_dummy(password: &str) {
    let _ = verify_password(password, DUMMY_PASSWORD_HASH);
}

/// Validates a new password and its confirmation.
pub fn check_new_password(password: &str, confirmation: &str) -> Result<(), AppError> {
    if password.chars().count() < crate::db::users::MIN_PASSWORD_LEN {
        return Err(AppError::Validation(Message::PasswordTooShort(crate::db::users::MIN_PASSWORD_LEN)));
    }
    if password != confirmation {
        return Err(AppError::Validation(Message::PasswordsDoNotMatch));
    }
    Ok(())
}

/// Delay before the next prompt after `failures` consecutive failures.
pub fn backoff_delay(base: Duration, failures: u32) -> Duration {
    if failures == 0 {
        return Duration::ZERO;
    }
    base.saturating_mul(1u32 << (failures - 1).min(16))
}

/// The identity a successful login yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginState {
    AwaitingInput { failures: u32 },
    Success(AuthenticatedUser),
    Locked,
    Aborted,
}

impl LoginState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LoginState::AwaitingInput { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Granted(AuthenticatedUser),
    Denied { remaining: u32, retry_after: Duration },
    Locked,
}

/// One interactive login: at most [`MAX_LOGIN_ATTEMPTS`] tries.
#[derive(Debug, Clone)]
pub struct LoginSession {
    state: LoginState,
    max_attempts: u32,
    base_backoff: Duration,
}

impl Default for LoginSession {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginSession {
    pub fn new() -> Self {
        Self::with_limits(MAX_LOGIN_ATTEMPTS, BASE_BACKOFF)
    }

    pub fn with_limits(max_attempts: u32, base_backoff: Duration) -> Self {
        LoginSession {
            state: LoginState::AwaitingInput { failures: 0 },
            max_attempts: max_attempts.max(1),
            base_backoff,
        }
    }

    pub fn state(&self) -> &LoginState {
        &self.state
    }

    /// Submits one pair of credentials.
    ///
    /// Empty fields count as a failure without touching the store. Once the
    /// session is locked every call returns `Locked`; after success or abort
    /// the session is closed and further calls are rejected.
    pub fn attempt(&mut self, users: &Users<'_>, username: &str, password: &str) -> Result<AttemptOutcome, AppError> {
        let failures = match &self.state {
            LoginState::AwaitingInput { failures } => *failures,
            LoginState::Locked => return Ok(AttemptOutcome::Locked),
            LoginState::Success(_) | LoginState::Aborted => {
                return Err(AppError::Validation(Message::LoginSessionClosed));
            }
        };

        let username = username.trim();
        let verified = if username.is_empty() || password.is_empty() {
            None
        } else {
            users.authenticate(username, password)?
        };

        if let Some(user) = verified {
            debug!(user = %user.username, "login granted");
            self.state = LoginState::Success(user.clone());
            return Ok(AttemptOutcome::Granted(user));
        }

        let failures = failures + 1;
        if failures >= self.max_attempts {
            warn!(attempts = failures, "login locked after repeated failures");
            self.state = LoginState::Locked;
            return Ok(AttemptOutcome::Locked);
        }

        self.state = LoginState::AwaitingInput { failures };
        Ok(AttemptOutcome::Denied {
            remaining: self.max_attempts - failures,
            retry_after: backoff_delay(self.base_backoff, failures),
        })
    }

    /// Cancels the login. No-op on a terminal session.
    pub fn abort(&mut self) {
        if !self.state.is_terminal() {
            self.state = LoginState::Aborted;
        }
    }
}
