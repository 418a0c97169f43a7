//! Auth session.
//!
//! State machine over the `mombabyshop-user` / `mombabyshop-token`
//! records: anonymous until a login or registration succeeds, then
//! authenticated until logout. Both records are written together and
//! removed together; the cart and wishlist are per-device state and are
//! deliberately untouched by any transition here. Session changes made in
//! other contexts are tracked through the token record, so a logout
//! elsewhere de-authenticates this context too.

pub mod accounts;
mod error;

pub use error::AuthError;

use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;

use mombabyshop_core::{
    Address, Email, ProfileId, UserPreferences, UserProfile, UserRole,
};

use crate::storage::{StorageError, StoreHandle, keys};

/// Registration input.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Display name (required).
    pub name: String,
    /// Login email (required).
    pub email: String,
    /// Password (required; stored nowhere in this mock).
    pub password: String,
    /// Contact phone number.
    pub phone: Option<String>,
}

/// Partial profile update; `Some` fields overwrite, `None` fields keep
/// their current value (shallow merge).
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New avatar URL or embedded image data.
    pub avatar: Option<String>,
    /// Replacement address list.
    pub addresses: Option<Vec<Address>>,
    /// Replacement preferences.
    pub preferences: Option<UserPreferences>,
}

enum SessionState {
    Anonymous,
    Authenticated { profile: UserProfile, token: String },
}

/// Local change observer; receives the new profile, or `None` when the
/// session ended.
type Watcher = Box<dyn Fn(Option<&UserProfile>) + Send + Sync>;

/// The auth session.
///
/// Construct once per context. Restores an authenticated session from the
/// store when both the profile and token records are present; anything
/// less starts anonymous.
pub struct AuthSession {
    store: StoreHandle,
    state: Arc<Mutex<SessionState>>,
    watchers: Arc<Mutex<Vec<Watcher>>>,
}

impl AuthSession {
    /// Create a session over the given store context.
    ///
    /// Restores an authenticated session when both records are present,
    /// then follows session changes from other contexts via subscription.
    #[must_use]
    pub fn new(store: StoreHandle) -> Self {
        let state = Arc::new(Mutex::new(restore(&store)));
        let watchers: Arc<Mutex<Vec<Watcher>>> = Arc::new(Mutex::new(Vec::new()));

        // The token record is written last on login and removed first on
        // logout, so each of its transitions brackets a complete session
        // change.
        let store_in_handler = store.clone();
        let state_in_handler = Arc::clone(&state);
        let watchers_in_handler = Arc::clone(&watchers);
        store.subscribe(keys::TOKEN, move |_| {
            let next = restore(&store_in_handler);
            let profile = {
                let mut guard = state_in_handler.lock();
                *guard = next;
                match &*guard {
                    SessionState::Authenticated { profile, .. } => Some(profile.clone()),
                    SessionState::Anonymous => None,
                }
            };
            for watcher in watchers_in_handler.lock().iter() {
                watcher(profile.as_ref());
            }
        });

        // Profile edits made elsewhere; login and logout transitions
        // arrive through the token record instead.
        let state_for_user = Arc::clone(&state);
        let watchers_for_user = Arc::clone(&watchers);
        store.subscribe(keys::USER, move |raw| {
            let Some(text) = raw else { return };
            let next = match serde_json::from_str::<UserProfile>(text) {
                Ok(profile) => profile,
                Err(error) => {
                    tracing::warn!(%error, "ignoring corrupt user update");
                    return;
                }
            };
            let updated = {
                let mut guard = state_for_user.lock();
                match &mut *guard {
                    SessionState::Authenticated { profile, .. } => {
                        *profile = next.clone();
                        true
                    }
                    SessionState::Anonymous => false,
                }
            };
            if updated {
                for watcher in watchers_for_user.lock().iter() {
                    watcher(Some(&next));
                }
            }
        });

        Self {
            store,
            state,
            watchers,
        }
    }

    /// Log in against the demo account directory.
    ///
    /// The legacy account (`test@example.com`) is accepted for any
    /// requested role and normalized to customer.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidEmail`] for a malformed email,
    /// [`AuthError::InvalidCredentials`] when nothing in the directory
    /// matches, and [`AuthError::Storage`] if persisting the session
    /// fails. On any error the prior session state is unchanged.
    pub fn login(
        &self,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<UserProfile, AuthError> {
        Email::parse(email)?;

        let profile =
            accounts::authenticate(email, password, role).ok_or(AuthError::InvalidCredentials)?;

        self.establish(profile)
    }

    /// Register a new account. The profile gets a fresh timestamp-derived
    /// ID and the customer role.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingField`] when a required field is
    /// empty, [`AuthError::InvalidEmail`] for a malformed email, and
    /// [`AuthError::Storage`] if persisting the session fails.
    pub fn register(&self, data: Registration) -> Result<UserProfile, AuthError> {
        if data.name.is_empty() {
            return Err(AuthError::MissingField("name"));
        }
        if data.password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }
        let email = Email::parse(&data.email)?;

        let profile = UserProfile {
            id: ProfileId::new(Utc::now().timestamp_millis()),
            email,
            name: data.name,
            role: UserRole::Customer,
            phone: data.phone,
            avatar: Some("/default-avatar.png".to_owned()),
            addresses: Vec::new(),
            preferences: Some(UserPreferences {
                newsletter: true,
                promotions: false,
                order_updates: true,
                language: "vi".to_owned(),
                currency: "VND".to_owned(),
            }),
        };

        self.establish(profile)
    }

    /// End the session: discard the profile and token records. Cart and
    /// wishlist records are not touched.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] if the store cannot be written; the
    /// in-memory session then remains as it was.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.remove(keys::TOKEN)?;
        self.store.remove(keys::USER)?;
        *self.state.lock() = SessionState::Anonymous;
        self.notify_watchers(None);
        Ok(())
    }

    /// Shallow-merge `update` into the current profile and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthenticated`] when no session is active
    /// and [`AuthError::Storage`] if persisting fails (profile unchanged).
    pub fn update_profile(&self, update: ProfileUpdate) -> Result<UserProfile, AuthError> {
        let mut state = self.state.lock();
        let SessionState::Authenticated { profile, .. } = &mut *state else {
            return Err(AuthError::NotAuthenticated);
        };

        let mut merged = profile.clone();
        if let Some(name) = update.name {
            merged.name = name;
        }
        if let Some(phone) = update.phone {
            merged.phone = Some(phone);
        }
        if let Some(avatar) = update.avatar {
            merged.avatar = Some(avatar);
        }
        if let Some(addresses) = update.addresses {
            merged.addresses = addresses;
        }
        if let Some(preferences) = update.preferences {
            merged.preferences = Some(preferences);
        }

        self.store.write(keys::USER, &merged)?;
        *profile = merged.clone();
        drop(state);
        self.notify_watchers(Some(&merged));
        Ok(merged)
    }

    /// Mock password-reset flow: always reports that a reset email was
    /// sent. No email leaves the device.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidEmail`] for a malformed email.
    pub fn reset_password(&self, email: &str) -> Result<String, AuthError> {
        Email::parse(email)?;
        Ok("Password reset email sent. Please check your inbox.".to_owned())
    }

    /// Mock password-change flow: succeeds iff `current` is the demo
    /// password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingField`] for an empty new password and
    /// [`AuthError::WrongPassword`] when `current` does not match.
    pub fn change_password(&self, current: &str, new: &str) -> Result<(), AuthError> {
        if new.is_empty() {
            return Err(AuthError::MissingField("password"));
        }
        if current != accounts::DEMO_PASSWORD {
            return Err(AuthError::WrongPassword);
        }
        Ok(())
    }

    /// The current profile, if a session is active.
    #[must_use]
    pub fn current_profile(&self) -> Option<UserProfile> {
        match &*self.state.lock() {
            SessionState::Authenticated { profile, .. } => Some(profile.clone()),
            SessionState::Anonymous => None,
        }
    }

    /// The current session token, if a session is active.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        match &*self.state.lock() {
            SessionState::Authenticated { token, .. } => Some(token.clone()),
            SessionState::Anonymous => None,
        }
    }

    /// Whether a session is active.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(&*self.state.lock(), SessionState::Authenticated { .. })
    }

    /// Register an observer for session transitions. It runs after every
    /// committed login, registration, profile update, and logout, whether
    /// performed through this session or one in another context.
    pub fn watch(&self, watcher: impl Fn(Option<&UserProfile>) + Send + Sync + 'static) {
        self.watchers.lock().push(Box::new(watcher));
    }

    fn notify_watchers(&self, profile: Option<&UserProfile>) {
        for watcher in self.watchers.lock().iter() {
            watcher(profile);
        }
    }

    /// Persist and commit an authenticated session for `profile`.
    fn establish(&self, profile: UserProfile) -> Result<UserProfile, AuthError> {
        let token = mint_token();
        self.persist_session(&profile, &token)?;
        *self.state.lock() = SessionState::Authenticated {
            profile: profile.clone(),
            token,
        };
        self.notify_watchers(Some(&profile));
        Ok(profile)
    }

    /// Write both session records; the pair is present together or not at
    /// all, so a failed token write rolls the profile record back.
    fn persist_session(&self, profile: &UserProfile, token: &str) -> Result<(), StorageError> {
        self.store.write(keys::USER, profile)?;
        if let Err(token_error) = self.store.write(keys::TOKEN, &token) {
            if let Err(cleanup_error) = self.store.remove(keys::USER) {
                tracing::warn!(%cleanup_error, "could not roll back profile record");
            }
            return Err(token_error);
        }
        Ok(())
    }
}

fn mint_token() -> String {
    format!("mock-jwt-token-{}", Utc::now().timestamp_millis())
}

fn restore(store: &StoreHandle) -> SessionState {
    let profile = match store.read::<UserProfile>(keys::USER) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(%error, "user record unreadable; starting anonymous");
            None
        }
    };
    let token = match store.read::<String>(keys::TOKEN) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(%error, "token record unreadable; starting anonymous");
            None
        }
    };

    match (profile, token) {
        (Some(profile), Some(token)) => SessionState::Authenticated { profile, token },
        _ => SessionState::Anonymous,
    }
}
