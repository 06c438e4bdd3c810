//! Session store: the single writer of the credential record.

use std::sync::{Arc, Mutex, MutexGuard};

use centralstore_auth::{Permissions, Role};
use centralstore_core::AuthError;

use crate::authority::{Authority, LoginCredentials, PasswordChange};
use crate::credential::{Credential, Identity, ProfileUpdate};
use crate::storage::{CredentialStorage, TOKEN_KEY, USER_KEY};
use crate::token::TokenSlot;

struct SessionState {
    credential: Credential,
    /// Bumped whenever the credential is replaced or cleared. A remote
    /// completion captured under an older epoch is dropped instead of
    /// applied, so a logout always wins over an in-flight mutation.
    epoch: u64,
}

/// Explicit-lifecycle session handle.
///
/// Cheap to clone; every consumer (navigation guard, views, transport
/// wiring) holds a handle instead of reaching for ambient state. Call
/// [`SessionStore::hydrate`] once at startup, before the first guard
/// evaluation.
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<Mutex<SessionState>>,
    storage: Arc<dyn CredentialStorage>,
    authority: Arc<dyn Authority>,
    tokens: TokenSlot,
}

impl SessionStore {
    pub fn new(
        authority: Arc<dyn Authority>,
        storage: Arc<dyn CredentialStorage>,
        tokens: TokenSlot,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState {
                credential: Credential::Anonymous,
                epoch: 0,
            })),
            storage,
            authority,
            tokens,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Derived signals
    // ─────────────────────────────────────────────────────────────────────

    pub fn is_authenticated(&self) -> bool {
        self.lock().credential.is_active()
    }

    pub fn is_admin(&self) -> bool {
        self.role().is_some_and(|role| role.is_admin())
    }

    pub fn role(&self) -> Option<Role> {
        self.lock().credential.role()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.lock().credential.identity().cloned()
    }

    /// The token slot the transport reads. Hand this to the transport at
    /// construction.
    pub fn token_slot(&self) -> TokenSlot {
        self.tokens.clone()
    }

    /// Fresh permission projection of the current signals. Never cached:
    /// recomputed on every call, so it cannot reflect a stale role.
    pub fn permissions(&self) -> Permissions {
        let (authenticated, role) = {
            let state = self.lock();
            (state.credential.is_active(), state.credential.role())
        };
        Permissions::compute(authenticated, role)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────

    /// Read durable storage into memory and arm the transport if a token is
    /// present. Runs once at process start, before any guard evaluation;
    /// no network round trip.
    pub fn hydrate(&self) {
        let token = self.storage.get(TOKEN_KEY);
        let user = self.storage.get(USER_KEY);
        let (token, raw) = match (token, user) {
            (Some(token), Some(raw)) => (token, raw),
            (None, None) => return,
            // One slot without the other is a half-written session; drop
            // the orphan so it cannot linger in durable storage.
            _ => {
                tracing::warn!("storage holds a partial session, discarding");
                self.clear_storage();
                return;
            }
        };

        match serde_json::from_str::<Identity>(&raw) {
            Ok(identity) => {
                tracing::info!(user = %identity.username, "session hydrated from storage");
                self.tokens.arm(token.as_str());
                let mut state = self.lock();
                state.credential = Credential::Active { token, identity };
            }
            Err(err) => {
                tracing::warn!("stored identity is unreadable, discarding session: {err:?}");
                self.clear_storage();
            }
        }
    }

    /// Exchange credentials with the remote authority. Single round trip;
    /// on success the token and identity are set atomically in memory and
    /// storage and the transport is armed. On failure prior state is
    /// untouched.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<(), AuthError> {
        let epoch = self.current_epoch();

        let outcome = match self.authority.login(credentials).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(user = %credentials.username, "login rejected: {err}");
                return Err(err.into_auth_error("Login failed"));
            }
        };

        let mut state = self.lock();
        if state.epoch != epoch {
            tracing::warn!("dropping stale login completion");
            return Err(AuthError::new("Login superseded"));
        }
        state.epoch += 1;

        tracing::info!(user = %outcome.user.username, role = %outcome.user.role, "login succeeded");
        self.storage.put(TOKEN_KEY, &outcome.token);
        self.persist_identity(&outcome.user);
        self.tokens.arm(outcome.token.as_str());
        state.credential = Credential::Active {
            token: outcome.token,
            identity: outcome.user,
        };
        Ok(())
    }

    /// Clear the credential from memory and storage and disarm the
    /// transport. Idempotent; also the synchronous winner over any
    /// in-flight remote mutation.
    pub fn logout(&self) {
        {
            let mut state = self.lock();
            state.epoch += 1;
            if state.credential.is_active() {
                tracing::info!("logging out");
            }
            state.credential = Credential::Anonymous;
        }
        self.clear_storage();
        self.tokens.disarm();
    }

    /// Reaction to an authorization-expired signal from the transport.
    /// Same teardown as [`SessionStore::logout`], kept separate for the
    /// log trail.
    pub fn force_logout(&self) {
        tracing::warn!("session token rejected by the server, clearing credential");
        self.logout();
    }

    /// Send a partial profile update. On success the accepted fields are
    /// shallow-merged into the identity and re-persisted; on failure the
    /// identity is unchanged.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), AuthError> {
        if !self.is_authenticated() {
            return Err(AuthError::new("Not logged in"));
        }
        let epoch = self.current_epoch();

        if let Err(err) = self.authority.update_profile(update).await {
            tracing::warn!("profile update rejected: {err}");
            return Err(err.into_auth_error("Profile update failed"));
        }

        let mut state = self.lock();
        if state.epoch != epoch {
            // The session was replaced or cleared while the update was in
            // flight; the remote accepted it, but there is no local
            // identity left to merge into.
            tracing::warn!("dropping stale profile completion");
            return Ok(());
        }
        let merged = match &mut state.credential {
            Credential::Active { identity, .. } => {
                update.apply_to(identity);
                Some(identity.clone())
            }
            Credential::Anonymous => None,
        };
        drop(state);
        if let Some(identity) = merged {
            self.persist_identity(&identity);
        }
        Ok(())
    }

    /// Change the account password. Never mutates the credential; the
    /// existing token stays valid.
    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), AuthError> {
        self.authority
            .change_password(change)
            .await
            .map_err(|err| err.into_auth_error("Password change failed"))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn current_epoch(&self) -> u64 {
        self.lock().epoch
    }

    fn clear_storage(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
    }

    fn persist_identity(&self, identity: &Identity) {
        match serde_json::to_string(identity) {
            Ok(raw) => self.storage.put(USER_KEY, &raw),
            Err(err) => tracing::error!("failed to serialize identity for storage: {err:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use centralstore_core::{ApiError, UserId};
    use tokio::sync::{Notify, Semaphore};

    use crate::authority::LoginOutcome;
    use crate::storage::MemoryStorage;

    use super::*;

    fn identity(role: Role) -> Identity {
        Identity {
            id: UserId::new(42),
            username: "alice".to_string(),
            email: "alice@lab.test".to_string(),
            role,
            real_name: "Alice".to_string(),
            phone: String::new(),
            department: "Chemistry".to_string(),
            bio: String::new(),
        }
    }

    fn credentials() -> LoginCredentials {
        LoginCredentials {
            username: "alice".to_string(),
            password: "hunter2".to_string(),
        }
    }

    /// Scriptable remote authority. The gates (zero permits) hold the
    /// matching round trip open until the test releases it.
    struct FakeAuthority {
        login_result: Mutex<Result<LoginOutcome, ApiError>>,
        login_calls: AtomicUsize,
        login_gate: Option<Arc<Semaphore>>,
        entered_login: Arc<Notify>,
        profile_gate: Option<Arc<Semaphore>>,
        entered_profile: Arc<Notify>,
    }

    impl FakeAuthority {
        fn succeeding(role: Role) -> Self {
            Self {
                login_result: Mutex::new(Ok(LoginOutcome {
                    token: "tok-abc".to_string(),
                    user: identity(role),
                })),
                login_calls: AtomicUsize::new(0),
                login_gate: None,
                entered_login: Arc::new(Notify::new()),
                profile_gate: None,
                entered_profile: Arc::new(Notify::new()),
            }
        }

        fn failing(err: ApiError) -> Self {
            let mut authority = Self::succeeding(Role::Standard);
            authority.login_result = Mutex::new(Err(err));
            authority
        }

        fn login_gated(role: Role, gate: Arc<Semaphore>) -> Self {
            let mut authority = Self::succeeding(role);
            authority.login_gate = Some(gate);
            authority
        }

        fn profile_gated(role: Role, gate: Arc<Semaphore>) -> Self {
            let mut authority = Self::succeeding(role);
            authority.profile_gate = Some(gate);
            authority
        }

        fn login_calls(&self) -> usize {
            self.login_calls.load(Ordering::SeqCst)
        }
    }

    async fn wait_at(gate: &Option<Arc<Semaphore>>) -> Result<(), ApiError> {
        if let Some(gate) = gate {
            let _permit = gate
                .acquire()
                .await
                .map_err(|_| ApiError::Network("gate closed".to_string()))?;
        }
        Ok(())
    }

    #[async_trait]
    impl Authority for FakeAuthority {
        async fn login(&self, _: &LoginCredentials) -> Result<LoginOutcome, ApiError> {
            self.login_calls.fetch_add(1, Ordering::SeqCst);
            self.entered_login.notify_one();
            wait_at(&self.login_gate).await?;
            match &*self.login_result.lock().unwrap() {
                Ok(outcome) => Ok(outcome.clone()),
                Err(err) => Err(err.clone()),
            }
        }

        async fn update_profile(&self, _: &ProfileUpdate) -> Result<(), ApiError> {
            self.entered_profile.notify_one();
            wait_at(&self.profile_gate).await?;
            Ok(())
        }

        async fn change_password(&self, _: &PasswordChange) -> Result<(), ApiError> {
            Ok(())
        }
    }

    fn store_with(authority: Arc<FakeAuthority>) -> (SessionStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::new(authority, storage.clone(), TokenSlot::new());
        (store, storage)
    }

    #[tokio::test]
    async fn login_round_trip_persists_and_arms() {
        let (store, storage) = store_with(Arc::new(FakeAuthority::succeeding(Role::Standard)));

        assert!(!store.is_authenticated());
        store.login(&credentials()).await.unwrap();

        assert!(store.is_authenticated());
        assert!(!store.is_admin());
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("tok-abc"));
        assert!(storage.get(USER_KEY).is_some());
        assert_eq!(store.token_slot().bearer().as_deref(), Some("tok-abc"));
    }

    #[tokio::test]
    async fn login_failure_leaves_state_untouched() {
        let authority = Arc::new(FakeAuthority::failing(ApiError::Rejected(
            "Invalid credentials".to_string(),
        )));
        let (store, storage) = store_with(authority);

        let err = store.login(&credentials()).await.unwrap_err();
        assert_eq!(err.message, "Invalid credentials");
        assert!(!store.is_authenticated());
        assert_eq!(storage.get(TOKEN_KEY), None);
        assert!(!store.token_slot().is_armed());
    }

    #[tokio::test]
    async fn login_failure_without_message_uses_fallback() {
        let authority = Arc::new(FakeAuthority::failing(ApiError::Network(
            "connection refused".to_string(),
        )));
        let (store, _) = store_with(authority);

        let err = store.login(&credentials()).await.unwrap_err();
        assert_eq!(err.message, "Login failed");
    }

    #[tokio::test]
    async fn logout_clears_everything_and_is_idempotent() {
        let (store, storage) = store_with(Arc::new(FakeAuthority::succeeding(Role::Admin)));
        store.login(&credentials()).await.unwrap();

        store.logout();
        assert!(!store.is_authenticated());
        assert!(!store.is_admin());
        assert_eq!(storage.get(TOKEN_KEY), None);
        assert_eq!(storage.get(USER_KEY), None);
        assert!(!store.token_slot().is_armed());

        // Already logged out: safe to call again.
        store.logout();
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn hydrate_restores_a_prior_session_without_network() {
        let authority = Arc::new(FakeAuthority::succeeding(Role::Admin));
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::new(authority.clone(), storage.clone(), TokenSlot::new());
        store.login(&credentials()).await.unwrap();
        let calls_after_login = authority.login_calls();

        // Simulated process restart: fresh store over the same storage.
        let restarted =
            SessionStore::new(authority.clone(), storage.clone(), TokenSlot::new());
        assert!(!restarted.is_authenticated());
        restarted.hydrate();

        assert!(restarted.is_authenticated());
        assert!(restarted.is_admin());
        assert_eq!(restarted.token_slot().bearer().as_deref(), Some("tok-abc"));
        assert_eq!(authority.login_calls(), calls_after_login);
    }

    #[tokio::test]
    async fn hydrate_discards_a_partial_session() {
        let (store, storage) = store_with(Arc::new(FakeAuthority::succeeding(Role::Standard)));
        storage.put(TOKEN_KEY, "tok-orphan");

        store.hydrate();

        assert!(!store.is_authenticated());
        assert_eq!(storage.get(TOKEN_KEY), None);
        assert!(!store.token_slot().is_armed());

        // An identity without a token is discarded the same way.
        storage.put(USER_KEY, "{\"id\":1,\"username\":\"a\",\"email\":\"a\",\"role\":\"user\"}");
        store.hydrate();
        assert!(!store.is_authenticated());
        assert_eq!(storage.get(USER_KEY), None);
    }

    #[tokio::test]
    async fn hydrate_discards_a_corrupt_identity_slot() {
        let (store, storage) = store_with(Arc::new(FakeAuthority::succeeding(Role::Standard)));
        storage.put(TOKEN_KEY, "tok-old");
        storage.put(USER_KEY, "not json");

        store.hydrate();

        assert!(!store.is_authenticated());
        assert_eq!(storage.get(TOKEN_KEY), None);
        assert_eq!(storage.get(USER_KEY), None);
    }

    #[tokio::test]
    async fn update_profile_merges_and_preserves_id_and_role() {
        let (store, storage) = store_with(Arc::new(FakeAuthority::succeeding(Role::Standard)));
        store.login(&credentials()).await.unwrap();

        let update = ProfileUpdate {
            real_name: Some("Alice B.".to_string()),
            ..Default::default()
        };
        store.update_profile(&update).await.unwrap();

        let current = store.identity().unwrap();
        assert_eq!(current.real_name, "Alice B.");
        assert_eq!(current.id, UserId::new(42));
        assert_eq!(current.role, Role::Standard);
        assert_eq!(current.department, "Chemistry");

        // Write-through: the persisted copy carries the merge too.
        let persisted: Identity =
            serde_json::from_str(&storage.get(USER_KEY).unwrap()).unwrap();
        assert_eq!(persisted.real_name, "Alice B.");
    }

    #[tokio::test]
    async fn update_profile_requires_a_session() {
        let (store, _) = store_with(Arc::new(FakeAuthority::succeeding(Role::Standard)));
        let err = store
            .update_profile(&ProfileUpdate::default())
            .await
            .unwrap_err();
        assert_eq!(err.message, "Not logged in");
    }

    #[tokio::test]
    async fn change_password_does_not_touch_the_credential() {
        let (store, storage) = store_with(Arc::new(FakeAuthority::succeeding(Role::Standard)));
        store.login(&credentials()).await.unwrap();
        let before = store.identity();

        let change = PasswordChange {
            old_password: "hunter2".to_string(),
            new_password: "hunter3".to_string(),
        };
        store.change_password(&change).await.unwrap();

        assert_eq!(store.identity(), before);
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("tok-abc"));
    }

    #[tokio::test]
    async fn logout_wins_over_an_in_flight_login() {
        let gate = Arc::new(Semaphore::new(0));
        let authority = Arc::new(FakeAuthority::login_gated(Role::Standard, gate.clone()));
        let (store, storage) = store_with(authority.clone());

        let in_flight = {
            let store = store.clone();
            tokio::spawn(async move { store.login(&credentials()).await })
        };
        authority.entered_login.notified().await;

        store.logout();
        gate.add_permits(1);

        let result = in_flight.await.unwrap();
        assert!(result.is_err());
        assert!(!store.is_authenticated());
        assert_eq!(storage.get(TOKEN_KEY), None);
        assert!(!store.token_slot().is_armed());
    }

    #[tokio::test]
    async fn logout_wins_over_an_in_flight_profile_update() {
        let gate = Arc::new(Semaphore::new(0));
        let authority = Arc::new(FakeAuthority::profile_gated(Role::Standard, gate.clone()));
        let (store, storage) = store_with(authority.clone());
        store.login(&credentials()).await.unwrap();

        let in_flight = {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .update_profile(&ProfileUpdate {
                        real_name: Some("Mallory".to_string()),
                        ..Default::default()
                    })
                    .await
            })
        };
        authority.entered_profile.notified().await;

        store.logout();
        gate.add_permits(1);

        // The remote accepted the update, but the session is gone; the
        // completion must not resurrect the cleared credential.
        let result = in_flight.await.unwrap();
        assert!(result.is_ok());
        assert!(!store.is_authenticated());
        assert_eq!(store.identity(), None);
        assert_eq!(storage.get(TOKEN_KEY), None);
        assert_eq!(storage.get(USER_KEY), None);
        assert!(!store.token_slot().is_armed());
    }
}
