// src/session.rs
//
// Client-side session bootstrap. A native or web front-end holds one
// `Session` and drives it through an explicit state machine instead of
// consulting ambient global auth state. The collaborators behind the trait
// seams are the HTTP API for a real client and in-memory fakes in tests.

use async_trait::async_trait;

use crate::models::progress::ProgressBody;
use crate::models::user::UserBody;

/// Identity resolved from a bearer credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The credential was rejected (expired or malformed). The token is
    /// unusable and gets cleared.
    Rejected,
    /// A collaborator could not be reached. The token may still be good, so
    /// it is kept; the caller decides whether to surface a retry UI.
    Unavailable(String),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Rejected => write!(f, "credential rejected"),
            SessionError::Unavailable(msg) => write!(f, "service unavailable: {}", msg),
        }
    }
}

impl std::error::Error for SessionError {}

/// Authentication collaborator: turns a token into an identity and loads
/// the account behind it.
#[async_trait]
pub trait IdentityGateway {
    async fn authenticate(&self, token: &str) -> Result<Identity, SessionError>;
    async fn current_user(&self, user_id: i64) -> Result<UserBody, SessionError>;
}

/// Server-authoritative progress feed for the signed-in user. An HTTP
/// implementation attaches the bearer credential itself (request
/// interceptor style), so the session never threads the token through.
#[async_trait]
pub trait ProgressFeed {
    async fn fetch_all(&self) -> Result<Vec<ProgressBody>, SessionError>;
}

/// Durable token storage on the client (localStorage, keychain, ...).
pub trait TokenCache {
    fn load(&self) -> Option<String>;
    fn store(&mut self, token: &str);
    fn clear(&mut self);
}

/// Everything a view needs once the session is established. The progress
/// list is the server copy, fetched during bootstrap; any locally cached
/// progress is a pre-fetch placeholder only and is replaced wholesale.
#[derive(Debug, Clone)]
pub struct SessionData {
    pub user: UserBody,
    pub progress: Vec<ProgressBody>,
}

#[derive(Debug)]
pub enum SessionState {
    /// No credential; the user must log in.
    Unauthenticated,
    /// A cached credential is being validated against the server.
    Validating,
    /// Credential accepted; `SessionData` is server-authoritative.
    Authenticated(SessionData),
    /// Cached credential was rejected. Token and cached user are cleared;
    /// there is no automatic retry within the session.
    Invalid,
}

pub struct Session<G, F, C> {
    gateway: G,
    feed: F,
    cache: C,
    state: SessionState,
}

impl<G, F, C> Session<G, F, C>
where
    G: IdentityGateway,
    F: ProgressFeed,
    C: TokenCache,
{
    pub fn new(gateway: G, feed: F, cache: C) -> Self {
        Session {
            gateway,
            feed,
            cache,
            state: SessionState::Unauthenticated,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn data(&self) -> Option<&SessionData> {
        match &self.state {
            SessionState::Authenticated(data) => Some(data),
            _ => None,
        }
    }

    /// Application start-up: resolve the cached credential, if any, into an
    /// authenticated session.
    ///
    /// Transitions:
    /// * no cached token        -> `Unauthenticated`
    /// * accepted               -> `Authenticated` (progress reloaded from
    ///   the server)
    /// * rejected               -> `Invalid`, cache cleared, no retry
    /// * collaborator unreachable -> stays `Unauthenticated`, token kept,
    ///   error returned
    pub async fn bootstrap(&mut self) -> Result<&SessionState, SessionError> {
        let Some(token) = self.cache.load() else {
            self.state = SessionState::Unauthenticated;
            return Ok(&self.state);
        };

        self.state = SessionState::Validating;

        match self.gateway.authenticate(&token).await {
            Ok(identity) => match self.load_session(identity.user_id).await {
                Ok(data) => {
                    self.state = SessionState::Authenticated(data);
                    Ok(&self.state)
                }
                Err(err) => {
                    self.state = SessionState::Unauthenticated;
                    Err(err)
                }
            },
            Err(SessionError::Rejected) => {
                self.cache.clear();
                self.state = SessionState::Invalid;
                Ok(&self.state)
            }
            Err(err) => {
                self.state = SessionState::Unauthenticated;
                Err(err)
            }
        }
    }

    /// Called after a successful interactive login: persist the token and
    /// enter the authenticated state directly with the server's response.
    pub fn establish(&mut self, token: &str, user: UserBody, progress: Vec<ProgressBody>) {
        self.cache.store(token);
        self.state = SessionState::Authenticated(SessionData { user, progress });
    }

    /// Replaces the held progress list with a fresh server copy, e.g. after
    /// a quiz submission.
    pub async fn refresh_progress(&mut self) -> Result<(), SessionError> {
        let progress = self.feed.fetch_all().await?;
        if let SessionState::Authenticated(data) = &mut self.state {
            data.progress = progress;
        }
        Ok(())
    }

    /// Explicit logout: clear the cached credential and user data.
    pub fn logout(&mut self) {
        self.cache.clear();
        self.state = SessionState::Unauthenticated;
    }

    async fn load_session(&self, user_id: i64) -> Result<SessionData, SessionError> {
        let user = self.gateway.current_user(user_id).await?;
        let progress = self.feed.fetch_all().await?;
        Ok(SessionData { user, progress })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct FakeGateway {
        accept: bool,
        reachable: bool,
        user: UserBody,
    }

    #[async_trait]
    impl IdentityGateway for FakeGateway {
        async fn authenticate(&self, _token: &str) -> Result<Identity, SessionError> {
            if !self.reachable {
                return Err(SessionError::Unavailable("connection refused".to_string()));
            }
            if self.accept {
                Ok(Identity {
                    user_id: self.user.id,
                    email: self.user.email.clone(),
                })
            } else {
                Err(SessionError::Rejected)
            }
        }

        async fn current_user(&self, _user_id: i64) -> Result<UserBody, SessionError> {
            Ok(self.user.clone())
        }
    }

    struct FakeFeed {
        progress: Vec<ProgressBody>,
    }

    #[async_trait]
    impl ProgressFeed for FakeFeed {
        async fn fetch_all(&self) -> Result<Vec<ProgressBody>, SessionError> {
            Ok(self.progress.clone())
        }
    }

    #[derive(Clone)]
    struct FakeCache(Rc<RefCell<Option<String>>>);

    impl TokenCache for FakeCache {
        fn load(&self) -> Option<String> {
            self.0.borrow().clone()
        }
        fn store(&mut self, token: &str) {
            *self.0.borrow_mut() = Some(token.to_string());
        }
        fn clear(&mut self) {
            *self.0.borrow_mut() = None;
        }
    }

    fn learner() -> UserBody {
        UserBody {
            id: 7,
            name: "Sarah".to_string(),
            email: "sarah@example.com".to_string(),
            phone_number: "07700900123".to_string(),
            avatar: None,
            created_at: Utc::now(),
        }
    }

    fn server_progress() -> Vec<ProgressBody> {
        let now = Utc::now();
        vec![ProgressBody {
            id: 1,
            lesson_id: "lesson-1".to_string(),
            completed: true,
            score: 100,
            progress: 100,
            completed_at: Some(now),
            created_at: now,
            updated_at: now,
        }]
    }

    fn cache_with(token: Option<&str>) -> FakeCache {
        FakeCache(Rc::new(RefCell::new(token.map(|t| t.to_string()))))
    }

    #[tokio::test]
    async fn no_cached_token_starts_unauthenticated() {
        let mut session = Session::new(
            FakeGateway {
                accept: true,
                reachable: true,
                user: learner(),
            },
            FakeFeed { progress: vec![] },
            cache_with(None),
        );
        session.bootstrap().await.unwrap();
        assert!(matches!(session.state(), SessionState::Unauthenticated));
    }

    #[tokio::test]
    async fn accepted_token_loads_server_progress_wholesale() {
        let mut session = Session::new(
            FakeGateway {
                accept: true,
                reachable: true,
                user: learner(),
            },
            FakeFeed {
                progress: server_progress(),
            },
            cache_with(Some("tok")),
        );
        session.bootstrap().await.unwrap();

        let data = session.data().expect("authenticated");
        assert_eq!(data.user.email, "sarah@example.com");
        assert_eq!(data.progress.len(), 1);
        assert_eq!(data.progress[0].lesson_id, "lesson-1");
    }

    #[tokio::test]
    async fn rejected_token_is_cleared_with_no_retry() {
        let cache = cache_with(Some("expired"));
        let mut session = Session::new(
            FakeGateway {
                accept: false,
                reachable: true,
                user: learner(),
            },
            FakeFeed { progress: vec![] },
            cache.clone(),
        );

        session.bootstrap().await.unwrap();
        assert!(matches!(session.state(), SessionState::Invalid));
        assert!(cache.load().is_none());

        // A second bootstrap finds no token: nothing to retry with.
        session.bootstrap().await.unwrap();
        assert!(matches!(session.state(), SessionState::Unauthenticated));
    }

    #[tokio::test]
    async fn unreachable_server_keeps_the_token() {
        let cache = cache_with(Some("maybe-good"));
        let mut session = Session::new(
            FakeGateway {
                accept: true,
                reachable: false,
                user: learner(),
            },
            FakeFeed { progress: vec![] },
            cache.clone(),
        );

        let err = session.bootstrap().await.unwrap_err();
        assert!(matches!(err, SessionError::Unavailable(_)));
        assert!(matches!(session.state(), SessionState::Unauthenticated));
        assert_eq!(cache.load().as_deref(), Some("maybe-good"));
    }

    #[tokio::test]
    async fn logout_clears_cache_and_state() {
        let cache = cache_with(None);
        let mut session = Session::new(
            FakeGateway {
                accept: true,
                reachable: true,
                user: learner(),
            },
            FakeFeed {
                progress: server_progress(),
            },
            cache.clone(),
        );

        session.establish("fresh-token", learner(), vec![]);
        assert!(session.data().is_some());
        assert_eq!(cache.load().as_deref(), Some("fresh-token"));

        session.logout();
        assert!(matches!(session.state(), SessionState::Unauthenticated));
        assert!(cache.load().is_none());
    }

    #[tokio::test]
    async fn refresh_replaces_progress_after_submission() {
        let cache = cache_with(None);
        let mut session = Session::new(
            FakeGateway {
                accept: true,
                reachable: true,
                user: learner(),
            },
            FakeFeed {
                progress: server_progress(),
            },
            cache.clone(),
        );

        session.establish("tok", learner(), vec![]);
        assert!(session.data().unwrap().progress.is_empty());

        session.refresh_progress().await.unwrap();
        assert_eq!(session.data().unwrap().progress.len(), 1);
    }
}
