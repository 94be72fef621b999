use crate::api::AuthApi;
use crate::error::ApiError;
use crate::models::{Credentials, Registration, Role, User};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            token: None,
            is_authenticated: false,
            is_loading: true,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    LoginStart,
    LoginSuccess { user: User, token: String },
    LoginFailure(String),
    Logout,
    UpdateUser(User),
    ClearError,
}

pub fn reduce(state: AuthState, action: AuthAction) -> AuthState {
    match action {
        AuthAction::LoginStart => AuthState {
            is_loading: true,
            error: None,
            ..state
        },
        AuthAction::LoginSuccess { user, token } => AuthState {
            user: Some(user),
            token: Some(token),
            is_authenticated: true,
            is_loading: false,
            error: None,
        },
        AuthAction::LoginFailure(message) => AuthState {
            user: None,
            token: None,
            is_authenticated: false,
            is_loading: false,
            error: Some(message),
        },
        AuthAction::Logout => AuthState {
            is_loading: false,
            ..AuthState::default()
        },
        AuthAction::UpdateUser(user) => AuthState {
            user: Some(user),
            ..state
        },
        AuthAction::ClearError => AuthState { error: None, ..state },
    }
}

impl AuthState {
    pub fn dispatch(&mut self, action: AuthAction) {
        *self = reduce(std::mem::take(self), action);
    }

    pub fn has_role(&self, roles: &[Role]) -> bool {
        match (&self.user, self.is_authenticated) {
            (Some(user), true) => roles.contains(&user.role),
            _ => false,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(&[Role::Admin])
    }

    pub fn is_seller(&self) -> bool {
        self.has_role(&[Role::Seller, Role::Admin])
    }

    pub fn is_buyer(&self) -> bool {
        self.has_role(&[Role::Buyer, Role::Seller, Role::Admin])
    }

    /// Log in and record the outcome. Returns the failure message on error.
    pub async fn login(&mut self, api: &dyn AuthApi, credentials: &Credentials) -> Result<User, String> {
        self.dispatch(AuthAction::LoginStart);
        let outcome = api.login(credentials).await;
        self.settle(outcome.map(|s| (s.user, s.token)), "Login failed")
    }

    pub async fn register(&mut self, api: &dyn AuthApi, registration: &Registration) -> Result<User, String> {
        self.dispatch(AuthAction::LoginStart);
        let outcome = api.register(registration).await;
        self.settle(outcome.map(|s| (s.user, s.token)), "Registration failed")
    }

    /// Restore a session from a stored token by fetching the profile
    pub async fn restore(&mut self, api: &dyn AuthApi, token: Option<String>) {
        let Some(token) = token else {
            self.dispatch(AuthAction::Logout);
            return;
        };
        match api.profile().await {
            Ok(user) => self.dispatch(AuthAction::LoginSuccess { user, token }),
            Err(e) => {
                warn!("Stored session rejected: {}", e);
                self.dispatch(AuthAction::Logout);
            }
        }
    }

    pub async fn logout(&mut self, api: &dyn AuthApi) {
        if let Err(e) = api.logout().await {
            warn!("Logout call failed: {}", e);
        }
        self.dispatch(AuthAction::Logout);
    }

    fn settle(
        &mut self,
        outcome: Result<(Option<User>, String), ApiError>,
        fallback: &str,
    ) -> Result<User, String> {
        match outcome {
            Ok((Some(user), token)) => {
                info!("Signed in as {} ({})", user.email, user.role);
                self.dispatch(AuthAction::LoginSuccess {
                    user: user.clone(),
                    token,
                });
                Ok(user)
            }
            Ok((None, _)) => {
                self.dispatch(AuthAction::LoginFailure(fallback.to_string()));
                Err(fallback.to_string())
            }
            Err(e) => {
                let message = e.notification(fallback);
                self.dispatch(AuthAction::LoginFailure(message.clone()));
                Err(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User {
            id: "u1".to_string(),
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: None,
            role,
        }
    }

    #[test]
    fn login_lifecycle() {
        let mut state = AuthState::default();
        assert!(state.is_loading);

        state.dispatch(AuthAction::LoginStart);
        state.dispatch(AuthAction::LoginSuccess {
            user: user(Role::Seller),
            token: "t".to_string(),
        });
        assert!(state.is_authenticated);
        assert!(!state.is_loading);
        assert!(state.is_seller());
        assert!(state.is_buyer());
        assert!(!state.is_admin());

        state.dispatch(AuthAction::Logout);
        assert_eq!(
            state,
            AuthState {
                is_loading: false,
                ..AuthState::default()
            }
        );
        assert!(!state.is_buyer());
    }

    #[test]
    fn failure_clears_user_and_keeps_message() {
        let mut state = reduce(
            AuthState::default(),
            AuthAction::LoginSuccess {
                user: user(Role::Admin),
                token: "t".to_string(),
            },
        );
        state.dispatch(AuthAction::LoginFailure("Invalid credentials".to_string()));

        assert!(state.user.is_none());
        assert_eq!(state.error.as_deref(), Some("Invalid credentials"));

        state.dispatch(AuthAction::ClearError);
        assert!(state.error.is_none());
    }

    #[test]
    fn update_user_keeps_token() {
        let state = reduce(
            AuthState::default(),
            AuthAction::LoginSuccess {
                user: user(Role::Buyer),
                token: "t".to_string(),
            },
        );
        let mut renamed = user(Role::Buyer);
        renamed.name = "Asha K".to_string();

        let state = reduce(state, AuthAction::UpdateUser(renamed.clone()));
        assert_eq!(state.user, Some(renamed));
        assert_eq!(state.token.as_deref(), Some("t"));
    }
}
