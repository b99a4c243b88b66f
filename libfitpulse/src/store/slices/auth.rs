//! Auth slice

use serde::{Deserialize, Serialize};

use crate::store::actions::Action;
use crate::store::request::RemoteRequestState;
use crate::types::AuthSession;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthState {
    pub session: RemoteRequestState<AuthSession>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.session.data().token.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.session.data().username.as_deref()
    }
}

pub fn reduce(state: AuthState, action: &Action) -> AuthState {
    match action {
        Action::AuthRequested => AuthState {
            session: state.session.begin(),
        },

        // profile_pic survives a fresh login
        Action::AuthSucceeded(grant) => AuthState {
            session: state.session.succeed_with(|session| AuthSession {
                token: Some(grant.token.clone()),
                username: Some(grant.username.clone()),
                ..session
            }),
        },

        Action::AuthFailed(error) => AuthState {
            session: state.session.fail(error.clone()),
        },

        Action::Logout => AuthState {
            session: state
                .session
                .reset()
                .map_data(|session| AuthSession {
                    token: None,
                    ..session
                }),
        },

        Action::UpdateProfile {
            username,
            profile_pic,
        } => AuthState {
            session: state.session.map_data(|session| AuthSession {
                username: username.clone().or(session.username),
                profile_pic: match profile_pic {
                    Some(pic) => pic.clone(),
                    None => session.profile_pic,
                },
                ..session
            }),
        },

        _ => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::request::RequestStatus;
    use crate::types::AuthGrant;

    fn grant(username: &str) -> Action {
        Action::AuthSucceeded(AuthGrant {
            token: format!("token-{}", username),
            username: username.to_string(),
        })
    }

    #[test]
    fn test_login_flow() {
        let state = reduce(AuthState::default(), &Action::AuthRequested);
        assert_eq!(state.session.status(), RequestStatus::Pending);

        let state = reduce(state, &grant("sam"));
        assert_eq!(state.session.status(), RequestStatus::Succeeded);
        assert!(state.is_authenticated());
        assert_eq!(state.username(), Some("sam"));
    }

    #[test]
    fn test_logout_keeps_profile() {
        let state = reduce(AuthState::default(), &grant("sam"));
        let state = reduce(
            state,
            &Action::UpdateProfile {
                username: None,
                profile_pic: Some(Some("file:///avatar.png".to_string())),
            },
        );

        let state = reduce(state, &Action::Logout);
        assert!(state.session.data().token.is_none());
        assert_eq!(state.username(), Some("sam"));
        assert_eq!(state.session.data().profile_pic.as_deref(), Some("file:///avatar.png"));
        assert_eq!(state.session.status(), RequestStatus::Idle);
        assert!(state.session.error().is_none());
    }

    #[test]
    fn test_relogin_restores_token_and_keeps_picture() {
        let state = reduce(AuthState::default(), &grant("sam"));
        let state = reduce(
            state,
            &Action::UpdateProfile {
                username: None,
                profile_pic: Some(Some("pic".to_string())),
            },
        );
        let state = reduce(state, &Action::Logout);
        let state = reduce(reduce(state, &Action::AuthRequested), &grant("sam"));

        assert!(state.is_authenticated());
        assert_eq!(state.session.data().profile_pic.as_deref(), Some("pic"));
    }

    #[test]
    fn test_failure_sets_error_and_keeps_session() {
        let state = reduce(AuthState::default(), &grant("sam"));
        let state = reduce(state, &Action::AuthRequested);
        let state = reduce(
            state,
            &Action::AuthFailed("Invalid password. Please try again.".to_string()),
        );
        assert_eq!(state.session.status(), RequestStatus::Failed);
        assert_eq!(state.session.error(), Some("Invalid password. Please try again."));
        assert_eq!(state.username(), Some("sam"));
    }

    #[test]
    fn test_update_profile_only_touches_given_fields() {
        let state = reduce(AuthState::default(), &grant("sam"));
        let state = reduce(
            state,
            &Action::UpdateProfile {
                username: Some("samantha".to_string()),
                profile_pic: None,
            },
        );
        assert_eq!(state.username(), Some("samantha"));
        assert!(state.session.data().profile_pic.is_none());
        assert!(state.is_authenticated());
    }

    #[test]
    fn test_update_profile_can_clear_picture() {
        let set = |pic: Option<Option<String>>| Action::UpdateProfile {
            username: None,
            profile_pic: pic,
        };
        let state = reduce(AuthState::default(), &grant("sam"));
        let state = reduce(state, &set(Some(Some("pic".to_string()))));

        let state = reduce(state, &set(None));
        assert_eq!(state.session.data().profile_pic.as_deref(), Some("pic"));

        let state = reduce(state, &set(Some(None)));
        assert!(state.session.data().profile_pic.is_none());
        assert_eq!(state.username(), Some("sam"));
    }

    #[test]
    fn test_unrelated_action_is_noop() {
        let state = reduce(AuthState::default(), &grant("sam"));
        let next = reduce(state.clone(), &Action::AddWater);
        assert_eq!(state, next);
    }
}
