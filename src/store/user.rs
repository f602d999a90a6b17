//! User slice: the signed-in shopper and the admin user list

use serde::{Deserialize, Serialize};

use super::lifecycle::{message_or_empty, Lifecycle};
use crate::types::User;

pub const DEFAULT_ERROR: &str = "Failed to load user";

/// User returned by an address mutation, with the backend's confirmation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserWithMessage {
    pub user: User,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserState {
    #[serde(flatten)]
    pub status: Lifecycle,
    pub is_authenticated: bool,
    pub user: Option<User>,
    pub success_message: Option<String>,
    /// Admin listing of every account
    pub users: Vec<User>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum UserAction {
    LoadUserRequest,
    LoadUserSuccess(User),
    LoadUserFail(#[serde(deserialize_with = "message_or_empty")] String),

    UpdateUserInfoRequest,
    UpdateUserInfoSuccess(User),
    UpdateUserInfoFail(#[serde(deserialize_with = "message_or_empty")] String),

    UpdateUserAddressRequest,
    UpdateUserAddressSuccess(UserWithMessage),
    UpdateUserAddressFail(#[serde(deserialize_with = "message_or_empty")] String),

    DeleteUserAddressRequest,
    DeleteUserAddressSuccess(UserWithMessage),
    DeleteUserAddressFail(#[serde(deserialize_with = "message_or_empty")] String),

    GetAllUsersRequest,
    GetAllUsersSuccess(Vec<User>),
    GetAllUsersFail(#[serde(deserialize_with = "message_or_empty")] String),

    ClearUserMessages,
    ResetUser,
}

pub fn reduce(mut state: UserState, action: UserAction) -> UserState {
    use UserAction::*;

    match action {
        LoadUserRequest
        | UpdateUserInfoRequest
        | UpdateUserAddressRequest
        | DeleteUserAddressRequest
        | GetAllUsersRequest => state.status.request(),

        LoadUserSuccess(user) => {
            state.status.succeed();
            state.is_authenticated = true;
            state.user = Some(user);
        }
        LoadUserFail(message) => {
            state.status.fail(message, DEFAULT_ERROR);
            state.is_authenticated = false;
        }

        UpdateUserInfoSuccess(user) => {
            state.status.succeed();
            state.user = Some(user);
        }

        UpdateUserAddressSuccess(update) | DeleteUserAddressSuccess(update) => {
            state.status.succeed();
            state.user = Some(update.user);
            state.success_message = Some(update.message).filter(|m| !m.is_empty());
        }

        GetAllUsersSuccess(users) => {
            state.status.succeed();
            state.users = users;
        }

        UpdateUserInfoFail(message)
        | UpdateUserAddressFail(message)
        | DeleteUserAddressFail(message)
        | GetAllUsersFail(message) => state.status.fail(message, DEFAULT_ERROR),

        ClearUserMessages => {
            state.status.clear_error();
            state.success_message = None;
        }
        ResetUser => state = UserState::default(),
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_user_success() {
        let state = reduce(UserState::default(), UserAction::LoadUserRequest);
        assert!(state.status.loading);

        let state = reduce(state, UserAction::LoadUserSuccess(User::new("u1", "Ada")));
        assert!(!state.status.loading);
        assert!(state.is_authenticated);
        assert_eq!(state.user.unwrap().id, "u1");
    }

    #[test]
    fn test_load_user_fail_drops_authentication() {
        let state = reduce(UserState::default(), UserAction::LoadUserSuccess(User::new("u1", "Ada")));
        let state = reduce(state, UserAction::LoadUserRequest);
        let state = reduce(state, UserAction::LoadUserFail("Please login".to_string()));

        assert!(!state.is_authenticated);
        assert_eq!(state.status.error.as_deref(), Some("Please login"));
    }

    #[test]
    fn test_address_update_sets_message() {
        let state = reduce(UserState::default(), UserAction::UpdateUserAddressRequest);
        let state = reduce(
            state,
            UserAction::UpdateUserAddressSuccess(UserWithMessage {
                user: User::new("u1", "Ada"),
                message: "Address added".to_string(),
            }),
        );
        assert_eq!(state.success_message.as_deref(), Some("Address added"));

        let state = reduce(state, UserAction::ClearUserMessages);
        assert_eq!(state.success_message, None);
        assert!(state.user.is_some());
    }

    #[test]
    fn test_reset_returns_initial_state() {
        let state = reduce(UserState::default(), UserAction::GetAllUsersSuccess(vec![User::new("u1", "Ada")]));
        assert_eq!(reduce(state, UserAction::ResetUser), UserState::default());
    }
}
