use alganews_core::sdk::user::{Role, UserDetailed, UserSummary};

use crate::features::slice::{DetailState, ListSlice};

#[derive(Debug, Clone, Default)]
pub struct UserState {
    pub list: ListSlice<UserSummary, ()>,
    /// Detail and edit views.
    pub detail: DetailState<UserDetailed>,
}

impl UserState {
    /// Users that can receive payments.
    pub fn editors(&self) -> Vec<&UserSummary> {
        self.list
            .list
            .iter()
            .filter(|user| user.role == Role::Editor)
            .collect()
    }
}
