use alganews_core::sdk::Id;
use alganews_core::sdk::user::UserDetailed;

use crate::common::{TaskId, TaskSeq, TaskState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthPhase {
    #[default]
    Idle,
    /// A login URL is being (or was) issued; the session is not usable.
    RedirectingToLogin,
    /// On the redirect route without a `code` parameter.
    MissingCode,
    Exchanging,
    Refreshing,
    Authenticated {
        user_id: Id,
    },
    /// The authorization server rejected the code exchange.
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub phase: AuthPhase,
    /// Loaded by `auth/fetchUser`.
    pub user: Option<UserDetailed>,
    /// Last issued login screen URL.
    pub login_url: Option<String>,
    pub bootstrapped: bool,
    /// Clock captured at bootstrap, used for token expiry checks.
    pub(crate) now: i64,
    user_task: TaskState,
}

impl AuthState {
    pub fn user_id(&self) -> Option<Id> {
        match self.phase {
            AuthPhase::Authenticated { user_id } => Some(user_id),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id().is_some()
    }

    pub(crate) fn begin_user_fetch(&mut self, tasks: &mut TaskSeq) -> TaskId {
        self.user_task.begin(tasks)
    }

    pub(crate) fn finish_user_fetch(&mut self, task: TaskId) -> bool {
        self.user_task.finish_if_active(task)
    }

    pub(crate) fn sign_out(&mut self) {
        self.user = None;
        self.user_task.clear();
        self.phase = AuthPhase::RedirectingToLogin;
    }
}
