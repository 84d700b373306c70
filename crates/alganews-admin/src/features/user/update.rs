use tracing::warn;

use super::UserState;
use crate::actions::ActionId;
use crate::common::TaskSeq;
use crate::effects::{ApiCall, UiEffect};
use crate::events::UserEvent;
use crate::mutations::StateMutation;
use crate::ui::Notification;

pub fn handle_user_event(
    users: &mut UserState,
    tasks: &mut TaskSeq,
    event: UserEvent,
) -> (Vec<UiEffect>, Vec<StateMutation>) {
    match event {
        UserEvent::Fetch => (vec![fetch_users(users, tasks)], vec![]),
        UserEvent::ListLoaded { task, result } => {
            users.list.finish_fetch(task, result);
            (vec![], vec![])
        }
        UserEvent::FetchDetail { id } => {
            let task = users.detail.begin(tasks);
            (vec![UiEffect::api(ApiCall::FetchUser { task, id })], vec![])
        }
        UserEvent::DetailLoaded { task, result } => {
            users.detail.finish(task, result);
            (vec![], vec![])
        }
        UserEvent::Create(input) => {
            users.list.begin_mutation();
            (vec![UiEffect::api(ApiCall::CreateUser { input })], vec![])
        }
        UserEvent::Update { id, input } => {
            users.list.begin_mutation();
            (vec![UiEffect::api(ApiCall::UpdateUser { id, input })], vec![])
        }
        UserEvent::ToggleStatus { id } => {
            let Some(user) = users.list.list.iter().find(|user| user.id == id) else {
                warn!(id, "toggle status of a user not in the list");
                return (vec![], vec![]);
            };
            let active = !user.active;
            users.list.begin_mutation();
            (
                vec![UiEffect::api(ApiCall::SetUserActive { id, active })],
                vec![],
            )
        }
        UserEvent::Mutated { action, result } => {
            users.list.finish_mutation();
            if result.is_err() {
                return (vec![], vec![]);
            }
            let mutations = match action {
                ActionId::CreateUser => vec![StateMutation::Notify(Notification::success(
                    "Usuário cadastrado com sucesso",
                ))],
                ActionId::UpdateUser => vec![StateMutation::Notify(Notification::success(
                    "Usuário atualizado com sucesso",
                ))],
                _ => vec![],
            };
            (vec![fetch_users(users, tasks)], mutations)
        }
    }
}

fn fetch_users(users: &mut UserState, tasks: &mut TaskSeq) -> UiEffect {
    let (task, ()) = users.list.begin_fetch(tasks);
    UiEffect::api(ApiCall::FetchUsers { task })
}

#[cfg(test)]
mod tests {
    use alganews_core::sdk::ApiError;
    use alganews_core::sdk::user::{Role, UserSummary};

    use super::*;

    fn user(id: u64, role: Role, active: bool) -> UserSummary {
        UserSummary {
            id,
            name: format!("user {id}"),
            email: format!("user{id}@alganews.com"),
            role,
            active,
            created_at: None,
            avatar_urls: None,
        }
    }

    fn fetch_count(effects: &[UiEffect]) -> usize {
        effects
            .iter()
            .filter(|e| matches!(e, UiEffect::Api(ApiCall::FetchUsers { .. })))
            .count()
    }

    #[test]
    fn test_list_loaded_replaces_list() {
        let mut users = UserState::default();
        let mut tasks = TaskSeq::default();

        let (effects, _) = handle_user_event(&mut users, &mut tasks, UserEvent::Fetch);
        let Some(UiEffect::Api(ApiCall::FetchUsers { task })) = effects.into_iter().next() else {
            panic!("expected a users fetch");
        };
        assert!(users.list.fetching);

        let loaded = vec![user(2, Role::Editor, true), user(1, Role::Manager, true)];
        handle_user_event(
            &mut users,
            &mut tasks,
            UserEvent::ListLoaded {
                task,
                result: Ok(loaded.clone()),
            },
        );

        assert!(!users.list.fetching);
        assert_eq!(users.list.list, loaded);
        assert_eq!(users.editors().len(), 1);
    }

    #[test]
    fn test_toggle_status_inverts_active() {
        let mut users = UserState::default();
        let mut tasks = TaskSeq::default();
        users.list.list = vec![user(5, Role::Editor, true)];

        let (effects, _) =
            handle_user_event(&mut users, &mut tasks, UserEvent::ToggleStatus { id: 5 });

        assert!(matches!(
            effects.as_slice(),
            [UiEffect::Api(ApiCall::SetUserActive { id: 5, active: false })]
        ));
    }

    #[test]
    fn test_successful_mutation_refetches_once() {
        let mut users = UserState::default();
        let mut tasks = TaskSeq::default();

        let (effects, mutations) = handle_user_event(
            &mut users,
            &mut tasks,
            UserEvent::Mutated {
                action: ActionId::ToggleUserStatus,
                result: Ok(()),
            },
        );

        assert_eq!(fetch_count(&effects), 1);
        assert!(mutations.is_empty());
    }

    #[test]
    fn test_failed_mutation_does_not_refetch() {
        let mut users = UserState::default();
        let mut tasks = TaskSeq::default();
        users.list.begin_mutation();

        let (effects, _) = handle_user_event(
            &mut users,
            &mut tasks,
            UserEvent::Mutated {
                action: ActionId::CreateUser,
                result: Err(ApiError::from_response(400, "")),
            },
        );

        assert_eq!(fetch_count(&effects), 0);
        assert!(!users.list.fetching);
    }
}
