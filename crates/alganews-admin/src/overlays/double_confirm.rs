//! Two-stage confirmation: an inline prompt, then a modal.
//!
//! The wrapped action is released only after both stages are accepted, and
//! at most once.

use alganews_core::sdk::cash_flow::EntryType;

use crate::events::UiEvent;

/// Texts shown by both stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub pop_confirm_title: String,
    pub modal_title: String,
    pub modal_content: String,
}

impl ConfirmPrompt {
    pub fn approve_payments(count: usize) -> Self {
        let pop_confirm_title = if count == 1 {
            "Você deseja aprovar o agendamento selecionado?"
        } else {
            "Você deseja aprovar os agendamentos selecionados?"
        };
        Self {
            pop_confirm_title: pop_confirm_title.to_string(),
            modal_title: "Aprovar agendamento".to_string(),
            modal_content: "Esta é uma ação irreversível. Ao aprovar um agendamento, ele não poderá ser removido!".to_string(),
        }
    }

    pub fn remove_payment() -> Self {
        Self {
            pop_confirm_title: "Remover agendamento?".to_string(),
            modal_title: "Remover agendamento".to_string(),
            modal_content: "Esta é uma ação irreversível. Ao remover um agendamento, ele não poderá ser recuperado!".to_string(),
        }
    }

    pub fn remove_entries(entry_type: EntryType, count: usize) -> Self {
        let (singular, plural, noun) = match entry_type {
            EntryType::Expense => ("despesa selecionada?", "despesas selecionadas?", "despesas"),
            EntryType::Revenue => ("receita selecionada?", "receitas selecionadas?", "receitas"),
        };
        let target = if count > 1 { plural } else { singular };
        Self {
            pop_confirm_title: format!("Remover {target}"),
            modal_title: format!("Remover {noun}"),
            modal_content: format!(
                "Remover uma ou mais {noun} pode gerar impacto negativo no gráfico de receitas e despesas da empresa. Esta é uma ação irreversível."
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmStage {
    PopConfirm,
    Modal,
}

/// Result of accepting the current stage.
#[derive(Debug)]
pub enum ConfirmOutcome {
    /// Stage one accepted; the modal is now showing.
    Pending(DoubleConfirm),
    /// Both stages accepted; run this action.
    Confirmed(UiEvent),
}

#[derive(Debug)]
pub struct DoubleConfirm {
    pub prompt: ConfirmPrompt,
    pub stage: ConfirmStage,
    action: Box<UiEvent>,
}

impl DoubleConfirm {
    pub fn new(prompt: ConfirmPrompt, action: Box<UiEvent>) -> Self {
        Self {
            prompt,
            stage: ConfirmStage::PopConfirm,
            action,
        }
    }

    /// Title of the stage waiting for an answer.
    pub fn current_title(&self) -> &str {
        match self.stage {
            ConfirmStage::PopConfirm => &self.prompt.pop_confirm_title,
            ConfirmStage::Modal => &self.prompt.modal_title,
        }
    }

    /// Accepts the current stage. Consumes the dialog once both are accepted.
    pub fn accept(mut self) -> ConfirmOutcome {
        match self.stage {
            ConfirmStage::PopConfirm => {
                self.stage = ConfirmStage::Modal;
                ConfirmOutcome::Pending(self)
            }
            ConfirmStage::Modal => ConfirmOutcome::Confirmed(*self.action),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::PaymentEvent;

    fn approve_dialog() -> DoubleConfirm {
        DoubleConfirm::new(
            ConfirmPrompt::approve_payments(2),
            Box::new(UiEvent::Payment(PaymentEvent::ApproveBatch(vec![1, 2]))),
        )
    }

    fn accept_first_stage(dialog: DoubleConfirm) -> DoubleConfirm {
        match dialog.accept() {
            ConfirmOutcome::Pending(dialog) => dialog,
            ConfirmOutcome::Confirmed(_) => panic!("first stage must not release the action"),
        }
    }

    #[test]
    fn test_first_accept_only_shows_modal() {
        let dialog = accept_first_stage(approve_dialog());
        assert_eq!(dialog.stage, ConfirmStage::Modal);
        assert_eq!(dialog.current_title(), "Aprovar agendamento");
    }

    #[test]
    fn test_second_accept_releases_action() {
        let outcome = accept_first_stage(approve_dialog()).accept();
        assert!(matches!(
            outcome,
            ConfirmOutcome::Confirmed(UiEvent::Payment(PaymentEvent::ApproveBatch(ref ids))) if ids == &vec![1, 2]
        ));
    }

    #[test]
    fn test_prompt_texts_follow_count() {
        assert_eq!(
            ConfirmPrompt::approve_payments(1).pop_confirm_title,
            "Você deseja aprovar o agendamento selecionado?"
        );
        assert_eq!(
            ConfirmPrompt::remove_entries(EntryType::Expense, 3).pop_confirm_title,
            "Remover despesas selecionadas?"
        );
        assert_eq!(
            ConfirmPrompt::remove_entries(EntryType::Revenue, 1).modal_title,
            "Remover receitas"
        );
    }
}
