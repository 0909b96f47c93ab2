//! State of a list page: the edit modal, confirmations of destructive
//! actions, and the overall load status.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalState<R> {
    Closed,
    Open { mode: FormMode, record: Option<R> },
}

impl<R> Default for ModalState<R> {
    fn default() -> Self {
        ModalState::Closed
    }
}

impl<R> ModalState<R> {
    pub fn create() -> Self {
        ModalState::Open {
            mode: FormMode::Create,
            record: None,
        }
    }

    pub fn edit(record: R) -> Self {
        ModalState::Open {
            mode: FormMode::Edit,
            record: Some(record),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open { .. })
    }
}

/// An action that needs confirming before it is sent.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction<R> {
    Delete(R),
    ToggleStatus(R),
    ToggleFeatured(R),
}

impl<R> PendingAction<R> {
    pub fn record(&self) -> &R {
        match self {
            PendingAction::Delete(record)
            | PendingAction::ToggleStatus(record)
            | PendingAction::ToggleFeatured(record) => record,
        }
    }
}

/// Confirmation dialog of one list page.
///
/// While a request is in flight the dialog can neither be submitted again
/// nor dismissed; a failure re-enables it with the error shown.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmFlow<R> {
    pub pending: Option<PendingAction<R>>,
    pub in_flight: bool,
    pub error: Option<String>,
}

impl<R> Default for ConfirmFlow<R> {
    fn default() -> Self {
        Self {
            pending: None,
            in_flight: false,
            error: None,
        }
    }
}

impl<R: Clone> ConfirmFlow<R> {
    pub fn ask(action: PendingAction<R>) -> Self {
        Self {
            pending: Some(action),
            in_flight: false,
            error: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// Start the request. Returns the action to send, or `None` if there is
    /// nothing to confirm or a request is already running.
    pub fn submit(&self) -> Option<(Self, PendingAction<R>)> {
        if self.in_flight {
            return None;
        }
        let action = self.pending.clone()?;
        let next = Self {
            pending: Some(action.clone()),
            in_flight: true,
            error: None,
        };
        Some((next, action))
    }

    pub fn failed(&self, message: impl Into<String>) -> Self {
        Self {
            pending: self.pending.clone(),
            in_flight: false,
            error: Some(message.into()),
        }
    }

    /// Dismiss the dialog. Ignored while the request is in flight.
    pub fn cancel(&self) -> Self {
        if self.in_flight {
            return self.clone();
        }
        Self::default()
    }

    pub fn finished() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus {
    Idle,
    Loading,
    Loaded,
    Errored,
}

impl ListStatus {
    pub fn of(is_loading: bool, has_data: bool, has_error: bool) -> Self {
        match (is_loading, has_error, has_data) {
            (true, _, _) => ListStatus::Loading,
            (false, true, _) => ListStatus::Errored,
            (false, false, true) => ListStatus::Loaded,
            (false, false, false) => ListStatus::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirming_sends_once() {
        let flow = ConfirmFlow::ask(PendingAction::Delete("psi"));
        let (flow, action) = flow.submit().unwrap();
        assert_eq!(action, PendingAction::Delete("psi"));
        assert!(flow.in_flight);

        // A second click while the request runs sends nothing
        assert!(flow.submit().is_none());
        // Nor can the dialog be dismissed
        assert_eq!(flow.cancel(), flow);
    }

    #[test]
    fn cancelling_sends_nothing() {
        let flow = ConfirmFlow::ask(PendingAction::ToggleStatus("psi"));
        let flow = flow.cancel();
        assert!(!flow.is_open());
        assert!(flow.submit().is_none());
    }

    #[test]
    fn failure_reenables_the_dialog() {
        let (flow, _) = ConfirmFlow::ask(PendingAction::Delete(1))
            .submit()
            .unwrap();
        let flow = flow.failed("Exam type is in use");
        assert!(!flow.in_flight);
        assert!(flow.is_open());
        assert_eq!(flow.error.as_deref(), Some("Exam type is in use"));

        let (retry, _) = flow.submit().unwrap();
        assert!(retry.error.is_none());
    }

    #[test]
    fn modal_modes() {
        let modal: ModalState<u8> = ModalState::default();
        assert!(!modal.is_open());
        assert_eq!(
            ModalState::edit(3),
            ModalState::Open {
                mode: FormMode::Edit,
                record: Some(3)
            }
        );
        assert!(ModalState::<u8>::create().is_open());
    }

    #[test]
    fn list_status_follows_the_fetch() {
        assert_eq!(ListStatus::of(false, false, false), ListStatus::Idle);
        assert_eq!(ListStatus::of(true, false, false), ListStatus::Loading);
        assert_eq!(ListStatus::of(true, true, false), ListStatus::Loading);
        assert_eq!(ListStatus::of(false, true, false), ListStatus::Loaded);
        assert_eq!(ListStatus::of(false, true, true), ListStatus::Errored);
    }
}
