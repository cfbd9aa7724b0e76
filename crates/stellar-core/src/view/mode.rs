// view/mode.rs
//
// Navigation mode state machine.
//
// Three states, all transitions allowed, Idle is initial. Every transition
// (including re-selecting the same system) emits a reset so per-system
// subsystems re-initialize. Subscribers are reached through the
// ResetListener trait and a drainable queue; the controller knows nothing
// about who listens.

use serde::{Deserialize, Serialize};

use crate::api::types::SystemId;

/// Navigation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewMode {
    /// Galaxy overview.
    #[default]
    Idle,
    /// Inspecting the selected system.
    Viewing,
    /// Composing a new system.
    Creating,
}

/// Current navigation state. `selected` is `Some` exactly when `mode == Viewing`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    mode: ViewMode,
    selected: Option<SystemId>,
}

impl ViewState {
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn selected(&self) -> Option<&SystemId> {
        self.selected.as_ref()
    }

    /// Selected id, or `""` when nothing is selected.
    pub fn selected_str(&self) -> &str {
        self.selected.as_ref().map_or("", SystemId::as_str)
    }
}

/// Reset signal emitted on every mode change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewTransition {
    pub from: ViewMode,
    pub to: ViewMode,
    /// System selected before the transition, if any.
    pub previous: Option<SystemId>,
    /// System selected after the transition, if any.
    pub current: Option<SystemId>,
}

/// Receives a fire-and-forget reset on every transition.
pub trait ResetListener {
    fn on_reset(&mut self, transition: &ViewTransition);
}

impl<F: FnMut(&ViewTransition)> ResetListener for F {
    fn on_reset(&mut self, transition: &ViewTransition) {
        self(transition)
    }
}

/// Single source of truth for the navigation mode.
#[derive(Default)]
pub struct ViewModeController {
    state: ViewState,
    listeners: Vec<Box<dyn ResetListener>>,
    /// Transitions not yet drained by the owner.
    pending: Vec<ViewTransition>,
}

impl ViewModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn mode(&self) -> ViewMode {
        self.state.mode
    }

    pub fn selected(&self) -> Option<&SystemId> {
        self.state.selected.as_ref()
    }

    /// Register a listener that is called on every transition.
    pub fn subscribe(&mut self, listener: impl ResetListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Enter `Viewing` for `id`. Always emits a reset, even for the current id.
    pub fn select_system(&mut self, id: impl Into<SystemId>) {
        self.transition(ViewMode::Viewing, Some(id.into()));
    }

    /// Return to the galaxy overview.
    pub fn go_idle(&mut self) {
        self.transition(ViewMode::Idle, None);
    }

    /// Enter system creation.
    pub fn go_create(&mut self) {
        self.transition(ViewMode::Creating, None);
    }

    /// Drain transitions emitted since the last drain.
    pub fn drain_transitions(&mut self) -> impl Iterator<Item = ViewTransition> + '_ {
        self.pending.drain(..)
    }

    fn transition(&mut self, to: ViewMode, selected: Option<SystemId>) {
        let previous = std::mem::replace(&mut self.state.selected, selected);
        let from = std::mem::replace(&mut self.state.mode, to);

        let transition = ViewTransition {
            from,
            to,
            previous,
            current: self.state.selected.clone(),
        };
        log::debug!(
            "view: {:?} -> {:?} (system: {:?})",
            transition.from,
            transition.to,
            transition.current
        );

        for listener in self.listeners.iter_mut() {
            listener.on_reset(&transition);
        }
        self.pending.push(transition);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn counting(controller: &mut ViewModeController) -> Rc<RefCell<Vec<ViewTransition>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        controller.subscribe(move |t: &ViewTransition| sink.borrow_mut().push(t.clone()));
        seen
    }

    #[test]
    fn starts_idle_without_selection() {
        let controller = ViewModeController::new();
        assert_eq!(controller.mode(), ViewMode::Idle);
        assert!(controller.selected().is_none());
        assert_eq!(controller.state().selected_str(), "");
    }

    #[test]
    fn select_system_enters_viewing() {
        let mut controller = ViewModeController::new();
        controller.select_system("alpha");
        assert_eq!(controller.mode(), ViewMode::Viewing);
        assert_eq!(controller.selected(), Some(&SystemId::new("alpha")));
        assert_eq!(controller.state().selected_str(), "alpha");
    }

    #[test]
    fn reselecting_same_system_resets_twice() {
        let mut controller = ViewModeController::new();
        let seen = counting(&mut controller);

        controller.select_system("alpha");
        controller.select_system("alpha");

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].from, ViewMode::Viewing);
        assert_eq!(seen[1].to, ViewMode::Viewing);
        assert_eq!(seen[1].previous, Some(SystemId::new("alpha")));
        assert_eq!(seen[1].current, Some(SystemId::new("alpha")));
    }

    #[test]
    fn go_idle_from_every_state() {
        let setups: [fn(&mut ViewModeController); 3] = [
            |_| {},
            |c| c.select_system("alpha"),
            |c| c.go_create(),
        ];
        for setup in setups {
            let mut controller = ViewModeController::new();
            setup(&mut controller);
            controller.go_idle();
            assert_eq!(controller.mode(), ViewMode::Idle);
            assert!(controller.selected().is_none());
            assert_eq!(controller.state().selected_str(), "");
        }
    }

    #[test]
    fn go_create_clears_selection() {
        let mut controller = ViewModeController::new();
        controller.select_system("alpha");
        controller.go_create();
        assert_eq!(controller.mode(), ViewMode::Creating);
        assert!(controller.selected().is_none());
    }

    #[test]
    fn all_transitions_emit_reset() {
        let mut controller = ViewModeController::new();
        let seen = counting(&mut controller);

        controller.go_idle(); // Idle -> Idle
        controller.go_create(); // Idle -> Creating
        controller.select_system("b"); // Creating -> Viewing
        controller.go_create(); // Viewing -> Creating
        controller.go_idle(); // Creating -> Idle
        controller.select_system("c"); // Idle -> Viewing
        controller.go_idle(); // Viewing -> Idle

        let pairs: Vec<_> = seen.borrow().iter().map(|t| (t.from, t.to)).collect();
        assert_eq!(
            pairs,
            vec![
                (ViewMode::Idle, ViewMode::Idle),
                (ViewMode::Idle, ViewMode::Creating),
                (ViewMode::Creating, ViewMode::Viewing),
                (ViewMode::Viewing, ViewMode::Creating),
                (ViewMode::Creating, ViewMode::Idle),
                (ViewMode::Idle, ViewMode::Viewing),
                (ViewMode::Viewing, ViewMode::Idle),
            ]
        );
    }

    #[test]
    fn drain_transitions_empties_queue() {
        let mut controller = ViewModeController::new();
        controller.select_system("a");
        controller.go_idle();
        assert_eq!(controller.drain_transitions().count(), 2);
        assert_eq!(controller.drain_transitions().count(), 0);
    }
}
