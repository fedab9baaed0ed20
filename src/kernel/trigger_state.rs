//! Trigger state machine.
//!
//! Automatic (type-ahead) lists vanish as soon as they stop being relevant,
//! explicit lists freeze instead. Every state change goes through
//! [`TriggerStateMachine::advance`] or [`TriggerStateMachine::reset`].

use std::fmt;
use std::sync::LazyLock;

use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TriggerState {
    #[default]
    Idle,
    LoadingAuto,
    ResultAuto,
    ResultAutoIncomplete,
    LoadingExplicit,
    ResultExplicit,
    ResultExplicitIncomplete,
    ResultExplicitFrozen,
    ResultExplicitEmpty,
}

impl TriggerState {
    pub const ALL: [TriggerState; 9] = [
        TriggerState::Idle,
        TriggerState::LoadingAuto,
        TriggerState::ResultAuto,
        TriggerState::ResultAutoIncomplete,
        TriggerState::LoadingExplicit,
        TriggerState::ResultExplicit,
        TriggerState::ResultExplicitIncomplete,
        TriggerState::ResultExplicitFrozen,
        TriggerState::ResultExplicitEmpty,
    ];

    pub fn is_idle(self) -> bool {
        self == TriggerState::Idle
    }

    pub fn is_loading(self) -> bool {
        matches!(
            self,
            TriggerState::LoadingAuto | TriggerState::LoadingExplicit
        )
    }

    pub fn is_explicit(self) -> bool {
        matches!(
            self,
            TriggerState::LoadingExplicit
                | TriggerState::ResultExplicit
                | TriggerState::ResultExplicitIncomplete
                | TriggerState::ResultExplicitFrozen
                | TriggerState::ResultExplicitEmpty
        )
    }

    pub fn has_result(self) -> bool {
        !self.is_idle() && !self.is_loading()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerEvent {
    Explicit,
    WordStarted,
    WordContinued,
    WordEnded,
    TriggerCharacterTyped,
    Result,
    ResultIncomplete,
    ResultEmpty,
    Cancel,
}

impl TriggerEvent {
    pub const ALL: [TriggerEvent; 9] = [
        TriggerEvent::Explicit,
        TriggerEvent::WordStarted,
        TriggerEvent::WordContinued,
        TriggerEvent::WordEnded,
        TriggerEvent::TriggerCharacterTyped,
        TriggerEvent::Result,
        TriggerEvent::ResultIncomplete,
        TriggerEvent::ResultEmpty,
        TriggerEvent::Cancel,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal suggest transition: {event:?} is not accepted in state {state:?}")]
pub struct IllegalTransition {
    pub state: TriggerState,
    pub event: TriggerEvent,
}

struct TransitionTable {
    by_state: FxHashMap<TriggerState, FxHashMap<TriggerEvent, TriggerState>>,
    wildcard: FxHashMap<TriggerEvent, TriggerState>,
}

impl TransitionTable {
    fn build() -> Self {
        use TriggerEvent as E;
        use TriggerState as S;

        let rows: [(S, &[(E, S)]); 6] = [
            (
                S::Idle,
                &[
                    (E::Explicit, S::LoadingExplicit),
                    (E::TriggerCharacterTyped, S::LoadingAuto),
                    (E::WordStarted, S::LoadingAuto),
                ],
            ),
            (
                S::LoadingAuto,
                &[
                    (E::ResultEmpty, S::Idle),
                    (E::ResultIncomplete, S::ResultAutoIncomplete),
                    (E::Result, S::ResultAuto),
                ],
            ),
            (
                S::ResultAuto,
                &[(E::WordContinued, S::ResultAuto), (E::ResultEmpty, S::Idle)],
            ),
            (S::ResultAutoIncomplete, &[(E::WordContinued, S::LoadingAuto)]),
            (
                S::LoadingExplicit,
                &[
                    (E::ResultEmpty, S::ResultExplicitEmpty),
                    (E::ResultIncomplete, S::ResultExplicitIncomplete),
                    (E::Result, S::ResultExplicit),
                ],
            ),
            (
                S::ResultExplicit,
                &[
                    (E::WordContinued, S::ResultExplicit),
                    (E::ResultEmpty, S::ResultExplicitFrozen),
                ],
            ),
        ];

        let mut by_state = FxHashMap::default();
        for (state, transitions) in rows {
            let row: FxHashMap<_, _> = transitions.iter().copied().collect();
            by_state.insert(state, row);
        }

        let wildcard = [
            (E::Cancel, S::Idle),
            (E::WordEnded, S::Idle),
            (E::TriggerCharacterTyped, S::LoadingAuto),
        ]
        .into_iter()
        .collect();

        Self { by_state, wildcard }
    }

    fn next(&self, state: TriggerState, event: TriggerEvent) -> Option<TriggerState> {
        self.by_state
            .get(&state)
            .and_then(|row| row.get(&event))
            .or_else(|| self.wildcard.get(&event))
            .copied()
    }
}

static TRANSITIONS: LazyLock<TransitionTable> = LazyLock::new(TransitionTable::build);

/// Pure table lookup: state-specific rule first, wildcard second.
pub fn transition(
    state: TriggerState,
    event: TriggerEvent,
) -> Result<TriggerState, IllegalTransition> {
    TRANSITIONS
        .next(state, event)
        .ok_or(IllegalTransition { state, event })
}

#[derive(Debug, Default)]
pub struct TriggerStateMachine {
    current: TriggerState,
}

impl TriggerStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> TriggerState {
        self.current
    }

    pub fn advance(&mut self, event: TriggerEvent) -> Result<TriggerState, IllegalTransition> {
        match transition(self.current, event) {
            Ok(next) => {
                tracing::trace!(
                    target: "suggest.trigger",
                    from = ?self.current,
                    ?event,
                    to = ?next,
                    "transition"
                );
                self.current = next;
                Ok(next)
            }
            Err(err) => {
                tracing::error!(target: "suggest.trigger", error = %err, "illegal transition");
                Err(err)
            }
        }
    }

    pub fn reset(&mut self) {
        if self.current != TriggerState::Idle {
            tracing::trace!(target: "suggest.trigger", from = ?self.current, "reset");
        }
        self.current = TriggerState::Idle;
    }
}

impl fmt::Display for TriggerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/trigger_state.rs"]
mod tests;
