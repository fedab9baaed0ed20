use super::*;
use TriggerEvent as E;
use TriggerState as S;

const SPECIFIC: &[(S, E, S)] = &[
    (S::Idle, E::Explicit, S::LoadingExplicit),
    (S::Idle, E::TriggerCharacterTyped, S::LoadingAuto),
    (S::Idle, E::WordStarted, S::LoadingAuto),
    (S::LoadingAuto, E::ResultEmpty, S::Idle),
    (S::LoadingAuto, E::ResultIncomplete, S::ResultAutoIncomplete),
    (S::LoadingAuto, E::Result, S::ResultAuto),
    (S::ResultAuto, E::WordContinued, S::ResultAuto),
    (S::ResultAuto, E::ResultEmpty, S::Idle),
    (S::ResultAutoIncomplete, E::WordContinued, S::LoadingAuto),
    (S::LoadingExplicit, E::ResultEmpty, S::ResultExplicitEmpty),
    (S::LoadingExplicit, E::ResultIncomplete, S::ResultExplicitIncomplete),
    (S::LoadingExplicit, E::Result, S::ResultExplicit),
    (S::ResultExplicit, E::WordContinued, S::ResultExplicit),
    (S::ResultExplicit, E::ResultEmpty, S::ResultExplicitFrozen),
];

fn wildcard(event: E) -> Option<S> {
    match event {
        E::Cancel | E::WordEnded => Some(S::Idle),
        E::TriggerCharacterTyped => Some(S::LoadingAuto),
        _ => None,
    }
}

fn expected(state: S, event: E) -> Option<S> {
    SPECIFIC
        .iter()
        .find(|(s, e, _)| *s == state && *e == event)
        .map(|(_, _, next)| *next)
        .or_else(|| wildcard(event))
}

#[test]
fn every_pair_matches_the_table() {
    for state in S::ALL {
        for event in E::ALL {
            let got = transition(state, event);
            match expected(state, event) {
                Some(next) => assert_eq!(got, Ok(next), "{state:?} + {event:?}"),
                None => assert_eq!(
                    got,
                    Err(IllegalTransition { state, event }),
                    "{state:?} + {event:?} must be illegal"
                ),
            }
        }
    }
}

#[test]
fn wildcard_events_apply_from_every_state() {
    for state in S::ALL {
        assert_eq!(transition(state, E::Cancel), Ok(S::Idle));
        assert_eq!(transition(state, E::WordEnded), Ok(S::Idle));
        assert_eq!(transition(state, E::TriggerCharacterTyped), Ok(S::LoadingAuto));
    }
}

#[test]
fn automatic_session_scenario() {
    let mut machine = TriggerStateMachine::new();
    assert_eq!(machine.current(), S::Idle);
    assert_eq!(machine.advance(E::WordStarted), Ok(S::LoadingAuto));
    assert_eq!(machine.advance(E::Result), Ok(S::ResultAuto));
    assert_eq!(machine.advance(E::WordContinued), Ok(S::ResultAuto));
    assert_eq!(machine.advance(E::ResultEmpty), Ok(S::Idle));
}

#[test]
fn explicit_incomplete_rejects_word_continued() {
    let mut machine = TriggerStateMachine::new();
    assert_eq!(machine.advance(E::Explicit), Ok(S::LoadingExplicit));
    assert_eq!(machine.advance(E::ResultIncomplete), Ok(S::ResultExplicitIncomplete));

    let err = machine.advance(E::WordContinued).unwrap_err();
    assert_eq!(
        err,
        IllegalTransition {
            state: S::ResultExplicitIncomplete,
            event: E::WordContinued,
        }
    );
    assert_eq!(machine.current(), S::ResultExplicitIncomplete, "state unchanged");
    assert!(err.to_string().contains("WordContinued"));
}

#[test]
fn explicit_empty_result_freezes_instead_of_closing() {
    let mut machine = TriggerStateMachine::new();
    machine.advance(E::Explicit).unwrap();
    machine.advance(E::Result).unwrap();
    assert_eq!(machine.advance(E::ResultEmpty), Ok(S::ResultExplicitFrozen));

    let mut auto = TriggerStateMachine::new();
    auto.advance(E::WordStarted).unwrap();
    auto.advance(E::Result).unwrap();
    assert_eq!(auto.advance(E::ResultEmpty), Ok(S::Idle));
}

#[test]
fn reset_forces_idle() {
    let mut machine = TriggerStateMachine::new();
    machine.advance(E::Explicit).unwrap();
    machine.reset();
    assert_eq!(machine.current(), S::Idle);
    machine.reset();
    assert_eq!(machine.current(), S::Idle);
}

#[test]
fn state_predicates() {
    assert!(S::LoadingAuto.is_loading());
    assert!(!S::ResultAuto.is_loading());
    assert!(S::ResultExplicitFrozen.is_explicit());
    assert!(!S::ResultAutoIncomplete.is_explicit());
    assert!(S::ResultExplicitEmpty.has_result());
    assert!(!S::Idle.has_result());
}
