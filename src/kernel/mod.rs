//! Headless suggestion core: trigger state, word tracking, trigger characters
//! and the controller tying them to providers and a widget.

pub mod controller;
pub mod events;
pub mod fetch;
pub mod provider_registry;
pub mod quick_suggest;
pub mod services;
pub mod trigger_chars;
pub mod trigger_state;

pub use controller::{SuggestController, SuggestError, TriggerSource};
pub use events::{
    AcceptedEvent, CancelReason, CancelledEvent, SelectionChangedEvent, SuggestEvent,
    SuggestionsEvent, TriggeredEvent,
};
pub use fetch::{provide_suggestion_items, FetchError, FetchFuture, SuggestResult};
pub use provider_registry::{ProviderHandle, ProviderRegistry, RegistryChange};
pub use quick_suggest::{QuickSuggest, QuickSuggestDecision};
pub use trigger_chars::TriggerCharacterIndex;
pub use trigger_state::{
    transition, IllegalTransition, TriggerEvent, TriggerState, TriggerStateMachine,
};
