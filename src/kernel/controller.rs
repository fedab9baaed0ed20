//! Suggest controller.
//!
//! Owns at most one active fetch. Every fetch is tagged with an epoch when it
//! is dispatched; a result whose epoch is not the active one is dropped
//! without publishing anything. Fetch outcomes come back over a channel and
//! are applied in [`SuggestController::tick`], which also fires the quick
//! suggest deadline.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::time::Instant;

use compact_str::CompactString;

use crate::core::{DisposableStore, Emitter, Subscription};
use crate::kernel::events::{
    AcceptedEvent, CancelReason, CancelledEvent, SelectionChangedEvent, SuggestEvent,
    SuggestionsEvent, TriggeredEvent,
};
use crate::kernel::fetch::{provide_suggestion_items, FetchError, FetchFuture, SuggestResult};
use crate::kernel::provider_registry::{ProviderHandle, ProviderRegistry};
use crate::kernel::quick_suggest::{QuickSuggest, QuickSuggestDecision};
use crate::kernel::services::adapters::PrefixFilter;
use crate::kernel::services::ports::{
    AsyncExecutor, CursorChange, EditorEvent, EditorHost, SuggestFilter, SuggestInsertion,
    SuggestItem, SuggestWidget,
};
use crate::kernel::trigger_chars::TriggerCharacterIndex;
use crate::kernel::trigger_state::{
    IllegalTransition, TriggerEvent, TriggerState, TriggerStateMachine,
};
use crate::models::{DocumentSnapshot, Position, Word};

const MAX_FETCH_DRAIN_PER_TICK: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SuggestError {
    #[error(transparent)]
    IllegalTransition(#[from] IllegalTransition),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    Explicit,
    QuickSuggest,
    TriggerCharacter(char),
    /// Continued typing over an incomplete automatic list.
    IncompleteRefetch,
}

impl TriggerSource {
    pub fn is_automatic(self) -> bool {
        !matches!(self, TriggerSource::Explicit)
    }
}

#[derive(Debug)]
struct ActiveFetch {
    epoch: u64,
    position: Position,
    is_automatic: bool,
    scope: Option<Vec<ProviderHandle>>,
}

#[derive(Debug)]
struct Session {
    position: Position,
    is_automatic: bool,
    scope: Option<Vec<ProviderHandle>>,
    all_items: Vec<SuggestItem>,
    items: Vec<SuggestItem>,
    prefix: CompactString,
    incomplete: bool,
}

struct FetchSettled {
    epoch: u64,
    result: Result<SuggestResult, FetchError>,
}

pub struct SuggestController {
    host: Box<dyn EditorHost>,
    widget: Box<dyn SuggestWidget>,
    insertion: Box<dyn SuggestInsertion>,
    filter: Box<dyn SuggestFilter>,
    executor: Arc<dyn AsyncExecutor>,
    registry: Rc<ProviderRegistry>,

    state: TriggerStateMachine,
    trigger_chars: TriggerCharacterIndex,
    index_dirty: Rc<Cell<bool>>,
    quick_suggest: QuickSuggest,

    epoch: u64,
    active: Option<ActiveFetch>,
    session: Option<Session>,
    tx: Sender<FetchSettled>,
    rx: Receiver<FetchSettled>,

    events: Emitter<SuggestEvent>,
    subscriptions: DisposableStore,
    disposed: bool,
}

impl SuggestController {
    pub fn new(
        host: Box<dyn EditorHost>,
        widget: Box<dyn SuggestWidget>,
        insertion: Box<dyn SuggestInsertion>,
        registry: Rc<ProviderRegistry>,
        executor: Arc<dyn AsyncExecutor>,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        let index_dirty = Rc::new(Cell::new(true));

        let mut subscriptions = DisposableStore::new();
        let dirty = Rc::clone(&index_dirty);
        subscriptions.add(registry.on_did_change(move |change| {
            tracing::debug!(target: "suggest.registry", ?change, "providers changed");
            dirty.set(true);
        }));

        Self {
            host,
            widget,
            insertion,
            filter: Box::new(PrefixFilter),
            executor,
            registry,
            state: TriggerStateMachine::new(),
            trigger_chars: TriggerCharacterIndex::new(),
            index_dirty,
            quick_suggest: QuickSuggest::new(),
            epoch: 0,
            active: None,
            session: None,
            tx,
            rx,
            events: Emitter::new(),
            subscriptions,
            disposed: false,
        }
    }

    pub fn with_filter(mut self, filter: impl SuggestFilter + 'static) -> Self {
        self.filter = Box::new(filter);
        self
    }

    pub fn state(&self) -> TriggerState {
        self.state.current()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn has_active_fetch(&self) -> bool {
        self.active.is_some()
    }

    /// Items of the list currently shown, if any.
    pub fn visible_items(&self) -> Option<&[SuggestItem]> {
        self.session.as_ref().map(|session| session.items.as_slice())
    }

    pub fn pending_quick_suggest(&self) -> Option<Instant> {
        self.quick_suggest.deadline()
    }

    pub fn tracked_word(&self) -> Option<&Word> {
        self.quick_suggest.tracked()
    }

    pub fn events(&self) -> &Emitter<SuggestEvent> {
        &self.events
    }

    #[must_use = "dropping the subscription removes the listener"]
    pub fn subscribe(&self, listener: impl FnMut(&SuggestEvent) + 'static) -> Subscription {
        self.events.subscribe(listener)
    }

    pub fn handle_editor_event(&mut self, event: EditorEvent) -> Result<(), SuggestError> {
        if self.disposed {
            return Ok(());
        }
        match event {
            EditorEvent::ConfigurationChanged | EditorEvent::LanguageChanged => {
                self.index_dirty.set(true);
                Ok(())
            }
            EditorEvent::ModelChanged => {
                self.index_dirty.set(true);
                self.quick_suggest.clear();
                self.close_session(CancelReason::ModelChanged, TriggerEvent::Cancel)
            }
            EditorEvent::CursorChanged(change) => self.on_cursor_change(change, Instant::now()),
            EditorEvent::Typed(ch) => self.on_typed(ch),
        }
    }

    pub fn on_cursor_change(
        &mut self,
        change: CursorChange,
        now: Instant,
    ) -> Result<(), SuggestError> {
        if self.disposed {
            return Ok(());
        }
        let document = self.host.document();
        let config = self.host.config();

        match self
            .quick_suggest
            .on_cursor_change(&change, document.as_ref(), &config, now)
        {
            QuickSuggestDecision::Cancel => {
                self.close_session(CancelReason::WordEnded, TriggerEvent::WordEnded)
            }
            QuickSuggestDecision::Disabled => {
                self.close_session(CancelReason::Disabled, TriggerEvent::Cancel)
            }
            QuickSuggestDecision::Continued(word) => self.on_word_continued(&word),
            QuickSuggestDecision::Scheduled { .. } => {
                self.close_session(CancelReason::WordEnded, TriggerEvent::WordEnded)
            }
        }
    }

    pub fn on_typed(&mut self, ch: char) -> Result<(), SuggestError> {
        if self.disposed {
            return Ok(());
        }
        self.rebuild_index_if_dirty();

        let Some(providers) = self.trigger_chars.providers_for(ch).map(<[_]>::to_vec) else {
            return Ok(());
        };
        let Some(document) = self.host.document() else {
            return Ok(());
        };
        let position = self.host.cursor();
        let config = self.host.config();

        tracing::debug!(
            target: "suggest.trigger_chars",
            %ch,
            providers = providers.len(),
            "trigger character typed"
        );

        self.quick_suggest.cancel_pending();
        self.quick_suggest.track(Word::anchor(position));
        let fetch =
            provide_suggestion_items(&document, position, config.snippet_suggestions, &providers);
        self.start(
            TriggerSource::TriggerCharacter(ch),
            position,
            fetch,
            Some(providers),
        )
    }

    /// Starts a fetch whose result will be shown for `position`, superseding
    /// any fetch still in flight.
    pub fn trigger(
        &mut self,
        position: Position,
        is_automatic: bool,
        fetch: FetchFuture,
    ) -> Result<(), SuggestError> {
        if self.disposed {
            return Ok(());
        }
        let source = if is_automatic {
            TriggerSource::QuickSuggest
        } else {
            TriggerSource::Explicit
        };
        self.quick_suggest.cancel_pending();
        if let Some(document) = self.host.document() {
            self.track_word_at(&document, position);
        }
        self.start(source, position, fetch, None)
    }

    /// Explicit invocation: asks every applicable provider at the cursor.
    pub fn trigger_suggest(&mut self) -> Result<(), SuggestError> {
        if self.disposed {
            return Ok(());
        }
        let Some(document) = self.host.document() else {
            tracing::debug!(target: "suggest.trigger", "explicit suggest without a document");
            return Ok(());
        };
        let position = self.host.cursor();
        let config = self.host.config();

        self.quick_suggest.cancel_pending();
        self.track_word_at(&document, position);
        let providers = self.registry.providers_for(document.language_id());
        let fetch =
            provide_suggestion_items(&document, position, config.snippet_suggestions, &providers);
        self.start(TriggerSource::Explicit, position, fetch, None)
    }

    /// Applies settled fetches and fires an elapsed quick suggest deadline.
    /// Returns whether anything was published.
    pub fn tick(&mut self, now: Instant) -> Result<bool, SuggestError> {
        if self.disposed {
            return Ok(false);
        }
        self.rebuild_index_if_dirty();

        let mut changed = false;
        let mut drained = 0usize;
        while drained < MAX_FETCH_DRAIN_PER_TICK {
            match self.rx.try_recv() {
                Ok(settled) => {
                    drained += 1;
                    changed |= self.on_fetch_settled(settled)?;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if self.quick_suggest.poll(now) {
            changed |= self.fire_quick_suggest()?;
        }

        Ok(changed)
    }

    pub fn accept_selected_suggestion(&mut self) -> Result<(), SuggestError> {
        if self.disposed {
            return Ok(());
        }
        let Some(focused) = self.widget.focused_item() else {
            return self.cancel();
        };

        let prefix_len = self.current_prefix().chars().count();
        let overwrite_before = focused.item.overwrite_before.unwrap_or(prefix_len);
        let overwrite_after = focused.item.overwrite_after.unwrap_or(0);
        tracing::debug!(
            target: "suggest.accept",
            label = %focused.item.label,
            index = focused.index,
            overwrite_before,
            overwrite_after,
            "suggestion accepted"
        );

        self.insertion
            .insert(&focused.item, overwrite_before, overwrite_after);
        self.publish(SuggestEvent::Accepted(AcceptedEvent {
            item: focused.item,
            overwrite_before,
            overwrite_after,
        }));

        self.quick_suggest.clear();
        self.close_session(CancelReason::Accepted, TriggerEvent::Cancel)
    }

    /// Cancels the session: state back to idle, pending work dropped, widget told.
    pub fn cancel(&mut self) -> Result<(), SuggestError> {
        if self.disposed {
            return Ok(());
        }
        self.quick_suggest.clear();
        self.close_session(CancelReason::Requested, TriggerEvent::Cancel)
    }

    /// Hides the widget only; the trigger state is left alone.
    pub fn cancel_suggest_widget(&mut self) {
        if !self.disposed {
            self.widget.hide();
        }
    }

    pub fn select_next(&mut self) {
        if self.has_visible_list() {
            self.widget.select_next();
        }
    }

    pub fn select_previous(&mut self) {
        if self.has_visible_list() {
            self.widget.select_previous();
        }
    }

    pub fn select_next_page(&mut self) {
        if self.has_visible_list() {
            self.widget.select_next_page();
        }
    }

    pub fn select_previous_page(&mut self) {
        if self.has_visible_list() {
            self.widget.select_previous_page();
        }
    }

    pub fn toggle_suggestion_details(&mut self) {
        if self.has_visible_list() {
            self.widget.toggle_details();
        }
    }

    /// Selection-change notification from the widget.
    pub fn on_widget_selection_changed(&mut self, index: usize) {
        if self.disposed {
            return;
        }
        let item = self
            .session
            .as_ref()
            .and_then(|session| session.items.get(index).cloned());
        self.publish(SuggestEvent::SelectionChanged(SelectionChangedEvent {
            index,
            item,
        }));
    }

    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        self.subscriptions.dispose();
        self.events.clear();
        self.state.reset();
        self.active = None;
        self.session = None;
        self.quick_suggest.clear();
        self.trigger_chars.clear();
        while self.rx.try_recv().is_ok() {}
        self.widget.dispose();

        tracing::debug!(target: "suggest.controller", "suggest controller disposed");
    }

    fn has_visible_list(&self) -> bool {
        !self.disposed && self.session.is_some() && self.widget.is_visible()
    }

    fn advance(&mut self, event: TriggerEvent) -> Result<TriggerState, SuggestError> {
        Ok(self.state.advance(event)?)
    }

    fn rebuild_index_if_dirty(&mut self) {
        if !self.index_dirty.replace(false) {
            return;
        }
        let config = self.host.config();
        let document = self.host.document();
        self.trigger_chars.rebuild(
            &config,
            document.as_ref(),
            self.host.is_read_only(),
            &self.registry,
        );
    }

    fn track_word_at(&mut self, document: &DocumentSnapshot, position: Position) {
        let word = Word::at(document, position).unwrap_or_else(|| Word::anchor(position));
        self.quick_suggest.track(word);
    }

    fn current_prefix(&self) -> CompactString {
        self.host
            .document()
            .and_then(|document| Word::at(&document, self.host.cursor()))
            .map(|word| word.text)
            .unwrap_or_default()
    }

    fn start(
        &mut self,
        source: TriggerSource,
        position: Position,
        fetch: FetchFuture,
        scope: Option<Vec<ProviderHandle>>,
    ) -> Result<(), SuggestError> {
        let state = self.state.current();
        match source {
            TriggerSource::Explicit => {
                if !state.is_idle() {
                    self.advance(TriggerEvent::Cancel)?;
                }
                self.advance(TriggerEvent::Explicit)?;
            }
            TriggerSource::QuickSuggest => {
                if !state.is_idle() {
                    self.advance(TriggerEvent::Cancel)?;
                }
                self.advance(TriggerEvent::WordStarted)?;
            }
            TriggerSource::TriggerCharacter(_) => {
                self.advance(TriggerEvent::TriggerCharacterTyped)?;
            }
            TriggerSource::IncompleteRefetch => {}
        }

        let retrigger = self.active.is_some() || self.session.is_some() || self.widget.is_visible();
        self.epoch = self.epoch.wrapping_add(1);
        let epoch = self.epoch;
        let is_automatic = source.is_automatic();

        let superseded = self.active.replace(ActiveFetch {
            epoch,
            position,
            is_automatic,
            scope,
        });
        if let Some(previous) = superseded {
            tracing::debug!(
                target: "suggest.fetch",
                superseded = previous.epoch,
                epoch,
                "fetch superseded"
            );
        }
        tracing::debug!(target: "suggest.fetch", epoch, ?source, %position, "fetch started");

        let trigger_character = match source {
            TriggerSource::TriggerCharacter(ch) => Some(ch),
            _ => None,
        };
        self.publish(SuggestEvent::Triggered(TriggeredEvent {
            position,
            is_automatic,
            retrigger,
            trigger_character,
        }));

        let tx = self.tx.clone();
        self.executor.spawn(Box::pin(async move {
            let result = fetch.await;
            let _ = tx.send(FetchSettled { epoch, result });
        }));
        Ok(())
    }

    fn fire_quick_suggest(&mut self) -> Result<bool, SuggestError> {
        let Some(document) = self.host.document() else {
            return Ok(false);
        };
        let config = self.host.config();
        if config.quick_suggestions_delay().is_none() {
            return Ok(false);
        }
        let position = self.host.cursor();
        let providers = self.registry.providers_for(document.language_id());
        let fetch =
            provide_suggestion_items(&document, position, config.snippet_suggestions, &providers);
        self.start(TriggerSource::QuickSuggest, position, fetch, None)?;
        Ok(true)
    }

    fn on_fetch_settled(&mut self, settled: FetchSettled) -> Result<bool, SuggestError> {
        let FetchSettled { epoch, result } = settled;
        let Some(active) = self.active.take_if(|active| active.epoch == epoch) else {
            tracing::debug!(
                target: "suggest.fetch",
                epoch,
                latest = self.epoch,
                "discarding superseded fetch result"
            );
            return Ok(false);
        };

        let result = match result {
            Ok(result) => result,
            Err(err) => {
                tracing::debug!(target: "suggest.fetch", epoch, error = %err, "fetch failed");
                self.session = None;
                self.advance(TriggerEvent::Cancel)?;
                self.publish(SuggestEvent::Cancelled(CancelledEvent {
                    reason: CancelReason::FetchFailed,
                }));
                return Ok(true);
            }
        };

        if self.host.document().is_none() || self.host.cursor().line != active.position.line {
            tracing::debug!(target: "suggest.fetch", epoch, "cursor left the trigger line");
            self.session = None;
            self.advance(TriggerEvent::Cancel)?;
            self.publish(SuggestEvent::Cancelled(CancelledEvent {
                reason: CancelReason::WordEnded,
            }));
            return Ok(true);
        }

        let prefix = self.current_prefix();
        let items = self.filter.filter(&result.items, &prefix);
        let event = if items.is_empty() {
            TriggerEvent::ResultEmpty
        } else if result.incomplete {
            TriggerEvent::ResultIncomplete
        } else {
            TriggerEvent::Result
        };
        let state = self.advance(event)?;
        tracing::debug!(
            target: "suggest.fetch",
            epoch,
            fetched = result.items.len(),
            shown = items.len(),
            ?state,
            "fetch applied"
        );

        if state.is_idle() {
            self.session = None;
            self.publish(SuggestEvent::Cancelled(CancelledEvent {
                reason: CancelReason::NoSuggestions,
            }));
            return Ok(true);
        }

        self.session = Some(Session {
            position: active.position,
            is_automatic: active.is_automatic,
            scope: active.scope,
            all_items: result.items,
            items,
            prefix,
            incomplete: result.incomplete,
        });
        self.publish_suggestions(false);
        Ok(true)
    }

    fn on_word_continued(&mut self, word: &Word) -> Result<(), SuggestError> {
        match self.state.current() {
            TriggerState::ResultAuto | TriggerState::ResultExplicit => {
                self.advance(TriggerEvent::WordContinued)?;
                self.refilter()
            }
            TriggerState::ResultAutoIncomplete => {
                let Some(document) = self.host.document() else {
                    return self.close_session(CancelReason::WordEnded, TriggerEvent::WordEnded);
                };
                tracing::debug!(target: "suggest.fetch", word = %word.text, "refetching incomplete list");
                self.advance(TriggerEvent::WordContinued)?;
                self.refetch(&document, TriggerSource::IncompleteRefetch)
            }
            TriggerState::ResultExplicitIncomplete => {
                let Some(document) = self.host.document() else {
                    return self.close_session(CancelReason::WordEnded, TriggerEvent::WordEnded);
                };
                tracing::debug!(target: "suggest.fetch", word = %word.text, "refetching incomplete explicit list");
                self.refetch(&document, TriggerSource::Explicit)
            }
            TriggerState::Idle
            | TriggerState::LoadingAuto
            | TriggerState::LoadingExplicit
            | TriggerState::ResultExplicitFrozen
            | TriggerState::ResultExplicitEmpty => Ok(()),
        }
    }

    fn refetch(
        &mut self,
        document: &DocumentSnapshot,
        source: TriggerSource,
    ) -> Result<(), SuggestError> {
        let position = self.host.cursor();
        let config = self.host.config();
        let scope = self.session.as_ref().and_then(|session| session.scope.clone());
        let fetch = match &scope {
            Some(providers) => {
                provide_suggestion_items(document, position, config.snippet_suggestions, providers)
            }
            None => {
                let providers = self.registry.providers_for(document.language_id());
                provide_suggestion_items(document, position, config.snippet_suggestions, &providers)
            }
        };
        self.start(source, position, fetch, scope)
    }

    fn refilter(&mut self) -> Result<(), SuggestError> {
        let prefix = self.current_prefix();
        let items = match self.session.as_ref() {
            Some(session) => self.filter.filter(&session.all_items, &prefix),
            None => return Ok(()),
        };

        if !items.is_empty() {
            if let Some(session) = self.session.as_mut() {
                session.items = items;
                session.prefix = prefix;
            }
            self.publish_suggestions(false);
            return Ok(());
        }

        match self.advance(TriggerEvent::ResultEmpty)? {
            TriggerState::Idle => {
                self.session = None;
                self.publish(SuggestEvent::Cancelled(CancelledEvent {
                    reason: CancelReason::NoSuggestions,
                }));
            }
            _ => {
                // Frozen: the last non-empty list stays on screen.
                if let Some(session) = self.session.as_mut() {
                    session.prefix = prefix;
                }
                self.publish_suggestions(true);
            }
        }
        Ok(())
    }

    fn close_session(
        &mut self,
        reason: CancelReason,
        event: TriggerEvent,
    ) -> Result<(), SuggestError> {
        let had_session = !self.state.current().is_idle()
            || self.active.is_some()
            || self.session.is_some()
            || self.widget.is_visible();
        if !self.state.current().is_idle() {
            self.advance(event)?;
        }
        if let Some(active) = self.active.take() {
            tracing::debug!(target: "suggest.fetch", epoch = active.epoch, ?reason, "fetch abandoned");
        }
        self.session = None;
        if had_session {
            self.publish(SuggestEvent::Cancelled(CancelledEvent { reason }));
        }
        Ok(())
    }

    fn publish_suggestions(&mut self, frozen: bool) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let event = SuggestionsEvent {
            position: session.position,
            prefix: session.prefix.clone(),
            items: session.items.clone(),
            incomplete: session.incomplete,
            is_automatic: session.is_automatic,
            frozen,
        };
        self.publish(SuggestEvent::SuggestionsAvailable(event));
    }

    fn publish(&mut self, event: SuggestEvent) {
        match &event {
            SuggestEvent::Triggered(e) => self.widget.show_triggered(e),
            SuggestEvent::SuggestionsAvailable(e) => self.widget.show_suggestions(e),
            SuggestEvent::Cancelled(e) => self.widget.show_did_cancel(e),
            SuggestEvent::Accepted(_) | SuggestEvent::SelectionChanged(_) => {}
        }
        self.events.fire(&event);
    }
}

impl Drop for SuggestController {
    fn drop(&mut self) {
        self.dispose();
    }
}
