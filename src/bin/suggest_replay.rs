use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use ropey::Rope;
use zcode_suggest::kernel::services::adapters::{load_suggest_config, SuggestRuntime};
use zcode_suggest::kernel::services::ports::{
    CursorChange, EditorEvent, EditorHost, FocusedItem, ProviderFuture, ProviderSuggestions,
    SuggestConfig, SuggestInsertion, SuggestItem, SuggestKind, SuggestProvider, SuggestWidget,
};
use zcode_suggest::kernel::{
    CancelledEvent, ProviderRegistry, SuggestController, SuggestEvent, SuggestionsEvent,
    TriggeredEvent,
};
use zcode_suggest::logging;
use zcode_suggest::models::{DocumentSnapshot, Position};

const SETTLE_TIMEOUT: Duration = Duration::from_millis(500);
const POLL_INTERVAL: Duration = Duration::from_millis(2);

const KEYWORDS: &[&str] = &[
    "fn", "for", "format", "from", "let", "loop", "match", "mut", "return", "self", "struct",
];
const MEMBERS: &[&str] = &["clone", "collect", "filter", "iter", "len", "map", "push"];

struct Options {
    delay: Option<i64>,
    explicit: bool,
    accept: bool,
    log_dir: Option<PathBuf>,
    settings: Option<PathBuf>,
    input: String,
}

fn parse_args() -> Options {
    let mut options = Options {
        delay: None,
        explicit: false,
        accept: false,
        log_dir: None,
        settings: None,
        input: String::new(),
    };
    for arg in std::env::args().skip(1) {
        if let Some(value) = arg.strip_prefix("--delay=") {
            options.delay = value.parse().ok();
        } else if let Some(value) = arg.strip_prefix("--log-dir=") {
            options.log_dir = Some(PathBuf::from(value));
        } else if let Some(value) = arg.strip_prefix("--settings=") {
            options.settings = Some(PathBuf::from(value));
        } else if arg == "--explicit" {
            options.explicit = true;
        } else if arg == "--accept" {
            options.accept = true;
        } else {
            options.input = arg;
        }
    }
    if options.input.is_empty() {
        options.input = "let v = items.it".to_string();
    }
    options
}

struct ReplayBuffer {
    rope: Rope,
    cursor: Position,
    version: u64,
    config: SuggestConfig,
}

impl ReplayBuffer {
    fn char_index(&self, position: Position) -> usize {
        self.rope.line_to_char(position.line) + position.column
    }

    fn type_char(&mut self, ch: char) {
        let at = self.char_index(self.cursor);
        self.rope.insert_char(at, ch);
        self.version += 1;
        self.cursor = if ch == '\n' {
            Position::new(self.cursor.line + 1, 0)
        } else {
            Position::new(self.cursor.line, self.cursor.column + 1)
        };
    }

    fn replace_around_cursor(&mut self, before: usize, after: usize, text: &str) {
        let before = before.min(self.cursor.column);
        let start = self.char_index(self.cursor) - before;
        let line_end = self.rope.line_to_char(self.cursor.line)
            + self.rope.line(self.cursor.line).len_chars();
        let end = (self.char_index(self.cursor) + after).min(line_end);
        self.rope.remove(start..end);
        self.rope.insert(start, text);
        self.version += 1;
        self.cursor = Position::new(
            self.cursor.line,
            self.cursor.column - before + text.chars().count(),
        );
    }
}

struct ReplayHost(Rc<RefCell<ReplayBuffer>>);

impl EditorHost for ReplayHost {
    fn document(&self) -> Option<DocumentSnapshot> {
        let buffer = self.0.borrow();
        Some(DocumentSnapshot::from_rope(buffer.rope.clone(), "rust").with_version(buffer.version))
    }

    fn cursor(&self) -> Position {
        self.0.borrow().cursor
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn config(&self) -> SuggestConfig {
        self.0.borrow().config.clone()
    }
}

struct ReplayInsertion(Rc<RefCell<ReplayBuffer>>);

impl SuggestInsertion for ReplayInsertion {
    fn insert(&mut self, item: &SuggestItem, overwrite_before: usize, overwrite_after: usize) {
        self.0
            .borrow_mut()
            .replace_around_cursor(overwrite_before, overwrite_after, &item.insert_text);
    }
}

/// Keeps the shown list and selection so accept has something to pick.
#[derive(Default)]
struct PrintingWidget {
    items: Vec<SuggestItem>,
    selected: usize,
    visible: bool,
    details: bool,
}

impl PrintingWidget {
    fn move_selection(&mut self, delta: isize) {
        if self.items.is_empty() {
            return;
        }
        let len = self.items.len() as isize;
        self.selected = (self.selected as isize + delta).rem_euclid(len) as usize;
    }
}

impl SuggestWidget for PrintingWidget {
    fn show_triggered(&mut self, event: &TriggeredEvent) {
        if !event.retrigger {
            self.items.clear();
            self.selected = 0;
        }
        self.visible = true;
    }

    fn show_suggestions(&mut self, event: &SuggestionsEvent) {
        self.items = event.items.clone();
        self.selected = 0;
        self.visible = !self.items.is_empty();
    }

    fn show_did_cancel(&mut self, _event: &CancelledEvent) {
        self.hide();
    }

    fn hide(&mut self) {
        self.visible = false;
        self.items.clear();
        self.selected = 0;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn focused_item(&self) -> Option<FocusedItem> {
        if !self.visible {
            return None;
        }
        self.items.get(self.selected).map(|item| FocusedItem {
            index: self.selected,
            item: item.clone(),
        })
    }

    fn select_next(&mut self) {
        self.move_selection(1);
    }

    fn select_previous(&mut self) {
        self.move_selection(-1);
    }

    fn select_next_page(&mut self) {
        self.move_selection(8);
    }

    fn select_previous_page(&mut self) {
        self.move_selection(-8);
    }

    fn toggle_details(&mut self) {
        self.details = !self.details;
    }
}

/// Static word list; member words only answer after a `.`.
struct WordListProvider {
    name: &'static str,
    words: &'static [&'static str],
    kind: SuggestKind,
    trigger_characters: Vec<char>,
}

impl SuggestProvider for WordListProvider {
    fn name(&self) -> &str {
        self.name
    }

    fn trigger_characters(&self) -> &[char] {
        &self.trigger_characters
    }

    fn provide(&self, document: &DocumentSnapshot, position: Position) -> ProviderFuture {
        let after_dot = document
            .line_text(position.line)
            .map(|line| {
                let before: String = line.chars().take(position.column).collect();
                before
                    .trim_end_matches(|c: char| c == '_' || c.is_alphanumeric())
                    .ends_with('.')
            })
            .unwrap_or(false);
        let wants_members = !self.trigger_characters.is_empty();
        let items = if after_dot == wants_members {
            self.words
                .iter()
                .map(|word| SuggestItem::new(*word).with_kind(self.kind))
                .collect()
        } else {
            Vec::new()
        };
        Box::pin(async move { Ok(ProviderSuggestions::complete(items)) })
    }
}

fn describe(event: &SuggestEvent) -> String {
    match event {
        SuggestEvent::Triggered(e) => format!(
            "triggered at {} automatic={} retrigger={} char={:?}",
            e.position, e.is_automatic, e.retrigger, e.trigger_character
        ),
        SuggestEvent::SuggestionsAvailable(e) => {
            let labels: Vec<&str> = e.items.iter().map(|item| item.label.as_str()).collect();
            format!(
                "suggestions prefix={:?} frozen={} incomplete={} [{}]",
                e.prefix.as_str(),
                e.frozen,
                e.incomplete,
                labels.join(", ")
            )
        }
        SuggestEvent::Cancelled(e) => format!("cancelled {:?}", e.reason),
        SuggestEvent::Accepted(e) => format!(
            "accepted {:?} overwrite_before={} overwrite_after={}",
            e.item.label, e.overwrite_before, e.overwrite_after
        ),
        SuggestEvent::SelectionChanged(e) => format!("selection {}", e.index),
    }
}

fn settle(controller: &mut SuggestController) -> Result<(), Box<dyn std::error::Error>> {
    let deadline = Instant::now() + SETTLE_TIMEOUT;
    loop {
        controller.tick(Instant::now())?;
        let idle = !controller.has_active_fetch() && controller.pending_quick_suggest().is_none();
        if idle || Instant::now() >= deadline {
            return Ok(());
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = parse_args();
    let _logging = logging::init(options.log_dir.as_deref());

    let mut config = options
        .settings
        .as_deref()
        .map(load_suggest_config)
        .unwrap_or_default();
    if let Some(delay) = options.delay {
        config.quick_suggestions_delay = delay;
    }

    let runtime = SuggestRuntime::new()?;
    let registry = Rc::new(ProviderRegistry::new());
    registry.register(std::sync::Arc::new(WordListProvider {
        name: "keywords",
        words: KEYWORDS,
        kind: SuggestKind::Keyword,
        trigger_characters: Vec::new(),
    }));
    registry.register(std::sync::Arc::new(WordListProvider {
        name: "members",
        words: MEMBERS,
        kind: SuggestKind::Method,
        trigger_characters: vec!['.'],
    }));

    let buffer = Rc::new(RefCell::new(ReplayBuffer {
        rope: Rope::new(),
        cursor: Position::default(),
        version: 0,
        config,
    }));
    let mut controller = SuggestController::new(
        Box::new(ReplayHost(Rc::clone(&buffer))),
        Box::new(PrintingWidget::default()),
        Box::new(ReplayInsertion(Rc::clone(&buffer))),
        Rc::clone(&registry),
        runtime.executor(),
    );
    let _printer = controller.subscribe(|event| println!("  {}", describe(event)));

    if options.explicit {
        println!("<explicit>");
        controller.trigger_suggest()?;
        settle(&mut controller)?;
    }

    for ch in options.input.chars() {
        let position = {
            let mut buffer = buffer.borrow_mut();
            buffer.type_char(ch);
            buffer.cursor
        };
        println!("{ch:?} -> {position}");
        controller.handle_editor_event(EditorEvent::CursorChanged(CursorChange::typed(position)))?;
        controller.handle_editor_event(EditorEvent::Typed(ch))?;
        settle(&mut controller)?;
        println!("  state {}", controller.state());
    }

    if options.accept {
        println!("<accept>");
        controller.accept_selected_suggestion()?;
    }

    println!("text: {:?}", buffer.borrow().rope.to_string());
    controller.dispose();
    Ok(())
}
