//! Application entry point — shadow-reader terminal front-end.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Open the [`Library`] under the platform data dir.
//! 4. Build capabilities: [`ManualCapture`] (the user types what they
//!    said), [`NullSynth`], [`ApiExplainer`].
//! 5. Run the command loop over stdin until `quit`.
//!
//! The capture engine here is a stand-in: `shadow` opens a session and
//! `attempt <text>` plays the recognizer's final-result callback.  A real
//! platform recognizer would implement [`SpeechCapture`] and feed the same
//! event channel.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use shadow_reader::{
    config::{AppConfig, AppPaths},
    document::{DocumentSource, PlainTextSource},
    explain::{ApiExplainer, Explainer, PromptStyle},
    library::Library,
    reader::ReaderSurface,
    shadow::{ScoreResult, SessionState, ShadowingSession, WordStatus},
    speech::{ManualCapture, NullSynth, SpeakRequest, SpeechCapture, SpeechSynth},
};

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Everything the command loop needs in one place.
struct App {
    config: AppConfig,
    library: Library,
    source: PlainTextSource,
    capture: Arc<ManualCapture>,
    synth: Arc<dyn SpeechSynth>,
    explainer: Arc<dyn Explainer>,
    surface: ReaderSurface,
    session: ShadowingSession,
}

impl App {
    fn new(config: AppConfig, library: Library) -> Self {
        let capture = Arc::new(ManualCapture::new());
        let capture_dyn: Arc<dyn SpeechCapture> = capture.clone();

        Self {
            source: PlainTextSource::new(config.reader.page_chars),
            capture,
            synth: Arc::new(NullSynth),
            explainer: Arc::new(ApiExplainer::from_config(&config.explain)),
            surface: ReaderSurface::new(config.reader.min_selection_chars),
            session: ShadowingSession::new(capture_dyn, config.speech.locale.clone()),
            config,
            library,
        }
    }

    // -----------------------------------------------------------------------
    // Command dispatch
    // -----------------------------------------------------------------------

    /// Handle one input line.  Returns `false` when the app should exit.
    async fn handle_command(&mut self, line: &str) -> bool {
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "help" => print_help(),
            "books" => self.cmd_books(),
            "add" => self.cmd_add(rest),
            "del" => self.cmd_delete(rest),
            "open" => self.cmd_open(rest),
            "read" => self.cmd_read(),
            "list" => self.cmd_list(),
            "next" => self.cmd_turn(true),
            "prev" => self.cmd_turn(false),
            "page" => self.cmd_page(rest),
            "select" => self.cmd_select(rest),
            "say" => self.cmd_say(),
            "explain" => self.cmd_explain().await,
            "examples" => self.cmd_examples(rest).await,
            "shadow" => self.cmd_shadow(),
            "attempt" => self.cmd_attempt(rest),
            "score" => self.cmd_score(),
            "quit" | "exit" => return false,
            other => println!("unknown command: {other} (try `help`)"),
        }

        // Apply whatever the capture engine delivered during this command.
        self.pump_session();
        true
    }

    fn pump_session(&mut self) {
        let mut scored = false;
        while let Some(event) = self.session.try_next_event() {
            self.session.handle_event(event);
            scored = self.session.state() == SessionState::Scored;
        }
        if scored {
            self.cmd_score();
        }
    }

    // -----------------------------------------------------------------------
    // Library commands
    // -----------------------------------------------------------------------

    fn cmd_books(&self) {
        match self.library.books() {
            Ok(books) if books.is_empty() => println!("library is empty — `add <path>` a book"),
            Ok(books) => {
                for book in books {
                    println!("{}  {}  ({} bytes)", book.id, book.title, book.size);
                }
            }
            Err(e) => println!("could not read the library: {e}"),
        }
    }

    fn cmd_add(&self, path: &str) {
        if path.is_empty() {
            println!("usage: add <path>");
            return;
        }
        match self.library.add_book(Path::new(path)) {
            Ok(book) => println!("added \"{}\" as {}", book.title, book.id),
            Err(e) => println!("could not add book: {e}"),
        }
    }

    fn cmd_delete(&self, id: &str) {
        match self.library.delete_book(id) {
            Ok(()) => println!("deleted {id}"),
            Err(e) => println!("{e}"),
        }
    }

    fn cmd_open(&mut self, target: &str) {
        if target.is_empty() {
            println!("usage: open <book-id | path>");
            return;
        }

        // A library id wins; otherwise treat the target as a file path.
        let (book_id, path, start_page) = match self.library.book(target) {
            Ok(book) => {
                let page = self.library.load_progress(&book.id).unwrap_or(1);
                (Some(book.id.clone()), self.library.book_path(&book.id), page)
            }
            Err(_) => (None, PathBuf::from(target), 1),
        };

        match self.source.extract(&path) {
            Ok(pages) => {
                self.surface.open(book_id, pages, start_page);
                self.session.clear_reference();
                println!(
                    "opened at page {}/{}",
                    self.surface.page_number(),
                    self.surface.num_pages()
                );
            }
            Err(e) => println!("could not open document: {e}"),
        }
    }

    // -----------------------------------------------------------------------
    // Reading commands
    // -----------------------------------------------------------------------

    fn cmd_read(&self) {
        match self.surface.current_page() {
            Some(page) => {
                println!(
                    "— page {}/{} —",
                    self.surface.page_number(),
                    self.surface.num_pages()
                );
                println!("{}", page.text);
            }
            None => println!("no book open — `open <book-id | path>` first"),
        }
    }

    fn cmd_list(&self) {
        let sentences = self.surface.sentences();
        if sentences.is_empty() {
            println!("no book open — `open <book-id | path>` first");
            return;
        }
        for (i, sentence) in sentences.iter().enumerate() {
            println!("{:>3}. {sentence}", i + 1);
        }
    }

    fn cmd_turn(&mut self, forward: bool) {
        let moved = if forward {
            self.surface.go_next()
        } else {
            self.surface.go_prev()
        };
        if moved {
            self.after_page_change();
        } else {
            println!("no {} page", if forward { "next" } else { "previous" });
        }
    }

    fn cmd_page(&mut self, arg: &str) {
        match arg.parse::<usize>() {
            Ok(page) if self.surface.goto(page) => self.after_page_change(),
            _ => println!("usage: page <1..{}>", self.surface.num_pages().max(1)),
        }
    }

    fn after_page_change(&mut self) {
        // The selection died with the page turn; so does any shadowing.
        self.session.clear_reference();

        if let Some(id) = self.surface.book_id() {
            if let Err(e) = self.library.save_progress(id, self.surface.page_number()) {
                log::warn!("could not save progress: {e}");
            }
        }
        println!(
            "page {}/{}",
            self.surface.page_number(),
            self.surface.num_pages()
        );
    }

    fn cmd_select(&mut self, arg: &str) {
        let index = match arg.parse::<usize>() {
            Ok(n) if n >= 1 => n - 1,
            _ => {
                println!("usage: select <sentence number from `list`>");
                return;
            }
        };

        match self.surface.select(index) {
            Some(sentence) => {
                let sentence = sentence.to_string();
                self.session.set_reference(sentence.as_str());
                println!("selected: {sentence}");
            }
            None => println!("no selectable sentence at {}", index + 1),
        }
    }

    // -----------------------------------------------------------------------
    // Learning commands
    // -----------------------------------------------------------------------

    fn cmd_say(&self) {
        let Some(sentence) = self.surface.selected() else {
            println!("select a sentence first (`list`, then `select N`)");
            return;
        };
        let request = SpeakRequest::new(
            sentence,
            self.config.speech.voice.clone(),
            self.config.speech.rate,
        );
        if let Err(e) = self.synth.speak(&request) {
            println!("cannot speak: {e}");
        }
    }

    async fn cmd_explain(&mut self) {
        let Some(sentence) = self.surface.selected().map(str::to_string) else {
            println!("select a sentence first (`list`, then `select N`)");
            return;
        };
        println!("asking the teacher…");
        let explanation = self.explainer.explain(&sentence, PromptStyle::Sentence).await;
        println!("{}", explanation.text);
    }

    async fn cmd_examples(&mut self, word: &str) {
        if word.is_empty() {
            println!("usage: examples <word>");
            return;
        }
        let explanation = self.explainer.explain(word, PromptStyle::WordExamples).await;
        println!("{}", explanation.text);
    }

    // -----------------------------------------------------------------------
    // Shadowing commands
    // -----------------------------------------------------------------------

    fn cmd_shadow(&mut self) {
        match self.session.toggle() {
            Ok(SessionState::Listening) => {
                println!("listening — `attempt <what you said>` to finish")
            }
            Ok(_) => println!("capture cancelled"),
            Err(e) => println!("{e}"),
        }
    }

    fn cmd_attempt(&mut self, text: &str) {
        if !self.session.is_listening() {
            println!("not listening — `shadow` first");
            return;
        }
        // Plays the recognizer's final-result callback.
        self.capture.push_transcript(text);
    }

    fn cmd_score(&self) {
        match self.session.state() {
            SessionState::Scored => {
                if let Some(result) = self.session.result() {
                    print_score(result);
                }
            }
            SessionState::Errored => println!(
                "capture failed: {}",
                self.session.error_message().unwrap_or("unknown error")
            ),
            SessionState::Listening => println!("still listening…"),
            SessionState::Idle => println!("no attempt yet — `shadow`, then `attempt <text>`"),
        }
    }
}

// ---------------------------------------------------------------------------
// Output helpers
// ---------------------------------------------------------------------------

fn print_score(result: &ScoreResult) {
    let rendered: Vec<String> = result
        .feedback
        .iter()
        .map(|f| match f.status {
            WordStatus::Ok => f.display_word.clone(),
            WordStatus::Missed => format!("[{}]", f.display_word),
        })
        .collect();
    println!("{}", rendered.join(" "));
    println!(
        "score: {}%  ({} of {} words — [brackets] were missed)",
        result.percentage,
        result.matched(),
        result.feedback.len()
    );
}

fn print_help() {
    println!(
        "\
commands:
  books | add <path> | del <id>      manage the library
  open <book-id | path>              open a book (resumes saved page)
  read | list | next | prev | page N read and navigate
  select N                           pick a sentence from `list`
  say | explain | examples <word>    listen / ask the teacher
  shadow                             start or cancel a shadowing attempt
  attempt <what you said>            finish the attempt and score it
  score                              show the last result
  quit"
    );
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("shadow-reader starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Library
    let library = Library::open(AppPaths::new().library_dir)?;

    // 4. App + capabilities
    let mut app = App::new(config, library);

    // 5. Command loop
    print_help();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if !app.handle_command(line.trim()).await {
            break;
        }
    }

    log::info!("shadow-reader shutting down");
    Ok(())
}
