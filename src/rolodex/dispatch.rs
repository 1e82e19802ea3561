//! # Command Dispatcher
//!
//! Turns a typed command word into a call on the command layer.
//!
//! The dispatcher sits idle until [`Dispatcher::handle`] receives a word. It
//! then collects whatever parameters the command needs through a [`Prompt`]
//! (end of input cancels the command), runs it, and applies the post-command
//! hook: every mutating command is followed by an auto-save, whether or not
//! the mutation itself succeeded.
//!
//! Errors raised while running a command are reported as messages and the
//! session carries on. Only a failing [`Prompt`] (the console itself is gone)
//! is returned as an error.

use crate::book::{AddressBook, LoadMode, LoadReport};
use crate::codec::Codec;
use crate::commands::{
    add, congratulate, edit, load, remove, save, search, view, CmdMessage, CmdResult, NewContact,
};
use crate::config::RolodexConfig;
use crate::error::{Result, RolodexError};
use crate::model::{ContactField, FieldRules};
use chrono::{Local, NaiveDate};
use log::{debug, error};
use std::fmt;

/// Source of answers for the parameters a command needs.
pub trait Prompt {
    /// Ask one question. Returns Ok(None) once input is exhausted.
    fn ask(&mut self, question: &str) -> Result<Option<String>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Add,
    Search,
    Edit,
    Remove,
    Save,
    Load,
    Congratulate,
    View,
    Exit,
}

impl Command {
    pub const ALL: [Command; 9] = [
        Command::Add,
        Command::Search,
        Command::Edit,
        Command::Load,
        Command::Remove,
        Command::Save,
        Command::Congratulate,
        Command::View,
        Command::Exit,
    ];

    /// Parse a command word, ignoring case and surrounding whitespace.
    pub fn parse(word: &str) -> Option<Command> {
        match word.trim().to_lowercase().as_str() {
            "add" => Some(Command::Add),
            "search" => Some(Command::Search),
            "edit" => Some(Command::Edit),
            "remove" => Some(Command::Remove),
            "save" => Some(Command::Save),
            "load" => Some(Command::Load),
            "congratulate" => Some(Command::Congratulate),
            "view" => Some(Command::View),
            "exit" => Some(Command::Exit),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Command::Add => "Add",
            Command::Search => "Search",
            Command::Edit => "Edit",
            Command::Remove => "Remove",
            Command::Save => "Save",
            Command::Load => "Load",
            Command::Congratulate => "Congratulate",
            Command::View => "View",
            Command::Exit => "Exit",
        }
    }

    /// Commands followed by the auto-save hook.
    pub fn is_mutating(&self) -> bool {
        matches!(self, Command::Add | Command::Edit | Command::Remove)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug)]
pub struct Outcome {
    pub flow: Flow,
    pub result: CmdResult,
}

impl Outcome {
    fn next(result: CmdResult) -> Self {
        Self {
            flow: Flow::Continue,
            result,
        }
    }
}

/// A command with all of its parameters collected, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Request {
    Add(NewContact),
    Search(String),
    Edit {
        name: String,
        field: String,
        value: String,
    },
    Remove(String),
    Save(String),
    Load(String),
    Congratulate(String),
    View,
    Exit,
}

pub struct Dispatcher<C: Codec> {
    book: AddressBook,
    codec: C,
    config: RolodexConfig,
    today: Option<NaiveDate>,
}

impl<C: Codec> Dispatcher<C> {
    pub fn new(codec: C, config: RolodexConfig) -> Self {
        Self {
            book: AddressBook::new(),
            codec,
            config,
            today: None,
        }
    }

    /// Pin the date used by `congratulate`.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn book(&self) -> &AddressBook {
        &self.book
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    fn rules(&self) -> FieldRules {
        self.config.field_rules()
    }

    fn auto_save_label(&self) -> &str {
        &self.config.auto_save_label
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Populate the book from the auto-save label. A missing or unreadable
    /// document leaves the book empty.
    pub fn start(&mut self) -> Result<LoadReport> {
        let label = self.auto_save_label().to_string();
        let rules = self.rules();
        self.book.load(&self.codec, &label, &rules, LoadMode::Lenient)
    }

    /// Run one command word to completion.
    pub fn handle<P: Prompt>(&mut self, word: &str, prompt: &mut P) -> Result<Outcome> {
        let command = match Command::parse(word) {
            Some(command) => command,
            None => {
                return Ok(Outcome::next(CmdResult::default().with_message(
                    CmdMessage::error(format!("Unknown command: {}", word.trim())),
                )));
            }
        };
        debug!("dispatching {}", command);

        let mut result = match collect(command, self, prompt)? {
            Some(request) => self.apply(request).unwrap_or_else(report_error),
            None => CmdResult::default().with_message(CmdMessage::info("Cancelled")),
        };

        if command.is_mutating() || command == Command::Exit {
            self.auto_save(&mut result);
        }

        let flow = if command == Command::Exit {
            Flow::Exit
        } else {
            Flow::Continue
        };
        Ok(Outcome { flow, result })
    }

    fn apply(&mut self, request: Request) -> Result<CmdResult> {
        let rules = self.rules();
        match request {
            Request::Add(input) => add::run(&mut self.book, input, &rules),
            Request::Search(query) => search::run(&self.book, &query),
            Request::Edit { name, field, value } => {
                self.book.get(&name)?;
                let field: ContactField = field.parse()?;
                edit::run(&mut self.book, &name, field, &value, &rules)
            }
            Request::Remove(name) => remove::run(&mut self.book, &name),
            Request::Save(label) => {
                let label = self.label_or_default(&label);
                save::run(&self.book, &self.codec, &label)
            }
            Request::Load(label) => {
                let label = self.label_or_default(&label);
                let mode = if label == self.auto_save_label() {
                    LoadMode::Lenient
                } else {
                    LoadMode::Strict
                };
                load::run(&mut self.book, &self.codec, &label, &rules, mode)
            }
            Request::Congratulate(days) => {
                let days = parse_days(&days, self.config.birthday_window_days)?;
                congratulate::run(&self.book, self.today(), days, &self.config)
            }
            Request::View => view::run(&self.book),
            Request::Exit => Ok(CmdResult::default().with_message(CmdMessage::info("Good bye!"))),
        }
    }

    fn label_or_default(&self, label: &str) -> String {
        let label = label.trim();
        if label.is_empty() {
            self.auto_save_label().to_string()
        } else {
            label.to_string()
        }
    }

    /// Post-command hook. A failed save is logged and reported, never raised.
    fn auto_save(&self, result: &mut CmdResult) {
        let label = self.auto_save_label();
        if let Err(e) = self.book.save(&self.codec, label) {
            error!("auto-save to '{}' failed: {}", label, e);
            result.add_message(CmdMessage::warning(format!("Auto-save failed: {}", e)));
        }
    }
}

fn collect<C: Codec, P: Prompt>(
    command: Command,
    dispatcher: &Dispatcher<C>,
    prompt: &mut P,
) -> Result<Option<Request>> {
    macro_rules! ask {
        ($question:expr) => {
            match prompt.ask($question)? {
                Some(answer) => answer,
                None => return Ok(None),
            }
        };
    }

    let request = match command {
        Command::Add => {
            let name = ask!("Name");
            let phone = ask!("Phone");
            let email = ask!("Email");
            let birthday = ask!("Birthday (DD.MM.YYYY, blank to skip)");
            let notes = ask!("Notes (blank to skip)");
            Request::Add(NewContact {
                name,
                phone,
                email,
                birthday,
                notes,
            })
        }
        Command::Search => Request::Search(ask!("Search for")),
        Command::Edit => {
            let name = ask!("Name");
            let fields: Vec<&str> = ContactField::ALL.iter().map(|f| f.as_str()).collect();
            let field = ask!(&format!("Field ({})", fields.join(", ")));
            let value = ask!("New value");
            Request::Edit { name, field, value }
        }
        Command::Remove => Request::Remove(ask!("Name")),
        Command::Save => Request::Save(ask!(&format!(
            "Label (blank for {})",
            dispatcher.auto_save_label()
        ))),
        Command::Load => Request::Load(ask!(&format!(
            "Label (blank for {})",
            dispatcher.auto_save_label()
        ))),
        Command::Congratulate => Request::Congratulate(ask!(&format!(
            "Days ahead (blank for {})",
            dispatcher.config.birthday_window_days
        ))),
        Command::View => Request::View,
        Command::Exit => Request::Exit,
    };
    Ok(Some(request))
}

fn parse_days(input: &str, default: i64) -> Result<i64> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(default);
    }
    input
        .parse()
        .map_err(|_| RolodexError::validation("days", format!("'{}' is not a number", input)))
}

fn report_error(e: RolodexError) -> CmdResult {
    if !e.is_user_facing() {
        error!("command failed: {}", e);
    }
    CmdResult::default().with_message(CmdMessage::error(e.to_string()))
}

/// The command names as shown by `help`.
pub fn command_titles() -> Vec<&'static str> {
    Command::ALL.iter().map(Command::title).collect()
}
