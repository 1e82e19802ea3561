//! The interactive loop: one command per line until `exit` or end of input.

use crate::codec::Codec;
use crate::commands::{CmdMessage, CmdResult};
use crate::dispatch::{Dispatcher, Flow, Prompt};
use crate::error::Result;
use crate::render;
use std::io::{BufRead, Write};

pub const GREETING: &str =
    "Hello. I am your contact-assistant. What should I do with your contacts?";
pub const COMMAND_PROMPT: &str = "Type help for list of commands or enter your command";

/// Line-oriented console over any reader/writer pair.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Bytes that are not UTF-8 are replaced rather than ending the session.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).trim().to_string()))
    }

    fn read_command(&mut self) -> Result<Option<String>> {
        writeln!(self.output, "{}", COMMAND_PROMPT)?;
        self.output.flush()?;
        self.read_line()
    }
}

impl<R: BufRead, W: Write> Prompt for Console<R, W> {
    fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{}: ", question)?;
        self.output.flush()?;
        self.read_line()
    }
}

/// Run the session until `exit`. End of input counts as `exit`, so the final
/// save still happens.
pub fn run<C, R, W>(dispatcher: &mut Dispatcher<C>, console: &mut Console<R, W>) -> Result<()>
where
    C: Codec,
    R: BufRead,
    W: Write,
{
    writeln!(console.output(), "{}", GREETING)?;
    let report = dispatcher.start()?;
    if report.unreadable || report.skipped > 0 {
        let mut notice = CmdResult::default();
        notice.add_message(CmdMessage::warning(format!(
            "Some saved contacts could not be restored from '{}'",
            report.label
        )));
        render::write_result(console.output(), &notice)?;
    }

    loop {
        let mut word = match console.read_command()? {
            Some(word) => word,
            None => "exit".to_string(),
        };
        if word.eq_ignore_ascii_case("help") {
            render::write_help(console.output())?;
            word = match console.read_line()? {
                Some(word) => word,
                None => "exit".to_string(),
            };
        }
        if word.is_empty() {
            continue;
        }

        let outcome = dispatcher.handle(&word, console)?;
        render::write_result(console.output(), &outcome.result)?;
        if outcome.flow == Flow::Exit {
            break;
        }
    }

    console.output().flush()?;
    Ok(())
}
