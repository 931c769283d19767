//! Splits an input line into words, honouring single and double quotes.

use thiserror::Error;

/// Errors that can occur while splitting a line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexingError {
    /// A closing quote (single or double) was not found.
    #[error("unterminated quote")]
    UnfinishedQuote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexingState {
    Start,
    ReadingWord,
    ReadingSingleQuote,
    ReadingDoubleQuote,
}

struct LexingFSM<'a> {
    input: std::str::Chars<'a>,
    state: LexingState,
    buffer: String,
}

impl<'a> LexingFSM<'a> {
    fn new(line: &'a str) -> Self {
        LexingFSM {
            input: line.chars(),
            state: LexingState::Start,
            buffer: String::new(),
        }
    }

    fn make_words(&mut self) -> Result<Vec<String>, LexingError> {
        let mut out = Vec::new();

        while let Some(ch) = self.input.next() {
            match self.state {
                LexingState::Start => self.handle_start(ch),
                LexingState::ReadingWord => self.handle_word(ch, &mut out),
                LexingState::ReadingSingleQuote => self.handle_quote(ch, '\''),
                LexingState::ReadingDoubleQuote => self.handle_double_quote(ch),
            }
        }

        match self.state {
            LexingState::ReadingSingleQuote | LexingState::ReadingDoubleQuote => {
                Err(LexingError::UnfinishedQuote)
            }
            LexingState::ReadingWord => {
                out.push(std::mem::take(&mut self.buffer));
                Ok(out)
            }
            LexingState::Start => Ok(out),
        }
    }

    fn handle_start(&mut self, ch: char) {
        match ch {
            c if c.is_whitespace() => {}
            '\'' => self.state = LexingState::ReadingSingleQuote,
            '"' => self.state = LexingState::ReadingDoubleQuote,
            '\\' => {
                self.escape();
                self.state = LexingState::ReadingWord;
            }
            c => {
                self.buffer.push(c);
                self.state = LexingState::ReadingWord;
            }
        }
    }

    fn handle_word(&mut self, ch: char, out: &mut Vec<String>) {
        match ch {
            c if c.is_whitespace() => {
                out.push(std::mem::take(&mut self.buffer));
                self.state = LexingState::Start;
            }
            '\'' => self.state = LexingState::ReadingSingleQuote,
            '"' => self.state = LexingState::ReadingDoubleQuote,
            '\\' => self.escape(),
            c => self.buffer.push(c),
        }
    }

    fn handle_quote(&mut self, ch: char, quote: char) {
        if ch == quote {
            self.state = LexingState::ReadingWord;
        } else {
            self.buffer.push(ch);
        }
    }

    fn handle_double_quote(&mut self, ch: char) {
        match ch {
            '\\' => self.escape(),
            c => self.handle_quote(c, '"'),
        }
    }

    /// Take the next character literally. A backslash at the end of the line,
    /// or right before the newline, is kept as is.
    fn escape(&mut self) {
        match self.input.clone().next() {
            Some(c) if c != '\n' => {
                self.input.next();
                self.buffer.push(c);
            }
            _ => self.buffer.push('\\'),
        }
    }
}

/// Split `line` into words.
///
/// Whitespace separates words; quotes group characters (including whitespace)
/// into one word and may be empty (`""` yields an empty word); a backslash
/// escapes the following character outside single quotes.
pub fn split_into_words(line: &str) -> Result<Vec<String>, LexingError> {
    LexingFSM::new(line).make_words()
}
