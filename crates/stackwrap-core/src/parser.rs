//! # Panic Trace Parser
//!
//! Rebuilds an [`AnnotatedError`] from the text a Go-style runtime prints when a
//! panic kills a goroutine.
//!
//! The lines we accept look like this:
//!
//! ```text
//! panic: something went wrong
//!
//! goroutine 1 [running]:
//! main.(*foo).destruct(0xc208067e98)
//!         /0/go/src/github.com/example/pan/main.go:22 +0x151
//! created by main.main in goroutine 1
//!         /0/go/src/github.com/example/pan/main.go:9 +0x2a
//! ```
//!
//! (the indentation before file paths is a single tab).
//!
//! Parsing is a forward-only walk over the lines through four states:
//!
//! | State     | Waits for                                        |
//! |-----------|--------------------------------------------------|
//! | `Start`   | the first line, which must start with `panic: `  |
//! | `Seek`    | a `goroutine N [running]:` header; anything else is skipped |
//! | `Parsing` | call / `\tfile:line` pairs until a blank line or a `created by` pair |
//! | `Done`    | nothing; any trailing text is ignored            |
//!
//! Any grammar violation aborts the whole parse. No partial stack is ever returned.

use tracing::{debug, trace};

use crate::annotated::{AnnotatedError, PANIC_KIND};
use crate::error::{TraceError, TraceResult, UncaughtPanic};
use crate::types::Frame;

const PANIC_PREFIX: &str = "panic: ";
const GOROUTINE_PREFIX: &str = "goroutine ";
const RUNNING_SUFFIX: &str = "[running]:";
const CREATED_BY_PREFIX: &str = "created by ";
const SPAWNED_IN_MARKER: &str = " in goroutine ";
const OFFSET_MARKER: &str = " +";

/// The runtime writes `·` where synthetic names contain a literal `.`.
const MIDDLE_DOT: char = '\u{00b7}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State
{
    Start,
    Seek,
    Parsing,
    Done,
}

/// One input line with its 1-based position.
#[derive(Debug, Clone, Copy)]
struct Line<'a>
{
    number: usize,
    text: &'a str,
}

/// Parse the output of a panicked program into an [`AnnotatedError`].
///
/// The returned error's cause is an [`UncaughtPanic`] holding the panic message, its
/// kind is `panic`, and its frames are the frames of the running goroutine in the
/// order they were printed. A `created by` frame, when present, is last.
///
/// ## Errors
///
/// Returns a [`TraceError`] naming the offending line when the text breaks the panic
/// grammar, or [`TraceError::Unparseable`] when the input ends before the frame list
/// is complete.
pub fn parse_panic(text: &str) -> TraceResult<AnnotatedError>
{
    let lines: Vec<Line<'_>> = text
        .split('\n')
        .enumerate()
        .map(|(index, raw)| Line {
            number: index + 1,
            text: raw.strip_suffix('\r').unwrap_or(raw),
        })
        .collect();

    let mut state = State::Start;
    let mut message = "";
    let mut frames = Vec::new();
    let mut cursor = 0;

    while state != State::Done && cursor < lines.len() {
        let line = lines[cursor];
        cursor += 1;

        match state {
            State::Start => {
                let Some(rest) = line.text.strip_prefix(PANIC_PREFIX) else {
                    return Err(TraceError::MissingPanicPrefix {
                        line_number: line.number,
                        line: line.text.to_string(),
                    });
                };
                message = rest;
                state = State::Seek;
            }
            State::Seek => {
                if is_running_header(line.text) {
                    state = State::Parsing;
                } else {
                    trace!(line = line.number, "skipping line while seeking the running goroutine");
                }
            }
            State::Parsing => {
                if line.text.is_empty() {
                    state = State::Done;
                    continue;
                }

                let (call, spawn) = match line.text.strip_prefix(CREATED_BY_PREFIX) {
                    Some(rest) => (rest, true),
                    None => (line.text, false),
                };

                let Some(&location) = lines.get(cursor) else {
                    return Err(TraceError::UnpairedLine {
                        line_number: line.number,
                        line: call.to_string(),
                    });
                };
                cursor += 1;

                let call = Line {
                    number: line.number,
                    text: call,
                };
                frames.push(parse_frame(call, location, spawn)?);

                if spawn {
                    state = State::Done;
                }
            }
            State::Done => break,
        }
    }

    if state != State::Done {
        return Err(TraceError::Unparseable { text: text.to_string() });
    }

    debug!(frames = frames.len(), "parsed panic trace");
    Ok(AnnotatedError::with_frames(
        Box::new(UncaughtPanic::new(message)),
        PANIC_KIND,
        frames,
    ))
}

fn is_running_header(line: &str) -> bool
{
    line.starts_with(GOROUTINE_PREFIX) && line.ends_with(RUNNING_SUFFIX)
}

/// Build a frame from a call line and the `\tfile:line +offset` line after it.
fn parse_frame(call: Line<'_>, location: Line<'_>, spawn: bool) -> TraceResult<Frame>
{
    let (package, name) = parse_call(call, spawn)?;
    let (file, line_number) = parse_location(location)?;
    Ok(Frame::new(file, line_number, package, name))
}

fn parse_call(call: Line<'_>, spawn: bool) -> TraceResult<(String, String)>
{
    let mut name = call.text;
    if spawn {
        // created by main.main in goroutine 1
        if let Some(index) = name.find(SPAWNED_IN_MARKER) {
            name = &name[..index];
        }
        // Only a trailing `(...)` is an argument list; `(*T)` receivers are not.
        if name.ends_with(')') {
            if let Some(index) = name.rfind('(') {
                name = &name[..index];
            }
        }
    } else {
        let Some(index) = name.rfind('(') else {
            return Err(TraceError::MissingCall {
                line_number: call.number,
                line: call.text.to_string(),
            });
        };
        name = &name[..index];
    }

    let (directory, rest) = match name.rfind('/') {
        Some(slash) => (&name[..=slash], &name[slash + 1..]),
        None => ("", name),
    };
    let (package, function) = match rest.find('.') {
        Some(period) => (format!("{directory}{}", &rest[..period]), &rest[period + 1..]),
        None => (directory.to_string(), rest),
    };

    Ok((package, function.replace(MIDDLE_DOT, ".")))
}

fn parse_location(location: Line<'_>) -> TraceResult<(String, u32)>
{
    let Some(body) = location.text.strip_prefix('\t') else {
        return Err(TraceError::MissingTab {
            line_number: location.number,
            line: location.text.to_string(),
        });
    };
    let Some((file, number)) = body.rsplit_once(':') else {
        return Err(TraceError::MissingLineNumber {
            line_number: location.number,
            line: location.text.to_string(),
        });
    };
    let number = number.split_once(OFFSET_MARKER).map_or(number, |(number, _)| number);

    match number.parse::<u32>() {
        Ok(line_number) if line_number > 0 => Ok((file.to_string(), line_number)),
        _ => Err(TraceError::BadLineNumber {
            line_number: location.number,
            line: location.text.to_string(),
        }),
    }
}
