//! Streaming segment parser and axis addressing state
//!
//! The parser walks a borrowed byte buffer line by line and yields one
//! [`Segment`] per `G0`/`G1` line. It keeps no segment list: every consumer
//! that needs the toolpath runs its own pass, and a pass is re-derived from
//! scratch after [`SegmentStream::reset`].
//!
//! Recognized lines (command letter must be the first byte of the line):
//! - `G0`, `G1`: linear move, axis words `X`, `Y`, `Z`, `E`
//! - `G90`, `G91`: all channels absolute / relative
//! - `M82`, `M83`: auxiliary channel absolute / relative
//!
//! Everything from `;` to the end of the line is a comment. Unknown lines,
//! unknown words and unparseable numbers are skipped where they are found.

use super::segment::{Axis, Segment};
use glam::Vec4;
use std::iter::FusedIterator;
use tracing::trace;

/// Per-channel addressing mode
///
/// Tracks whether a parsed axis value is an absolute coordinate or a delta
/// from the previous endpoint. Modes are scoped to one pass and start out
/// absolute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisModes {
    relative: [bool; 4],
}

impl AxisModes {
    /// All channels absolute
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_relative(&self, axis: Axis) -> bool {
        self.relative[axis.index()]
    }

    pub fn set_relative(&mut self, axis: Axis, relative: bool) {
        self.relative[axis.index()] = relative;
    }

    /// Switch every channel at once (G90/G91)
    pub fn set_all_relative(&mut self, relative: bool) {
        self.relative = [relative; 4];
    }

    /// Resolve a parsed value against the channel's previous value.
    #[inline]
    pub fn resolve(&self, axis: Axis, previous: f32, value: f32) -> f32 {
        if self.is_relative(axis) {
            previous + value
        } else {
            value
        }
    }
}

/// Commands the parser acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineCommand {
    Motion,
    AllAbsolute,
    AllRelative,
    AuxAbsolute,
    AuxRelative,
}

#[inline]
fn is_blank(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r')
}

/// Longest decimal number at the start of `bytes`.
///
/// Accepts an optional sign, digits, an optional fraction and an optional
/// lowercase exponent (`5`, `-1.25`, `.5`, `5.`, `1e2`, `2.5e-1`). An
/// uppercase `E` always ends the number since it is an axis letter.
fn number_prefix(bytes: &[u8]) -> Option<&str> {
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - end - 1;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && bytes[end] == b'e' {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = bytes[exp_end..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        // A bare `e` is not part of the number
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    // Only ASCII sign, digit, dot and `e` bytes were consumed
    std::str::from_utf8(&bytes[..end]).ok()
}

/// Classify the comment-free part of a line.
///
/// Returns the command and the offset of the first byte after its code.
fn classify(code: &[u8]) -> Option<(LineCommand, usize)> {
    let (&letter, rest) = code.split_first()?;
    if letter != b'G' && letter != b'M' {
        return None;
    }

    let digits = number_prefix(rest)?;
    let value = digits.parse::<f64>().ok()?.trunc() as i64;
    let command = match (letter, value) {
        (b'G', 0 | 1) => LineCommand::Motion,
        (b'G', 90) => LineCommand::AllAbsolute,
        (b'G', 91) => LineCommand::AllRelative,
        (b'M', 82) => LineCommand::AuxAbsolute,
        (b'M', 83) => LineCommand::AuxRelative,
        _ => return None,
    };

    Some((command, 1 + digits.len()))
}

/// One traversal over a G-code buffer
///
/// A stream session owns its cursor, its previous endpoint, and its axis
/// modes; several sessions over the same buffer are fully independent.
/// Once the buffer is exhausted the stream keeps returning `None` until
/// [`reset`](Self::reset) is called.
///
/// Not synchronized: a session must not be advanced from several threads
/// without external locking.
#[derive(Debug, Clone)]
pub struct SegmentStream<'a> {
    buffer: &'a [u8],
    cursor: usize,
    previous: Vec4,
    modes: AxisModes,
}

impl<'a> SegmentStream<'a> {
    /// Start a pass at the beginning of `buffer`
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            cursor: 0,
            previous: Vec4::ZERO,
            modes: AxisModes::new(),
        }
    }

    /// Rewind to the start, zero the previous endpoint, make every channel absolute
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.previous = Vec4::ZERO;
        self.modes = AxisModes::new();
    }

    /// Byte offset of the next line to scan
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.buffer.len()
    }

    /// Scan forward to the next motion line and return its segment.
    pub fn next_segment(&mut self) -> Option<Segment> {
        while self.cursor < self.buffer.len() {
            let line_start = self.cursor;
            let rest = &self.buffer[line_start..];
            let line_len = rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len());
            self.cursor = (line_start + line_len + 1).min(self.buffer.len());

            let line = &rest[..line_len];
            let code_len = line.iter().position(|&b| b == b';').unwrap_or(line_len);
            let code = &line[..code_len];

            match classify(code) {
                Some((LineCommand::Motion, words)) => {
                    return Some(self.apply_motion(&code[words..]));
                }
                Some((command, _)) => {
                    trace!("Offset {}: {:?}", line_start, command);
                    self.apply_control(command);
                }
                None => {}
            }
        }
        None
    }

    fn apply_control(&mut self, command: LineCommand) {
        match command {
            LineCommand::AllAbsolute => self.modes.set_all_relative(false),
            LineCommand::AllRelative => self.modes.set_all_relative(true),
            LineCommand::AuxAbsolute => self.modes.set_relative(Axis::E, false),
            LineCommand::AuxRelative => self.modes.set_relative(Axis::E, true),
            LineCommand::Motion => {}
        }
    }

    fn apply_motion(&mut self, words: &[u8]) -> Segment {
        let start = self.previous;
        let mut end = start;

        let mut i = 0;
        while i < words.len() {
            if is_blank(words[i]) {
                i += 1;
                continue;
            }

            if let Some(axis) = Axis::from_letter(words[i]) {
                if let Some(digits) = number_prefix(&words[i + 1..]) {
                    if let Ok(value) = digits.parse::<f32>() {
                        let k = axis.index();
                        end[k] = self.modes.resolve(axis, start[k], value);
                        i += 1 + digits.len();
                        continue;
                    }
                }
            }

            // Unknown word: skip to the next blank
            while i < words.len() && !is_blank(words[i]) {
                i += 1;
            }
        }

        self.previous = end;
        Segment::new(start, end)
    }
}

impl Iterator for SegmentStream<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        self.next_segment()
    }
}

impl FusedIterator for SegmentStream<'_> {}

/// Number of motion segments in `buffer` (one full pass)
pub fn count_segments(buffer: &[u8]) -> usize {
    SegmentStream::new(buffer).count()
}

/// Segment at `index` in `buffer`, scanning from the start
pub fn segment_at(buffer: &[u8], index: usize) -> Option<Segment> {
    SegmentStream::new(buffer).nth(index)
}
