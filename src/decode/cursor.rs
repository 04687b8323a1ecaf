use smallvec::SmallVec;

use crate::codec::CodeUnit;
use crate::error::{Error, Result};

/// The JSON inter-token whitespace set: space, tab, CR, LF, vertical tab,
/// form feed.
pub(crate) fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\u{000B}' | '\u{000C}')
}

/// Zero-based (line, column), advanced one decoded scalar at a time.
/// `\r`, `\n`, and `\r\n` each count as a single line terminator: a `\r`
/// that is immediately followed by `\n` only moves the column, and the
/// line advances when the `\n` is consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Pos {
    line: usize,
    column: usize,
}

impl Pos {
    fn advance_over(&mut self, c: char, next_is_lf: bool) {
        match c {
            '\n' => {
                self.line += 1;
                self.column = 0;
            }
            '\r' if next_is_lf => self.column += 1,
            '\r' => {
                self.line += 1;
                self.column = 0;
            }
            _ => self.column += 1,
        }
    }
}

/// Position-tracking reader of decoded Unicode scalars, the parser's sole
/// view of the input and the sole source of diagnostic positions.
///
/// Two implementations exist: [`SliceCursor`] over a bounded unit slice
/// and [`IterCursor`] over a unit iterator with no known end. Both expose
/// identical position semantics.
pub trait Cursor {
    /// Scalar at the current position without consuming it, or `None` at
    /// the end of input. Malformed unit sequences fail with `Error::Utf`.
    fn try_peek(&mut self) -> Result<Option<char>>;

    /// Consumes and returns the scalar at the current position; fails with
    /// `ParseError("Unexpected Ends")` at the end of input.
    fn advance(&mut self) -> Result<char>;

    fn line(&self) -> usize;

    fn column(&self) -> usize;

    /// Like [`Cursor::try_peek`] but failing at the end of input.
    fn peek(&mut self) -> Result<char> {
        match self.try_peek()? {
            Some(c) => Ok(c),
            None => Err(self.unexpected_ends()),
        }
    }

    /// Consumes whitespace until a non-whitespace scalar or the end is
    /// reached.
    fn skip_whitespace(&mut self) -> Result<()> {
        while let Some(c) = self.try_peek()? {
            if !is_whitespace(c) {
                break;
            }
            self.advance()?;
        }
        Ok(())
    }

    fn try_peek_significant(&mut self) -> Result<Option<char>> {
        self.skip_whitespace()?;
        self.try_peek()
    }

    fn peek_significant(&mut self) -> Result<char> {
        self.skip_whitespace()?;
        self.peek()
    }

    fn advance_significant(&mut self) -> Result<char> {
        self.skip_whitespace()?;
        self.advance()
    }

    /// Skips whitespace and consumes one scalar, failing with
    /// `ParseError("Unexpected character")` unless it equals `expected`.
    fn expect_delimiter(&mut self, expected: char) -> Result<()> {
        self.skip_whitespace()?;
        let (line, column) = (self.line(), self.column());
        let got = self.advance()?;
        if got == expected {
            Ok(())
        } else {
            Err(Error::parse("Unexpected character", line, column))
        }
    }

    fn unexpected_ends(&self) -> Error {
        Error::parse("Unexpected Ends", self.line(), self.column())
    }
}

/// Bounded cursor over a slice of code units. Reaching the end is reported
/// through the error contract, never by reading out of bounds.
pub struct SliceCursor<'a, U: CodeUnit> {
    units: &'a [U],
    offset: usize,
    peeked: Option<(char, usize)>,
    pos: Pos,
}

impl<'a, U: CodeUnit> SliceCursor<'a, U> {
    pub fn new(units: &'a [U]) -> Self {
        Self {
            units,
            offset: 0,
            peeked: None,
            pos: Pos::default(),
        }
    }

    /// Units consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn next_is_lf(&self) -> bool {
        self.units
            .get(self.offset)
            .is_some_and(|u| Into::<u32>::into(*u) == 0x0A)
    }
}

impl<U: CodeUnit> Cursor for SliceCursor<'_, U> {
    fn try_peek(&mut self) -> Result<Option<char>> {
        if let Some((c, _)) = self.peeked {
            return Ok(Some(c));
        }
        if self.offset >= self.units.len() {
            return Ok(None);
        }
        let (cp, used) = U::decode_one(&self.units[self.offset..])?;
        let c = char::from_u32(cp).expect("codec validated the scalar");
        self.peeked = Some((c, used));
        Ok(Some(c))
    }

    fn advance(&mut self) -> Result<char> {
        self.peek()?;
        let (c, used) = self.peeked.take().expect("peek populated the cache");
        self.offset += used;
        let next_is_lf = self.next_is_lf();
        self.pos.advance_over(c, next_is_lf);
        Ok(c)
    }

    fn line(&self) -> usize {
        self.pos.line
    }

    fn column(&self) -> usize {
        self.pos.column
    }
}

/// Streaming cursor over a unit iterator with no known end; buffers at
/// most one in-flight scalar's worth of units.
pub struct IterCursor<U: CodeUnit, I: Iterator<Item = U>> {
    source: I,
    pending: SmallVec<[U; 4]>,
    peeked: Option<(char, usize)>,
    exhausted: bool,
    pos: Pos,
}

impl<U: CodeUnit, I: Iterator<Item = U>> IterCursor<U, I> {
    pub fn new(source: I) -> Self {
        Self {
            source,
            pending: SmallVec::new(),
            peeked: None,
            exhausted: false,
            pos: Pos::default(),
        }
    }

    fn fill(&mut self, want: usize) {
        while self.pending.len() < want && !self.exhausted {
            match self.source.next() {
                Some(unit) => self.pending.push(unit),
                None => self.exhausted = true,
            }
        }
    }
}

impl<U: CodeUnit, I: Iterator<Item = U>> Cursor for IterCursor<U, I> {
    fn try_peek(&mut self) -> Result<Option<char>> {
        if let Some((c, _)) = self.peeked {
            return Ok(Some(c));
        }
        self.fill(U::max_sequence_len());
        if self.pending.is_empty() {
            return Ok(None);
        }
        let (cp, used) = U::decode_one(&self.pending)?;
        let c = char::from_u32(cp).expect("codec validated the scalar");
        self.peeked = Some((c, used));
        Ok(Some(c))
    }

    fn advance(&mut self) -> Result<char> {
        self.peek()?;
        let (c, used) = self.peeked.take().expect("peek populated the cache");
        self.pending.drain(..used);
        self.fill(1);
        let next_is_lf = self
            .pending
            .first()
            .is_some_and(|u| Into::<u32>::into(*u) == 0x0A);
        self.pos.advance_over(c, next_is_lf);
        Ok(c)
    }

    fn line(&self) -> usize {
        self.pos.line
    }

    fn column(&self) -> usize {
        self.pos.column
    }
}
