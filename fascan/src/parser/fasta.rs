use super::*;
use crate::accumulator::Accumulator;
use crate::config::{advanced::*, *};
use crate::error::{Error, Field, Result, SyntaxError};
use crate::input::*;
use crate::scan::*;
use crate::window::*;

use core::iter::FusedIterator;
use std::io::Read;
use tracing::debug;

/// Parser with the default configuration.
pub type DefaultFastaReader<I> = FastaReader<DEFAULT_CONFIG, I>;

/// A streaming parser for the [FASTA format](https://en.wikipedia.org/wiki/FASTA_format).
///
/// The reader owns one fixed-size window over the byte source and hands out
/// one [`Record`] per call to [`read_record`](Self::read_record). After the
/// first error the session is done: every following call returns
/// [`Error::Finished`] without touching the source.
///
/// ```
/// use fascan::input::*;
/// use fascan::*;
///
/// const CONFIG: Config = ParserOptions::default().config();
///
/// let mut reader = FastaReader::<CONFIG, _>::from_slice(b">A first\nAC\nGT\n>B\nGGCC\n")?;
/// let a = reader.read_record()?;
/// assert_eq!((a.name(), a.comment(), a.sequence()), ("A", Some("first"), "ACGT"));
/// let b = reader.read_record()?;
/// assert_eq!((b.name(), b.comment(), b.sequence()), ("B", None, "GGCC"));
/// assert!(reader.is_done());
/// # Ok::<(), fascan::Error>(())
/// ```
pub struct FastaReader<const CONFIG: Config, I: Read> {
    window: ReadWindow<I>,
    line: usize,
    done: bool,
    error: Option<String>,
    records: usize,
    blanks: Vec<u8>,
}

impl<const CONFIG: Config, I: Read> FastaReader<CONFIG, I> {
    /// Open a session with a window of [`DEFAULT_BUFFER_SIZE`] bytes.
    pub fn new(input: I) -> Result<Self> {
        Self::with_capacity(input, DEFAULT_BUFFER_SIZE)
    }

    /// Open a session with a window of `capacity` bytes.
    ///
    /// This performs the first read and fails if the input is empty
    /// or does not start with `'>'`.
    pub fn with_capacity(input: I, capacity: usize) -> Result<Self> {
        let window = ReadWindow::with_capacity(input, capacity)?;
        debug!(capacity, config = CONFIG, "opening FASTA session");
        if window.is_empty() || window.is_eof() {
            return Err(Error::EmptyInput);
        }
        if window.peek() != Some(b'>') {
            return Err(Error::MissingMarker);
        }
        Ok(Self {
            done: window.is_eof(),
            window,
            line: 1,
            error: None,
            records: 0,
            blanks: Vec::new(),
        })
    }

    /// Returns `true` once no record is left, or after a failure.
    #[inline(always)]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// The 1-based line the parser is currently on.
    #[inline(always)]
    pub fn line_number(&self) -> usize {
        self.line
    }

    #[inline(always)]
    pub fn records_read(&self) -> usize {
        self.records
    }

    /// Returns the diagnostic of the failure that ended the session, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Give back the byte source, whose closing belongs to the caller.
    pub fn into_inner(self) -> I {
        self.window.into_inner()
    }

    /// Parse the next record.
    ///
    /// Callers should loop while [`is_done`](Self::is_done) is `false`
    /// and stop at the first error.
    pub fn read_record(&mut self) -> Result<Record> {
        if self.done {
            return Err(Error::Finished);
        }
        match self.parse_record() {
            Ok(record) => {
                self.records += 1;
                self.done = self.window.is_eof();
                if self.done {
                    debug!(lines = self.line, records = self.records, "end of input");
                }
                Ok(record)
            }
            Err(e) => {
                debug!(line = self.line, error = %e, "invalid FASTA input");
                self.error = Some(e.to_string());
                self.done = true;
                Err(e)
            }
        }
    }
}

impl<const CONFIG: Config, I: Read> FastaReader<CONFIG, I> {
    #[inline(always)]
    fn syntax(&self, kind: SyntaxError) -> Error {
        Error::Syntax {
            line: self.line,
            kind,
        }
    }

    fn parse_record(&mut self) -> Result<Record> {
        let line = self.line;
        if self.window.peek() != Some(b'>') {
            return Err(self.syntax(SyntaxError::ExpectedMarker));
        }
        self.window.advance(1)?;

        let name = self.read_name()?;
        let comment = self.read_comment()?;
        let (sequence, sequence_len) = self.read_sequence()?;
        Ok(Record::from_parts(name, comment, sequence, sequence_len, line))
    }

    /// Hand every graphic run to `sink`, refilling the window as needed.
    /// Returns the number of bytes scanned.
    #[inline(always)]
    fn scan_word<F>(&mut self, mut sink: F) -> Result<usize>
    where
        F: FnMut(&[u8]) -> Result<()>,
    {
        let mut count = 0;
        while self.window.peek().is_some_and(is_graphic) {
            let run = self.window.as_slice();
            let len = find_non_graphic(run);
            sink(&run[..len])?;
            count += len;
            self.window.advance(len)?;
        }
        Ok(count)
    }

    #[inline(always)]
    fn copy_word(&mut self, target: &mut Accumulator) -> Result<usize> {
        self.scan_word(|run| Ok(target.append(run)?))
    }

    #[inline(always)]
    fn skip_word(&mut self) -> Result<usize> {
        self.scan_word(|_| Ok(()))
    }

    /// Skip spaces and tabs, remembering them when `keep` is set.
    fn skip_blanks(&mut self, keep: bool) -> Result<()> {
        if keep {
            self.blanks.clear();
        }
        while let Some(byte) = self.window.peek() {
            if !is_blank(byte) {
                break;
            }
            if keep {
                self.blanks.push(byte);
            }
            self.window.advance(1)?;
        }
        Ok(())
    }

    /// Skip any whitespace, line breaks included, keeping the line count.
    #[inline(always)]
    fn skip_whitespace(&mut self) -> Result<()> {
        // common case: one line feed between two lines of residues
        let run = self.window.as_slice();
        if run.len() >= 2 && is_space(run[0]) && !is_space(run[1]) {
            let newlines = (run[0] == b'\n') as usize;
            self.window.advance(1)?;
            self.line += newlines;
            return Ok(());
        }

        while self.window.peek().is_some_and(is_space) {
            let run = self.window.as_slice();
            let len = find_non_space(run);
            // advance may refill the window, so count first
            let newlines = count_newlines(&run[..len]);
            self.window.advance(len)?;
            self.line += newlines;
        }
        Ok(())
    }

    /// Skip the rest of the header line up to its line feed.
    fn skip_line(&mut self) -> Result<()> {
        loop {
            if self.window.is_eof() {
                return Err(self.syntax(SyntaxError::EofInComment));
            }
            let run = self.window.as_slice();
            match memchr::memchr(b'\n', run) {
                Some(pos) => return Ok(self.window.advance(pos)?),
                None => {
                    let len = run.len();
                    self.window.advance(len)?
                }
            }
        }
    }

    /// Check that the header line ends here, accepting a `"\r\n"` line break.
    /// The line feed itself is left in the window.
    fn end_header_line(&mut self, field: Field) -> Result<()> {
        let eof = match field {
            Field::Header => SyntaxError::EofInName,
            Field::Comment => SyntaxError::EofInComment,
        };
        let byte = match self.window.peek() {
            Some(b'\r') => {
                self.window.advance(1)?;
                match self.window.peek() {
                    Some(b'\n') => return Ok(()),
                    None => return Err(self.syntax(eof)),
                    Some(_) => b'\r',
                }
            }
            Some(b'\n') => return Ok(()),
            Some(byte) => byte,
            None => return Err(self.syntax(eof)),
        };
        Err(self.syntax(SyntaxError::UnexpectedByte { byte, field }))
    }

    fn read_name(&mut self) -> Result<String> {
        let mut name = Accumulator::new();
        self.copy_word(&mut name)?;
        if name.is_empty() {
            return Err(self.syntax(SyntaxError::EmptyName));
        }
        if self.window.is_eof() {
            return Err(self.syntax(SyntaxError::EofInName));
        }
        Ok(name.into_string())
    }

    fn read_comment(&mut self) -> Result<Option<String>> {
        if !self.window.peek().is_some_and(is_blank) {
            self.end_header_line(Field::Header)?;
            return Ok(None);
        }
        if flag_is_not_set(CONFIG, COMPUTE_COMMENT) {
            self.skip_line()?;
            return Ok(None);
        }

        let verbatim = flag_is_set(CONFIG, VERBATIM_BLANKS);
        self.skip_blanks(false)?;
        let mut comment = Accumulator::new();
        loop {
            self.copy_word(&mut comment)?;
            match self.window.peek() {
                Some(byte) if is_blank(byte) => {
                    self.skip_blanks(verbatim)?;
                    // trailing blanks are dropped
                    if self.window.peek().is_some_and(is_graphic) {
                        if verbatim {
                            comment.append(&self.blanks)?;
                        } else {
                            comment.push(b' ')?;
                        }
                    }
                }
                Some(_) => break,
                None => return Err(self.syntax(SyntaxError::EofInComment)),
            }
        }
        self.end_header_line(Field::Comment)?;
        Ok(Some(comment.into_string()))
    }

    fn read_sequence(&mut self) -> Result<(String, usize)> {
        debug_assert_eq!(self.window.peek(), Some(b'\n'));
        let mut sequence = Accumulator::new();
        let mut count = 0;

        self.skip_whitespace()?;
        while self.window.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
            count += if flag_is_set(CONFIG, COMPUTE_SEQUENCE) {
                self.copy_word(&mut sequence)?
            } else {
                self.skip_word()?
            };
            self.skip_whitespace()?;
        }

        if count == 0 {
            return Err(self.syntax(SyntaxError::EmptySequence));
        }
        Ok((sequence.into_string(), count))
    }
}

impl<const CONFIG: Config, I: Read> FromInputData<I> for FastaReader<CONFIG, I> {
    fn from_input(input: I) -> Result<Self> {
        Self::new(input)
    }
}

impl<const CONFIG: Config, I: Read> Iterator for FastaReader<CONFIG, I> {
    type Item = Result<Record>;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            None
        } else {
            Some(self.read_record())
        }
    }
}

impl<const CONFIG: Config, I: Read> FusedIterator for FastaReader<CONFIG, I> {}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG_VERBATIM: Config = ParserOptions::default().verbatim_blanks().config();
    const CONFIG_NO_COMMENT: Config = ParserOptions::default().ignore_comments().config();
    const CONFIG_LEN_ONLY: Config = ParserOptions::default().ignore_sequence().config();

    static FASTA: &[u8] =
        b">head first\nTTTCTtaAAAA\nAGAAAA\nACAAN\n\n>hhh\nCTCTTANNAAA\nCAAAnAGCTTT\n>A B\t C \nCCAC"
            .as_slice();

    fn parse<const CONFIG: Config>(data: &[u8]) -> Vec<Record> {
        FastaReader::<CONFIG, _>::from_slice(data)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap()
    }

    fn parse_err(data: &[u8]) -> Error {
        FastaReader::<DEFAULT_CONFIG, _>::from_slice(data)
            .unwrap()
            .find_map(|r| r.err())
            .unwrap()
    }

    #[test]
    fn test_records() {
        let records = parse::<DEFAULT_CONFIG>(FASTA);
        let fields: Vec<_> = records
            .iter()
            .map(|r| (r.name(), r.comment(), r.sequence(), r.line()))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("head", Some("first"), "TTTCTtaAAAAAGAAAAACAAN", 1),
                ("hhh", None, "CTCTTANNAAACAAAnAGCTTT", 6),
                ("A", Some("B C"), "CCAC", 9),
            ]
        );
        assert_eq!(records[0].sequence_len(), 22);
        assert_eq!(records[0].name_len(), 4);
        assert_eq!(records[1].comment_len(), 0);
    }

    #[test]
    fn test_window_sizes() {
        let expected = parse::<DEFAULT_CONFIG>(FASTA);
        for capacity in 1..=FASTA.len() + 1 {
            let reader = FastaReader::<DEFAULT_CONFIG, _>::with_capacity(FASTA, capacity).unwrap();
            let records: Vec<_> = reader.collect::<Result<_>>().unwrap();
            assert_eq!(records, expected, "capacity {capacity}");
        }
    }

    #[test]
    fn test_done_flag() {
        let mut f = FastaReader::<DEFAULT_CONFIG, _>::from_slice(b">A\nACGT\n>B\nGGCC\n").unwrap();
        assert!(!f.is_done());
        let a = f.read_record().unwrap();
        assert_eq!((a.name(), a.comment(), a.sequence()), ("A", None, "ACGT"));
        assert!(!f.is_done());
        let b = f.read_record().unwrap();
        assert_eq!((b.name(), b.comment(), b.sequence()), ("B", None, "GGCC"));
        assert!(f.is_done());
        assert_eq!(f.records_read(), 2);
        assert!(matches!(f.read_record(), Err(Error::Finished)));
        assert_eq!(f.error_message(), None);
    }

    #[test]
    fn test_comment_states() {
        let r = parse::<DEFAULT_CONFIG>(b">A comment here\nACGT\n");
        assert_eq!(r[0].comment(), Some("comment here"));
        let r = parse::<DEFAULT_CONFIG>(b">A\nACGT\n");
        assert_eq!(r[0].comment(), None);
        let r = parse::<DEFAULT_CONFIG>(b">A \t \nACGT\n");
        assert_eq!(r[0].comment(), Some(""));
        let r = parse::<DEFAULT_CONFIG>(b">A   lots \t of   space  \nACGT\n");
        assert_eq!(r[0].comment(), Some("lots of space"));
        let r = parse::<CONFIG_VERBATIM>(b">A   lots \t of   space  \nACGT\n");
        assert_eq!(r[0].comment(), Some("lots \t of   space"));
        let r = parse::<CONFIG_NO_COMMENT>(b">A lots\x01of junk\nACGT\n");
        assert_eq!((r[0].name(), r[0].comment()), ("A", None));
    }

    #[test]
    fn test_crlf() {
        let r = parse::<DEFAULT_CONFIG>(b">A desc\r\nAC\r\nGT\r\n\r\n>B\r\nT\r\n");
        assert_eq!(r[0].comment(), Some("desc"));
        assert_eq!(r[0].sequence(), "ACGT");
        assert_eq!((r[1].name(), r[1].sequence(), r[1].line()), ("B", "T", 5));
    }

    #[test]
    fn test_sequence_len_only() {
        let r = parse::<CONFIG_LEN_ONLY>(FASTA);
        assert_eq!(r[0].sequence(), "");
        assert_eq!(r[0].sequence_len(), 22);
        assert_eq!(r[2].sequence_len(), 4);
    }

    #[test]
    fn test_blank_lines() {
        let r = parse::<DEFAULT_CONFIG>(b">A\n\n\nAC\n\n  \nGT\n\n\n>B x\n\nGG\n\n");
        assert_eq!(r.len(), 2);
        assert_eq!(r[0].sequence(), "ACGT");
        assert_eq!((r[1].name(), r[1].comment(), r[1].line()), ("B", Some("x"), 10));
    }

    #[test]
    fn test_errors() {
        let cases = [
            (">\nACGT\n", SyntaxError::EmptyName, 1),
            (">", SyntaxError::EmptyName, 1),
            ("> A\nACGT\n", SyntaxError::EmptyName, 1),
            (">A", SyntaxError::EofInName, 1),
            (">A\r", SyntaxError::EofInName, 1),
            (">A some", SyntaxError::EofInComment, 1),
            (">A some ", SyntaxError::EofInComment, 1),
            (">A\n  \n\t\n>B\nAC\n", SyntaxError::EmptySequence, 4),
            (">A\n>B\nAC\n", SyntaxError::EmptySequence, 2),
            (">A\nAC\nGT\n*\n", SyntaxError::ExpectedMarker, 4),
            (">A\n123\n", SyntaxError::EmptySequence, 2),
            (
                ">A\x01\nAC\n",
                SyntaxError::UnexpectedByte {
                    byte: 0x01,
                    field: Field::Header,
                },
                1,
            ),
            (
                ">A x\x7fy\nAC\n",
                SyntaxError::UnexpectedByte {
                    byte: 0x7f,
                    field: Field::Comment,
                },
                1,
            ),
            (
                ">A\rx\nAC\n",
                SyntaxError::UnexpectedByte {
                    byte: b'\r',
                    field: Field::Header,
                },
                1,
            ),
        ];
        for (data, kind, line) in cases {
            let e = parse_err(data.as_bytes());
            assert_eq!(e.syntax(), Some(kind), "{data:?}");
            assert_eq!(e.line(), Some(line), "{data:?}");
        }
    }

    #[test]
    fn test_sticky_error() {
        let mut f = FastaReader::<DEFAULT_CONFIG, _>::from_slice(b">A\nAC\n>\nGT\n>C\nTT\n").unwrap();
        assert!(f.read_record().is_ok());
        let e = f.read_record().unwrap_err();
        assert_eq!(e.to_string(), "empty name on line 3");
        assert!(f.is_done());
        assert_eq!(f.error_message(), Some("empty name on line 3"));
        assert!(matches!(f.read_record(), Err(Error::Finished)));
        assert_eq!(f.next().map(|r| r.is_ok()), None);
    }

    #[test]
    fn test_init() {
        let e = FastaReader::<DEFAULT_CONFIG, _>::from_slice(b"").err().unwrap();
        assert!(matches!(e, Error::EmptyInput));
        let e = FastaReader::<DEFAULT_CONFIG, _>::from_slice(b"ACGT\n").err().unwrap();
        assert!(matches!(e, Error::MissingMarker));
        let e = FastaReader::<DEFAULT_CONFIG, _>::from_slice(b"\n>A\nAC\n").err().unwrap();
        assert!(matches!(e, Error::MissingMarker));
    }

    #[test]
    fn test_long_tokens() {
        let name = "n".repeat(5000);
        let seq = "ACGT".repeat(3000);
        let mut data = format!(">{name} {}\n", "c".repeat(300));
        for line in seq.as_bytes().chunks(61) {
            data.push_str(std::str::from_utf8(line).unwrap());
            data.push('\n');
        }
        let r = parse::<DEFAULT_CONFIG>(data.as_bytes());
        assert_eq!(r[0].name(), name);
        assert_eq!(r[0].comment_len(), 300);
        assert_eq!(r[0].sequence(), seq);
    }

    #[test]
    fn test_into_inner() {
        let f = FastaReader::<DEFAULT_CONFIG, _>::new(&b">A\nAC\n"[..]).unwrap();
        let rest: &[u8] = f.into_inner();
        assert!(rest.is_empty());
    }
}
