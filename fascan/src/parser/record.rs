/// One record: a name, an optional comment and a sequence.
///
/// The comment distinguishes three states: absent (nothing followed the
/// name), empty (only blanks followed the name) and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    name: String,
    comment: Option<String>,
    sequence: String,
    sequence_len: usize,
    line: usize,
}

impl Record {
    #[inline(always)]
    pub(crate) fn from_parts(
        name: String,
        comment: Option<String>,
        sequence: String,
        sequence_len: usize,
        line: usize,
    ) -> Self {
        Self {
            name,
            comment,
            sequence,
            sequence_len,
            line,
        }
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Get the residues, without line breaks.
    ///
    /// This is empty when the parser was configured with
    /// [`ignore_sequence`](crate::ParserOptions::ignore_sequence).
    #[inline(always)]
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    #[inline(always)]
    pub fn name_len(&self) -> usize {
        self.name.len()
    }

    /// Length of the comment, `0` when it is absent.
    #[inline(always)]
    pub fn comment_len(&self) -> usize {
        self.comment.as_ref().map_or(0, String::len)
    }

    /// Number of residues, also available when the sequence is not computed.
    #[inline(always)]
    pub fn sequence_len(&self) -> usize {
        self.sequence_len
    }

    /// The 1-based line number of the header.
    #[inline(always)]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Get owned `(name, comment, sequence)`.
    pub fn into_parts(self) -> (String, Option<String>, String) {
        (self.name, self.comment, self.sequence)
    }
}
