//! Compile-time configuration of the parser.

/// Configuration for the parser, represented using bitflags.
pub type Config = u64;

pub mod advanced {
    //! Bitflags used for the configuration.

    use super::*;

    #[inline(always)]
    pub const fn flag_is_set(config: Config, flag: Config) -> bool {
        config & flag != 0
    }

    #[inline(always)]
    pub const fn flag_is_not_set(config: Config, flag: Config) -> bool {
        config & flag == 0
    }

    pub const DEFAULT_CONFIG: Config = COMPUTE_COMMENT | COMPUTE_SEQUENCE;

    pub const COMPUTE_COMMENT: Config = 1 << 0;
    pub const COMPUTE_SEQUENCE: Config = 1 << 1;
    pub const VERBATIM_BLANKS: Config = 1 << 2;
}

use advanced::*;

/// Compile-time builder for the configuration of the parser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParserOptions(Config);

impl ParserOptions {
    /// Creates a default configuration, which computes comments and sequences.
    #[inline(always)]
    pub const fn default() -> Self {
        Self(DEFAULT_CONFIG)
    }

    /// Load an existing configuration.
    #[inline(always)]
    pub const fn from_config(config: Config) -> Self {
        Self(config)
    }

    /// Build the configuration of the parser.
    #[inline(always)]
    pub const fn config(self) -> Config {
        self.0
    }

    /// Enable the computation of comments (default).
    #[inline(always)]
    pub const fn compute_comments(self) -> Self {
        Self(self.0 | COMPUTE_COMMENT)
    }

    /// Disable the computation of comments.
    ///
    /// The rest of each header line is skipped without validation
    /// and every record reports an absent comment.
    #[inline(always)]
    pub const fn ignore_comments(self) -> Self {
        Self(self.0 & !(COMPUTE_COMMENT | VERBATIM_BLANKS))
    }

    /// Enable the computation of sequences (default).
    #[inline(always)]
    pub const fn compute_sequence(self) -> Self {
        Self(self.0 | COMPUTE_SEQUENCE)
    }

    /// Disable the computation of sequences.
    ///
    /// Residues are still validated and counted, so
    /// [`Record::sequence_len`](crate::Record::sequence_len) stays exact.
    #[inline(always)]
    pub const fn ignore_sequence(self) -> Self {
        Self(self.0 & !COMPUTE_SEQUENCE)
    }

    /// Collapse every blank run inside a comment into a single space (default).
    #[inline(always)]
    pub const fn collapse_blanks(self) -> Self {
        Self(self.0 & !VERBATIM_BLANKS)
    }

    /// Keep blank runs inside a comment exactly as they appear in the input.
    /// This implies [`compute_comments`](#method.compute_comments).
    #[inline(always)]
    pub const fn verbatim_blanks(self) -> Self {
        Self(self.0 | VERBATIM_BLANKS | COMPUTE_COMMENT)
    }
}
