//! Streaming FASTA parser.
//!
//! Records are parsed from any [`Read`](std::io::Read) through one fixed-size
//! window, so inputs of any size can be read from unseekable streams such as
//! pipes. Token boundaries are located with SIMD scans, and malformed input is
//! rejected with a line-numbered [`Error`].

mod accumulator;
pub mod config;
pub mod error;
pub mod input;
pub mod parser;
pub mod scan;
pub mod window;

pub use config::{Config, ParserOptions};
pub use error::{Error, Field, Result, SyntaxError};
pub use parser::{DefaultFastaReader, FastaReader, Record};

#[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
pub(crate) mod simd {
    mod avx2;
    pub use avx2::*;
}
#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
pub(crate) mod simd {
    mod neon;
    pub use neon::*;
}
#[cfg(not(any(
    all(target_arch = "x86_64", target_feature = "avx2"),
    all(target_arch = "aarch64", target_feature = "neon")
)))]
pub(crate) mod simd {
    mod fallback;
    pub use fallback::*;
}
