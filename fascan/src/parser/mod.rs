//! Record grammar and session driver.

mod fasta;
mod record;

pub use fasta::*;
pub use record::*;
