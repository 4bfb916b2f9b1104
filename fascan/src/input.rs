//! Byte sources and constructor helpers.
//!
//! Every source is a plain [`Read`]: the parser pulls from it one window at a
//! time, so none of them require the input to be seekable.

use crate::error::Result;
use deko::read::AnyDecoder;
use memmap2::Mmap;
use std::fs::File;
use std::io::{self, Read, Stdin, stdin};
use std::path::Path;

pub trait FromInputData<I: Read>: Sized {
    /// Build the struct from a byte source.
    fn from_input(input: I) -> Result<Self>;
}

/// Slice input.
/// It does not support transparent decompression.
pub struct SliceInput<'a> {
    data: &'a [u8],
}

impl<'a> SliceInput<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Returns the bytes not yet handed to the parser.
    pub fn remaining(&self) -> &'a [u8] {
        self.data
    }
}

impl Read for SliceInput<'_> {
    #[inline(always)]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.data.read(buf)
    }
}

pub trait FromSlice<'a>: FromInputData<SliceInput<'a>> {
    /// Build the struct from a slice.
    /// It does not support transparent decompression.
    #[inline(always)]
    fn from_slice(data: &'a [u8]) -> Result<Self> {
        Self::from_input(SliceInput::new(data))
    }
}

impl<'a, F: FromInputData<SliceInput<'a>>> FromSlice<'a> for F {}

/// Memory mapped file.
/// It does not support transparent decompression.
pub struct MmapInput {
    // empty files cannot be mapped
    mmap: Option<Mmap>,
    pos: usize,
}

impl MmapInput {
    pub fn new<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        let mmap = if file.metadata()?.len() == 0 {
            None
        } else {
            // Unsafe: the mapping is only valid as long as the file is not truncated.
            Some(unsafe { Mmap::map(&file)? })
        };
        Ok(Self { mmap, pos: 0 })
    }

    #[inline(always)]
    fn data(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or_default()
    }
}

impl Read for MmapInput {
    #[inline(always)]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let pos = self.pos;
        let n = (&self.data()[pos..]).read(buf)?;
        self.pos += n;
        Ok(n)
    }
}

pub trait FromMmap: FromInputData<MmapInput> {
    /// Build the struct from a memory mapped file.
    /// It does not support transparent decompression.
    #[inline(always)]
    fn from_file_mmap<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_input(MmapInput::new(path)?)
    }
}

impl<F: FromInputData<MmapInput>> FromMmap for F {}

/// Reader input.
/// It supports transparent decompression.
pub struct ReaderInput<R: Read + Send> {
    decoder: AnyDecoder<R>,
}

impl<R: Read + Send> ReaderInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            decoder: AnyDecoder::new(reader),
        }
    }

    /// Returns the type of compression format detected.
    #[inline(always)]
    pub fn compression_format(&mut self) -> io::Result<Option<deko::Format>> {
        let format = self.decoder.kind()?;
        if format == deko::Format::Verbatim {
            Ok(None)
        } else {
            Ok(Some(format))
        }
    }

    /// Returns `true` if compression has been detected.
    #[inline(always)]
    pub fn is_compressed(&mut self) -> io::Result<bool> {
        Ok(self.compression_format()?.is_some())
    }
}

impl<R: Read + Send> Read for ReaderInput<R> {
    #[inline(always)]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.decoder.read(buf)
    }
}

pub trait FromReader<R: Read + Send>: FromInputData<ReaderInput<R>> {
    /// Build the struct from a reader.
    /// It supports transparent decompression.
    #[inline(always)]
    fn from_reader(reader: R) -> Result<Self> {
        Self::from_input(ReaderInput::new(reader))
    }
}

impl<R: Read + Send, F: FromInputData<ReaderInput<R>>> FromReader<R> for F {}

/// File input.
/// It supports transparent decompression.
pub type FileInput = ReaderInput<File>;

impl FileInput {
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::new(File::open(path)?))
    }
}

pub trait FromFile: FromInputData<FileInput> {
    /// Build the struct from a file.
    /// It supports transparent decompression.
    #[inline(always)]
    fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_input(FileInput::open(path)?)
    }
}

impl<F: FromInputData<FileInput>> FromFile for F {}

/// Stdin input.
/// It supports transparent decompression.
pub type StdinInput = ReaderInput<Stdin>;

pub trait FromStdin: FromInputData<StdinInput> {
    /// Build the struct from stdin.
    /// It supports transparent decompression.
    #[inline(always)]
    fn from_stdin() -> Result<Self> {
        Self::from_input(StdinInput::new(stdin()))
    }
}

impl<F: FromInputData<StdinInput>> FromStdin for F {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_input() {
        let mut input = SliceInput::new(b">a\nAC");
        let mut buf = [0; 4];
        assert_eq!(input.read(&mut buf).unwrap(), 4);
        assert_eq!(&buf, b">a\nA");
        assert_eq!(input.remaining(), b"C");
    }

    #[test]
    fn test_plain_reader_is_verbatim() {
        let mut input = ReaderInput::new(&b">a\nACGT\n"[..]);
        assert!(!input.is_compressed().unwrap());
        let mut out = Vec::new();
        input.read_to_end(&mut out).unwrap();
        assert_eq!(out, b">a\nACGT\n");
    }
}
