//! Forward-only byte source.

use alloc::vec::Vec;

use crate::error::Error;

/// Size of each step when reading a run of bytes of untrusted length.
const CHUNK: usize = 4096;

/// A sequential input the decoder pulls bytes from.
pub trait Input {
    /// Read up to `buf.len()` bytes into the front of `buf`.
    ///
    /// Returns the number of bytes read. Zero, for a non-empty `buf`, means
    /// the input has ended.
    fn read_up_to(&mut self, buf: &mut [u8]) -> Result<usize, Error>;
}

impl Input for &[u8] {
    fn read_up_to(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let n = buf.len().min(self.len());
        let (head, tail) = self.split_at(n);
        buf[..n].copy_from_slice(head);
        *self = tail;
        Ok(n)
    }
}

impl<I: Input + ?Sized> Input for &mut I {
    fn read_up_to(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        (**self).read_up_to(buf)
    }
}

/// An [`Input`] that counts the bytes taken from it.
pub struct Source<'a> {
    input: &'a mut dyn Input,
    offset: usize,
}

impl<'a> Source<'a> {
    /// Wrap an input, counting from `offset` bytes already consumed.
    pub fn new(input: &'a mut dyn Input, offset: usize) -> Self {
        Self { input, offset }
    }

    /// Bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Fill `buf` completely, or fail with [`Error::ShortRead`].
    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        let offset = self.offset;
        let filled = self.fill(buf)?;

        if filled < buf.len() {
            Err(Error::ShortRead {
                requested: buf.len(),
                offset,
            })?;
        }

        Ok(())
    }

    /// Take an exact number of bytes as an array.
    pub fn take<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let mut buf = [0; N];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Take an exact number of bytes.
    ///
    /// The buffer grows as bytes arrive, so a corrupt length fails with a
    /// short read rather than a huge allocation.
    pub fn take_vec(&mut self, n: usize) -> Result<Vec<u8>, Error> {
        let offset = self.offset;
        let mut out = Vec::with_capacity(n.min(CHUNK));

        while out.len() < n {
            let step = (n - out.len()).min(CHUNK);
            let start = out.len();
            out.resize(start + step, 0);

            let filled = self.fill(&mut out[start..])?;
            if filled < step {
                Err(Error::ShortRead {
                    requested: n,
                    offset,
                })?;
            }
        }

        Ok(out)
    }

    /// Take every byte left in the input, possibly none.
    pub fn take_remaining(&mut self) -> Result<Vec<u8>, Error> {
        let mut out = Vec::new();
        let mut buf = [0; CHUNK];

        loop {
            let n = self.input.read_up_to(&mut buf)?;
            if n == 0 {
                break;
            }

            self.offset += n;
            out.extend_from_slice(&buf[..n]);
        }

        Ok(out)
    }

    /// Read until `buf` is full or the input ends, returning the count read.
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let mut filled = 0;

        while filled < buf.len() {
            let n = self.input.read_up_to(&mut buf[filled..])?;
            if n == 0 {
                break;
            }

            filled += n;
            self.offset += n;
        }

        Ok(filled)
    }
}
