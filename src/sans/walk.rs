//! Recursive descent over a value being decoded.

use alloc::{string::String, vec::Vec};

use crate::{avec::Decode, error::Error};

use super::{
    config::Config,
    context::Context,
    directive::{DirectiveError, Directives, Endian, Length},
    source::{Input, Source},
    table::FieldTable,
};

/// The byte count of a variable-length node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
    Exact(usize),
    /// Everything left in the input.
    Remaining,
}

/// State threaded through one decode: the byte source, the table of recorded
/// field values, and the configuration.
pub struct Walker<'a> {
    source: Source<'a>,
    fields: &'a mut FieldTable,
    config: &'a Config,
}

impl<'a> Walker<'a> {
    pub fn new(source: Source<'a>, fields: &'a mut FieldTable, config: &'a Config) -> Self {
        Self {
            source,
            fields,
            config,
        }
    }

    /// Decode a node, then record its value if it is an integer.
    pub fn decode<T: Decode + ?Sized>(
        &mut self,
        value: &mut T,
        ctx: &Context<'_>,
    ) -> Result<(), Error> {
        log::trace!("decoding '{}' at offset {:#x}", ctx.path(), self.source.offset());

        value.decode(self, ctx)?;

        if let Some(n) = value.field_value() {
            self.store(ctx.path(), n);
        }

        Ok(())
    }

    /// Begin decoding the fields of a record.
    pub fn record<'r>(&'r mut self, ctx: &'r Context<'_>) -> Fields<'r, 'a> {
        Fields {
            walker: self,
            parent: ctx,
            greedy: None,
        }
    }

    fn store(&mut self, path: &str, value: u64) {
        if !self.config.store_field_values || path.is_empty() {
            return;
        }

        log::debug!("recording '{path}' = {value}");
        self.fields.insert(path, value);
    }

    /// Work out how many bytes or items a variable-length node holds,
    /// reading a length prefix if it has no length directive.
    pub fn extent(&mut self, ctx: &Context<'_>) -> Result<Extent, Error> {
        let length = match ctx.length() {
            Length::Literal(n) => return Ok(Extent::Exact(n)),
            Length::Greedy => return Ok(Extent::Remaining),
            Length::Reference(reference) => {
                self.fields
                    .get(reference)
                    .ok_or_else(|| Error::UnresolvedReference {
                        reference: reference.into(),
                        path: ctx.path().into(),
                    })?
            }
            Length::None => self.length_prefix(ctx)?,
        };

        usize::try_from(length)
            .map(Extent::Exact)
            .map_err(|_| Error::LengthOverflow {
                length,
                path: ctx.path().into(),
            })
    }

    /// Read a length prefix in the node's byte order.
    fn length_prefix(&mut self, ctx: &Context<'_>) -> Result<u64, Error> {
        const N: usize = size_of::<u64>();
        let mut buf = [0; N];
        let width = ctx.length_size();

        Ok(match ctx.endian() {
            Endian::Little => {
                self.source.read_exact(&mut buf[..width])?;
                u64::from_le_bytes(buf)
            }
            Endian::Big => {
                self.source.read_exact(&mut buf[N - width..])?;
                u64::from_be_bytes(buf)
            }
        })
    }

    /// Take an exact number of bytes as an array.
    pub fn take<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        self.source.take()
    }

    /// Take the bytes of a variable-length node.
    pub fn take_extent(&mut self, extent: Extent) -> Result<Vec<u8>, Error> {
        match extent {
            Extent::Exact(n) => self.source.take_vec(n),
            Extent::Remaining => self.source.take_remaining(),
        }
    }

    /// Bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.source.offset()
    }

    /// Walk a separate input, sharing this walker's recorded field values.
    ///
    /// `offset` positions errors from the nested input within the outer one.
    pub fn nested<'n>(&'n mut self, input: &'n mut dyn Input, offset: usize) -> Walker<'n> {
        Walker {
            source: Source::new(input, offset),
            fields: &mut *self.fields,
            config: self.config,
        }
    }

    pub fn fields(&self) -> &FieldTable {
        &*self.fields
    }

    pub fn config(&self) -> &Config {
        self.config
    }
}

/// Decoder for the fields of one record, in declaration order.
pub struct Fields<'r, 'a> {
    walker: &'r mut Walker<'a>,
    parent: &'r Context<'r>,
    greedy: Option<String>,
}

impl Fields<'_, '_> {
    /// Decode the next field of the record.
    ///
    /// Fails without decoding if an earlier field of the record was greedy.
    pub fn field<T: Decode + ?Sized>(
        &mut self,
        name: &str,
        directives: &Directives<'_>,
        value: &mut T,
    ) -> Result<(), Error> {
        if let Some(path) = self.greedy.take() {
            Err(Error::Directive {
                path,
                source: DirectiveError::GreedyNotLast,
            })?;
        }

        let ctx = self.parent.child(name, directives)?;

        if ctx.length() == Length::Greedy {
            self.greedy = Some(ctx.path().into());
        }

        self.walker.decode(value, &ctx)
    }

    /// Decode the next field of the record, parsing its directives from
    /// `key`/`value` string tags with [`Directives::with`].
    ///
    /// A malformed tag is reported at the field's path.
    pub fn tagged<T: Decode + ?Sized>(
        &mut self,
        name: &str,
        tags: &[(&str, &str)],
        value: &mut T,
    ) -> Result<(), Error> {
        let directives = tags
            .iter()
            .try_fold(Directives::NONE, |d, &(key, tag)| d.with(key, tag))
            .map_err(|source| Error::Directive {
                path: self.parent.join(name),
                source,
            })?;

        self.field(name, &directives, value)
    }
}

/// Collect the elements of a greedy sequence until the input runs out.
pub(crate) fn decode_remaining<T: Decode + Default>(
    w: &mut Walker<'_>,
    ctx: &Context<'_>,
) -> Result<Vec<T>, Error> {
    let rest = w.source.take_remaining()?;
    let start = w.offset() - rest.len();
    let end = w.offset();

    let mut input = rest.as_slice();
    let mut w = w.nested(&mut input, start);
    let mut out = Vec::new();

    while w.offset() < end {
        let before = w.offset();

        let mut item = T::default();
        w.decode(&mut item, &ctx.element(out.len()))?;

        // Zero-size elements would never exhaust the input.
        if w.offset() == before {
            break;
        }

        out.push(item);
    }

    Ok(out)
}
