//! Per-node decoding context.

use alloc::string::{String, ToString};

use crate::error::Error;

use super::{
    config::Config,
    directive::{Directives, Endian, Length, check_length_size},
};

/// Where a node sits in the value being decoded, and how to read it.
///
/// A context is created for every field and element and never changes
/// afterward. Byte order and length-prefix width are inherited from the
/// parent unless the node's own directives override them; the length
/// directive and flags are never inherited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context<'a> {
    path: String,
    endian: Endian,
    length_size: usize,
    length: Length<'a>,
    flags: &'a str,
}

impl Context<'static> {
    /// The context of the value passed to a decode call.
    pub fn root(config: &Config) -> Result<Self, Error> {
        let length_size = check_length_size(config.length_size)?;

        Ok(Self {
            path: String::new(),
            endian: Endian::default(),
            length_size,
            length: Length::None,
            flags: "",
        })
    }
}

impl Context<'_> {
    /// Derive the context of a field, applying its directives.
    ///
    /// Fails if a directive is malformed. A [`Length::Reference`] is not
    /// looked up here, since the referenced field may not be decoded yet.
    pub fn child<'d>(&self, name: &str, directives: &Directives<'d>) -> Result<Context<'d>, Error> {
        let path = self.join(name);

        let length_size = match directives.length_size {
            Some(n) => match check_length_size(n) {
                Ok(n) => n,
                Err(source) => return Err(Error::Directive { path, source }),
            },
            None => self.length_size,
        };

        Ok(Context {
            path,
            endian: directives.endian.unwrap_or(self.endian),
            length_size,
            length: directives.length,
            flags: directives.flags,
        })
    }

    /// Derive the context of a sequence element. Elements carry no
    /// directives of their own.
    pub fn element(&self, index: usize) -> Context<'static> {
        Context {
            path: self.join(&index.to_string()),
            endian: self.endian,
            length_size: self.length_size,
            length: Length::None,
            flags: "",
        }
    }

    pub(crate) fn join(&self, name: &str) -> String {
        if self.path.is_empty() {
            name.to_string()
        } else if name.is_empty() {
            self.path.clone()
        } else {
            let mut path = String::with_capacity(self.path.len() + 1 + name.len());
            path.push_str(&self.path);
            path.push('.');
            path.push_str(name);
            path
        }
    }

    /// Dot-separated field names from the root to this node.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Width, in bytes, of this node's length prefix.
    pub fn length_size(&self) -> usize {
        self.length_size
    }

    pub fn length(&self) -> Length<'_> {
        self.length
    }

    /// Whether the node's flags contain a token exactly.
    pub fn has_flag(&self, name: &str) -> bool {
        !name.is_empty() && self.flags.split(',').any(|f| f == name)
    }
}
