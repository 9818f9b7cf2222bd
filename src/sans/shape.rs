//! Decoding rules for each supported shape of value.

use alloc::{boxed::Box, collections::BTreeMap, string::String, vec::Vec};

use crate::{avec::Decode, error::Error};

use super::{
    context::Context,
    directive::Endian,
    walk::{Extent, Walker, decode_remaining},
};

macro_rules! decode_integer {
    ($($t:ty),*) => {$(
        impl Decode for $t {
            fn decode(&mut self, w: &mut Walker<'_>, ctx: &Context<'_>) -> Result<(), Error> {
                let r = w.take::<{ size_of::<$t>() }>()?;

                *self = match ctx.endian() {
                    Endian::Big => <$t>::from_be_bytes(r),
                    Endian::Little => <$t>::from_le_bytes(r),
                };

                Ok(())
            }

            fn field_value(&self) -> Option<u64> {
                u64::try_from(*self).ok()
            }
        }
    )*};
}

decode_integer!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

macro_rules! decode_float {
    ($($t:ty),*) => {$(
        /// Floats ignore byte order directives.
        impl Decode for $t {
            fn decode(&mut self, w: &mut Walker<'_>, _: &Context<'_>) -> Result<(), Error> {
                *self = <$t>::from_le_bytes(w.take()?);
                Ok(())
            }
        }
    )*};
}

decode_float!(f32, f64);

impl Decode for bool {
    fn decode(&mut self, w: &mut Walker<'_>, _: &Context<'_>) -> Result<(), Error> {
        let [b] = w.take::<1>()?;
        *self = b != 0;
        Ok(())
    }
}

impl Decode for String {
    fn decode(&mut self, w: &mut Walker<'_>, ctx: &Context<'_>) -> Result<(), Error> {
        let extent = w.extent(ctx)?;
        let bytes = w.take_extent(extent)?;

        *self = String::from_utf8(bytes).map_err(|_| Error::InvalidText {
            path: ctx.path().into(),
        })?;

        Ok(())
    }
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    fn decode(&mut self, w: &mut Walker<'_>, ctx: &Context<'_>) -> Result<(), Error> {
        for (i, item) in self.iter_mut().enumerate() {
            w.decode(item, &ctx.element(i))?;
        }

        Ok(())
    }
}

/// The vector is replaced only once every element has decoded.
impl<T: Decode + Default> Decode for Vec<T> {
    fn decode(&mut self, w: &mut Walker<'_>, ctx: &Context<'_>) -> Result<(), Error> {
        *self = match w.extent(ctx)? {
            Extent::Exact(n) => {
                let mut items = Vec::new();

                for i in 0..n {
                    let mut item = T::default();
                    w.decode(&mut item, &ctx.element(i))?;
                    items.push(item);
                }

                items
            }
            Extent::Remaining => decode_remaining(w, ctx)?,
        };

        Ok(())
    }
}

impl<T: Decode + ?Sized> Decode for Box<T> {
    fn decode(&mut self, w: &mut Walker<'_>, ctx: &Context<'_>) -> Result<(), Error> {
        (**self).decode(w, ctx)
    }

    fn field_value(&self) -> Option<u64> {
        (**self).field_value()
    }
}

/// The pointee is decoded from a default value, and the option is filled
/// only if that succeeds.
impl<T: Decode + Default> Decode for Option<T> {
    fn decode(&mut self, w: &mut Walker<'_>, ctx: &Context<'_>) -> Result<(), Error> {
        let mut value = T::default();
        value.decode(w, ctx)?;
        *self = Some(value);
        Ok(())
    }

    fn field_value(&self) -> Option<u64> {
        self.as_ref().and_then(T::field_value)
    }
}

fn unsupported<T: ?Sized>(ctx: &Context<'_>) -> Result<(), Error> {
    Err(Error::UnsupportedType {
        type_name: core::any::type_name::<T>(),
        path: ctx.path().into(),
    })
}

impl Decode for char {
    fn decode(&mut self, _: &mut Walker<'_>, ctx: &Context<'_>) -> Result<(), Error> {
        unsupported::<Self>(ctx)
    }
}

impl<K, V> Decode for BTreeMap<K, V> {
    fn decode(&mut self, _: &mut Walker<'_>, ctx: &Context<'_>) -> Result<(), Error> {
        unsupported::<Self>(ctx)
    }
}

#[cfg(feature = "std")]
impl<K, V, S> Decode for std::collections::HashMap<K, V, S> {
    fn decode(&mut self, _: &mut Walker<'_>, ctx: &Context<'_>) -> Result<(), Error> {
        unsupported::<Self>(ctx)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        avec::decode_slice,
        sans::{config::Config, directive::Directives, source::Source, table::FieldTable},
    };

    use super::*;

    #[test]
    fn integers_honour_byte_order() {
        let config = Config::DEFAULT;
        let mut fields = FieldTable::new();
        let mut input: &[u8] = &[0x12, 0x34, 0x12, 0x34];
        let mut w = Walker::new(Source::new(&mut input, 0), &mut fields, &config);

        let root = Context::root(&config).unwrap();
        let big = root
            .child("a", &Directives {
                endian: Some(Endian::Big),
                ..Default::default()
            })
            .unwrap();

        let (mut a, mut b) = (0u16, 0u16);
        w.decode(&mut a, &big).unwrap();
        w.decode(&mut b, &root.element(0)).unwrap();

        assert_eq!(a, 0x1234);
        assert_eq!(b, 0x3412);
        assert_eq!(fields.get("a"), Some(0x1234));
        assert_eq!(fields.get("0"), Some(0x3412));
    }

    #[test]
    fn negative_integers_are_not_recorded() {
        assert_eq!((-1i32).field_value(), None);
        assert_eq!(7i64.field_value(), Some(7));
        assert_eq!(1.5f32.field_value(), None);
    }

    #[test]
    fn bool_is_any_non_zero_byte() {
        let mut v = [false; 3];
        decode_slice(&[0, 1, 0x80], &mut v).unwrap();
        assert_eq!(v, [false, true, true]);
    }

    #[test]
    fn boxes_and_options_decode_their_pointee() {
        let mut v: (Box<u16>, Option<u8>) = (Box::new(0), None);
        decode_slice(&[2, 0, 9], &mut v.0).unwrap();
        decode_slice(&[9], &mut v.1).unwrap();
        assert_eq!(*v.0, 2);
        assert_eq!(v.1, Some(9));
    }

    #[test]
    fn maps_are_unsupported() {
        let mut m: BTreeMap<u8, u8> = BTreeMap::new();
        let err = decode_slice(&[0; 8], &mut m).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType { .. }));
    }
}
