use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Data, DeriveInput, Error, Field, Fields, Lit, LitStr, Result, parse_quote, spanned::Spanned,
};

pub(crate) fn expand_decode(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new(
            input.span(),
            "`Decode` may only be derived on structs.",
        ))?
    };

    let fields: Vec<&Field> = match &data.fields {
        Fields::Named(fields) => fields.named.iter().collect(),
        Fields::Unnamed(fields) => fields.unnamed.iter().collect(),
        Fields::Unit => Vec::new(),
    };

    let fields = fields
        .into_iter()
        .enumerate()
        .map(|(i, f)| FieldMetadata::parse(i, f))
        .collect::<Result<Vec<_>>>()?;

    if let Some(greedy) = fields.iter().rev().skip(1).find(|f| f.is_greedy()) {
        Err(Error::new(
            greedy.span,
            "Only the last field of a struct may have a greedy length.",
        ))?
    }

    let calls = fields.iter().map(|field| {
        let FieldMetadata { member, name, .. } = field;
        let directives = field.directives();

        quote! {
            fields.field(#name, &#directives, &mut self.#member)?;
        }
    });

    let name = &input.ident;

    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(::bytewalk::avec::Decode));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::bytewalk::avec::Decode for #name #ty_generics #where_clause {
            fn decode(
                &mut self,
                w: &mut ::bytewalk::sans::walk::Walker<'_>,
                ctx: &::bytewalk::sans::context::Context<'_>,
            ) -> ::core::result::Result<(), ::bytewalk::error::Error> {
                #[allow(unused_mut, unused_variables)]
                let mut fields = w.record(ctx);
                #(#calls)*
                ::core::result::Result::Ok(())
            }
        }
    };

    Ok(expanded.into())
}

#[derive(Debug)]
struct FieldMetadata {
    member: syn::Member,
    name: String,
    attribute: FieldAttribute,
    span: proc_macro2::Span,
}

#[derive(Debug, Default)]
struct FieldAttribute {
    length: Option<Length>,
    endian: Option<Endian>,
    length_size: Option<usize>,
    flags: Option<String>,
}

#[derive(Debug)]
enum Length {
    Literal(usize),
    Reference(String),
    Greedy,
}

#[derive(Debug)]
enum Endian {
    Big,
    Little,
}

impl FieldMetadata {
    fn parse(index: usize, field: &Field) -> Result<Self> {
        let (member, name) = match &field.ident {
            Some(ident) => {
                let name = ident.to_string();
                let name = name.strip_prefix("r#").unwrap_or(&name).to_string();
                (syn::Member::Named(ident.clone()), name)
            }
            None => (syn::Member::Unnamed(index.into()), index.to_string()),
        };

        let mut attribute = FieldAttribute::default();

        for attr in field.attrs.iter().filter(|a| a.path().is_ident("decode")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("length") {
                    let length = match meta.value()?.parse::<Lit>()? {
                        Lit::Int(lit) => Length::Literal(lit.base10_parse()?),
                        Lit::Str(lit) => parse_length(&lit)?,
                        lit => Err(Error::new_spanned(
                            lit,
                            "Length must be an integer or a string literal.",
                        ))?,
                    };
                    attribute.length = Some(length);
                } else if meta.path.is_ident("endian") {
                    let lit = meta.value()?.parse::<LitStr>()?;
                    let value = lit.value();

                    let endian = if value.eq_ignore_ascii_case("big") {
                        Endian::Big
                    } else if value.eq_ignore_ascii_case("little") {
                        Endian::Little
                    } else {
                        Err(Error::new_spanned(
                            lit,
                            "Byte order must be \"big\" or \"little\".",
                        ))?
                    };
                    attribute.endian = Some(endian);
                } else if meta.path.is_ident("length_size") {
                    let lit = meta.value()?.parse::<syn::LitInt>()?;
                    let n: usize = lit.base10_parse()?;

                    if !(1..=8).contains(&n) {
                        Err(Error::new_spanned(
                            lit,
                            "Length-prefix width must be between 1 and 8 bytes.",
                        ))?
                    }
                    attribute.length_size = Some(n);
                } else if meta.path.is_ident("flags") {
                    attribute.flags = Some(meta.value()?.parse::<LitStr>()?.value());
                } else {
                    Err(meta.error(
                        "Expected one of `length`, `endian`, `length_size`, or `flags`.",
                    ))?
                }

                Ok(())
            })?;
        }

        Ok(Self {
            member,
            name,
            attribute,
            span: field.span(),
        })
    }

    fn is_greedy(&self) -> bool {
        matches!(self.attribute.length, Some(Length::Greedy))
    }

    fn directives(&self) -> TokenStream2 {
        let FieldAttribute {
            length,
            endian,
            length_size,
            flags,
        } = &self.attribute;

        if length.is_none() && endian.is_none() && length_size.is_none() && flags.is_none() {
            return quote! { ::bytewalk::sans::directive::Directives::NONE };
        }

        let length = match length {
            None => quote! { ::bytewalk::sans::directive::Length::None },
            Some(Length::Literal(n)) => quote! { ::bytewalk::sans::directive::Length::Literal(#n) },
            Some(Length::Reference(path)) => {
                quote! { ::bytewalk::sans::directive::Length::Reference(#path) }
            }
            Some(Length::Greedy) => quote! { ::bytewalk::sans::directive::Length::Greedy },
        };

        let endian = match endian {
            None => quote! { ::core::option::Option::None },
            Some(Endian::Big) => {
                quote! { ::core::option::Option::Some(::bytewalk::sans::directive::Endian::Big) }
            }
            Some(Endian::Little) => {
                quote! { ::core::option::Option::Some(::bytewalk::sans::directive::Endian::Little) }
            }
        };

        let length_size = match length_size {
            None => quote! { ::core::option::Option::None },
            Some(n) => quote! { ::core::option::Option::Some(#n) },
        };

        let flags = flags.as_deref().unwrap_or("");

        quote! {
            ::bytewalk::sans::directive::Directives {
                length: #length,
                endian: #endian,
                length_size: #length_size,
                flags: #flags,
            }
        }
    }
}

/// Parse a string length: a decimal literal, `..`, or a dot-separated path.
fn parse_length(lit: &LitStr) -> Result<Length> {
    let value = lit.value();

    if value == ".." {
        return Ok(Length::Greedy);
    }

    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        return value
            .parse()
            .map(Length::Literal)
            .map_err(|_| Error::new_spanned(lit, "Length literal is too large."));
    }

    let is_segment = |seg: &str| {
        !seg.is_empty() && seg.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
    };

    if value.split('.').all(is_segment) {
        Ok(Length::Reference(value))
    } else {
        Err(Error::new_spanned(
            lit,
            "Length must be a number, a dot-separated field path, or \"..\".",
        ))
    }
}
