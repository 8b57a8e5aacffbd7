use syn::{
    Attribute, Ident, Lit, Meta, Result, Token,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
};

use crate::support::diag;

/// Parsed attribute arguments container.
#[derive(Debug, Clone)]
pub struct AttrArgs {
    pub items: Vec<AttrItem>,
}

/// A single attribute item.
#[derive(Debug, Clone)]
pub enum AttrItem {
    /// A flag like `removed` or `skip`
    Flag(Ident),
    /// Key-value pair like `replaced = "listen"`
    KeyValue { key: Ident, value: AttrValue },
}

/// Right-hand side of a key-value item.
#[derive(Debug, Clone)]
pub enum AttrValue {
    Ident(Ident),
    Lit(Lit),
}

impl AttrItem {
    fn key(&self) -> &Ident {
        match self {
            Self::Flag(key) | Self::KeyValue { key, .. } => key,
        }
    }
}

impl AttrArgs {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find a key-value pair by key name.
    pub fn get_value(&self, key: &str) -> Option<&AttrValue> {
        self.items.iter().find_map(|item| match item {
            AttrItem::KeyValue { key: k, value } if k == key => Some(value),
            _ => None,
        })
    }

    /// Get a string value by key, rejecting non-string literals.
    pub fn get_string(&self, key: &str) -> Result<Option<syn::LitStr>> {
        match self.get_value(key) {
            None => Ok(None),
            Some(AttrValue::Lit(Lit::Str(s))) => Ok(Some(s.clone())),
            Some(AttrValue::Lit(other)) => Err(diag::error_spanned(
                other,
                format!("`{key}` expects a string literal"),
            )),
            Some(AttrValue::Ident(other)) => Err(diag::error_spanned(
                other,
                format!("`{key}` expects a string literal, e.g. `{key} = \"...\"`"),
            )),
        }
    }

    /// Check if a flag is present.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item, AttrItem::Flag(f) if f == flag))
    }

    /// Find the span-carrying ident of any item with this key.
    pub fn find_key(&self, key: &str) -> Option<&Ident> {
        self.items.iter().map(AttrItem::key).find(|k| *k == key)
    }

    /// Error on the first key that is not in `allowed`.
    pub fn reject_unknown(&self, allowed: &[&str]) -> Result<()> {
        for item in &self.items {
            let key = item.key();
            if !allowed.iter().any(|a| key == a) {
                return Err(diag::error_spanned(
                    key,
                    format!(
                        "unknown attribute `{key}`, expected one of: {}",
                        allowed.join(", ")
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// Parse attribute like `#[deprecation(...)]` (the whole Attribute, not only args).
pub fn parse_attr(attr: &Attribute, expected: &str) -> Result<Option<AttrArgs>> {
    if !attr.path().is_ident(expected) {
        return Ok(None);
    }

    match &attr.meta {
        Meta::Path(_) => Ok(Some(AttrArgs { items: vec![] })),
        Meta::List(list) => {
            let args = syn::parse2::<AttrArgsParser>(list.tokens.clone())?;
            Ok(Some(args.0))
        }
        Meta::NameValue(nv) => Err(diag::error_spanned(
            nv,
            format!("#[{expected}] must be #[{expected}(...)] (not name-value)"),
        )),
    }
}

/// Parse all attributes of a given type and merge them.
///
/// Returns `None` when no attribute with that name is present.
pub fn parse_attrs(attrs: &[Attribute], name: &str) -> Result<Option<AttrArgs>> {
    let mut result: Option<AttrArgs> = None;

    for attr in attrs {
        if let Some(args) = parse_attr(attr, name)? {
            result
                .get_or_insert_with(|| AttrArgs { items: vec![] })
                .items
                .extend(args.items);
        }
    }

    Ok(result)
}

struct AttrArgsParser(AttrArgs);

impl Parse for AttrArgsParser {
    fn parse(input: ParseStream) -> Result<Self> {
        let items = if input.is_empty() {
            vec![]
        } else {
            Punctuated::<AttrItemParser, Token![,]>::parse_terminated(input)?
                .into_iter()
                .map(|x| x.0)
                .collect()
        };
        Ok(Self(AttrArgs { items }))
    }
}

struct AttrItemParser(AttrItem);

impl Parse for AttrItemParser {
    fn parse(input: ParseStream) -> Result<Self> {
        let key: Ident = input.parse()?;

        if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            let value: AttrValue = input.parse::<AttrValueParser>()?.0;
            return Ok(Self(AttrItem::KeyValue { key, value }));
        }

        Ok(Self(AttrItem::Flag(key)))
    }
}

struct AttrValueParser(AttrValue);

impl Parse for AttrValueParser {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.peek(Lit) {
            return Ok(Self(AttrValue::Lit(input.parse()?)));
        }
        Ok(Self(AttrValue::Ident(input.parse()?)))
    }
}
