use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

use crate::support::{attrs, diag, utils};

const ATTR: &str = "deprecation";
const FIELD_KEYS: &[&str] = &["removed", "replaced", "tag", "name", "is_default", "skip"];

pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(input) {
        Ok(ts) => ts,
        Err(e) => diag::to_compile_error(e),
    }
}

/// One non-skipped field, as it appears in the generated table.
struct FieldSpec {
    ident: syn::Ident,
    name: String,
    annotation: Option<String>,
    is_default: Option<syn::Path>,
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream> {
    let struct_name = &input.ident;
    let record_name = struct_name.to_string();

    if attrs::parse_attrs(&input.attrs, ATTR)?.is_some() {
        return Err(diag::error_spanned(
            struct_name,
            "#[deprecation] is only valid on fields",
        ));
    }

    let fields = utils::require_named_fields(&input)?;
    let mut specs = Vec::new();
    for field in &fields.named {
        if let Some(spec) = parse_field(field)? {
            specs.push(spec);
        }
    }

    let generics = utils::with_field_value_bounds(&input.generics);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let count = specs.len();
    let descriptors = specs.iter().map(descriptor_expr);
    let field_exprs = specs.iter().enumerate().map(|(i, spec)| field_expr(i, spec));
    let descriptors_binding = if specs.is_empty() {
        quote! {}
    } else {
        quote! { let descriptors = ::depwarn::Record::descriptor(self).fields(); }
    };

    let expanded = quote! {
        impl #impl_generics ::depwarn::Record for #struct_name #ty_generics #where_clause {
            fn descriptor(&self) -> &'static ::depwarn::RecordDescriptor {
                static FIELDS: [::depwarn::FieldDescriptor; #count] = [#(#descriptors),*];
                static DESCRIPTOR: ::depwarn::RecordDescriptor =
                    ::depwarn::RecordDescriptor::new(#record_name, &FIELDS);
                &DESCRIPTOR
            }

            fn fields(&self) -> ::std::vec::Vec<::depwarn::Field<'_>> {
                #descriptors_binding
                ::std::vec![#(#field_exprs),*]
            }
        }

        impl #impl_generics ::depwarn::FieldValue for #struct_name #ty_generics #where_clause {
            fn is_default_value(&self) -> bool {
                ::depwarn::Record::fields(self)
                    .iter()
                    .all(::depwarn::Field::is_default)
            }

            fn walk_children(
                &self,
                path: &::depwarn::FieldPath,
                walker: &mut ::depwarn::Walker<'_>,
            ) -> ::std::result::Result<(), ::depwarn::ValidationError> {
                walker.walk_record(self, path)
            }
        }
    };

    Ok(expanded.into())
}

fn parse_field(field: &syn::Field) -> syn::Result<Option<FieldSpec>> {
    let Some(ident) = field.ident.clone() else {
        return Err(diag::error_spanned(field, "expected a named field"));
    };
    let Some(args) = attrs::parse_attrs(&field.attrs, ATTR)? else {
        return Ok(Some(FieldSpec {
            name: ident.to_string(),
            ident,
            annotation: None,
            is_default: None,
        }));
    };

    if args.is_empty() {
        return Err(diag::error_spanned(
            &ident,
            "empty #[deprecation]: expected `removed`, `replaced = \"...\"` or `tag = \"...\"`",
        ));
    }
    args.reject_unknown(FIELD_KEYS)?;

    if args.has_flag("skip") {
        if let Some(key) = FIELD_KEYS[..5].iter().find_map(|k| args.find_key(k)) {
            return Err(diag::error_spanned(
                key,
                "`skip` cannot be combined with other #[deprecation] options",
            ));
        }
        return Ok(None);
    }

    let name = args
        .get_string("name")?
        .map_or_else(|| ident.to_string(), |lit| lit.value());
    let annotation = parse_annotation(&args)?;
    let is_default = args
        .get_string("is_default")?
        .map(|lit| lit.parse::<syn::Path>())
        .transpose()?;

    Ok(Some(FieldSpec {
        ident,
        name,
        annotation,
        is_default,
    }))
}

/// Folds `removed` / `replaced` / `tag` into the raw marker string.
fn parse_annotation(args: &attrs::AttrArgs) -> syn::Result<Option<String>> {
    let removed = args.find_key("removed");
    let replaced = args.get_string("replaced")?;
    let tag = args.get_string("tag")?;

    match (removed, replaced, tag) {
        (None, None, None) => Ok(None),
        (Some(flag), None, None) => {
            if args.get_value("removed").is_some() {
                return Err(diag::error_spanned(flag, "`removed` takes no value"));
            }
            Ok(Some("removed".to_owned()))
        }
        (None, Some(lit), None) => {
            let replacement = lit.value();
            if replacement.trim().is_empty() {
                return Err(diag::error_spanned(
                    &lit,
                    "`replaced` needs the name of the replacement field",
                ));
            }
            if replacement.contains(',') {
                return Err(diag::error_spanned(
                    &lit,
                    "replacement field name cannot contain ','",
                ));
            }
            Ok(Some(format!("replaced,{}", replacement.trim())))
        }
        // Raw markers are kept verbatim; the runtime policy decides what a
        // malformed one means.
        (None, None, Some(lit)) => Ok(Some(lit.value())),
        _ => {
            let span = args
                .find_key("replaced")
                .or_else(|| args.find_key("tag"))
                .map_or_else(proc_macro2::Span::call_site, syn::Ident::span);
            Err(syn::Error::new(
                span,
                "only one of `removed`, `replaced` or `tag` may be given",
            ))
        }
    }
}

fn descriptor_expr(spec: &FieldSpec) -> TokenStream2 {
    let name = &spec.name;
    match &spec.annotation {
        Some(annotation) => quote! {
            ::depwarn::FieldDescriptor::new(#name).with_annotation(#annotation)
        },
        None => quote! { ::depwarn::FieldDescriptor::new(#name) },
    }
}

fn field_expr(index: usize, spec: &FieldSpec) -> TokenStream2 {
    let ident = &spec.ident;
    let base = quote! { ::depwarn::Field::new(&descriptors[#index], &self.#ident) };
    match &spec.is_default {
        Some(predicate) => quote! { #base.with_default_override(#predicate(&self.#ident)) },
        None => base,
    }
}
