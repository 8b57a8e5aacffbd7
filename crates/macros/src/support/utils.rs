use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Generics, parse_quote};

/// Return named fields if the input is a struct with them; otherwise error.
pub fn require_named_fields(input: &DeriveInput) -> syn::Result<&syn::FieldsNamed> {
    let fields = match &input.data {
        Data::Struct(s) => &s.fields,
        _ => {
            return Err(syn::Error::new(
                input.ident.span(),
                "Record can only be derived for structs with named fields",
            ));
        }
    };

    match fields {
        Fields::Named(n) => Ok(n),
        Fields::Unnamed(_) | Fields::Unit => Err(syn::Error::new(
            fields.span(),
            "Record requires a struct with named fields (e.g. `struct X { ... }`)",
        )),
    }
}

/// Clone `generics`, bounding every type parameter by `::depwarn::FieldValue`.
pub fn with_field_value_bounds(generics: &Generics) -> Generics {
    let mut generics = generics.clone();
    let params: Vec<_> = generics
        .type_params()
        .map(|param| param.ident.clone())
        .collect();

    let where_clause = generics.make_where_clause();
    for ident in params {
        where_clause
            .predicates
            .push(parse_quote!(#ident: ::depwarn::FieldValue));
    }
    generics
}
