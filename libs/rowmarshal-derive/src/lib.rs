use std::collections::HashMap;

use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Fields, GenericArgument, LitStr, PathArguments, Type, Visibility};

/// Derive macro for row destinations.
///
/// Generates `Record`, `Target`, `Element` and `Destination` impls so the
/// struct can be passed to `rowmarshal::select` directly (`&mut Row`) or
/// inside a `Vec` (`&mut Vec<Row>`, `&mut Vec<Box<Row>>`).
///
/// # Example
///
/// ```ignore
/// #[derive(Record, Default)]
/// pub struct Row {
///     pub a: i64,
///     #[column(name = "b_p")]
///     pub b: Option<String>,
///     #[column(skip)]
///     pub cached: String,
///     hidden: String,
/// }
/// ```
///
/// - The mapping key is `name = "..."` if given, else the lowercased field name.
/// - `#[column(skip)]` and `#[column(name = "-")]` exclude the field.
/// - Private fields are never mapped.
/// - Fields of other types than `i64`, `String`, `f64`, `bool`, `Vec<u8>`
///   (or `Option` of those) are ignored and keep their `Default` value.
///
/// The struct must implement `Default`.
#[proc_macro_derive(Record, attributes(column))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_impl(&input) {
        Ok(tokens) => tokens,
        Err(e) => e.to_compile_error().into(),
    }
}

fn derive_impl(input: &DeriveInput) -> Result<TokenStream, syn::Error> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Record only supports structs with named fields",
                ))
            }
        },
        _ => return Err(syn::Error::new_spanned(name, "Record only supports structs")),
    };

    let mut spec_tokens: Vec<proc_macro2::TokenStream> = Vec::new();
    let mut set_arms: Vec<proc_macro2::TokenStream> = Vec::new();
    let mut keys: HashMap<String, String> = HashMap::new();

    for (index, field) in fields.iter().enumerate() {
        let field_ident = field.ident.as_ref().ok_or_else(|| {
            syn::Error::new_spanned(field, "expected named field")
        })?;
        let field_name_str = field_ident.unraw().to_string();
        let field_ty = &field.ty;

        // Parse #[column(...)] attribute.
        let mut tag: Option<String> = None;
        let mut skip = false;

        for attr in &field.attrs {
            if !attr.path().is_ident("column") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    tag = Some(value.value());
                } else if meta.path.is_ident("skip") {
                    skip = true;
                } else {
                    return Err(meta.error("unknown column attribute (expected `name` or `skip`)"));
                }
                Ok(())
            })?;
        }

        if skip {
            tag = Some("-".to_string());
        }
        let tag = tag.filter(|t| !t.is_empty());

        let exported = !matches!(field.vis, Visibility::Inherited);
        let supported = is_slot_type(field_ty);
        let ignored = !exported || !supported || tag.as_deref() == Some("-");

        if !ignored {
            let key = tag.clone().unwrap_or_else(|| field_name_str.to_lowercase());
            if let Some(first) = keys.insert(key.clone(), field_name_str.clone()) {
                return Err(syn::Error::new_spanned(
                    field_ident,
                    format!("duplicate mapping key '{key}' (already used by field '{first}')"),
                ));
            }
        }

        let tag_expr = match &tag {
            Some(t) => quote! { ::std::option::Option::Some(#t) },
            None => quote! { ::std::option::Option::None },
        };
        let slot_expr = if supported {
            quote! { ::std::option::Option::Some(<#field_ty as ::rowmarshal::Slot>::TYPE) }
        } else {
            quote! { ::std::option::Option::None }
        };

        spec_tokens.push(quote! {
            ::rowmarshal::FieldSpec {
                name: #field_name_str,
                tag: #tag_expr,
                exported: #exported,
                slot: #slot_expr,
            }
        });

        if !ignored {
            set_arms.push(quote! {
                #index => {
                    self.#field_ident = <#field_ty as ::rowmarshal::Slot>::from_value(__value)?;
                }
            });
        }
    }

    let mut generics = input.generics.clone();
    generics
        .make_where_clause()
        .predicates
        .push(parse_quote! { Self: ::std::default::Default });
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::rowmarshal::Record for #name #ty_generics #where_clause {
            fn fields() -> ::std::vec::Vec<::rowmarshal::FieldSpec> {
                ::std::vec![
                    #(#spec_tokens),*
                ]
            }

            fn set(
                &mut self,
                __index: usize,
                __value: ::rowmarshal::Value<'_>,
            ) -> ::std::result::Result<(), ::rowmarshal::ConversionError> {
                match __index {
                    #(#set_arms)*
                    _ => {}
                }
                ::std::result::Result::Ok(())
            }
        }

        impl #impl_generics ::rowmarshal::Target for #name #ty_generics #where_clause {
            fn shape() -> ::rowmarshal::Shape {
                ::rowmarshal::Shape::Struct(<Self as ::rowmarshal::Record>::fields())
            }

            fn materialize(
                &mut self,
                row: ::rowmarshal::Row<'_>,
                plan: &::rowmarshal::BindingPlan,
            ) -> ::std::result::Result<(), ::rowmarshal::MarshalError> {
                ::rowmarshal::materialize::fill_record(self, row, plan)
            }
        }

        impl #impl_generics ::rowmarshal::Element for #name #ty_generics #where_clause {
            fn element_shape() -> ::rowmarshal::ElementShape {
                ::rowmarshal::ElementShape::Struct {
                    by_reference: false,
                    fields: <Self as ::rowmarshal::Record>::fields(),
                }
            }

            fn from_row(
                row: ::rowmarshal::Row<'_>,
                plan: &::rowmarshal::BindingPlan,
            ) -> ::std::result::Result<Self, ::rowmarshal::MarshalError> {
                let mut record = <Self as ::std::default::Default>::default();
                ::rowmarshal::materialize::fill_record(&mut record, row, plan)?;
                ::std::result::Result::Ok(record)
            }
        }

        impl #impl_generics ::rowmarshal::Destination for #name #ty_generics #where_clause {
            type Target = Self;

            fn target(&mut self) -> ::std::option::Option<&mut Self> {
                ::std::option::Option::None
            }
        }
    };

    Ok(TokenStream::from(expanded))
}

/// `i64`, `String`, `f64`, `bool`, `Vec<u8>`, or `Option` of one of them.
fn is_slot_type(ty: &Type) -> bool {
    match single_generic(ty, "Option") {
        Some(inner) => is_base_type(inner),
        None => is_base_type(ty),
    }
}

fn is_base_type(ty: &Type) -> bool {
    if let Some(inner) = single_generic(ty, "Vec") {
        return type_ident_name(inner).as_deref() == Some("u8");
    }
    matches!(
        type_ident_name(ty).as_deref(),
        Some("i64" | "String" | "f64" | "bool")
    )
}

/// `T` when `ty` is `wrapper<T>` (matched on the last path segment).
fn single_generic<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let seg = type_path.path.segments.last()?;
    if seg.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &seg.arguments else {
        return None;
    };
    match args.args.first() {
        Some(GenericArgument::Type(inner)) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}

/// Extract the last path segment ident name from a type without generic
/// arguments (e.g. `i64`, `String`).
fn type_ident_name(ty: &Type) -> Option<String> {
    if let Type::Path(type_path) = ty {
        type_path
            .path
            .segments
            .last()
            .filter(|seg| seg.arguments.is_none())
            .map(|seg| seg.ident.to_string())
    } else {
        None
    }
}
