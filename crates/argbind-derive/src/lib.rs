use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Fields, Ident, LitStr, Result, Token,
    ext::IdentExt,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

/// Derive `argbind::Bind` from `#[bind("...")]` field attributes.
///
/// Each tagged field becomes one entry of the record's binding table, in
/// declaration order. Untagged fields are left out.
///
/// ```ignore
/// #[derive(Default, argbind::Bind)]
/// struct Config {
///     #[bind("--extensions,-e,mandatory")]
///     extensions: Vec<String>,
///     #[bind("--size,-s")]
///     size: u32,
///     #[bind("--token", readonly)]
///     token: String,
///     #[bind("trailing")]
///     directories: Vec<String>,
///     cache: Vec<u8>,
/// }
/// ```
///
/// Tag text is checked when binding runs, not here, so tag mistakes surface
/// as `argbind::Error::InvalidTag`. The `readonly` option registers the keys
/// but never writes the field.
#[proc_macro_derive(Bind, attributes(bind))]
pub fn derive_bind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_bind(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

struct BindAttr {
    tag: LitStr,
    readonly: bool,
}

impl Parse for BindAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let tag: LitStr = input.parse()?;
        let mut readonly = false;

        while input.peek(Token![,]) {
            let _: Token![,] = input.parse()?;
            if input.is_empty() {
                break;
            }
            let option: Ident = input.parse()?;
            match option.to_string().as_str() {
                "readonly" => readonly = true,
                other => {
                    return Err(syn::Error::new(
                        option.span(),
                        format!("unknown bind option: {other}"),
                    ));
                }
            }
        }

        Ok(Self { tag, readonly })
    }
}

fn expand_bind(input: DeriveInput) -> Result<proc_macro2::TokenStream> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new(
            input.ident.span(),
            "Bind can only be derived for structs",
        ));
    };

    let mut entries: Vec<proc_macro2::TokenStream> = Vec::new();
    match &data.fields {
        Fields::Named(fields) => {
            for field in &fields.named {
                let mut attrs = field.attrs.iter().filter(|a| a.path().is_ident("bind"));
                let Some(attr) = attrs.next() else {
                    continue;
                };
                if let Some(extra) = attrs.next() {
                    return Err(syn::Error::new_spanned(
                        extra,
                        "only one #[bind(...)] attribute is allowed per field",
                    ));
                }

                let spec: BindAttr = attr.parse_args()?;
                let Some(ident) = &field.ident else {
                    continue;
                };
                let ty = &field.ty;
                let name = LitStr::new(&ident.unraw().to_string(), ident.span());
                let tag = &spec.tag;

                entries.push(if spec.readonly {
                    quote! {
                        ::argbind::FieldBinding::<Self>::readonly::<#ty>(#name, #tag)
                    }
                } else {
                    quote! {
                        ::argbind::FieldBinding::<Self>::field::<#ty>(
                            #name,
                            #tag,
                            |target: &mut Self, value: ::argbind::Value| {
                                ::argbind::assign(&mut target.#ident, value)
                            },
                        )
                    }
                });
            }
        }
        Fields::Unit => {}
        Fields::Unnamed(fields) => {
            return Err(syn::Error::new_spanned(
                fields,
                "Bind requires a struct with named fields",
            ));
        }
    }

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::argbind::Bind for #ident #ty_generics #where_clause {
            fn bindings() -> ::std::vec::Vec<::argbind::FieldBinding<Self>> {
                ::std::vec![#(#entries),*]
            }
        }
    })
}
