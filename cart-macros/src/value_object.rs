use crate::derive_utils::apply_derives;
use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Item, Result, Token, parse::Parse, parse::ParseStream, parse_macro_input};

/// #[value_object] 宏实现
/// - 支持结构体（具名或 tuple）与枚举
/// - 合并/追加派生：Clone, Serialize, Deserialize, PartialEq, Eq
/// - 参数（均为布尔值）：
///   - `debug`：是否派生 Debug，默认 true
///   - `default`：是否派生 Default，默认 true
///   - `ordered`：是否派生 Copy, PartialOrd, Ord, Hash，默认 false
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as ValueObjectAttrConfig);
    let mut input = parse_macro_input!(item as Item);

    let mut required: Vec<syn::Path> = Vec::new();
    if cfg.debug.unwrap_or(true) {
        required.push(syn::parse_quote!(Debug));
    }
    if cfg.default.unwrap_or(true) {
        required.push(syn::parse_quote!(Default));
    }
    required.extend([
        syn::parse_quote!(Clone),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
        syn::parse_quote!(PartialEq),
        syn::parse_quote!(Eq),
    ]);
    if cfg.ordered.unwrap_or(false) {
        required.extend([
            syn::parse_quote!(Copy),
            syn::parse_quote!(PartialOrd),
            syn::parse_quote!(Ord),
            syn::parse_quote!(Hash),
        ]);
    }

    match &mut input {
        Item::Struct(st) => {
            apply_derives(&mut st.attrs, required);
            TokenStream::from(quote! { #st })
        }
        Item::Enum(en) => {
            apply_derives(&mut en.attrs, required);
            TokenStream::from(quote! { #en })
        }
        other => syn::Error::new(other.span(), "#[value_object] only supports struct or enum")
            .to_compile_error()
            .into(),
    }
}

// -------- parsing --------

#[derive(Default)]
struct ValueObjectAttrConfig {
    debug: Option<bool>,
    default: Option<bool>,
    ordered: Option<bool>,
}

impl Parse for ValueObjectAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut cfg = Self::default();
        if input.is_empty() {
            return Ok(cfg);
        }

        let pairs: Punctuated<ValueObjectAttrElem, Token![,]> =
            Punctuated::parse_terminated(input)?;

        for ValueObjectAttrElem { key, value } in pairs {
            let slot = match key.to_string().as_str() {
                "debug" => &mut cfg.debug,
                "default" => &mut cfg.default,
                "ordered" => &mut cfg.ordered,
                _ => {
                    return Err(syn::Error::new(
                        key.span(),
                        "unknown key in attribute; expected 'debug', 'default' or 'ordered'",
                    ));
                }
            };
            if slot.is_some() {
                return Err(syn::Error::new(
                    key.span(),
                    format!("duplicate key '{key}' in attribute"),
                ));
            }
            *slot = Some(value);
        }
        Ok(cfg)
    }
}

struct ValueObjectAttrElem {
    key: syn::Ident,
    value: bool,
}

impl Parse for ValueObjectAttrElem {
    fn parse(input: ParseStream) -> Result<Self> {
        let key: syn::Ident = input.parse()?;
        let _eq: Token![=] = input.parse()?;
        let expr: syn::Expr = input.parse()?;
        match expr {
            syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Bool(b),
                ..
            }) => Ok(Self {
                key,
                value: b.value(),
            }),
            other => Err(syn::Error::new(
                other.span(),
                format!("expected boolean literal for '{key}'"),
            )),
        }
    }
}
