use proc_macro::TokenStream;
use proc_macro2::Span;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, Error, Item, ItemFn, ItemMod, ReturnType, Type};

/// Attribute macro `#[linktest::test]`.
///
/// On a function, registers it in the linker-assembled test registry. The
/// function must take no arguments and return `bool` (`true` means passed).
///
/// On a module, compiles the module only for `cfg(test)` or `cfg(linktest)`
/// builds, so tests can be kept next to the code they exercise.
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return Error::new_spanned(
            proc_macro2::TokenStream::from(attr),
            "#[linktest::test] takes no arguments",
        )
        .to_compile_error()
        .into();
    }

    let input = parse_macro_input!(item as Item);

    match input {
        Item::Fn(func) => expand_fn(func).unwrap_or_else(Error::into_compile_error).into(),
        Item::Mod(module) => expand_mod(module).into(),
        other => Error::new_spanned(other, "#[linktest::test] can only be applied to fn or mod")
            .to_compile_error()
            .into(),
    }
}

fn check_signature(func: &ItemFn) -> syn::Result<()> {
    let sig = &func.sig;

    if !sig.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &sig.generics,
            "#[linktest::test]: generic functions are not supported",
        ));
    }
    if sig.asyncness.is_some() {
        return Err(Error::new_spanned(
            sig.asyncness,
            "#[linktest::test]: async functions are not supported",
        ));
    }
    if sig.constness.is_some() {
        return Err(Error::new_spanned(
            sig.constness,
            "#[linktest::test]: test functions cannot be const",
        ));
    }
    if !sig.inputs.is_empty() {
        return Err(Error::new_spanned(
            &sig.inputs,
            "#[linktest::test]: test functions must have no parameters",
        ));
    }

    let returns_bool = match &sig.output {
        ReturnType::Type(_, ty) => {
            matches!(&**ty, Type::Path(p) if p.qself.is_none() && p.path.is_ident("bool"))
        }
        ReturnType::Default => false,
    };

    if !returns_bool {
        return Err(Error::new_spanned(
            &sig.output,
            "#[linktest::test]: test functions must return `bool`",
        ));
    }

    Ok(())
}

fn expand_fn(func: ItemFn) -> syn::Result<proc_macro2::TokenStream> {
    check_signature(&func)?;

    let ident = &func.sig.ident;
    let host_test = format_ident!("__linktest_{}", ident);

    // Resolve the `linktest` crate path (handles dependency renames).
    // `linktest` never registers tests in its own library, so `Itself` can only
    // mean one of its integration tests, which see it as an extern crate.
    let linktest_path: syn::Path = match crate_name("linktest") {
        Ok(FoundCrate::Itself) => syn::parse_quote!(::linktest),
        Ok(FoundCrate::Name(name)) => {
            let ident = syn::Ident::new(&name, Span::call_site());
            syn::parse_quote!(::#ident)
        }
        Err(_) => syn::parse_quote!(::linktest), // fallback
    };

    Ok(quote! {
        #func

        #linktest_path::declare!(::core::stringify!(#ident) => #ident);

        // Lets `cargo test` run the same function through libtest.
        #[cfg(test)]
        #[doc(hidden)]
        #[::core::prelude::v1::test]
        fn #host_test() {
            ::core::assert!(
                #ident(),
                "test `{}` returned false",
                ::core::stringify!(#ident)
            );
        }
    })
}

fn expand_mod(module: ItemMod) -> proc_macro2::TokenStream {
    let ItemMod {
        attrs,
        vis,
        ident,
        content,
        ..
    } = module;

    let attrs = quote! {
        #[cfg(any(test, linktest))]
        #(#attrs)*
    };

    if let Some((_, items)) = content {
        quote! {
            #attrs
            #vis mod #ident {
                #(#items)*
            }
        }
    } else {
        quote! {
            #attrs
            #vis mod #ident;
        }
    }
}
