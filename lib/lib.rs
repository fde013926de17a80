use proc_macro::TokenStream;
use quote::quote;

/// Attribute macro that wraps a function with the sole purpose of timing its execution, and printing
/// the gathered duration through Rust's logging API.
/// <br/><br/>
/// In **debug** builds the annotated function body is wrapped in a block that tracks its execution
/// time and reports it in a `trace!()` call upon return. In **release** builds the body is emitted
/// untouched, which makes the macro a zero-cost abstraction for productive environments.
///
/// ---
///
/// # Requirements
///
/// - Rust's logging facade crate - https://crates.io/crates/log
///
/// # Usage
/// ## `fn()` example:
/// ```rust,ignore
/// use stashcrab_macros::stash_trace_time;
///
/// #[stash_trace_time]
/// fn count_lines(text: &str) -> usize {
///     text.lines().count()
/// }
/// ```
/// This will output:
/// ```text
///  TRACE stashcrab > Time elapsed for `fn count_lines()` was: 2.407µs
/// ```
///
/// ## `async fn()` example
///
/// ```rust,ignore
/// use stashcrab_macros::stash_trace_time;
///
/// #[stash_trace_time]
/// async fn fetch_readme(client: &stashcrab::Client) -> Result<String, stashcrab::StashError> {
///     let (text, _) = client
///         .repositories()
///         .get_text_file_content("PRJ", "repo", "README.md", None)
///         .await?;
///     Ok(text)
/// }
/// ```
/// This will output:
/// ```text
///  TRACE stashcrab > Time elapsed for `fn fetch_readme()` was: 268.012488ms
/// ```
#[proc_macro_attribute]
pub fn stash_trace_time(_attr: TokenStream, item: TokenStream) -> TokenStream {
    // parse the passed item as a function
    let func = syn::parse_macro_input!(item as syn::ItemFn);

    // break the function down into its parts
    let syn::ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = func;

    // determine async-ness of function
    let is_async_fn = sig.asyncness.is_some();

    // extract function name for prettier output
    let name = format!("{}", sig.ident);

    // pin the wrapped body's output to the declared return type, so `?` inside it keeps inferring
    let output_type = match &sig.output {
        syn::ReturnType::Default => quote! { () },
        syn::ReturnType::Type(_, ty) => quote! { #ty },
    };

    // determine type of build (debug/release)
    let release_build = !cfg!(debug_assertions);

    // wrap body in an async block only if function is async, otherwise just put it in the middle of the time-tracking
    let block = if release_build {
        quote! { #block } // disable time tracker on release builds
    } else if is_async_fn {
        quote! {
            let __stash_start = ::std::time::Instant::now();
            let __stash_result: #output_type = async move { #block }.await;
            ::log::trace!("Time elapsed for `fn {}()` was: {:?}", #name, __stash_start.elapsed());
            __stash_result
        }
    } else {
        quote! {
            let __stash_start = ::std::time::Instant::now();
            let __stash_result: #output_type = (move || -> #output_type #block)();
            ::log::trace!("Time elapsed for `fn {}()` was: {:?}", #name, __stash_start.elapsed());
            __stash_result
        }
    };

    // generate the output, rewriting function with our tracked wrapper
    let output = quote! {
        #(#attrs)*
        #vis #sig {
            #block
        }
    };

    // convert the output from a `proc_macro2::TokenStream` to a `proc_macro::TokenStream`
    TokenStream::from(output)
}
