mod macros;

use proc_macro::TokenStream;

/// Self-register a component at link time.
///
/// ```ignore
/// #[component(selector = ".mdl-js-button")]
/// struct MaterialButton { /* ... */ }
///
/// #[component(name = "MDCRipple", selector = ".mdc-ripple", widget = false)]
/// struct Ripple;
/// ```
///
/// The type must implement `upgrader::Component`. `name` defaults to the
/// type's identifier.
#[proc_macro_attribute]
pub fn component(attr: TokenStream, item: TokenStream) -> TokenStream {
    macros::component::expand(attr.into(), item.into()).into()
}
