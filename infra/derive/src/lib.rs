#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the workspace: error enums, feature slices and
//! API data models/handlers.
//!
//! See each macro's docstring for examples; they are `ignore`d to avoid compiling in this crate.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Attribute macro to define a standard API data model.
///
/// # Injected Behaviors
///
/// * **Derives**: Automatically adds `Debug`, `Serialize`, and `Deserialize` if missing.
/// * **`OpenAPI`**: Conditionally adds `utoipa::ToSchema` when the `server` feature is enabled.
/// * **Serde Policy**:
///     * `rename_all = "camelCase"` by default (can be overridden).
///     * `deny_unknown_fields` by default (can be disabled).
///
/// # Example
///
/// ```rust,ignore
/// use chub_derive::api_model;
///
/// #[api_model(deny_unknown_fields = false)]
/// pub struct CreateMaterialRequest {
///     pub name: String,
///     #[serde(rename = "MLLabel")]
///     pub ml_label: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Attribute macro to bridge Axum handlers with `OpenAPI` documentation.
///
/// Accepts standard `utoipa::path` arguments such as `get`, `post`, `path = "..."`,
/// `responses(...)`, and `tag = "..."`. The `utoipa::path` attribute is only applied
/// when the consuming crate enables its `server` feature.
///
/// # Example
///
/// ```rust,ignore
/// use chub_derive::api_handler;
///
/// #[api_handler(
///     get,
///     path = "/ping",
///     responses((status = OK, body = PingResponse)),
///     tag = "System"
/// )]
/// pub async fn ping_handler() -> Json<PingResponse> {
///     Json(PingResponse { message: "pong" })
/// }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Attribute macro for defining domain-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]`.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to `Result<T, Self>` and to results of every wrapped source error.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a `source` field
///   (or a field marked `#[source]`/`#[from]`), enabling the `?` operator.
/// * **Internal Fallback**: Provides `From<&'static str>` and `From<String>` when an
///   `Internal` variant is present.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants.
/// 2. Variants that support context must include a `context: Option<Cow<'static, str>>` field.
/// 3. Variants with a source must also carry a context field.
///
/// # Example
///
/// ```rust,ignore
/// use chub_derive::chub_error;
/// use std::borrow::Cow;
///
/// #[chub_error]
/// pub enum CatalogError {
///     #[error("Storage error{}: {source}", format_context(.context))]
///     Storage { source: chub_database::DatabaseError, context: Option<Cow<'static, str>> },
///
///     #[error("Internal error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn chub_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Attribute macro to define a feature slice handle.
///
/// 1. Moves the declared fields into a `<Name>Inner` struct.
/// 2. Generates a cheap-to-clone `Arc` wrapper with `Deref` to the inner state.
/// 3. Implements `FeatureSlice` so the handle can be registered in `ApiState`.
///
/// # Example
/// ```rust,ignore
/// #[chub_derive::chub_slice]
/// pub struct Catalog {
///     pub registration: RegistrationService,
/// }
///
/// let slice = Catalog::new(CatalogInner { registration });
/// ```
#[proc_macro_attribute]
pub fn chub_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
