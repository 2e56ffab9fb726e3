//! Procedural macros for xschema
//!
//! - **`#[derive(Annotated)]`** - exposes field annotations to
//!   `Schema::from_annotations`
//!
//! Use the re-export `xschema::Annotated` rather than depending on this
//! crate directly.

use proc_macro::TokenStream;

mod annotated;

// ============================================================================
// ANNOTATED DERIVE
// ============================================================================

/// Derives `xschema::Annotated` for a struct with named fields.
///
/// # Attributes
///
/// - `#[annotate(x = "Required,Min=3")]` - annotation text under tag `x`
/// - `#[annotate(x = "...", v = "...")]` - several tags on one field
///
/// Fields typed `String`, `str`, `&str` or `Cow<str>` get string rules;
/// every other field gets number rules. Fields without an attribute are
/// listed with no tags and never validated.
///
/// # Examples
///
/// ```rust,ignore
/// use xschema::prelude::*;
///
/// #[derive(serde::Serialize, Annotated)]
/// struct User {
///     #[annotate(x = "Required,Min=3")]
///     name: String,
///
///     #[annotate(x = "Required,Gte=18")]
///     age: u32,
/// }
///
/// validate_annotated(&User { name: "Ann".into(), age: 30 })?;
/// ```
#[proc_macro_derive(Annotated, attributes(annotate))]
pub fn derive_annotated(input: TokenStream) -> TokenStream {
    annotated::derive_annotated_impl(input)
}
