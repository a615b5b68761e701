//! `#[vpack(...)]` field attributes.

/// How a single field is packed.
pub enum FieldCodec {
    /// Through the field type's own `Pack` impl.
    Default,
    /// Through the given codec function.
    With(syn::Path),
    /// Not at all.
    Skip,
}

/// Parse the `#[vpack]` attributes on a field.
///
/// Accepts `skip` and `with = "path::to::codec"`; anything else, or both at
/// once, is a compile error.
pub fn field_codec(field: &syn::Field) -> syn::Result<FieldCodec> {
    let mut codec = FieldCodec::Default;
    for attr in &field.attrs {
        if !attr.path().is_ident("vpack") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if !matches!(codec, FieldCodec::Default) {
                return Err(meta.error("conflicting vpack attributes"));
            }
            if meta.path.is_ident("skip") {
                codec = FieldCodec::Skip;
                return Ok(());
            }
            if meta.path.is_ident("with") {
                let lit: syn::LitStr = meta.value()?.parse()?;
                codec = FieldCodec::With(lit.parse()?);
                return Ok(());
            }
            Err(meta.error("expected `skip` or `with = \"path\"`"))
        })?;
    }
    Ok(codec)
}
