//! Parsing of #[annotate(...)] attributes and field types

use syn::{Attribute, GenericArgument, LitStr, PathArguments, Type};

/// Tagged annotations of one field, in attribute order.
#[derive(Debug, Default, Clone)]
pub(super) struct FieldAnnotations {
    pub tags: Vec<(String, LitStr)>,
}

impl FieldAnnotations {
    /// Collects `tag = "text"` pairs from every `#[annotate(...)]` attribute.
    pub(super) fn from_attributes(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("annotate") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                let Some(tag) = meta.path.get_ident().map(|ident| unraw(&ident.to_string())) else {
                    return Err(meta.error("expected `tag = \"...\"`"));
                };

                if result.tags.iter().any(|(existing, _)| *existing == tag) {
                    return Err(meta.error(format!("duplicate annotation tag `{tag}`")));
                }

                let text: LitStr = meta.value()?.parse()?;
                result.tags.push((tag, text));
                Ok(())
            })?;
        }

        Ok(result)
    }
}

/// Rule domain picked for a field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FieldKind {
    Text,
    Number,
}

impl FieldKind {
    /// `String`, `str`, `&str` and `Cow<str>` are text; everything else is a
    /// number.
    pub(super) fn of(ty: &Type) -> Self {
        match ty {
            Type::Reference(reference) => Self::of(&reference.elem),
            Type::Paren(paren) => Self::of(&paren.elem),
            Type::Group(group) => Self::of(&group.elem),
            Type::Path(path) if path.qself.is_none() => {
                let Some(last) = path.path.segments.last() else {
                    return Self::Number;
                };

                if last.ident == "String" || last.ident == "str" {
                    return Self::Text;
                }

                if last.ident == "Cow" {
                    if let PathArguments::AngleBracketed(args) = &last.arguments {
                        let borrows_str = args.args.iter().any(|arg| {
                            matches!(arg, GenericArgument::Type(inner) if Self::of(inner) == Self::Text)
                        });
                        if borrows_str {
                            return Self::Text;
                        }
                    }
                }

                Self::Number
            }
            _ => Self::Number,
        }
    }
}

/// Strips the `r#` prefix of raw identifiers.
pub(super) fn unraw(ident: &str) -> String {
    ident.strip_prefix("r#").unwrap_or(ident).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_text_types() {
        assert_eq!(FieldKind::of(&parse_quote!(String)), FieldKind::Text);
        assert_eq!(FieldKind::of(&parse_quote!(std::string::String)), FieldKind::Text);
        assert_eq!(FieldKind::of(&parse_quote!(&'static str)), FieldKind::Text);
        assert_eq!(FieldKind::of(&parse_quote!(Cow<'a, str>)), FieldKind::Text);
    }

    #[test]
    fn test_number_types() {
        assert_eq!(FieldKind::of(&parse_quote!(i64)), FieldKind::Number);
        assert_eq!(FieldKind::of(&parse_quote!(u8)), FieldKind::Number);
        assert_eq!(FieldKind::of(&parse_quote!(Option<String>)), FieldKind::Number);
        assert_eq!(FieldKind::of(&parse_quote!(Cow<'a, [u8]>)), FieldKind::Number);
    }

    #[test]
    fn test_parse_tags() {
        let attrs: Vec<Attribute> = vec![
            parse_quote!(#[annotate(x = "Required", v = "Min=3")]),
            parse_quote!(#[serde(default)]),
        ];
        let parsed = FieldAnnotations::from_attributes(&attrs).unwrap();
        let tags: Vec<(String, String)> = parsed
            .tags
            .iter()
            .map(|(tag, text)| (tag.clone(), text.value()))
            .collect();
        assert_eq!(
            tags,
            vec![
                ("x".to_string(), "Required".to_string()),
                ("v".to_string(), "Min=3".to_string()),
            ]
        );
    }

    #[test]
    fn test_duplicate_tag_rejected() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[annotate(x = "Required", x = "Min=1")])];
        assert!(FieldAnnotations::from_attributes(&attrs).is_err());
    }

    #[test]
    fn test_unraw() {
        assert_eq!(unraw("r#type"), "type");
        assert_eq!(unraw("name"), "name");
    }
}
