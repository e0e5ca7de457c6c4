//! Attribute parsing for the QueryRecord derive macro.
//!
//! A field carries at most one `#[qparams(...)]` attribute holding either
//! the raw annotation string or `skip`:
//!
//! ```ignore
//! #[qparams("name:filter sep:| ops:>,==,<")]
//! #[qparams(skip)]
//! ```
//!
//! The annotation string is passed through untouched; its options are
//! resolved at runtime by `qparams`.

use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Expr, ExprLit, Lit, Result, Token,
};

/// Field-level attributes from `#[qparams(...)]`.
#[derive(Debug, Clone, Default)]
pub struct FieldAttr {
    /// Raw annotation text; empty when none was given.
    pub tag: String,
    /// Leave this field out of the table.
    pub skip: bool,
}

impl Parse for FieldAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = FieldAttr::default();
        let mut seen_tag = false;

        let content: Punctuated<Expr, Token![,]> = Punctuated::parse_terminated(input)?;

        for expr in content {
            match &expr {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => {
                    if seen_tag {
                        return Err(Error::new(
                            s.span(),
                            "only one annotation string is allowed per field",
                        ));
                    }
                    seen_tag = true;
                    attr.tag = s.value();
                }

                Expr::Path(p) if p.path.is_ident("skip") => {
                    attr.skip = true;
                }

                _ => {
                    return Err(Error::new(
                        expr.span(),
                        "unknown qparams attribute. Expected: \"option:value ...\" or skip",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Extract the `#[qparams(...)]` attribute from a field's attributes.
pub fn parse_field_attrs(attrs: &[Attribute]) -> Result<FieldAttr> {
    for attr in attrs {
        if attr.path().is_ident("qparams") {
            return attr.parse_args::<FieldAttr>();
        }
    }
    Ok(FieldAttr::default())
}
