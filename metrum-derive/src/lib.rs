//! Derive macro implementation used by `metrum-core`.
//!
//! `metrum-derive` is an implementation detail of this workspace. The `Unit` derive expands in terms of
//! `crate::Unit`, `crate::Dimension`, `crate::ConversionTable` and `crate::Quantity`, so it is intended to be used
//! by `metrum-core` itself, where every shipped dimension is declared.
//!
//! # Generated impls
//!
//! For a unit enum `SpeedUnit` tagged with `#[quantity(dimension = Speed, ...)]`, the derive implements:
//!
//! - `crate::Unit for SpeedUnit` (names, plural names, built-in abbreviations, the `ALL` list)
//! - `Display` and `FromStr` for `SpeedUnit` (by unit name)
//! - `crate::Dimension for Speed`, including its lazily built conversion table
//! - one `from_<plural>` factory and one `<plural>` accessor per unit on `crate::Quantity<Speed>`
//!
//! # Attributes
//!
//! On the enum, a required `#[quantity(...)]` attribute:
//!
//! - `dimension = Speed`: dimension marker type
//! - `name = "Speed"`: dimension name used in errors, caches and abbreviation data
//! - `base = MeterPerSecond`: the variant every quantity is stored in
//!
//! On each variant, an optional `#[unit(...)]` attribute:
//!
//! - `plural = "MetersPerSecond"`: plural name, defaults to the variant name plus `s`
//! - `factor = 0.3048`: linear conversion, `base = value * factor`
//! - `to_base = |x| ...`, `from_base = |x| ...`: arbitrary conversion functions (both required)
//! - `abbreviations = ["m/s"]`: invariant-locale abbreviations, first one preferred
//!
//! The base variant must not declare a conversion; every other variant must declare exactly one.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input, Attribute, Data, DeriveInput, Expr, ExprArray, Fields, Ident, Lit, LitStr,
    Path, Token, Variant,
};

/// Derive `crate::Unit` for a unit enum and `crate::Dimension` for the dimension it belongs to.
///
/// The enum must carry a `#[quantity(dimension = ..., name = "...", base = ...)]` attribute.
///
/// This macro is intended for use by `metrum-core`.
#[proc_macro_derive(Unit, attributes(quantity, unit))]
pub fn derive_unit(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_unit_impl(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_unit_impl(input: DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    let data = match &input.data {
        Data::Enum(data) => data,
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "`Unit` can only be derived for enums",
            ))
        }
    };

    let quantity = parse_quantity_attribute(&input.attrs)?;

    let variants = data
        .variants
        .iter()
        .map(|variant| UnitVariant::from_variant(variant, &quantity.base))
        .collect::<syn::Result<Vec<_>>>()?;

    if !variants.iter().any(|v| v.ident == quantity.base) {
        return Err(syn::Error::new_spanned(
            &quantity.base,
            format!("base unit `{}` is not a variant of `{}`", quantity.base, name),
        ));
    }

    let dimension = &quantity.dimension;
    let dimension_name = &quantity.name;
    let base = &quantity.base;

    let idents: Vec<&Ident> = variants.iter().map(|v| &v.ident).collect();
    let unit_names: Vec<LitStr> = variants
        .iter()
        .map(|v| LitStr::new(&v.ident.to_string(), v.ident.span()))
        .collect();
    let plural_names: Vec<&LitStr> = variants.iter().map(|v| &v.plural).collect();
    let abbreviations: Vec<TokenStream2> = variants
        .iter()
        .map(|v| {
            let list = &v.abbreviations;
            quote! { &[#(#list),*] }
        })
        .collect();
    let to_base: Vec<TokenStream2> = variants.iter().map(|v| v.conversion.to_base()).collect();
    let from_base: Vec<TokenStream2> = variants.iter().map(|v| v.conversion.from_base()).collect();

    let mut accessors = Vec::with_capacity(variants.len());
    for (variant, (to_base, from_base)) in variants.iter().zip(to_base.iter().zip(&from_base)) {
        let snake = to_snake_case(&variant.plural.value());
        let factory = format_ident!("from_{}", snake);
        let accessor = format_ident!("{}", snake);
        let factory_doc = format!(
            "Creates a {} quantity from a value in {}.",
            dimension_name.value(),
            variant.plural.value()
        );
        let accessor_doc = format!("Returns this quantity expressed in {}.", variant.plural.value());

        accessors.push(quote! {
            #[doc = #factory_doc]
            #[inline]
            pub fn #factory(value: f64) -> Self {
                Self::from_base_value((#to_base)(value))
            }

            #[doc = #accessor_doc]
            #[inline]
            pub fn #accessor(&self) -> f64 {
                (#from_base)(self.value())
            }
        });
    }

    let expanded = quote! {
        impl crate::Unit for #name {
            const ALL: &'static [Self] = &[#(Self::#idents),*];

            fn name(self) -> &'static str {
                match self {
                    #(Self::#idents => #unit_names,)*
                }
            }

            fn plural_name(self) -> &'static str {
                match self {
                    #(Self::#idents => #plural_names,)*
                }
            }

            fn abbreviations(self) -> &'static [&'static str] {
                match self {
                    #(Self::#idents => #abbreviations,)*
                }
            }
        }

        impl ::core::fmt::Display for #name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(crate::Unit::name(*self))
            }
        }

        impl ::core::str::FromStr for #name {
            type Err = crate::UnsupportedUnitError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                <Self as crate::Unit>::from_name(s)
                    .ok_or_else(|| crate::UnsupportedUnitError::new(s, #dimension_name))
            }
        }

        impl crate::Dimension for #dimension {
            type Unit = #name;
            const NAME: &'static str = #dimension_name;
            const BASE_UNIT: #name = #name::#base;

            fn conversion_table() -> &'static crate::ConversionTable<#name> {
                static TABLE: ::once_cell::sync::Lazy<crate::ConversionTable<#name>> =
                    ::once_cell::sync::Lazy::new(|| {
                        crate::ConversionTable::new(
                            #dimension_name,
                            #name::#base,
                            ::std::vec![
                                #(crate::ConversionEntry::new(#name::#idents, #to_base, #from_base)),*
                            ],
                        )
                    });
                &TABLE
            }
        }

        impl crate::Quantity<#dimension> {
            #(#accessors)*
        }
    };

    Ok(expanded)
}

/// Parsed contents of the enum-level `#[quantity(...)]` attribute.
struct QuantityAttribute {
    dimension: Path,
    name: LitStr,
    base: Ident,
}

impl Parse for QuantityAttribute {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut dimension: Option<Path> = None;
        let mut name: Option<LitStr> = None;
        let mut base: Option<Ident> = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "dimension" => dimension = Some(input.parse()?),
                "name" => name = Some(input.parse()?),
                "base" => base = Some(input.parse()?),
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute `{}`", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        let dimension = dimension.ok_or_else(|| {
            syn::Error::new(input.span(), "missing required attribute `dimension`")
        })?;
        let name =
            name.ok_or_else(|| syn::Error::new(input.span(), "missing required attribute `name`"))?;
        let base =
            base.ok_or_else(|| syn::Error::new(input.span(), "missing required attribute `base`"))?;

        Ok(QuantityAttribute {
            dimension,
            name,
            base,
        })
    }
}

fn parse_quantity_attribute(attrs: &[Attribute]) -> syn::Result<QuantityAttribute> {
    for attr in attrs {
        if attr.path().is_ident("quantity") {
            return attr.parse_args::<QuantityAttribute>();
        }
    }

    Err(syn::Error::new(
        proc_macro2::Span::call_site(),
        "missing #[quantity(...)] attribute",
    ))
}

/// How a single unit converts to and from the base unit.
enum Conversion {
    Identity,
    Factor(Expr),
    Functions { to_base: Expr, from_base: Expr },
}

impl Conversion {
    fn to_base(&self) -> TokenStream2 {
        match self {
            Conversion::Identity => fn_pointer(quote! { |x| x }),
            Conversion::Factor(factor) => fn_pointer(quote! { |x| x * (#factor) }),
            Conversion::Functions { to_base, .. } => fn_pointer(quote! { #to_base }),
        }
    }

    fn from_base(&self) -> TokenStream2 {
        match self {
            Conversion::Identity => fn_pointer(quote! { |x| x }),
            Conversion::Factor(factor) => fn_pointer(quote! { |x| x / (#factor) }),
            Conversion::Functions { from_base, .. } => fn_pointer(quote! { #from_base }),
        }
    }
}

/// Coerces a non-capturing closure to `fn(f64) -> f64` so its argument type is fixed.
fn fn_pointer(closure: TokenStream2) -> TokenStream2 {
    quote! {
        {
            let convert: fn(f64) -> f64 = #closure;
            convert
        }
    }
}

/// One enum variant with its parsed `#[unit(...)]` attribute.
struct UnitVariant {
    ident: Ident,
    plural: LitStr,
    conversion: Conversion,
    abbreviations: Vec<LitStr>,
}

impl UnitVariant {
    fn from_variant(variant: &Variant, base: &Ident) -> syn::Result<Self> {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "unit variants must not carry fields",
            ));
        }

        let attr = match variant.attrs.iter().find(|a| a.path().is_ident("unit")) {
            Some(attr) => attr.parse_args::<UnitAttribute>()?,
            None => UnitAttribute::default(),
        };

        let ident = variant.ident.clone();
        let is_base = ident == *base;

        let conversion = match (attr.factor, attr.to_base, attr.from_base) {
            (None, None, None) if is_base => Conversion::Identity,
            (None, None, None) => {
                return Err(syn::Error::new_spanned(
                    variant,
                    format!(
                        "unit `{}` needs either `factor` or `to_base` and `from_base`",
                        ident
                    ),
                ))
            }
            (_, _, _) if is_base => {
                return Err(syn::Error::new_spanned(
                    variant,
                    format!("base unit `{}` must not declare a conversion", ident),
                ))
            }
            (Some(factor), None, None) => Conversion::Factor(factor),
            (None, Some(to_base), Some(from_base)) => Conversion::Functions { to_base, from_base },
            (None, _, _) => {
                return Err(syn::Error::new_spanned(
                    variant,
                    "`to_base` and `from_base` must be declared together",
                ))
            }
            (Some(_), _, _) => {
                return Err(syn::Error::new_spanned(
                    variant,
                    "`factor` cannot be combined with `to_base` or `from_base`",
                ))
            }
        };

        let plural = attr
            .plural
            .unwrap_or_else(|| LitStr::new(&format!("{}s", ident), ident.span()));

        Ok(UnitVariant {
            ident,
            plural,
            conversion,
            abbreviations: attr.abbreviations,
        })
    }
}

/// Parsed contents of a variant-level `#[unit(...)]` attribute.
#[derive(Default)]
struct UnitAttribute {
    plural: Option<LitStr>,
    factor: Option<Expr>,
    to_base: Option<Expr>,
    from_base: Option<Expr>,
    abbreviations: Vec<LitStr>,
}

impl Parse for UnitAttribute {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut attr = UnitAttribute::default();

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "plural" => attr.plural = Some(input.parse()?),
                "factor" => attr.factor = Some(input.parse()?),
                "to_base" => attr.to_base = Some(input.parse()?),
                "from_base" => attr.from_base = Some(input.parse()?),
                "abbreviations" => {
                    let array: ExprArray = input.parse()?;
                    attr.abbreviations = array
                        .elems
                        .iter()
                        .map(|elem| match elem {
                            Expr::Lit(lit) => match &lit.lit {
                                Lit::Str(s) => Ok(s.clone()),
                                _ => Err(syn::Error::new_spanned(elem, "expected a string literal")),
                            },
                            _ => Err(syn::Error::new_spanned(elem, "expected a string literal")),
                        })
                        .collect::<syn::Result<Vec<_>>>()?;
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute `{}`", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(attr)
    }
}

/// `RevolutionsPerMinute` -> `revolutions_per_minute`.
fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }

    out
}
