// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! *Part of the wider Timeline Pro project*
//!
//! This crate contains the Timeline Pro procedural macros.  Both macros check
//! their string literal at compile time and expand to `const`-friendly
//! expressions, so they can be used to define constants.
//!

extern crate proc_macro;

use chrono::{Datelike, NaiveDate};
use proc_macro::TokenStream;
use quote::quote;
use syn::{LitStr, parse_macro_input};

/// Create a `chrono::NaiveDate`, using `date!("2020-01-31")`, with compile time
/// checking of the value.
#[proc_macro]
pub fn date(input: TokenStream) -> TokenStream {
    let lit = parse_macro_input!(input as LitStr);

    let date = match NaiveDate::parse_from_str(&lit.value(), "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => {
            return syn::Error::new_spanned(lit, "Expected a valid `YYYY-MM-DD` date")
                .to_compile_error()
                .into();
        }
    };

    let year = date.year();
    let month = date.month();
    let day = date.day();
    quote! {
        match ::chrono::NaiveDate::from_ymd_opt(#year, #month, #day) {
            Some(date) => date,
            None => panic!("date checked at compile time"),
        }
    }
    .into()
}

/// Create a `Colour`, using `colour!("#3b82f6")`, with compile time checking of
/// the value.  `Colour` must be in scope where the macro is used.
#[proc_macro]
pub fn colour(input: TokenStream) -> TokenStream {
    let lit = parse_macro_input!(input as LitStr);
    let value = lit.value();
    let hex = value.strip_prefix('#').unwrap_or(&value);

    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return syn::Error::new_spanned(lit, "Expected a `#rrggbb` hex colour")
            .to_compile_error()
            .into();
    }

    // Validated above, so the radix conversions cannot fail
    let component = |range: std::ops::Range<usize>| -> u8 {
        u8::from_str_radix(&hex[range], 16).unwrap_or_default()
    };
    let r = component(0..2);
    let g = component(2..4);
    let b = component(4..6);

    quote! {
        Colour::from_rgb(#r, #g, #b)
    }
    .into()
}
