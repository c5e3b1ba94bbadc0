use quote::quote;
use syn::{AngleBracketedGenericArguments, GenericArgument, Path, PathArguments, Type, TypePath};

fn last_segment_ident(ty: &Type) -> Option<String> {
    if let Type::Path(TypePath { qself: None, path }) = ty {
        return path.segments.last().map(|seg| seg.ident.to_string());
    }
    None
}

pub fn inner_of_option(ty: &Type) -> Option<&Type> {
    let Type::Path(TypePath { path, .. }) = ty else {
        return None;
    };
    let is_option = match path.segments.len() {
        1 => path.segments[0].ident == "Option",
        3 => {
            (path.segments[0].ident == "std" || path.segments[0].ident == "core")
                && path.segments[1].ident == "option"
                && path.segments[2].ident == "Option"
        }
        _ => false,
    };
    if !is_option {
        return None;
    }

    if let Some(seg) = path.segments.last()
        && let PathArguments::AngleBracketed(AngleBracketedGenericArguments { args, .. }) =
            &seg.arguments
        && let Some(GenericArgument::Type(t)) = args.first()
    {
        return Some(t);
    }
    None
}

pub fn is_bool(ty: &Type) -> bool {
    last_segment_ident(ty).is_some_and(|ident| ident == "bool")
}

/// Usage placeholder for a field type: primitives keep their name, anything
/// else becomes `value`.
pub fn placeholder_for_type(ty: &Type) -> String {
    match last_segment_ident(ty).as_deref() {
        Some(
            prim @ ("u8" | "u16" | "u32" | "u64" | "usize" | "i8" | "i16" | "i32" | "i64"
            | "isize" | "f32" | "f64"),
        ) => prim.to_string(),
        Some("PathBuf") => "path".to_string(),
        _ => "value".to_string(),
    }
}

pub fn build_cli_parse_expr(ty: &Type, parse_with: Option<&Path>) -> proc_macro2::TokenStream {
    if let Some(parse_with) = parse_with {
        quote! { #parse_with(&raw)? }
    } else {
        quote! {
            raw.parse::<#ty>()
                .map_err(|e| crate::Error::invalid_input(format!(
                    "Invalid value for --{name}: {raw} ({e})"
                )))?
        }
    }
}

pub fn to_kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (idx, ch) in s.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if idx != 0 {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else if ch == '_' {
            out.push('-');
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::{inner_of_option, is_bool, placeholder_for_type, to_kebab_case};

    #[test]
    fn inner_of_option_supports_short_std_and_core_paths() {
        let short_ty: syn::Type = parse_quote!(Option<std::time::Duration>);
        let std_ty: syn::Type = parse_quote!(std::option::Option<u8>);
        let core_ty: syn::Type = parse_quote!(core::option::Option<bool>);
        let non_opt: syn::Type = parse_quote!(Vec<f64>);

        let short_inner = inner_of_option(&short_ty).expect("expected Option inner type");
        let std_inner = inner_of_option(&std_ty).expect("expected std Option inner type");
        let core_inner = inner_of_option(&core_ty).expect("expected core Option inner type");

        assert_eq!(
            quote::quote!(#short_inner).to_string(),
            "std :: time :: Duration"
        );
        assert_eq!(quote::quote!(#std_inner).to_string(), "u8");
        assert_eq!(quote::quote!(#core_inner).to_string(), "bool");
        assert!(inner_of_option(&non_opt).is_none());
    }

    #[test]
    fn is_bool_matches_only_bool() {
        let flag: syn::Type = parse_quote!(bool);
        let count: syn::Type = parse_quote!(usize);
        assert!(is_bool(&flag));
        assert!(!is_bool(&count));
    }

    #[test]
    fn placeholder_keeps_primitive_names_and_falls_back_to_value() {
        let cities: syn::Type = parse_quote!(usize);
        let limit: syn::Type = parse_quote!(f64);
        let path: syn::Type = parse_quote!(std::path::PathBuf);
        let text: syn::Type = parse_quote!(String);

        assert_eq!(placeholder_for_type(&cities), "usize");
        assert_eq!(placeholder_for_type(&limit), "f64");
        assert_eq!(placeholder_for_type(&path), "path");
        assert_eq!(placeholder_for_type(&text), "value");
    }

    #[test]
    fn to_kebab_case_handles_pascal_and_snake_names() {
        assert_eq!(to_kebab_case("InputFormat"), "input-format");
        assert_eq!(to_kebab_case("max_cities"), "max-cities");
        assert_eq!(to_kebab_case("already-kebab"), "already-kebab");
        assert_eq!(to_kebab_case("X"), "x");
    }
}
