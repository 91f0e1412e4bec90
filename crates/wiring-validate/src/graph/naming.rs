//! Generated field naming
//!
//! `Billing.IPaymentService` with the default directive becomes
//! `_paymentService`; generic arguments and namespaces never reach the field
//! identifier.

use wiring_domain::{NamingConvention, NamingDirective};

/// Field identifier generated for `contract` under `directive`
pub fn field_name(contract: &str, directive: &NamingDirective, marker: char) -> String {
    let simple = simple_name(contract);
    let stem = if directive.strip_marker {
        strip_marker(simple, marker)
    } else {
        simple
    };
    let converted = match directive.convention {
        NamingConvention::CamelCase => lower_first(stem),
        NamingConvention::PascalCase => upper_first(stem),
        NamingConvention::SnakeCase => to_snake_case(stem),
    };
    format!("{}{}", directive.prefix, converted)
}

/// Type name without namespace or generic arguments
pub fn simple_name(contract: &str) -> &str {
    let without_generics = contract.split('<').next().unwrap_or(contract).trim();
    without_generics
        .rsplit('.')
        .next()
        .unwrap_or(without_generics)
}

/// Drop the leading marker only when it prefixes another capitalized word
fn strip_marker(name: &str, marker: char) -> &str {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(second)) if first == marker && second.is_uppercase() => {
            &name[first.len_utf8()..]
        }
        _ => name,
    }
}

fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn upper_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(char::is_lowercase),
                _ => false,
            };
            if boundary {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
