//! Tests for generated field naming

use wiring_domain::{NamingConvention, NamingDirective};
use wiring_validate::graph::naming::{field_name, simple_name};

fn directive(prefix: &str, convention: NamingConvention, strip_marker: bool) -> NamingDirective {
    NamingDirective {
        prefix: prefix.to_string(),
        convention,
        strip_marker,
    }
}

#[test]
fn test_default_naming() {
    let name = field_name("Billing.IPaymentService", &NamingDirective::default(), 'I');
    assert_eq!(name, "_paymentService");
}

#[test]
fn test_custom_prefix() {
    let naming = directive("svc_", NamingConvention::CamelCase, true);
    assert_eq!(field_name("IPaymentService", &naming, 'I'), "svc_paymentService");
}

#[test]
fn test_generic_arguments_are_dropped() {
    let name = field_name("Data.IRepository<Shop.Order>", &NamingDirective::default(), 'I');
    assert_eq!(name, "_repository");
    assert_eq!(
        simple_name("System.Collections.Generic.IList<Shop.Order>"),
        "IList"
    );
}

#[test]
fn test_marker_kept_when_not_a_prefix() {
    assert_eq!(
        field_name("Search.Index", &NamingDirective::default(), 'I'),
        "_index"
    );
}

#[test]
fn test_marker_kept_when_stripping_disabled() {
    let naming = directive("_", NamingConvention::CamelCase, false);
    assert_eq!(field_name("IPaymentService", &naming, 'I'), "_iPaymentService");
}

#[test]
fn test_pascal_case() {
    let naming = directive("", NamingConvention::PascalCase, true);
    assert_eq!(field_name("IPaymentService", &naming, 'I'), "PaymentService");
}

#[test]
fn test_snake_case_handles_acronyms() {
    let naming = directive("_", NamingConvention::SnakeCase, true);

    assert_eq!(field_name("IPaymentService", &naming, 'I'), "_payment_service");
    assert_eq!(
        field_name("IHTTPClientFactory", &naming, 'I'),
        "_http_client_factory"
    );
    assert_eq!(field_name("IOAuth2Provider", &naming, 'I'), "_o_auth2_provider");
}

#[test]
fn test_custom_marker() {
    let naming = NamingDirective::default();
    assert_eq!(field_name("TClock", &naming, 'T'), "_clock");
    assert_eq!(field_name("IClock", &naming, 'T'), "_iClock");
}
