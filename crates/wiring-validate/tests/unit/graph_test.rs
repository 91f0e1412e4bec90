//! Tests for dependency closures and constructor field maps

use crate::test_utils::*;
use wiring_domain::{DependencyListEntry, Severity};
use wiring_validate::graph::{build_closure, constructor_fields};
use wiring_validate::{AnalysisConfig, DeclarationSet, GraphFinding};

#[test]
fn test_closure_puts_inherited_edges_first() {
    let inputs = vec![
        declaration("App.AuditedService")
            .abstract_class()
            .depends_on(&["App.IAuditLog"])
            .build(),
        declaration("App.InvoiceService")
            .base("App.AuditedService")
            .field("_clock", "App.IClock")
            .depends_on(&["App.IMailer", "App.IAuditLog"])
            .build(),
    ];
    let config = AnalysisConfig::default();
    let set = DeclarationSet::build(&inputs, &config).unwrap();

    let closure = build_closure(&set, 1);
    let contracts: Vec<&str> = closure.contracts().collect();
    assert_eq!(contracts, vec!["App.IAuditLog", "App.IClock", "App.IMailer"]);
    assert_eq!(closure.inherited().count(), 1);

    let (fields, findings) = constructor_fields(set.get(1).unwrap(), &closure, &config);
    assert!(findings.is_empty());
    let names: Vec<&str> = fields.fields.iter().map(|f| f.field.as_str()).collect();
    assert_eq!(names, vec!["_auditLog", "_clock", "_mailer"]);
    assert_eq!(
        fields.fields[0].origin.as_deref(),
        Some("App.AuditedService")
    );
}

#[test]
fn test_entry_naming_applies_per_entry() {
    let output = analyze(&[
        declaration("App.Checkout")
            .entry(DependencyListEntry {
                contracts: vec!["Billing.IPaymentService".to_string()],
                prefix: Some("svc_".to_string()),
                ..DependencyListEntry::default()
            })
            .depends_on(&["Mail.IEmailService"])
            .build(),
    ]);

    let fields = output.fields_for("App.Checkout").unwrap();
    assert_eq!(fields.field_for("Billing.IPaymentService"), Some("svc_paymentService"));
    assert_eq!(fields.field_for("Mail.IEmailService"), Some("_emailService"));
}

#[test]
fn test_field_name_collision() {
    let output = analyze(&[
        declaration("App.Notifier")
            .depends_on(&["Billing.IPaymentService", "Shipping.IPaymentService"])
            .build(),
    ]);

    let collisions = with_code(&output, "DEP001");
    assert_eq!(collisions.len(), 1);
    assert_eq!(collisions[0].severity, Severity::Error);
    assert_eq!(
        collisions[0].message,
        "Generated field _paymentService for Shipping.IPaymentService on App.Notifier collides with the field for Billing.IPaymentService"
    );
    assert_eq!(output.fields_for("App.Notifier").unwrap().fields.len(), 1);
}

#[test]
fn test_inherited_collision_is_reported_on_base_only() {
    let output = analyze(&[
        declaration("App.NotifierBase")
            .abstract_class()
            .depends_on(&["Billing.IPaymentService", "Shipping.IPaymentService"])
            .build(),
        declaration("App.SmsNotifier")
            .base("App.NotifierBase")
            .lifetime(wiring_domain::Lifetime::Scoped)
            .build(),
    ]);

    let collisions = with_code(&output, "DEP001");
    assert_eq!(collisions.len(), 1);
    assert_eq!(collisions[0].declaration, "App.NotifierBase");
}

#[test]
fn test_self_dependency() {
    let output = analyze(&[
        declaration("App.Cache")
            .contracts(&["App.ICache"])
            .depends_on(&["App.ICache"])
            .build(),
    ]);

    assert_eq!(codes(&output), vec!["DEP002"]);
    assert_eq!(output.diagnostics[0].severity, Severity::Warning);
}

#[test]
fn test_unresolved_reference() {
    let output = analyze(&[declaration("App.Checkout").depends_on(&["App.IMissing"]).build()]);

    let unresolved = with_code(&output, "DEP003");
    assert_eq!(unresolved.len(), 1);
    assert_eq!(
        unresolved[0].category,
        wiring_domain::DiagnosticCategory::UnresolvedReference
    );
}

#[test]
fn test_external_references_are_not_unresolved() {
    let output = analyze(&[
        declaration("App.Checkout")
            .entry(DependencyListEntry {
                contracts: vec!["Payments.IGateway".to_string()],
                external: true,
                ..DependencyListEntry::default()
            })
            .depends_on(&["Microsoft.Extensions.Logging.ILogger<App.Checkout>"])
            .build(),
    ]);

    assert!(output.diagnostics.is_empty());
    let fields = output.fields_for("App.Checkout").unwrap();
    assert_eq!(fields.field_for("Payments.IGateway"), Some("_gateway"));
    assert_eq!(
        fields.field_for("Microsoft.Extensions.Logging.ILogger<App.Checkout>"),
        Some("_logger")
    );
}

#[test]
fn test_graph_finding_diagnostic() {
    use wiring_validate::Finding;

    let finding = GraphFinding::SelfDependency {
        declaration: "App.Cache".to_string(),
        location: wiring_domain::Location::new("Cache.cs", 4, 2),
        contract: "App.ICache".to_string(),
    };
    let diagnostic = finding.to_diagnostic();

    assert_eq!(diagnostic.code, "DEP002");
    assert_eq!(diagnostic.message, "App.Cache depends on its own contract App.ICache");
    assert_eq!(diagnostic.location.line, 4);
    assert!(diagnostic.notes.is_empty());
}
