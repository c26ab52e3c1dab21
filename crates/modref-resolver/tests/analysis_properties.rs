//! Integration tests for modref-resolver.
//!
//! Each test builds a small descriptor universe by hand and checks one end-to-end
//! property of `analyze`.

use modref_resolver::{analyze, AnalysisInput, AnalysisOptions, AnalysisReport, FilterPolicy};
use modref_types::{ClassDescriptor, MemberRef, XmlReference};

const NONE: [&str; 0] = [];

fn run_with(
    baseline: &[ClassDescriptor],
    subjects: &[ClassDescriptor],
    xml: &[XmlReference],
    policy: &FilterPolicy,
) -> AnalysisReport {
    analyze(
        AnalysisInput {
            baseline,
            subjects,
            xml_references: xml,
            policy,
        },
        &AnalysisOptions::default(),
    )
    .expect("analysis should succeed")
}

fn run(baseline: &[ClassDescriptor], subjects: &[ClassDescriptor]) -> AnalysisReport {
    run_with(baseline, subjects, &[], &FilterPolicy::allow_all())
}

fn platform() -> Vec<ClassDescriptor> {
    vec![
        ClassDescriptor::new("java/lang/Object", "rt.jar")
            .with_method("toString", "()Ljava/lang/String;", vec![]),
        ClassDescriptor::new("java/lang/String", "rt.jar").with_super("java/lang/Object"),
        ClassDescriptor::new("android/view/View", "android.jar").with_super("java/lang/Object"),
    ]
}

/// A three-module app: `app` → `feature` → `core`, plus platform references.
fn sample_app() -> Vec<ClassDescriptor> {
    vec![
        ClassDescriptor::new("com/core/Store", "core")
            .with_super("java/lang/Object")
            .with_field("size", "I")
            .with_method("get", "(I)Ljava/lang/Object;", vec![]),
        ClassDescriptor::new("com/feature/Screen", "feature")
            .with_super("android/view/View")
            .with_field("store", "Lcom/core/Store;")
            .with_method(
                "render",
                "()V",
                vec![
                    MemberRef::method("com/core/Store", "get", "(I)Ljava/lang/Object;"),
                    MemberRef::field("com/core/Store", "size", "I"),
                    MemberRef::method("com/core/Store", "removed", "()V"),
                ],
            ),
        ClassDescriptor::new("com/app/Main", "app")
            .with_super("java/lang/Object")
            .with_method(
                "main",
                "()V",
                vec![
                    MemberRef::method("com/feature/Screen", "render", "()V"),
                    MemberRef::method("com/feature/Screen", "toString", "()Ljava/lang/String;"),
                    MemberRef::method("com/gone/Tracker", "track", "()V"),
                ],
            ),
    ]
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_same_input_same_report() {
    let baseline = platform();
    let subjects = sample_app();

    let first = run(&baseline, &subjects);
    let second = run(&baseline, &subjects);
    assert_eq!(first, second);

    let first_json = serde_json::to_string(&first).unwrap();
    let second_json = serde_json::to_string(&second).unwrap();
    assert_eq!(first_json, second_json);
}

#[test]
fn test_subject_order_does_not_matter() {
    let baseline = platform();
    let subjects = sample_app();
    let mut reversed = subjects.clone();
    reversed.reverse();

    assert_eq!(run(&baseline, &subjects), run(&baseline, &reversed));
}

// =============================================================================
// Edges
// =============================================================================

#[test]
fn test_expected_edges() {
    let report = run(&platform(), &sample_app());
    assert_eq!(
        report.dependency_edges(),
        vec![("app", "feature"), ("feature", "core")]
    );
}

#[test]
fn test_no_self_edges() {
    let subjects = vec![
        ClassDescriptor::new("m/A", "solo").with_method("a", "()V", vec![]),
        ClassDescriptor::new("m/B", "solo")
            .with_super("m/A")
            .with_method("b", "()V", vec![MemberRef::method("m/A", "a", "()V")]),
    ];
    let report = run(&[], &subjects);
    assert!(report.dependency_edges().is_empty());
    assert!(report.module("solo").is_none());
}

#[test]
fn test_baseline_modules_are_never_targets() {
    let report = run(&platform(), &sample_app());
    for (_, target) in report.dependency_edges() {
        assert_ne!(target, "rt.jar");
        assert_ne!(target, "android.jar");
    }
}

#[test]
fn test_inherited_member_links_to_declaring_module() {
    // `toString` is declared on java/lang/Object, so `app` gets no extra edge for it.
    let report = run(&platform(), &sample_app());
    let app = report.module("app").unwrap();
    assert_eq!(app.dependencies.len(), 1);
    assert!(app.unresolved_methods.is_empty());
}

// =============================================================================
// Filtering
// =============================================================================

#[test]
fn test_allow_list_gates_every_record() {
    let policy = FilterPolicy::new(&["^app$"], &NONE).unwrap();
    let report = run_with(&platform(), &sample_app(), &[], &policy);

    let modules: Vec<_> = report.modules().keys().map(String::as_str).collect();
    assert_eq!(modules, vec!["app"]);
    assert!(report.module("feature").is_none());
}

#[test]
fn test_allow_list_is_full_match() {
    let policy = FilterPolicy::new(&["app"], &NONE).unwrap();
    let subjects = vec![
        ClassDescriptor::new("x/A", "app-extra").with_super("gone/Base"),
        ClassDescriptor::new("x/B", "app").with_super("gone/Base"),
    ];
    let report = run_with(&[], &subjects, &[], &policy);
    assert!(report.module("app").is_some());
    assert!(report.module("app-extra").is_none());
}

#[test]
fn test_deny_list_suppresses_unresolved_only() {
    let policy = FilterPolicy::new(&NONE, &["com\\.gone\\..*", "com\\.core\\.Store"]).unwrap();
    let report = run_with(&platform(), &sample_app(), &[], &policy);

    let app = report.module("app").unwrap();
    assert!(app.unresolved_classes.is_empty());
    let feature = report.module("feature").unwrap();
    assert!(feature.unresolved_methods.is_empty());
    // Edges to an ignored class's module survive.
    assert!(feature.dependencies.contains("core"));
}

// =============================================================================
// Member resolution
// =============================================================================

#[test]
fn test_superclass_declaration_wins_over_interface() {
    let subjects = vec![
        ClassDescriptor::new("p/Parent", "parent-mod").with_method("op", "()V", vec![]),
        ClassDescriptor::interface("p/Contract", "contract-mod").with_method("op", "()V", vec![]),
        ClassDescriptor::new("p/Child", "child-mod")
            .with_super("p/Parent")
            .with_interface("p/Contract")
            .with_method("own", "()V", vec![]),
        ClassDescriptor::new("u/User", "user-mod")
            .with_method("use", "()V", vec![MemberRef::method("p/Child", "op", "()V")]),
    ];
    let report = run(&[], &subjects);
    let user = report.module("user-mod").unwrap();
    assert!(user.dependencies.contains("parent-mod"));
    assert!(!user.dependencies.contains("contract-mod"));
}

#[test]
fn test_missing_owner_yields_exactly_one_unresolved_class() {
    let subjects = vec![ClassDescriptor::new("u/User", "user").with_method(
        "use",
        "()V",
        vec![
            MemberRef::method("gone/Thing", "a", "()V"),
            MemberRef::method("gone/Thing", "b", "(I)V"),
            MemberRef::field("gone/Thing", "c", "J"),
        ],
    )];
    let report = run(&[], &subjects);
    let user = report.module("user").unwrap();

    assert_eq!(user.unresolved_classes.len(), 1);
    assert!(user.unresolved_classes.contains("gone.Thing"));
    assert!(user.unresolved_methods.is_empty());
    assert!(user.unresolved_fields.is_empty());
    assert!(user.dependencies.is_empty());
    assert!(user.abstract_gaps.is_empty());
}

#[test]
fn test_missing_ancestor_recorded_once() {
    let subjects = vec![
        ClassDescriptor::new("l/Mid", "lib").with_super("gone/Root"),
        ClassDescriptor::new("u/User", "user").with_method(
            "use",
            "()V",
            vec![MemberRef::method("l/Mid", "inherited", "()V")],
        ),
    ];
    let report = run(&[], &subjects);

    let user = report.module("user").unwrap();
    assert!(user.unresolved_classes.contains("gone.Root"));
    assert!(user.unresolved_methods.contains("l.Mid.inherited(()V)"));
    // The declaring module of the failed lookup is unknown, so no edge.
    assert!(user.dependencies.is_empty());

    let lib = report.module("lib").unwrap();
    assert!(lib.unresolved_classes.contains("gone.Root"));
}

// =============================================================================
// Abstract gaps
// =============================================================================

#[test]
fn test_diamond_interface_single_override() {
    let subjects = vec![
        ClassDescriptor::interface("d/I1", "api").with_abstract_method("foo", "()V"),
        ClassDescriptor::interface("d/I2", "api").with_abstract_method("foo", "()V"),
        ClassDescriptor::new("d/C", "impl")
            .with_interface("d/I1")
            .with_interface("d/I2")
            .with_method("foo", "()V", vec![]),
    ];
    let report = run(&[], &subjects);
    assert!(report.module("impl").unwrap().abstract_gaps.is_empty());
    assert!(report.is_clean());
}

#[test]
fn test_partial_override_across_hierarchy() {
    let hierarchy = || {
        vec![
            ClassDescriptor::new("h/A", "base")
                .abstract_class()
                .with_abstract_method("bar", "()V"),
            ClassDescriptor::new("h/B", "base").abstract_class().with_super("h/A"),
        ]
    };

    let mut implemented = hierarchy();
    implemented.push(
        ClassDescriptor::new("h/Cc", "leaf")
            .with_super("h/B")
            .with_method("bar", "()V", vec![]),
    );
    let report = run(&[], &implemented);
    assert!(report.module("leaf").unwrap().abstract_gaps.is_empty());

    let mut omitted = hierarchy();
    omitted.push(ClassDescriptor::new("h/Cc", "leaf").with_super("h/B"));
    let report = run(&[], &omitted);
    let gaps: Vec<_> = report
        .module("leaf")
        .unwrap()
        .abstract_gaps
        .iter()
        .cloned()
        .collect();
    assert_eq!(gaps, vec!["h.A.bar(()V)"]);
    assert!(report.module("base").is_none());
}

#[test]
fn test_concrete_ancestor_override_does_not_close_gap() {
    let subjects = vec![
        ClassDescriptor::new("h/A", "base")
            .abstract_class()
            .with_abstract_method("bar", "()V"),
        ClassDescriptor::new("h/P", "base")
            .with_super("h/A")
            .with_method("bar", "()V", vec![]),
        ClassDescriptor::new("h/C", "app").with_super("h/P"),
    ];
    let report = run(&[], &subjects);

    let app = report.module("app").unwrap();
    assert_eq!(app.abstract_gaps.len(), 1);
    assert!(app.abstract_gaps.contains("h.A.bar(()V)"));
    assert!(report.module("base").is_none());
}

// =============================================================================
// Markup references
// =============================================================================

#[test]
fn test_markup_fold_is_idempotent() {
    let subjects = vec![ClassDescriptor::new("com/ui/Badge", "ui-kit")];
    let once = vec![
        XmlReference::new("app", "com.ui.Badge"),
        XmlReference::new("app", "com.ui.Ghost"),
    ];
    let mut twice = once.clone();
    twice.extend(once.clone());

    let policy = FilterPolicy::allow_all();
    let single = run_with(&[], &subjects, &once, &policy);
    let double = run_with(&[], &subjects, &twice, &policy);
    assert_eq!(single, double);

    let app = single.module("app").unwrap();
    assert!(app.dependencies.contains("ui-kit"));
    assert!(app.unresolved_classes.contains("com.ui.Ghost"));
}

#[test]
fn test_markup_respects_filters() {
    let subjects = vec![ClassDescriptor::new("com/ui/Badge", "ui-kit")];
    let xml = vec![
        XmlReference::new("app", "com.ui.Ghost"),
        XmlReference::new("lib", "com.ui.Badge"),
    ];
    let policy = FilterPolicy::new(&["app"], &["com\\.ui\\..*"]).unwrap();
    let report = run_with(&[], &subjects, &xml, &policy);
    assert!(report.modules().is_empty());
}
