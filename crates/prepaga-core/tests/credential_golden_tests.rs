//! Golden tests for the credential rules.
//!
//! These tests verify relationship derivation, titular detection and the
//! deletion scope against known credentials.

use prepaga_core::models::Affiliate;
use prepaga_core::rules::credential::{
    is_titular, relationship_from_credential, resolve_relationship,
};
use prepaga_core::rules::family::{DeletionPlan, DeletionScope};

/// Test case from golden file.
struct GoldenCase {
    id: &'static str,
    credential: &'static str,
    explicit: Option<&'static str>,
    expected_label: &'static str,
    expected_titular: bool,
}

fn get_golden_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase {
            id: "titular",
            credential: "0000001-01",
            explicit: None,
            expected_label: "Titular",
            expected_titular: true,
        },
        GoldenCase {
            id: "spouse",
            credential: "0000001-02",
            explicit: None,
            expected_label: "Cónyuge",
            expected_titular: false,
        },
        GoldenCase {
            id: "first-child",
            credential: "0000001-03",
            explicit: None,
            expected_label: "Hijo",
            expected_titular: false,
        },
        GoldenCase {
            id: "second-child",
            credential: "0000001-04",
            explicit: None,
            expected_label: "Hijo",
            expected_titular: false,
        },
        GoldenCase {
            id: "third-child",
            credential: "0000001-05",
            explicit: None,
            expected_label: "Hijo",
            expected_titular: false,
        },
        GoldenCase {
            id: "dependent",
            credential: "0000001-06",
            explicit: None,
            expected_label: "Familiar a cargo",
            expected_titular: false,
        },
        GoldenCase {
            id: "three-parts",
            credential: "no-dash-value",
            explicit: None,
            expected_label: "Familiar a cargo",
            expected_titular: false,
        },
        GoldenCase {
            id: "non-numeric-sequence",
            credential: "0000001-ab",
            explicit: None,
            expected_label: "Familiar a cargo",
            expected_titular: false,
        },
        GoldenCase {
            id: "explicit-wins-over-titular-suffix",
            credential: "0000001-01",
            explicit: Some("Cónyuge"),
            expected_label: "Cónyuge",
            expected_titular: true,
        },
        GoldenCase {
            id: "explicit-wins-over-child",
            credential: "0000003-04",
            explicit: Some("Familiar a cargo"),
            expected_label: "Familiar a cargo",
            expected_titular: false,
        },
    ]
}

#[test]
fn test_golden_relationships() {
    for case in get_golden_cases() {
        let label = resolve_relationship(case.explicit, case.credential);
        assert_eq!(
            label, case.expected_label,
            "Case {}: relationship mismatch",
            case.id
        );
        assert_eq!(
            is_titular(case.credential),
            case.expected_titular,
            "Case {}: titular mismatch",
            case.id
        );
    }
}

#[test]
fn test_heuristic_ignores_explicit_field() {
    for case in get_golden_cases().iter().filter(|c| c.explicit.is_none()) {
        assert_eq!(
            relationship_from_credential(case.credential).label(),
            case.expected_label,
            "Case {}",
            case.id
        );
    }
}

#[test]
fn test_golden_deletion_scope() {
    for case in get_golden_cases() {
        let affiliate = Affiliate::new("12345678", case.credential);
        let plan = DeletionPlan::for_affiliate(&affiliate);
        assert_eq!(
            plan.warns_whole_group(),
            case.expected_titular,
            "Case {}: deletion scope mismatch",
            case.id
        );
        // Exactly one delete call is issued, always for the selected DNI
        assert_eq!(plan.dni, "12345678");
        if let DeletionScope::WholeGroup { group } = &plan.scope {
            assert!(case.credential.starts_with(group.as_str()));
        }
    }
}
