//! Resolution behavior - matching, environment filtering, tie-break

use weave_engine::{
    Descriptor, Error, ProviderRegistry, Requirement, Tier,
};

use crate::helpers::{greeter_spec, Greeter};

fn no_envs() -> Vec<String> {
    Vec::new()
}

// ============================================================================
// Tie-break selection
// ============================================================================

#[test]
fn one_primary_beats_two_basic() {
    let registry = ProviderRegistry::from_specs(
        vec![
            greeter_spec("basic-a", "a"),
            greeter_spec("primary", "p").with_tier(Tier::Primary),
            greeter_spec("basic-b", "b"),
        ],
        no_envs(),
    );

    let greeter = registry.resolve::<dyn Greeter>().unwrap();
    assert_eq!(greeter.greet(), "p");
}

#[test]
fn two_basic_candidates_are_ambiguous() {
    let registry = ProviderRegistry::from_specs(
        vec![greeter_spec("basic-a", "a"), greeter_spec("basic-b", "b")],
        no_envs(),
    );

    let err = registry.resolve::<dyn Greeter>().unwrap_err();
    match err {
        Error::Ambiguous {
            tier, candidates, ..
        } => {
            assert_eq!(tier, Tier::Basic);
            assert_eq!(candidates.len(), 2);
            assert!(candidates[0].contains("basic-a"));
            assert!(candidates[1].contains("basic-b"));
        }
        other => panic!("expected ambiguity, got {other}"),
    }
}

#[test]
fn two_primary_candidates_are_ambiguous_despite_single_basic() {
    let registry = ProviderRegistry::from_specs(
        vec![
            greeter_spec("p1", "1").with_tier(Tier::Primary),
            greeter_spec("p2", "2").with_tier(Tier::Primary),
            greeter_spec("only-basic", "b"),
        ],
        no_envs(),
    );

    let err = registry.resolve::<dyn Greeter>().unwrap_err();
    assert!(matches!(
        err,
        Error::Ambiguous {
            tier: Tier::Primary,
            ..
        }
    ));
}

#[test]
fn fallback_is_used_only_as_last_resort() {
    let registry = ProviderRegistry::from_specs(
        vec![
            greeter_spec("fallback", "f").with_tier(Tier::Fallback),
            greeter_spec("basic", "b"),
        ],
        no_envs(),
    );
    let greeter = registry.resolve::<dyn Greeter>().unwrap();
    assert_eq!(greeter.greet(), "b");

    let registry = ProviderRegistry::from_specs(
        vec![greeter_spec("fallback", "f").with_tier(Tier::Fallback)],
        no_envs(),
    );
    let greeter = registry.resolve::<dyn Greeter>().unwrap();
    assert_eq!(greeter.greet(), "f");
}

#[test]
fn two_fallback_candidates_are_still_ambiguous() {
    let registry = ProviderRegistry::from_specs(
        vec![
            greeter_spec("f1", "1").with_tier(Tier::Fallback),
            greeter_spec("f2", "2").with_tier(Tier::Fallback),
        ],
        no_envs(),
    );

    let err = registry.resolve::<dyn Greeter>().unwrap_err();
    assert!(matches!(
        err,
        Error::Ambiguous {
            tier: Tier::Fallback,
            ..
        }
    ));
}

#[test]
fn no_match_is_not_found() {
    let registry = ProviderRegistry::from_specs(vec![], no_envs());
    let err = registry.resolve::<dyn Greeter>().unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

// ============================================================================
// Qualifier matching
// ============================================================================

#[test]
fn qualified_query_selects_the_matching_advertisement() {
    let registry = ProviderRegistry::from_specs(
        vec![
            greeter_spec("loud", "HELLO").with_qualifier("loud"),
            greeter_spec("quiet", "hi").with_qualifier("quiet"),
        ],
        no_envs(),
    );

    let loud = registry.resolve_named::<dyn Greeter>("loud").unwrap();
    assert_eq!(loud.greet(), "HELLO");

    let quiet = registry.resolve_named::<dyn Greeter>("quiet").unwrap();
    assert_eq!(quiet.greet(), "hi");
}

#[test]
fn empty_qualifier_is_not_a_wildcard() {
    let registry = ProviderRegistry::from_specs(
        vec![greeter_spec("loud", "HELLO").with_qualifier("loud")],
        no_envs(),
    );

    // Unqualified query must not match the qualified provider.
    let err = registry.resolve::<dyn Greeter>().unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[test]
fn qualifier_attributes_must_match_exactly() {
    let registry = ProviderRegistry::from_specs(
        vec![greeter_spec("kb", "qwerty")
            .with_qualifier("keyboard")
            .with_attribute("layout", "qwerty")],
        no_envs(),
    );

    let query = Descriptor::of::<dyn Greeter>()
        .with_qualifier("keyboard")
        .with_attribute("layout", "qwerty");
    assert!(registry.resolve_with::<dyn Greeter>(&query).is_ok());

    let wrong = Descriptor::of::<dyn Greeter>()
        .with_qualifier("keyboard")
        .with_attribute("layout", "dvorak");
    let err = registry.resolve_with::<dyn Greeter>(&wrong).unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

// ============================================================================
// Environment filtering
// ============================================================================

#[test]
fn missing_required_tag_excludes_the_provider() {
    let registry = ProviderRegistry::from_specs(
        vec![greeter_spec("ab-only", "ab")
            .with_requirement(Requirement::unconditional().requires("A").requires("B"))],
        ["A"],
    );

    let err = registry.resolve::<dyn Greeter>().unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[test]
fn active_excluded_tag_excludes_the_provider() {
    let registry = ProviderRegistry::from_specs(
        vec![greeter_spec("not-on-a", "x")
            .with_requirement(Requirement::unconditional().excludes("A"))],
        ["A"],
    );

    let err = registry.resolve::<dyn Greeter>().unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[test]
fn requirement_filter_runs_before_tie_break() {
    // The primary candidate is inactive, so the single basic one wins
    // without ambiguity.
    let registry = ProviderRegistry::from_specs(
        vec![
            greeter_spec("primary-prod", "p")
                .with_tier(Tier::Primary)
                .with_requirement(Requirement::unconditional().requires("prod")),
            greeter_spec("basic", "b"),
        ],
        ["dev"],
    );

    let greeter = registry.resolve::<dyn Greeter>().unwrap();
    assert_eq!(greeter.greet(), "b");
}

#[test]
fn contradictory_requirement_disables_the_provider() {
    for envs in [vec![], vec!["A".to_string()], vec!["A".into(), "B".into()]] {
        let registry = ProviderRegistry::from_specs(
            vec![greeter_spec("disabled", "never").with_requirement(
                Requirement::unconditional().requires("A").excludes("A"),
            )],
            envs,
        );
        let err = registry.resolve::<dyn Greeter>().unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }
}

// ============================================================================
// Multiplicity
// ============================================================================

#[test]
fn resolve_all_returns_every_match_in_registration_order() {
    let registry = ProviderRegistry::from_specs(
        vec![
            greeter_spec("first", "1").with_tier(Tier::Fallback),
            greeter_spec("second", "2").with_tier(Tier::Primary),
            greeter_spec("third", "3"),
        ],
        no_envs(),
    );

    let all = registry.resolve_all_of::<dyn Greeter>().unwrap();
    let texts: Vec<String> = all.iter().map(|g| g.greet()).collect();
    assert_eq!(texts, vec!["1", "2", "3"]);
}

#[test]
fn resolve_all_is_idempotent() {
    let registry = ProviderRegistry::from_specs(
        vec![greeter_spec("a", "a"), greeter_spec("b", "b")],
        no_envs(),
    );

    let first: Vec<String> = registry
        .resolve_all_of::<dyn Greeter>()
        .unwrap()
        .iter()
        .map(|g| g.greet())
        .collect();
    let second: Vec<String> = registry
        .resolve_all_of::<dyn Greeter>()
        .unwrap()
        .iter()
        .map(|g| g.greet())
        .collect();
    assert_eq!(first, second);
}

#[test]
fn resolve_all_with_no_match_is_an_empty_list() {
    let registry = ProviderRegistry::from_specs(vec![], no_envs());
    let all = registry.resolve_all_of::<dyn Greeter>().unwrap();
    assert!(all.is_empty());
}

#[test]
fn resolve_all_respects_environment_filtering() {
    let registry = ProviderRegistry::from_specs(
        vec![
            greeter_spec("everywhere", "e"),
            greeter_spec("prod-only", "p")
                .with_requirement(Requirement::unconditional().requires("prod")),
        ],
        ["dev"],
    );

    let all = registry.resolve_all_of::<dyn Greeter>().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].greet(), "e");
}

// ============================================================================
// Typed resolution
// ============================================================================

#[test]
fn downcast_to_the_wrong_type_is_a_type_mismatch() {
    let registry = ProviderRegistry::from_specs(
        vec![greeter_spec("greeter", "hello")],
        no_envs(),
    );

    let query = Descriptor::of::<dyn Greeter>();
    let err = registry.resolve_with::<String>(&query).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
}
