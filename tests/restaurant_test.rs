// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! Runs full passes over the restaurant sample in test_app/ and checks the
//! generated factory against the copy checked in there.

use cargo_factory_common::UniverseSnapshot;
use cargo_factory_config::{Declaration, DeclarationBuilder, FactoryGroupExt};
use cargo_factory_impl::{
    ArtifactLocation, CollectingSink, PassAborted, PassOutcome, ProcessingDriver, Rejection,
    RustSourceRenderer,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn test_app() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("test_app")
}

fn restaurant_universe() -> UniverseSnapshot {
    UniverseSnapshot::load(&test_app().join(".factory")).expect("Failed to load restaurant universe")
}

fn restaurant_declarations() -> Vec<Declaration> {
    DeclarationBuilder::read_from_file(test_app().join("factory.ron"))
        .expect("Failed to read test_app/factory.ron")
        .declarations
}

fn generate_into(dir: &Path, declarations: &[Declaration]) -> PassOutcome {
    let universe = restaurant_universe();
    let mut renderer = RustSourceRenderer::new(dir);
    let mut sink = CollectingSink::new();
    ProcessingDriver::new(&universe).run(declarations, &mut renderer, &mut sink)
}

#[test]
fn test_generated_factory_matches_checked_in_copy() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");

    let outcome = generate_into(temp_dir.path(), &restaurant_declarations());

    let report = match outcome {
        PassOutcome::Done(report) => report,
        PassOutcome::Aborted(aborted) => panic!("restaurant pass aborted: {aborted}"),
    };
    assert!(report.is_clean());

    let generated = temp_dir.path().join("pizza_meal_factory.rs");
    assert_eq!(report.emitted.len(), 1);
    assert_eq!(report.emitted[0].location, ArtifactLocation::File(generated.clone()));

    let expected = fs::read_to_string(test_app().join("src/generated/pizza_meal_factory.rs")).unwrap();
    let actual = fs::read_to_string(generated).unwrap();
    assert_eq!(
        actual, expected,
        "test_app/src/generated/pizza_meal_factory.rs is stale; regenerate it with `cargo factory` in test_app"
    );
}

#[test]
fn test_generation_is_byte_for_byte_repeatable() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    assert!(generate_into(first.path(), &restaurant_declarations()).is_clean());
    assert!(generate_into(second.path(), &restaurant_declarations()).is_clean());

    assert_eq!(
        fs::read(first.path().join("pizza_meal_factory.rs")).unwrap(),
        fs::read(second.path().join("pizza_meal_factory.rs")).unwrap()
    );
}

#[test]
fn test_duplicate_id_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = temp_dir.path().join("generated");

    let mut builder = DeclarationBuilder::new();
    builder
        .factory_group("crate::pizza::Meal")
        .register("Calzone", "crate::pizza::CalzonePizza")
        .register("Calzone", "crate::pizza::MargheritaPizza")
        .build();

    let outcome = generate_into(&out_dir, &builder.declarations);

    match outcome {
        PassOutcome::Aborted(PassAborted::Conflict(conflict)) => {
            assert_eq!(conflict.existing.qualified_identity(), "crate::pizza::CalzonePizza");
            assert_eq!(conflict.rejected.qualified_identity(), "crate::pizza::MargheritaPizza");
        }
        other => panic!("expected an id conflict, got {other:?}"),
    }
    assert!(!out_dir.exists());
}

#[test]
fn test_garlic_bread_is_not_a_meal() {
    let temp_dir = TempDir::new().unwrap();

    let mut declarations = restaurant_declarations();
    declarations.push(Declaration::new(
        "Garlic",
        "crate::pizza::Meal",
        "crate::pizza::GarlicBread",
    ));

    let outcome = generate_into(temp_dir.path(), &declarations);

    match outcome {
        PassOutcome::Aborted(aborted) => {
            assert_eq!(aborted.subject(), "crate::pizza::GarlicBread");
            assert!(matches!(
                aborted,
                PassAborted::Rejected {
                    rejection: Rejection::MustImplementInterface { .. },
                    ..
                }
            ));
        }
        other => panic!("expected a rejection, got {other:?}"),
    }
    assert!(!temp_dir.path().join("pizza_meal_factory.rs").exists());
}
