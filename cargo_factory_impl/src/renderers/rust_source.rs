// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::emitter::{ArtifactLocation, ArtifactPlan, ArtifactRenderer};
use crate::error::EmissionError;
use cargo_factory_common::simple_name;
use heck::{ToSnakeCase, ToUpperCamelCase};
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static PATH_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid path segment regex"));

/// Keywords that may only open a path
const PATH_ROOTS: &[&str] = &["crate", "self", "super"];

/// Strict and reserved keywords, none of which can name a module or type
const KEYWORDS: &[&str] = &[
    "Self", "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe",
    "unsized", "use", "virtual", "where", "while", "yield",
];

///
/// Writes one Rust source file per group into `out_dir`. Names come from
/// the whole group path, minus any leading `crate`, `self` or `super`:
/// group `crate::pizza::Meal` is written to `pizza_meal_factory.rs` and
/// defines `PizzaMealFactory`.
///
/// Identities are emitted as written (with `.` separators turned into
/// `::`), so they must resolve from wherever the generated file is
/// included; `crate::`-rooted identities are the safe choice.
///
/// Two different groups that still map to the same file are refused with
/// [`EmissionError::PathCollision`] rather than overwriting each other.
///
pub struct RustSourceRenderer {
    out_dir: PathBuf,
    written: HashMap<PathBuf, String>,
}

impl RustSourceRenderer {
    pub fn new(out_dir: impl AsRef<Path>) -> Self {
        Self {
            out_dir: out_dir.as_ref().to_path_buf(),
            written: HashMap::new(),
        }
    }

    /// The file a group's factory is written to
    pub fn file_name(group_identity: &str) -> String {
        format!("{}_factory.rs", name_stem(group_identity))
    }

    /// The name of the generated factory type
    pub fn factory_name(group_identity: &str) -> String {
        format!("{}Factory", name_stem(group_identity).to_upper_camel_case())
    }

    /// Produces the source text for a plan without touching the filesystem
    pub fn render_source(plan: &ArtifactPlan) -> Result<String, EmissionError> {
        let group_identity = &plan.group_identity;
        let group_path = rust_path(group_identity)?;
        let group_name = simple_name(group_identity);
        let factory_name = Self::factory_name(group_identity);

        let mut ids = Vec::with_capacity(plan.members.len());
        let mut arms = String::new();
        for member in &plan.members {
            let literal = format!("{:?}", member.id);
            let implementation_path = rust_path(&member.implementation_identity)?;
            arms.push_str(&format!(
                "            {literal} => Ok(Box::new({implementation_path}::new())),\n"
            ));
            ids.push(literal);
        }
        let ids = ids.join(", ");

        Ok(format!(
            r#"// @generated by cargo-factory for `{group_identity}`.
// Do not edit by hand; run `cargo factory generate` instead.

/// Returned by [`{factory_name}::create`] for ids with no registered implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownId(pub String);

impl std::fmt::Display for UnknownId {{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {{
        write!(f, "no {group_name} registered under id '{{}}'", self.0)
    }}
}}

impl std::error::Error for UnknownId {{}}

/// Builds `{group_identity}` implementations by id.
pub struct {factory_name};

impl {factory_name} {{
    /// Every id this factory knows, in declaration order.
    pub const IDS: &[&str] = &[{ids}];

    /// Constructs a new instance of the implementation registered under `id`.
    pub fn create(id: &str) -> Result<Box<dyn {group_path}>, UnknownId> {{
        match id {{
{arms}            _ => Err(UnknownId(id.to_string())),
        }}
    }}
}}
"#
        ))
    }
}

impl ArtifactRenderer for RustSourceRenderer {
    fn render(&mut self, plan: &ArtifactPlan) -> Result<ArtifactLocation, EmissionError> {
        let source = Self::render_source(plan)?;
        let path = self.out_dir.join(Self::file_name(&plan.group_identity));

        let claimed_by_other = self
            .written
            .get(&path)
            .filter(|existing| **existing != plan.group_identity);
        if let Some(existing) = claimed_by_other {
            return Err(EmissionError::PathCollision {
                group: plan.group_identity.clone(),
                existing: existing.clone(),
                path,
            });
        }

        let io_error = |source| EmissionError::Io {
            group: plan.group_identity.clone(),
            path: path.clone(),
            source,
        };
        fs::create_dir_all(&self.out_dir).map_err(io_error)?;
        fs::write(&path, source).map_err(io_error)?;

        self.written.insert(path.clone(), plan.group_identity.clone());
        Ok(ArtifactLocation::File(path))
    }
}

/// Splits an identity on `::`, or on `.` when it has no `::`
fn segments(identity: &str) -> Vec<&str> {
    if identity.contains("::") {
        identity.split("::").collect()
    } else {
        identity.split('.').collect()
    }
}

/// `crate::pizza::Meal` -> `pizza_meal`
fn name_stem(group_identity: &str) -> String {
    segments(group_identity)
        .into_iter()
        .skip_while(|segment| PATH_ROOTS.contains(segment))
        .map(|segment| segment.to_snake_case())
        .collect::<Vec<_>>()
        .join("_")
}

fn is_valid_segment(preceding: &[&str], segment: &str) -> bool {
    if segment == "_" || !PATH_SEGMENT.is_match(segment) {
        return false;
    }
    match segment {
        "crate" | "self" => preceding.is_empty(),
        "super" => preceding.iter().all(|p| *p == "self" || *p == "super"),
        _ => !KEYWORDS.contains(&segment),
    }
}

/// Turns a qualified identity into a Rust path, accepting `.` as a separator
fn rust_path(identity: &str) -> Result<String, EmissionError> {
    let segments = segments(identity);

    let names_an_item = segments
        .last()
        .is_some_and(|last| !PATH_ROOTS.contains(last));
    let valid = names_an_item
        && segments
            .iter()
            .enumerate()
            .all(|(i, segment)| is_valid_segment(&segments[..i], segment));
    if !valid {
        return Err(EmissionError::InvalidPath {
            identity: identity.to_string(),
        });
    }

    Ok(segments.join("::"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::ArtifactMember;
    use tempfile::TempDir;

    fn plan(group: &str, members: &[(&str, &str)]) -> ArtifactPlan {
        ArtifactPlan {
            group_identity: group.to_string(),
            members: members
                .iter()
                .map(|(id, implementation)| ArtifactMember {
                    id: id.to_string(),
                    implementation_identity: implementation.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(RustSourceRenderer::file_name("crate::pizza::Meal"), "pizza_meal_factory.rs");
        assert_eq!(RustSourceRenderer::file_name("pizza::Meal"), "pizza_meal_factory.rs");
        assert_eq!(
            RustSourceRenderer::file_name("com.acme.HttpHandler"),
            "com_acme_http_handler_factory.rs"
        );
        assert_eq!(RustSourceRenderer::factory_name("crate::pizza::Meal"), "PizzaMealFactory");
        assert_eq!(RustSourceRenderer::factory_name("super::super::Meal"), "MealFactory");
    }

    #[test]
    fn test_names_keep_the_whole_path() {
        assert_ne!(
            RustSourceRenderer::file_name("crate::lunch::Meal"),
            RustSourceRenderer::file_name("crate::dinner::Meal")
        );
        assert_ne!(
            RustSourceRenderer::factory_name("crate::lunch::Meal"),
            RustSourceRenderer::factory_name("crate::dinner::Meal")
        );
    }

    #[test]
    fn test_rust_path() {
        assert_eq!(rust_path("crate::pizza::Meal").unwrap(), "crate::pizza::Meal");
        assert_eq!(rust_path("pizza.CalzonePizza").unwrap(), "pizza::CalzonePizza");
        assert_eq!(rust_path("super::super::pizza::Meal").unwrap(), "super::super::pizza::Meal");
        assert_eq!(rust_path("self::Meal").unwrap(), "self::Meal");
        assert!(rust_path("pizza::Calzone Pizza").is_err());
        assert!(rust_path("::pizza::Meal").is_err());
        assert!(rust_path("pizza::_").is_err());
        assert!(rust_path("").is_err());
    }

    #[test]
    fn test_keywords_are_not_path_segments() {
        for identity in [
            "crate::type::Meal",
            "crate::pizza::fn",
            "match.Meal",
            "crate::pizza::Self",
            "pizza::crate::Meal",
            "crate::self::Meal",
            "crate",
            "crate::super",
        ] {
            assert!(
                matches!(rust_path(identity), Err(EmissionError::InvalidPath { .. })),
                "{identity} should be refused"
            );
        }

        let result = RustSourceRenderer::render_source(&plan(
            "crate::type::Meal",
            &[("Calzone", "crate::pizza::CalzonePizza")],
        ));
        assert!(matches!(result, Err(EmissionError::InvalidPath { identity }) if identity == "crate::type::Meal"));
    }

    #[test]
    fn test_render_source() {
        let source = RustSourceRenderer::render_source(&plan(
            "crate::pizza::Meal",
            &[
                ("Calzone", "crate::pizza::CalzonePizza"),
                ("Margherita", "crate::pizza::MargheritaPizza"),
            ],
        ))
        .unwrap();

        assert!(source.starts_with("// @generated by cargo-factory for `crate::pizza::Meal`.\n"));
        assert!(source.contains("pub struct PizzaMealFactory;"));
        assert!(source.contains("pub const IDS: &[&str] = &[\"Calzone\", \"Margherita\"];"));
        assert!(source.contains("pub fn create(id: &str) -> Result<Box<dyn crate::pizza::Meal>, UnknownId> {"));
        assert!(source.contains("            \"Calzone\" => Ok(Box::new(crate::pizza::CalzonePizza::new())),\n"));
        assert!(source.contains("            _ => Err(UnknownId(id.to_string())),\n"));
        assert!(source.contains("write!(f, \"no Meal registered under id '{}'\", self.0)"));
        assert!(source.ends_with("    }\n}\n"));

        // Members appear in plan order
        let calzone = source.find("\"Calzone\" =>").unwrap();
        let margherita = source.find("\"Margherita\" =>").unwrap();
        assert!(calzone < margherita);
    }

    #[test]
    fn test_ids_are_escaped() {
        let source = RustSourceRenderer::render_source(&plan(
            "crate::pizza::Meal",
            &[("Quattro \"Special\"", "crate::pizza::QuattroPizza")],
        ))
        .unwrap();

        assert!(source.contains(r#""Quattro \"Special\"" => Ok(Box::new(crate::pizza::QuattroPizza::new())),"#));
    }

    #[test]
    fn test_invalid_implementation_path_fails() {
        let result = RustSourceRenderer::render_source(&plan(
            "crate::pizza::Meal",
            &[("Calzone", "crate::pizza::Calzone-Pizza")],
        ));

        assert!(matches!(result, Err(EmissionError::InvalidPath { identity }) if identity == "crate::pizza::Calzone-Pizza"));
    }

    #[test]
    fn test_render_writes_file() {
        let temp_dir = TempDir::new().expect("Failed to create temporary directory");
        let out_dir = temp_dir.path().join("generated");
        let mut renderer = RustSourceRenderer::new(&out_dir);

        let meal = plan("crate::pizza::Meal", &[("Calzone", "crate::pizza::CalzonePizza")]);
        let location = renderer.render(&meal).unwrap();

        let expected = out_dir.join("pizza_meal_factory.rs");
        assert_eq!(location, ArtifactLocation::File(expected.clone()));
        assert_eq!(
            fs::read_to_string(expected).unwrap(),
            RustSourceRenderer::render_source(&meal).unwrap()
        );
    }

    #[test]
    fn test_groups_sharing_a_simple_name_get_their_own_files() {
        let temp_dir = TempDir::new().unwrap();
        let mut renderer = RustSourceRenderer::new(temp_dir.path());

        let lunch = plan("crate::lunch::Meal", &[("Soup", "crate::lunch::Soup")]);
        let dinner = plan("crate::dinner::Meal", &[("Steak", "crate::dinner::Steak")]);
        let lunch_location = renderer.render(&lunch).unwrap();
        let dinner_location = renderer.render(&dinner).unwrap();

        assert_ne!(lunch_location, dinner_location);
        let mut files: Vec<String> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        files.sort();
        assert_eq!(files, vec!["dinner_meal_factory.rs", "lunch_meal_factory.rs"]);

        let lunch_source = fs::read_to_string(temp_dir.path().join("lunch_meal_factory.rs")).unwrap();
        assert!(lunch_source.contains("pub struct LunchMealFactory;"));
        assert!(lunch_source.contains("\"Soup\" => Ok(Box::new(crate::lunch::Soup::new())),"));
        let dinner_source = fs::read_to_string(temp_dir.path().join("dinner_meal_factory.rs")).unwrap();
        assert!(dinner_source.contains("pub struct DinnerMealFactory;"));
        assert!(dinner_source.contains("\"Steak\" => Ok(Box::new(crate::dinner::Steak::new())),"));
    }

    #[test]
    fn test_colliding_file_names_do_not_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let mut renderer = RustSourceRenderer::new(temp_dir.path());

        // Both flatten to `a_b_meal`
        let first = plan("crate::a_b::Meal", &[("Soup", "crate::a_b::Soup")]);
        let second = plan("crate::a::BMeal", &[("Steak", "crate::a::Steak")]);
        let first_location = renderer.render(&first).unwrap();
        let result = renderer.render(&second);

        let path = temp_dir.path().join("a_b_meal_factory.rs");
        assert_eq!(first_location, ArtifactLocation::File(path.clone()));
        match result {
            Err(EmissionError::PathCollision { group, existing, path: collided }) => {
                assert_eq!(group, "crate::a::BMeal");
                assert_eq!(existing, "crate::a_b::Meal");
                assert_eq!(collided, path);
            }
            other => panic!("expected a path collision, got {other:?}"),
        }
        assert_eq!(
            fs::read_to_string(path).unwrap(),
            RustSourceRenderer::render_source(&first).unwrap()
        );
    }

    #[test]
    fn test_same_group_can_be_rendered_again() {
        let temp_dir = TempDir::new().unwrap();
        let mut renderer = RustSourceRenderer::new(temp_dir.path());
        let meal = plan("crate::pizza::Meal", &[("Calzone", "crate::pizza::CalzonePizza")]);

        let first = renderer.render(&meal).unwrap();
        let second = renderer.render(&meal).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_unwritable_out_dir_fails_with_io() {
        let temp_file = tempfile::NamedTempFile::new().unwrap();
        // A file cannot be used as a directory
        let mut renderer = RustSourceRenderer::new(temp_file.path().join("generated"));

        let result = renderer.render(&plan("crate::pizza::Meal", &[("Calzone", "crate::pizza::CalzonePizza")]));

        assert!(matches!(result, Err(EmissionError::Io { .. })));
    }
}
