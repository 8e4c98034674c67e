//! Test: argument merging between project and common scenarios

use crate::helpers::*;

#[test]
fn test_project_only_keeps_arguments() {
    let project = r#"
scenario:
  - step: extract
    class: SftpDownload
    arguments:
      host: example.com
      files: [a.csv, b.csv]
  - step: load
    class: BigQueryWrite
"#;

    let steps = resolve_yaml(project, None).unwrap();

    assert_eq!(identifiers(&steps), vec!["extract", "load"]);
    assert_eq!(
        step_at(&steps, 0).arguments,
        Some(args("{host: example.com, files: [a.csv, b.csv]}"))
    );
    assert!(step_at(&steps, 1).arguments.is_none());
}

#[test]
fn test_project_values_override_common_values() {
    let project = r#"
scenario:
  - step: s1
    class: A
    arguments: {x: 1}
"#;
    let common = r#"
scenario:
  - step: c1
    class: A
    arguments: {x: 0, y: 2}
"#;

    let steps = resolve_yaml(project, Some(common)).unwrap();

    assert_eq!(steps.len(), 1);
    let step = step_at(&steps, 0);
    assert_eq!(step.identifier, "s1");
    assert_eq!(step.class_name, "A");
    assert_eq!(step.arguments, Some(args("{x: 1, y: 2}")));
}

#[test]
fn test_common_arguments_fill_missing_project_arguments() {
    let project = r#"
scenario:
  - step: s2
    class: B
"#;
    let common = r#"
scenario:
  - step: c2
    class: B
    arguments: {z: 5}
"#;

    let steps = resolve_yaml(project, Some(common)).unwrap();

    let step = step_at(&steps, 0);
    assert_eq!(step.identifier, "s2");
    assert_eq!(step.arguments, Some(args("{z: 5}")));
}

#[test]
fn test_unmatched_class_is_unchanged() {
    let project = r#"
scenario:
  - step: s1
    class: Unshared
    module: extract.custom
    arguments: {x: 1}
"#;
    let common = r#"
scenario:
  - step: c1
    class: A
    arguments: {x: 0, y: 2}
"#;

    let alone = resolve_yaml(project, None).unwrap();
    let merged = resolve_yaml(project, Some(common)).unwrap();

    assert_eq!(merged, alone);
    assert_eq!(step_at(&merged, 0).module.as_deref(), Some("extract.custom"));
}

#[test]
fn test_nested_argument_values_are_replaced_not_merged() {
    let project = r#"
scenario:
  - step: s1
    class: PostgresRead
    arguments:
      connection:
        host: replica.internal
"#;
    let common = r#"
scenario:
  - step: c1
    class: PostgresRead
    arguments:
      connection:
        host: primary.internal
        port: 5432
      query: select 1
"#;

    let steps = resolve_yaml(project, Some(common)).unwrap();

    assert_eq!(
        step_at(&steps, 0).arguments,
        Some(args("{connection: {host: replica.internal}, query: select 1}"))
    );
}

#[test]
fn test_only_first_common_duplicate_is_used() {
    let project = r#"
scenario:
  - step: s1
    class: A
"#;
    let common = r#"
scenario:
  - step: c1
    class: A
    arguments: {source: first}
  - step: c2
    class: A
    arguments: {source: second, extra: true}
"#;

    let steps = resolve_yaml(project, Some(common)).unwrap();
    assert_eq!(step_at(&steps, 0).arguments, Some(args("{source: first}")));
}

#[test]
fn test_common_only_steps_are_not_added() {
    let project = r#"
scenario:
  - step: s1
    class: A
"#;
    let common = r#"
scenario:
  - step: c1
    class: A
  - step: c2
    class: B
    arguments: {z: 1}
"#;

    let steps = resolve_yaml(project, Some(common)).unwrap();
    assert_eq!(identifiers(&steps), vec!["s1"]);
}

#[test]
fn test_extra_keys_pass_through() {
    let project = r#"
scenario:
  - step: s1
    class: A
    symbol: upstream
"#;
    let common = r#"
scenario:
  - step: c1
    class: A
    arguments: {x: 1}
"#;

    let steps = resolve_yaml(project, Some(common)).unwrap();
    let step = step_at(&steps, 0);
    assert_eq!(step.extra.get("symbol").and_then(|v| v.as_str()), Some("upstream"));
    assert_eq!(step.arguments, Some(args("{x: 1}")));
}
