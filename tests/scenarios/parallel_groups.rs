//! Test: parallel groups merge child by child and keep their order

use crate::helpers::*;

#[test]
fn test_parallel_children_merge_against_flat_common_list() {
    let project = r#"
scenario:
  - parallel:
      - step: p1
        class: A
      - step: p2
        class: C
"#;
    let common = r#"
scenario:
  - step: c1
    class: A
    arguments: {x: 9}
"#;

    let steps = resolve_yaml(project, Some(common)).unwrap();

    assert_eq!(steps.len(), 1);
    assert_eq!(parallel_child(&steps, 0, 0).arguments, Some(args("{x: 9}")));

    let untouched = parallel_child(&steps, 0, 1);
    assert_eq!(untouched.identifier, "p2");
    assert!(untouched.arguments.is_none());
}

#[test]
fn test_mixed_entries_keep_document_order() {
    let project = r#"
scenario:
  - step: extract
    class: SftpDownload
  - step: fan_out
    parallel:
      - step: load_a
        class: GcsUpload
        arguments: {bucket: a}
      - step: load_b
        class: GcsUpload
      - step: load_c
        class: S3Upload
  - step: notify
    class: SlackNotify
"#;
    let common = r#"
scenario:
  - step: upload_defaults
    class: GcsUpload
    arguments: {bucket: shared, project_id: etl}
"#;

    let steps = resolve_yaml(project, Some(common)).unwrap();

    assert_eq!(
        identifiers(&steps),
        vec!["extract", "load_a", "load_b", "load_c", "notify"]
    );

    let group = steps[1].as_parallel().unwrap();
    assert_eq!(group.identifier.as_deref(), Some("fan_out"));
    assert_eq!(
        parallel_child(&steps, 1, 0).arguments,
        Some(args("{bucket: a, project_id: etl}"))
    );
    assert_eq!(
        parallel_child(&steps, 1, 1).arguments,
        Some(args("{bucket: shared, project_id: etl}"))
    );
    assert!(parallel_child(&steps, 1, 2).arguments.is_none());
}

#[test]
fn test_empty_parallel_group_is_kept() {
    let steps = resolve_yaml("scenario:\n  - parallel: []\n", None).unwrap();

    assert_eq!(steps.len(), 1);
    assert!(steps[0].as_parallel().unwrap().steps.is_empty());
}

#[test]
fn test_nested_parallel_is_passed_through_untouched() {
    let project = r#"
scenario:
  - parallel:
      - step: p1
        class: A
        parallel:
          - step: deeper
            class: A
"#;
    let common = r#"
scenario:
  - step: c1
    class: A
    arguments: {x: 1}
"#;

    let steps = resolve_yaml(project, Some(common)).unwrap();

    let child = parallel_child(&steps, 0, 0);
    assert_eq!(child.arguments, Some(args("{x: 1}")));

    // The grandchild is neither decoded nor merged.
    let nested = child.extra.get("parallel").unwrap().as_sequence().unwrap();
    assert!(nested[0].get("arguments").is_none());
}
