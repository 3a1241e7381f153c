//! Integration smoke tests for `pathway_advisor`

use pathway_advisor::assessment::LessonProfile;
use pathway_advisor::catalog::CourseGraph;
use pathway_advisor::get_version;

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}

#[test]
fn embedded_assets_load() {
    let graph = CourseGraph::builtin();
    assert_eq!(graph.pathways().count(), 4);
    for id in LessonProfile::builtin_ids() {
        assert!(LessonProfile::builtin(id).is_ok(), "lesson {id} should load");
    }
}
