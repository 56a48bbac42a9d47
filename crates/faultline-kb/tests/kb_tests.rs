use faultline_kb::kb::{KnowledgeBase, ModelError};
use faultline_kb::testsuite::TestSuite;

fn sample_kb() -> KnowledgeBase {
    let mut kb = KnowledgeBase::new("FM_10_0");
    kb.set_variables(["FM_10_0", "F1", "F2", "F3"]);
    kb.set_correct_constraints(["FM_10_0"]).unwrap();
    kb.set_possibly_faulty_constraints(["F1 -> FM_10_0", "FM_10_0 -> F2", "~F1 | ~F3"])
        .unwrap();
    kb.set_test_suite("2\nF1\n~F2 & F3\n".parse::<TestSuite>().unwrap());
    kb
}

#[test]
fn test_all_constraints_is_union_background_first() {
    let kb = sample_kb();
    let all = kb.all_constraints();
    assert_eq!(all.len(), 4);
    assert_eq!(all.get_index(0).unwrap(), "FM_10_0");
    assert_eq!(all.get_index(1).unwrap(), "F1 -> FM_10_0");
    assert_eq!(all.get_index(3).unwrap(), "~F1 | ~F3");
}

#[test]
fn test_partitions_are_disjoint_by_construction() {
    let mut kb = sample_kb();
    let err = kb
        .set_possibly_faulty_constraints(["FM_10_0", "F1 -> FM_10_0"])
        .unwrap_err();
    assert!(matches!(err, ModelError::OverlappingPartitions(c) if c == "FM_10_0"));

    let err = kb.set_correct_constraints(["FM_10_0 -> F2"]).unwrap_err();
    assert!(matches!(err, ModelError::OverlappingPartitions(_)));
}

#[test]
fn test_constraint_identity_is_textual() {
    let mut kb = KnowledgeBase::new("dup");
    kb.set_possibly_faulty_constraints(["c1", "c2", "c1"]).unwrap();
    assert_eq!(kb.possibly_faulty_constraints().len(), 2);
}

#[test]
fn test_testcases_follow_suite_order() {
    let kb = sample_kb();
    let tcs = kb.testcases();
    assert_eq!(tcs.get_index(0).unwrap(), "F1");
    assert_eq!(tcs.get_index(1).unwrap(), "~F2 & F3");
}

#[test]
fn test_test_case_lookup() {
    let kb = sample_kb();
    let tc = kb.test_case("~F2 & F3").unwrap();
    assert_eq!(tc.literals().len(), 2);

    let err = kb.test_case("~F9").unwrap_err();
    assert!(matches!(err, ModelError::UnknownTestCase(name) if name == "~F9"));
}

#[test]
fn test_classification_marks_violated_cases_in_place() {
    let mut kb = sample_kb();
    for case in kb.test_suite_mut().cases_mut() {
        if case.text() == "F1" {
            case.set_violated(true);
        }
    }
    assert!(kb.test_case("F1").unwrap().is_violated());
    assert!(!kb.test_case("~F2 & F3").unwrap().is_violated());
}

#[test]
fn test_variables_insertion_ordered_and_unique() {
    let mut kb = KnowledgeBase::new("vars");
    kb.set_variables(["B", "A", "B", "C"]);
    let names: Vec<&String> = kb.variables().iter().collect();
    assert_eq!(names, ["B", "A", "C"]);
}

#[test]
fn test_serde_round_trip() {
    let kb = sample_kb();
    let json = serde_json::to_string(&kb).unwrap();
    let back: KnowledgeBase = serde_json::from_str(&json).unwrap();
    assert_eq!(back.name(), "FM_10_0");
    assert_eq!(back.all_constraints(), kb.all_constraints());
    assert_eq!(back.test_suite().len(), 2);
}
