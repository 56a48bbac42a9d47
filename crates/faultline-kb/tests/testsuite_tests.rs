use faultline_kb::testsuite::{SuiteError, TestSuite};

const SUITE: &str = "\
11
FM_10_0
~F2
F1
~F6
~F1 & ~F6
F6 & F7
F2 & F8
~F7
F1 & F4
F3 & F5
~F1 & F2 & ~F6 & ~F3 & F4 & ~F5
";

#[test]
fn test_read_suite_with_count_header() {
    let suite: TestSuite = SUITE.parse().unwrap();
    assert_eq!(suite.len(), 11);
    assert_eq!(suite.get(4).unwrap().text(), "~F1 & ~F6");
    assert_eq!(
        suite.get(10).unwrap().text(),
        "~F1 & F2 & ~F6 & ~F3 & F4 & ~F5"
    );
}

#[test]
fn test_insertion_order_preserved() {
    let suite: TestSuite = SUITE.parse().unwrap();
    let names = suite.names();
    assert_eq!(names.get_index(0).unwrap(), "FM_10_0");
    assert_eq!(names.get_index(1).unwrap(), "~F2");
    assert_eq!(names.get_index(8).unwrap(), "F1 & F4");
}

#[test]
fn test_lines_beyond_count_ignored() {
    let suite: TestSuite = "2\nF1\n~F2\nF3\n".parse().unwrap();
    assert_eq!(suite.len(), 2);
}

#[test]
fn test_bad_header_rejected() {
    let err = "eleven\nF1\n".parse::<TestSuite>().unwrap_err();
    assert!(matches!(err, SuiteError::InvalidHeader(_)));
}

#[test]
fn test_truncated_suite_rejected() {
    let err = "3\nF1\n~F2\n".parse::<TestSuite>().unwrap_err();
    assert!(matches!(
        err,
        SuiteError::MissingTestCases {
            expected: 3,
            found: 2
        }
    ));
}

#[test]
fn test_malformed_test_case_surfaces_parse_error() {
    let err = "1\n~F1 & ~\n".parse::<TestSuite>().unwrap_err();
    assert!(matches!(err, SuiteError::Parse(_)));
}

#[test]
fn test_display_round_trip() {
    let suite: TestSuite = SUITE.parse().unwrap();
    let rendered = suite.to_string();
    assert_eq!(rendered, SUITE);
    let back: TestSuite = rendered.parse().unwrap();
    assert_eq!(back.len(), suite.len());
}

#[test]
fn test_write_to_matches_display() {
    let suite: TestSuite = "2\nF1\n~F2 & F3\n".parse().unwrap();
    let mut buf = Vec::new();
    suite.write_to(&mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), suite.to_string());
}

#[test]
fn test_empty_suite() {
    let suite: TestSuite = "0\n".parse().unwrap();
    assert!(suite.is_empty());
    assert_eq!(suite.to_string(), "0\n");
}
