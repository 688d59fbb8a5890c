use sprig_attrs::ErrorKind;
use sprig_error::{ariadne::Source, Error};

/// A test error pointing at a single operand.
#[derive(Debug, ErrorKind)]
#[error(
    message = format!("operand `{}` is out of place", operand),
    labels = ["this one"],
    help = "remove it",
)]
struct MisplacedOperand {
    operand: String,
}

/// A test error with one label per span.
#[derive(Debug, ErrorKind)]
#[error(message = "too many trees", labels = ["first", "second"])]
struct TwoSpans;

fn render(error: &Error, src: &str) -> String {
    let mut buf = Vec::new();
    error
        .build_report("input")
        .write(("input", Source::from(src)), &mut buf)
        .unwrap();
    String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
}

#[test]
fn report_contains_message_label_and_help() {
    let src = "x y +";
    let error = Error::new(vec![2..3], MisplacedOperand { operand: "y".to_string() });
    let report = render(&error, src);

    assert!(report.contains("operand `y` is out of place"));
    assert!(report.contains("this one"));
    assert!(report.contains("remove it"));
}

#[test]
fn labels_pair_with_spans() {
    let src = "1 2 3";
    let error = Error::new(vec![0..1, 2..3], TwoSpans);
    let report = render(&error, src);

    assert!(report.contains("first"));
    assert!(report.contains("second"));
}

#[test]
fn downcast_recovers_kind() {
    let error = Error::new(vec![0..1], TwoSpans);
    assert!(error.is::<TwoSpans>());
    assert!(error.downcast_ref::<MisplacedOperand>().is_none());
}
