//! Behavioural tests for parsing detection workflow responses.

use std::cell::RefCell;
use std::path::PathBuf;

use gsplit_core::{DetectionClientError, DetectionResults, ModelOutput};
use gsplit_data::parse_workflow_response;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

type ParseCell = RefCell<Option<Result<DetectionResults, DetectionClientError>>>;

#[fixture]
fn body() -> RefCell<Vec<u8>> {
    RefCell::new(Vec::new())
}

#[fixture]
fn parsed() -> ParseCell {
    RefCell::new(None)
}

fn fixture_bytes(name: &str) -> Vec<u8> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read(&path).unwrap_or_else(|err| panic!("failed to read fixture {path:?}: {err}"))
}

fn output_len(parsed: &ParseCell, output: ModelOutput) -> usize {
    let guard = parsed.borrow();
    let results = guard
        .as_ref()
        .expect("response should be parsed")
        .as_ref()
        .expect("response should be valid");
    results.get(output).predictions.len()
}

#[given("the workflow response \"workflow_matched.json\"")]
fn matched_response(#[from(body)] body: &RefCell<Vec<u8>>) {
    *body.borrow_mut() = fixture_bytes("workflow_matched.json");
}

#[given("the workflow response \"workflow_coarse_only.json\"")]
fn coarse_response(#[from(body)] body: &RefCell<Vec<u8>>) {
    *body.borrow_mut() = fixture_bytes("workflow_coarse_only.json");
}

#[given("a workflow response body of plain text")]
fn plain_text(#[from(body)] body: &RefCell<Vec<u8>>) {
    *body.borrow_mut() = b"502 Bad Gateway".to_vec();
}

#[when("the response is parsed")]
fn parse(#[from(body)] body: &RefCell<Vec<u8>>, #[from(parsed)] parsed: &ParseCell) {
    *parsed.borrow_mut() = Some(parse_workflow_response(&body.borrow()));
}

#[then("the line output has 1 prediction")]
fn one_line(#[from(parsed)] parsed: &ParseCell) {
    assert_eq!(output_len(parsed, ModelOutput::Line), 1);
}

#[then("the line output has 0 predictions")]
fn no_line(#[from(parsed)] parsed: &ParseCell) {
    assert_eq!(output_len(parsed, ModelOutput::Line), 0);
}

#[then("the reference output has 1 prediction")]
fn one_reference(#[from(parsed)] parsed: &ParseCell) {
    assert_eq!(output_len(parsed, ModelOutput::Reference), 1);
}

#[then("the region output has 2 predictions")]
fn two_regions(#[from(parsed)] parsed: &ParseCell) {
    assert_eq!(output_len(parsed, ModelOutput::Region), 2);
}

#[then("the line output is a crop at row 355")]
fn line_crop(#[from(parsed)] parsed: &ParseCell) {
    let guard = parsed.borrow();
    let results = guard
        .as_ref()
        .and_then(|outcome| outcome.as_ref().ok())
        .expect("response should be valid");
    let origin = results.line.origin.expect("line set carries its crop");
    assert_eq!(origin.offset_y, 355.0);
}

#[then("parsing fails with a parse error")]
fn parse_error(#[from(parsed)] parsed: &ParseCell) {
    let guard = parsed.borrow();
    assert!(matches!(
        guard.as_ref(),
        Some(Err(DetectionClientError::Parse { .. }))
    ));
}

#[scenario(path = "tests/features/workflow_response.feature", index = 0)]
fn wrapped_response(body: RefCell<Vec<u8>>, parsed: ParseCell) {
    let _ = (body, parsed);
}

#[scenario(path = "tests/features/workflow_response.feature", index = 1)]
fn bare_response(body: RefCell<Vec<u8>>, parsed: ParseCell) {
    let _ = (body, parsed);
}

#[scenario(path = "tests/features/workflow_response.feature", index = 2)]
fn plain_text_response(body: RefCell<Vec<u8>>, parsed: ParseCell) {
    let _ = (body, parsed);
}
