/// Integration tests for raw request processing
/// Runs request files through the raw driver and checks stdout and artifacts
use pvreplace::driver::RawDriver;
use pvreplace::fuzzing::LineClassifier;
use pvreplace::models::SourceParser;
use pvreplace::parsers::{IgnoreLinesParser, PayloadParser, RawRequestParser};
use std::fs;

const LOGIN_REQUEST: &str = "POST /login.php?next=/home HTTP/1.1\r\n\
Host: example.com\r\n\
User-Agent: Mozilla/5.0\r\n\
Content-Type: application/x-www-form-urlencoded\r\n\
\r\n\
user=admin&pass=secret\r\n";

#[test]
fn raw_directory_to_stdout_and_artifacts() {
    let requests = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(requests.path().join("login.req"), LOGIN_REQUEST).unwrap();
    fs::write(requests.path().join("search.req"), "GET /search?q=test HTTP/1.1\nHost: example.com\n").unwrap();

    let ignore_file = requests.path().join("ignore.txt");
    fs::write(&ignore_file, "Host:\nContent-Type:\n").unwrap();
    let ignore = IgnoreLinesParser.parse(ignore_file.to_str().unwrap()).unwrap();

    let files: Vec<_> = RawRequestParser
        .parse(requests.path().to_str().unwrap())
        .unwrap()
        .into_iter()
        .filter(|p| p.extension().map_or(false, |e| e == "req"))
        .collect();
    assert_eq!(files.len(), 2);

    let driver = RawDriver::new(
        PayloadParser.parse("FUZZ").unwrap(),
        LineClassifier::new(ignore),
        Some(output.path().to_path_buf()),
    );

    let mut stdout = Vec::new();
    let processed = driver.run(&files, &mut stdout).unwrap();
    assert_eq!(processed, 2);

    let expected_login = "POST /login.php?next=FUZZ HTTP/1.1\n\
Host: example.com\n\
User-Agent: Mozilla/5.0FUZZ\n\
Content-Type: application/x-www-form-urlencoded\n\
\n\
user=FUZZ&pass=FUZZ\n\
\n";
    let expected_search = "GET /search?q=FUZZ HTTP/1.1\nHost: example.com\n\n";

    assert_eq!(
        String::from_utf8(stdout).unwrap(),
        format!("{}{}", expected_login, expected_search)
    );
    assert_eq!(
        fs::read_to_string(output.path().join("login.req")).unwrap(),
        expected_login
    );
    assert_eq!(
        fs::read_to_string(output.path().join("search.req")).unwrap(),
        expected_search
    );
}

#[test]
fn each_payload_gets_its_own_batch() {
    let requests = tempfile::tempdir().unwrap();
    let file = requests.path().join("req");
    fs::write(&file, "GET /?id=1 HTTP/1.1\nReferer: http://a/\n").unwrap();

    let driver = RawDriver::new(
        PayloadParser.parse("A,B").unwrap(),
        LineClassifier::default(),
        None,
    );
    let mut stdout = Vec::new();
    driver.run(&[file], &mut stdout).unwrap();

    assert_eq!(
        String::from_utf8(stdout).unwrap(),
        "GET /?id=A HTTP/1.1\nReferer: http://a/A\n\nGET /?id=B HTTP/1.1\nReferer: http://a/B\n\n"
    );
}

#[test]
fn unreadable_file_is_skipped() {
    let requests = tempfile::tempdir().unwrap();
    let good = requests.path().join("good");
    fs::write(&good, "a=1\n").unwrap();
    let missing = requests.path().join("missing");

    let driver = RawDriver::new(vec!["X".into()], LineClassifier::default(), None);
    let mut stdout = Vec::new();
    let processed = driver.run(&[missing, good], &mut stdout).unwrap();

    assert_eq!(processed, 1);
    assert_eq!(String::from_utf8(stdout).unwrap(), "a=X\n\n");
}

#[test]
fn no_payloads_means_no_output() {
    let requests = tempfile::tempdir().unwrap();
    let file = requests.path().join("req");
    fs::write(&file, "GET /?id=1 HTTP/1.1\n").unwrap();
    let payload_file = requests.path().join("payloads.txt");
    fs::write(&payload_file, "\n   \n").unwrap();

    let driver = RawDriver::new(
        PayloadParser.parse(payload_file.to_str().unwrap()).unwrap(),
        LineClassifier::default(),
        None,
    );
    let mut stdout = Vec::new();
    driver.run(&[file], &mut stdout).unwrap();
    assert!(stdout.is_empty());
}

#[test]
fn binary_body_request_is_still_fuzzed() {
    let requests = tempfile::tempdir().unwrap();
    let file = requests.path().join("upload.req");
    fs::write(
        &file,
        b"POST /up.php?id=1 HTTP/1.1\r\nUser-Agent: UA\r\n\r\n\x89PNG\xff\xfe",
    )
    .unwrap();

    let driver = RawDriver::new(vec!["FUZZ".into()], LineClassifier::default(), None);
    let mut stdout = Vec::new();
    let processed = driver.run(&[file], &mut stdout).unwrap();
    assert_eq!(processed, 1);

    let stdout = String::from_utf8(stdout).unwrap();
    assert!(stdout.starts_with("POST /up.php?id=FUZZ HTTP/1.1\nUser-Agent: UAFUZZ\n\n"));
    assert!(stdout.ends_with("\n\n"));
}
