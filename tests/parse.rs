//! Integration tests for document parsing

use std::io::{self, BufRead, BufReader, Read, Write};

use fyconf::sink::{MemorySink, NullSink};
use fyconf::{Config, Document, Error, Parser, Value, ValueType};
use indoc::indoc;
use similar::TextDiff;

fn parse(text: &str) -> Document {
    Parser::default()
        .with_sink(NullSink)
        .parse_str(text)
        .expect("document should parse")
}

fn assert_output_eq(actual: &str, expected: &str) {
    if actual != expected {
        let diff = TextDiff::from_lines(expected, actual);
        eprintln!();
        for line in diff
            .unified_diff()
            .header("expected", "actual")
            .to_string()
            .lines()
        {
            if line.starts_with('-') {
                eprintln!("\x1b[31m{}\x1b[0m", line);
            } else if line.starts_with('+') {
                eprintln!("\x1b[32m{}\x1b[0m", line);
            } else if line.starts_with('@') {
                eprintln!("\x1b[36m{}\x1b[0m", line);
            } else {
                eprintln!("{}", line);
            }
        }
        panic!("Output mismatch - see diff above");
    }
}

#[test]
fn test_category_isolation() {
    let mut doc = parse(indoc! {"
        a:
          b: 1
        c:
          b: 2
    "});
    assert_eq!(doc.get_integer("a%b").unwrap(), 1);
    assert_eq!(doc.get_integer("c%b").unwrap(), 2);
}

#[test]
fn test_sequence_accumulation() {
    let mut doc = parse(indoc! {"
        list:
          - 10
          - 20
          - 30
    "});
    let record = doc.get("list", ValueType::Integer, 3).unwrap();
    assert_eq!(record.size(), 3);
    assert_eq!(record.value, Value::IntegerArray(vec![10, 20, 30]));
}

#[test]
fn test_nested_sequence_and_sibling_keys() {
    let mut doc = parse(indoc! {"
        model:
          species:
            - O3
            - NO2
            - 'CO, total'
          dt: 600.0
        output: yes
    "});
    assert_eq!(
        doc.get_string_array("model%species", 3).unwrap(),
        vec!["O3", "NO2", "CO, total"]
    );
    assert_eq!(doc.get_real("model%dt").unwrap(), 600.0);
    assert_eq!(doc.get_string("output").unwrap(), "yes");
}

#[test]
fn test_flow_arrays_and_inference() {
    let mut doc = parse(indoc! {"
        ints: [1, 2, 3]
        reals: [1, 2.5, 1e-3]
        flags: [T, .false., true]
        names: [alpha, \"beta\", 'gamma']
        bare: 4, 5
        empty: []
    "});
    assert_eq!(doc.get_integer_array("ints", 3).unwrap(), vec![1, 2, 3]);
    assert_eq!(doc.get_real_array("reals", 3).unwrap(), vec![1.0, 2.5, 0.001]);
    assert_eq!(
        doc.get_boolean_array("flags", 3).unwrap(),
        vec![true, false, true]
    );
    assert_eq!(
        doc.get_string_array("names", 3).unwrap(),
        vec!["alpha", "beta", "gamma"]
    );
    assert_eq!(doc.get_integer_array("bare", 2).unwrap(), vec![4, 5]);
    assert_eq!(doc.get_string_array("empty", 0).unwrap(), Vec::<String>::new());
}

#[test]
fn test_comments_and_separator() {
    let mut doc = parse(indoc! {"
        ---
        # leading comment
        title: \"Run #4; final\"   # trailing comment
        ; semicolon comment
        steps: 12 ; inline
    "});
    assert_eq!(doc.get_string("title").unwrap(), "Run #4; final");
    assert_eq!(doc.get_integer("steps").unwrap(), 12);
    assert_eq!(doc.len(), 2);
}

#[test]
fn test_indentation_width_is_free() {
    let mut doc = parse(indoc! {"
        a:
            b:
                c: 1
            d: 2
        e:
         f: 3
    "});
    assert_eq!(doc.get_integer("a%b%c").unwrap(), 1);
    assert_eq!(doc.get_integer("a%d").unwrap(), 2);
    assert_eq!(doc.get_integer("e%f").unwrap(), 3);
}

#[test]
fn test_listing_after_parse() {
    let doc = parse(indoc! {"
        grid:
          nx: 144
          ny: 91
          periodic: true
        name: test run
        levels:
          - 1.0
          - 0.5
    "});
    assert_output_eq(
        &doc.to_string(),
        indoc! {"
            grid%nx = 144
            grid%ny = 91
            grid%periodic = true
            levels = [1.0, 0.5]
            name = test run
        "},
    );
}

#[test]
fn test_parse_error_line_number() {
    let sink = MemorySink::default();
    let err = Parser::default()
        .with_sink(sink.clone())
        .parse_str(indoc! {"
            a: 1
            b:
              c: 2
              not a key
        "})
        .unwrap_err();
    assert!(matches!(err, Error::Parse { line: 4, .. }), "{:?}", err);
    assert_eq!(err.location(), Some(4));
    assert_eq!(sink.messages().len(), 1);
}

#[test]
fn test_partial_document_kept_on_error() {
    let mut doc = Document::new();
    let result = Parser::default().with_sink(NullSink).parse_into(
        &mut doc,
        fyconf::parser::StrLines::new("a: 1\nb: 2\noops\nc: 3\n"),
    );
    assert!(result.is_err());
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.get_integer("b").unwrap(), 2);
}

#[test]
fn test_parse_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "{}",
        indoc! {"
            physics:
              gravity: 9.81
              enabled: .true.
        "}
    )
    .unwrap();

    let mut doc = fyconf::from_file(file.path()).unwrap();
    assert_eq!(doc.get_real("physics%gravity").unwrap(), 9.81);
    assert!(doc.get_boolean("physics%enabled").unwrap());
    let line = match doc.record(doc.find("physics%enabled").unwrap()).unwrap().provenance {
        fyconf::Provenance::File { line } => line,
        other => panic!("unexpected provenance {:?}", other),
    };
    assert_eq!(line, 3);
}

#[test]
fn test_parse_file_error_names_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "ok: 1").unwrap();
    writeln!(file, "broken").unwrap();

    let sink = MemorySink::default();
    let err = Parser::default()
        .with_sink(sink.clone())
        .parse_file(file.path())
        .unwrap_err();
    assert_eq!(err.location(), Some(2));
    let message = &sink.messages()[0];
    let expected_prefix = format!("{}:2: ", file.path().display());
    assert!(message.starts_with(&expected_prefix), "{}", message);
}

struct BrokenReader {
    sent: bool,
}

impl Read for BrokenReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.sent {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "bad sector"));
        }
        self.sent = true;
        let data = b"a: 1\nb: 2\n";
        buf[..data.len()].copy_from_slice(data);
        Ok(data.len())
    }
}

#[test]
fn test_read_failure_is_io_error_with_line() {
    let reader: Box<dyn BufRead> = Box::new(BufReader::new(BrokenReader { sent: false }));
    let err = Parser::default()
        .with_sink(NullSink)
        .parse_reader(reader)
        .unwrap_err();
    match err {
        Error::Io { line, source } => {
            assert_eq!(line, 3);
            assert_eq!(source.kind(), io::ErrorKind::InvalidData);
        }
        other => panic!("Expected Error::Io, got {:?}", other),
    }
}

#[test]
fn test_many_keys_grow_past_initial_capacity() {
    let text: String = (0..250).map(|i| format!("key{:03}: {}\n", i, i)).collect();
    let mut doc = Parser::new(Config::default().with_initial_capacity(100))
        .with_sink(NullSink)
        .parse_str(&text)
        .unwrap();
    assert_eq!(doc.len(), 250);
    for i in 0..250 {
        assert_eq!(doc.get_integer(&format!("key{:03}", i)).unwrap(), i);
    }
}

#[test]
fn test_custom_comment_chars() {
    let mut doc = Parser::new(Config::default().with_comment_chars(&['#']))
        .with_sink(NullSink)
        .parse_str("path: a;b;c # note\n")
        .unwrap();
    assert_eq!(doc.get_string("path").unwrap(), "a;b;c");
}

#[test]
fn test_sequence_item_boundaries_follow_lines() {
    let mut doc = parse(indoc! {"
        names:
          - O'Brien
          - Smith
          - Jones
        pairs:
          - a, b
          - c
    "});
    assert_eq!(
        doc.get_string_array("names", 10).unwrap(),
        vec!["O'Brien", "Smith", "Jones"]
    );
    assert_eq!(doc.get_string_array("pairs", 10).unwrap(), vec!["a, b", "c"]);
}

#[test]
fn test_apostrophes_in_unquoted_text() {
    let mut doc = parse(indoc! {"
        it's: 1
        note: don't panic # comment
    "});
    assert_eq!(doc.get_integer("it's").unwrap(), 1);
    assert_eq!(doc.get_string("note").unwrap(), "don't panic");
}

#[test]
fn test_merge_key_without_target_is_parse_error() {
    let err = Parser::default()
        .with_sink(NullSink)
        .parse_str("a:\n  <<:\n")
        .unwrap_err();
    assert!(matches!(err, Error::Parse { line: 2, .. }), "{:?}", err);
}
