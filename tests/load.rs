use std::io::Write;

use indoc::indoc;
use rtyaml::yaml::{load_file, load_reader, load_str, load_stream_str, Error, Mode, Node, NodeKind};

fn load(text: &str) -> Node {
    load_str(text, Mode::Strict).expect("document should load")
}

#[test]
fn test_flat_mapping() {
    let node = load("a: 1\nb: 2");
    let map = node.as_mapping().unwrap();
    assert_eq!(map.keys().unwrap(), vec![Node::from("a"), Node::from("b")]);
    assert_eq!(map.values().unwrap(), vec![Node::from("1"), Node::from("2")]);
}

#[test]
fn test_literal_block() {
    let node = load("a: |\n  line1\n  line2");
    let a = node.as_mapping().unwrap().get("a").unwrap().unwrap();
    assert_eq!(a.as_scalar().unwrap().value(), Some("line1\nline2"));
}

#[test]
fn test_folded_block() {
    let node = load("a: >\n  line1\n  line2");
    let a = node.as_mapping().unwrap().get("a").unwrap().unwrap();
    assert_eq!(a.as_scalar().unwrap().value(), Some("line1 line2"));
}

#[test]
fn test_root_comment() {
    let node = load("# hello\nkey: value");
    assert_eq!(node.as_mapping().unwrap().comment().text(), "hello");
}

#[test]
fn test_two_documents_make_a_stream() {
    let node = load("---\na: 1\n---\nb: 2");
    assert_eq!(node.kind(), NodeKind::Stream);
    let docs = node.as_stream().unwrap().values().unwrap();
    assert_eq!(docs.len(), 2);
    for (doc, key) in docs.iter().zip(["a", "b"]) {
        let map = doc.as_mapping().unwrap();
        assert_eq!(map.keys().unwrap(), vec![Node::from(key)]);
    }
}

#[test]
fn test_single_document_is_not_a_stream() {
    let node = load("---\na: 1\n...\n");
    assert_eq!(node.kind(), NodeKind::Mapping);
    let stream = load_stream_str("---\na: 1\n", Mode::Strict).unwrap();
    assert_eq!(stream.len().unwrap(), 1);
}

#[test]
fn test_text_before_first_marker_is_a_document() {
    let node = load("a: 1\n---\nb: 2");
    let docs = node.as_stream().unwrap().values().unwrap();
    assert_eq!(docs[0].as_mapping().unwrap().get("a").unwrap(), Some(Node::from("1")));
}

#[test]
fn test_empty_input_is_null() {
    for text in ["", "\n\n", "# only a comment\n", "---\n...\n"] {
        let node = load(text);
        assert!(node.as_scalar().unwrap().is_null(), "input {:?}", text);
    }
}

#[test]
fn test_strict_and_lenient_indentation() {
    let text = "a:\n   b: 1";
    match load_str(text, Mode::Strict) {
        Err(Error::Indentation(msg)) => assert!(msg.contains("line 2")),
        other => panic!("expected an indentation error, got {:?}", other),
    }
    let node = load_str(text, Mode::Lenient).unwrap();
    let a = node.as_mapping().unwrap().get("a").unwrap().unwrap();
    assert_eq!(a.as_mapping().unwrap().get("b").unwrap(), Some(Node::from("1")));
}

#[test]
fn test_lenient_mode_keeps_siblings_together() {
    let text = indoc! {"
        server:
           host: example.org
           port: 8080
        debug: true
    "};
    let node = load_str(text, Mode::Lenient).unwrap();
    let map = node.as_mapping().unwrap();
    assert_eq!(map.keys().unwrap(), vec![Node::from("server"), Node::from("debug")]);
    let server = map.get("server").unwrap().unwrap();
    assert_eq!(server.as_mapping().unwrap().len().unwrap(), 2);
}

#[test]
fn test_dedent_to_unknown_level() {
    let text = "a:\n  b:\n    c: 1\n   d: 2";
    assert!(matches!(load_str(text, Mode::Strict), Err(Error::Indentation(_))));

    let node = load_str("a:\n   b:\n       c: 1\n   d: 2", Mode::Lenient).unwrap();
    let a = node.as_mapping().unwrap().get("a").unwrap().unwrap();
    let a = a.as_mapping().unwrap();
    assert_eq!(a.keys().unwrap(), vec![Node::from("b"), Node::from("d")]);
    assert_eq!(a.get("d").unwrap(), Some(Node::from("2")));
}

#[test]
fn test_crlf_input() {
    let node = load("a: 1\r\nb:\r\n  - x\r\n");
    let b = node.as_mapping().unwrap().get("b").unwrap().unwrap();
    assert_eq!(b.as_sequence().unwrap().values().unwrap(), vec![Node::from("x")]);
}

#[test]
fn test_inline_comments_are_stripped() {
    let node = load("port: 8080 # default\nurl: \"http://x/#top\"");
    let map = node.as_mapping().unwrap();
    assert_eq!(map.get("port").unwrap(), Some(Node::from("8080")));
    assert_eq!(map.get("url").unwrap(), Some(Node::from("http://x/#top")));
}

#[test]
fn test_to_map_last_definition_wins() {
    let node = load("a: 1\nb: 2\na: 3");
    let map = node.as_mapping().unwrap().to_map().unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map["a"], Node::from("3"));
}

#[test]
fn test_load_reader() {
    let node = load_reader("- a\n- b\n".as_bytes(), Mode::Strict).unwrap();
    assert_eq!(node.as_sequence().unwrap().len().unwrap(), 2);
}

#[test]
fn test_load_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "# settings\nname: demo\n").unwrap();
    let node = load_file(file.path(), Mode::Strict).unwrap();
    assert_eq!(node.comment().text(), "settings");
    assert_eq!(
        node.as_mapping().unwrap().get("name").unwrap(),
        Some(Node::from("demo"))
    );
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_file(dir.path().join("absent.yml"), Mode::Strict).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_wrong_cast() {
    let node = load("- a");
    assert!(matches!(node.as_mapping(), Err(Error::Reading(_))));
}

#[test]
fn test_realistic_document() {
    let text = indoc! {"
        # deployment
        name: web
        replicas: 2
        containers:
          - name: app
            image: \"registry/app:1.2\"
            ports:
              - 80
              - 443
            env:
              # log verbosity
              LEVEL: debug
          - name: sidecar
            image: proxy
        volumes:
        - data
        - logs
    "};
    let node = load(text);
    let map = node.as_mapping().unwrap();
    assert_eq!(map.len().unwrap(), 4);
    let containers = map.get("containers").unwrap().unwrap();
    let containers = containers.as_sequence().unwrap().values().unwrap();
    assert_eq!(containers.len(), 2);
    let app = containers[0].as_mapping().unwrap();
    assert_eq!(app.get("image").unwrap(), Some(Node::from("registry/app:1.2")));
    let ports = app.get("ports").unwrap().unwrap();
    assert_eq!(
        ports.as_sequence().unwrap().values().unwrap(),
        vec![Node::from("80"), Node::from("443")]
    );
    let env = app.get("env").unwrap().unwrap();
    let level = env.as_mapping().unwrap().get("LEVEL").unwrap().unwrap();
    assert_eq!(level.comment().text(), "log verbosity");
    let volumes = map.get("volumes").unwrap().unwrap();
    assert_eq!(volumes.as_sequence().unwrap().len().unwrap(), 2);
}
