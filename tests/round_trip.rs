use indoc::indoc;
use rtyaml::yaml::{
    load_str, load_stream_str, new_mapping_builder, new_scalar_builder, new_sequence_builder,
    new_stream_builder, to_string, Mode, Node, Scalar,
};

/// Print `node`, load the text back and check both trees agree.
fn round_trip(node: &Node) -> Node {
    let text = to_string(node).expect("node should print");
    let loaded = load_str(&text, Mode::Strict)
        .unwrap_or_else(|e| panic!("printed text should load: {}\n---\n{}", e, text));
    assert_eq!(&loaded, node, "round trip changed the tree:\n{}", text);
    loaded
}

#[test]
fn test_scalars() {
    for value in ["plain", "a: b", "-1", "# not a comment", "", " padded ", "'quoted'", "x > y"] {
        round_trip(&Node::from(value));
    }
    round_trip(&Node::Scalar(Scalar::null()));
}

#[test]
fn test_values_with_both_quote_kinds() {
    let tricky = ["it's \"x\" #y", "a'b\"c: d #e", "\"quoted\" # it's"];
    for value in tricky {
        round_trip(&Node::from(value));
    }
    let mut mapping = new_mapping_builder();
    let mut sequence = new_sequence_builder();
    for (i, value) in tricky.iter().enumerate() {
        mapping = mapping.add(&format!("k{}", i), *value).add(*value, "v");
        sequence = sequence.add(*value);
    }
    let node = mapping.add("list", sequence.build()).build();
    let loaded = round_trip(&node);
    assert_eq!(
        loaded.as_mapping().unwrap().get("k0").unwrap(),
        Some(Node::from(tricky[0]))
    );
}

#[test]
fn test_multiline_root_scalars() {
    let literal = new_scalar_builder()
        .add_line("first")
        .add_line("  indented")
        .add_line("last")
        .build_literal_block_scalar();
    round_trip(&literal);
    let folded = new_scalar_builder()
        .add_line("one")
        .add_line("two")
        .build_folded_block_scalar();
    round_trip(&folded);
}

#[test]
fn test_document_markers_in_block_scalars() {
    let body = new_scalar_builder()
        .add_line("intro")
        .add_line("---")
        .add_line("body")
        .add_line("...")
        .build_literal_block_scalar();
    round_trip(&body);
    let node = new_mapping_builder()
        .add("a", body)
        .add(
            "b",
            new_scalar_builder()
                .add_line("---")
                .add_line("end")
                .build_folded_block_scalar(),
        )
        .build();
    let loaded = round_trip(&node);
    assert_eq!(
        loaded.as_mapping().unwrap().get("a").unwrap(),
        Some(Node::from("intro\n---\nbody\n..."))
    );
}

#[test]
fn test_mapping() {
    let node = new_mapping_builder()
        .add("name", "rtyaml")
        .add("url", "http://example.org/#top")
        .add("empty", "")
        .add("nothing", Scalar::null())
        .add("a: b", "quoted key")
        .add(
            "nested",
            new_mapping_builder()
                .add("deeper", new_mapping_builder().add("x", "1").build())
                .add("list", new_sequence_builder().add("a").add("b").build())
                .build(),
        )
        .add(
            "text",
            new_scalar_builder()
                .add_line("line one")
                .add_line("line two")
                .build_literal_block_scalar(),
        )
        .add(
            "folded",
            new_scalar_builder()
                .add_line("one")
                .add_line("two")
                .add_line("")
                .add_line("three")
                .build_folded_block_scalar(),
        )
        .build();
    round_trip(&node);
}

#[test]
fn test_complex_keys() {
    let node = new_mapping_builder()
        .add_node(
            new_sequence_builder().add("a").add("b").build(),
            Node::from("pair"),
        )
        .add_node(
            new_mapping_builder().add("k", "v").build(),
            new_sequence_builder().add("x").build(),
        )
        .add("plain", "last")
        .build();
    round_trip(&node);
}

#[test]
fn test_sequence() {
    let node = new_sequence_builder()
        .add("first")
        .add(Scalar::null())
        .add(new_mapping_builder().add("k", "v").add("l", "w").build())
        .add(new_sequence_builder().add("inner").add("items").build())
        .add(
            new_scalar_builder()
                .add_line("block")
                .add_line("scalar")
                .build_literal_block_scalar(),
        )
        .add("last")
        .build();
    round_trip(&node);
}

#[test]
fn test_stream() {
    let node = new_stream_builder()
        .add(new_mapping_builder().add("a", "1").build())
        .add(new_sequence_builder().add("x").add("y").build())
        .add("plain")
        .build();
    round_trip(&node);
}

#[test]
fn test_single_document_stream() {
    let node = new_stream_builder()
        .add(new_mapping_builder().add("a", "1").build())
        .build();
    let text = to_string(&node).unwrap();
    let loaded = load_stream_str(&text, Mode::Strict).unwrap();
    assert_eq!(Node::from(loaded), node);
}

#[test]
fn test_comments_survive() {
    let node = new_mapping_builder()
        .add("a", "1")
        .add(
            "b",
            new_mapping_builder()
                .add("c", "2")
                .build_with_comment("about b\nsecond line"),
        )
        .add(
            "list",
            new_sequence_builder()
                .add("x")
                .add(new_scalar_builder().add_line("y").with_comment("about y").build_plain_scalar())
                .build(),
        )
        .build_with_comment("top");
    let text = to_string(&node).unwrap();
    let expected = indoc! {"
        # top
        a: 1
        # about b
        # second line
        b:
          c: 2
        list:
          - x
          # about y
          - y
    "};
    assert_eq!(text, expected);

    let loaded = round_trip(&node);
    assert_eq!(loaded.comment().text(), "top");
    let map = loaded.as_mapping().unwrap();
    assert!(map.get("a").unwrap().unwrap().comment().is_empty());
    assert_eq!(
        map.get("b").unwrap().unwrap().comment().text(),
        "about b\nsecond line"
    );
    let list = map.get("list").unwrap().unwrap();
    let items = list.as_sequence().unwrap().values().unwrap();
    assert_eq!(items[1].comment().text(), "about y");
}

#[test]
fn test_stream_comments_survive() {
    let node = new_stream_builder()
        .add(new_mapping_builder().add("a", "1").build_with_comment("first"))
        .add(new_mapping_builder().add("b", "2").build())
        .build_with_comment("all documents");
    let loaded = round_trip(&node);
    let stream = loaded.as_stream().unwrap();
    assert_eq!(stream.comment().text(), "all documents");
    let docs = stream.values().unwrap();
    assert_eq!(docs[0].comment().text(), "first");
    assert!(docs[1].comment().is_empty());
}

#[test]
fn test_reprint_is_stable() {
    let text = indoc! {"
        # service
        name: api
        # exposed ports
        ports:
          - 80
          - 443
        limits:
          cpu: 2
          # in megabytes
          memory: 512
        ?
          - composite
          - key
        : value
    "};
    let loaded = load_str(text, Mode::Strict).unwrap();
    assert_eq!(to_string(&loaded).unwrap(), text);
}
