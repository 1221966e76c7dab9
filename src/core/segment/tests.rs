use super::{DEFAULT_LANGUAGE, ParsedMessage, Segment, has_code_block, parse_message};

fn text(s: &str) -> Segment {
    Segment::Text {
        content: s.to_string(),
    }
}

fn is_code(s: &Segment) -> bool {
    matches!(s, Segment::Code { .. })
}

fn code(content: &str, language: &str) -> Segment {
    Segment::Code {
        content: content.to_string(),
        language: language.to_string(),
    }
}

#[test]
fn parse_message_empty() {
    assert!(parse_message("").segments.is_empty());
}

#[test]
fn parse_message_whitespace_only() {
    assert!(parse_message("  \n\t \n").segments.is_empty());
}

#[test]
fn parse_message_text_only_is_trimmed_and_sanitized() {
    let parsed = parse_message("  **Hello** <em>world</em>\n");
    assert_eq!(parsed.segments, vec![text("Hello world")]);
}

#[test]
fn parse_message_single_code_block() {
    let parsed = parse_message("```Rust\n  fn main() {}\n```");
    assert_eq!(parsed.segments, vec![code("fn main() {}", "rust")]);
}

#[test]
fn parse_message_default_language() {
    let parsed = parse_message("```\nx=1\n```");
    assert_eq!(parsed.segments, vec![code("x=1", DEFAULT_LANGUAGE)]);
}

#[test]
fn parse_message_text_code_text() {
    let parsed = parse_message("Here is code:\n```python\nprint('hi')\n```\nDone.");
    assert_eq!(
        parsed.segments,
        vec![
            text("Here is code:"),
            code("print('hi')", "python"),
            text("Done.")
        ]
    );
}

#[test]
fn parse_message_multiple_blocks_with_whitespace_between() {
    let parsed = parse_message("```a\n1\n```\n\n   \n~~~b\n2\n~~~");
    assert_eq!(parsed.segments, vec![code("1", "a"), code("2", "b")]);
}

#[test]
fn parse_message_segment_count_and_order() {
    let msg = "intro\n```js\none()\n```\nbetween\n~~~sh\ntwo\n~~~\noutro";
    let parsed = parse_message(msg);
    assert_eq!(parsed.segments.len(), 5);
    let kinds: Vec<bool> = parsed.segments.iter().map(is_code).collect();
    assert_eq!(kinds, vec![false, true, false, true, false]);
    assert_eq!(parsed.segments[0].content(), "intro");
    assert_eq!(parsed.segments[2].content(), "between");
    assert_eq!(parsed.segments[4].content(), "outro");
}

#[test]
fn parse_message_code_body_not_sanitized() {
    let body = "<div class=\"x\">**not bold**</div>";
    let parsed = parse_message(&format!("```html\n{}\n```", body));
    assert_eq!(parsed.segments, vec![code(body, "html")]);
}

#[test]
fn parse_message_mismatched_fence_is_text() {
    let parsed = parse_message("```js\ncode\n~~~");
    assert_eq!(parsed.segments, vec![text("```js\ncode\n~~~")]);
    assert!(!has_code_block("```js\ncode\n~~~"));
}

#[test]
fn parse_message_unclosed_fence_stays_in_text() {
    let parsed = parse_message("Look:\n```rust\nfn main() {\n<b>x</b>");
    assert_eq!(parsed.segments, vec![text("Look:\n```rust\nfn main() {\nx")]);
}

#[test]
fn parse_message_unclosed_after_complete_block() {
    let parsed = parse_message("```\na\n```\ntail ```py\nb");
    assert_eq!(parsed.segments, vec![code("a", "text"), text("tail ```py\nb")]);
}

#[test]
fn parse_message_back_to_back_blocks_sharing_a_fence_run() {
    let msg = "```a\nx\n``````b\ny\n```";
    let parsed = parse_message(msg);
    assert_eq!(parsed.segments, vec![code("x", "a"), code("y", "b")]);
    assert!(has_code_block(msg));
}

#[test]
fn parse_message_strips_tags_that_only_start_with_a() {
    let parsed = parse_message("x <a-widget>y</a-widget> &amp; z");
    assert_eq!(parsed.segments, vec![text("x y &amp; z")]);
}

#[test]
fn parse_message_language_lowercased_not_validated() {
    let parsed = parse_message("~~~ My-Weird.Lang \nstuff\n~~~");
    assert_eq!(parsed.segments, vec![code("stuff", "my-weird.lang")]);
}

#[test]
fn parse_message_anchor_kept_in_prose() {
    let msg = r#"Visit <a href="https://x.io">site</a> now"#;
    assert_eq!(parse_message(msg).segments, vec![text(msg)]);
}

#[test]
fn parse_message_empty_block_emits_nothing() {
    let parsed = parse_message("before\n```js\n   \n```\nafter");
    assert_eq!(parsed.segments, vec![text("before"), text("after")]);
    assert!(!has_code_block("before\n```js\n   \n```\nafter"));
}

#[test]
fn parse_message_text_sanitized_to_nothing_is_dropped() {
    let parsed = parse_message("<br>\n```\nx\n```\n<hr/>");
    assert_eq!(parsed.segments, vec![code("x", "text")]);
}

#[test]
fn parse_message_crlf_fences() {
    let parsed = parse_message("```py\r\nprint(1)\r\n```\r\n");
    assert_eq!(parsed.segments, vec![code("print(1)", "py")]);
}

#[test]
fn parse_message_segments_never_contain_recognised_delimiters() {
    let parsed = parse_message("a\n```x\nb\n```\nc\n~~~\nd\n~~~\ne");
    for seg in &parsed.segments {
        assert!(!seg.content().contains("```"));
        assert!(!seg.content().contains("~~~"));
    }
}

#[test]
fn has_code_block_agrees_with_parse() {
    let inputs = [
        "",
        "plain",
        "```\nx\n```",
        "~~~js\ny\n~~~",
        "```js\ncode\n~~~",
        "``` no newline ```",
        "```\n\n```",
        "text ```\nunclosed",
        "a\n```b\nc\n```\nd",
        "````\n```\nnested\n```\n````",
    ];
    for input in inputs {
        let parsed = parse_message(input);
        assert_eq!(
            has_code_block(input),
            parsed.segments.iter().any(is_code),
            "disagreement on {:?}",
            input
        );
    }
}

#[test]
fn nested_shorter_fence_stays_in_body() {
    let parsed = parse_message("````md\n```rust\nlet x = 1;\n```\n````");
    assert_eq!(
        parsed.segments,
        vec![code("```rust\nlet x = 1;\n```", "md")]
    );
}

#[test]
fn clipboard_text_joins_all_segments() {
    let parsed = parse_message("Intro\n```sh\nls\n```\nOutro");
    assert_eq!(parsed.clipboard_text(), "Intro\n\nls\n\nOutro");
}

#[test]
fn speakable_text_skips_code_and_markup_chars() {
    let parsed = parse_message("# Title_1\n```sh\nrm -rf\n```\n`inline` ~done~");
    assert_eq!(parsed.speakable_text(), " Title1\ninline done");
}

#[test]
fn first_code_block_returns_first() {
    let parsed = parse_message("```a\n1\n```\n```b\n2\n```");
    assert_eq!(parsed.first_code_block(), Some(("1", "a")));
    assert_eq!(ParsedMessage::default().first_code_block(), None);
}

#[test]
fn segments_serialize_with_type_tag() {
    let parsed = parse_message("hi\n```\nx\n```");
    let json = serde_json::to_value(&parsed).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "segments": [
                {"type": "text", "content": "hi"},
                {"type": "code", "content": "x", "language": "text"}
            ]
        })
    );
}
