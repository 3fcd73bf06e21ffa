//! Header properties checked through the public API
use section_header_ls::host::{MemoryEditor, MemoryHost, MemoryPrompt, Position, Selection};
use section_header_ls::style::{DEFAULT_STYLE, supported_languages};
use section_header_ls::{CommandOutcome, HEADER_WIDTH, generate, insert_header, resolve};

#[test]
fn test_every_supported_language_yields_full_width_separators() {
    for language in supported_languages() {
        let style = resolve(language);
        let header = generate("Configuration", &style, "");
        let lines: Vec<&str> = header.split_terminator('\n').collect();

        assert_eq!(lines.len(), 3, "{} header should have 3 lines", language);
        for line in [lines[0], lines[2]] {
            assert_eq!(line.chars().count(), HEADER_WIDTH);
            assert!(line.starts_with(style.prefix) && line.ends_with(style.suffix));
            let dashes = &line[style.prefix.len()..line.len() - style.suffix.len()];
            assert!(dashes.chars().all(|c| c == '-'));
        }
    }
}

#[test]
fn test_padding_never_differs_by_more_than_one() {
    let style = resolve("typescript");
    for len in 1..=60 {
        let text = "t".repeat(len);
        let header = generate(&text, &style, "");
        let middle = header.lines().nth(1).unwrap();
        let inner = &middle[style.prefix.len()..middle.len() - style.suffix.len()];

        let left = inner.len() - inner.trim_start().len();
        let right = inner.len() - inner.trim_end().len();
        assert!(right == left || right == left + 1, "len {}: {} vs {}", len, left, right);
    }
}

#[test]
fn test_unrecognized_languages_use_hash_comments() {
    for language in ["rust", "go", "markdown", "plaintext", "Python"] {
        assert_eq!(resolve(language), DEFAULT_STYLE);
        assert_eq!(resolve(language).prefix, "# ");
        assert_eq!(resolve(language).suffix, " #");
    }
}

#[test]
fn test_indentation_is_the_only_leading_whitespace() {
    let header = generate("Nested", &resolve("python"), "        ");
    for line in header.lines() {
        let rest = line.strip_prefix("        ").expect("indented line");
        assert!(rest.starts_with("# "));
    }
}

#[tokio::test]
async fn test_cancelled_prompt_leaves_document_untouched() {
    let mut host = MemoryHost::new(
        MemoryEditor::new("yaml", "key: value\n", Selection::caret(Position::new(0, 3))),
        MemoryPrompt::cancelled(),
    );

    let outcome = insert_header(&mut host).await.expect("command should not fail");
    assert_eq!(outcome, CommandOutcome::Cancelled);

    let editor = host.editor.expect("editor");
    assert!(editor.applied.is_empty());
    assert_eq!(editor.text(), "key: value\n");
}

#[tokio::test]
async fn test_python_block_gets_header_at_its_indentation() {
    let source = "class Job:\n    def run(self):\n        \n        pass\n";
    let mut host = MemoryHost::new(
        MemoryEditor::new("python", source, Selection::caret(Position::new(2, 8))),
        MemoryPrompt::answering("Steps"),
    );

    insert_header(&mut host).await.expect("command should not fail");

    let text = host.editor.expect("editor").document.text;
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[2].starts_with("        # ---"));
    assert!(lines[3].starts_with("        # ") && lines[3].contains("Steps"));
    assert!(lines[4].starts_with("        # ---"));
    assert_eq!(lines[5], "");
    assert_eq!(lines[6], "        pass");
}
