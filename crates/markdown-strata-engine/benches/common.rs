// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with *some* **content** and `code`.\n\n- Bullet point\n  - Nested item\n- Another item\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_reference_heavy(sections: usize) -> String {
    let mut content = String::new();

    for section in 0..sections {
        content.push_str(&format!("## Section {section} {{#s{section}}}\n\n"));
        content.push_str(&format!(
            "See [the docs][d{section}], <https://example.com/{section}> and a note[^n{section}].\n\n"
        ));
        content.push_str("| name | value |\n|:-----|------:|\n| a | 1 |\n| b | 2 |\n\n");
        content.push_str("> Quoted *emphasis* with ~~struck~~ text\n> over two lines.\n\n");
    }

    for section in 0..sections {
        content.push_str(&format!("[d{section}]: /docs/{section} \"Docs {section}\"\n"));
        content.push_str(&format!("[^n{section}]: Footnote body {section}.\n"));
    }

    content
}

#[allow(dead_code)]
pub fn generate_nested_quotes(depth: usize) -> String {
    let mut content = String::new();
    for level in 1..=depth {
        content.push_str(&">".repeat(level));
        content.push_str(" quoted text\n");
    }
    content
}
