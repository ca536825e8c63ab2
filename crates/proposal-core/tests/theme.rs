use proposal_core::rules::DeclarationRule;
use proposal_core::theme::{ThemeBindings, apply_theme_vars, ensure_root_var};

#[test]
fn replaces_declared_value() {
    let html = ":root { --accent-blue: #000000; --text: #333; }";
    let bindings: ThemeBindings = [("--accent-blue", "#4A90E2")].into_iter().collect();
    let out = apply_theme_vars(html, &bindings);
    assert_eq!(out.html, ":root { --accent-blue: #4A90E2; --text: #333; }");
    assert_eq!(out.count, 1);
}

#[test]
fn missing_declaration_is_a_no_op() {
    let html = ":root { --text: #333; }";
    let bindings: ThemeBindings = [("--accent-gold", "#D4AF37")].into_iter().collect();
    let out = apply_theme_vars(html, &bindings);
    assert_eq!(out.html, html);
    assert!(!out.changed());
}

#[test]
fn every_declaration_of_a_variable_is_replaced() {
    let html = ":root{--c:red;}\n@media print{:root{--c: blue;}}";
    let bindings: ThemeBindings = [("--c", "green")].into_iter().collect();
    let out = apply_theme_vars(html, &bindings);
    assert_eq!(out.html, ":root{--c:green;}\n@media print{:root{--c: green;}}");
    assert_eq!(out.count, 2);
}

#[test]
fn usages_are_not_declarations() {
    let html = ".x { color: var(--accent-gold); } :root { --accent-gold: #000; }";
    let bindings: ThemeBindings = [("--accent-gold", "#fff")].into_iter().collect();
    let out = apply_theme_vars(html, &bindings);
    assert_eq!(
        out.html,
        ".x { color: var(--accent-gold); } :root { --accent-gold: #fff; }"
    );
}

#[test]
fn suffix_names_do_not_collide() {
    let html = ":root { --card--bg: #000; --bg: #111; }";
    let bindings: ThemeBindings = [("--bg", "#222"), ("--card--bg", "#333")]
        .into_iter()
        .collect();
    let out = apply_theme_vars(html, &bindings);
    assert_eq!(out.html, ":root { --card--bg: #333; --bg: #222; }");
    assert_eq!(out.count, 2);
}

#[test]
fn prefix_names_do_not_collide() {
    let html = ":root { --accent-blue: #000; --accent: #111; }";
    let bindings: ThemeBindings = [("--accent", "#222")].into_iter().collect();
    let out = apply_theme_vars(html, &bindings);
    assert_eq!(out.html, ":root { --accent-blue: #000; --accent: #222; }");
}

#[test]
fn pattern_characters_in_names_are_literal() {
    let html = ":root { --a.b: 1; --axb: 2; }";
    let bindings: ThemeBindings = [("--a.b", "9")].into_iter().collect();
    assert_eq!(apply_theme_vars(html, &bindings).html, ":root { --a.b: 9; --axb: 2; }");
}

#[test]
fn ordered_puts_longer_names_first() {
    let bindings: ThemeBindings = [("--a", "1"), ("--abc", "2"), ("--ab", "3"), ("--b", "4")]
        .into_iter()
        .collect();
    let names: Vec<_> = bindings.ordered().into_iter().map(|(k, _)| k).collect();
    assert_eq!(names, vec!["--abc", "--ab", "--a", "--b"]);
}

#[test]
fn bindings_deserialize_from_json_object() {
    let bindings: ThemeBindings =
        serde_json::from_str(r##"{"--primary-purple": "#4A148C"}"##).unwrap();
    assert_eq!(bindings.get("--primary-purple"), Some("#4A148C"));
}

#[test]
fn declaration_rule_reports_value_range() {
    let text = "--x :  red ;";
    let found = DeclarationRule::new("--x").find_all(text);
    assert_eq!(found.len(), 1);
    assert_eq!(&text[found[0].value.clone()], "red ");
}

#[test]
fn declaration_without_semicolon_is_ignored() {
    assert!(DeclarationRule::new("--x").find_all("--x: red }").is_empty());
}

#[test]
fn ensure_root_var_replaces_existing() {
    let html = "<style>:root {\n  --page-gap: 10px;\n}</style>";
    let out = ensure_root_var(html, "--page-gap", "20px");
    assert_eq!(out.html, "<style>:root {\n  --page-gap: 20px;\n}</style>");
}

#[test]
fn ensure_root_var_appends_missing() {
    let html = "<style>:root { --a: 1; }</style>";
    let out = ensure_root_var(html, "--b", "2");
    assert_eq!(out.html, "<style>:root { --a: 1; \n  --b: 2;}</style>");
}

#[test]
fn ensure_root_var_creates_block_after_style_tag() {
    let html = "<style type=\"text/css\">body{}</style>";
    let out = ensure_root_var(html, "--b", "2");
    assert_eq!(
        out.html,
        "<style type=\"text/css\">\n:root{\n  --b: 2;\n}\nbody{}</style>"
    );
}

#[test]
fn ensure_root_var_without_style_is_unchanged() {
    let html = "<p>plain</p>";
    assert_eq!(ensure_root_var(html, "--b", "2").html, html);
}
