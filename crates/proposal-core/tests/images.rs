use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use proposal_core::images::{ImageReplacement, list_image_srcs, replace_images};

#[test]
fn scanner_skips_embedded_images() {
    let html = r#"<img src="data:image/png;base64,AAAA"><img src="logo.png">"#;
    assert_eq!(list_image_srcs(html), vec!["logo.png"]);
}

#[test]
fn scanner_dedupes_in_first_occurrence_order() {
    let html = r#"
        <img class="a" src="b.jpg">
        <IMG SRC="a.jpg" alt="x">
        <img alt="y" src='b.jpg'>
        <img src="c.png"/>
    "#;
    assert_eq!(list_image_srcs(html), vec!["b.jpg", "a.jpg", "c.png"]);
}

#[test]
fn scanner_ignores_non_img_and_data_src_attributes() {
    let html = r#"<script src="app.js"></script><img data-src="lazy.png" src="real.png"><img src="">"#;
    assert_eq!(list_image_srcs(html), vec!["real.png"]);
}

#[test]
fn scanner_on_document_without_images_is_empty() {
    assert!(list_image_srcs("<p>text only</p>").is_empty());
}

#[test]
fn embed_replaces_every_exact_reference_and_nothing_else() {
    let html = r#"<img src="logo.png"><img src="logo.png.bak"><img class="x" src="logo.png">"#;
    let replacement = ImageReplacement::new("logo.png", b"\x01\x02\x03", "image/png");
    assert!(replacement.embedded.starts_with("data:image/png;base64,"));

    let out = replace_images(html, std::slice::from_ref(&replacement));
    assert_eq!(out.count, 2);
    assert_eq!(
        out.html,
        format!(
            r#"<img src="{0}"><img src="logo.png.bak"><img class="x" src="{0}">"#,
            replacement.embedded
        )
    );

    let payload = replacement
        .embedded
        .strip_prefix("data:image/png;base64,")
        .unwrap();
    assert_eq!(STANDARD.decode(payload).unwrap(), vec![1, 2, 3]);
}

#[test]
fn single_quoted_attribute_keeps_its_quotes() {
    let replacement = ImageReplacement::new("a.gif", b"GIF", "image/gif");
    let out = replace_images("<img src='a.gif'>", &[replacement.clone()]);
    assert_eq!(out.html, format!("<img src='{}'>", replacement.embedded));
}

#[test]
fn absent_reference_is_skipped_silently() {
    let html = r#"<img src="logo.png">"#;
    let replacement = ImageReplacement::new("missing.png", b"x", "image/png");
    let out = replace_images(html, &[replacement]);
    assert_eq!(out.html, html);
    assert!(!out.changed());
}

#[test]
fn embedded_originals_are_never_replaced() {
    let html = r#"<img src="data:image/png;base64,AAAA">"#;
    let replacement = ImageReplacement {
        original: "data:image/png;base64,AAAA".to_string(),
        embedded: "data:image/png;base64,BBBB".to_string(),
        mime: "image/png".to_string(),
    };
    assert_eq!(replace_images(html, &[replacement]).html, html);
}

#[test]
fn replaced_images_disappear_from_scan() {
    let html = r#"<img src="a.png"><img src="b.png">"#;
    let out = replace_images(html, &[ImageReplacement::new("a.png", b"a", "image/png")]);
    assert_eq!(list_image_srcs(&out.html), vec!["b.png"]);
}

#[test]
fn scanned_sources_are_all_rewritten_whatever_the_attribute_spelling() {
    let html = r#"<img SRC="a.png"><img src = "b.png"><IMG alt="c" Src= 'c.png'>"#;
    let srcs = list_image_srcs(html);
    assert_eq!(srcs, vec!["a.png", "b.png", "c.png"]);

    let replacements: Vec<_> = srcs
        .iter()
        .map(|src| ImageReplacement::new(src.as_str(), src.as_bytes(), "image/png"))
        .collect();
    let out = replace_images(html, &replacements);

    assert_eq!(out.count, 3);
    assert!(list_image_srcs(&out.html).is_empty());
    for src in ["a.png", "b.png", "c.png"] {
        let embedded = format!("data:image/png;base64,{}", STANDARD.encode(src));
        assert!(out.html.contains(&embedded), "{src} not embedded");
    }
    assert!(out.html.starts_with(r#"<img SRC="data:image/png;base64,"#));
    assert!(out.html.contains(r#"<img src = "data:image/png;base64,"#));
    assert!(out.html.contains(r#"Src= 'data:image/png;base64,"#));
}

#[test]
fn sources_outside_img_tags_are_not_rewritten() {
    let html = r#"<a href="a.png">a.png</a><img src="a.png">"#;
    let out = replace_images(html, &[ImageReplacement::new("a.png", b"x", "image/png")]);

    assert_eq!(out.count, 1);
    assert!(out.html.starts_with(r#"<a href="a.png">a.png</a><img src="data:"#));
}
