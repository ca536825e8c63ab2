use proposal_core::fields::{BasicFields, Field, apply_basic_fields, apply_field};

fn fields() -> BasicFields {
    BasicFields {
        recipient: "NewValue".to_string(),
        proposer: "뉴고려병원".to_string(),
        tel: "02-123-4567".to_string(),
    }
}

#[test]
fn label_markup_is_preserved() {
    let out = apply_field("<p><strong>수신:</strong> OldValue</p>", Field::Recipient, "NewValue");
    assert_eq!(out.html, "<p><strong>수신:</strong> NewValue</p>");
    assert_eq!(out.count, 1);
}

#[test]
fn absent_labels_leave_document_byte_identical() {
    let html = "<html><body><p>Nothing to see here.</p></body></html>";
    let out = apply_basic_fields(html, &fields());
    assert_eq!(out.html, html);
    assert!(!out.changed());
}

#[test]
fn repeated_labels_are_all_replaced() {
    let html = "<strong>수신:</strong> A<br><strong>수신 : </strong>B</p>";
    let out = apply_field(html, Field::Recipient, "X");
    assert_eq!(out.html, "<strong>수신:</strong> X<br><strong>수신 : </strong>X</p>");
    assert_eq!(out.count, 2);
}

#[test]
fn trailing_whitespace_of_old_value_is_kept() {
    let html = "<strong>제안:</strong> Old Hospital \n</td>";
    let out = apply_field(html, Field::Proposer, "New");
    assert_eq!(out.html, "<strong>제안:</strong> New \n</td>");
}

#[test]
fn label_tag_is_case_insensitive() {
    let out = apply_field("<STRONG>수신:</STRONG> Old", Field::Recipient, "New");
    assert_eq!(out.html, "<STRONG>수신:</STRONG> New");
}

#[test]
fn empty_value_region_is_not_a_match() {
    let html = "<strong>수신:</strong> <br>";
    let out = apply_field(html, Field::Recipient, "New");
    assert_eq!(out.html, html);
}

#[test]
fn telephone_stops_at_first_non_number_character() {
    let html = "<span>Tel. 1833 - 9988 | Fax. 02-000-0000</span>";
    let out = apply_field(html, Field::Tel, "02-123-4567");
    assert_eq!(out.html, "<span>Tel. 02-123-4567 | Fax. 02-000-0000</span>");
}

#[test]
fn telephone_label_without_number_is_untouched() {
    let html = "<span>Tel. (see below)</span>";
    assert_eq!(apply_field(html, Field::Tel, "1").html, html);
}

#[test]
fn all_three_fields_in_one_pass() {
    let html = concat!(
        "<strong>수신:</strong> 수신기관명</p>",
        "<strong>제안:</strong> 제안기관</p>",
        "<footer>Tel. 1833 - 9988</footer>",
    );
    let out = apply_basic_fields(html, &fields());
    assert_eq!(
        out.html,
        concat!(
            "<strong>수신:</strong> NewValue</p>",
            "<strong>제안:</strong> 뉴고려병원</p>",
            "<footer>Tel. 02-123-4567</footer>",
        )
    );
    assert_eq!(out.count, 3);
}

#[test]
fn values_are_inserted_verbatim() {
    let out = apply_field("<strong>수신:</strong> x", Field::Recipient, "$1 & ${2}");
    assert_eq!(out.html, "<strong>수신:</strong> $1 & ${2}");
}

#[test]
fn telephone_label_needs_a_word_boundary() {
    let html = "<p>Grand Hotel. 2024 renovation</p><p>Tel. 1833 - 9988</p>";
    let out = apply_field(html, Field::Tel, "02-555-1234");

    assert_eq!(out.count, 1);
    assert_eq!(
        out.html,
        "<p>Grand Hotel. 2024 renovation</p><p>Tel. 02-555-1234</p>"
    );
}

#[test]
fn word_ending_in_tel_alone_is_untouched() {
    let html = "<p>Hotel. 2024</p>";
    let out = apply_field(html, Field::Tel, "02-555-1234");
    assert_eq!(out.count, 0);
    assert_eq!(out.html, html);
}
