//! Behaviour of the cleaning passes on parsed documents

use noscript_clean::{Pass, SanitizeReport, sanitize};
use noscript_html::{Document, HtmlSerializer, NodeId, parse, serialize};

fn inner_of(doc: &Document, tag: &str) -> String {
    let id = doc
        .tree()
        .first_element_by_tag(NodeId::ROOT, tag)
        .unwrap_or_else(|| panic!("no <{tag}> in document"));
    HtmlSerializer::new().serialize_inner(doc.tree(), id)
}

fn clean_body(html: &str, heading: Option<&str>) -> (String, SanitizeReport) {
    let mut doc = parse(html);
    let report = sanitize(&mut doc, heading);
    (inner_of(&doc, "body"), report)
}

// ============================================================================
// HEADING INJECTION
// ============================================================================

#[test]
fn test_heading_goes_into_third_div_in_document_order() {
    let html = "<body><article><div><div>a</div><section><div>b</div></section></div></article></body>";
    let (body, report) = clean_body(html, Some("X"));

    assert_eq!(
        body,
        "<article><div><div>a</div><section><div><h1>X</h1>b</div></section></div></article>"
    );
    assert!(report.heading_inserted());
}

#[test]
fn test_heading_keeps_otherwise_empty_div() {
    let html = "<body><article><div></div><div></div><div></div></article></body>";
    let (body, report) = clean_body(html, Some("X"));

    assert_eq!(body, "<article><div><h1>X</h1></div></article>");
    assert_eq!(report.count(Pass::PruneEmptyDivs), 2);
}

#[test]
fn test_no_heading_with_two_divs() {
    let html = "<body><article><div>a</div><div>b</div></article><div>c</div></body>";
    let (body, report) = clean_body(html, Some("X"));

    assert!(!body.contains("<h1>"));
    assert_eq!(report.count(Pass::InjectHeading), 0);
}

#[test]
fn test_no_heading_without_article() {
    let (body, _) = clean_body("<body><div>1</div><div>2</div><div>3</div></body>", Some("X"));
    assert_eq!(body, "<div>1</div><div>2</div><div>3</div>");
}

#[test]
fn test_heading_only_looks_at_first_article() {
    let html = "<body><article><div>a</div></article><article><div>1</div><div>2</div><div>3</div></article></body>";
    let (body, _) = clean_body(html, Some("X"));
    assert!(!body.contains("<h1>"));
}

#[test]
fn test_empty_heading_is_no_heading() {
    let html = "<body><article><div>1</div><div>2</div><div>3</div></article></body>";
    let (body, report) = clean_body(html, Some(""));
    assert!(!body.contains("<h1>"));
    assert!(!report.heading_inserted());
}

#[test]
fn test_heading_escapes_text() {
    let html = "<body><article><div>1</div><div>2</div><div>3</div></article></body>";
    let (body, _) = clean_body(html, Some("Tom & <Jerry>"));
    assert!(body.contains("<div><h1>Tom &amp; &lt;Jerry&gt;</h1>3</div>"));
}

#[test]
fn test_repeated_heading_is_inserted_again() {
    let mut doc = parse("<body><article><div>1</div><div>2</div><div>3</div></article></body>");
    sanitize(&mut doc, Some("X"));
    sanitize(&mut doc, Some("X"));

    assert_eq!(
        inner_of(&doc, "body"),
        "<article><div>1</div><div>2</div><div><h1>X</h1><h1>X</h1>3</div></article>"
    );
}

// ============================================================================
// EMPTY DIV PRUNING
// ============================================================================

#[test]
fn test_prune_empty_divs() {
    let html = concat!(
        "<body>",
        "<div>   </div>",
        "<div> <img src=\"a.png\"> </div>",
        "<div>x</div>",
        "<div><span> </span></div>",
        "<div><script>track()</script></div>",
        "<div><!-- c --></div>",
        "</body>",
    );
    let (body, report) = clean_body(html, None);

    assert_eq!(body, "<div> <img src=\"a.png\" /> </div><div>x</div>");
    assert_eq!(report.count(Pass::PruneEmptyDivs), 4);
    // The script went away with its div
    assert_eq!(report.count(Pass::StripScripts), 0);
}

#[test]
fn test_prune_nested_divs() {
    let html = "<body><div><div> </div></div><div><div><img></div></div></body>";
    let (body, report) = clean_body(html, None);

    assert_eq!(body, "<div><div><img /></div></div>");
    assert_eq!(report.count(Pass::PruneEmptyDivs), 1);
}

#[test]
fn test_later_removals_do_not_reprune() {
    // Pruning runs before id removal, so the emptied div stays
    let (body, _) = clean_body(r#"<body><div><p id="page-header">x</p></div></body>"#, None);
    assert_eq!(body, "<div></div>");
}

// ============================================================================
// SCRIPTS AND LINKS
// ============================================================================

#[test]
fn test_strip_scripts_and_script_links() {
    let html = concat!(
        "<html><head>",
        "<script src=\"a.js\"></script>",
        "<link rel=\"preload\" href=\"a.js?v=2\">",
        "<link href=\"a.js.map\">",
        "<link href=\"app.JS\">",
        "<link rel=\"stylesheet\" href=\"style.css\" crossorigin=\"anonymous\">",
        "<link rel=\"modulepreload\" href=\"/x/chunk.js\" crossorigin>",
        "<link rel=\"icon\">",
        "</head><body><p>t</p><script>run()</script><img src=\"a.png\" crossorigin></body></html>",
    );
    let mut doc = parse(html);
    let report = sanitize(&mut doc, None);

    assert_eq!(
        inner_of(&doc, "head"),
        r#"<link href="a.js.map" /><link href="app.JS" /><link rel="stylesheet" href="style.css" /><link rel="icon" />"#
    );
    assert_eq!(inner_of(&doc, "body"), r#"<p>t</p><img src="a.png" crossorigin />"#);
    assert_eq!(report.count(Pass::StripScripts), 2);
    assert_eq!(report.count(Pass::StripScriptLinks), 2);
    assert_eq!(report.count(Pass::StripCrossorigin), 1);
}

// ============================================================================
// ID, CLASS AND STYLE RULES
// ============================================================================

#[test]
fn test_remove_by_id() {
    let html = concat!(
        "<body>",
        "<div id=\"page-header\">h</div>",
        "<div id=\"page-header-x\">k</div>",
        "<main id=\"thread-bottom-container\"><p>x</p></main>",
        "<nav id=\"stage-slideover-sidebar\"><a href=\"/\">home</a></nav>",
        "<span id=\"pointer-events-none\">p</span>",
        "</body>",
    );
    let (body, report) = clean_body(html, None);

    assert_eq!(body, r#"<div id="page-header-x">k</div>"#);
    assert_eq!(report.count(Pass::RemoveById), 4);
}

#[test]
fn test_remove_by_class_is_exact() {
    let html = concat!(
        "<body>",
        "<p class=\"flex min-h-[46px] justify-start extra\">a</p>",
        "<p class=\"flex min-h-[46px] justify-start\">b</p>",
        "<p class=\"justify-start flex min-h-[46px]\">c</p>",
        "<div class=\"absolute start-0 end-0 bottom-full z-20\"><p>x</p></div>",
        "<div class=\"user-message-bubble-color\">hi</div>",
        "</body>",
    );
    let (body, report) = clean_body(html, None);

    assert_eq!(
        body,
        r#"<p class="flex min-h-[46px] justify-start extra">a</p><p class="justify-start flex min-h-[46px]">c</p>"#
    );
    assert_eq!(report.count(Pass::RemoveByClass), 3);
}

#[test]
fn test_remove_by_style_is_exact() {
    let html = r#"<body><span style="opacity: 1;">a</span><span style="opacity:1;">b</span><span style="opacity: 1; color: red;">c</span></body>"#;
    let (body, report) = clean_body(html, None);

    assert_eq!(
        body,
        r#"<span style="opacity:1;">b</span><span style="opacity: 1; color: red;">c</span>"#
    );
    assert_eq!(report.count(Pass::RemoveByStyle), 1);
}

// ============================================================================
// DRAGGABLE
// ============================================================================

#[test]
fn test_only_first_draggable_div_is_removed() {
    let html = r#"<body><span class="draggable">s</span><div class="draggable">one</div><div class="group draggable">two</div></body>"#;
    let (body, report) = clean_body(html, None);

    assert_eq!(
        body,
        r#"<span class="draggable">s</span><div class="group draggable">two</div>"#
    );
    assert_eq!(report.count(Pass::RemoveDraggable), 1);
}

// ============================================================================
// WHOLE DOCUMENT
// ============================================================================

#[test]
fn test_sanitize_is_idempotent_without_heading() {
    let html = concat!(
        "<!DOCTYPE html><html><head><script>x()</script><link href=\"a.js\"></head><body>",
        "<div id=\"page-header\">h</div>",
        "<div> </div>",
        "<div><img src=\"a.png\"></div>",
        "<p class=\"user-message-bubble-color\">m</p>",
        "<div class=\"draggable\">d</div>",
        "<p style=\"opacity: 1;\">o</p>",
        "<p>keep</p>",
        "</body></html>",
    );
    let mut doc = parse(html);
    let first = sanitize(&mut doc, None);
    let once = serialize(&doc);
    let second = sanitize(&mut doc, None);
    let twice = serialize(&doc);

    assert_eq!(
        once,
        r#"<!DOCTYPE html><html><head></head><body><div><img src="a.png" /></div><p>keep</p></body></html>"#
    );
    assert_eq!(once, twice);
    assert_eq!(first.total(), 7);
    assert_eq!(second.total(), 0);
}

#[test]
fn test_malformed_input_is_cleaned() {
    let (body, _) = clean_body("<div><p>unclosed <script>x", None);
    assert_eq!(body, "<div><p>unclosed </p></div>");
}

#[test]
fn test_nothing_to_do() {
    let (body, report) = clean_body("<body><p>plain</p></body>", Some("X"));
    assert_eq!(body, "<p>plain</p>");
    assert_eq!(report, SanitizeReport::default());
}
