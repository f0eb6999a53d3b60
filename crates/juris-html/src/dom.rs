//! Text rendering and locator matching over a parsed HTML document.

use std::collections::BTreeMap;

use juris_core::{
  Error, Result,
  navigator::{Element, ElementHandle, Locator},
};
use scraper::{ElementRef, Html, Node, Selector};

/// Elements that start and end on their own line when rendered.
const BLOCK_TAGS: &[&str] = &[
  "address", "article", "aside", "blockquote", "center", "dd", "div", "dl",
  "dt", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr",
  "li", "main", "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr",
  "ul",
];

/// Elements whose content is never rendered.
const HIDDEN_TAGS: &[&str] = &["head", "noscript", "script", "style", "template", "title"];

// ─── Rendering ───────────────────────────────────────────────────────────────

/// Approximate the browser's `innerText` of `element`: whitespace runs are
/// collapsed, `<br>` and block boundaries become line breaks, and runs of
/// blank lines are squeezed to one.
pub fn render_text(element: ElementRef<'_>) -> String {
  let mut out = String::new();
  render_into(element, &mut out);

  let mut lines: Vec<&str> = Vec::new();
  for line in out.split('\n').map(str::trim) {
    if line.is_empty() && lines.last().is_none_or(|l| l.is_empty()) {
      continue;
    }
    lines.push(line);
  }
  while lines.last().is_some_and(|l| l.is_empty()) {
    lines.pop();
  }
  lines.join("\n")
}

fn render_into(element: ElementRef<'_>, out: &mut String) {
  let name = element.value().name();
  if HIDDEN_TAGS.contains(&name) {
    return;
  }
  if name == "br" {
    out.push('\n');
    return;
  }

  let block = BLOCK_TAGS.contains(&name);
  if block {
    line_break(out);
  }
  for child in element.children() {
    match child.value() {
      Node::Text(text) => push_collapsed(out, text),
      Node::Element(_) => {
        if let Some(child) = ElementRef::wrap(child) {
          render_into(child, out);
        }
      }
      _ => {}
    }
  }
  if block {
    line_break(out);
  }
}

fn push_collapsed(out: &mut String, text: &str) {
  for c in text.chars() {
    if c.is_whitespace() {
      if !out.is_empty() && !out.ends_with([' ', '\n']) {
        out.push(' ');
      }
    } else {
      out.push(c);
    }
  }
}

fn line_break(out: &mut String) {
  if !out.is_empty() && !out.ends_with('\n') {
    out.push('\n');
  }
}

// ─── Matching ────────────────────────────────────────────────────────────────

/// All elements matching `locator` in document order, minus `hidden`.
pub fn select<'a>(
  doc: &'a Html,
  locator: &Locator,
  hidden: &[ElementHandle],
) -> Result<Vec<ElementRef<'a>>> {
  let matches: Vec<ElementRef<'a>> = match locator {
    Locator::Css(selector) => {
      let sel = parse_selector(selector)?;
      doc.select(&sel).collect()
    }
    Locator::Link { text, exclude_class } => {
      let sel = parse_selector("a")?;
      doc
        .select(&sel)
        .filter(|a| {
          exclude_class.as_deref().is_none_or(|class| {
            !a.value().attr("class").is_some_and(|c| c.contains(class))
          })
        })
        .filter(|a| text.matches(&render_text(*a)))
        .collect()
    }
    Locator::Enclosing { tag, needle } => {
      let mut found: Vec<ElementRef<'a>> = Vec::new();
      let containers = doc
        .tree
        .root()
        .descendants()
        .filter(|n| n.value().as_text().is_some_and(|t| t.contains(needle.as_str())))
        .filter_map(|n| {
          n.ancestors()
            .filter_map(ElementRef::wrap)
            .find(|e| e.value().name() == tag)
        });
      for container in containers {
        if !found.iter().any(|f| f.id() == container.id()) {
          found.push(container);
        }
      }
      found
    }
  };

  Ok(
    matches
      .into_iter()
      .filter(|e| !hidden.contains(&handle_of(doc, *e)))
      .collect(),
  )
}

fn parse_selector(selector: &str) -> Result<Selector> {
  Selector::parse(selector)
    .map_err(|e| Error::Navigation(format!("invalid selector {selector:?}: {e}")))
}

/// Position of `element` among all nodes of `doc`, in document order.
///
/// Parsing the same markup always yields the same tree, so the position is a
/// stable identity across re-parses of one view.
pub fn handle_of(doc: &Html, element: ElementRef<'_>) -> ElementHandle {
  let id = element.id();
  let position = doc
    .tree
    .root()
    .descendants()
    .position(|n| n.id() == id)
    .unwrap_or(usize::MAX);
  ElementHandle(position)
}

/// Capture `element` as a detached [`Element`].
pub fn snapshot(doc: &Html, element: ElementRef<'_>) -> Element {
  let attributes: BTreeMap<String, String> = element
    .value()
    .attrs()
    .map(|(k, v)| (k.to_owned(), v.to_owned()))
    .collect();
  let parent_text = element
    .parent()
    .and_then(ElementRef::wrap)
    .map(render_text)
    .unwrap_or_default();

  Element {
    handle: handle_of(doc, element),
    tag: element.value().name().to_owned(),
    text: render_text(element),
    attributes,
    parent_text,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn first<'a>(doc: &'a Html, locator: &Locator) -> ElementRef<'a> {
    select(doc, locator, &[]).unwrap()[0]
  }

  #[test]
  fn render_breaks_lines_on_br_and_blocks() {
    let doc = Html::parse_document(
      "<table><tr><td><a href='x'>G.R. No. 1</a><br>\n  January 5,\n 1990</td></tr></table>",
    );
    let td = first(&doc, &Locator::css("td"));
    assert_eq!(render_text(td), "G.R. No. 1\nJanuary 5, 1990");
  }

  #[test]
  fn render_squeezes_blank_lines_and_skips_scripts() {
    let doc = Html::parse_document(
      "<body><div><p>One</p><br><br><br><p>Two</p><script>var x;</script></div></body>",
    );
    let div = first(&doc, &Locator::css("div"));
    assert_eq!(render_text(div), "One\n\nTwo");
  }

  #[test]
  fn link_locator_respects_text_and_class() {
    let doc = Html::parse_document(
      "<body>\
        <a href='jan.html' class='nya'>January</a>\
        <a href='jan2.html'>January</a>\
        <a href='feb.html'>February</a>\
      </body>",
    );
    let found = select(
      &doc,
      &Locator::link_exact("January").excluding_class("nya"),
      &[],
    )
    .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].value().attr("href"), Some("jan2.html"));
  }

  #[test]
  fn enclosing_picks_nearest_ancestor_of_matching_text() {
    let doc = Html::parse_document(
      "<body>\
        <blockquote id='outer'><blockquote id='a'><p>G.R. No. 111</p>First</blockquote></blockquote>\
        <blockquote id='b'><p>G.R. No. 222</p>Second</blockquote>\
      </body>",
    );
    let found = select(&doc, &Locator::enclosing("blockquote", "222"), &[]).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].value().attr("id"), Some("b"));

    let nested = first(&doc, &Locator::enclosing("blockquote", "111"));
    assert_eq!(nested.value().attr("id"), Some("a"));
  }

  #[test]
  fn enclosing_without_match_is_empty() {
    let doc = Html::parse_document("<body><blockquote>nothing</blockquote></body>");
    assert!(
      select(&doc, &Locator::enclosing("blockquote", "999"), &[])
        .unwrap()
        .is_empty()
    );
  }

  #[test]
  fn hidden_elements_are_excluded() {
    let doc = Html::parse_document("<body><span class='x'>a</span></body>");
    let span = first(&doc, &Locator::css(".x"));
    let handle = handle_of(&doc, span);
    assert!(select(&doc, &Locator::css(".x"), &[handle]).unwrap().is_empty());
  }

  #[test]
  fn handles_are_stable_across_reparse() {
    let markup = "<body><p>a</p><p class='t'>b</p></body>";
    let one = Html::parse_document(markup);
    let two = Html::parse_document(markup);
    assert_eq!(
      handle_of(&one, first(&one, &Locator::css(".t"))),
      handle_of(&two, first(&two, &Locator::css(".t")))
    );
  }

  #[test]
  fn invalid_selector_is_a_navigation_error() {
    let doc = Html::parse_document("<body></body>");
    assert!(matches!(
      select(&doc, &Locator::css("a[["), &[]),
      Err(Error::Navigation(_))
    ));
  }

  #[test]
  fn snapshot_captures_attributes_and_parent_text() {
    let doc = Html::parse_document(
      "<table><tr><td><a href='gr_1.html' class='case'>G.R. No. 1</a><br>March 3, 2001</td></tr></table>",
    );
    let a = first(&doc, &Locator::link_containing("G.R."));
    let el = snapshot(&doc, a);
    assert_eq!(el.tag, "a");
    assert_eq!(el.text, "G.R. No. 1");
    assert_eq!(el.attributes.get("href").map(String::as_str), Some("gr_1.html"));
    assert_eq!(el.parent_text, "G.R. No. 1\nMarch 3, 2001");
  }
}
