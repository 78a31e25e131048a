use crate::attributes::{Attribute, camel_case};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static CSS_COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static SELECTOR_SPACING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*,\s*").unwrap());

/// camelCased property name -> trimmed value.
pub type StyleMap = BTreeMap<String, String>;

/// Selector text -> declarations, in the order the selectors first appear in
/// the document's `<style>` elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleClasses {
    rules: Vec<(String, StyleMap)>,
}

impl StyleClasses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Adds declarations under `selector`. A repeated selector merges into the
    /// existing entry and keeps its original position.
    pub fn insert(&mut self, selector: impl Into<String>, declarations: StyleMap) {
        let selector = selector.into();
        if let Some((_, existing)) = self.rules.iter_mut().find(|(key, _)| *key == selector) {
            existing.extend(declarations);
            return;
        }
        self.rules.push((selector, declarations));
    }

    pub fn get(&self, selector: &str) -> Option<&StyleMap> {
        self.rules
            .iter()
            .find(|(key, _)| key == selector)
            .map(|(_, decls)| decls)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleMap)> {
        self.rules.iter().map(|(key, decls)| (key.as_str(), decls))
    }
}

/// Parses `fill:red; stroke-width: 2` into `{fill: red, strokeWidth: 2}`.
pub fn parse_style(input: &str) -> StyleMap {
    let mut out = StyleMap::new();
    for decl in input.split(';') {
        let decl = decl.trim();
        if decl.is_empty() {
            continue;
        }
        let Some((key, value)) = decl.split_once(':') else {
            tracing::debug!(declaration = decl, "skipping style declaration without ':'");
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        out.insert(camel_case(key), value.trim().to_string());
    }
    out
}

/// Declarations contributed by one attribute: only `style` contributes.
pub fn style_declarations(attr: &Attribute) -> StyleMap {
    if attr.name != "style" {
        return StyleMap::new();
    }
    parse_style(&attr.value)
}

/// Matches `.{class_name}` as a whole segment of a selector list, so `cls-1`
/// finds `.cls-2,.cls-1` but not `.cls-12`.
pub fn class_selector_regex(class_name: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"\.{}(?:,|$)", regex::escape(class_name)))
}

/// Merges the declarations of every stylesheet entry whose selector names one
/// of the classes in `class_attr`. Later entries win on conflicting keys.
pub fn style_for_class(class_attr: Option<&str>, classes: &StyleClasses) -> StyleMap {
    let mut out = StyleMap::new();
    let Some(class_attr) = class_attr else {
        return out;
    };
    if classes.is_empty() {
        return out;
    }
    let matchers: Vec<Regex> = class_attr
        .split_whitespace()
        .filter_map(|name| class_selector_regex(name).ok())
        .collect();
    if matchers.is_empty() {
        return out;
    }
    for (selector, decls) in classes.iter() {
        if matchers.iter().any(|re| re.is_match(selector)) {
            out.extend(decls.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }
    out
}

/// Collects the rules of every `<style>` element under `root`.
pub fn extract_style_classes(root: roxmltree::Node<'_, '_>) -> StyleClasses {
    let mut out = StyleClasses::new();
    for node in root
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "style")
    {
        let css: String = node
            .children()
            .filter(|child| child.is_text())
            .filter_map(|child| child.text())
            .collect();
        collect_rules(&css, &mut out);
    }
    out
}

/// Parses flat `selectors { declarations }` rules. At-rules are skipped along
/// with their nested blocks.
pub fn collect_rules(css: &str, out: &mut StyleClasses) {
    let css = CSS_COMMENT_RE.replace_all(css, "");
    let mut rest: &str = &css;

    while let Some(open) = rest.find('{') {
        let selector = rest[..open].trim();
        let body_start = open + 1;
        let Some(close) = matching_brace(&rest[body_start..]) else {
            tracing::debug!(selector, "unterminated css block");
            return;
        };
        let body = &rest[body_start..body_start + close];
        rest = &rest[body_start + close + 1..];

        if selector.is_empty() || selector.starts_with('@') {
            continue;
        }
        let key = SELECTOR_SPACING_RE.replace_all(selector, ",").into_owned();
        out.insert(key, parse_style(body));
    }
}

/// Byte offset of the `}` closing a block whose `{` was just consumed.
fn matching_brace(input: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, ch) in input.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' if depth == 0 => return Some(idx),
            '}' => depth -= 1,
            _ => {}
        }
    }
    None
}
