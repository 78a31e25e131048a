/// Attributes whose values may carry a `px` unit suffix.
const PIXEL_ATTRIBUTES: [&str; 4] = ["x", "y", "height", "width"];

/// One XML attribute as an owned `(name, value)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Collects a node's attributes in document order. Namespaced attributes keep
/// their prefix, so `xlink:href` stays distinct from `href`.
pub fn attributes_of(node: roxmltree::Node<'_, '_>) -> Vec<Attribute> {
    node.attributes()
        .map(|attr| Attribute::new(qualified_name(node, &attr), attr.value()))
        .collect()
}

fn qualified_name(node: roxmltree::Node<'_, '_>, attr: &roxmltree::Attribute<'_, '_>) -> String {
    let prefix = match attr.namespace() {
        Some(XML_NAMESPACE) => Some("xml"),
        Some(uri) => node.lookup_prefix(uri),
        None => None,
    };
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{}", attr.name()),
        _ => attr.name().to_string(),
    }
}

/// Looks up an attribute by its raw name.
pub fn find_attribute<'a>(attributes: &'a [Attribute], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|attr| attr.name == name)
        .map(|attr| attr.value.as_str())
}

/// `stop-color` -> `stopColor`. Names without dashes are returned unchanged.
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if ch == '-' {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Drops a trailing `px` from `x`, `y`, `width` and `height` values.
pub fn strip_pixels<'a>(name: &str, value: &'a str) -> &'a str {
    if !PIXEL_ATTRIBUTES.contains(&name) {
        return value;
    }
    value.strip_suffix("px").unwrap_or(value)
}

/// Produces the property key and value for one intrinsic attribute.
pub fn normalize_attribute(attr: &Attribute) -> (String, String) {
    let value = strip_pixels(&attr.name, &attr.value);
    (camel_case(&attr.name), value.to_string())
}

/// True when `name` (raw or camelCased) is in `enabled`.
pub fn is_enabled_attribute<S: AsRef<str>>(enabled: &[S], name: &str) -> bool {
    let camel = camel_case(name);
    enabled
        .iter()
        .any(|entry| entry.as_ref() == name || entry.as_ref() == camel)
}

/// Parses a numeric attribute value, tolerating a `px` suffix.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    trimmed
        .strip_suffix("px")
        .unwrap_or(trimmed)
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
