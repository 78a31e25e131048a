use crate::attributes::parse_number;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The SVG elements that map to a drawing primitive. Anything else is dropped
/// together with its subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Tag {
    Svg,
    G,
    Defs,
    ClipPath,
    Path,
    Circle,
    Rect,
    Line,
    Ellipse,
    Polygon,
    Polyline,
    LinearGradient,
    RadialGradient,
    Stop,
    Text,
    Tspan,
}

impl Tag {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "svg" => Some(Self::Svg),
            "g" => Some(Self::G),
            "defs" => Some(Self::Defs),
            "clipPath" => Some(Self::ClipPath),
            "path" => Some(Self::Path),
            "circle" => Some(Self::Circle),
            "rect" => Some(Self::Rect),
            "line" => Some(Self::Line),
            "ellipse" => Some(Self::Ellipse),
            "polygon" => Some(Self::Polygon),
            "polyline" => Some(Self::Polyline),
            "linearGradient" => Some(Self::LinearGradient),
            "radialGradient" => Some(Self::RadialGradient),
            "stop" => Some(Self::Stop),
            "text" => Some(Self::Text),
            "tspan" => Some(Self::Tspan),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::G => "g",
            Self::Defs => "defs",
            Self::ClipPath => "clipPath",
            Self::Path => "path",
            Self::Circle => "circle",
            Self::Rect => "rect",
            Self::Line => "line",
            Self::Ellipse => "ellipse",
            Self::Polygon => "polygon",
            Self::Polyline => "polyline",
            Self::LinearGradient => "linearGradient",
            Self::RadialGradient => "radialGradient",
            Self::Stop => "stop",
            Self::Text => "text",
            Self::Tspan => "tspan",
        }
    }

    pub fn is_text(self) -> bool {
        matches!(self, Self::Text | Self::Tspan)
    }
}

/// A property value as handed to a primitive constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Number(f64),
    Text(String),
}

impl PropValue {
    /// Numeric reading of the value; text is parsed with any `px` suffix
    /// dropped.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Text(s) => parse_number(s),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// The flattened property set of one primitive, keyed by camelCase name.
pub type Props = BTreeMap<String, PropValue>;

/// One drawing primitive and its children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Primitive {
    pub id: u32,
    pub tag: Tag,
    pub props: Props,
    pub children: Vec<Child>,
}

impl Primitive {
    pub fn new(tag: Tag, id: u32, props: Props, children: Vec<Child>) -> Self {
        Self {
            id,
            tag,
            props,
            children,
        }
    }

    pub fn prop(&self, key: &str) -> Option<&PropValue> {
        self.props.get(key)
    }

    /// String value of `key`; numbers are not converted.
    pub fn text_prop(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(PropValue::as_str)
    }

    pub fn number_prop(&self, key: &str) -> Option<f64> {
        self.props.get(key).and_then(PropValue::as_f64)
    }

    pub fn elements(&self) -> impl Iterator<Item = &Primitive> {
        self.children.iter().filter_map(|child| match child {
            Child::Element(el) => Some(el),
            Child::Text(_) => None,
        })
    }

    /// Depth-first, pre-order walk over this primitive and its descendants.
    pub fn descendants(&self) -> Vec<&Primitive> {
        let mut out = vec![self];
        let mut idx = 0;
        while idx < out.len() {
            let current = out[idx];
            let children: Vec<&Primitive> = current.elements().collect();
            out.splice(idx + 1..idx + 1, children);
            idx += 1;
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Child {
    Text(String),
    Element(Primitive),
}

/// The container view wrapping a rendered document. `style` is the caller's
/// container style, carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub style: BTreeMap<String, String>,
    pub root: Option<Primitive>,
}
