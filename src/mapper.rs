use crate::attributes::{
    Attribute, attributes_of, find_attribute, is_enabled_attribute, normalize_attribute,
};
use crate::config::RenderOptions;
use crate::error::{Result, SvgError};
use crate::overrides::{override_fill_attribute, override_root_attributes};
use crate::primitive::{Child, Primitive, PropValue, Props, Tag, View};
use crate::style::{StyleClasses, extract_style_classes, style_declarations, style_for_class};
use crate::text::fix_text_attributes;
use once_cell::sync::Lazy;
use regex::Regex;

static SVG_OPEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<svg[\s>/]").unwrap());
const SVG_CLOSE: &str = "</svg>";
/// Deepest element nesting [`map_document`] is asked to recurse through.
pub const MAX_DEPTH: usize = 256;

/// Parses SVG text and maps it into a view holding the primitive tree.
pub fn render_document(text: &str, options: &RenderOptions) -> Result<View> {
    let fragment = extract_svg_fragment(text)?;
    let doc = roxmltree::Document::parse(fragment)?;
    check_depth(&doc)?;
    Ok(View {
        style: options.style.clone(),
        root: map_document(&doc, options),
    })
}

/// Cuts the text down to the outermost `<svg ...>...</svg>`, dropping XML
/// declarations, doctypes and anything after the closing tag. A self-closing
/// root keeps the rest of the text.
pub fn extract_svg_fragment(text: &str) -> Result<&str> {
    let start = SVG_OPEN_RE.find(text).ok_or(SvgError::MissingRoot)?.start();
    match text.rfind(SVG_CLOSE) {
        Some(end) if end > start => Ok(&text[start..end + SVG_CLOSE.len()]),
        _ => Ok(text[start..].trim_end()),
    }
}

/// Rejects documents whose elements nest deeper than [`MAX_DEPTH`].
pub fn check_depth(doc: &roxmltree::Document<'_>) -> Result<()> {
    let too_deep = doc
        .descendants()
        .filter(|node| node.is_element())
        .any(|node| node.ancestors().filter(|a| a.is_element()).nth(MAX_DEPTH).is_some());
    if too_deep {
        return Err(SvgError::TooDeep(MAX_DEPTH));
    }
    Ok(())
}

/// Maps a parsed document. Ids restart at 1 for every call. Run
/// [`check_depth`] first on untrusted input.
pub fn map_document(doc: &roxmltree::Document<'_>, options: &RenderOptions) -> Option<Primitive> {
    let root = doc.root_element();
    let classes = extract_style_classes(root);
    let mut ctx = MapContext {
        classes: &classes,
        options,
        next_id: 1,
    };
    match ctx.map_node(root)? {
        Child::Element(primitive) => Some(primitive),
        Child::Text(_) => None,
    }
}

struct MapContext<'a> {
    classes: &'a StyleClasses,
    options: &'a RenderOptions,
    next_id: u32,
}

impl MapContext<'_> {
    fn map_node(&mut self, node: roxmltree::Node<'_, '_>) -> Option<Child> {
        if node.is_text() {
            return node.text().map(|text| Child::Text(text.to_string()));
        }
        if !node.is_element() {
            return None;
        }
        let name = node.tag_name().name();
        let Some(tag) = Tag::from_name(name) else {
            tracing::debug!(tag = name, "dropping unsupported element");
            return None;
        };

        let children: Vec<Child> = node
            .children()
            .filter_map(|child| self.map_node(child))
            .filter(|child| !is_blank_text(child))
            .collect();

        let attributes = attributes_of(node);
        let props = match tag {
            Tag::Defs => Props::new(),
            Tag::Svg => override_root_attributes(self.component_props(&attributes), self.options),
            tag if tag.is_text() => {
                let parent = node.parent_element().map(attributes_of).unwrap_or_default();
                fix_text_attributes(self.component_props(&attributes), &attributes, &parent)
            }
            _ => self.component_props(&attributes),
        };

        let id = self.next_id;
        self.next_id += 1;
        Some(Child::Element(Primitive::new(tag, id, props, children)))
    }

    /// Intrinsic attributes, overlaid by class rules, overlaid by the inline
    /// `style` attribute, then the default fill.
    fn component_props(&self, attributes: &[Attribute]) -> Props {
        let mut style = style_for_class(find_attribute(attributes, "class"), self.classes);
        for attr in attributes {
            style.extend(style_declarations(attr));
        }

        let mut props: Props = attributes
            .iter()
            .filter(|attr| attr.name != "style" && attr.name != "class")
            .filter(|attr| self.is_allowed(&attr.name))
            .map(|attr| {
                let (key, value) = normalize_attribute(attr);
                (key, PropValue::Text(value))
            })
            .collect();
        props.extend(style.into_iter().map(|(key, value)| (key, PropValue::Text(value))));

        override_fill_attribute(props, self.options)
    }

    fn is_allowed(&self, name: &str) -> bool {
        match &self.options.allowed_attributes {
            Some(allowed) => is_enabled_attribute(allowed, name),
            None => true,
        }
    }
}

fn is_blank_text(child: &Child) -> bool {
    matches!(child, Child::Text(text) if text.trim().is_empty())
}
