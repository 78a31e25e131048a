use crate::attributes::{Attribute, find_attribute, parse_number};
use crate::primitive::{PropValue, Props};

/// Shifts `y` up by the inherited `font-size` so a text run lands roughly on
/// its baseline. `font-size` is looked up on the node's own attributes first,
/// then on its parent's. Without one, `y` is left as it is.
pub fn fix_text_attributes(mut props: Props, own: &[Attribute], parent: &[Attribute]) -> Props {
    let font_size = find_attribute(own, "font-size")
        .or_else(|| find_attribute(parent, "font-size"))
        .and_then(parse_number);
    let Some(font_size) = font_size else {
        return props;
    };
    let Some(y) = props.get("y").and_then(PropValue::as_f64) else {
        return props;
    };
    props.insert("y".to_string(), PropValue::Number(y - font_size));
    props
}
