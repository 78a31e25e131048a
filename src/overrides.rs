use crate::config::{FillPolicy, RenderOptions};
use crate::primitive::{PropValue, Props};

/// Gives the root a viewBox covering its own width and height when it lacks
/// one, then applies the caller's size. The synthesized viewBox keeps the
/// document's aspect ratio when the caller forces a different size.
pub fn override_root_attributes(mut props: Props, options: &RenderOptions) -> Props {
    if !props.contains_key("viewBox") {
        if let (Some(width), Some(height)) = (props.get("width"), props.get("height")) {
            let view_box = format!("0 0 {width} {height}");
            props.insert("viewBox".to_string(), PropValue::Text(view_box));
        }
    }
    if let Some(width) = &options.width {
        props.insert("width".to_string(), width.clone());
    }
    if let Some(height) = &options.height {
        props.insert("height".to_string(), height.clone());
    }
    props
}

/// Applies the caller's default fill according to `options.fill_policy`.
pub fn override_fill_attribute(mut props: Props, options: &RenderOptions) -> Props {
    let Some(fill) = options.fill.as_deref() else {
        return props;
    };
    let is_none = props
        .get("fill")
        .and_then(PropValue::as_str)
        .is_some_and(|current| current == "none");
    let replace = match options.fill_policy {
        FillPolicy::ReplaceUnlessNone => !is_none,
        FillPolicy::FillUnset => !props.contains_key("fill") || is_none,
    };
    if replace {
        props.insert("fill".to_string(), PropValue::from(fill));
    }
    props
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, &str)]) -> Props {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), PropValue::from(*v)))
            .collect()
    }

    fn fill_of(props: &Props) -> Option<&str> {
        props.get("fill").and_then(PropValue::as_str)
    }

    #[test]
    fn synthesizes_view_box_from_size() {
        let out = override_root_attributes(props(&[("width", "100"), ("height", "50")]), &RenderOptions::default());
        assert_eq!(out.get("viewBox"), Some(&PropValue::from("0 0 100 50")));
        assert_eq!(out.get("width"), Some(&PropValue::from("100")));
    }

    #[test]
    fn keeps_existing_view_box() {
        let input = props(&[("width", "100"), ("height", "50"), ("viewBox", "0 0 10 5")]);
        let out = override_root_attributes(input, &RenderOptions::default());
        assert_eq!(out.get("viewBox"), Some(&PropValue::from("0 0 10 5")));
    }

    #[test]
    fn no_view_box_without_both_dimensions() {
        let out = override_root_attributes(props(&[("width", "100")]), &RenderOptions::default());
        assert!(out.get("viewBox").is_none());
    }

    #[test]
    fn caller_size_wins_and_view_box_preserves_ratio() {
        let options = RenderOptions::default()
            .with_size(Some(PropValue::Number(200.0)), Some(PropValue::from("100")));
        let out = override_root_attributes(props(&[("width", "100"), ("height", "50")]), &options);
        assert_eq!(out.get("viewBox"), Some(&PropValue::from("0 0 100 50")));
        assert_eq!(out.get("width"), Some(&PropValue::Number(200.0)));
        assert_eq!(out.get("height"), Some(&PropValue::from("100")));
    }

    #[test]
    fn only_width_override_keeps_height() {
        let options = RenderOptions::default().with_size(Some(PropValue::Number(20.0)), None);
        let out = override_root_attributes(props(&[("width", "10"), ("height", "5")]), &options);
        assert_eq!(out.get("height"), Some(&PropValue::from("5")));
    }

    #[test]
    fn no_default_fill_changes_nothing() {
        let out = override_fill_attribute(props(&[("fill", "blue")]), &RenderOptions::default());
        assert_eq!(fill_of(&out), Some("blue"));
        let out = override_fill_attribute(Props::new(), &RenderOptions::default());
        assert!(out.get("fill").is_none());
    }

    #[test]
    fn replace_unless_none_policy() {
        let options = RenderOptions::default().with_fill("red");
        assert_eq!(fill_of(&override_fill_attribute(Props::new(), &options)), Some("red"));
        assert_eq!(
            fill_of(&override_fill_attribute(props(&[("fill", "blue")]), &options)),
            Some("red")
        );
        assert_eq!(
            fill_of(&override_fill_attribute(props(&[("fill", "none")]), &options)),
            Some("none")
        );
    }

    #[test]
    fn fill_unset_policy() {
        let options = RenderOptions {
            fill_policy: FillPolicy::FillUnset,
            ..RenderOptions::default().with_fill("red")
        };
        assert_eq!(fill_of(&override_fill_attribute(Props::new(), &options)), Some("red"));
        assert_eq!(
            fill_of(&override_fill_attribute(props(&[("fill", "none")]), &options)),
            Some("red")
        );
        assert_eq!(
            fill_of(&override_fill_attribute(props(&[("fill", "blue")]), &options)),
            Some("blue")
        );
    }
}
