use crate::primitive::{Primitive, View};
use serde::Serialize;
use std::path::Path;

/// Serializable snapshot of a rendered view.
#[derive(Debug, Serialize)]
pub struct ViewDump {
    pub style: std::collections::BTreeMap<String, String>,
    pub primitive_count: usize,
    pub root: Option<Primitive>,
}

impl ViewDump {
    pub fn from_view(view: &View) -> Self {
        let primitive_count = view
            .root
            .as_ref()
            .map(|root| root.descendants().len())
            .unwrap_or(0);
        Self {
            style: view.style.clone(),
            primitive_count,
            root: view.root.clone(),
        }
    }

    pub fn to_json(&self, pretty: bool) -> anyhow::Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

pub fn write_dump(json: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
        }
        None => {
            println!("{}", json);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderOptions;
    use crate::mapper::render_document;

    #[test]
    fn dumps_primitive_tree() {
        let view = render_document(
            r#"<svg width="4" height="4"><text y="2">a<tspan>b</tspan></text></svg>"#,
            &RenderOptions::default(),
        )
        .unwrap();
        let dump = ViewDump::from_view(&view);
        assert_eq!(dump.primitive_count, 3);

        let json: serde_json::Value = serde_json::from_str(&dump.to_json(false).unwrap()).unwrap();
        assert_eq!(json["root"]["tag"], "svg");
        assert_eq!(json["root"]["props"]["viewBox"], "0 0 4 4");
        assert_eq!(json["root"]["children"][0]["tag"], "text");
        assert_eq!(json["root"]["children"][0]["children"][0], "a");
        assert_eq!(json["root"]["children"][0]["children"][1]["tag"], "tspan");
    }

    #[test]
    fn empty_view_dumps_zero() {
        let view = View {
            style: Default::default(),
            root: None,
        };
        let dump = ViewDump::from_view(&view);
        assert_eq!(dump.primitive_count, 0);
        assert!(dump.to_json(true).unwrap().contains("\"root\": null"));
    }
}
