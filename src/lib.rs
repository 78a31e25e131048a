pub mod attributes;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dump;
pub mod error;
#[cfg(feature = "cli")]
pub mod logging;
pub mod mapper;
pub mod overrides;
pub mod primitive;
pub mod renderer;
pub mod source;
pub mod style;
pub mod text;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{FillPolicy, RenderOptions, load_config};
pub use error::{Result, SvgError};
pub use mapper::{map_document, render_document};
pub use primitive::{Child, Primitive, PropValue, Props, Tag, View};
pub use renderer::SvgRenderer;
pub use source::{Liveness, SvgSource, fetch_svg_text, spawn_fetch};
