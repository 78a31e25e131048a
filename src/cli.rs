use crate::config::{FillPolicy, RenderOptions, load_config};
use crate::dump::{ViewDump, write_dump};
use crate::logging::{LogConfig, init_logging};
use crate::primitive::PropValue;
use crate::renderer::SvgRenderer;
use crate::source::SvgSource;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "svguri", version, about = "Map an SVG document into drawing primitives")]
pub struct Args {
    /// Input file (.svg) or '-' for stdin
    #[arg(short = 'i', long = "input", conflicts_with = "uri")]
    pub input: Option<PathBuf>,

    /// URL or path to fetch the document from
    #[arg(short = 'u', long = "uri")]
    pub uri: Option<String>,

    /// Output file for the JSON dump. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Options file (JSON or JSON5)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Root width override
    #[arg(short = 'w', long = "width")]
    pub width: Option<String>,

    /// Root height override
    #[arg(short = 'H', long = "height")]
    pub height: Option<String>,

    /// Default fill color
    #[arg(long = "fill")]
    pub fill: Option<String>,

    /// When the default fill replaces an element's fill
    #[arg(long = "fillPolicy", value_enum)]
    pub fill_policy: Option<FillPolicyArg>,

    /// Pretty-print the JSON dump
    #[arg(long = "pretty")]
    pub pretty: bool,

    /// Debug logging to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum FillPolicyArg {
    ReplaceUnlessNone,
    FillUnset,
}

impl From<FillPolicyArg> for FillPolicy {
    fn from(value: FillPolicyArg) -> Self {
        match value {
            FillPolicyArg::ReplaceUnlessNone => FillPolicy::ReplaceUnlessNone,
            FillPolicyArg::FillUnset => FillPolicy::FillUnset,
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(if args.verbose {
        LogConfig::verbose()
    } else {
        LogConfig::default()
    });

    let options = build_options(&args)?;
    let source = match &args.uri {
        Some(uri) => SvgSource::Uri(uri.clone()),
        None => SvgSource::Inline(read_input(args.input.as_deref())?),
    };

    let mut renderer = SvgRenderer::new(options);
    if let Some(fetch) = renderer.set_source(source) {
        fetch
            .join()
            .map_err(|_| anyhow::anyhow!("fetch thread panicked"))?;
    }

    let view = renderer
        .render()
        .ok_or_else(|| anyhow::anyhow!("Nothing rendered from input"))?;
    let json = ViewDump::from_view(&view).to_json(args.pretty)?;
    write_dump(&json, args.output.as_deref())
}

fn build_options(args: &Args) -> Result<RenderOptions> {
    let mut options = load_config(args.config.as_deref())?;
    if let Some(width) = args.width.as_deref() {
        options.width = Some(parse_dimension(width));
    }
    if let Some(height) = args.height.as_deref() {
        options.height = Some(parse_dimension(height));
    }
    if let Some(fill) = &args.fill {
        options.fill = Some(fill.clone());
    }
    if let Some(policy) = args.fill_policy {
        options.fill_policy = policy.into();
    }
    Ok(options)
}

/// Numbers stay numeric; anything else (`50%`, `10em`) is passed as text.
fn parse_dimension(raw: &str) -> PropValue {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => PropValue::Number(v),
        _ => PropValue::Text(raw.trim().to_string()),
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
