use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use svguri::RenderOptions;
use svguri::dump::ViewDump;
use svguri::mapper::render_document;
use svguri::style::{StyleClasses, collect_rules, parse_style, style_for_class};

fn dense_svg_source(groups: usize, shapes_per_group: usize, classes: usize) -> String {
    let mut out = String::from("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"800\" height=\"600\">\n<style>\n");
    for i in 0..classes {
        out.push_str(&format!(
            "  .cls-{i}, .alt-{i} {{ fill: #{:06x}; stroke-width: {}px; }}\n",
            (i * 7919) % 0xffffff,
            i % 4 + 1
        ));
    }
    out.push_str("</style>\n");
    for g in 0..groups {
        out.push_str(&format!("  <g font-size=\"{}\">\n", 10 + g % 6));
        for s in 0..shapes_per_group {
            let class = (g * shapes_per_group + s) % classes.max(1);
            match s % 4 {
                0 => out.push_str(&format!(
                    "    <rect class=\"cls-{class}\" x=\"{s}px\" y=\"{g}px\" width=\"10px\" height=\"10px\"/>\n"
                )),
                1 => out.push_str(&format!(
                    "    <circle class=\"alt-{class}\" cx=\"{s}\" cy=\"{g}\" r=\"4\" style=\"stroke:#000;opacity:0.5\"/>\n"
                )),
                2 => out.push_str(&format!(
                    "    <text x=\"{s}\" y=\"{}\">label {s}<tspan>!</tspan></text>\n",
                    g + 20
                )),
                _ => out.push_str(&format!(
                    "    <path d=\"M{s} {g} L{} {}\" stroke-linecap=\"round\"/>\n",
                    s + 5,
                    g + 5
                )),
            }
        }
        out.push_str("  </g>\n");
    }
    out.push_str("</svg>\n");
    out
}

fn fixture(name: &str) -> &'static str {
    match name {
        "basic" => include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/basic.svg")),
        "classes" => include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/classes.svg")),
        "prolog" => include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/prolog.svg")),
        "text" => include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/text.svg")),
        "unsupported" => include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/unsupported.svg"
        )),
        _ => panic!("unknown fixture: {name}"),
    }
}

fn bench_fixtures(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixtures");
    let options = RenderOptions::default().with_fill("#333");
    for name in ["basic", "classes", "prolog", "text", "unsupported"] {
        let input = fixture(name);
        group.bench_with_input(BenchmarkId::from_parameter(name), input, |b, data| {
            b.iter(|| {
                let view = render_document(black_box(data), &options).expect("render failed");
                black_box(view.root.map(|r| r.id));
            });
        });
    }
    group.finish();
}

fn bench_dense(c: &mut Criterion) {
    let mut group = c.benchmark_group("dense");
    let options = RenderOptions::default();
    for (groups, shapes, classes) in [(4, 8, 4), (16, 32, 16), (64, 64, 64)] {
        let name = format!("{groups}x{shapes}_c{classes}");
        let input = dense_svg_source(groups, shapes, classes);
        group.bench_with_input(BenchmarkId::from_parameter(&name), &input, |b, data| {
            b.iter(|| {
                let view = render_document(black_box(data), &options).expect("render failed");
                black_box(view.root.map(|r| r.children.len()));
            });
        });
    }
    group.finish();
}

fn bench_style(c: &mut Criterion) {
    let mut group = c.benchmark_group("style");
    let inline = "fill:rgb(0,0,255); stroke:rgb(0,0,0); stroke-width:2px; stop-color:#fff; opacity:0.5";
    group.bench_function("parse_style", |b| {
        b.iter(|| black_box(parse_style(black_box(inline)).len()));
    });

    for classes in [8usize, 64, 256] {
        let mut css = String::new();
        for i in 0..classes {
            css.push_str(&format!(".cls-{i},.cls-{}{{fill:#{i:06x}}}\n", i + classes));
        }
        let mut sheet = StyleClasses::new();
        collect_rules(&css, &mut sheet);
        let query = format!("cls-{}", classes / 2);
        group.bench_with_input(BenchmarkId::new("style_for_class", classes), &sheet, |b, data| {
            b.iter(|| black_box(style_for_class(Some(black_box(query.as_str())), data).len()));
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let input = dense_svg_source(16, 32, 16);
    let options = RenderOptions::default().with_fill("red");
    group.bench_function("render_and_dump", |b| {
        b.iter(|| {
            let view = render_document(black_box(&input), &options).expect("render failed");
            let json = ViewDump::from_view(&view).to_json(false).expect("dump failed");
            black_box(json.len());
        });
    });
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_fixtures, bench_dense, bench_style, bench_end_to_end
);
criterion_main!(benches);
