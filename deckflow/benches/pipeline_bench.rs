//! Benchmarks for the parse and merge hot paths.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use deckflow::integrator::integrate;
use deckflow::parser::ResponseParser;
use deckflow::schema::{ContentOutline, DesignSystem, NarrativePlan, VisualPlan};
use deckflow::testing::{content_json, design_json, narrative_json, visual_json};

fn parser_benchmark(c: &mut Criterion) {
    let parser = ResponseParser::new();
    let fenced = format!("```json\n{}\n```", content_json(8));
    let wrapped = format!("Here is the outline you asked for:\n{}\nHope it helps!", content_json(8));

    c.bench_function("parse_fenced", |b| {
        b.iter(|| parser.parse(black_box(&fenced)))
    });
    c.bench_function("parse_prose_wrapped", |b| {
        b.iter(|| parser.parse(black_box(&wrapped)))
    });
}

fn integrate_benchmark(c: &mut Criterion) {
    let content: ContentOutline = serde_json::from_str(&content_json(12)).unwrap();
    let design: DesignSystem = serde_json::from_str(&design_json(12)).unwrap();
    let visual: VisualPlan = serde_json::from_str(&visual_json(12)).unwrap();
    let narrative: NarrativePlan = serde_json::from_str(&narrative_json(12)).unwrap();

    c.bench_function("integrate_12_units", |b| {
        b.iter(|| {
            integrate(
                black_box(&content),
                black_box(&design),
                black_box(&visual),
                black_box(&narrative),
            )
        })
    });
}

criterion_group!(benches, parser_benchmark, integrate_benchmark);
criterion_main!(benches);
