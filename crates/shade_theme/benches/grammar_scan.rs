use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shade_theme::{GrammarSet, VariableBuilder};

fn sample_source() -> String {
    let mut out = String::new();
    for i in 0..500 {
        out.push_str(&format!(
            "<div className=\"p-4 bg-blue-{} text-light-slate-{} border-red-amber-{}\">\n",
            100 + i % 850,
            50 + i % 900,
            25 + i % 975
        ));
    }
    out
}

fn bench_scan(c: &mut Criterion) {
    let grammars = GrammarSet::new();
    let source = sample_source();

    c.bench_function("grammar_scan", |b| {
        b.iter(|| grammars.scan(black_box(&source)))
    });

    c.bench_function("scan_and_build", |b| {
        b.iter(|| {
            let mut builder = VariableBuilder::new();
            builder.apply_all(&grammars.scan(black_box(&source)));
            builder.finish()
        })
    });
}

criterion_group!(benches, bench_scan);
criterion_main!(benches);
