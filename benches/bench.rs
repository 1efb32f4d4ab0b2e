use criterion::{black_box, criterion_group, criterion_main, Criterion};
use path_macros::{MacroSet, ParamFunc};

const SEGMENTS: &[&str] = &[
    "42",
    "-17",
    "255",
    "9223372036854775807",
    "18446744073709551616",
    "true",
    "hello world",
    "img_cat.png",
    "not a number",
    "",
];

fn base_evaluators(c: &mut Criterion) {
    let mut group = c.benchmark_group("Base Evaluators");
    let macros = MacroSet::builtin();

    for m in &macros {
        group.bench_function(m.indent(), |b| {
            b.iter(|| {
                for segment in black_box(SEGMENTS) {
                    black_box(m.evaluate(segment));
                }
            });
        });
    }

    group.finish();
}

fn composed_matchers(c: &mut Criterion) {
    let mut group = c.benchmark_group("Composed Matchers");
    let macros = MacroSet::builtin();

    let number = macros
        .get("number")
        .unwrap()
        .matcher(&[ParamFunc::new("min", [1]), ParamFunc::new("max", [100])])
        .unwrap();
    group.bench_function("number min max", |b| {
        b.iter(|| {
            for segment in black_box(SEGMENTS) {
                black_box(number.evaluate(segment));
            }
        });
    });

    let string = macros
        .get("string")
        .unwrap()
        .matcher(&[
            ParamFunc::new("prefix", ["img_"]),
            ParamFunc::new("suffix", [".png"]),
            ParamFunc::new("regexp", ["^[a-z_.]+$"]),
        ])
        .unwrap();
    group.bench_function("string prefix suffix regexp", |b| {
        b.iter(|| {
            for segment in black_box(SEGMENTS) {
                black_box(string.evaluate(segment));
            }
        });
    });

    group.finish();
}

fn lookup(c: &mut Criterion) {
    let macros = MacroSet::builtin();
    let names = ["string", "int", "long", "uint64", "boolean", "path", "uuid"];

    c.bench_function("get", |b| {
        b.iter(|| {
            for name in black_box(&names) {
                black_box(macros.get(name));
            }
        });
    });
}

criterion_group!(benches, base_evaluators, composed_matchers, lookup);
criterion_main!(benches);
