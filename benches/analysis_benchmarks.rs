use criterion::{black_box, criterion_group, criterion_main, Criterion};
use libfluency::prelude::*;
use libfluency::similarity::{similarity, weighted_distance, SubstitutionTable};

const TARGET: &str = "The quick brown fox jumps over the lazy dog near the river bank";
const SPOKEN: &str = "De quick brown fox jump over de lazy dog near de river bank";

const LEARNER_PARAGRAPH: &str = "Im going to the store becuase i has no milk. \
    She dont like coffee but she drinked two cups yesterday. \
    We goed to a apple orchard and it was alot of fun. \
    always I listen music when i arrive to home.";

fn bench_weighted_distance(c: &mut Criterion) {
    let table = SubstitutionTable::english();

    c.bench_function("weighted_distance/words", |b| {
        b.iter(|| weighted_distance(&table, black_box("think"), black_box("tink")))
    });

    c.bench_function("weighted_distance/sentences", |b| {
        b.iter(|| weighted_distance(&table, black_box(TARGET), black_box(SPOKEN)))
    });

    c.bench_function("similarity/sentences", |b| {
        b.iter(|| similarity(&table, black_box(TARGET), black_box(SPOKEN)))
    });
}

fn bench_pronunciation(c: &mut Criterion) {
    c.bench_function("analyze_pronunciation/general", |b| {
        b.iter(|| analyze_pronunciation(black_box(TARGET), black_box(SPOKEN), ScoringMode::General))
    });

    c.bench_function("analyze_pronunciation/focused", |b| {
        b.iter(|| {
            analyze_pronunciation(
                black_box("Think about three things"),
                black_box("Tink about tree tings"),
                ScoringMode::Focused,
            )
        })
    });
}

fn bench_correction(c: &mut Criterion) {
    // Build the shared table outside the timing loop.
    let _ = correct_text("warm up", None);

    c.bench_function("correct_text/sentence", |b| {
        b.iter(|| correct_text(black_box("Im going to the store"), None))
    });

    c.bench_function("correct_text/paragraph", |b| {
        b.iter(|| correct_text(black_box(LEARNER_PARAGRAPH), None))
    });

    let external = ExternalCorrection::with_text("I'm going to the store.");
    c.bench_function("correct_text/with_external", |b| {
        b.iter(|| correct_text(black_box("Im going to the store"), Some(&external)))
    });
}

criterion_group!(
    benches,
    bench_weighted_distance,
    bench_pronunciation,
    bench_correction
);
criterion_main!(benches);
