//! Criterion benchmarks for character resolution.
//!
//! Resolution runs once per typed character, ahead of several milliseconds of
//! deliberate inter-event delay, so these numbers are a sanity check rather
//! than a budget.
//!
//! Run with:
//! ```bash
//! cargo bench --package keysynth-core --bench resolve_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use keysynth_core::{apply_patch, LayoutResolver, LayoutTable, Locale};

/// A typical chat command mixing letters, digits, shifted symbols and spaces.
const CHAT_LINE: &str = "&2[DRAWN] &9Steve &7hat als &9#3 &7gewonnen!";

// ── Benchmarks: single characters ─────────────────────────────────────────────

fn bench_resolve_char(c: &mut Criterion) {
    let resolver = LayoutResolver::new(Some("de"));
    let mut group = c.benchmark_group("resolve_char");

    for ch in ['a', 'A', '!', '[', '€'] {
        group.bench_with_input(BenchmarkId::from_parameter(ch), &ch, |b, &ch| {
            b.iter(|| resolver.resolve(black_box(ch)))
        });
    }

    group.finish();
}

// ── Benchmarks: whole lines and named keys ────────────────────────────────────

fn bench_resolve_line(c: &mut Criterion) {
    let resolver = LayoutResolver::new(Some("de"));

    c.bench_function("resolve_chat_line", |b| {
        b.iter(|| {
            black_box(CHAT_LINE)
                .chars()
                .map(|ch| resolver.resolve(ch))
                .collect::<Vec<_>>()
        })
    });

    c.bench_function("resolve_named_key", |b| {
        b.iter(|| resolver.resolve_key(black_box("page down")))
    });
}

// ── Benchmarks: construction ──────────────────────────────────────────────────

fn bench_build_table(c: &mut Criterion) {
    c.bench_function("build_ansi_table", |b| b.iter(LayoutTable::ansi));

    let ansi = LayoutTable::ansi();
    c.bench_function("apply_german_patch", |b| {
        b.iter(|| apply_patch(black_box(&ansi), Locale::German.patch()))
    });
}

criterion_group!(benches, bench_resolve_char, bench_resolve_line, bench_build_table);
criterion_main!(benches);
