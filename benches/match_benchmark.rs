//! Benchmarks for stdblock match performance.
//!
//! Run with: cargo bench
//!
//! This benchmark suite measures:
//! - Per-host query throughput (the per-navigation hot path)
//! - Pattern-cache compile amortization
//! - Result-cache hit vs miss performance
//! - Scalability with different rule counts

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use stdblock::{BlockRule, BlockRuleSet, PatternMatcher, RuleSetConfig};

/// Generate a rule collection with a mix of pattern shapes.
fn generate_rules(count: usize) -> Vec<BlockRule> {
    let mut rules = Vec::with_capacity(count);

    for i in 0..count {
        let pattern = match i % 3 {
            0 => format!("site{}.example.com", i),
            1 => format!("*.wild{}.com", i),
            _ => format!("!never{}.org", i),
        };
        rules.push(BlockRule::new(pattern, &[i as u32, (i as u32) + 1]));
    }

    rules
}

/// Generate host queries - mix of hits and misses.
fn generate_queries(count: usize, hit_ratio: f64) -> Vec<String> {
    let mut queries = Vec::with_capacity(count);
    let hits = (count as f64 * hit_ratio) as usize;

    for i in 0..hits {
        if i % 2 == 0 {
            queries.push(format!("site{}.example.com", (i * 3) % 1000));
        } else {
            queries.push(format!("sub.wild{}.com", (i * 3 + 1) % 1000));
        }
    }

    for i in hits..count {
        queries.push(format!("unknown{}.nonexistent.org", i));
    }

    queries
}

/// Benchmark host query throughput without the result cache.
fn bench_host_query_no_cache(c: &mut Criterion) {
    let ruleset = BlockRuleSet::with_config(RuleSetConfig::no_cache());
    ruleset.replace_rules(generate_rules(1_000));

    let queries = generate_queries(200, 0.8);

    // Compile every pattern up front so the bench measures matching
    for query in &queries {
        let _ = ruleset.blocked_ids_for_host(query);
    }

    let mut group = c.benchmark_group("host_query_no_cache");
    group.throughput(Throughput::Elements(queries.len() as u64));

    group.bench_function("mixed_queries", |b| {
        b.iter(|| {
            for query in &queries {
                black_box(ruleset.blocked_ids_for_host(query));
            }
        })
    });

    group.finish();
}

/// Benchmark host query throughput with the result cache warm.
fn bench_host_query_with_cache(c: &mut Criterion) {
    let ruleset = BlockRuleSet::with_config(RuleSetConfig::with_capacity(10_000));
    ruleset.replace_rules(generate_rules(1_000));

    let queries = generate_queries(200, 0.8);

    // Warm up cache
    for query in &queries {
        let _ = ruleset.blocked_ids_for_host(query);
    }

    let mut group = c.benchmark_group("host_query_with_cache");
    group.throughput(Throughput::Elements(queries.len() as u64));

    group.bench_function("cache_hit", |b| {
        b.iter(|| {
            for query in &queries {
                black_box(ruleset.blocked_ids_for_host(query));
            }
        })
    });

    group.finish();
}

/// Benchmark result-cache miss vs hit performance.
fn bench_cache_performance(c: &mut Criterion) {
    let ruleset = BlockRuleSet::with_config(RuleSetConfig::with_capacity(10_000));
    ruleset.replace_rules(generate_rules(1_000));

    let mut group = c.benchmark_group("cache_performance");

    group.bench_function("single_query_miss", |b| {
        b.iter_batched(
            || {
                ruleset.clear_cache();
                "site500.example.com"
            },
            |query| black_box(ruleset.blocked_ids_for_host(query)),
            criterion::BatchSize::SmallInput,
        )
    });

    let _ = ruleset.blocked_ids_for_host("site500.example.com");
    group.bench_function("single_query_hit", |b| {
        b.iter(|| black_box(ruleset.blocked_ids_for_host("site500.example.com")))
    });

    group.finish();
}

/// Benchmark the compiled-pattern cache: first compile vs repeat compile.
fn bench_pattern_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("pattern_compile");

    group.bench_function("cold_compile", |b| {
        b.iter_batched(
            PatternMatcher::new,
            |matcher| {
                black_box(matcher.compile("*.example.com").unwrap());
            },
            criterion::BatchSize::SmallInput,
        )
    });

    let matcher = PatternMatcher::new();
    let _ = matcher.compile("*.example.com").unwrap();
    group.bench_function("cached_compile", |b| {
        b.iter(|| black_box(matcher.compile("*.example.com").unwrap()))
    });

    group.finish();
}

/// Benchmark scalability with different rule counts.
fn bench_scalability(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalability");

    for size in [10, 100, 1_000].iter() {
        let ruleset = BlockRuleSet::with_config(RuleSetConfig::no_cache());
        ruleset.replace_rules(generate_rules(*size));

        let queries: Vec<_> = (0..100)
            .map(|i| format!("site{}.example.com", i % size))
            .collect();

        // Pre-compile patterns
        for query in &queries {
            let _ = ruleset.blocked_ids_for_host(query);
        }

        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_with_input(BenchmarkId::new("rules", size), size, |b, _| {
            b.iter(|| {
                for query in &queries {
                    black_box(ruleset.blocked_ids_for_host(query));
                }
            })
        });
    }

    group.finish();
}

/// Benchmark hot replacement of the rule collection.
fn bench_hot_replace(c: &mut Criterion) {
    let ruleset = BlockRuleSet::with_config(RuleSetConfig::with_capacity(10_000));
    ruleset.replace_rules(generate_rules(1_000));

    let replacement = generate_rules(1_000);

    let mut group = c.benchmark_group("hot_replace");

    group.bench_function("replace_1k_rules", |b| {
        b.iter_batched(
            || replacement.clone(),
            |rules| ruleset.replace_rules(rules),
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_host_query_no_cache,
    bench_host_query_with_cache,
    bench_cache_performance,
    bench_pattern_compile,
    bench_scalability,
    bench_hot_replace,
);

criterion_main!(benches);
