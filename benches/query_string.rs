//! 重定向查询串合并性能基准测试

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use url_shortcuts::services::build_destination;
use url_shortcuts::utils::query_string::{build_query_string, parse_query};

fn bench_build_query_string(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_string/build");

    let dest = parse_query("ref=x");
    let req = parse_query("campaign=launch");
    group.bench_function("typical", |b| {
        b.iter(|| build_query_string(black_box("fb"), black_box(&dest), black_box(&req)));
    });

    for n in [4usize, 16, 64] {
        let raw: Vec<String> = (0..n).map(|i| format!("k{}=v{}", i, i)).collect();
        let params = parse_query(&raw.join("&"));
        group.bench_with_input(BenchmarkId::new("params", n), &params, |b, params| {
            b.iter(|| build_query_string("fb", params, params));
        });
    }

    group.finish();
}

fn bench_build_destination(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_string/destination");

    group.bench_function("with_request_query", |b| {
        b.iter(|| {
            build_destination(
                black_box("fb"),
                black_box("https://example.com/page?ref=x#top"),
                black_box("campaign=launch&utm_campaign=other"),
            )
        });
    });

    group.bench_function("encoded_values", |b| {
        b.iter(|| {
            build_destination(
                black_box("news"),
                black_box("https://example.com/?q=hello%20world"),
                black_box("amp=%26&x=%E4%BD%A0%E5%A5%BD"),
            )
        });
    });

    group.finish();
}

criterion_group!(benches, bench_build_query_string, bench_build_destination);
criterion_main!(benches);
