use std::fmt::Write;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use pgdiag::diagnostics::{
    ContextVisibility, DiagnosticFields, MessageRenderer, NarrowColumns, UnicodeColumns,
    Verbosity, locate,
};

struct Case {
    name: &'static str,
    query: String,
    position: usize,
}

fn build_long_select() -> String {
    let mut sql = String::with_capacity(64_000);
    sql.push_str("SELECT\n");
    for i in 0..2_000usize {
        let _ = writeln!(sql, "  column_{i} AS alias_{i},");
    }
    sql.push_str("  last_column\nFORM big_table");
    sql
}

fn build_wide_text_query() -> String {
    let mut sql = String::with_capacity(32_000);
    sql.push_str("INSERT INTO notes(body) VALUES ");
    for i in 0..1_000usize {
        let _ = write!(sql, "('メモ番号 {i} 日本語テキスト'), ");
    }
    sql.push_str("('end') RETURNIN id");
    sql
}

fn build_cases() -> Vec<Case> {
    let long = build_long_select();
    let wide = build_wide_text_query();
    vec![
        Case {
            name: "short",
            query: "SELECT * FORM t".to_string(),
            position: 10,
        },
        Case {
            name: "long_select_tail",
            position: long.chars().count() - 13,
            query: long,
        },
        Case {
            name: "wide_text_tail",
            position: wide.chars().count() - 10,
            query: wide,
        },
    ]
}

fn fields_for(position: usize) -> DiagnosticFields {
    DiagnosticFields::builder()
        .with_severity("ERROR")
        .with_code("42601")
        .with_message("syntax error")
        .with_position(position.to_string())
        .with_detail("detail text")
        .with_hint("hint text")
        .with_context("PL/pgSQL function f() line 1 at SQL statement")
        .with_file("scan.l")
        .with_line("1236")
        .with_routine("scanner_yyerror")
        .build()
}

fn bench_locate(c: &mut Criterion) {
    let cases = build_cases();
    let mut group = c.benchmark_group("locate");

    for case in &cases {
        group.throughput(Throughput::Bytes(case.query.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(case.name), case, |b, case| {
            b.iter(|| {
                let window = locate(
                    black_box(&case.query),
                    black_box(case.position as i64),
                    &UnicodeColumns,
                );
                black_box(window);
            });
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let cases = build_cases();
    let mut group = c.benchmark_group("render/verbose");
    let renderer = MessageRenderer::new()
        .with_verbosity(Verbosity::Verbose)
        .with_context(ContextVisibility::Always)
        .with_width(NarrowColumns);

    for case in &cases {
        let fields = fields_for(case.position);
        group.bench_with_input(BenchmarkId::from_parameter(case.name), case, |b, case| {
            b.iter(|| {
                let out = renderer.render(Some(black_box(&fields)), Some(case.query.as_str()));
                black_box(out);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_locate, bench_render);
criterion_main!(benches);
