//! Benchmark for dump conversion.
//!
//! Measures the performance of:
//! 1. Tokenizing and splitting a MySQL dump into statements
//! 2. Converting the dump to each output dialect

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sqlconv::sql::{Statements, tokenize};
use sqlconv::{Dialect, convert};
use std::fmt::Write;
use std::hint::black_box;

/// Build a MySQL dump with `tables` tables of `rows` rows each.
fn mysql_dump(tables: usize, rows: usize) -> String {
    let mut sql = String::new();
    for t in 0..tables {
        writeln!(
            sql,
            "CREATE TABLE `table_{t}` (
  `id` int(11) NOT NULL AUTO_INCREMENT,
  `name` varchar(64) NOT NULL DEFAULT '',
  `score` decimal(10,2) DEFAULT NULL,
  `created_at` datetime DEFAULT CURRENT_TIMESTAMP,
  PRIMARY KEY (`id`),
  KEY `idx_name_{t}` (`name`)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;"
        )
        .unwrap();
        for r in 0..rows {
            writeln!(
                sql,
                "INSERT INTO `table_{t}` (`id`, `name`, `score`, `created_at`) \
                 VALUES ({r}, 'name \\'{r}\\'', {r}.5, '2024-01-01 00:00:00');"
            )
            .unwrap();
        }
    }
    sql
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    for rows in [100, 1_000] {
        let sql = mysql_dump(4, rows);
        group.throughput(Throughput::Bytes(sql.len() as u64));
        group.bench_with_input(BenchmarkId::new("tokens", rows), &sql, |b, sql| {
            b.iter(|| tokenize(black_box(sql), Some(Dialect::MySql)).unwrap().len());
        });
        group.bench_with_input(BenchmarkId::new("statements", rows), &sql, |b, sql| {
            b.iter(|| Statements::new(black_box(sql), Some(Dialect::MySql)).count());
        });
    }
    group.finish();
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    let sql = mysql_dump(4, 1_000);
    group.throughput(Throughput::Bytes(sql.len() as u64));
    for output in [Dialect::MySql, Dialect::PostgreSql, Dialect::Sqlite] {
        group.bench_with_input(BenchmarkId::from_parameter(output), &sql, |b, sql| {
            b.iter(|| convert(black_box(sql), Some(Dialect::MySql), output).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_convert);
criterion_main!(benches);
