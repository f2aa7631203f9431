//! Benchmarks for FlatDB table operations

use criterion::{criterion_group, criterion_main, Criterion};
use tempfile::TempDir;

use flatdb::{Column, ColumnType, SortDirection, Table};

fn setup_table(rows: usize) -> (TempDir, Table) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bench.txt");

    let mut table = Table::open_path(&path).unwrap();
    table
        .create(vec![
            Column::new("id", ColumnType::Integer),
            Column::new("name", ColumnType::String),
        ])
        .unwrap();
    table.set_index_key("id").unwrap();

    for i in 0..rows {
        let name = format!("row-{}", i);
        table.insert(&[("name", name.as_str())]).unwrap();
    }

    (temp_dir, table)
}

fn table_benchmarks(c: &mut Criterion) {
    c.bench_function("insert_1000th_row", |b| {
        let (_temp, mut table) = setup_table(1000);
        let mut i = 1000;
        b.iter(|| {
            i += 1;
            let name = format!("row-{}", i);
            table.insert(&[("name", name.as_str())]).unwrap();
        });
    });

    c.bench_function("select_substring_1000_rows", |b| {
        let (_temp, mut table) = setup_table(1000);
        b.iter(|| table.select("name", "row-5", "", SortDirection::Ascending));
    });

    c.bench_function("select_sorted_1000_rows", |b| {
        let (_temp, mut table) = setup_table(1000);
        b.iter(|| table.select("*", "*", "name", SortDirection::Descending));
    });
}

criterion_group!(benches, table_benchmarks);
criterion_main!(benches);
