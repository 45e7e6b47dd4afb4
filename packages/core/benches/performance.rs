//! Performance benchmarks for tasklist-core
//!
//! Run with: `cargo bench -p tasklist-core`
//!
//! These benchmarks measure the critical path of indexing a page:
//! - Wiki parsing of large documents
//! - Task extraction from an already parsed tree
//! - Date annotation parsing

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tasklist_core::{parse_date, FixedClock, TaskExtractor, TaskListConfig, WikiParser};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

/// Generate a wiki page with N task lists of mixed depth and annotations
fn generate_large_page(list_count: usize) -> String {
    let mut text = String::new();

    for i in 0..list_count {
        match i % 4 {
            0 => text.push_str(&format!("TODO @project{}:\n", i % 7)),
            1 => text.push_str(&format!("Notes for section {}\n\n", i + 1)),
            _ => {}
        }
        text.push_str(&format!("[ ] Task {} !! [d: {}/11]\n", i, (i % 28) + 1));
        text.push_str(&format!("\t[*] Subtask {} done\n", i));
        text.push_str(&format!("\t[ ] Next: subtask {} @waiting\n", i));
        text.push_str(&format!("\t\t* note about ~~old~~ subtask {}\n", i));
        text.push_str(&format!("\t\t[x] dropped [f: 1/1/{}]\n", 2000 + (i % 60)));
        text.push_str("* plain bullet\n");
        text.push_str(&format!("FIXME: loose line {}\n\n", i));
    }

    text
}

/// Benchmark parsing a 1000-list page into a tree
fn bench_wiki_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("wiki_parse");
    group.sample_size(20);

    let text = generate_large_page(1000);
    let parser = WikiParser::new();

    group.bench_function("1000_lists", |b| {
        b.iter(|| black_box(parser.parse(black_box(&text))));
    });

    group.finish();
}

/// Benchmark extraction alone, with and without `all_checkboxes`
///
/// Extraction runs on every page save, so it must stay well below parse cost.
fn bench_extract_tasks(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_tasks");
    group.sample_size(20);

    let tree = WikiParser::new().parse(&generate_large_page(1000));

    let extractor =
        TaskExtractor::with_clock(TaskListConfig::default(), FixedClock::new(today())).unwrap();
    group.bench_function("all_checkboxes", |b| {
        b.iter(|| black_box(extractor.extract_tasks(black_box(&tree))));
    });

    let config = TaskListConfig {
        all_checkboxes: false,
        nonactionable_tags: TaskListConfig::parse_tag_list("@waiting"),
        ..TaskListConfig::default()
    };
    let extractor = TaskExtractor::with_clock(config, FixedClock::new(today())).unwrap();
    group.bench_function("labelled_only", |b| {
        b.iter(|| black_box(extractor.extract_tasks(black_box(&tree))));
    });

    group.finish();
}

fn bench_parse_date(c: &mut Criterion) {
    let inputs = ["11/12", "11/12/2012", "2012-12-11", "1.2.26", "not a date"];

    c.bench_function("parse_date", |b| {
        b.iter(|| {
            for input in &inputs {
                black_box(parse_date(black_box(input), today()));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_wiki_parse,
    bench_extract_tasks,
    bench_parse_date
);
criterion_main!(benches);
