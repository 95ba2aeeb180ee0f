//! Benchmarks for offer_feed exports.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use offer_feed::{escape, strip_tags, Book, BookFormat, Feed, Offer, XmlOptions};
use std::hint::black_box;

fn simple_offer(i: usize) -> Offer {
    Offer::new(["Books", "Fiction"])
        .name(format!("Product {}", i))
        .manufacturer("Zebra Books")
        .price(9.99 + i as f64)
        .sku(i)
}

fn book_offer(i: usize) -> Offer {
    Offer::with_attributes(
        ["Books", "Non-Fiction", "Autobiographies"],
        Book::new()
            .author(["First Author", "Second Author"])
            .isbn(format!("978-{}", i))
            .format(BookFormat::SoftCover)
            .pages(320),
    )
    .name(format!("<b>Memoir</b> {}", i))
    .manufacturer("Big Publisher")
    .description("A long description with <p>markup</p> & entities that needs stripping.")
    .price(24.99)
    .sku(format!("BK-{}", i))
    .notes("Signed copy")
}

fn feed_of(size: usize, make: fn(usize) -> Offer) -> Feed {
    let mut feed = Feed::new();
    feed.offers_mut().add((0..size).map(make).collect::<Vec<_>>());
    feed
}

fn bench_exports(c: &mut Criterion) {
    let mut group = c.benchmark_group("Export");

    let simple = feed_of(10, simple_offer);
    let books = feed_of(10, book_offer);
    let pretty = XmlOptions::new().pretty();

    group.bench_function("array", |b| b.iter(|| black_box(&books).to_array()));

    group.bench_function("json", |b| b.iter(|| black_box(&books).to_json(false)));

    group.bench_function("xml_simple", |b| b.iter(|| black_box(&simple).to_xml()));

    group.bench_function("xml_books", |b| b.iter(|| black_box(&books).to_xml()));

    group.bench_function("xml_pretty", |b| {
        b.iter(|| black_box(&books).to_xml_with(&pretty))
    });

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("Build");

    group.bench_function("simple_offer", |b| b.iter(|| simple_offer(black_box(7))));

    group.bench_function("book_offer", |b| b.iter(|| book_offer(black_box(7))));

    group.finish();
}

fn bench_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("Text");

    let plain = "This is a simple product name with no markup at all.";
    let tagged = "<p>This <b>product</b> has <i>several</i> tags</p>";
    let special = "Fish & Chips <Large> \"Deluxe\"";

    group.bench_function("strip_tags_plain", |b| b.iter(|| strip_tags(black_box(plain))));

    group.bench_function("strip_tags_tagged", |b| {
        b.iter(|| strip_tags(black_box(tagged)))
    });

    group.bench_function("escape_plain", |b| b.iter(|| escape(black_box(plain))));

    group.bench_function("escape_special", |b| b.iter(|| escape(black_box(special))));

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("Scaling");

    for size in [1, 10, 100, 1000].iter() {
        let feed = feed_of(*size, book_offer);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("xml", size), &feed, |b, feed| {
            b.iter(|| black_box(feed).to_xml())
        });

        group.bench_with_input(BenchmarkId::new("json", size), &feed, |b, feed| {
            b.iter(|| black_box(feed).to_json(false))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_exports, bench_build, bench_text, bench_scaling);

criterion_main!(benches);
