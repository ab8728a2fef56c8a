//! Performance benchmarks for rs-readability-img.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks include:
//! - Small synthetic article (~2KB) with images, with and without image scoring
//! - A reused `Extractor` versus the one-shot API
//! - Synthetic pages of growing size for scaling

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rs_readability_img::{extract, extract_with_options, Extractor, Options};

const SAMPLE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Sample Article Title</title>
    <link rel="stylesheet" href="/site.css">
    <script>var tracking = true;</script>
</head>
<body>
    <div id="header"><a href="/">Home</a> <a href="/about">About</a></div>
    <div id="main" class="post">
        <h1>Sample Article Title</h1>
        <p>This is the first paragraph of the article. It contains some meaningful
        content, a few commas, and enough words to be scored as a paragraph.</p>
        <div class="photo"><img src="/2024/05/01/harbour.jpg" width="800" height="533" alt="The harbour"></div>
        <p>Here is a second paragraph with more content. The extraction should
        preserve the text while removing navigation, sidebars and other boilerplate.</p>
        <p>A third paragraph ensures we have enough content for meaningful
        benchmarking of the extraction performance.<br><br>After a double break.</p>
    </div>
    <div class="sidebar">
        <h3>Related Articles</h3>
        <ul><li><a href="/r1">Related article 1</a></li><li><a href="/r2">Related article 2</a></li></ul>
        <img src="/static/logo.png" width="120" height="40">
    </div>
    <div id="footer"><p>Copyright 2024</p></div>
</body>
</html>
"#;

fn options() -> Options {
    Options {
        url: Some("https://news.example.com/2024/05/01/story.html".to_string()),
        ..Options::default()
    }
}

fn bench_extract_default(c: &mut Criterion) {
    c.bench_function("extract_default", |b| {
        b.iter(|| extract(black_box(SAMPLE_HTML)));
    });
}

fn bench_extract_text_only(c: &mut Criterion) {
    let options = Options {
        include_images: false,
        ..options()
    };

    c.bench_function("extract_text_only", |b| {
        b.iter(|| extract_with_options(black_box(SAMPLE_HTML), black_box(&options)));
    });
}

fn bench_reused_extractor(c: &mut Criterion) {
    let Ok(extractor) = Extractor::new(options()) else {
        return;
    };

    c.bench_function("extractor_reused", |b| {
        b.iter(|| extractor.extract(black_box(SAMPLE_HTML)));
    });
}

/// Pages made of `n` repeated article sections
fn bench_scaling(c: &mut Criterion) {
    let section = r#"<div class="entry"><p>Paragraph text with commas, clauses, and enough length to be scored by the extractor.</p>
        <p><img src="/img/photo.jpg" width="640" height="480"></p>
        <ul class="share"><li><a href="/s">Share</a></li></ul></div>"#;

    let mut group = c.benchmark_group("scaling");

    for n in [10usize, 100, 500] {
        let html = format!("<html><body>{}</body></html>", section.repeat(n));
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("extract", n), &html, |b, html| {
            b.iter(|| extract(black_box(html)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_extract_default,
    bench_extract_text_only,
    bench_reused_extractor,
    bench_scaling
);
criterion_main!(benches);
