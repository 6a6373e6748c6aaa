use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ff_core::memory::Document;
use ff_core::{compute_selector, matches, resolve, resolve_all, to_pattern};

const URLS: &[&str] = &[
    "https://shop.example.com/orders/58213/items/9f8e7d6c5b4a",
    "https://app.example.com/dashboard/reports/2024?tab=q1#top",
    "https://example.com/users/42/edit",
    "https://example.com/",
];

fn bench_patterns(c: &mut Criterion) {
    c.bench_function("to_pattern", |b| {
        b.iter(|| {
            for url in URLS {
                black_box(to_pattern(black_box(url)));
            }
        })
    });

    let patterns: Vec<String> = URLS.iter().map(|url| to_pattern(url)).collect();
    c.bench_function("matches", |b| {
        b.iter(|| {
            for pattern in &patterns {
                for url in URLS {
                    black_box(matches(black_box(pattern), black_box(url)));
                }
            }
        })
    });
}

/// A form-heavy page: 20 sections of 10 rows, half the inputs named.
fn build_page() -> String {
    let mut html = String::from("<!DOCTYPE html><html><body>");
    for section in 0..20 {
        html.push_str(r#"<section class="card panel">"#);
        for row in 0..10 {
            if row % 2 == 0 {
                html.push_str(&format!(r#"<div class="row"><input name="field-{section}-{row}"></div>"#));
            } else {
                html.push_str(r#"<div class="row"><input></div>"#);
            }
        }
        html.push_str("</section>");
    }
    html.push_str("</body></html>");
    html
}

fn bench_selectors(c: &mut Criterion) {
    let doc = Document::parse(&build_page());
    let inputs = resolve_all("input", &doc.scope());
    let selectors: Vec<String> = inputs.iter().filter_map(compute_selector).collect();

    c.bench_function("compute_selector", |b| {
        b.iter(|| {
            for input in &inputs {
                black_box(compute_selector(input));
            }
        })
    });

    c.bench_function("resolve", |b| {
        b.iter(|| {
            for selector in &selectors {
                black_box(resolve(black_box(selector), &doc.scope()));
            }
        })
    });
}

criterion_group!(benches, bench_patterns, bench_selectors);
criterion_main!(benches);
