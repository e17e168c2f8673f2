use cinescope::algo::{string_distance, tfidf, tokenizer};
use cinescope::catalog::{Catalog, CatalogItem};
use cinescope::{Recommender, RecommenderConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Generate a synthetic catalog for benchmarking
fn generate_items(n: usize) -> Vec<CatalogItem> {
    let plots = [
        "A detective hunts a killer through the rain soaked streets of the city",
        "Two strangers fall in love during a long summer in Paris",
        "A crew of astronauts discovers an ancient signal on a distant moon",
        "A family moves into a haunted house and the ghosts want them gone",
        "Soldiers fight to hold a bridge in the final days of the war",
        "A young wizard learns the secrets of a hidden school of magic",
        "A team of thieves plans the heist of a lifetime in Las Vegas",
        "A comedian tries to save a failing club with one last show",
    ];
    let genres = ["crime", "romance", "scifi", "horror", "war", "fantasy", "comedy", "drama"];
    (0..n)
        .map(|i| {
            let cast = vec![format!("Actor {}", i % 50), format!("Actor {}", (i * 7) % 50)];
            CatalogItem::new(
                &format!("Movie {i}"),
                &format!("{} chapter {}", plots[i % plots.len()], i % 100),
                Some(vec![
                    genres[i % genres.len()].to_string(),
                    genres[(i / 3) % genres.len()].to_string(),
                ]),
                &cast,
                &format!("Director {}", i % 20),
            )
        })
        .collect()
}

fn bench_normalize(c: &mut Criterion) {
    let text = "A team of thieves plans the heist of a lifetime, crossing cities and betrayals!";
    c.bench_function("normalize/single", |b| {
        b.iter(|| tokenizer::normalize_str(black_box(text)))
    });
}

fn bench_vectorize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tfidf_fit");
    for size in [100, 1000] {
        let items = generate_items(size);
        let docs: Vec<&str> = items.iter().map(|i| i.description()).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &docs, |b, docs| {
            b.iter(|| black_box(tfidf::TfidfVectorizer.fit_transform(docs)))
        });
    }
    group.finish();
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("model_fit");
    group.sample_size(10);
    for size in [100, 1000] {
        let items = generate_items(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            b.iter(|| {
                let catalog = Catalog::new(items.clone());
                black_box(Recommender::fit(catalog, RecommenderConfig::default()))
            })
        });
    }
    group.finish();
}

fn bench_recommend(c: &mut Criterion) {
    let rec = Recommender::fit(Catalog::new(generate_items(1000)), RecommenderConfig::default());
    c.bench_function("recommend/exact_1000", |b| {
        b.iter(|| black_box(rec.recommend(black_box("Movie 500"))))
    });
    c.bench_function("recommend/fuzzy_1000", |b| {
        b.iter(|| black_box(rec.recommend_fuzzy(black_box("movie 5OO"))))
    });
}

fn bench_title_match(c: &mut Criterion) {
    let titles: Vec<String> = (0..5000).map(|i| format!("Movie {i}")).collect();
    c.bench_function("best_matches/5000_titles", |b| {
        b.iter(|| {
            string_distance::best_matches(
                black_box("movi 42"),
                &titles,
                10,
                string_distance::Metric::Levenshtein,
            )
        })
    });
}

criterion_group!(
    benches,
    bench_normalize,
    bench_vectorize,
    bench_fit,
    bench_recommend,
    bench_title_match
);
criterion_main!(benches);
