// Criterion benchmarks for STEP Algo

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use step_algo::core::filters::{mentor_matches, ALL};
use step_algo::core::MentorCatalog;
use step_algo::models::Mentor;

fn create_mentor(id: usize) -> Mentor {
    let industries = ["IT", "Маркетинг", "Финансы / Инвестиции", "Производство"];
    let cities = ["Москва", "Санкт-Петербург", "Казань"];

    Mentor {
        id: format!("m{}", id),
        name: format!("Наставник {}", id),
        industry: industries[id % industries.len()].to_string(),
        city: cities[id % cities.len()].to_string(),
        experience: "10 лет".to_string(),
        description: format!("Опыт в сфере {} и командах", industries[id % industries.len()]),
        achievements: vec!["Результат".to_string()],
        request: String::new(),
        values: vec!["труд".to_string()],
        video_url: String::new(),
        avatar_url: String::new(),
        single_price: 3000 + (id as u32 % 10) * 100,
        group_price: 1000,
    }
}

fn bench_single_predicate(c: &mut Criterion) {
    let mentor = create_mentor(1);

    c.bench_function("mentor_matches", |b| {
        b.iter(|| {
            mentor_matches(
                black_box(&mentor),
                black_box("IT"),
                black_box("Москва"),
                black_box("команд"),
            )
        });
    });
}

fn bench_catalog_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_filter");

    for mentor_count in [10, 50, 100, 500].iter() {
        let mentors: Vec<Mentor> = (0..*mentor_count).map(create_mentor).collect();
        let catalog = MentorCatalog::new(mentors).expect("unique ids");

        group.bench_with_input(
            BenchmarkId::from_parameter(mentor_count),
            mentor_count,
            |b, _| {
                b.iter(|| {
                    catalog.filter(black_box("IT"), black_box(ALL), black_box("команд"))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_single_predicate, bench_catalog_filter);
criterion_main!(benches);
