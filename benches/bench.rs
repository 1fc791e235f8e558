// Criterion benchmarks for the placement scorer and allocator

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use placement_algo::models::{AllocationConstraints, Listing, Profile, SalaryRange};
use placement_algo::{Allocator, Scorer};

const SKILL_POOL: &[&str] = &[
    "Python", "SQL", "React", "JavaScript", "Excel", "Docker", "AWS", "Figma", "Statistics",
    "Content Writing",
];

fn create_profile(id: usize) -> Profile {
    let skills = (0..3)
        .map(|k| SKILL_POOL[(id + k) % SKILL_POOL.len()].to_string())
        .collect();

    Profile {
        id: format!("p{}", id),
        name: format!("Candidate {}", id),
        skills,
        cgpa: 6.0 + (id % 5) as f64,
        industry: if id % 2 == 0 { "Technology" } else { "Analytics" }.to_string(),
        preferred_locations: vec!["Bangalore".to_string(), "Remote".to_string()],
        salary_range: Some(SalaryRange {
            min: 15000,
            max: 50000,
        }),
        work_mode: None,
    }
}

fn create_listing(id: usize) -> Listing {
    let required = (0..4)
        .map(|k| SKILL_POOL[(id * 2 + k) % SKILL_POOL.len()].to_string())
        .collect();

    Listing {
        id: format!("l{}", id),
        title: format!("Intern {}", id),
        company: format!("Company {}", id % 20),
        location: if id % 3 == 0 { "Bangalore" } else { "Mumbai" }.to_string(),
        industry: if id % 2 == 0 { "Technology" } else { "Finance" }.to_string(),
        salary: 15000 + (id % 7) as u32 * 5000,
        is_remote: id % 4 == 0,
        required_skills: required,
        min_cgpa: 6.0 + (id % 4) as f64 * 0.5,
        capacity: Some(1 + (id % 3) as u32),
        filled: 0,
    }
}

fn bench_score_pair(c: &mut Criterion) {
    let scorer = Scorer::with_default_weights();
    let profile = create_profile(1);
    let listing = create_listing(2);

    c.bench_function("score_single_pair", |b| {
        b.iter(|| scorer.score(black_box(&profile), black_box(&listing)));
    });
}

fn bench_rank(c: &mut Criterion) {
    let scorer = Scorer::with_default_weights();
    let profile = create_profile(1);

    let mut group = c.benchmark_group("rank");

    for listing_count in [10, 50, 100, 500].iter() {
        let listings: Vec<Listing> = (0..*listing_count).map(create_listing).collect();

        group.bench_with_input(
            BenchmarkId::new("rank_listings", listing_count),
            listing_count,
            |b, _| {
                b.iter(|| {
                    scorer.rank(
                        black_box(&profile),
                        black_box(&listings),
                        black_box(20),
                        black_box(None),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_allocate(c: &mut Criterion) {
    let allocator = Allocator::with_default_weights();
    let constraints = AllocationConstraints::default();

    let mut group = c.benchmark_group("allocate");

    for size in [10, 50, 100].iter() {
        let profiles: Vec<Profile> = (0..*size).map(create_profile).collect();
        let listings: Vec<Listing> = (0..*size).map(create_listing).collect();

        group.bench_with_input(BenchmarkId::new("allocate_grid", size), size, |b, _| {
            b.iter(|| {
                allocator
                    .allocate(
                        black_box(&profiles),
                        black_box(&listings),
                        black_box(&constraints),
                    )
                    .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_score_pair, bench_rank, bench_allocate);
criterion_main!(benches);
