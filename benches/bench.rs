// Criterion benchmarks for Care Match

use care_match::core::{
    distance::haversine_distance, filters::evaluate_eligibility, scoring::calculate_breakdown,
    Matcher,
};
use care_match::models::{
    Activity, AgeRange, CaregiverProfile, ChildContext, DaySlot, DistanceBucket, FamilyContext,
    GeoPoint, JobOpportunity, Modality, RateBucket, Regime, Requirement, ScoringWeights,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn evaluated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

fn create_caregiver(id: usize, lat: f64, lon: f64) -> CaregiverProfile {
    CaregiverProfile {
        id: id.to_string(),
        is_smoker: id % 7 == 0,
        age_ranges_experience: if id % 2 == 0 {
            [AgeRange::Toddler, AgeRange::Preschool].into_iter().collect()
        } else {
            [AgeRange::SchoolAge].into_iter().collect()
        },
        max_travel_distance: DistanceBucket::Km20,
        max_children_care: 1 + (id % 3) as u32,
        accepted_activities: [Activity::Cooking, Activity::Laundry].into_iter().collect(),
        employment_modalities: [Modality::PartTime].into_iter().collect(),
        contract_regimes: [Regime::Employee, Regime::Contractor].into_iter().collect(),
        hourly_rate_range: RateBucket::From20To30,
        document_validated: id % 3 == 0,
        criminal_background_validated: true,
        average_rating: Some(3.5 + (id % 4) as f64 * 0.5),
        review_count: (id % 25) as u32,
        location: Some(GeoPoint::new(lat, lon)),
        availability_slots: DaySlot::all().step_by(1 + id % 3).collect(),
        ..Default::default()
    }
}

fn create_job() -> (JobOpportunity, FamilyContext, Vec<ChildContext>) {
    let job = JobOpportunity {
        id: "job".to_string(),
        mandatory_requirements: [Requirement::NonSmoker].into_iter().collect(),
        child_ids: vec![],
    };
    let family = FamilyContext {
        id: "family".to_string(),
        number_of_children: 2,
        domestic_help_expected: [Activity::Cooking, Activity::SchoolRun].into_iter().collect(),
        availability_slots: DaySlot::all().take(10).collect(),
        location: Some(GeoPoint::new(-23.5505, -46.6333)),
        ..Default::default()
    };
    let children = vec![
        ChildContext {
            id: "a".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2022, 3, 10),
            ..Default::default()
        },
        ChildContext {
            id: "b".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2019, 2, 20),
            ..Default::default()
        },
    ];
    (job, family, children)
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(-23.5505),
                black_box(-46.6333),
                black_box(-23.56),
                black_box(-46.64),
            )
        });
    });
}

fn bench_single_match(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let (job, family, children) = create_job();
    let caregiver = create_caregiver(2, -23.56, -46.64);
    let today = evaluated_at().date_naive();
    let weights = ScoringWeights::default();

    c.bench_function("evaluate_eligibility", |b| {
        b.iter(|| {
            evaluate_eligibility(
                black_box(&job),
                black_box(&family),
                black_box(&children),
                black_box(&caregiver),
                today,
            )
        });
    });

    c.bench_function("calculate_breakdown", |b| {
        b.iter(|| {
            calculate_breakdown(
                black_box(&job),
                black_box(&family),
                black_box(&children),
                black_box(&caregiver),
                today,
                &weights,
            )
        });
    });

    c.bench_function("compute_match", |b| {
        b.iter(|| {
            matcher.compute_match(
                black_box(&job),
                black_box(&family),
                black_box(&children),
                black_box(&caregiver),
                evaluated_at(),
            )
        });
    });
}

fn bench_candidate_batch(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let (job, family, children) = create_job();

    let mut group = c.benchmark_group("matching");

    for candidate_count in [10, 100, 500, 1000].iter() {
        let caregivers: Vec<CaregiverProfile> = (0..*candidate_count)
            .map(|i| {
                let offset = (i as f64 * 0.001) % 0.2;
                create_caregiver(i, -23.5505 + offset, -46.6333 - offset)
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::new("compute_batch", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    let mut scores: Vec<(u8, &str)> = caregivers
                        .iter()
                        .map(|caregiver| {
                            matcher.compute_match(&job, &family, &children, caregiver, evaluated_at())
                        })
                        .zip(caregivers.iter())
                        .filter(|(result, _)| result.is_eligible)
                        .map(|(result, caregiver)| (result.score, caregiver.id.as_str()))
                        .collect();
                    scores.sort_by(|a, b| b.0.cmp(&a.0));
                    black_box(scores)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_single_match,
    bench_candidate_batch
);

criterion_main!(benches);
