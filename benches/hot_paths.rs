use club_map::club::{ClubRecord, GroundRole, RugbyCode, Sport};
use club_map::filter::{is_visible, FilterState};
use club_map::stats::compute_stats;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Synthetic record set at the upper end of the expected data scale
fn synth_records(n: usize) -> Vec<ClubRecord> {
    (0..n)
        .map(|i| ClubRecord {
            team_name: Some(format!("Club {i} Women")),
            club: Some(format!("Club {}", i / 2)), // every club has two venues
            sport: Some(if i % 3 == 0 { Sport::Rugby } else { Sport::Football }),
            code: if i % 3 == 0 {
                Some(if i % 2 == 0 { RugbyCode::Union } else { RugbyCode::League })
            } else {
                None
            },
            tier: Some(format!("tier{}", i % 4 + 1)),
            lat: 50.0 + (i % 100) as f64 * 0.08,
            lng: -5.0 + (i % 70) as f64 * 0.09,
            ground_name: Some(format!("Ground {i}")),
            ground_role: if i % 2 == 0 {
                GroundRole::Primary
            } else {
                GroundRole::Secondary
            },
            region_name: Some(format!("Region {}", i % 12)),
            region_code: Some(format!("R{}", i % 12)),
            ..Default::default()
        })
        .collect()
}

fn bench_full_pass(c: &mut Criterion) {
    let records = synth_records(2000);

    let permissive = FilterState::default();
    let narrow = FilterState {
        sport: Some(Sport::Rugby),
        tier: Some("tier1".into()),
        search: "club 1".into(),
        ..Default::default()
    };

    c.bench_function("evaluate_2k_default", |b| {
        b.iter(|| {
            records
                .iter()
                .filter(|r| is_visible(black_box(r), &permissive))
                .count()
        })
    });

    c.bench_function("evaluate_2k_narrow", |b| {
        b.iter(|| {
            records
                .iter()
                .filter(|r| is_visible(black_box(r), &narrow))
                .count()
        })
    });

    c.bench_function("stats_2k_narrow", |b| {
        b.iter(|| compute_stats(black_box(&records), is_visible, &narrow))
    });
}

criterion_group!(benches, bench_full_pass);
criterion_main!(benches);
