use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};

use service::pagination::Pagination;
use service::ship::query::{filter, paginate, ShipCriteria, SortField};
use service::ship::{Ship, ShipType};

fn fleet(n: i64) -> Vec<Ship> {
    (1..=n)
        .map(|i| Ship {
            id: i,
            name: format!("ship-{i}"),
            planet: if i % 3 == 0 { "Mars".into() } else { "Earth".into() },
            ship_type: if i % 2 == 0 { ShipType::Military } else { ShipType::Transport },
            prod_date: Utc.with_ymd_and_hms(2800 + (i % 220) as i32, 7, 1, 12, 0, 0).unwrap(),
            is_used: i % 5 == 0,
            speed: 0.01 + (i % 98) as f64 / 100.0,
            crew_size: (i % 9999 + 1) as i32,
            rating: (i % 80) as f64,
        })
        .collect()
}

fn bench_filter_and_page(c: &mut Criterion) {
    let ships = fleet(5_000);
    let criteria = ShipCriteria {
        planet: Some("Earth".into()),
        min_speed: Some(0.2),
        max_crew_size: Some(8000),
        ..Default::default()
    };

    c.bench_function("ship_filter_sort_page", |b| {
        b.iter(|| {
            let found = filter(ships.clone(), &criteria);
            let _ = paginate(found, SortField::Speed, Pagination::from_parts(Some(4), Some(20)));
        });
    });
}

criterion_group!(benches, bench_filter_and_page);
criterion_main!(benches);
