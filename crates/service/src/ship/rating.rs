//! Rating formula and the rounding it relies on.

use chrono::{DateTime, Datelike, Local, TimeZone, Utc};

use super::Ship;

/// Last production year a ship may carry; ratings are relative to it.
pub const CURRENT_YEAR: i32 = 3019;

/// Round half away from zero to two decimal places.
pub fn round_2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Calendar year of `prod_date` in the system's local time zone.
pub fn production_year(prod_date: &DateTime<Utc>) -> i32 {
    production_year_in(prod_date, &Local)
}

/// Calendar year of `prod_date` as seen from `tz`.
pub fn production_year_in<Tz: TimeZone>(prod_date: &DateTime<Utc>, tz: &Tz) -> i32 {
    prod_date.with_timezone(tz).year()
}

/// `80 * speed * k / (CURRENT_YEAR - year + 1)` rounded to two places,
/// where `k` is 0.5 for used ships and 1.0 otherwise.
///
/// Callers guarantee `year <= CURRENT_YEAR`, so the divisor is at least 1.
pub fn compute_rating(speed: f64, is_used: bool, prod_date: &DateTime<Utc>) -> f64 {
    let year = production_year(prod_date);
    let used_factor = if is_used { 0.5 } else { 1.0 };
    let age = f64::from(CURRENT_YEAR - year + 1);
    round_2(80.0 * speed * used_factor / age)
}

pub fn rating_of(ship: &Ship) -> f64 {
    compute_rating(ship.speed, ship.is_used, &ship.prod_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn mid_year(year: i32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, 7, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn year_boundary_follows_the_zone() {
        let late = Utc.with_ymd_and_hms(3019, 12, 31, 23, 30, 0).unwrap();
        let east = FixedOffset::east_opt(3600).unwrap();
        let west = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(production_year_in(&late, &Utc), 3019);
        assert_eq!(production_year_in(&late, &east), 3020);
        assert_eq!(production_year_in(&late, &west), 3019);

        let early = Utc.with_ymd_and_hms(2800, 1, 1, 0, 30, 0).unwrap();
        assert_eq!(production_year_in(&early, &east), 2800);
        assert_eq!(production_year_in(&early, &west), 2799);
    }

    #[test]
    fn round_2_is_idempotent() {
        for v in [0.0, 0.005, 0.125, 0.333333, 0.987654, 1.0, 12.3456, 0.994999] {
            let once = round_2(v);
            assert_eq!(round_2(once), once, "{v}");
        }
        assert_eq!(round_2(0.456), 0.46);
        assert_eq!(round_2(0.454), 0.45);
    }

    #[test]
    fn eagle_example_rates_two() {
        assert_eq!(compute_rating(0.5, false, &mid_year(3000)), 2.0);
    }

    #[test]
    fn used_ships_rate_half() {
        assert_eq!(compute_rating(0.5, true, &mid_year(3000)), 1.0);
    }

    #[test]
    fn newest_year_divides_by_one() {
        assert_eq!(compute_rating(0.99, false, &mid_year(CURRENT_YEAR)), 79.2);
    }

    #[test]
    fn rating_is_deterministic_and_non_negative() {
        for year in [2800, 2900, 3000, 3019] {
            for speed in [0.01, 0.37, 0.99] {
                for used in [false, true] {
                    let a = compute_rating(speed, used, &mid_year(year));
                    let b = compute_rating(speed, used, &mid_year(year));
                    assert_eq!(a, b);
                    assert!(a >= 0.0);
                }
            }
        }
    }
}
