use liftrank_app::Unit;
use liftrank_domain as domain;

use crate::common;

pub fn view(stats: &[domain::ExerciseStats], unit: Unit) -> String {
    if stats.is_empty() {
        return [
            "No Rankings Yet",
            "Complete workouts to see your exercise rankings!",
        ]
        .join("\n");
    }

    let counts = domain::rank_counts(stats);
    let mut lines = vec![
        "Your Stats".to_string(),
        format!(
            "  {} Gold: {}   {} Silver: {}   {} Bronze: {}",
            common::rank_symbol(domain::Rank::Gold),
            counts.gold,
            common::rank_symbol(domain::Rank::Silver),
            counts.silver,
            common::rank_symbol(domain::Rank::Bronze),
            counts.bronze,
        ),
        String::new(),
        "Exercise Rankings".to_string(),
    ];

    for (i, s) in stats.iter().enumerate() {
        lines.push(format!(
            "{:>3}. {} {}  {}",
            i + 1,
            common::rank_symbol(s.rank),
            s.exercise,
            s.rank
        ));
        lines.push(format!(
            "     Total Volume: {}   Max Weight: {}   Workouts: {}",
            common::format_weight(s.total_volume, unit),
            common::format_weight(s.max_weight, unit),
            s.total_workouts
        ));
        lines.push(format!("     {}", common::rank_description(s.rank, unit)));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;

    fn workout(id: &str, exercise: &str, reps: u32, weight: f32) -> domain::WorkoutEntry {
        domain::WorkoutEntry::new(
            domain::WorkoutID::from(id),
            exercise,
            vec![domain::WorkoutSet { reps, weight }],
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_view_empty() {
        assert_eq!(
            view(&[], Unit::Lbs),
            "No Rankings Yet\nComplete workouts to see your exercise rankings!"
        );
    }

    #[test]
    fn test_view() {
        let stats = domain::aggregate(&[
            workout("3", "Curl", 10, 20.0),
            workout("2", "Deadlift", 5, 220.0),
            workout("1", "Curl", 10, 15.0),
        ]);

        assert_eq!(
            view(&stats, Unit::Lbs),
            [
                "Your Stats",
                "  🥇 Gold: 1   🥈 Silver: 0   🥉 Bronze: 1",
                "",
                "Exercise Rankings",
                "  1. 🥇 Deadlift  Gold",
                "     Total Volume: 1,100 lbs   Max Weight: 220 lbs   Workouts: 1",
                "     15K+ volume or 200+ lbs",
                "  2. 🥉 Curl  Bronze",
                "     Total Volume: 350 lbs   Max Weight: 20 lbs   Workouts: 2",
                "     Getting started",
            ]
            .join("\n")
        );
    }
}
