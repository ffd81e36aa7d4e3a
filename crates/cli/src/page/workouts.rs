use chrono::{DateTime, TimeZone};
use liftrank_app::Unit;
use liftrank_domain as domain;

use crate::common;

pub fn view<Tz: TimeZone>(
    workouts: &[domain::WorkoutEntry],
    unit: Unit,
    now: &DateTime<Tz>,
) -> String {
    if workouts.is_empty() {
        return [
            "No Workouts Yet",
            "Start logging your workouts to track progress and earn ranks!",
            "Log your first workout: liftrank add <EXERCISE> <REPSxWEIGHT>...",
        ]
        .join("\n");
    }

    workouts
        .iter()
        .map(|workout| view_workout(workout, unit, now))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn view_workout<Tz: TimeZone>(
    workout: &domain::WorkoutEntry,
    unit: Unit,
    now: &DateTime<Tz>,
) -> String {
    let mut lines = vec![format!(
        "{}  ({})  #{}",
        workout.exercise,
        common::format_date(&workout.date, now),
        workout.id
    )];
    for set in &workout.sets {
        lines.push(format!(
            "  {} reps × {}",
            set.reps,
            common::format_weight(set.weight, unit)
        ));
    }
    lines.push(format!(
        "  Total Volume: {}",
        common::format_weight(workout.total_volume, unit)
    ));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_view_empty() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        assert!(view(&[], Unit::Lbs, &now).starts_with("No Workouts Yet\n"));
    }

    #[test]
    fn test_view() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let workouts = vec![
            domain::WorkoutEntry::new(
                domain::WorkoutID::from("2"),
                "Deadlift",
                vec![domain::WorkoutSet {
                    reps: 5,
                    weight: 300.0,
                }],
                Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap(),
            )
            .unwrap(),
            domain::WorkoutEntry::new(
                domain::WorkoutID::from("1"),
                "Bench Press",
                vec![
                    domain::WorkoutSet {
                        reps: 10,
                        weight: 20.0,
                    },
                    domain::WorkoutSet {
                        reps: 8,
                        weight: 22.5,
                    },
                ],
                Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
            )
            .unwrap(),
        ];

        assert_eq!(
            view(&workouts, Unit::Kg, &now),
            [
                "Deadlift  (Today)  #2",
                "  5 reps × 300 kg",
                "  Total Volume: 1,500 kg",
                "",
                "Bench Press  (Mar 1, 2024)  #1",
                "  10 reps × 20 kg",
                "  8 reps × 22.5 kg",
                "  Total Volume: 380 kg",
            ]
            .join("\n")
        );
    }
}
