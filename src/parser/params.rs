use tracing::warn;

use super::error::ExtractError;
use super::values;
use crate::record::{DetailStats, Mode};

const VEHICLE_GROUP: usize = 0;
const RATING_GROUP: usize = 2;
/// Position of the rank among the vehicle group's values.
const RANK_POSITION: usize = 2;

/// One `ul.params` list: parameter labels and their values, both trimmed,
/// in page order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamGroup {
    pub names: Vec<String>,
    pub values: Vec<String>,
}

impl ParamGroup {
    fn name(&self, index: usize) -> &str {
        self.names.get(index).map(String::as_str).unwrap_or("")
    }
}

/// Pass B. Reads the rank and applies battle ratings to the modes Pass A
/// kept.
pub fn read_params(groups: &[ParamGroup], stats: &mut DetailStats) -> Result<(), ExtractError> {
    let vehicle = groups.get(VEHICLE_GROUP).ok_or(ExtractError::MissingRank)?;
    stats.rank = read_rank(vehicle)?;

    if let Some(ratings) = groups.get(RATING_GROUP) {
        read_ratings(ratings, stats)?;
    }
    Ok(())
}

fn read_rank(group: &ParamGroup) -> Result<u32, ExtractError> {
    let mut rank = None;
    for (index, value) in group.values.iter().enumerate() {
        match index {
            RANK_POSITION => rank = values::count("rank", value)?,
            i if i < RANK_POSITION => {}
            _ => warn!(parameter = group.name(index), "unsupported parameter"),
        }
    }
    rank.ok_or(ExtractError::MissingRank)
}

fn read_ratings(group: &ParamGroup, stats: &mut DetailStats) -> Result<(), ExtractError> {
    for (index, value) in group.values.iter().enumerate() {
        let Some(mode) = Mode::from_index(index) else {
            warn!(parameter = group.name(index), "unsupported parameter");
            continue;
        };
        let Some(mode_stats) = stats.mode_mut(mode).as_mut() else {
            continue;
        };
        let raw = value
            .parse::<f64>()
            .map_err(|source| ExtractError::InvalidBattleRating {
                mode,
                value: value.clone(),
                source,
            })?;
        if !raw.is_finite() || raw < 0.0 {
            return Err(ExtractError::BattleRatingOutOfRange {
                mode,
                value: value.clone(),
            });
        }
        mode_stats.battle_rating = values::battle_rating(raw);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::GameModeStats;

    fn group(pairs: &[(&str, &str)]) -> ParamGroup {
        ParamGroup {
            names: pairs.iter().map(|(n, _)| n.to_string()).collect(),
            values: pairs.iter().map(|(_, v)| v.to_string()).collect(),
        }
    }

    fn vehicle_group(rank: &str) -> ParamGroup {
        group(&[("Type", "Heavy tank"), ("Country", "USA"), ("Rank", rank)])
    }

    fn with_modes(modes: &[Mode]) -> DetailStats {
        let mut stats = DetailStats::default();
        for &mode in modes {
            *stats.mode_mut(mode) = Some(GameModeStats {
                battles: 1,
                ..Default::default()
            });
        }
        stats
    }

    #[test]
    fn rank_is_third_value() {
        let groups = vec![vehicle_group("5")];
        let mut stats = DetailStats::default();
        read_params(&groups, &mut stats).unwrap();
        assert_eq!(stats.rank, 5);
    }

    #[test]
    fn extra_vehicle_parameters_do_not_fail() {
        let groups = vec![group(&[
            ("Type", "Fighter"),
            ("Country", "USSR"),
            ("Rank", "2"),
            ("Premium", "no"),
        ])];
        let mut stats = DetailStats::default();
        read_params(&groups, &mut stats).unwrap();
        assert_eq!(stats.rank, 2);
    }

    #[test]
    fn missing_rank_is_fatal() {
        let mut stats = DetailStats::default();
        assert!(matches!(
            read_params(&[], &mut stats).unwrap_err(),
            ExtractError::MissingRank
        ));

        let short = vec![group(&[("Type", "Fighter"), ("Country", "USSR")])];
        assert!(matches!(
            read_params(&short, &mut stats).unwrap_err(),
            ExtractError::MissingRank
        ));

        let blank = vec![vehicle_group("N/A")];
        assert!(matches!(
            read_params(&blank, &mut stats).unwrap_err(),
            ExtractError::MissingRank
        ));
    }

    #[test]
    fn malformed_rank_is_fatal() {
        let groups = vec![vehicle_group("V")];
        let mut stats = DetailStats::default();
        assert!(matches!(
            read_params(&groups, &mut stats).unwrap_err(),
            ExtractError::InvalidCount { stat: "rank", .. }
        ));
    }

    #[test]
    fn ratings_apply_only_to_kept_modes() {
        let groups = vec![
            vehicle_group("4"),
            group(&[("Ignored", "whatever")]),
            group(&[("AB", "6.7"), ("RB", "6.3"), ("SB", "7.0")]),
        ];
        let mut stats = with_modes(&[Mode::Arcade, Mode::Realistic]);
        read_params(&groups, &mut stats).unwrap();

        assert_eq!(stats.arcade.unwrap().battle_rating, 67);
        assert_eq!(stats.realistic.unwrap().battle_rating, 63);
        assert!(stats.simulation.is_none());
    }

    #[test]
    fn malformed_rating_of_dropped_mode_is_skipped() {
        let groups = vec![
            vehicle_group("4"),
            ParamGroup::default(),
            group(&[("AB", "N/A"), ("RB", "7.7")]),
        ];
        let mut stats = with_modes(&[Mode::Realistic]);
        read_params(&groups, &mut stats).unwrap();
        assert!(stats.arcade.is_none());
        assert_eq!(stats.realistic.unwrap().battle_rating, 77);
    }

    #[test]
    fn malformed_rating_of_kept_mode_is_fatal() {
        let groups = vec![
            vehicle_group("4"),
            ParamGroup::default(),
            group(&[("AB", "")]),
        ];
        let mut stats = with_modes(&[Mode::Arcade]);
        let err = read_params(&groups, &mut stats).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::InvalidBattleRating { mode: Mode::Arcade, .. }
        ));
    }

    #[test]
    fn negative_or_non_finite_rating_is_fatal() {
        for bad in ["-1.0", "NaN", "inf"] {
            let groups = vec![
                vehicle_group("4"),
                ParamGroup::default(),
                group(&[("AB", "6.7"), ("RB", bad)]),
            ];
            let mut stats = with_modes(&[Mode::Arcade, Mode::Realistic]);
            let err = read_params(&groups, &mut stats).unwrap_err();
            assert!(
                matches!(
                    err,
                    ExtractError::BattleRatingOutOfRange { mode: Mode::Realistic, .. }
                ),
                "{bad} accepted"
            );
        }
    }

    #[test]
    fn ratings_past_simulation_are_ignored() {
        let groups = vec![
            vehicle_group("4"),
            ParamGroup::default(),
            group(&[("AB", "1.0"), ("RB", "1.0"), ("SB", "1.0"), ("XB", "bogus")]),
            group(&[("Later", "not read")]),
        ];
        let mut stats = with_modes(&Mode::ALL);
        read_params(&groups, &mut stats).unwrap();
        for mode in Mode::ALL {
            assert_eq!(stats.mode(mode).unwrap().battle_rating, 10);
        }
    }
}
