use std::fmt;

use serde::Serialize;

/// One of the three play contexts a vehicle has separate statistics for.
/// The discriminant is the position of the mode's block on a detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Arcade,
    Realistic,
    Simulation,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Arcade, Mode::Realistic, Mode::Simulation];

    pub fn from_index(index: usize) -> Option<Mode> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Arcade => "arcade",
            Mode::Realistic => "realistic",
            Mode::Simulation => "simulation",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Catalog metadata for one vehicle, already normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleIdentity {
    pub name: String,
    pub role: String,
    pub country: String,
    pub detail_ref: String,
}

/// Kill efficiency against one target class. `None` means the site showed
/// no value, which is not the same as a rate of zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ModalStat {
    pub per_battle: Option<f64>,
    pub per_death: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GameModeStats {
    pub battle_rating: u32,
    pub battles: u32,
    pub win_rate: f64,
    /// Aircraft shot down.
    pub downs: ModalStat,
    /// Ground vehicles destroyed.
    pub kills: ModalStat,
}

/// Everything a detail page yields. Identity fields are added later by
/// [`assemble`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetailStats {
    pub rank: u32,
    pub arcade: Option<GameModeStats>,
    pub realistic: Option<GameModeStats>,
    pub simulation: Option<GameModeStats>,
}

impl DetailStats {
    pub fn mode(&self, mode: Mode) -> Option<&GameModeStats> {
        match mode {
            Mode::Arcade => self.arcade.as_ref(),
            Mode::Realistic => self.realistic.as_ref(),
            Mode::Simulation => self.simulation.as_ref(),
        }
    }

    pub fn mode_mut(&mut self, mode: Mode) -> &mut Option<GameModeStats> {
        match mode {
            Mode::Arcade => &mut self.arcade,
            Mode::Realistic => &mut self.realistic,
            Mode::Simulation => &mut self.simulation,
        }
    }
}

/// One persisted row: a catalog identity, its detail statistics and the
/// sequential id it was enumerated under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleRecord {
    pub id: u32,
    pub identity: VehicleIdentity,
    pub rank: u32,
    pub arcade: Option<GameModeStats>,
    pub realistic: Option<GameModeStats>,
    pub simulation: Option<GameModeStats>,
}

impl VehicleRecord {
    pub fn mode(&self, mode: Mode) -> Option<&GameModeStats> {
        match mode {
            Mode::Arcade => self.arcade.as_ref(),
            Mode::Realistic => self.realistic.as_ref(),
            Mode::Simulation => self.simulation.as_ref(),
        }
    }
}

pub fn assemble(identity: VehicleIdentity, stats: DetailStats, id: u32) -> VehicleRecord {
    VehicleRecord {
        id,
        identity,
        rank: stats.rank,
        arcade: stats.arcade,
        realistic: stats.realistic,
        simulation: stats.simulation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> VehicleIdentity {
        VehicleIdentity {
            name: "M103".into(),
            role: "heavy_tank".into(),
            country: "usa".into(),
            detail_ref: "/en/vehicle/us_m103".into(),
        }
    }

    #[test]
    fn assemble_copies_identity_and_stamps_id() {
        let realistic = GameModeStats {
            battle_rating: 67,
            battles: 1500,
            win_rate: 54.2,
            ..Default::default()
        };
        let stats = DetailStats {
            rank: 5,
            realistic: Some(realistic),
            ..Default::default()
        };

        let record = assemble(identity(), stats, 7);
        assert_eq!(record.id, 7);
        assert_eq!(record.identity, identity());
        assert_eq!(record.rank, 5);
        assert_eq!(record.arcade, None);
        assert_eq!(record.realistic, Some(realistic));
        assert_eq!(record.simulation, None);
    }

    #[test]
    fn mode_index_order() {
        assert_eq!(Mode::from_index(0), Some(Mode::Arcade));
        assert_eq!(Mode::from_index(1), Some(Mode::Realistic));
        assert_eq!(Mode::from_index(2), Some(Mode::Simulation));
        assert_eq!(Mode::from_index(3), None);
    }

    #[test]
    fn mode_mut_targets_matching_slot() {
        let mut stats = DetailStats::default();
        *stats.mode_mut(Mode::Simulation) = Some(GameModeStats::default());
        assert!(stats.mode(Mode::Simulation).is_some());
        assert!(stats.mode(Mode::Arcade).is_none());
        assert!(stats.mode(Mode::Realistic).is_none());
    }
}
