use std::ops::ControlFlow;

use tracing::warn;

use super::error::ExtractError;
use super::values;
use crate::record::{DetailStats, GameModeStats, Mode};

/// Value slots of a mode block in the order the site lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatSlot {
    Battles,
    WinRate,
    DownsPerBattle,
    DownsPerDeath,
    KillsPerBattle,
    KillsPerDeath,
}

pub const STAT_SLOTS: [StatSlot; 6] = [
    StatSlot::Battles,
    StatSlot::WinRate,
    StatSlot::DownsPerBattle,
    StatSlot::DownsPerDeath,
    StatSlot::KillsPerBattle,
    StatSlot::KillsPerDeath,
];

impl StatSlot {
    pub fn name(self) -> &'static str {
        match self {
            StatSlot::Battles => "battles-count",
            StatSlot::WinRate => "win-rate",
            StatSlot::DownsPerBattle => "aircrafts-per-battle",
            StatSlot::DownsPerDeath => "aircrafts-per-death",
            StatSlot::KillsPerBattle => "tanks-per-battle",
            StatSlot::KillsPerDeath => "tanks-per-death",
        }
    }

    /// Stores one badge into `stats`. Breaks when the battle count is
    /// missing: such a mode counts as never played.
    fn apply(self, badge: &str, stats: &mut GameModeStats) -> Result<ControlFlow<()>, ExtractError> {
        let name = self.name();
        match self {
            StatSlot::Battles => match values::count(name, badge)? {
                Some(battles) => stats.battles = battles,
                None => return Ok(ControlFlow::Break(())),
            },
            StatSlot::WinRate => stats.win_rate = values::win_rate(badge)?,
            StatSlot::DownsPerBattle => stats.downs.per_battle = values::rate(name, badge)?,
            StatSlot::DownsPerDeath => stats.downs.per_death = values::rate(name, badge)?,
            StatSlot::KillsPerBattle => stats.kills.per_battle = values::rate(name, badge)?,
            StatSlot::KillsPerDeath => stats.kills.per_death = values::rate(name, badge)?,
        }
        Ok(ControlFlow::Continue(()))
    }
}

/// Pass A. `blocks[i]` holds the badge texts of the value items of the
/// i-th mode block, labels already dropped.
pub fn read_modes(blocks: &[Vec<String>], stats: &mut DetailStats) -> Result<(), ExtractError> {
    if blocks.len() > Mode::ALL.len() {
        return Err(ExtractError::UnexpectedModeBlocks {
            expected: Mode::ALL.len(),
            found: blocks.len(),
        });
    }
    for (mode, badges) in Mode::ALL.into_iter().zip(blocks) {
        *stats.mode_mut(mode) = read_mode(mode, badges)?;
    }
    Ok(())
}

fn read_mode(mode: Mode, badges: &[String]) -> Result<Option<GameModeStats>, ExtractError> {
    if badges.is_empty() {
        warn!(mode = %mode, stat = StatSlot::Battles.name(), "no stat found");
        return Ok(None);
    }

    let mut stats = GameModeStats::default();
    for (index, badge) in badges.iter().enumerate() {
        let Some(slot) = STAT_SLOTS.get(index) else {
            warn!(mode = %mode, slot = index, value = badge.trim(), "unexpected game mode statistic");
            continue;
        };
        if slot.apply(badge, &mut stats)?.is_break() {
            warn!(mode = %mode, stat = slot.name(), "no stat found");
            return Ok(None);
        }
    }
    Ok(Some(stats))
}
