// Season standings as comma separated text.
//
// Fields are written as they are; names and ids are expected to be comma free.

use crate::modules::golf::core::model::SeasonStanding;
use chrono::NaiveDate;
use std::collections::HashMap;

pub const CSV_HEADER: &str = "Season,Player,Score,HoleInOnes,ExportedOn";

/// Shown for players whose record has been removed.
pub const UNKNOWN_PLAYER: &str = "Unknown";

/// One row per standing, in the given order, joined by `\n` with no trailing newline.
pub fn format_season_stats_csv(
    season_id: &str,
    standings: &[SeasonStanding],
    player_names: &HashMap<String, String>,
    exported_on: NaiveDate,
) -> String {
    let exported_on = exported_on.format("%Y-%m-%d").to_string();
    std::iter::once(CSV_HEADER.to_string())
        .chain(standings.iter().map(|standing| {
            let name = player_names
                .get(&standing.player_id)
                .map(String::as_str)
                .unwrap_or(UNKNOWN_PLAYER);
            format!(
                "{season_id},{name},{},{},{exported_on}",
                standing.score, standing.hole_in_one_count
            )
        }))
        .collect::<Vec<_>>()
        .join("\n")
}
