use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartGame {
    pub season_id: String,
    pub location_id: String,
    pub course_id: String,
    pub starting_hole: u32,
    pub player_ids: Vec<String>,
}
