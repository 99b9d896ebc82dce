use async_graphql::{Context, ID, InputObject, Object, Result as GqlResult, SimpleObject};
use chrono::NaiveDate;

use crate::modules::golf::core::model::{
    Course, CourseLocation, Game, HoleResult, Player, PlayerScorecard, Season, SeasonStanding,
};
use crate::modules::golf::use_cases::play_game::command::StartGame;
use crate::shared::core::primitives::IdGenerator;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlPlayer {
    pub id: ID,
    pub name: String,
}

impl From<Player> for GqlPlayer {
    fn from(v: Player) -> Self {
        Self {
            id: ID(v.id),
            name: v.name,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlSeason {
    pub id: ID,
    pub name: String,
    pub created_at: String,
}

impl From<Season> for GqlSeason {
    fn from(v: Season) -> Self {
        Self {
            id: ID(v.id),
            name: v.name,
            created_at: v.created_at.to_rfc3339(),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlCourse {
    pub id: ID,
    pub name: String,
    pub hole_count: u32,
}

#[derive(SimpleObject, Clone)]
pub struct GqlCourseLocation {
    pub id: ID,
    pub name: String,
    pub courses: Vec<GqlCourse>,
}

impl From<CourseLocation> for GqlCourseLocation {
    fn from(v: CourseLocation) -> Self {
        Self {
            id: ID(v.id),
            name: v.name,
            courses: v
                .courses
                .into_iter()
                .map(|course| GqlCourse {
                    id: ID(course.id),
                    name: course.name,
                    hole_count: course.hole_count,
                })
                .collect(),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlHoleResult {
    pub hole_number: u32,
    pub winners: Vec<String>,
    pub losers: Vec<String>,
    pub hole_in_one_players: Vec<String>,
}

#[derive(SimpleObject, Clone)]
pub struct GqlGame {
    pub id: ID,
    pub season_id: String,
    pub location_id: String,
    pub course_id: String,
    pub starting_hole: u32,
    pub started_at: String,
    pub completed_at: Option<String>,
    pub player_ids: Vec<String>,
    pub hole_results: Vec<GqlHoleResult>,
}

impl From<Game> for GqlGame {
    fn from(v: Game) -> Self {
        Self {
            id: ID(v.id),
            season_id: v.season_id,
            location_id: v.location_id,
            course_id: v.course_id,
            starting_hole: v.starting_hole,
            started_at: v.started_at.to_rfc3339(),
            completed_at: v.completed_at.map(|at| at.to_rfc3339()),
            player_ids: v.player_ids,
            hole_results: v
                .hole_results
                .into_iter()
                .map(|result| GqlHoleResult {
                    hole_number: result.hole_number,
                    winners: result.winners.into_iter().collect(),
                    losers: result.losers.into_iter().collect(),
                    hole_in_one_players: result.hole_in_one_players.into_iter().collect(),
                })
                .collect(),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlPlayerScorecard {
    pub player_id: String,
    pub course_name: String,
    pub score: i32,
    pub date_played: String,
    pub hole_in_one_count: u32,
}

impl From<PlayerScorecard> for GqlPlayerScorecard {
    fn from(v: PlayerScorecard) -> Self {
        Self {
            player_id: v.player_id,
            course_name: v.course_name,
            score: v.score,
            date_played: v.date_played.to_string(),
            hole_in_one_count: v.hole_in_one_count,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlSeasonStanding {
    pub player_id: String,
    pub score: i32,
    pub hole_in_one_count: u32,
}

impl From<SeasonStanding> for GqlSeasonStanding {
    fn from(v: SeasonStanding) -> Self {
        Self {
            player_id: v.player_id,
            score: v.score,
            hole_in_one_count: v.hole_in_one_count,
        }
    }
}

#[derive(InputObject)]
pub struct GqlCourseInput {
    pub id: Option<String>,
    pub name: String,
    pub hole_count: u32,
}

#[derive(InputObject)]
pub struct GqlCourseLocationInput {
    pub id: Option<String>,
    pub name: String,
    pub courses: Vec<GqlCourseInput>,
}

impl GqlCourseLocationInput {
    fn into_location(self, ids: &dyn IdGenerator) -> CourseLocation {
        CourseLocation {
            id: self.id.unwrap_or_else(|| ids.next_id()),
            name: self.name.trim().to_string(),
            courses: self
                .courses
                .into_iter()
                .map(|course| Course {
                    id: course.id.unwrap_or_else(|| ids.next_id()),
                    name: course.name.trim().to_string(),
                    hole_count: course.hole_count,
                })
                .collect(),
        }
    }
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn players(&self, context: &Context<'_>) -> GqlResult<Vec<GqlPlayer>> {
        let state = context.data_unchecked::<AppState>();
        let list = state.repository.list_players().await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    async fn seasons(&self, context: &Context<'_>) -> GqlResult<Vec<GqlSeason>> {
        let state = context.data_unchecked::<AppState>();
        let list = state.repository.list_seasons().await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    async fn locations(
        &self,
        context: &Context<'_>,
        season_id: String,
    ) -> GqlResult<Vec<GqlCourseLocation>> {
        let state = context.data_unchecked::<AppState>();
        let list = state.repository.list_locations(&season_id).await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    async fn player_scorecards(
        &self,
        context: &Context<'_>,
        player_id: String,
    ) -> GqlResult<Vec<GqlPlayerScorecard>> {
        let state = context.data_unchecked::<AppState>();
        let list = state.repository.player_scorecards(&player_id).await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    async fn season_standings(
        &self,
        context: &Context<'_>,
        season_id: String,
    ) -> GqlResult<Vec<GqlSeasonStanding>> {
        let state = context.data_unchecked::<AppState>();
        let list = state.repository.season_standings(&season_id).await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    async fn course_rankings(
        &self,
        context: &Context<'_>,
        course_id: String,
    ) -> GqlResult<Vec<GqlPlayerScorecard>> {
        let state = context.data_unchecked::<AppState>();
        let list = state.repository.course_rankings(&course_id).await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// `date` is `YYYY-MM-DD`; today when omitted.
    async fn season_stats_csv(
        &self,
        context: &Context<'_>,
        season_id: String,
        date: Option<String>,
    ) -> GqlResult<String> {
        let state = context.data_unchecked::<AppState>();
        let exported_on = date
            .map(|date| NaiveDate::parse_from_str(&date, "%Y-%m-%d"))
            .transpose()?;
        Ok(state
            .repository
            .export_season_stats_csv(&season_id, exported_on)
            .await?)
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn add_player(&self, context: &Context<'_>, name: String) -> GqlResult<GqlPlayer> {
        let state = context.data_unchecked::<AppState>();
        Ok(state.repository.add_player(&name).await?.into())
    }

    async fn remove_player(&self, context: &Context<'_>, player_id: String) -> GqlResult<bool> {
        let state = context.data_unchecked::<AppState>();
        state.repository.remove_player(&player_id).await?;
        Ok(true)
    }

    async fn create_season(&self, context: &Context<'_>, name: String) -> GqlResult<GqlSeason> {
        let state = context.data_unchecked::<AppState>();
        Ok(state.repository.create_season(&name).await?.into())
    }

    async fn add_location(
        &self,
        context: &Context<'_>,
        season_id: String,
        location: GqlCourseLocationInput,
    ) -> GqlResult<GqlCourseLocation> {
        let state = context.data_unchecked::<AppState>();
        Ok(state
            .repository
            .add_location(&season_id, location.into_location(state.ids.as_ref()))
            .await?
            .into())
    }

    async fn start_game(
        &self,
        context: &Context<'_>,
        season_id: String,
        location_id: String,
        course_id: String,
        starting_hole: Option<u32>,
        player_ids: Vec<String>,
    ) -> GqlResult<GqlGame> {
        let state = context.data_unchecked::<AppState>();
        let command = StartGame {
            season_id,
            location_id,
            course_id,
            starting_hole: starting_hole.unwrap_or(1),
            player_ids,
        };
        Ok(state.repository.start_game(command).await?.into())
    }

    async fn record_hole_result(
        &self,
        context: &Context<'_>,
        game_id: String,
        hole_number: u32,
        winners: Option<Vec<String>>,
        losers: Option<Vec<String>>,
        hole_in_one_players: Option<Vec<String>>,
    ) -> GqlResult<GqlGame> {
        let state = context.data_unchecked::<AppState>();
        let result = HoleResult::hole(hole_number)
            .won_by(winners.unwrap_or_default())
            .lost_by(losers.unwrap_or_default())
            .hole_in_one_by(hole_in_one_players.unwrap_or_default());
        Ok(state
            .repository
            .record_hole_result(&game_id, result)
            .await?
            .into())
    }

    async fn finish_game(&self, context: &Context<'_>, game_id: String) -> GqlResult<GqlGame> {
        let state = context.data_unchecked::<AppState>();
        Ok(state.repository.finish_game(&game_id).await?.into())
    }
}
