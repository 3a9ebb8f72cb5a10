use chrono::NaiveDate;
use serde::Deserialize;

use super::ApiClient;
use crate::core::{
    ArchipelagoError,
    FilterQuery,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatsSummary {
    pub total_lemmas: u64,
    pub known: u64,
    pub learning: u64,
    pub unseen: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LeitnerBinCount {
    pub bin: u8,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyExerciseCount {
    pub date: NaiveDate,
    pub count: u64,
}

/// All three statistics series the profile screen renders.
#[derive(Debug, Clone)]
pub struct StatsBundle {
    pub summary: StatsSummary,
    pub distribution: Vec<LeitnerBinCount>,
    pub daily: Vec<DailyExerciseCount>,
}

pub async fn summary(
    client: &ApiClient,
    filter: &FilterQuery,
) -> Result<StatsSummary, ArchipelagoError> {
    client.post_json("/user-lemma-stats/summary", filter).await
}

pub async fn leitner_distribution(
    client: &ApiClient,
    filter: &FilterQuery,
) -> Result<Vec<LeitnerBinCount>, ArchipelagoError> {
    client.post_json("/user-lemma-stats/leitner-distribution", filter).await
}

pub async fn exercises_daily(
    client: &ApiClient,
    filter: &FilterQuery,
) -> Result<Vec<DailyExerciseCount>, ArchipelagoError> {
    client.post_json("/user-lemma-stats/exercises-daily", filter).await
}

/// The three series are independent, so they are fetched concurrently and
/// joined into one bundle.
pub async fn load_bundle(
    client: &ApiClient,
    filter: &FilterQuery,
) -> Result<StatsBundle, ArchipelagoError> {
    let (summary, distribution, daily) = tokio::try_join!(
        summary(client, filter),
        leitner_distribution(client, filter),
        exercises_daily(client, filter)
    )?;

    Ok(StatsBundle { summary, distribution, daily })
}
