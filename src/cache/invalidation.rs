//! Named invalidation helpers, one per data category.
//!
//! Write paths call these after changing backend records.

use crate::cache::strategy::{keys, CacheCategory};
use crate::cache::CacheAccessor;

impl CacheAccessor {
    /// Invalidates every key of `category`.
    pub async fn invalidate_category(&self, category: CacheCategory) {
        self.invalidate_cache(&category.pattern()).await;
    }

    pub async fn invalidate_live_caches(&self) {
        self.invalidate_category(CacheCategory::LiveScores).await;
    }

    pub async fn invalidate_fixture_caches(&self) {
        self.invalidate_category(CacheCategory::Fixtures).await;
    }

    pub async fn invalidate_match_caches(&self) {
        self.invalidate_category(CacheCategory::Matches).await;
    }

    pub async fn invalidate_standings_caches(&self) {
        self.invalidate_category(CacheCategory::Standings).await;
    }

    pub async fn invalidate_stats_caches(&self) {
        self.invalidate_category(CacheCategory::Stats).await;
    }

    pub async fn invalidate_player_caches(&self) {
        self.invalidate_category(CacheCategory::Players).await;
    }

    pub async fn invalidate_competition_caches(&self) {
        self.invalidate_category(CacheCategory::Competitions).await;
    }

    pub async fn invalidate_season_caches(&self) {
        self.invalidate_category(CacheCategory::Seasons).await;
    }

    pub async fn invalidate_article_caches(&self) {
        self.invalidate_category(CacheCategory::Articles).await;
    }

    pub async fn invalidate_moment_caches(&self) {
        self.invalidate_category(CacheCategory::Moments).await;
    }

    /// Invalidates one team's entries (`team:{id}` and `team:{id}:*`),
    /// leaving teams whose id merely starts with `team_id` alone.
    pub async fn invalidate_team_caches(&self, team_id: &str) {
        let key = keys::team(team_id);
        self.invalidate_cache_key(&key).await;
        self.invalidate_cache(&format!("{key}:*")).await;
    }
}
