//! TTL and key strategy table.
//!
//! Every cached data category has a fixed key prefix and a fixed TTL tier.
//! Call sites name a [`CacheCategory`] instead of spelling prefixes or TTLs.

use std::fmt;

use chrono::NaiveDate;

// == TTL Policy ==
/// Volatility tiers for cached data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TtlPolicy {
    /// Live scores and in-play state
    RealTime,
    /// Articles, moments, fixture lists
    Short,
    /// Standings and aggregated stats
    Medium,
    /// Team, player and competition metadata
    Long,
    /// Season definitions
    VeryLong,
}

impl TtlPolicy {
    /// TTL in seconds.
    pub const fn seconds(self) -> u64 {
        match self {
            TtlPolicy::RealTime => 30,
            TtlPolicy::Short => 5 * 60,
            TtlPolicy::Medium => 30 * 60,
            TtlPolicy::Long => 60 * 60,
            TtlPolicy::VeryLong => 24 * 60 * 60,
        }
    }
}

// == Cache Category ==
/// Logical data categories that are cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheCategory {
    LiveScores,
    Fixtures,
    Matches,
    Standings,
    Stats,
    Teams,
    Players,
    Competitions,
    Seasons,
    Articles,
    Moments,
}

/// Prefix and TTL of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStrategy {
    pub prefix: &'static str,
    pub ttl: TtlPolicy,
}

impl CacheCategory {
    /// Every category, in table order.
    pub const ALL: [CacheCategory; 11] = [
        CacheCategory::LiveScores,
        CacheCategory::Fixtures,
        CacheCategory::Matches,
        CacheCategory::Standings,
        CacheCategory::Stats,
        CacheCategory::Teams,
        CacheCategory::Players,
        CacheCategory::Competitions,
        CacheCategory::Seasons,
        CacheCategory::Articles,
        CacheCategory::Moments,
    ];

    /// The strategy table.
    pub const fn strategy(self) -> CacheStrategy {
        let (prefix, ttl) = match self {
            CacheCategory::LiveScores => ("live", TtlPolicy::RealTime),
            CacheCategory::Fixtures => ("fixtures", TtlPolicy::Short),
            CacheCategory::Matches => ("match", TtlPolicy::Short),
            CacheCategory::Standings => ("standings", TtlPolicy::Medium),
            CacheCategory::Stats => ("stats", TtlPolicy::Medium),
            CacheCategory::Teams => ("team", TtlPolicy::Long),
            CacheCategory::Players => ("player", TtlPolicy::Long),
            CacheCategory::Competitions => ("competition", TtlPolicy::Long),
            CacheCategory::Seasons => ("seasons", TtlPolicy::VeryLong),
            CacheCategory::Articles => ("articles", TtlPolicy::Short),
            CacheCategory::Moments => ("moments", TtlPolicy::Short),
        };
        CacheStrategy { prefix, ttl }
    }

    pub const fn prefix(self) -> &'static str {
        self.strategy().prefix
    }

    pub const fn ttl_seconds(self) -> u64 {
        self.strategy().ttl.seconds()
    }

    /// Builds `prefix:part1:part2...`.
    pub fn key<I, S>(self, parts: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: fmt::Display,
    {
        let mut key = self.prefix().to_string();
        for part in parts {
            key.push(':');
            key.push_str(&part.to_string());
        }
        key
    }

    /// Glob matching every key of the category.
    pub fn pattern(self) -> String {
        format!("{}:*", self.prefix())
    }
}

impl fmt::Display for CacheCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Key builders for the accessors' cached reads.
pub mod keys {
    use super::{CacheCategory, NaiveDate};

    pub fn live_match(match_id: &str) -> String {
        CacheCategory::LiveScores.key([match_id])
    }

    pub fn live_scores() -> String {
        CacheCategory::LiveScores.key(["all"])
    }

    /// Fixtures for one calendar day, e.g. `fixtures:2026-10-16`.
    pub fn fixtures_on(date: NaiveDate) -> String {
        CacheCategory::Fixtures.key([date.format("%Y-%m-%d")])
    }

    pub fn team_fixtures(team_id: &str) -> String {
        CacheCategory::Fixtures.key(["team", team_id])
    }

    pub fn match_detail(match_id: &str) -> String {
        CacheCategory::Matches.key([match_id])
    }

    pub fn standings(competition_id: &str, season: &str) -> String {
        CacheCategory::Standings.key([competition_id, season])
    }

    pub fn team_stats(team_id: &str, season: &str) -> String {
        CacheCategory::Stats.key(["team", team_id, season])
    }

    pub fn player_stats(player_id: &str, season: &str) -> String {
        CacheCategory::Stats.key(["player", player_id, season])
    }

    pub fn team(team_id: &str) -> String {
        CacheCategory::Teams.key([team_id])
    }

    pub fn team_squad(team_id: &str) -> String {
        CacheCategory::Teams.key([team_id, "squad"])
    }

    pub fn player(player_id: &str) -> String {
        CacheCategory::Players.key([player_id])
    }

    pub fn competition(competition_id: &str) -> String {
        CacheCategory::Competitions.key([competition_id])
    }

    pub fn seasons() -> String {
        CacheCategory::Seasons.key(["all"])
    }

    pub fn latest_articles(limit: usize) -> String {
        CacheCategory::Articles.key(["latest".to_string(), limit.to_string()])
    }

    pub fn article(slug: &str) -> String {
        CacheCategory::Articles.key([slug])
    }

    pub fn match_moments(match_id: &str) -> String {
        CacheCategory::Moments.key(["match", match_id])
    }

    pub fn latest_moments(limit: usize) -> String {
        CacheCategory::Moments.key(["latest".to_string(), limit.to_string()])
    }
}
