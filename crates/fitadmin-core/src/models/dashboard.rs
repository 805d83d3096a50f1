use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Aggregate counters served by `/admin/dashboard`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub users: StatBlock,
    pub instructors: StatBlock,
    pub gyms: StatBlock,
    pub consultations: StatBlock,
    pub matches: StatBlock,
    pub revenue: StatBlock,
    pub user_growth: Option<Value>,
    pub recent_activity: Vec<Value>,
}

/// One dashboard card. Fields the server omits read as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBlock {
    pub total: f64,
    pub growth: f64,
    pub active: f64,
    pub verified: f64,
    pub pending: f64,
    pub completed: f64,
    pub cancelled: f64,
    pub rejected: f64,
    pub monthly: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl StatBlock {
    pub fn trend(&self) -> Trend {
        if self.growth > 0.0 {
            Trend::Up
        } else if self.growth < 0.0 {
            Trend::Down
        } else {
            Trend::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_stats_fill_zeroes() {
        let json = r#"{"users":{"total":120,"growth":4.5},"matches":{"active":12,"pending":3,"rejected":1},"recentActivity":[{"type":"signup"}]}"#;
        let stats: DashboardStats = serde_json::from_str(json).unwrap();

        assert_eq!(stats.users.total, 120.0);
        assert_eq!(stats.users.trend(), Trend::Up);
        assert_eq!(stats.matches.pending, 3.0);
        assert_eq!(stats.gyms.total, 0.0);
        assert_eq!(stats.gyms.trend(), Trend::Neutral);
        assert_eq!(stats.recent_activity.len(), 1);
    }

    #[test]
    fn test_negative_growth_trends_down() {
        let block = StatBlock {
            growth: -2.0,
            ..StatBlock::default()
        };
        assert_eq!(block.trend(), Trend::Down);
    }
}
