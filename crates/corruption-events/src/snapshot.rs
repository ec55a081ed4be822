//! Snapshot Types
//!
//! Serialization structs for per-generation reports and agent state.
//!
//! A report captures the population as it stood right after the "corrupt"
//! stage of a generation, together with the aggregates computed from it.

use serde::{Deserialize, Serialize};

/// Generates a report ID with the given generation number.
pub fn generate_report_id(generation: u64) -> String {
    format!("gen_{:06}", generation)
}

/// Read-only view of a single agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub agent_id: u64,
    /// Agent that spawned this one; `None` for the first generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
    pub generations_survived: u32,
    pub risk_aversion: f64,
    pub capital: f64,
    /// Unclamped; may leave [0, 1]
    #[serde(default)]
    pub dishonesty: Option<f64>,
    #[serde(default)]
    pub income: Option<f64>,
}

impl AgentSnapshot {
    /// Creates a snapshot for an agent that has not acted yet.
    pub fn new(agent_id: u64, risk_aversion: f64, capital: f64) -> Self {
        Self {
            agent_id,
            parent_id: None,
            generations_survived: 0,
            risk_aversion,
            capital,
            dishonesty: None,
            income: None,
        }
    }

    pub fn with_parent(mut self, parent_id: u64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Records a completed "corrupt" stage on the snapshot.
    pub fn with_conduct(mut self, dishonesty: f64, income: f64) -> Self {
        self.dishonesty = Some(dishonesty);
        self.income = Some(income);
        self.generations_survived += 1;
        self
    }

    /// Whether the agent has chosen a dishonesty level at least once.
    pub fn has_acted(&self) -> bool {
        self.dishonesty.is_some()
    }
}

/// Model-level aggregates for one generation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateSnapshot {
    pub population: usize,
    pub total_capital: f64,
    /// Capital-weighted mean dishonesty (q)
    pub corruption_index: f64,
    pub national_income: f64,
    pub income_min: f64,
    pub income_max: f64,
}

/// Everything published after the "corrupt" stage of a generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub report_id: String,
    pub generation: u64,
    pub aggregates: AggregateSnapshot,
    /// Agents whose dishonesty fell outside [0, 1]
    #[serde(default)]
    pub out_of_range_dishonesty: usize,
    pub agents: Vec<AgentSnapshot>,
}

impl GenerationReport {
    pub fn new(generation: u64, aggregates: AggregateSnapshot, agents: Vec<AgentSnapshot>) -> Self {
        let out_of_range_dishonesty = agents
            .iter()
            .filter_map(|a| a.dishonesty)
            .filter(|p| !(0.0..=1.0).contains(p))
            .count();

        Self {
            report_id: generate_report_id(generation),
            generation,
            aggregates,
            out_of_range_dishonesty,
            agents,
        }
    }

    /// Finds an agent by ID.
    pub fn find_agent(&self, agent_id: u64) -> Option<&AgentSnapshot> {
        self.agents.iter().find(|a| a.agent_id == agent_id)
    }

    /// Dishonesty values in population order.
    pub fn dishonesty(&self) -> Vec<f64> {
        self.agents.iter().filter_map(|a| a.dishonesty).collect()
    }

    /// Smallest and largest dishonesty in the report.
    pub fn dishonesty_range(&self) -> Option<(f64, f64)> {
        self.agents
            .iter()
            .filter_map(|a| a.dishonesty)
            .fold(None, |acc, p| match acc {
                None => Some((p, p)),
                Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
            })
    }

    /// Serializes the report to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serializes the report to compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes a report from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregates(population: usize) -> AggregateSnapshot {
        AggregateSnapshot {
            population,
            total_capital: 1.5,
            corruption_index: 0.4,
            national_income: 2.0,
            income_min: 0.1,
            income_max: 1.2,
        }
    }

    #[test]
    fn test_generate_report_id() {
        assert_eq!(generate_report_id(1), "gen_000001");
        assert_eq!(generate_report_id(42371), "gen_042371");
    }

    #[test]
    fn test_agent_snapshot_new() {
        let agent = AgentSnapshot::new(7, 3.0, 0.5);

        assert_eq!(agent.agent_id, 7);
        assert!(agent.parent_id.is_none());
        assert!(!agent.has_acted());
        assert_eq!(agent.generations_survived, 0);
    }

    #[test]
    fn test_with_conduct_counts_generation() {
        let agent = AgentSnapshot::new(1, 3.0, 0.5)
            .with_parent(0)
            .with_conduct(0.3, 1.1);

        assert_eq!(agent.parent_id, Some(0));
        assert_eq!(agent.dishonesty, Some(0.3));
        assert_eq!(agent.generations_survived, 1);
        assert!(agent.has_acted());
    }

    #[test]
    fn test_report_counts_out_of_range() {
        let agents = vec![
            AgentSnapshot::new(0, 3.0, 0.5).with_conduct(0.2, 1.0),
            AgentSnapshot::new(1, 0.5, 0.5).with_conduct(1.7, 1.0),
            AgentSnapshot::new(2, 3.0, 0.5).with_conduct(-0.1, 1.0),
        ];
        let report = GenerationReport::new(3, aggregates(3), agents);

        assert_eq!(report.report_id, "gen_000003");
        assert_eq!(report.out_of_range_dishonesty, 2);
        assert_eq!(report.dishonesty_range(), Some((-0.1, 1.7)));
    }

    #[test]
    fn test_dishonesty_range_empty() {
        let report = GenerationReport::new(1, aggregates(0), Vec::new());
        assert!(report.dishonesty_range().is_none());
        assert!(report.dishonesty().is_empty());
    }

    #[test]
    fn test_report_serialization() {
        let agents = vec![AgentSnapshot::new(4, 2.5, 0.75).with_parent(1).with_conduct(0.5, 0.9)];
        let report = GenerationReport::new(2, aggregates(1), agents);

        let json = report.to_json().unwrap();
        assert!(json.contains("gen_000002"));
        assert!(json.contains("\"parent_id\":1"));

        let parsed = GenerationReport::from_json(&json).unwrap();
        assert_eq!(parsed, report);
        assert_eq!(parsed.find_agent(4).map(|a| a.capital), Some(0.75));
    }

    #[test]
    fn test_first_generation_omits_parent() {
        let json = serde_json::to_string(&AgentSnapshot::new(0, 3.0, 0.5)).unwrap();
        assert!(!json.contains("parent_id"));
    }
}
