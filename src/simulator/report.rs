//! Simulation report generation.

use serde::Serialize;

/// Outcome of one autopilot run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunRecord {
    pub seed: Option<u64>,
    pub score: u32,
    pub ticks: u64,
    /// Still alive when the tick limit was hit.
    pub timed_out: bool,
}

/// Aggregated results from multiple runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_timed_out: u32,
    pub avg_score: f64,
    pub median_score: u32,
    pub max_score: u32,
    pub avg_ticks: f64,
    pub runs: Vec<RunRecord>,
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunRecord>) -> Self {
        let num_runs = runs.len() as u32;
        let runs_timed_out = runs.iter().filter(|r| r.timed_out).count() as u32;

        let (avg_score, avg_ticks) = if runs.is_empty() {
            (0.0, 0.0)
        } else {
            (
                runs.iter().map(|r| r.score as f64).sum::<f64>() / num_runs as f64,
                runs.iter().map(|r| r.ticks as f64).sum::<f64>() / num_runs as f64,
            )
        };

        let mut scores: Vec<u32> = runs.iter().map(|r| r.score).collect();
        scores.sort_unstable();
        let median_score = scores.get(scores.len() / 2).copied().unwrap_or(0);
        let max_score = scores.last().copied().unwrap_or(0);

        Self {
            num_runs,
            runs_timed_out,
            avg_score,
            median_score,
            max_score,
            avg_ticks,
            runs,
        }
    }

    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    AUTOPILOT REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} timed out\n\n",
            self.num_runs, self.runs_timed_out
        ));

        report.push_str("── SCORES ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Score:     {:.1}\n", self.avg_score));
        report.push_str(&format!("  Median Score:  {}\n", self.median_score));
        report.push_str(&format!("  Best Score:    {}\n", self.max_score));
        report.push_str(&format!("  Avg Ticks:     {:.0}\n", self.avg_ticks));

        report.push_str("\n── DISTRIBUTION ─────────────────────────────────────────────────\n");
        for (label, lo, hi) in [
            ("0", 0, 0),
            ("1-4", 1, 4),
            ("5-9", 5, 9),
            ("10-24", 10, 24),
            ("25-49", 25, 49),
            ("50+", 50, u32::MAX),
        ] {
            let count = self
                .runs
                .iter()
                .filter(|r| (lo..=hi).contains(&r.score))
                .count();
            report.push_str(&format!("  {:>6}  {:>5}\n", label, count));
        }

        report
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(score: u32, ticks: u64) -> RunRecord {
        RunRecord {
            seed: Some(0),
            score,
            ticks,
            timed_out: false,
        }
    }

    #[test]
    fn test_aggregates() {
        let report = SimReport::from_runs(vec![record(2, 100), record(8, 300), record(5, 200)]);
        assert_eq!(report.num_runs, 3);
        assert_eq!(report.max_score, 8);
        assert_eq!(report.median_score, 5);
        assert!((report.avg_score - 5.0).abs() < f64::EPSILON);
        assert!((report.avg_ticks - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_report() {
        let report = SimReport::from_runs(Vec::new());
        assert_eq!(report.num_runs, 0);
        assert_eq!(report.max_score, 0);
        assert_eq!(report.avg_score, 0.0);
    }

    #[test]
    fn test_text_and_json() {
        let report = SimReport::from_runs(vec![record(3, 10)]);
        let text = report.to_text();
        assert!(text.contains("Best Score:    3"));
        assert!(text.contains("   1-4      1"));

        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(json["max_score"], 3);
        assert_eq!(json["runs"][0]["ticks"], 10);
    }
}
