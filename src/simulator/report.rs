//! Simulation report generation.

use std::collections::BTreeMap;

use serde::Serialize;

use super::runner::RunStats;
use crate::character::CharacterClass;

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub class: CharacterClass,
    pub num_runs: u32,
    pub runs_survived: u32,

    // Aggregated stats
    pub avg_final_level: f64,
    pub avg_final_gold: f64,
    pub avg_kills: f64,
    pub avg_deaths: f64,
    pub avg_escapes: f64,
    pub avg_quests_completed: f64,
    pub avg_items_bought: f64,
    pub avg_potions_used: f64,

    // Distribution data
    pub level_distribution: BTreeMap<u32, u32>,

    // Individual run stats for detailed analysis
    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

fn average(runs: &[RunStats], field: impl Fn(&RunStats) -> u32) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(|r| f64::from(field(r))).sum::<f64>() / runs.len() as f64
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(class: CharacterClass, runs: Vec<RunStats>) -> Self {
        let mut level_distribution = BTreeMap::new();
        for run in &runs {
            *level_distribution.entry(run.final_level).or_insert(0) += 1;
        }

        Self {
            class,
            num_runs: runs.len() as u32,
            runs_survived: runs.iter().filter(|r| r.survived).count() as u32,
            avg_final_level: average(&runs, |r| r.final_level),
            avg_final_gold: average(&runs, |r| r.final_gold),
            avg_kills: average(&runs, |r| r.kills),
            avg_deaths: average(&runs, |r| r.deaths),
            avg_escapes: average(&runs, |r| r.escapes),
            avg_quests_completed: average(&runs, |r| r.quests_completed),
            avg_items_bought: average(&runs, |r| r.items_bought),
            avg_potions_used: average(&runs, |r| r.potions_used),
            level_distribution,
            run_stats: runs,
        }
    }

    pub fn survival_rate(&self) -> f64 {
        if self.num_runs == 0 {
            return 0.0;
        }
        f64::from(self.runs_survived) / f64::from(self.num_runs) * 100.0
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str(&format!("                    Class: {}\n", self.class));
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} survived ({:.1}%)\n\n",
            self.num_runs,
            self.runs_survived,
            self.survival_rate()
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Final Level:     {:.1}\n",
            self.avg_final_level
        ));
        report.push_str(&format!(
            "  Avg Final Gold:      {:.0}\n",
            self.avg_final_gold
        ));
        report.push_str(&format!(
            "  Avg Quests Done:     {:.1}\n\n",
            self.avg_quests_completed
        ));

        report.push_str("── COMBAT ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Kills:           {:.1}\n", self.avg_kills));
        report.push_str(&format!("  Avg Deaths:          {:.1}\n", self.avg_deaths));
        report.push_str(&format!("  Avg Escapes:         {:.1}\n\n", self.avg_escapes));

        report.push_str("── ECONOMY ──────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Items Bought:    {:.1}\n",
            self.avg_items_bought
        ));
        report.push_str(&format!(
            "  Avg Potions Used:    {:.1}\n\n",
            self.avg_potions_used
        ));

        report.push_str("── LEVEL DISTRIBUTION ───────────────────────────────────────────\n");
        for (level, count) in &self.level_distribution {
            let pct = (f64::from(*count) / f64::from(self.num_runs.max(1))) * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  Level {:3}: {:>5.1}% {}\n", level, pct, bar));
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let deaths_per_kill = if self.avg_kills > 0.0 {
            self.avg_deaths / self.avg_kills
        } else {
            0.0
        };
        let death_rating = if deaths_per_kill < 0.05 {
            "TOO EASY - Characters rarely die"
        } else if deaths_per_kill < 0.25 {
            "GOOD - Challenging but fair"
        } else if deaths_per_kill < 0.5 {
            "HARD - Frequent deaths"
        } else {
            "TOO HARD - Excessive deaths"
        };
        report.push_str(&format!("  Deaths per Kill: {:.3}\n", deaths_per_kill));
        report.push_str(&format!("  Death Rating:    {}\n", death_rating));

        if self.survival_rate() < 50.0 {
            report.push_str("  ⚠️  Most characters go broke - revive cost too high?\n");
        }
        if self.avg_final_level < 3.0 {
            report.push_str("  ⚠️  Characters stuck on goblins - early game too slow?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(final_level: u32, kills: u32, deaths: u32, survived: bool) -> RunStats {
        RunStats {
            final_level,
            final_gold: 100,
            battles_fought: kills + deaths,
            kills,
            deaths,
            survived,
            ..Default::default()
        }
    }

    #[test]
    fn test_report_generation() {
        let runs = vec![run(5, 40, 2, true), run(4, 30, 6, false)];

        let report = SimReport::from_runs(CharacterClass::Rogue, runs);
        assert_eq!(report.num_runs, 2);
        assert_eq!(report.runs_survived, 1);
        assert!((report.avg_final_level - 4.5).abs() < 0.01);
        assert!((report.avg_kills - 35.0).abs() < 0.01);
        assert_eq!(report.level_distribution.get(&5), Some(&1));
        assert!((report.survival_rate() - 50.0).abs() < 0.01);

        let text = report.to_text();
        assert!(text.contains("Class: Rogue"));
        assert!(text.contains("Level   4"));
    }

    #[test]
    fn test_json_omits_run_stats() {
        let report = SimReport::from_runs(CharacterClass::Mage, vec![run(2, 3, 0, true)]);
        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(json["num_runs"], 1);
        assert_eq!(json["class"], "Mage");
        assert!(json.get("run_stats").is_none());
    }

    #[test]
    fn test_empty_report() {
        let report = SimReport::from_runs(CharacterClass::Warrior, Vec::new());
        assert_eq!(report.avg_final_level, 0.0);
        assert_eq!(report.survival_rate(), 0.0);
    }
}
