//! Dashboard dataset and the built-in sample data.

use serde::{Deserialize, Serialize};

/// Weekly AI code generation trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiGeneration {
    pub labels: Vec<String>,
    pub lines_generated: Vec<f64>,
    pub acceptance_rate: Vec<f64>,
    pub suggestions: Vec<f64>,
}

/// DORA delivery metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoraMetrics {
    /// Deployments per week.
    pub deployment_frequency: f64,
    /// Lead time for changes, in days.
    pub lead_time_days: f64,
    /// Mean time to recovery, in hours.
    pub mttr_hours: f64,
    /// Change failure rate, in percent.
    pub change_failure_pct: f64,
}

/// Pull request activity per weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrPerformance {
    pub labels: Vec<String>,
    pub created: Vec<f64>,
    pub merged: Vec<f64>,
    /// Average review time in hours.
    pub avg_review_time: Vec<f64>,
}

/// Per-team AI adoption and productivity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamProductivity {
    pub teams: Vec<String>,
    pub ai_adoption: Vec<f64>,
    pub productivity: Vec<f64>,
    pub code_generation: Vec<f64>,
}

/// Code quality before and after AI adoption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeQuality {
    pub labels: Vec<String>,
    pub bug_density: Vec<f64>,
    pub code_reviews: Vec<f64>,
    pub test_coverage: Vec<f64>,
}

/// Share of AI usage by activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsagePatterns {
    pub labels: Vec<String>,
    pub shares: Vec<f64>,
}

/// Performance scoring band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Score {
    High,
    Medium,
    Low,
}

impl Score {
    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Individual developer statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Developer {
    pub name: String,
    pub ai_lines: u64,
    pub acceptance: u32,
    pub prs: u32,
    pub cycle_time: String,
    pub score: Score,
}

/// Per-project delivery statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub adoption: u32,
    pub coverage: u32,
    pub bug_density: f64,
    pub deploy_freq: String,
    pub lead_time: String,
}

/// Everything the dashboard renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub ai_generation: AiGeneration,
    pub dora: DoraMetrics,
    pub pr_performance: PrPerformance,
    pub team_productivity: TeamProductivity,
    pub code_quality: CodeQuality,
    pub usage_patterns: UsagePatterns,
    pub developers: Vec<Developer>,
    pub projects: Vec<Project>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn developer(
    name: &str,
    ai_lines: u64,
    acceptance: u32,
    prs: u32,
    cycle_time: &str,
    score: Score,
) -> Developer {
    Developer {
        name: name.to_string(),
        ai_lines,
        acceptance,
        prs,
        cycle_time: cycle_time.to_string(),
        score,
    }
}

fn project(
    name: &str,
    adoption: u32,
    coverage: u32,
    bug_density: f64,
    deploy_freq: &str,
    lead_time: &str,
) -> Project {
    Project {
        name: name.to_string(),
        adoption,
        coverage,
        bug_density,
        deploy_freq: deploy_freq.to_string(),
        lead_time: lead_time.to_string(),
    }
}

impl Dataset {
    /// The built-in sample dataset.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            ai_generation: AiGeneration {
                labels: strings(&["Week 1", "Week 2", "Week 3", "Week 4", "Week 5", "Week 6"]),
                lines_generated: vec![1200.0, 1850.0, 2100.0, 2450.0, 2800.0, 3200.0],
                acceptance_rate: vec![68.0, 71.0, 73.0, 75.0, 78.0, 73.0],
                suggestions: vec![2400.0, 3100.0, 3800.0, 4200.0, 4600.0, 5100.0],
            },
            dora: DoraMetrics {
                deployment_frequency: 12.5,
                lead_time_days: 2.3,
                mttr_hours: 0.8,
                change_failure_pct: 5.2,
            },
            pr_performance: PrPerformance {
                labels: strings(&["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]),
                created: vec![12.0, 15.0, 18.0, 22.0, 19.0, 8.0, 4.0],
                merged: vec![8.0, 12.0, 14.0, 18.0, 16.0, 6.0, 3.0],
                avg_review_time: vec![4.2, 3.8, 4.5, 5.1, 4.7, 3.2, 2.8],
            },
            team_productivity: TeamProductivity {
                teams: strings(&["Frontend", "Backend", "Mobile", "DevOps"]),
                ai_adoption: vec![85.0, 92.0, 76.0, 68.0],
                productivity: vec![2.4, 2.8, 2.1, 1.9],
                code_generation: vec![3200.0, 4100.0, 2800.0, 1900.0],
            },
            code_quality: CodeQuality {
                labels: strings(&["Pre-AI", "Post-AI"]),
                bug_density: vec![12.5, 7.8],
                code_reviews: vec![5.2, 3.8],
                test_coverage: vec![78.0, 87.0],
            },
            usage_patterns: UsagePatterns {
                labels: strings(&[
                    "Code Generation",
                    "Code Completion",
                    "Documentation",
                    "Testing",
                    "Refactoring",
                ]),
                shares: vec![35.0, 28.0, 15.0, 12.0, 10.0],
            },
            developers: vec![
                developer("Sarah Chen", 4200, 82, 24, "3.2h", Score::High),
                developer("Mike Rodriguez", 3800, 79, 21, "3.8h", Score::High),
                developer("Alex Kim", 3500, 75, 19, "4.1h", Score::Medium),
                developer("Emma Wilson", 3200, 77, 18, "3.9h", Score::Medium),
                developer("David Brown", 2900, 71, 16, "4.5h", Score::Medium),
            ],
            projects: vec![
                project("E-commerce Platform", 89, 92, 6.2, "2.3/week", "1.8d"),
                project("Mobile App", 76, 84, 8.9, "1.8/week", "2.4d"),
                project("API Gateway", 94, 96, 4.1, "3.1/week", "1.2d"),
                project("Analytics Dashboard", 82, 88, 7.5, "2.0/week", "2.1d"),
            ],
        }
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::sample()
    }
}
