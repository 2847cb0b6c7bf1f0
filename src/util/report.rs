use std::collections::BTreeMap;
use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::Submission;
use crate::util::levels::LEVEL_COUNT;
use crate::util::rank::rank_teams;
use crate::util::stat::{
    aggregate_teams, countable_submissions, overall_average_rating, TeamStats,
};
use crate::util::teams::{branch_category, team_branch, team_name, BranchCategory};

const TOP_PERFORMERS: usize = 10;

/// One team's aggregate joined with the directory, in leaderboard order.
#[derive(Debug, Clone, Serialize)]
pub struct TeamAnalytics {
    pub team_id: String,
    pub team_name: String,
    pub branch: &'static str,
    pub branch_category: BranchCategory,
    pub max_level: i32,
    pub submission_count: u32,
    pub average_rating: f64,
    pub time_to_complete_minutes: i64,
}

impl TeamAnalytics {
    fn from_stats(stats: &TeamStats) -> Self {
        let branch = team_branch(&stats.team_id);
        Self {
            team_id: stats.team_id.clone(),
            team_name: team_name(&stats.team_id),
            branch,
            branch_category: branch_category(branch),
            max_level: stats.max_level,
            submission_count: stats.submission_count,
            average_rating: stats.average_rating,
            time_to_complete_minutes: stats.time_to_complete_minutes(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BranchStats {
    pub branch: &'static str,
    pub teams: u32,
    pub average_level: f64,
    pub total_submissions: u32,
    pub category: BranchCategory,
}

/// Teams that reached at least this level, with a per-branch breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct LevelDistribution {
    pub level: i32,
    pub teams: i64,
    pub completion_rate: f64,
    pub branches: BTreeMap<&'static str, i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventOverview {
    pub total_teams: usize,
    pub total_submissions: usize,
    pub highest_level: i32,
    pub branch_count: usize,
    pub average_rating: f64,
}

#[derive(Debug, Serialize)]
pub struct EventSummary {
    pub overview: EventOverview,
    pub teams: Vec<TeamAnalytics>,
    pub branches: Vec<BranchStats>,
    pub levels: Vec<LevelDistribution>,
}

pub fn build_event_summary(submissions: &[Submission]) -> EventSummary {
    let ranked = rank_teams(aggregate_teams(submissions));
    let teams: Vec<TeamAnalytics> = ranked.iter().map(TeamAnalytics::from_stats).collect();
    let branches = branch_stats(&teams);
    let levels = level_distribution(&teams);

    let overview = EventOverview {
        total_teams: teams.len(),
        total_submissions: countable_submissions(submissions),
        highest_level: teams.iter().map(|t| t.max_level).max().unwrap_or(0),
        branch_count: branches.len(),
        average_rating: overall_average_rating(submissions),
    };

    EventSummary {
        overview,
        teams,
        branches,
        levels,
    }
}

fn branch_stats(teams: &[TeamAnalytics]) -> Vec<BranchStats> {
    struct Acc {
        teams: u32,
        level_sum: i64,
        total_submissions: u32,
        category: BranchCategory,
    }

    let mut by_branch: BTreeMap<&'static str, Acc> = BTreeMap::new();
    for team in teams {
        let acc = by_branch.entry(team.branch).or_insert(Acc {
            teams: 0,
            level_sum: 0,
            total_submissions: 0,
            category: team.branch_category,
        });
        acc.teams += 1;
        acc.level_sum += team.max_level as i64;
        acc.total_submissions += team.submission_count;
    }

    by_branch
        .into_iter()
        .map(|(branch, acc)| BranchStats {
            branch,
            teams: acc.teams,
            average_level: if acc.teams == 0 {
                0.0
            } else {
                acc.level_sum as f64 / acc.teams as f64
            },
            total_submissions: acc.total_submissions,
            category: acc.category,
        })
        .collect()
}

fn level_distribution(teams: &[TeamAnalytics]) -> Vec<LevelDistribution> {
    let total = teams.len();
    (1..=LEVEL_COUNT)
        .map(|level| {
            let mut branches: BTreeMap<&'static str, i64> = BTreeMap::new();
            let mut reached = 0i64;
            for team in teams {
                if team.max_level >= level {
                    reached += 1;
                    *branches.entry(team.branch).or_insert(0) += 1;
                }
            }
            let completion_rate = if total == 0 {
                0.0
            } else {
                reached as f64 / total as f64 * 100.0
            };
            LevelDistribution {
                level,
                teams: reached,
                completion_rate,
                branches,
            }
        })
        .collect()
}

fn category_css_class(category: BranchCategory) -> String {
    format!(
        "branch-{}",
        category.to_string().to_lowercase().replace(' ', "-")
    )
}

/// Renders the downloadable event-summary document. Self-contained HTML in
/// the event's terminal styling, suitable for printing.
pub fn render_html_report(summary: &EventSummary, generated_at: DateTime<Utc>) -> String {
    let mut html = String::new();

    html.push_str(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Treasure in the Shell - Event Summary Report</title>
    <style>
        body { font-family: 'Courier New', monospace; margin: 20px; background: #0a0a0a; color: #00ff00; }
        .header { text-align: center; border-bottom: 2px solid #00ff00; padding-bottom: 20px; margin-bottom: 30px; }
        .section { margin-bottom: 30px; }
        .stats-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 20px; }
        .stat-card { border: 1px solid #00ff00; padding: 15px; text-align: center; }
        table { width: 100%; border-collapse: collapse; margin-top: 10px; }
        th, td { border: 1px solid #00ff00; padding: 8px; text-align: left; }
        th { background-color: #003300; }
        .top-team { background-color: #001a00; }
        .branch-computer-science { color: #ffd700; }
        .branch-information-technology { color: #4ecdc4; }
        .branch-electronics { color: #ff6b6b; }
        .branch-mixed { color: #e91e63; }
    </style>
</head>
<body>
"#,
    );

    let _ = write!(
        html,
        r#"    <div class="header">
        <h1>TREASURE IN THE SHELL</h1>
        <h2>Event Summary Report</h2>
        <p>Google Developer Groups - IET DAVV</p>
        <p>Generated on: {}</p>
    </div>
"#,
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    let overview = &summary.overview;
    let _ = write!(
        html,
        r#"    <div class="section">
        <h2>Event Overview</h2>
        <div class="stats-grid">
            <div class="stat-card"><h3>{}</h3><p>Total Teams Participated</p></div>
            <div class="stat-card"><h3>{}</h3><p>Total Submissions</p></div>
            <div class="stat-card"><h3>{}</h3><p>Highest Level Reached</p></div>
            <div class="stat-card"><h3>{}</h3><p>Different Branches</p></div>
        </div>
    </div>
"#,
        overview.total_teams,
        overview.total_submissions,
        overview.highest_level,
        overview.branch_count
    );

    html.push_str(
        r#"    <div class="section">
        <h2>Top 10 Performers</h2>
        <table>
            <tr><th>Rank</th><th>Team</th><th>Branch</th><th>Max Level</th><th>Submissions</th><th>Avg Rating</th></tr>
"#,
    );
    for (index, team) in summary.teams.iter().take(TOP_PERFORMERS).enumerate() {
        let row_class = if index < 3 { " class=\"top-team\"" } else { "" };
        let _ = write!(
            html,
            "            <tr{}><td>{}</td><td>{} - {}</td><td class=\"{}\">{}</td><td>{}</td><td>{}</td><td>{:.1}/5</td></tr>\n",
            row_class,
            index + 1,
            escape_html(&team.team_id),
            escape_html(&team.team_name),
            category_css_class(team.branch_category),
            escape_html(team.branch),
            team.max_level,
            team.submission_count,
            team.average_rating
        );
    }
    html.push_str("        </table>\n    </div>\n");

    html.push_str(
        r#"    <div class="section">
        <h2>Branch-wise Performance</h2>
        <table>
            <tr><th>Branch</th><th>Teams</th><th>Avg Level</th><th>Total Submissions</th><th>Category</th></tr>
"#,
    );
    for branch in &summary.branches {
        let _ = write!(
            html,
            "            <tr><td>{}</td><td>{}</td><td>{:.1}</td><td>{}</td><td class=\"{}\">{}</td></tr>\n",
            escape_html(branch.branch),
            branch.teams,
            branch.average_level,
            branch.total_submissions,
            category_css_class(branch.category),
            branch.category
        );
    }
    html.push_str("        </table>\n    </div>\n");

    html.push_str(
        r#"    <div class="section">
        <h2>Level Progression</h2>
        <table>
            <tr><th>Level</th><th>Teams Reached</th><th>Completion Rate</th></tr>
"#,
    );
    for level in &summary.levels {
        let _ = write!(
            html,
            "            <tr><td>Level {}</td><td>{}</td><td>{:.1}%</td></tr>\n",
            level.level, level.teams, level.completion_rate
        );
    }
    html.push_str("        </table>\n    </div>\n");

    let _ = write!(
        html,
        r#"    <div class="section">
        <h2>Event Conclusion</h2>
        <p>The "Treasure in the Shell" event hosted {} teams across multiple engineering branches, with {} submissions recorded and teams progressing up to level {}.</p>
    </div>
    <footer style="text-align: center; margin-top: 50px; padding-top: 20px; border-top: 1px solid #00ff00;">
        <p>Generated by the Treasure in the Shell event system</p>
    </footer>
</body>
</html>
"#,
        overview.total_teams,
        overview.total_submissions,
        overview.highest_level
    );

    html
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::stat::tests::submission;
    use chrono::TimeZone;

    #[test]
    fn empty_event_produces_finite_numbers() {
        let summary = build_event_summary(&[]);
        assert_eq!(summary.overview.total_teams, 0);
        assert_eq!(summary.overview.highest_level, 0);
        assert_eq!(summary.overview.average_rating, 0.0);
        for level in &summary.levels {
            assert!(level.completion_rate.is_finite());
            assert_eq!(level.completion_rate, 0.0);
        }
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("NaN"));
    }

    #[test]
    fn branch_statistics_average_max_levels() {
        let subs = vec![
            submission(1, "101", 4, 3, 100), // IT B
            submission(2, "136", 8, 3, 200), // IT B
            submission(3, "109", 5, 3, 300), // CS A
        ];
        let summary = build_event_summary(&subs);
        let it_b = summary
            .branches
            .iter()
            .find(|b| b.branch == "IT B")
            .unwrap();
        assert_eq!(it_b.teams, 2);
        assert!((it_b.average_level - 6.0).abs() < 1e-9);
        assert_eq!(it_b.category, BranchCategory::InformationTechnology);
    }

    #[test]
    fn level_distribution_counts_teams_reached() {
        let subs = vec![
            submission(1, "101", 4, 3, 100),
            submission(2, "102", 8, 3, 200),
        ];
        let summary = build_event_summary(&subs);
        assert_eq!(summary.levels[0].teams, 2); // level 1
        assert_eq!(summary.levels[3].teams, 2); // level 4
        assert_eq!(summary.levels[7].teams, 1); // level 8
        assert!((summary.levels[7].completion_rate - 50.0).abs() < 1e-9);
    }

    #[test]
    fn teams_are_listed_in_leaderboard_order() {
        let subs = vec![
            submission(1, "101", 4, 3, 100),
            submission(2, "102", 8, 3, 200),
        ];
        let summary = build_event_summary(&subs);
        assert_eq!(summary.teams[0].team_id, "102");
        assert_eq!(summary.teams[0].team_name, "Brogrammers");
    }

    #[test]
    fn report_renders_without_nan_and_escapes_markup() {
        let mut subs = vec![submission(1, "101", 4, 3, 100)];
        subs.push(Submission {
            team_id: "<script>".to_string(),
            ..submission(2, "x", 2, 3, 200)
        });
        let summary = build_event_summary(&subs);
        let html = render_html_report(&summary, Utc.timestamp_opt(1_754_000_000, 0).unwrap());
        assert!(html.contains("Sparkle"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("NaN"));
        assert!(!html.contains("<script>"));
    }
}
