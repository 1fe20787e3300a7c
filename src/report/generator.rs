use crate::domain::{streak_badge, ScheduleFile, StreakData, Task};
use crate::persistence::{atomic_write, report_file};
use crate::report::stats::{
    calculate_duration_histogram, calculate_task_stats, format_minutes, PerformanceLevel,
};
use anyhow::Result;
use chrono::NaiveDate;
use std::path::PathBuf;

/// Everything a report is built from
pub struct ReportInput<'a> {
    pub date: NaiveDate,
    pub tasks: &'a [Task],
    pub streak: &'a StreakData,
    pub schedule: &'a ScheduleFile,
}

/// Render the analytics report as Markdown
pub fn render_report(input: &ReportInput) -> String {
    let stats = calculate_task_stats(input.tasks);
    let histogram = calculate_duration_histogram(input.tasks);
    let performance = PerformanceLevel::from_completion_rate(stats.completion_rate);

    let mut report = String::new();

    report.push_str(&format!("# Flowtime Report - {}\n\n", input.date));

    // Summary
    report.push_str("## Summary\n\n");
    report.push_str(&format!(
        "- **Tasks:** {} (Completed: {}, Pending: {})\n",
        stats.total, stats.completed, stats.pending
    ));
    report.push_str(&format!(
        "- **Completion Rate:** {}% ({})\n",
        stats.completion_rate,
        performance.label()
    ));
    report.push_str(&format!(
        "- **Planned Time:** {} ({} done, {} remaining)\n",
        format_minutes(stats.total_minutes),
        format_minutes(stats.completed_minutes),
        format_minutes(stats.remaining_minutes)
    ));
    report.push_str(&format!(
        "- **Time Completion:** {}%\n",
        stats.time_completion_rate
    ));
    report.push_str(&format!(
        "- **Average Task:** {}\n\n",
        format_minutes(stats.average_task_minutes)
    ));
    report.push_str(&format!("> {}\n\n", performance.message()));

    // Streak
    report.push_str("## Streak\n\n");
    report.push_str(&format!(
        "- **Current Streak:** {} days {}\n",
        input.streak.current_streak,
        streak_badge(input.streak.current_streak)
    ));
    report.push_str(&format!(
        "- **Longest Streak:** {} days\n",
        input.streak.longest_streak
    ));
    report.push_str(&format!("- **Active Days:** {}\n\n", input.streak.total_days));

    // Durations
    if stats.total > 0 {
        report.push_str("## Task Durations\n\n");
        for (label, count) in histogram.bins() {
            report.push_str(&format!("- **{}:** {}\n", label, count));
        }
        report.push('\n');
    }

    // Schedule
    if !input.schedule.is_empty() {
        report.push_str("## Schedule\n\n");
        let mut entries: Vec<_> = input.schedule.entries.iter().collect();
        entries.sort_by_key(|e| e.start_hour);
        for entry in entries {
            let mark = if entry.completed { "x" } else { " " };
            report.push_str(&format!(
                "- [{}] {:02}:00 **{}** ({})\n",
                mark,
                entry.start_hour,
                entry.task_title,
                format_minutes(entry.duration)
            ));
        }
        report.push_str(&format!(
            "\nScheduled: {}\n\n",
            format_minutes(input.schedule.total_scheduled_minutes())
        ));
    }

    // Tasks
    let (done, pending): (Vec<&Task>, Vec<&Task>) =
        input.tasks.iter().partition(|t| t.completed);

    if !pending.is_empty() || !done.is_empty() {
        report.push_str("## Tasks Breakdown\n\n");
    }

    if !pending.is_empty() {
        report.push_str("### Pending\n\n");
        for task in pending {
            push_task(&mut report, task);
        }
    }

    if !done.is_empty() {
        report.push_str("### Completed\n\n");
        for task in done {
            push_task(&mut report, task);
        }
    }

    report
}

fn push_task(report: &mut String, task: &Task) {
    let mark = if task.completed { "x" } else { " " };
    report.push_str(&format!(
        "- [{}] **{}** ({})\n",
        mark,
        task.title,
        format_minutes(task.time_in_minutes)
    ));
    if let Some(fp) = &task.first_principles {
        report.push_str(&format!("  - Approach: {}\n", fp));
    }
    if let Some(steps) = &task.steps {
        for (i, step) in steps.iter().enumerate() {
            report.push_str(&format!("  {}. {}\n", i + 1, step));
        }
    }
}

/// Render and write the report. Defaults to `report-YYYY-MM-DD.md` in the
/// data directory.
pub fn generate_report(input: &ReportInput, output_path: Option<PathBuf>) -> Result<PathBuf> {
    let output = match output_path {
        Some(path) => path,
        None => report_file(input.date)?,
    };

    atomic_write(&output, &render_report(input))?;
    tracing::info!(path = %output.display(), "report written");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> (Vec<Task>, ScheduleFile) {
        let mut done = Task::new("Write report", 90).unwrap();
        done.completed = true;
        let pending = Task::new("Review PR", 30)
            .unwrap()
            .with_analysis(Some("Read, comment".to_string()), Some(vec!["Read diff".to_string()]));
        let tasks = vec![done, pending];

        let mut schedule = ScheduleFile::default();
        schedule.schedule(&tasks, &tasks[1].id, 14).unwrap();
        (tasks, schedule)
    }

    #[test]
    fn test_render_contains_sections() {
        let (tasks, schedule) = sample();
        let streak = StreakData {
            current_streak: 3,
            longest_streak: 5,
            total_days: 8,
            ..Default::default()
        };
        let input = ReportInput {
            date: NaiveDate::from_ymd_opt(2026, 5, 4).unwrap(),
            tasks: &tasks,
            streak: &streak,
            schedule: &schedule,
        };

        let report = render_report(&input);
        assert!(report.starts_with("# Flowtime Report - 2026-05-04"));
        assert!(report.contains("- **Tasks:** 2 (Completed: 1, Pending: 1)"));
        assert!(report.contains("- **Completion Rate:** 50% (Fair)"));
        assert!(report.contains("- **Planned Time:** 2h 0m (1h 30m done, 30m remaining)"));
        assert!(report.contains("- **Current Streak:** 3 days"));
        assert!(report.contains("- [ ] 14:00 **Review PR** (30m)"));
        assert!(report.contains("  - Approach: Read, comment"));
        assert!(report.contains("  1. Read diff"));
        assert!(report.contains("- [x] **Write report** (1h 30m)"));
    }

    #[test]
    fn test_empty_report_has_no_breakdown() {
        let streak = StreakData::default();
        let schedule = ScheduleFile::default();
        let input = ReportInput {
            date: NaiveDate::from_ymd_opt(2026, 5, 4).unwrap(),
            tasks: &[],
            streak: &streak,
            schedule: &schedule,
        };

        let report = render_report(&input);
        assert!(report.contains("- **Completion Rate:** 0% (Needs Focus)"));
        assert!(!report.contains("## Tasks Breakdown"));
        assert!(!report.contains("## Schedule"));
    }

    #[test]
    fn test_generate_writes_to_output() {
        let dir = tempdir().unwrap();
        let (tasks, schedule) = sample();
        let streak = StreakData::default();
        let input = ReportInput {
            date: NaiveDate::from_ymd_opt(2026, 5, 4).unwrap(),
            tasks: &tasks,
            streak: &streak,
            schedule: &schedule,
        };

        let path = dir.path().join("out.md");
        let written = generate_report(&input, Some(path.clone())).unwrap();
        assert_eq!(written, path);
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("Write report"));
    }
}
