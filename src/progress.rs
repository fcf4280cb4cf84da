//! Completion progress math.
//!
//! Pure functions over a task collection: percentage complete, a
//! categorical color token for progress bars, a short label, and an
//! aggregate stats record. No storage access and no clock.

use serde::{Deserialize, Serialize};

use crate::models::Task;

/// Categorical color token for a progress value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressColor {
    Green,
    Yellow,
    Orange,
    Red,
}

impl ProgressColor {
    /// Fixed hex value used by rendering collaborators.
    pub fn hex(&self) -> &'static str {
        match self {
            ProgressColor::Green => "#4CAF50",
            ProgressColor::Yellow => "#FFC107",
            ProgressColor::Orange => "#FF9800",
            ProgressColor::Red => "#F44336",
        }
    }
}

/// Aggregate completion statistics for a task list.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionStats {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
    pub progress: f64,
    pub progress_text: &'static str,
    pub progress_color: ProgressColor,
}

/// Percentage of tasks completed, in `[0.0, 100.0]`.
///
/// The empty list is defined as 0.0, not an error.
pub fn calculate_progress(tasks: &[Task]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    let completed = tasks.iter().filter(|t| t.completed).count();
    completed as f64 / tasks.len() as f64 * 100.0
}

/// Color token for a progress percentage. Thresholds are inclusive lower
/// bounds: exactly 75 is green, exactly 50 is yellow, exactly 25 is orange.
pub fn progress_color(progress: f64) -> ProgressColor {
    if progress >= 75.0 {
        ProgressColor::Green
    } else if progress >= 50.0 {
        ProgressColor::Yellow
    } else if progress >= 25.0 {
        ProgressColor::Orange
    } else {
        ProgressColor::Red
    }
}

/// Short label for a progress percentage.
pub fn progress_text(progress: f64) -> &'static str {
    if progress == 100.0 {
        "Complete!"
    } else if progress >= 75.0 {
        "Almost there!"
    } else if progress >= 50.0 {
        "Halfway there!"
    } else if progress >= 25.0 {
        "On track!"
    } else if progress > 0.0 {
        "Just started!"
    } else {
        "Not started yet"
    }
}

/// All of the above in one record.
pub fn completion_stats(tasks: &[Task]) -> CompletionStats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    let progress = calculate_progress(tasks);

    CompletionStats {
        total,
        completed,
        remaining: total - completed,
        progress,
        progress_text: progress_text(progress),
        progress_color: progress_color(progress),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tasks_with(completed: usize, total: usize) -> Vec<Task> {
        (0..total)
            .map(|i| {
                let mut task = Task::new(1, format!("task {i}"));
                task.completed = i < completed;
                task
            })
            .collect()
    }

    #[test]
    fn test_empty_list_is_zero() {
        assert_eq!(calculate_progress(&[]), 0.0);
    }

    #[test]
    fn test_progress_is_completed_over_total() {
        assert_eq!(calculate_progress(&tasks_with(1, 4)), 25.0);
        assert_eq!(calculate_progress(&tasks_with(2, 4)), 50.0);
        assert_eq!(calculate_progress(&tasks_with(3, 3)), 100.0);
    }

    #[test]
    fn test_color_thresholds_inclusive() {
        assert_eq!(progress_color(100.0), ProgressColor::Green);
        assert_eq!(progress_color(75.0), ProgressColor::Green);
        assert_eq!(progress_color(74.9), ProgressColor::Yellow);
        assert_eq!(progress_color(50.0), ProgressColor::Yellow);
        assert_eq!(progress_color(49.9), ProgressColor::Orange);
        assert_eq!(progress_color(25.0), ProgressColor::Orange);
        assert_eq!(progress_color(24.9), ProgressColor::Red);
        assert_eq!(progress_color(0.0), ProgressColor::Red);
    }

    #[test]
    fn test_text_thresholds() {
        assert_eq!(progress_text(100.0), "Complete!");
        assert_eq!(progress_text(80.0), "Almost there!");
        assert_eq!(progress_text(75.0), "Almost there!");
        assert_eq!(progress_text(50.0), "Halfway there!");
        assert_eq!(progress_text(25.0), "On track!");
        assert_eq!(progress_text(10.0), "Just started!");
        assert_eq!(progress_text(0.0), "Not started yet");
    }

    #[test]
    fn test_stats_remaining_invariant() {
        for (done, total) in [(0, 0), (0, 5), (2, 5), (5, 5)] {
            let stats = completion_stats(&tasks_with(done, total));
            assert_eq!(stats.remaining, stats.total - stats.completed);
        }
    }

    #[test]
    fn test_stats_combines_fields() {
        let stats = completion_stats(&tasks_with(3, 4));
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 3);
        assert_eq!(stats.remaining, 1);
        assert_eq!(stats.progress, 75.0);
        assert_eq!(stats.progress_text, "Almost there!");
        assert_eq!(stats.progress_color, ProgressColor::Green);
        assert_eq!(stats.progress_color.hex(), "#4CAF50");
    }
}
