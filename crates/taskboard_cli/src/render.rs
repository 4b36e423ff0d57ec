//! Plain-text board rendering.

use chrono::{DateTime, NaiveDate};
use taskboard_core::{Column, Task, TaskId};

/// Characters of the id shown on cards; enough to type back as a prefix.
pub const SHORT_ID_LEN: usize = 8;

pub fn short_id(id: TaskId) -> String {
    id.simple().to_string()[..SHORT_ID_LEN].to_string()
}

/// Epoch milliseconds for midnight UTC of `date`.
pub fn date_to_epoch_ms(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc().timestamp_millis())
        .unwrap_or_default()
}

pub fn format_date(epoch_ms: i64) -> String {
    DateTime::from_timestamp_millis(epoch_ms)
        .map(|instant| instant.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| epoch_ms.to_string())
}

/// Renders all columns. `dragging` marks the held card.
pub fn render_board(columns: &[Column], dragging: Option<TaskId>, now_epoch_ms: i64) -> String {
    let mut out = String::new();
    for column in columns {
        out.push_str(&format!("== {} ({}) ==\n", column.title, column.count()));
        if column.is_empty() {
            out.push_str("   (empty)\n");
        }
        for task in &column.tasks {
            out.push_str(&render_card(task, dragging == Some(task.id), now_epoch_ms));
        }
        out.push('\n');
    }
    out
}

fn render_card(task: &Task, held: bool, now_epoch_ms: i64) -> String {
    let marker = if held { '*' } else { ' ' };
    let mut line = format!(" {marker} [{}] {}", short_id(task.id), task.title);
    if let Some(deadline) = task.deadline {
        let overdue = if task.is_overdue(now_epoch_ms) {
            ", overdue"
        } else {
            ""
        };
        line.push_str(&format!("  (due {}{overdue})", format_date(deadline)));
    }
    line.push('\n');
    if let Some(description) = &task.description {
        line.push_str(&format!("       {description}\n"));
    }
    line
}
