use std::collections::VecDeque;

use liftrank_app::log;

pub fn view(entries: &VecDeque<log::Entry>) -> String {
    if entries.is_empty() {
        return "No log entries".to_string();
    }

    entries
        .iter()
        .map(|e| format!("{}  {:<5}  {}", e.time, e.level, e.message))
        .collect::<Vec<_>>()
        .join("\n")
}
