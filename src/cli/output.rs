use chrono::{DateTime, Utc};
use console::style;
use serde::Serialize;

use crate::app::AppContext;
use crate::error::Result;

#[derive(Serialize)]
pub struct RobotResponse<T> {
    pub status: RobotStatus,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub command: String,
    pub data: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotStatus {
    Ok,
}

pub fn robot_ok<T: Serialize>(command: &str, data: T) -> RobotResponse<T> {
    RobotResponse {
        status: RobotStatus::Ok,
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        command: command.to_string(),
        data,
        warnings: Vec::new(),
    }
}

pub fn emit_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value)?;
    println!("{payload}");
    Ok(())
}

/// Robot mode prints the JSON envelope; human mode prints whatever `human`
/// lays out.
pub fn emit<T, F>(ctx: &AppContext, command: &str, data: &T, human: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&T, &mut HumanLayout),
{
    if ctx.robot_mode {
        return emit_json(&robot_ok(command, data));
    }
    let mut layout = HumanLayout::new();
    human(data, &mut layout);
    emit_human(layout);
    Ok(())
}

/// Shorthand for commands whose human output is a single value.
pub fn emit_value<T>(ctx: &AppContext, command: &str, data: &T) -> Result<()>
where
    T: Serialize + std::fmt::Display,
{
    emit(ctx, command, data, |value, layout| {
        layout.push_line(value.to_string());
    })
}

/// One line per item; `(none)` when empty.
pub fn emit_list<T>(ctx: &AppContext, command: &str, items: &[T]) -> Result<()>
where
    T: Serialize + std::fmt::Display,
{
    emit(ctx, command, &items, |items, layout| {
        if items.is_empty() {
            layout.push_line(style("(none)").dim().to_string());
        }
        for item in *items {
            layout.push_line(item.to_string());
        }
    })
}

pub struct HumanLayout {
    lines: Vec<String>,
    key_width: usize,
}

impl Default for HumanLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanLayout {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            key_width: 14,
        }
    }

    pub fn title(&mut self, text: &str) -> &mut Self {
        self.lines.push(style(text).bold().to_string());
        self.lines.push(String::new());
        self
    }

    pub fn section(&mut self, text: &str) -> &mut Self {
        self.lines.push(style(text).bold().to_string());
        self.lines.push("-".repeat(text.len().max(3)));
        self
    }

    pub fn kv(&mut self, key: &str, value: &str) -> &mut Self {
        let padded = format!("{key:width$}", width = self.key_width);
        self.lines.push(format!("{} {value}", style(padded).dim()));
        self
    }

    pub fn bullet(&mut self, text: &str) -> &mut Self {
        self.lines.push(format!("- {text}"));
        self
    }

    pub fn push_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    #[must_use]
    pub fn build(self) -> String {
        self.lines.join("\n")
    }
}

pub fn emit_human(layout: HumanLayout) {
    let text = layout.build();
    if !text.is_empty() {
        println!("{text}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_joins_lines() {
        console::set_colors_enabled(false);
        let mut layout = HumanLayout::new();
        layout.title("Report").kv("size", "1.0 KB").bullet("item");
        let text = layout.build();
        assert!(text.starts_with("Report\n\n"));
        assert!(text.contains("size           1.0 KB"));
        assert!(text.ends_with("- item"));
    }

    #[test]
    fn robot_envelope_shape() {
        let response = robot_ok("text slugify", "hello-world");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["command"], "text slugify");
        assert_eq!(value["data"], "hello-world");
        assert!(value.get("warnings").is_none());
    }
}
