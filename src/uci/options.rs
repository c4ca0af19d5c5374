//! UCI `option` declarations and `setoption` parsing.

use crate::transposition_table::DEFAULT_TT_MB;

fn print_spin(name: &str, default: impl std::fmt::Display, min: impl std::fmt::Display, max: impl std::fmt::Display) {
    println!("option name {name} type spin default {default} min {min} max {max}");
}

pub enum UciOptionAction {
    ReinitHash(usize),
}

pub struct UciOptions {
    pub hash_mb: usize,
    pub move_overhead_ms: u64,
    pub soft_time_percent: u64,
    pub hard_time_percent: u64,
    pub default_max_nodes: u64,
}

impl UciOptions {
    #[must_use]
    pub fn new() -> UciOptions {
        UciOptions {
            hash_mb: DEFAULT_TT_MB,
            move_overhead_ms: 50,
            soft_time_percent: 70,
            hard_time_percent: 90,
            default_max_nodes: 0,
        }
    }

    pub fn print(&self) {
        println!("id name chess_engine");
        println!("id author a student of the craft");
        print_spin("Hash", self.hash_mb, 1, 1024);
        print_spin("Move Overhead", self.move_overhead_ms, 0, 1000);
        print_spin("Soft Time Percent", self.soft_time_percent, 1, 100);
        print_spin("Hard Time Percent", self.hard_time_percent, 1, 100);
        print_spin("Max Nodes", self.default_max_nodes, 0_u64, u64::MAX);
        println!("uciok");
    }

    pub fn apply_setoption(&mut self, name: &str, value: Option<&str>) -> Option<UciOptionAction> {
        let normalized = name.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "hash" => {
                let mb = value.and_then(|v| v.parse::<usize>().ok()).unwrap_or(DEFAULT_TT_MB).max(1);
                if mb != self.hash_mb {
                    self.hash_mb = mb;
                    return Some(UciOptionAction::ReinitHash(mb));
                }
            }
            "move overhead" => {
                if let Some(v) = value.and_then(|v| v.parse::<u64>().ok()) {
                    self.move_overhead_ms = v;
                }
            }
            "soft time percent" => {
                if let Some(v) = value.and_then(|v| v.parse::<u64>().ok()) {
                    self.soft_time_percent = v.clamp(1, 100);
                }
            }
            "hard time percent" => {
                if let Some(v) = value.and_then(|v| v.parse::<u64>().ok()) {
                    self.hard_time_percent = v.clamp(1, 100);
                }
            }
            "max nodes" => {
                if let Some(v) = value.and_then(|v| v.parse::<u64>().ok()) {
                    self.default_max_nodes = v;
                }
            }
            _ => {}
        }
        None
    }

    #[must_use]
    pub fn time_config(&self) -> crate::engine::time::TimeConfig {
        crate::engine::time::TimeConfig {
            move_overhead_ms: self.move_overhead_ms,
            soft_time_percent: self.soft_time_percent,
            hard_time_percent: self.hard_time_percent,
            default_max_nodes: self.default_max_nodes,
        }
    }
}

impl Default for UciOptions {
    fn default() -> Self {
        UciOptions::new()
    }
}

#[must_use]
pub fn parse_setoption(parts: &[&str]) -> Option<(String, Option<String>)> {
    if parts.is_empty() || parts[0] != "setoption" {
        return None;
    }
    let mut name_parts: Vec<&str> = Vec::new();
    let mut value_parts: Vec<&str> = Vec::new();
    let mut mode = "";
    for part in parts.iter().skip(1) {
        match *part {
            "name" => mode = "name",
            "value" => mode = "value",
            _ => match mode {
                "name" => name_parts.push(part),
                "value" => value_parts.push(part),
                _ => {}
            },
        }
    }
    if name_parts.is_empty() {
        return None;
    }
    let name = name_parts.join(" ");
    let value = if value_parts.is_empty() { None } else { Some(value_parts.join(" ")) };
    Some((name, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hash_setoption() {
        let parts: Vec<&str> = "setoption name Hash value 128".split_whitespace().collect();
        let (name, value) = parse_setoption(&parts).unwrap();
        assert_eq!(name, "Hash");
        assert_eq!(value.as_deref(), Some("128"));
    }

    #[test]
    fn applies_hash_resize_action() {
        let mut options = UciOptions::new();
        let action = options.apply_setoption("Hash", Some("128"));
        assert!(matches!(action, Some(UciOptionAction::ReinitHash(128))));
        assert_eq!(options.hash_mb, 128);
    }
}
