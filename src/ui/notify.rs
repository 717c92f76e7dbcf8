use colored::*;
use std::time::{Duration, Instant};

const NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub level: Level,
    pub message: String,
    posted: Instant,
}

/// Transient notice stack. Notices print when pushed and age out of
/// `active_at` after five seconds, each on its own timer.
pub struct Notifications {
    ttl: Duration,
    items: Vec<Notice>,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifications {
    pub fn new() -> Self {
        Self {
            ttl: NOTICE_TTL,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, level: Level, message: impl Into<String>) {
        let message = message.into();
        let line = match level {
            Level::Success => format!("✅ {}", message).green().bold(),
            Level::Warning => format!("⚠️ {}", message).yellow().bold(),
            Level::Danger => format!("❌ {}", message).red().bold(),
        };
        println!("{}", line);
        self.items.push(Notice {
            level,
            message,
            posted: Instant::now(),
        });
    }

    /// Notices still alive at `now`; expired ones are pruned for good.
    pub fn active_at(&mut self, now: Instant) -> &[Notice] {
        let ttl = self.ttl;
        self.items
            .retain(|notice| now.duration_since(notice.posted) < ttl);
        &self.items
    }
}
