// Console logging for drag handlers
//
// Pointer moves fire dozens of times per second during a drag. Logging each
// one floods the devtools console and the dev server log, so move tracing
// goes through a counter-based throttle instead of zoon::println! directly.

use std::cell::Cell;

use shared::LoggingSection;

/// What a throttled call should do with its message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Log,
    /// Last message of the window: announce suppression instead
    AnnounceSuppression,
    Suppress,
}

/// Pure throttle rule: within every `window` calls, let the first
/// `max_logs` through, announce suppression once, then stay quiet.
pub fn verdict(call_index: usize, max_logs: usize, window: usize) -> Verdict {
    let position = call_index % window.max(1);
    if position < max_logs {
        Verdict::Log
    } else if position == max_logs {
        Verdict::AnnounceSuppression
    } else {
        Verdict::Suppress
    }
}

/// Per-widget throttle (no time dependency, the counter wraps per window)
#[derive(Debug)]
pub struct Throttle {
    calls: Cell<usize>,
    max_logs: usize,
    window: usize,
}

impl Throttle {
    pub fn new(max_logs: usize, window: usize) -> Self {
        Self {
            calls: Cell::new(0),
            max_logs,
            window: window.max(1),
        }
    }

    pub fn from_config(config: &LoggingSection) -> Self {
        Self::new(config.max_logs_per_window, config.log_window)
    }

    /// Advances the counter and returns what to do with this call
    pub fn next_verdict(&self) -> Verdict {
        let index = self.calls.get();
        self.calls.set((index + 1) % self.window);
        verdict(index, self.max_logs, self.window)
    }

    pub fn log(&self, message: &str) {
        match self.next_verdict() {
            Verdict::Log => zoon::println!("[THROTTLED] {}", message),
            Verdict::AnnounceSuppression => {
                zoon::println!("[THROTTLED] Log rate limit reached, suppressing further messages...")
            }
            Verdict::Suppress => {}
        }
    }
}

pub fn log_info(message: &str) {
    zoon::println!("[ghostdrag] {}", message);
}

/// Always printed; errors from event handlers that cannot propagate
pub fn log_critical(message: &str) {
    zoon::eprintln!("[CRITICAL] {}", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_calls_of_each_window_are_logged() {
        let verdicts: Vec<Verdict> = (0..8).map(|i| verdict(i, 2, 4)).collect();
        assert_eq!(
            verdicts,
            vec![
                Verdict::Log,
                Verdict::Log,
                Verdict::AnnounceSuppression,
                Verdict::Suppress,
                Verdict::Log,
                Verdict::Log,
                Verdict::AnnounceSuppression,
                Verdict::Suppress,
            ]
        );
    }

    #[test]
    fn budget_covering_window_never_suppresses() {
        assert!((0..20).all(|i| verdict(i, 10, 10) == Verdict::Log));
    }

    #[test]
    fn throttle_counter_wraps_per_window() {
        let throttle = Throttle::new(5, 100);
        let verdicts: Vec<Verdict> = (0..205).map(|_| throttle.next_verdict()).collect();

        let logged = verdicts.iter().filter(|v| **v == Verdict::Log).count();
        let announced = verdicts.iter().filter(|v| **v == Verdict::AnnounceSuppression).count();
        assert_eq!(logged, 15);
        assert_eq!(announced, 2);
    }

    #[test]
    fn default_config_matches_five_per_hundred() {
        let throttle = Throttle::from_config(&LoggingSection::default());
        for _ in 0..5 {
            assert_eq!(throttle.next_verdict(), Verdict::Log);
        }
        assert_eq!(throttle.next_verdict(), Verdict::AnnounceSuppression);
        assert_eq!(throttle.next_verdict(), Verdict::Suppress);
    }
}
