// src/fetch/throttle.rs
use std::collections::VecDeque;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

/// Shared request throttle: at most `capacity` acquisitions per sliding
/// `window`, blocking the calling worker until a slot frees up.
#[derive(Debug)]
pub struct Throttle {
    capacity: usize,
    window: Duration,
    recent: Mutex<VecDeque<Instant>>,
}

impl Throttle {
    #[must_use]
    pub fn new(capacity: usize, window: Duration) -> Self {
        Self {
            capacity: capacity.max(1),
            window,
            recent: Mutex::new(VecDeque::new()),
        }
    }

    /// Blocks until a request slot is available, then claims it.
    pub fn acquire(&self) {
        loop {
            let wait = {
                let mut recent = self.recent.lock().unwrap_or_else(|e| e.into_inner());
                let now = Instant::now();
                while let Some(front) = recent.front() {
                    if now.duration_since(*front) >= self.window {
                        recent.pop_front();
                    } else {
                        break;
                    }
                }
                if recent.len() < self.capacity {
                    recent.push_back(now);
                    return;
                }
                // Oldest in-window acquisition decides when the next slot opens.
                self.window.saturating_sub(now.duration_since(recent[0]))
            };
            thread::sleep(wait);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grants_capacity_without_blocking() {
        let throttle = Throttle::new(3, Duration::from_secs(60));
        let start = Instant::now();
        for _ in 0..3 {
            throttle.acquire();
        }
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn zero_capacity_is_clamped_to_one() {
        let throttle = Throttle::new(0, Duration::from_millis(10));
        throttle.acquire();
    }
}
