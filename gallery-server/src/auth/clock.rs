//! 时间源
//!
//! 指纹时间和令牌 `iat` 都取自 [`Clock`]，测试可以固定或拨动时间。

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

/// 时钟，返回 Unix 秒
pub trait Clock: Send + Sync + fmt::Debug {
    fn now_secs(&self) -> i64;
}

/// 系统时钟
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// 手动时钟
#[derive(Debug)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(now_secs: i64) -> Self {
        Self {
            now: AtomicI64::new(now_secs),
        }
    }

    /// 从当前系统秒开始
    pub fn starting_now() -> Self {
        Self::new(SystemClock.now_secs())
    }

    pub fn set(&self, now_secs: i64) {
        self.now.store(now_secs, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: i64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(1_700_000_000);
        assert_eq!(clock.now_secs(), 1_700_000_000);
        clock.advance(5);
        assert_eq!(clock.now_secs(), 1_700_000_005);
        clock.set(42);
        assert_eq!(clock.now_secs(), 42);
    }
}
