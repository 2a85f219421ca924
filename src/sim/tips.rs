//! Rotating Bitcoin tips shown next to the board

/// Shown until the first rotation
pub const WELCOME_TIP: &str = "🎮 Welcome to SnakeSats! Learn Bitcoin while you play!";

pub const TIPS: [&str; 12] = [
    "💡 Stack sats regularly - consistency beats timing!",
    "🔒 Self-custody is key - not your keys, not your coins!",
    "📈 DCA (Dollar Cost Average) reduces emotional trading",
    "❄️ Cold storage keeps your Bitcoin safe from hackers",
    "🚫 Avoid FOMO - stick to your investment plan",
    "💰 Bitcoin is scarce - only 21 million will ever exist",
    "⚡ Lightning Network enables fast, cheap transactions",
    "🌍 Bitcoin is global money for the internet age",
    "🎯 Long-term thinking beats short-term speculation",
    "🔐 Hardware wallets provide maximum security",
    "📊 Market cycles are normal - stay the course",
    "🌱 Bitcoin is the future of money",
];

/// Delay after run start before the first tip
pub const TIP_DELAY_MS: u64 = 3_000;
/// Time between rotations
pub const TIP_INTERVAL_MS: u64 = 8_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipRotator {
    pub enabled: bool,
    /// Index of the tip shown, `None` while the welcome tip is up
    shown: Option<usize>,
    /// Index the next rotation shows
    next_index: usize,
    since_start_ms: u64,
    since_rotation_ms: Option<u64>,
}

impl TipRotator {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            shown: None,
            next_index: 0,
            since_start_ms: 0,
            since_rotation_ms: None,
        }
    }

    pub fn current(&self) -> &'static str {
        self.shown.map_or(WELCOME_TIP, |i| TIPS[i])
    }

    pub fn current_index(&self) -> Option<usize> {
        self.shown
    }

    /// Advance the rotation clock; returns the index of a newly shown tip
    pub fn advance(&mut self, dt_ms: u64) -> Option<usize> {
        self.since_start_ms = self.since_start_ms.saturating_add(dt_ms);
        if let Some(since) = self.since_rotation_ms.as_mut() {
            *since = since.saturating_add(dt_ms);
        }

        if !self.enabled || self.since_start_ms < TIP_DELAY_MS {
            return None;
        }
        let due = self
            .since_rotation_ms
            .is_none_or(|since| since >= TIP_INTERVAL_MS);
        if !due {
            return None;
        }

        let index = self.next_index;
        self.shown = Some(index);
        self.next_index = (index + 1) % TIPS.len();
        self.since_rotation_ms = Some(0);
        log::debug!("Tip rotated: {}", TIPS[index]);
        Some(index)
    }
}
