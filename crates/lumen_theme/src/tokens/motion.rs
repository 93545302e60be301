//! Animation tokens: durations and easing curves

token_set! {
    /// Animation durations in milliseconds
    DurationTokens / DurationOverrides: DurationToken => u32 {
        Instant => instant = "instant",
        Fast => fast = "fast",
        Normal => normal = "normal",
        Slow => slow = "slow",
    }
}

token_set! {
    /// CSS easing functions
    EasingTokens / EasingOverrides: EasingToken => String {
        Linear => linear = "linear",
        EaseIn => ease_in = "ease-in",
        EaseOut => ease_out = "ease-out",
        EaseInOut => ease_in_out = "ease-in-out",
    }
}

impl DurationTokens {
    /// All durations zeroed
    pub fn reduced() -> Self {
        Self {
            instant: 0,
            fast: 0,
            normal: 0,
            slow: 0,
        }
    }
}

impl EasingTokens {
    /// Every curve replaced with `linear`
    pub fn reduced() -> Self {
        let linear = || "linear".to_string();
        Self {
            linear: linear(),
            ease_in: linear(),
            ease_out: linear(),
            ease_in_out: linear(),
        }
    }
}

impl Default for DurationTokens {
    fn default() -> Self {
        Self {
            instant: 0,
            fast: 150,
            normal: 250,
            slow: 400,
        }
    }
}

impl Default for EasingTokens {
    fn default() -> Self {
        Self {
            linear: "linear".to_string(),
            ease_in: "cubic-bezier(0.4, 0, 1, 1)".to_string(),
            ease_out: "cubic-bezier(0, 0, 0.2, 1)".to_string(),
            ease_in_out: "cubic-bezier(0.4, 0, 0.2, 1)".to_string(),
        }
    }
}
