//! Spacing tokens (4px grid)

token_set! {
    /// Spacing scale in pixels
    SpacingTokens / SpacingOverrides: SpacingToken => f32 {
        Space0 => space_0 = "0",
        Space1 => space_1 = "1",
        Space2 => space_2 = "2",
        Space3 => space_3 = "3",
        Space4 => space_4 = "4",
        Space5 => space_5 = "5",
        Space6 => space_6 = "6",
        Space8 => space_8 = "8",
        Space10 => space_10 = "10",
        Space12 => space_12 = "12",
        Space16 => space_16 = "16",
    }
}

impl SpacingToken {
    /// Multiple of the base unit this step represents
    pub fn multiplier(self) -> f32 {
        match self {
            SpacingToken::Space0 => 0.0,
            SpacingToken::Space1 => 1.0,
            SpacingToken::Space2 => 2.0,
            SpacingToken::Space3 => 3.0,
            SpacingToken::Space4 => 4.0,
            SpacingToken::Space5 => 5.0,
            SpacingToken::Space6 => 6.0,
            SpacingToken::Space8 => 8.0,
            SpacingToken::Space10 => 10.0,
            SpacingToken::Space12 => 12.0,
            SpacingToken::Space16 => 16.0,
        }
    }
}

impl SpacingTokens {
    /// Build a full scale from a base unit
    pub fn from_base(unit: f32) -> Self {
        let mut tokens = Self::default();
        for token in SpacingToken::ALL {
            tokens.set(*token, unit * token.multiplier());
        }
        tokens
    }

    /// The base unit (the `1` step)
    pub fn unit(&self) -> f32 {
        self.space_1
    }
}

impl Default for SpacingTokens {
    fn default() -> Self {
        Self {
            space_0: 0.0,
            space_1: 4.0,
            space_2: 8.0,
            space_3: 12.0,
            space_4: 16.0,
            space_5: 20.0,
            space_6: 24.0,
            space_8: 32.0,
            space_10: 40.0,
            space_12: 48.0,
            space_16: 64.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scale_matches_four_pixel_grid() {
        assert_eq!(SpacingTokens::from_base(4.0), SpacingTokens::default());
    }

    #[test]
    fn keys_use_numeric_names() {
        assert_eq!(SpacingToken::Space12.name(), "12");
        assert_eq!(SpacingToken::from_name("8"), Some(SpacingToken::Space8));
    }
}
