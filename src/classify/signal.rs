use std::fmt;

/// WiFi signal category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalClass {
    Excellent,
    Good,
    Fair,
    Weak,
    None,
}

impl SignalClass {
    pub const ALL: [SignalClass; 5] = [
        SignalClass::Excellent,
        SignalClass::Good,
        SignalClass::Fair,
        SignalClass::Weak,
        SignalClass::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalClass::Excellent => "excellent",
            SignalClass::Good => "good",
            SignalClass::Fair => "fair",
            SignalClass::Weak => "weak",
            SignalClass::None => "none",
        }
    }

    /// Number of lit bars on a four-bar indicator.
    pub fn bars(&self) -> u8 {
        match self {
            SignalClass::Excellent => 4,
            SignalClass::Good => 3,
            SignalClass::Fair => 2,
            SignalClass::Weak => 1,
            SignalClass::None => 0,
        }
    }
}

impl fmt::Display for SignalClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a free-text signal strength.
///
/// Lower-cases the input and returns the first category whose name is a
/// substring, checked excellent, good, fair, weak. Anything else is
/// [`SignalClass::None`].
pub fn signal_class(raw: Option<&str>) -> SignalClass {
    let normalized = raw.unwrap_or_default().to_lowercase();
    [
        SignalClass::Excellent,
        SignalClass::Good,
        SignalClass::Fair,
        SignalClass::Weak,
    ]
    .into_iter()
    .find(|class| normalized.contains(class.as_str()))
    .unwrap_or(SignalClass::None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_categories() {
        assert_eq!(signal_class(Some("Excellent")), SignalClass::Excellent);
        assert_eq!(signal_class(Some("Good")), SignalClass::Good);
        assert_eq!(signal_class(Some("Fair")), SignalClass::Fair);
        assert_eq!(signal_class(Some("Weak")), SignalClass::Weak);
    }

    #[test]
    fn test_substring_and_case() {
        assert_eq!(signal_class(Some("Excellent-ish")), SignalClass::Excellent);
        assert_eq!(signal_class(Some("VERY GOOD")), SignalClass::Good);
        assert_eq!(signal_class(Some("signal: weak (-85dBm)")), SignalClass::Weak);
    }

    #[test]
    fn test_order_decides_ambiguous_input() {
        // "good" is checked before "fair"
        assert_eq!(signal_class(Some("fair to good")), SignalClass::Good);
        assert_eq!(signal_class(Some("weak but excellent")), SignalClass::Excellent);
    }

    #[test]
    fn test_absent_and_unmatched() {
        assert_eq!(signal_class(None), SignalClass::None);
        assert_eq!(signal_class(Some("")), SignalClass::None);
        assert_eq!(signal_class(Some("None")), SignalClass::None);
        assert_eq!(signal_class(Some("-67 dBm")), SignalClass::None);
    }

    #[test]
    fn test_total_over_odd_strings() {
        for raw in ["\u{0}", "ÉXCELLENT", "🛜", "   ", "goo", "excellen"] {
            let class = signal_class(Some(raw));
            assert!(SignalClass::ALL.contains(&class));
        }
    }

    #[test]
    fn test_bars() {
        assert_eq!(SignalClass::Excellent.bars(), 4);
        assert_eq!(SignalClass::Weak.bars(), 1);
        assert_eq!(SignalClass::None.bars(), 0);
    }
}
