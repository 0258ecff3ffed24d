use std::fmt;

/// Lookback period selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    OneHour,
    SixHours,
    TwelveHours,
    #[default]
    Day,
}

impl Period {
    /// Look up a period label. Unknown labels fall back to a full day.
    pub fn from_label(label: &str) -> Self {
        match label {
            "1H" => Period::OneHour,
            "6H" => Period::SixHours,
            "12H" => Period::TwelveHours,
            "24H" => Period::Day,
            other => {
                tracing::debug!(label = %other, "Unrecognized period, using 24H");
                Period::Day
            }
        }
    }

    pub fn as_secs(&self) -> u64 {
        match self {
            Period::OneHour => 3_600,
            Period::SixHours => 21_600,
            Period::TwelveHours => 43_200,
            Period::Day => 86_400,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::OneHour => "1H",
            Period::SixHours => "6H",
            Period::TwelveHours => "12H",
            Period::Day => "24H",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels() {
        assert_eq!(Period::from_label("1H").as_secs(), 3_600);
        assert_eq!(Period::from_label("6H").as_secs(), 21_600);
        assert_eq!(Period::from_label("12H").as_secs(), 43_200);
        assert_eq!(Period::from_label("24H").as_secs(), 86_400);
    }

    #[test]
    fn test_unknown_label_is_a_day() {
        assert_eq!(Period::from_label("99X"), Period::Day);
        assert_eq!(Period::from_label(""), Period::Day);
        // lookup is exact
        assert_eq!(Period::from_label("1h"), Period::Day);
    }

    #[test]
    fn test_label_round_trips() {
        for period in [Period::OneHour, Period::SixHours, Period::TwelveHours, Period::Day] {
            assert_eq!(Period::from_label(period.label()), period);
        }
    }
}
