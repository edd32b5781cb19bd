use std::fmt;

/// Synodic age (days) at which each principal phase begins.
pub const AGE_NEW_MOON: f64 = 0.0;
pub const AGE_FIRST_QUARTER: f64 = 7.0;
pub const AGE_FULL_MOON: f64 = 14.0;
pub const AGE_LAST_QUARTER: f64 = 21.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseName {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl PhaseName {
    /// Buckets a synodic age into one of the eight named phases.
    ///
    /// The gibbous bucket after first quarter is open at 8, so an age of exactly
    /// 8 days matches no earlier rule and lands on `WaningCrescent`.
    pub fn classify(synodic_age: f64) -> Self {
        let age = synodic_age;
        if age >= AGE_NEW_MOON && age < AGE_NEW_MOON + 1.0 {
            PhaseName::NewMoon
        } else if age >= AGE_NEW_MOON + 1.0 && age < AGE_FIRST_QUARTER {
            PhaseName::WaxingCrescent
        } else if age >= AGE_FIRST_QUARTER && age < AGE_FIRST_QUARTER + 1.0 {
            PhaseName::FirstQuarter
        } else if age > AGE_FIRST_QUARTER + 1.0 && age < AGE_FULL_MOON {
            PhaseName::WaxingGibbous
        } else if age >= AGE_FULL_MOON && age < AGE_FULL_MOON + 1.0 {
            PhaseName::FullMoon
        } else if age >= AGE_FULL_MOON + 1.0 && age < AGE_LAST_QUARTER {
            PhaseName::WaningGibbous
        } else if age >= AGE_LAST_QUARTER && age < AGE_LAST_QUARTER + 1.0 {
            PhaseName::LastQuarter
        } else {
            PhaseName::WaningCrescent
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PhaseName::NewMoon => "New Moon",
            PhaseName::WaxingCrescent => "Waxing Crescent",
            PhaseName::FirstQuarter => "First Quarter",
            PhaseName::WaxingGibbous => "Waxing Gibbous",
            PhaseName::FullMoon => "Full Moon",
            PhaseName::WaningGibbous => "Waning Gibbous",
            PhaseName::LastQuarter => "Last Quarter",
            PhaseName::WaningCrescent => "Waning Crescent",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            PhaseName::NewMoon => "🌑",
            PhaseName::WaxingCrescent => "🌒",
            PhaseName::FirstQuarter => "🌓",
            PhaseName::WaxingGibbous => "🌔",
            PhaseName::FullMoon => "🌕",
            PhaseName::WaningGibbous => "🌖",
            PhaseName::LastQuarter => "🌗",
            PhaseName::WaningCrescent => "🌘",
        }
    }
}

impl fmt::Display for PhaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
