use std::fmt;

/// Closed set of race answers classified as "Pretos e Pardos".
const PRETOS_E_PARDOS_RACES: [&str; 2] = ["Negro(a)", "Pardo(a)"];

/// The two-valued racial grouping derived from the race field.
///
/// This is the primary comparison axis for every cross-tabulation in the
/// report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RacialGroup {
    PretosEPardos,
    BrancosEOutros,
}

impl RacialGroup {
    /// Both groups, ascending by label ("Brancos e Outros" < "Pretos e
    /// Pardos"). Grouped output enumerates them in this order.
    pub const ALL: [RacialGroup; 2] = [RacialGroup::BrancosEOutros, RacialGroup::PretosEPardos];

    /// Classify a race answer.
    ///
    /// Total over all inputs: any value outside the closed "Pretos e Pardos"
    /// set, including free text and the empty string, classifies as
    /// "Brancos e Outros".
    pub fn from_race(value: &str) -> Self {
        if PRETOS_E_PARDOS_RACES.contains(&value) {
            RacialGroup::PretosEPardos
        } else {
            RacialGroup::BrancosEOutros
        }
    }

    /// Display label, also used as the derived column's value in counts.
    pub fn label(self) -> &'static str {
        match self {
            RacialGroup::PretosEPardos => "Pretos e Pardos",
            RacialGroup::BrancosEOutros => "Brancos e Outros",
        }
    }
}

impl fmt::Display for RacialGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
