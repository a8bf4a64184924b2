use serde::{Serialize, Serializer};

/// Cosmetic progress label shown while a check is in flight.
///
/// The schedule is fixed client-side and says nothing about how far the
/// service actually got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum AnalysisStage {
    #[default]
    Idle,
    ExtractingKeywords,
    CheckingSources,
    Compiling,
    FinalVerdict,
}

impl AnalysisStage {
    /// Numeric form used by the dashboard: -1 for idle, 0..=3 otherwise.
    pub fn index(self) -> i8 {
        match self {
            AnalysisStage::Idle => -1,
            AnalysisStage::ExtractingKeywords => 0,
            AnalysisStage::CheckingSources => 1,
            AnalysisStage::Compiling => 2,
            AnalysisStage::FinalVerdict => 3,
        }
    }

    pub fn from_index(index: i8) -> Option<Self> {
        match index {
            -1 => Some(AnalysisStage::Idle),
            0 => Some(AnalysisStage::ExtractingKeywords),
            1 => Some(AnalysisStage::CheckingSources),
            2 => Some(AnalysisStage::Compiling),
            3 => Some(AnalysisStage::FinalVerdict),
            _ => None,
        }
    }

    pub fn label(self) -> Option<&'static str> {
        match self {
            AnalysisStage::Idle => None,
            AnalysisStage::ExtractingKeywords => Some("Extracting keywords"),
            AnalysisStage::CheckingSources => Some("Checking the most reliable sources"),
            AnalysisStage::Compiling => Some("Compiling results"),
            AnalysisStage::FinalVerdict => Some("Final verdict"),
        }
    }

    /// Stages the ticker moves through on its own, in order, after the
    /// initial one.
    pub fn ticked() -> [AnalysisStage; 2] {
        [AnalysisStage::CheckingSources, AnalysisStage::Compiling]
    }
}

impl Serialize for AnalysisStage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.index())
    }
}
