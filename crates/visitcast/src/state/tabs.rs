/// Tab identifiers for the TUI application.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabId {
    Predictor,
    GwrAnalysis,
    UrbanRural,
}

impl TabId {
    pub const ALL: [TabId; 3] = [TabId::Predictor, TabId::GwrAnalysis, TabId::UrbanRural];

    pub fn name(&self) -> &'static str {
        match self {
            TabId::Predictor => "Predictor",
            TabId::GwrAnalysis => "GWR Analysis",
            TabId::UrbanRural => "Urban vs Rural",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            TabId::Predictor => 0,
            TabId::GwrAnalysis => 1,
            TabId::UrbanRural => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Sub-views of the urban/rural comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RegionalTab {
    #[default]
    Overview,
    VisitPatterns,
    Coefficients,
    Performance,
}

impl RegionalTab {
    pub const ALL: [RegionalTab; 4] = [
        RegionalTab::Overview,
        RegionalTab::VisitPatterns,
        RegionalTab::Coefficients,
        RegionalTab::Performance,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RegionalTab::Overview => "Overview",
            RegionalTab::VisitPatterns => "Visit Patterns",
            RegionalTab::Coefficients => "Key Factors",
            RegionalTab::Performance => "Model Performance",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}
