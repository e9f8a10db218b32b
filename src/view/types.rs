#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    MarketCap,
    PercentChange,
}

impl SortField {
    pub fn label(self) -> &'static str {
        match self {
            SortField::MarketCap => "Market Cap",
            SortField::PercentChange => "24h %",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending { SortDirection::Ascending } else { SortDirection::Descending }
    }

    pub fn short(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

// Both flags start false, so the first toggle of either field sorts ascending
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    pub cap_ascending: bool,
    pub percent_ascending: bool,
}
