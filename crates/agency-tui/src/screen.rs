//! Screen identifiers, one per collection.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Blog,
    Portfolio,
    Services,
    Contacts,
    Applications,
}

impl ScreenId {
    /// Tab-bar order.
    pub const ALL: [ScreenId; 5] = [
        Self::Blog,
        Self::Portfolio,
        Self::Services,
        Self::Contacts,
        Self::Applications,
    ];

    /// Number key (1-5).
    pub fn number(self) -> u8 {
        match self {
            Self::Blog => 1,
            Self::Portfolio => 2,
            Self::Services => 3,
            Self::Contacts => 4,
            Self::Applications => 5,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.number() == n)
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Blog => "Blog",
            Self::Portfolio => "Portfolio",
            Self::Services => "Services",
            Self::Contacts => "Messages",
            Self::Applications => "Applications",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
