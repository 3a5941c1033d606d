//! Platform table: which sites are searched for each audience and how much each is trusted.

use serde::{Deserialize, Serialize};

/// Score boost for platforms missing from the table.
pub const DEFAULT_SCORE_BOOST: u32 = 15;

/// (domain, score boost). Boosts reflect how often the platform carries first-hand
/// problem descriptions.
const PLATFORM_BOOSTS: &[(&str, u32)] = &[
    ("reddit.com", 25),
    ("linkedin.com", 30),
    ("quora.com", 20),
    ("medium.com", 15),
    ("news.ycombinator.com", 20),
    ("stackoverflow.com", 25),
];

pub const B2B_PLATFORMS: &[&str] = &[
    "reddit.com",
    "linkedin.com",
    "quora.com",
    "medium.com",
    "news.ycombinator.com",
    "stackoverflow.com",
    "github.com",
    "producthunt.com",
    "indiehackers.com",
];

pub const B2C_PLATFORMS: &[&str] = &[
    "reddit.com",
    "quora.com",
    "commentcamarche.net",
    "doctissimo.fr",
    "aufeminin.com",
    "marmiton.org",
    "psychologies.com",
    "tomsguide.fr",
];

/// Business or consumer audience. Picks the platform list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    #[default]
    B2b,
    B2c,
}

impl Audience {
    pub fn from_is_b2b(is_b2b: bool) -> Self {
        if is_b2b {
            Audience::B2b
        } else {
            Audience::B2c
        }
    }

    pub fn platforms(&self) -> &'static [&'static str] {
        match self {
            Audience::B2b => B2B_PLATFORMS,
            Audience::B2c => B2C_PLATFORMS,
        }
    }
}

pub fn score_boost(platform: &str) -> u32 {
    PLATFORM_BOOSTS
        .iter()
        .find(|(domain, _)| *domain == platform)
        .map(|(_, boost)| *boost)
        .unwrap_or(DEFAULT_SCORE_BOOST)
}
