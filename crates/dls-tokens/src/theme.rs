use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// Theme key. Each theme maps to one mode of the remote semantic collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Default,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Self::Default, Self::Dark];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" | "light" => Ok(Self::Default),
            "dark" => Ok(Self::Dark),
            other => Err(TokenError::UnknownVariant {
                kind: "theme",
                value: other.to_string(),
            }),
        }
    }
}

/// A pair of values, one per theme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Themed<T> {
    pub default: T,
    pub dark: T,
}

impl<T> Themed<T> {
    pub fn get(&self, theme: Theme) -> &T {
        match theme {
            Theme::Default => &self.default,
            Theme::Dark => &self.dark,
        }
    }

    pub fn from_fn(mut f: impl FnMut(Theme) -> T) -> Self {
        Self {
            default: f(Theme::Default),
            dark: f(Theme::Dark),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_theme() {
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!("light".parse::<Theme>(), Ok(Theme::Default));
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn test_themed_get() {
        let pair = Themed::from_fn(|t| t.as_str().len());
        assert_eq!(*pair.get(Theme::Default), 7);
        assert_eq!(*pair.get(Theme::Dark), 4);
    }
}
