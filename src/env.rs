//! Site variables injected at deployment time.
//!
//! The Zola config file carries `___NAME___` tokens that are replaced with
//! values supplied by the build environment. Missing values never abort the
//! build: they are reported and replaced by a placeholder naming the key.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// A required site variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SiteVar {
    /// Public base URL of the site
    SiteUrl,
    /// Site title
    SiteTitle,
    /// Time zone used by the theme
    Timezone,
    /// Repository backing the vault
    RepoUrl,
    /// Path of the landing page note
    LandingPage,
    /// Landing page heading
    LandingTitle,
    /// Landing page description
    LandingDescription,
    /// Landing page button text
    LandingButton,
}

impl SiteVar {
    /// Every required variable, in reporting order.
    pub const ALL: [Self; 8] = [
        Self::SiteUrl,
        Self::SiteTitle,
        Self::Timezone,
        Self::RepoUrl,
        Self::LandingPage,
        Self::LandingTitle,
        Self::LandingDescription,
        Self::LandingButton,
    ];

    /// Environment variable name.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::SiteUrl => "SITE_URL",
            Self::SiteTitle => "SITE_TITLE",
            Self::Timezone => "TIMEZONE",
            Self::RepoUrl => "REPO_URL",
            Self::LandingPage => "LANDING_PAGE",
            Self::LandingTitle => "LANDING_TITLE",
            Self::LandingDescription => "LANDING_DESCRIPTION",
            Self::LandingButton => "LANDING_BUTTON",
        }
    }

    /// Token replaced in the config file, e.g. `___SITE_URL___`.
    #[must_use]
    pub fn token(self) -> String {
        format!("___{}___", self.key())
    }

    /// Value substituted when the variable is not set.
    #[must_use]
    pub fn placeholder(self) -> String {
        format!("build.environment.{}", self.key())
    }
}

impl fmt::Display for SiteVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Name of the optional variable selecting section sort order.
pub const SORT_BY_KEY: &str = "SORT_BY";

/// Sort order written into every section index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    /// Sort pages by `date`
    Date,
    /// Sort pages by `title`
    #[default]
    Title,
}

impl SortBy {
    /// Interprets the `SORT_BY` flag: `date` (any case) selects
    /// [`SortBy::Date`], anything else, including absence, [`SortBy::Title`].
    #[must_use]
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some(value) if value.eq_ignore_ascii_case("date") => Self::Date,
            _ => Self::Title,
        }
    }

    /// Value of the `sort_by` frontmatter key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Title => "title",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values of the site variables as supplied by the build environment.
#[derive(Debug, Clone, Default)]
pub struct SiteEnv {
    values: BTreeMap<SiteVar, String>,
    sort_by: SortBy,
}

impl SiteEnv {
    /// Creates an environment with every variable unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the variables through `lookup`, which maps a key such as
    /// `SITE_URL` to its value.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let values = SiteVar::ALL
            .into_iter()
            .filter_map(|var| lookup(var.key()).map(|value| (var, value)))
            .collect();

        Self {
            values,
            sort_by: SortBy::from_flag(lookup(SORT_BY_KEY).as_deref()),
        }
    }

    /// Collects the variables from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Sets `var` when `value` is present.
    #[must_use]
    pub fn with(mut self, var: SiteVar, value: Option<String>) -> Self {
        if let Some(value) = value {
            self.values.insert(var, value);
        }
        self
    }

    /// Sets the section sort order.
    #[must_use]
    pub const fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    /// Returns the configured sort order.
    #[must_use]
    pub const fn sort_order(&self) -> SortBy {
        self.sort_by
    }

    /// Returns the value of `var`, if it was supplied.
    #[must_use]
    pub fn get(&self, var: SiteVar) -> Option<&str> {
        self.values.get(&var).map(String::as_str)
    }

    /// Returns the value of `var`, or its placeholder when unset.
    #[must_use]
    pub fn value(&self, var: SiteVar) -> Cow<'_, str> {
        self.get(var)
            .map_or_else(|| Cow::Owned(var.placeholder()), Cow::Borrowed)
    }

    /// Variables that were not supplied.
    #[must_use]
    pub fn missing(&self) -> Vec<SiteVar> {
        SiteVar::ALL
            .into_iter()
            .filter(|var| !self.values.contains_key(var))
            .collect()
    }

    /// Replaces every `___NAME___` token in `text` with its value.
    #[must_use]
    pub fn substitute(&self, text: &str) -> String {
        SiteVar::ALL
            .into_iter()
            .fold(text.to_string(), |acc, var| {
                acc.replace(&var.token(), &self.value(var))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_missing_variables_use_placeholder() {
        let env = SiteEnv::from_lookup(lookup_from(&[("SITE_URL", "https://notes.example")]));

        assert_eq!(env.value(SiteVar::SiteUrl), "https://notes.example");
        assert_eq!(env.value(SiteVar::SiteTitle), "build.environment.SITE_TITLE");
        assert_eq!(env.missing().len(), 7);
        assert!(!env.missing().contains(&SiteVar::SiteUrl));
    }

    #[test]
    fn test_substitute_replaces_tokens() {
        let env = SiteEnv::new()
            .with(SiteVar::SiteUrl, Some("https://notes.example".to_string()))
            .with(SiteVar::SiteTitle, Some("My Garden".to_string()));

        let config = "base_url = \"___SITE_URL___\"\ntitle = \"___SITE_TITLE___\"\ntz = \"___TIMEZONE___\"";
        let substituted = env.substitute(config);

        assert_eq!(
            substituted,
            "base_url = \"https://notes.example\"\ntitle = \"My Garden\"\ntz = \"build.environment.TIMEZONE\""
        );
    }

    #[test]
    fn test_substitute_leaves_unknown_tokens() {
        let env = SiteEnv::new();
        assert_eq!(env.substitute("x = ___OTHER___"), "x = ___OTHER___");
    }

    #[test]
    fn test_with_none_keeps_variable_unset() {
        let env = SiteEnv::new().with(SiteVar::RepoUrl, None);
        assert_eq!(env.get(SiteVar::RepoUrl), None);
        assert_eq!(env.missing().len(), SiteVar::ALL.len());
    }

    #[test]
    fn test_sort_by_flag_is_case_insensitive() {
        assert_eq!(SortBy::from_flag(Some("date")), SortBy::Date);
        assert_eq!(SortBy::from_flag(Some("DATE")), SortBy::Date);
        assert_eq!(SortBy::from_flag(Some("Date")), SortBy::Date);
        assert_eq!(SortBy::from_flag(Some("weight")), SortBy::Title);
        assert_eq!(SortBy::from_flag(None), SortBy::Title);
    }

    #[test]
    fn test_from_lookup_reads_sort_flag() {
        let env = SiteEnv::from_lookup(lookup_from(&[("SORT_BY", "Date")]));
        assert_eq!(env.sort_order(), SortBy::Date);
    }

    #[test]
    fn test_token_and_placeholder() {
        assert_eq!(SiteVar::LandingButton.token(), "___LANDING_BUTTON___");
        assert_eq!(
            SiteVar::LandingButton.placeholder(),
            "build.environment.LANDING_BUTTON"
        );
    }
}
