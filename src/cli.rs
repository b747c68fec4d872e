use clap::Parser;

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "holotable", version, about = "Browse the people of the Star Wars API")]
pub struct Args {
    /// Initial search text (e.g. "skywalker")
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Initial page, starting at 1
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// API root, overrides the config file
    #[arg(long)]
    pub base_url: Option<String>,

    /// Theme name or flavor (e.g. "latte"), overrides the config file
    #[arg(short, long)]
    pub theme: Option<String>,
}

impl Args {
    /// Zero-based page index for the initial query.
    pub const fn page_index(&self) -> u32 {
        self.page.saturating_sub(1)
    }

    /// Apply the flags that override config file values.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(base_url) = &self.base_url {
            config.api.base_url.clone_from(base_url);
        }
        if let Some(theme) = &self.theme {
            config.theme.name.clone_from(theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["holotable"]).unwrap();
        assert_eq!(args.search, "");
        assert_eq!(args.page_index(), 0);

        let mut config = AppConfig::default();
        args.apply_to(&mut config);
        assert_eq!(config.api.base_url, "https://swapi.dev/api");
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "holotable",
            "--search",
            "skywalker",
            "--page",
            "3",
            "--base-url",
            "http://localhost:8080/api",
            "--theme",
            "latte",
        ])
        .unwrap();
        assert_eq!(args.page_index(), 2);

        let mut config = AppConfig::default();
        args.apply_to(&mut config);
        assert_eq!(config.api.base_url, "http://localhost:8080/api");
        assert_eq!(config.theme.name, "latte");
    }

    #[test]
    fn test_page_zero_is_rejected() {
        assert!(Args::try_parse_from(["holotable", "--page", "0"]).is_err());
    }

    #[test]
    fn test_page_size_is_not_an_option() {
        assert!(Args::try_parse_from(["holotable", "--page-size", "5"]).is_err());
    }
}
