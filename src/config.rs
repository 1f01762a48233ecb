use clap::Parser;

/// Drag the cube to spin it; let go to flick it.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "flick-cube", version, about)]
pub struct Config {
    /// Seed for the face colours (random on every run if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start with the debug overlay visible
    #[arg(long)]
    pub debug: bool,

    /// Window width
    #[arg(long, default_value_t = 700.0)]
    pub width: f64,

    /// Window height
    #[arg(long, default_value_t = 700.0)]
    pub height: f64,

    /// Window title
    #[arg(long, default_value = "Flick Cube")]
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_gives_the_defaults() {
        let config = Config::try_parse_from(["flick-cube"]).unwrap();
        assert_eq!(
            config,
            Config {
                seed: None,
                debug: false,
                width: 700.0,
                height: 700.0,
                title: "Flick Cube".to_string(),
            }
        );
    }

    #[test]
    fn parses_every_flag() {
        let config = Config::try_parse_from([
            "flick-cube",
            "--seed",
            "7",
            "--debug",
            "--width",
            "320",
            "--height",
            "240",
            "--title",
            "Cube",
        ])
        .unwrap();
        assert_eq!(config.seed, Some(7));
        assert!(config.debug);
        assert_eq!((config.width, config.height), (320.0, 240.0));
        assert_eq!(config.title, "Cube");
    }

    #[test]
    fn rejects_positional_arguments() {
        assert!(Config::try_parse_from(["flick-cube", "extra"]).is_err());
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
