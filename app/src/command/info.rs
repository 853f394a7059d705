use chrono::Local;
use nalja_config::Config;
use nalja_extract::DateExtractor;
use tracing::info;

/// Strategy for displaying configuration information.
///
/// This strategy outputs:
/// - Where the config file is and whether it exists
/// - Extractor settings (default time, enabled recognizers, input limit)
/// - Display settings
/// - The local time extraction would currently resolve against
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config_path = Config::config_path()?;
        let exists = config_path.exists();
        info!("Reading config from {}", config_path.display());
        let config = Config::load_or_default()?;

        println!("=== nalja Configuration ===\n");

        println!("Config File:");
        println!("  Path: {}", config_path.display());
        println!(
            "  Status: {}",
            if exists { "Found" } else { "Not found (using defaults)" }
        );
        println!();

        let extractor = DateExtractor::new(config.extractor.clone())?;
        let settings = extractor.config();
        println!("Extractor:");
        println!(
            "  Default Time: {:02}:{:02}",
            settings.default_hour, settings.default_minute
        );
        println!("  English: {}", enabled(settings.english_enabled));
        println!("  Korean: {}", enabled(settings.korean_enabled));
        println!("  Max Input Length: {} bytes", settings.max_input_len);
        println!();

        println!("Display:");
        println!("  Pretty JSON: {}", config.display.pretty_json);
        println!();

        println!("Clock:");
        let now = extractor.now();
        match now.to_zoned(&Local) {
            Some(zoned) => println!("  Local Now: {now} ({})", zoned.offset()),
            None => println!("  Local Now: {now}"),
        }

        Ok(())
    }
}

const fn enabled(flag: bool) -> &'static str {
    if flag { "enabled" } else { "disabled" }
}
