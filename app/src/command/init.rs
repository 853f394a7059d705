use nalja_config::Config;

/// Strategy for writing the default configuration to `~/nalja/config.json`.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config_path = Config::create_config()?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("🔧 Configuration options:");
        println!("   - extractor.default_hour / default_minute: time for Korean dates without 오전/오후");
        println!("   - extractor.english_enabled / korean_enabled: turn a recognizer off");
        println!("   - extractor.max_input_len: largest note accepted, in bytes");
        println!("   - display.pretty_json: indent JSON output");
        println!();
        Ok(())
    }
}
