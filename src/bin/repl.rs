use rpg_dice::{CritMethod, DiceEngine, EngineConfig, SystemKind, Verbosity};
use std::io::{self, BufRead, Write};

const HELP: &str = "\
Enter dice notation to roll it, e.g. `2d6+3 vs 10` or `1d20+7 ac 18 2d6+4`.
  :system <generic|pathfinder|vampire>
  :verbosity <xxs|xs|s|m|l|xl|xxl>
  :crit <times-two|roll-twice|add-max>
  :config     show the current settings
  :help";

/// Applies a `:setting value` line to `config`.
fn configure(config: &mut EngineConfig, line: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut words = line.split_whitespace();
    let setting = words.next().unwrap_or_default();
    let value = words.next().unwrap_or_default();
    match setting {
        ":system" => config.system = value.parse::<SystemKind>()?,
        ":verbosity" => config.verbosity = value.parse::<Verbosity>()?,
        ":crit" => config.crit_method = value.parse::<CritMethod>()?,
        _ => return Err(format!("unknown command {:?}, try :help", setting).into()),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let mut config = EngineConfig::default();
    let mut engine = DiceEngine::new(config)?;
    let mut rng = rand::thread_rng();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    print!("> ");
    io::stdout().flush()?;
    while let Some(Ok(line)) = lines.next() {
        let line = line.trim();
        if line == ":help" {
            println!("{}", HELP);
        } else if line == ":config" {
            println!(
                "system: {}, verbosity: {}, crit: {}, crit threshold: {}",
                config.system, config.verbosity, config.crit_method, config.crit_threshold
            );
        } else if line.starts_with(':') {
            match configure(&mut config, line) {
                Ok(()) => engine = DiceEngine::new(config)?,
                Err(why) => eprintln!("Error: {}", why),
            }
        } else if !line.is_empty() {
            println!("{}", engine.evaluate(line, &mut rng).output);
        }
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}
