mod ui;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use directories::ProjectDirs;
use math_arena::build_info;
use math_arena::config::GameConfig;
use math_arena::core::constants::INPUT_POLL_MS;
use math_arena::encounter::{hero_name, run_to_completion, RunState, SystemClock};
use math_arena::input::{line_input, menu_input, MenuInput};
use math_arena::summary::{HighScoreBoard, RunSummary};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use ui::menu_scene::{MainMenuScreen, MenuChoice};
use ui::setup_scene::{SetupAction, SetupScreen};
use ui::summary_scene::{draw_high_scores_scene, draw_summary_scene, SummaryAction};
use ui::terminal_source::TerminalAnswerSource;
use ui::{next_key, TerminalSession};

/// Math Arena - defeat monsters by answering arithmetic questions against the clock.
#[derive(Parser, Debug)]
#[command(name = "math-arena", about, disable_version_flag = true)]
struct Cli {
    /// Game config file (TOML). Defaults to the platform config dir, then built-in modes.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Hero name; skips the name prompt
    #[arg(short, long)]
    name: Option<String>,

    /// Difficulty number (1 = first mode); skips the difficulty prompt
    #[arg(short, long, value_name = "N")]
    difficulty: Option<usize>,

    /// Print the effective config as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Show version information
    #[arg(short = 'V', long)]
    version: bool,
}

enum Screen {
    Menu,
    HighScores,
    Setup,
    Battle { hero: String, difficulty: usize },
    Summary(Box<RunSummary>),
    Quit,
}

/// File logging under the platform cache dir. The TUI owns the terminal, so
/// nothing goes to stderr. The guard must live until exit.
fn setup_logging() -> Option<WorkerGuard> {
    let dirs = ProjectDirs::from("", "", "math-arena")?;
    let log_dir = dirs.cache_dir().join("logs");
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Could not create log directory {}: {}", log_dir.display(), e);
        return None;
    }

    let file_appender = tracing_appender::rolling::never(&log_dir, "math-arena.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!(log_dir = %log_dir.display(), "logging initialized");
    Some(guard)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("{}", build_info::version_line());
        return Ok(());
    }

    let config = GameConfig::load_or_default(cli.config.as_deref())
        .context("failed to load game config")?;
    config.validate().context("invalid game config")?;

    if cli.print_config {
        print!(
            "{}",
            config
                .to_toml_string()
                .context("failed to serialize game config")?
        );
        return Ok(());
    }

    // Checked before the terminal is taken over so the error prints cleanly.
    let preset_difficulty = match cli.difficulty {
        Some(n) => Some(
            n.checked_sub(1)
                .filter(|&index| index < config.difficulties.len())
                .with_context(|| {
                    format!(
                        "--difficulty must be between 1 and {}, got {}",
                        config.difficulties.len(),
                        n
                    )
                })?,
        ),
        None => None,
    };

    let _log_guard = setup_logging();
    tracing::info!(
        version = build_info::BUILD_COMMIT,
        difficulties = config.difficulties.len(),
        monsters = config.monsters.len(),
        seed = ?cli.seed,
        "math arena starting"
    );

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut session = TerminalSession::start().context("failed to set up terminal")?;
    let mut board = HighScoreBoard::new();
    let mut menu = MainMenuScreen::new();
    let mut setup = new_setup(&config, &cli, preset_difficulty);
    let mut last_run: Option<(String, usize)> = None;
    let poll = Duration::from_millis(INPUT_POLL_MS);

    let mut current_screen = Screen::Menu;
    loop {
        current_screen = match current_screen {
            Screen::Quit => break,
            Screen::Menu => {
                session.terminal().draw(|f| {
                    let area = f.size();
                    menu.draw(f, area);
                })?;
                match next_key(poll)?.map(|key| menu.handle(menu_input(key))) {
                    Some(Some(MenuChoice::Start)) => {
                        setup = new_setup(&config, &cli, preset_difficulty);
                        match (&cli.name, preset_difficulty) {
                            (Some(name), Some(difficulty)) => Screen::Battle {
                                hero: hero_name(name),
                                difficulty,
                            },
                            _ => Screen::Setup,
                        }
                    }
                    Some(Some(MenuChoice::HighScores)) => Screen::HighScores,
                    Some(Some(MenuChoice::Quit)) => Screen::Quit,
                    _ => Screen::Menu,
                }
            }
            Screen::HighScores => {
                session.terminal().draw(|f| {
                    let area = f.size();
                    draw_high_scores_scene(f, area, &board);
                })?;
                match next_key(poll)?.map(menu_input) {
                    Some(MenuInput::Back | MenuInput::Select) => Screen::Menu,
                    _ => Screen::HighScores,
                }
            }
            Screen::Setup => {
                session.terminal().draw(|f| {
                    let area = f.size();
                    setup.draw(f, area);
                })?;
                match next_key(poll)?.map(|key| setup.handle(line_input(key))) {
                    Some(SetupAction::Ready { hero, difficulty }) => {
                        Screen::Battle { hero, difficulty }
                    }
                    Some(SetupAction::Cancel) => Screen::Menu,
                    _ => Screen::Setup,
                }
            }
            Screen::Battle { hero, difficulty } => {
                let mut state = RunState::new(&config, difficulty, &hero, &mut rng)
                    .context("failed to start run")?;
                let mut source = TerminalAnswerSource::new(session.terminal(), &state);
                run_to_completion(&mut state, &mut source, &SystemClock, &mut rng);

                let summary = RunSummary::from_state(&state, &config.monsters);
                board.record(&summary.hero, summary.score);
                last_run = Some((hero, difficulty));
                Screen::Summary(Box::new(summary))
            }
            Screen::Summary(summary) => {
                session.terminal().draw(|f| {
                    let area = f.size();
                    draw_summary_scene(f, area, &summary, config.rules.tough_threshold, &board);
                })?;
                match next_key(poll)?.map(menu_input).and_then(SummaryAction::from_input) {
                    Some(SummaryAction::PlayAgain) => match last_run.clone() {
                        Some((hero, difficulty)) => Screen::Battle { hero, difficulty },
                        None => Screen::Setup,
                    },
                    Some(SummaryAction::Menu) => Screen::Menu,
                    None => Screen::Summary(summary),
                }
            }
        };
    }

    drop(session);
    tracing::info!(runs = board.len(), "math arena exiting");
    Ok(())
}

fn new_setup(config: &GameConfig, cli: &Cli, preset_difficulty: Option<usize>) -> SetupScreen {
    SetupScreen::new(&config.difficulties)
        .with_hero(cli.name.as_deref())
        .with_difficulty(preset_difficulty)
}
