use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::info;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use unscramble::{
    app::App,
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    game::GameViewModel,
    runtime::{EventSource, Runner},
    words::BuiltinWordList,
};

const TICK_RATE_MS: u64 = 250;

/// unscramble the word, one word at a time
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A small terminal word game: every round shows the letters of a word in random order. Type the original word to score; words never repeat within a game."
)]
pub struct Cli {
    /// built-in word list to play with
    #[clap(short = 'w', long = "words", value_enum)]
    word_list: Option<BuiltinWordList>,

    /// JSON word list to play with instead, e.g. {"name": "mine", "words": ["apple", "pear"]}
    #[clap(short = 'f', long)]
    word_file: Option<PathBuf>,

    /// points awarded for each correct guess (defaults to the word list's own value)
    #[clap(short = 's', long)]
    score_increase: Option<u32>,

    /// remember these settings for future games
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Layers the command line over the stored config.
    fn merge_into(&self, mut config: Config) -> Config {
        if let Some(list) = self.word_list {
            config.word_list = list.to_string().to_lowercase();
            config.word_file = None;
        }
        if let Some(path) = &self.word_file {
            config.word_file = Some(path.clone());
        }
        if let Some(points) = self.score_increase {
            config.score_increase = Some(points);
        }
        config
    }
}

fn init_logging() {
    let path = AppDirs::log_path();
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    if let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging();

    let store = FileConfigStore::new();
    let config = cli.merge_into(store.load());
    if cli.save_config {
        store.save(&config)?;
        info!("saved config to {}", store.path().display());
    }

    let words = config.load_word_list()?;
    let game = GameViewModel::new(words)?;

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(game);
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        EventSource::terminal(),
        Duration::from_millis(TICK_RATE_MS),
    );

    runner.run(app, |app| {
        terminal.draw(|f| f.render_widget(app, f.area()))?;
        Ok(())
    })?;

    Ok(())
}
