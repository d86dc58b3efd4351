use crossterm::cursor::Show;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use dino_sura::assets::SpriteSlot;
use dino_sura::config::Config;
use dino_sura::input::{self, Command};
use dino_sura::session::Session;
use dino_sura::store::{self, JsonFileStore, MemoryStore, ScoreStore};
use dino_sura::{build_info, logging, paths, ui, Result};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct CliArgs {
    config: Option<PathBuf>,
    seed: Option<u64>,
    sprite: Option<PathBuf>,
    reset_best: bool,
    no_save: bool,
    print_config: bool,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let cli = parse_args(&args);

    if let Err(e) = run(cli) {
        eprintln!("dino-sura: {}", e);
        std::process::exit(1);
    }
}

fn parse_args(args: &[String]) -> CliArgs {
    let mut cli = CliArgs::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--config" | "-c" => {
                cli.config = Some(PathBuf::from(required_value(args, i)));
                i += 1;
            }
            "--seed" | "-s" => {
                let raw = required_value(args, i);
                match raw.parse() {
                    Ok(seed) => cli.seed = Some(seed),
                    Err(_) => {
                        eprintln!("Invalid seed: {}", raw);
                        std::process::exit(1);
                    }
                }
                i += 1;
            }
            "--sprite" => {
                cli.sprite = Some(PathBuf::from(required_value(args, i)));
                i += 1;
            }
            "--reset-best" => cli.reset_best = true,
            "--no-save" => cli.no_save = true,
            "--print-config" => cli.print_config = true,
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'dino-sura --help' for usage.");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn required_value(args: &[String], i: usize) -> &str {
    match args.get(i + 1) {
        Some(value) => value,
        None => {
            eprintln!("{} needs a value", args[i]);
            std::process::exit(1);
        }
    }
}

fn print_help() {
    println!("Dino Sura - terminal endless runner\n");
    println!("Usage: dino-sura [options]\n");
    println!("Options:");
    println!("  -c, --config <path>  Game constants TOML (default: config dir)");
    println!("  -s, --seed <n>       Seed obstacle generation");
    println!("      --sprite <path>  Player sprite text file");
    println!("      --reset-best     Clear the stored best score");
    println!("      --no-save        Keep the best score in memory only");
    println!("      --print-config   Print the effective config and exit");
    println!("  -v, --version        Show version information");
    println!("  -h, --help           Show this help message\n");
    println!("Controls: Space/Up or click to jump, R restart, M mute, Q/Esc quit");
}

fn run(cli: CliArgs) -> Result<()> {
    logging::init_file(&paths::log_path()?)?;
    log::info!("starting {}", build_info::version_line());

    let config_path = match cli.config {
        Some(path) => path,
        None => paths::config_path()?,
    };
    let mut config = Config::load(&config_path)?;
    if let Some(sprite) = cli.sprite {
        config.sprite = Some(sprite);
    }

    if cli.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let mut store: Box<dyn ScoreStore> = if cli.no_save {
        Box::new(MemoryStore::new())
    } else {
        Box::new(JsonFileStore::open(paths::store_path()?))
    };
    if cli.reset_best {
        store::save_best(store.as_mut(), 0)?;
        log::info!("best score reset");
    }

    let sprite_path = match &config.sprite {
        Some(path) => path.clone(),
        None => paths::default_sprite_path()?,
    };
    let sprite = SpriteSlot::load(sprite_path);

    let mut session = Session::new(config, store, cli.seed);

    enable_raw_mode()?;
    let result = guarded(
        || {
            let mut stdout = io::stdout();
            stdout.execute(EnterAlternateScreen)?;
            stdout.execute(EnableMouseCapture)?;
            let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
            run_loop(&mut terminal, &mut session, &sprite)
        },
        restore_terminal,
    );

    log::info!("exiting, best {}", session.best());
    result
}

/// Run `body`, then `restore` whether or not `body` got as far as it meant to.
fn guarded<T>(body: impl FnOnce() -> Result<T>, restore: impl FnOnce()) -> Result<T> {
    let result = body();
    restore();
    result
}

/// Undo raw mode, mouse capture and the alternate screen. Each step is
/// attempted even if an earlier one fails or was never applied.
fn restore_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = stdout.execute(DisableMouseCapture);
    let _ = stdout.execute(LeaveAlternateScreen);
    let _ = stdout.execute(Show);
}

fn run_loop<B: Backend, S: ScoreStore>(
    terminal: &mut Terminal<B>,
    session: &mut Session<S>,
    sprite: &SpriteSlot,
) -> Result<()> {
    let poll_timeout = Duration::from_millis(session.run().config.tick_ms);
    let mut last_frame = Instant::now();

    loop {
        let mut play_field = Rect::default();
        terminal.draw(|frame| {
            play_field = ui::draw_ui(frame, &*session, sprite);
        })?;

        if event::poll(poll_timeout)? {
            match input::map_event(&event::read()?, play_field) {
                Command::Act(action) => session.handle(action),
                Command::Quit => break,
                Command::Ignore => {}
            }
        }

        let now = Instant::now();
        let dt_ms = now.duration_since(last_frame).as_millis() as u64;
        last_frame = now;
        session.advance(dt_ms);
    }

    Ok(())
}
