use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use martingale::build_info;
use martingale::constants::ANIMATION_FRAME_MS;
use martingale::sim::{run_simulations, SimConfig};
use martingale::ui::chart_scene::render_chart_scene;
use martingale::ui::playback::Playback;
use martingale::ui::setup_scene::SetupScreen;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

enum Screen {
    Setup,
    Chart,
}

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!(
                    "martingale {} ({})",
                    build_info::BUILD_DATE,
                    build_info::BUILD_COMMIT
                );
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Martingale - Betting Strategy Simulator\n");
                println!("Usage: martingale [command]\n");
                println!("Commands:");
                println!("  --version  Show version information");
                println!("  --help     Show this help message\n");
                println!("With no arguments the interactive simulator starts:");
                println!("enter the table parameters, then watch every bettor's");
                println!("balance curve replay round by round.");
                println!("For headless batch reports, use the `simulate` binary.");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown command: {}", other);
                eprintln!("Run 'martingale --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    // Screen state variables
    let mut current_screen = Screen::Setup;
    let mut setup_screen = SetupScreen::new(&SimConfig::default());
    let mut config = SimConfig::default();
    let mut playback: Option<Playback> = None;
    let mut last_frame = Instant::now();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    loop {
        match current_screen {
            Screen::Setup => {
                terminal.draw(|f| {
                    let area = f.size();
                    setup_screen.draw(f, area);
                })?;

                // Handle input
                if event::poll(Duration::from_millis(50))? {
                    if let Event::Key(key_event) = event::read()? {
                        match key_event.code {
                            KeyCode::Char(c) => {
                                setup_screen.handle_char_input(c);
                            }
                            KeyCode::Backspace => {
                                setup_screen.handle_backspace();
                            }
                            KeyCode::Down | KeyCode::Tab => {
                                setup_screen.select_next();
                            }
                            KeyCode::Up | KeyCode::BackTab => {
                                setup_screen.select_prev();
                            }
                            KeyCode::Enter => {
                                if setup_screen.is_valid() {
                                    config = setup_screen.config();
                                    let runs = run_simulations(&config);
                                    playback = Some(Playback::new(&runs, &config));
                                    last_frame = Instant::now();
                                    current_screen = Screen::Chart;
                                }
                            }
                            KeyCode::Esc => {
                                break;
                            }
                            _ => {}
                        }
                    }
                }
            }

            Screen::Chart => {
                let replay = match playback.as_mut() {
                    Some(replay) => replay,
                    None => {
                        current_screen = Screen::Setup;
                        continue;
                    }
                };

                terminal.draw(|f| {
                    let area = f.size();
                    render_chart_scene(f, area, replay);
                })?;

                // Handle input
                if event::poll(Duration::from_millis(50))? {
                    if let Event::Key(key_event) = event::read()? {
                        match key_event.code {
                            KeyCode::Char('q') | KeyCode::Char('Q') => {
                                break;
                            }
                            KeyCode::Char(' ') => {
                                replay.toggle_pause();
                            }
                            KeyCode::Char('r') | KeyCode::Char('R') => {
                                replay.restart();
                            }
                            KeyCode::Char('n') | KeyCode::Char('N') => {
                                // Fresh draws: a seeded config moves past the
                                // streams the last batch consumed.
                                config.seed = config.seed.map(|s| s + config.num_runs as u64);
                                let runs = run_simulations(&config);
                                playback = Some(Playback::new(&runs, &config));
                                last_frame = Instant::now();
                            }
                            KeyCode::Char('e') | KeyCode::Char('E') => {
                                current_screen = Screen::Setup;
                            }
                            _ => {}
                        }
                    }
                }

                // Reveal the next round on the animation cadence
                if let Some(replay) = playback.as_mut() {
                    if last_frame.elapsed() >= Duration::from_millis(ANIMATION_FRAME_MS) {
                        replay.advance();
                        last_frame = Instant::now();
                    }
                }
            }
        }
    }

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    println!("Goodbye!");

    Ok(())
}
