use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser};
use color_eyre::eyre::{eyre, WrapErr};

mod app;
mod catalog;
mod editor;
mod matcher;
mod ui;
mod widgets;

use app::{Action, App};
use editor::{with_released, CrosstermSurface, Editor};

/// Fuzzy-find a note file under a directory and open it in an editor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory to scan for notes
    #[arg(required_unless_present = "usage")]
    dir: Option<PathBuf>,

    /// Editor used to open the selected note
    #[arg(long, env = "NOTES_EDITOR", default_value = "nvim")]
    editor: String,

    /// Extra argument passed to the editor before the file (repeatable)
    #[arg(long = "editor-arg", allow_hyphen_values = true)]
    editor_args: Vec<String>,

    /// File extension of notes
    #[arg(long, env = "NOTES_EXT", default_value = "n")]
    ext: String,

    /// Append logs to this file (level taken from RUST_LOG, default info)
    #[arg(long, env = "NOTES_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Generate usage spec for this tool
    #[arg(long)]
    usage: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    // Handle --usage flag to output usage spec
    if args.usage {
        let mut cmd = Args::command();
        let bin_name = std::env::args()
            .next()
            .unwrap_or_else(|| "notes".to_string());
        let mut buf = Vec::new();
        clap_usage::generate(&mut cmd, bin_name, &mut buf);
        print!("{}", String::from_utf8_lossy(&buf));
        return Ok(());
    }

    let Some(dir) = args.dir else {
        return Err(eyre!(
            "Must specify a notes directory. Use --help for usage information."
        ));
    };

    if let Some(ref log_file) = args.log_file {
        init_logging(log_file)?;
    }

    let editor = Editor::new(args.editor, args.editor_args);
    if !editor.is_available() {
        return Err(eyre!(
            "This program requires {} (choose another with --editor or NOTES_EDITOR)",
            editor.program
        ));
    }

    let root = dir
        .canonicalize()
        .wrap_err_with(|| format!("Cannot resolve notes directory '{}'", dir.display()))?;
    let notes = catalog::scan(&root, args.ext.trim_start_matches('.'))?;

    let mut terminal = ratatui::init();
    let mut app = App::new(root, notes);
    let result = run_event_loop(&mut terminal, &mut app, &editor);

    ratatui::restore();
    result
}

/// Send tracing output to `path`. The terminal belongs to the TUI, so
/// nothing is ever logged to stdout or stderr.
fn init_logging(path: &Path) -> color_eyre::Result<()> {
    use tracing_subscriber::EnvFilter;

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("Cannot open log file '{}'", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    editor: &Editor,
) -> color_eyre::Result<()> {
    use crossterm::event::{self, Event, KeyEventKind};

    loop {
        let size = terminal.size()?;
        app.set_viewport(ui::list_rows(size.height));
        terminal.draw(|frame| ui::render(frame, app))?;

        match event::read()? {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match app.handle_key(key) {
                    Action::None => {}
                    Action::Quit => return Ok(()),
                    Action::Open(candidate) => {
                        let opened = with_released(&mut CrosstermSurface, || {
                            editor.open(&app.root, &candidate)
                        })
                        .wrap_err("Failed to take the terminal back from the editor")?;
                        if let Err(err) = opened {
                            app.report_launch_error(&err);
                        }
                        // The editor drew over everything; force a full repaint
                        terminal.clear()?;
                    }
                }
            }
            Event::Resize(_, height) => {
                app.set_viewport(ui::list_rows(height));
            }
            _ => {}
        }
    }
}
