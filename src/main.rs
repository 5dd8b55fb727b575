use clap::Parser;
use notevault::cli::{self, output, AccountAction, Cli, Commands, NoteAction};
use notevault::cli::commands;
use notevault::errors::Result;
use notevault::logging;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let settings = cli::load_settings(cli)?;

    let level = cli.log_level.as_deref().unwrap_or(&settings.log_level);
    logging::init_logging(level)?;

    match cli.command {
        Commands::Generate {
            length,
            ref alphabet,
        } => commands::generate::execute(length, alphabet),
        Commands::Keygen => commands::keygen::execute(),
        Commands::Note { ref action } => {
            let app = cli::open_app(cli, &settings)?;
            match action {
                NoteAction::Add {
                    name,
                    value,
                    secure,
                } => commands::note::add(&app, name, value.as_deref(), *secure),
                NoteAction::Get { id } => commands::note::get(&app, id),
                NoteAction::List { json } => commands::note::list(&app, *json),
                NoteAction::Update {
                    id,
                    name,
                    value,
                    secure,
                } => commands::note::update(&app, id, name.as_deref(), value.as_deref(), *secure),
                NoteAction::Delete { id } => commands::note::delete(&app, id),
            }
        }
        Commands::Account { ref action } => {
            let app = cli::open_app(cli, &settings)?;
            match action {
                AccountAction::Register { email } => commands::account::register(&app, email),
                AccountAction::Login { email } => commands::account::login(&app, email),
            }
        }
    }
}
