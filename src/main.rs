use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookswipe::app::App;
use bookswipe::config::Config;
use bookswipe::infrastructure::AppServices;
use bookswipe::terminal::{self, Command};

#[tokio::main]
async fn main() {
    // Logs go to stderr so they don't interleave with the rendered views
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookswipe=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let mut config = Config::from_env();

    // Check for --api-url CLI argument
    let args: Vec<String> = std::env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--api-url") {
        match args.get(pos + 1) {
            Some(val) => config.api_base_url = val.clone(),
            None => {
                eprintln!("--api-url needs a value");
                std::process::exit(2);
            }
        }
    }

    let services = match AppServices::from_config(&config) {
        Ok(services) => services,
        Err(e) => {
            tracing::error!("Unusable configuration: {}", e);
            std::process::exit(1);
        }
    };

    let mut app = App::new(services, config.outbox.clone());
    app.navigate("/");
    print!("{}", terminal::render(&app));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        tracing::error!("Failed to read input: {}", e);
                        break;
                    }
                };

                match terminal::parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => {
                        println!("{}", terminal::HELP);
                        continue;
                    }
                    Ok(Command::Credentials { mode, email, password }) => {
                        for action in terminal::credential_actions(&app, mode, email, password) {
                            app.dispatch(action);
                        }
                    }
                    Ok(Command::Action(action)) => app.dispatch(action),
                    Err(hint) => {
                        println!("{}", hint);
                        continue;
                    }
                }
                print!("{}", terminal::render(&app));
            }
            Some(message) = app.next_message(), if app.has_pending() => {
                app.apply(message);
                print!("{}", terminal::render(&app));
            }
        }
    }

    tracing::info!("Flushing pending feedback...");
    app.shutdown().await;
}
