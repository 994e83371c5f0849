use clap::Parser;
use rollcall::cli::Cli;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(cli.log_filter())
        .with_writer(std::io::stderr)
        .init();

    let mut app = rollcall::create_default_app(cli.config.as_deref())?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("rollcall - type `help` for commands.");
    println!("{}", app.start());

    loop {
        print!("{}", app.prompt());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let reply = app.handle_line(&line).await;
        if !reply.output.is_empty() {
            println!("{}", reply.output);
        }
        if reply.quit {
            break;
        }
    }

    Ok(())
}
