mod dispatcher;
mod framing;
mod game;
mod network;

use clap::Parser;
use log::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server host to connect to
    #[arg(short = 'H', long, default_value = shared::DEFAULT_HOST)]
    host: String,

    /// Server port to connect to
    #[arg(short, long, default_value_t = shared::DEFAULT_PORT)]
    port: u16,

    /// Nickname announced in the handshake
    #[arg(short, long, default_value = "billig")]
    nickname: String,

    /// Number of games to request once the handshake completes
    #[arg(short, long, default_value = "1")]
    games: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    info!("Starting bot...");
    info!("Connecting to: [{}]:{}", args.host, args.port);
    info!("Playing as {:?}, requesting {} game(s)", args.nickname, args.games);

    let mut client =
        network::Client::new(&args.host, args.port, &args.nickname, args.games).await?;

    client.run().await?;

    Ok(())
}
