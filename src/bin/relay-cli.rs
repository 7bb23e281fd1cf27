use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::UdpSocket;

use message_relay::storage::{is_missing, Store};

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Client tools for the message relay", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a message through the HTTP front door
    Send {
        username: String,
        message: String,

        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },
    /// Send a raw datagram straight to the ingest worker
    Inject {
        payload: String,

        #[arg(short, long, default_value = "127.0.0.1:5000")]
        address: String,
    },
    /// Print every stored message
    Dump {
        #[arg(short, long, default_value = "storage/data.json")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Send { username, message, url } => {
            let client = reqwest::Client::new();
            let res = client
                .post(format!("{}/message", url.trim_end_matches('/')))
                .form(&[("username", username), ("message", message)])
                .send()
                .await?;

            let status = res.status();
            let text = res.text().await?;
            if status.is_success() {
                println!("{}", text);
            } else {
                eprintln!("Error: front door returned status {}", status);
                eprintln!("Response: {}", text);
            }
        }
        Commands::Inject { payload, address } => {
            let socket = UdpSocket::bind("127.0.0.1:0").await?;
            let sent = socket.send_to(payload.as_bytes(), &address).await?;
            println!("Sent {} bytes to {}", sent, address);
        }
        Commands::Dump { path } => {
            let messages = match Store::new(&path).load().await {
                Ok(messages) => messages,
                Err(e) if is_missing(&e) => {
                    eprintln!("No store at {}", path.display());
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };
            for (timestamp, record) in &messages {
                println!("[{}] {}: {}", timestamp, record.username, record.message);
            }
            eprintln!("{} message(s)", messages.len());
        }
    }

    Ok(())
}
