use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use tamtam_core::{config::Config, updates::UpdateType, TamTamBot};
use tamtam_http::ReqwestTransport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tamtam_core::logging::init("tamtam")?;

    let cfg = Config::load()?;
    let transport = Arc::new(ReqwestTransport::new(&cfg)?);
    let bot = TamTamBot::new(cfg, transport);

    bot.on(UpdateType::BotStarted, |update| {
        tracing::info!(update = %update.raw(), "bot started");
    });

    match bot.get_my_info().await {
        Ok(me) => println!("{me}"),
        Err(e) => eprintln!("Failed to fetch bot info: {e}"),
    }

    if std::env::args().skip(1).any(|a| a == "--updates") {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            if let Err(e) = bot.handle_update_json(&line) {
                eprintln!("Skipping update: {e}");
            }
        }
    }

    Ok(())
}
