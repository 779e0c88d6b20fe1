mod config;
mod flow;
mod form;
mod frame;
mod status;
#[cfg(test)]
mod testing;

use adapter::{HttpWalletConfig, HttpWalletProvider, StaticFrameSdk, WalletProvider};
use anyhow::Context;
use domain::{ChainSpec, SubmissionStatus};
use dotenvy::dotenv;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tokio_stream::{wrappers::BroadcastStream, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::form::{CommentCard, SubmitOutcome};
use crate::frame::Frame;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::new().context("Failed to load configuration")?;
    let options = settings.card_options()?;
    let chain = options.chain.clone();

    // 没有配置钱包时卡片照常渲染，提交时再报错
    let wallet: Option<Arc<dyn WalletProvider>> = match &settings.wallet.rpc_url {
        Some(rpc_url) => {
            let provider = HttpWalletProvider::new(HttpWalletConfig {
                rpc_url: rpc_url.clone(),
            });
            info!("Using wallet RPC at {}", provider.rpc_url());
            Some(Arc::new(provider) as Arc<dyn WalletProvider>)
        }
        None => {
            warn!("No wallet configured (COMMENTS_WALLET__RPC_URL)");
            None
        }
    };

    println!("{}", Frame::loading().render());

    let sdk = StaticFrameSdk::new(settings.frame.location.clone());
    let frame = Frame::boot(&sdk, wallet, options).await?;
    let card = frame
        .card()
        .context("Frame finished loading without a comment card")?;
    println!("{}", frame.render());

    let cancel_token = CancellationToken::new();
    let renderer = tokio::spawn(render_status(
        card.subscribe(),
        chain,
        cancel_token.clone(),
    ));

    tokio::select! {
        res = input_loop(
            BufReader::new(tokio::io::stdin()),
            &frame,
            card,
            cancel_token.clone(),
        ) => {
            if let Err(e) = res {
                error!("Input loop failed: {:?}", e);
            }
        },
        _ = shutdown_signal() => {},
    }

    cancel_token.cancel();
    if let Err(e) = renderer.await {
        error!("Status renderer crashed: {:?}", e);
    }
    Ok(())
}

/// 每行输入即一条评论；`/view` 重绘卡片，`/quit` 退出。
async fn input_loop<R>(
    reader: R,
    frame: &Frame,
    card: Arc<CommentCard>,
    cancel_token: CancellationToken,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = cancel_token.cancelled() => break,
        };
        let Some(line) = line else { break };

        match line.trim() {
            "/quit" | "/exit" => break,
            "/view" => {
                println!("{}", frame.render());
                continue;
            }
            _ => {}
        }

        if card.is_posting() {
            println!("Posting... the previous comment is still in flight");
            continue;
        }

        card.set_content(line);
        // 标记和草稿快照在这里同步拿到，后面的输入改不到这次提交
        match card.begin() {
            Ok(submission) => {
                let card = card.clone();
                tokio::spawn(async move {
                    card.run(submission).await;
                });
            }
            Err(SubmitOutcome::Busy) => {
                info!("Submit ignored while posting");
            }
            Err(_) => {}
        }
    }

    Ok(())
}

async fn render_status(
    rx: broadcast::Receiver<SubmissionStatus>,
    chain: ChainSpec,
    cancel_token: CancellationToken,
) {
    let mut stream = BroadcastStream::new(rx);

    loop {
        let status = tokio::select! {
            next = stream.next() => match next {
                Some(Ok(status)) => status,
                Some(Err(e)) => {
                    warn!("Status renderer lagged: {}", e);
                    continue;
                }
                None => break,
            },
            _ = cancel_token.cancelled() => break,
        };

        if status == SubmissionStatus::Idle {
            continue;
        }
        println!("{}", status);

        if !status.is_terminal() {
            continue;
        }
        if let SubmissionStatus::Success { tx_hash } = &status {
            if let Some(url) = chain.explorer_tx_url(&tx_hash.to_string()) {
                println!("View on explorer: {}", url);
            }
        }
        // 一次提交结束，空一行和下一次分开
        println!();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{options, MockWallet};

    #[tokio::test]
    async fn line_typed_while_posting_does_not_replace_the_comment() {
        let wallet = Arc::new(MockWallet::on_chain("0x2105"));
        let sdk = StaticFrameSdk::new("https://frame.local/");
        let frame = Frame::boot(
            &sdk,
            Some(wallet.clone() as Arc<dyn WalletProvider>),
            options(),
        )
        .await
        .unwrap();
        let card = frame.card().unwrap();
        let mut status = card.watch_status();

        input_loop(
            &b"first\nsecond\n"[..],
            &frame,
            card.clone(),
            CancellationToken::new(),
        )
        .await
        .unwrap();

        status.wait_for(|s| s.is_terminal()).await.unwrap();
        assert_eq!(wallet.count("eth_sendTransaction"), 1);
        assert_eq!(wallet.posted_contents(), vec!["first"]);
        assert_eq!(card.content(), "");
        assert!(!card.is_posting());
    }

    #[tokio::test]
    async fn quit_stops_before_later_lines() {
        let wallet = Arc::new(MockWallet::on_chain("0x2105"));
        let sdk = StaticFrameSdk::new("https://frame.local/");
        let frame = Frame::boot(
            &sdk,
            Some(wallet.clone() as Arc<dyn WalletProvider>),
            options(),
        )
        .await
        .unwrap();
        let card = frame.card().unwrap();

        input_loop(&b"/quit\ngm\n"[..], &frame, card.clone(), CancellationToken::new())
            .await
            .unwrap();

        assert!(wallet.calls().is_empty());
        assert_eq!(card.content(), "");
    }
}
