//! janus-cli
//!
//! Command-line interface for managing streaming mountpoints on a gateway.

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use janus_client::config::{apply_env_overrides, load_config, load_config_from_path};
use janus_client::{
    Client, Envelope, GatewayConfig, Jsep, LongPollHandler, Mountpoint, MountpointType,
    Result, VERSION,
};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "janus-cli",
    version = VERSION,
    about = "Manage streaming mountpoints on a Janus gateway",
    long_about = None
)]
struct Cli {
    /// Gateway address
    #[arg(long, env = "JANUS_ADDR")]
    addr: Option<String>,

    /// Configuration file (TOML or JSON)
    #[arg(long, short)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List mountpoint ids
    List,

    /// Create a mountpoint
    Create {
        /// Mountpoint name
        name: String,
        /// Mountpoint type (live, ondemand, rtp, rstp)
        #[arg(long, short = 't', default_value = "rtp")]
        mountpoint_type: MountpointType,
        /// Mountpoint id, allocated by the gateway when omitted
        #[arg(long)]
        id: Option<u64>,
        /// Description
        #[arg(long, short)]
        description: Option<String>,
        /// Audio RTP port
        #[arg(long)]
        audio_port: Option<u16>,
        /// Audio RTP payload type
        #[arg(long)]
        audio_pt: Option<u8>,
        /// Audio rtpmap, e.g. "opus/48000/2"
        #[arg(long)]
        audio_rtpmap: Option<String>,
        /// Video RTP port
        #[arg(long)]
        video_port: Option<u16>,
        /// Video RTP payload type
        #[arg(long)]
        video_pt: Option<u8>,
        /// Video rtpmap, e.g. "VP8/90000"
        #[arg(long)]
        video_rtpmap: Option<String>,
        /// Video fmtp line
        #[arg(long)]
        video_fmtp: Option<String>,
        /// Keep the mountpoint across gateway restarts
        #[arg(long)]
        permanent: bool,
    },

    /// Destroy a mountpoint
    Destroy {
        /// Mountpoint id
        id: u64,
    },

    /// Watch a mountpoint and print the gateway's offer
    Watch {
        /// Mountpoint id
        id: u64,
    },
}

/// Prints the first offer matching the watched mountpoint, then stops
struct OfferPrinter {
    mountpoint: String,
    done: CancellationToken,
}

#[async_trait]
impl LongPollHandler for OfferPrinter {
    async fn streaming_preparing(
        &mut self,
        transaction: Option<String>,
        jsep: Jsep,
    ) -> anyhow::Result<()> {
        if transaction.as_deref() == Some(self.mountpoint.as_str()) {
            println!("{}", jsep.sdp);
            self.done.cancel();
        }
        Ok(())
    }

    async fn unknown(&mut self, envelope: Envelope) -> anyhow::Result<()> {
        info!("Gateway event: {}", envelope.janus);
        Ok(())
    }
}

fn gateway_config(cli: &Cli) -> Result<GatewayConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = load_config_from_path(path)?;
            apply_env_overrides(&mut config);
            config
        }
        None => load_config()?,
    };
    if let Some(addr) = &cli.addr {
        config.addr = addr.clone();
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("janus_client=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = Client::new(gateway_config(&cli)?)?;

    let root = CancellationToken::new();
    let ctrl_c = root.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let session = client.create_session(&root).await?;
    let result = run(&cli.command, &session).await;
    session.close();

    if let Err(ref e) = result {
        error!("{}", e);
    }
    result
}

async fn run(command: &Commands, session: &janus_client::Session) -> Result<()> {
    let streaming = session.streaming_handle().await?;

    match command {
        Commands::List => {
            for id in streaming.list_mountpoints().await? {
                println!("{}", id);
            }
            Ok(())
        }
        Commands::Create {
            name,
            mountpoint_type,
            id,
            description,
            audio_port,
            audio_pt,
            audio_rtpmap,
            video_port,
            video_pt,
            video_rtpmap,
            video_fmtp,
            permanent,
        } => {
            streaming
                .create_mountpoint(Mountpoint {
                    id: *id,
                    name: Some(name.clone()),
                    description: description.clone(),
                    mountpoint_type: Some(*mountpoint_type),
                    permanent: *permanent,
                    audio: audio_port.is_some(),
                    audio_port: *audio_port,
                    audio_payload_type: *audio_pt,
                    audio_rtp_map: audio_rtpmap.clone(),
                    video: video_port.is_some(),
                    video_port: *video_port,
                    video_payload_type: *video_pt,
                    video_rtp_map: video_rtpmap.clone(),
                    video_fmtp: video_fmtp.clone(),
                    ..Default::default()
                })
                .await
        }
        Commands::Destroy { id } => streaming.destroy_mountpoint(*id).await,
        Commands::Watch { id } => {
            streaming.watch(*id).await?;

            let done = CancellationToken::new();
            let mut printer = OfferPrinter {
                mountpoint: id.to_string(),
                done: done.clone(),
            };

            tokio::select! {
                result = session.long_poll(&mut printer) => result,
                _ = done.cancelled() => Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use janus_client::Error;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_create() {
        let cli = Cli::try_parse_from([
            "janus-cli",
            "--addr",
            "http://127.0.0.1:8088/janus",
            "create",
            "cam",
            "-t",
            "live",
            "--video-port",
            "5004",
        ])
        .unwrap();

        match cli.command {
            Commands::Create {
                name,
                mountpoint_type,
                video_port,
                ..
            } => {
                assert_eq!(name, "cam");
                assert_eq!(mountpoint_type, MountpointType::Live);
                assert_eq!(video_port, Some(5004));
            }
            _ => panic!("expected create command"),
        }
    }

    #[test]
    fn test_parse_create_rtp_options() {
        let cli = Cli::try_parse_from([
            "janus-cli",
            "create",
            "cam",
            "--audio-port",
            "5002",
            "--audio-pt",
            "111",
            "--audio-rtpmap",
            "opus/48000/2",
            "--video-port",
            "5004",
            "--video-pt",
            "100",
            "--video-rtpmap",
            "VP8/90000",
            "--video-fmtp",
            "profile-level-id=42e01f",
        ])
        .unwrap();

        match cli.command {
            Commands::Create {
                mountpoint_type,
                audio_pt,
                audio_rtpmap,
                video_pt,
                video_rtpmap,
                video_fmtp,
                ..
            } => {
                assert_eq!(mountpoint_type, MountpointType::Rtp);
                assert_eq!(audio_pt, Some(111));
                assert_eq!(audio_rtpmap.as_deref(), Some("opus/48000/2"));
                assert_eq!(video_pt, Some(100));
                assert_eq!(video_rtpmap.as_deref(), Some("VP8/90000"));
                assert_eq!(video_fmtp.as_deref(), Some("profile-level-id=42e01f"));
            }
            _ => panic!("expected create command"),
        }
    }

    #[test]
    fn test_config_error_surfaces() {
        let err = Client::new(GatewayConfig::new("ftp://gateway")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
