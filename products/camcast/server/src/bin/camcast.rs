use {
    base::{log, log_fatal},
    camcast::ServerArgs,
    com::WsServer,
    std::sync::Arc,
    stream::{CameraGuard, Control, SessionRegistry, StreamConfig, StreamSupervisor},
    video::{SourceConfig, SourceKind},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = ServerArgs::parse(std::env::args().skip(1));
    match &args.log_dir {
        Some(dir) => base::init_file_logger(dir)?,
        None => base::init_stdout_logger(),
    }

    log::info!("probing camera");
    let source_config = SourceConfig::default();
    let probed = tokio::task::spawn_blocking({
        let source_config = source_config.clone();
        move || video::probe(&source_config)
    })
    .await??;
    if probed.kind == SourceKind::Synthetic {
        log::warn!("no camera, streaming the test pattern");
    }

    let config = StreamConfig::default();
    let guard = CameraGuard::new(probed.source, source_config, &config);
    let registry = Arc::new(SessionRegistry::new());
    let supervisor = StreamSupervisor::new(guard, registry.clone(), config.clone());

    let server = match WsServer::bind(args.addr.as_str(), config.frame_capacity()).await {
        Ok(server) => server,
        Err(e) => log_fatal!("cannot listen on {}: {}", args.addr, e),
    };
    log::info!("listening on {}", server.local_addr());

    Control::new(registry, supervisor)
        .run(server, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("cannot wait for ctrl-c: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await;

    Ok(())
}
