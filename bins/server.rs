use std::process::ExitCode;

use configs::AppConfig;
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

const SERVICE: &str = "cloud-kitchen";

fn runtime(worker_threads: Option<usize>) -> std::io::Result<tokio::runtime::Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads {
        builder.worker_threads(w);
    }
    builder.build()
}

fn main() -> ExitCode {
    // .env must be loaded before the subscriber reads RUST_LOG / LOG_FORMAT
    dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let instance = Uuid::new_v4();
    let pid = std::process::id();
    std::panic::set_hook(Box::new(move |info| {
        error!(service = SERVICE, event = "panic", %instance, pid, message = %info, "unhandled panic");
    }));

    let cfg = match AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = SERVICE, event = "config_invalid", error = %e, "refusing to start");
            return ExitCode::FAILURE;
        }
    };
    let rt = match runtime(cfg.server.worker_threads) {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = SERVICE, event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = SERVICE,
        event = "start",
        %instance,
        pid,
        version = env!("CARGO_PKG_VERSION"),
        addr = %format!("{}:{}", cfg.server.host, cfg.server.port),
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "cloud kitchen api starting"
    );

    match rt.block_on(server::run(cfg)) {
        Ok(()) => {
            info!(service = SERVICE, event = "stop", %instance, pid, "stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = SERVICE, event = "run_failed", error = %e, "server exited with error");
            ExitCode::FAILURE
        }
    }
}
