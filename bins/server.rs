use std::process::ExitCode;

use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging() {
    // 提前加载 .env，使得 RUST_LOG / LOG_FORMAT 生效
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
    info!(service = "ship-registry", event = "logger_init", "tracing subscriber initialized");
}

fn worker_threads() -> Option<usize> {
    // 优先 config.toml，其次环境变量 TOKIO_WORKER_THREADS
    match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg.server.worker_threads,
        Err(_) => std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()),
    }
}

fn main() -> ExitCode {
    init_logging();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "ship-registry",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let threads = worker_threads();
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "ship-registry", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "ship-registry",
        event = "start",
        %service_id,
        pid,
        version,
        threads = threads.unwrap_or_default(),
        "ship registry starting"
    );

    // server::run 内部监听 Ctrl+C 并优雅停机
    match rt.block_on(server::run()) {
        Ok(()) => {
            info!(service = "ship-registry", event = "stop", %service_id, pid, "ship registry stopped normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "ship-registry", event = "run_failed", %service_id, error = %e, "server::run returned error");
            ExitCode::FAILURE
        }
    }
}
