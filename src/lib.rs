pub mod api;
pub mod core;
pub mod models;

/// 初始化日志，可重复调用
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .try_init();
}
