//! Campus Server - 课程管理服务端
//!
//! # 架构概述
//!
//! 本模块是 Campus Server 的主入口，提供以下核心功能：
//!
//! - **目录** (`api/catalog`): 公开的科目与课程目录
//! - **课程管理** (`api`): 课程、模块、内容的属主限定 CRUD
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **数据库** (`db`): 嵌入式 SQLite 存储 (sqlx)
//!
//! # 模块结构
//!
//! ```text
//! campus-server/src/
//! ├── core/          # 配置、状态、错误
//! ├── auth/          # JWT 认证、权限
//! ├── services/      # HTTP 服务
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 工具函数
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};

// Re-export unified error types from shared
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置进程环境: dotenv + 日志
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    if let Some(dir) = &log_dir {
        std::fs::create_dir_all(dir)?;
    }
    utils::logger::init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ______
  / ____/___ _____ ___  ____  __  _______
 / /   / __ `/ __ `__ \/ __ \/ / / / ___/
/ /___/ /_/ / / / / / / /_/ / /_/ (__  )
\____/\__,_/_/ /_/ /_/ .___/\__,_/____/
                    /_/
    "#
    );
}
