//! 消息控制台公共模块
//!
//! 提供配置加载、错误类型、响应信封、数据模型、中间件与工具函数。

pub mod config;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod response;
pub mod utils;
