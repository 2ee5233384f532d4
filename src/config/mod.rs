//! 应用配置
//!
//! 加载顺序：内置默认值 → `config.toml` → `config.{APP_ENV}.toml` → `ESCHOOL_*` 环境变量 → 常用环境变量覆盖。

mod r#impl;
mod structs;

pub use r#impl::DEFAULT_JWT_SECRET;
pub use structs::*;
