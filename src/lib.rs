//! Scrivel - 连载小说章节放出与付费解锁引擎
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Manuscript Context: 书稿解析与批次排序
//! - Novel Context: 章节键、分级等值对象
//! - Scheduling Context: 发布策略、排期、定价、锁定状态
//!
//! 应用层 (application/):
//! - Ports: 端口定义（Repositories, DocumentConverter, ArchiveExpander）
//! - Commands: CQRS 命令处理器（章节写操作、批量导入、策略设置）
//! - Queries: CQRS 查询处理器（章节读取、锁定状态、策略读取）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Persistence: SQLite 存储
//! - Adapters: 文本转换、压缩包展开

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
