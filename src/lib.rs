//! School Admin - 学校管理后台服务
//!
//! 基于 Actix Web 构建，管理学生、教师、学科、班级与选课记录。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis），缓存已认证用户
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: JWT 认证、角色授权与限流
//! - `models`: 请求、响应与领域类型
//! - `routes`: API 路由层与前端静态资源
//! - `runtime`: 启动与关闭流程
//! - `services`: 业务校验与编排
//! - `storage`: 数据存储层（SeaORM）与演示数据
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
