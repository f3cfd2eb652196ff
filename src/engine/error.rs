// ==========================================
// 工位轮换排班系统 - 引擎层错误类型
// ==========================================
// 说明: 引擎对部分可用的输入降级处理, 不返回错误;
//       仅会话状态违规与配置错误以 Err 返回
// ==========================================

use crate::config::ConfigError;
use thiserror::Error;
use uuid::Uuid;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("无效的会话状态转换: session_id={session_id}, from={from} to={to}")]
    InvalidStateTransition {
        session_id: Uuid,
        from: String,
        to: String,
    },

    #[error("会话已关闭, 不能重新生成: session_id={session_id}, status={status}")]
    SessionClosed { session_id: Uuid, status: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type EngineResult<T> = Result<T, EngineError>;
