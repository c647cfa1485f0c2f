use chrono::Duration;

use crate::engine::session::SessionRegistry;

/// 回收空闲超时的辅导会话，释放其评分历史与信号源。
pub async fn run(sessions: &SessionRegistry, idle_timeout_secs: u64) {
    tracing::debug!("session_cleanup: start");
    let max_idle = Duration::seconds(idle_timeout_secs.min(i64::MAX as u64) as i64);
    let pruned = sessions.prune_idle(max_idle).await;
    if pruned > 0 {
        tracing::info!(pruned, "session_cleanup: done");
    } else {
        tracing::debug!("session_cleanup: nothing to prune");
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::session::{CoachSession, SessionRegistry};
    use crate::engine::types::CameraSettings;

    use super::*;

    #[tokio::test]
    async fn fresh_sessions_survive_cleanup() {
        let registry = SessionRegistry::new();
        let session = CoachSession::simulated("pose_portrait_003", CameraSettings::default(), Some(7));
        let id = registry.insert(session).await;

        run(&registry, 300).await;
        assert!(registry.get(&id).await.is_some());
    }

    #[tokio::test]
    async fn zero_timeout_prunes_everything() {
        let registry = SessionRegistry::new();
        let session = CoachSession::simulated("pose_portrait_003", CameraSettings::default(), Some(7));
        let id = registry.insert(session).await;

        // 等待片刻确保 last_active_at 落在 cutoff 之前
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        run(&registry, 0).await;
        assert!(registry.get(&id).await.is_none());
    }
}
