use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};

use crate::catalog::PoseTemplate;
use crate::engine::feedback;
use crate::engine::keypoints::{KeypointSource, SyntheticSource};
use crate::engine::scoring::{ScoringEngine, SimulatedEstimator};
use crate::engine::stability::StabilityTracker;
use crate::engine::types::{CameraSettings, PoseAnalysis};

/// 一次 10Hz 检测节拍的产出
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickOutcome {
    pub analysis: PoseAnalysis,
    /// 剩余自动快门倒计时节拍；0 表示未武装
    pub countdown: u32,
    /// 本节拍是否触发拍照
    pub captured: bool,
}

/// 单个辅导会话：独占持有自己的评分历史、信号源与倒计时。
/// 会话开始时创建，模板切换或采集启停时重置，结束时销毁——
/// 不存在跨会话共享的全局实例。
pub struct CoachSession {
    id: String,
    template_id: String,
    settings: CameraSettings,
    tracker: StabilityTracker,
    scorer: ScoringEngine,
    source: Box<dyn KeypointSource + Send>,
    countdown: u32,
    created_at: DateTime<Utc>,
    last_active_at: DateTime<Utc>,
}

impl CoachSession {
    pub fn new(
        template_id: &str,
        settings: CameraSettings,
        scorer: ScoringEngine,
        source: Box<dyn KeypointSource + Send>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            template_id: template_id.to_string(),
            settings,
            tracker: StabilityTracker::new(),
            scorer,
            source,
            countdown: 0,
            created_at: now,
            last_active_at: now,
        }
    }

    /// 默认配置：模拟估计器 + 合成关键点源，种子可选（缺省取熵）。
    pub fn simulated(template_id: &str, settings: CameraSettings, seed: Option<u64>) -> Self {
        let (estimator, source) = match seed {
            Some(seed) => (
                SimulatedEstimator::from_seed(seed),
                SyntheticSource::from_seed(seed.wrapping_add(1)),
            ),
            None => (
                SimulatedEstimator::from_entropy(),
                SyntheticSource::from_entropy(),
            ),
        };
        Self::new(
            template_id,
            settings,
            ScoringEngine::new(Box::new(estimator)),
            Box::new(source),
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn template_id(&self) -> &str {
        &self.template_id
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    pub fn history_len(&self) -> usize {
        self.tracker.len()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_active_at(&self) -> DateTime<Utc> {
        self.last_active_at
    }

    /// 执行一个检测节拍：取帧、评分、记录、判稳、生成反馈，
    /// 再推进自动快门倒计时。
    ///
    /// 倒计时语义与采集端一致：稳定时从 stable_frames 武装，
    /// 每节拍减一，最后一拍触发拍照并归零；失稳立即归零，
    /// 下次进入稳定从头计数，不保留部分进度。
    pub fn tick(&mut self, template: &PoseTemplate) -> TickOutcome {
        debug_assert_eq!(template.id, self.template_id);
        self.last_active_at = Utc::now();

        let frame = self.source.next_frame();
        let score = self.scorer.analyze(template, &frame);
        self.tracker.record(score);
        let is_stable = self.tracker.is_stable(self.settings.threshold);
        let feedback = feedback::feedback(template, score, self.settings.language);

        let mut captured = false;
        if is_stable && self.settings.auto_shutter {
            if self.countdown == 0 {
                self.countdown = self.settings.stable_frames;
            } else if self.countdown == 1 {
                captured = true;
                self.countdown = 0;
            } else {
                self.countdown -= 1;
            }
        } else {
            self.countdown = 0;
        }

        TickOutcome {
            analysis: PoseAnalysis {
                score,
                keypoints: frame,
                feedback,
                is_stable,
            },
            countdown: self.countdown,
            captured,
        }
    }

    /// 切换目标模板。历史与倒计时随之清空，避免旧姿势的评分泄入。
    pub fn set_template(&mut self, template_id: &str) {
        self.template_id = template_id.to_string();
        self.reset();
    }

    pub fn reset(&mut self) {
        self.tracker.reset();
        self.countdown = 0;
        self.last_active_at = Utc::now();
    }

    pub fn is_idle_since(&self, cutoff: DateTime<Utc>) -> bool {
        self.last_active_at < cutoff
    }
}

/// 活动会话注册表。每个会话一把锁，节拍处理互斥但会话之间互不阻塞。
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Arc<Mutex<CoachSession>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session: CoachSession) -> String {
        let id = session.id().to_string();
        self.sessions
            .write()
            .await
            .insert(id.clone(), Arc::new(Mutex::new(session)));
        id
    }

    pub async fn get(&self, id: &str) -> Option<Arc<Mutex<CoachSession>>> {
        self.sessions.read().await.get(id).cloned()
    }

    pub async fn remove(&self, id: &str) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// 回收空闲超过 max_idle 的会话；正在处理节拍（锁被占用）的会话跳过。
    pub async fn prune_idle(&self, max_idle: Duration) -> usize {
        let cutoff = Utc::now() - max_idle;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| match entry.try_lock() {
            Ok(session) => !session.is_idle_since(cutoff),
            Err(_) => true,
        });
        before - sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PoseCatalog;
    use crate::engine::scoring::AngleEstimator;
    use crate::engine::types::KeypointFrame;

    /// 评分恒定的信号源，便于驱动倒计时状态机
    struct SteadyEstimator {
        base: f64,
    }

    impl AngleEstimator for SteadyEstimator {
        fn base_plausibility(&mut self, _frame: &KeypointFrame) -> f64 {
            self.base
        }
        fn current_angle(&mut self, _j: &str, target: f64, _f: &KeypointFrame) -> Option<f64> {
            Some(target)
        }
    }

    struct EmptySource;
    impl KeypointSource for EmptySource {
        fn next_frame(&mut self) -> KeypointFrame {
            KeypointFrame::default()
        }
    }

    fn steady_session(settings: CameraSettings) -> (CoachSession, PoseCatalog) {
        let catalog = PoseCatalog::builtin();
        let session = CoachSession::new(
            "pose_portrait_003",
            settings,
            ScoringEngine::new(Box::new(SteadyEstimator { base: 90.0 })),
            Box::new(EmptySource),
        );
        (session, catalog)
    }

    fn settings(stable_frames: u32) -> CameraSettings {
        CameraSettings {
            threshold: 80,
            stable_frames,
            ..CameraSettings::default()
        }
    }

    #[test]
    fn countdown_arms_after_window_fills_and_fires() {
        let (mut session, catalog) = steady_session(settings(5));
        let template = catalog.get("pose_portrait_003").unwrap();

        // 恒定满分角度 + base 90：每拍评分一致，第 5 拍起判稳
        let mut fired_at = None;
        for tick_index in 1..=20 {
            let outcome = session.tick(template);
            if tick_index < 5 {
                assert!(!outcome.analysis.is_stable);
                assert_eq!(outcome.countdown, 0);
            }
            if outcome.captured {
                fired_at = Some(tick_index);
                break;
            }
        }

        // 第 5 拍武装为 5，随后 5→4→3→2→1→触发
        assert_eq!(fired_at, Some(10));
        assert_eq!(session.countdown(), 0);
    }

    #[test]
    fn losing_stability_resets_countdown() {
        let catalog = PoseCatalog::builtin();
        let template = catalog.get("pose_portrait_003").unwrap();
        let mut session = CoachSession::new(
            "pose_portrait_003",
            settings(5),
            ScoringEngine::new(Box::new(SteadyEstimator { base: 90.0 })),
            Box::new(EmptySource),
        );

        for _ in 0..6 {
            session.tick(template);
        }
        assert!(session.countdown() > 0);

        // 人为打断稳定窗口
        session.reset();
        assert_eq!(session.countdown(), 0);
        assert_eq!(session.history_len(), 0);
    }

    #[test]
    fn auto_shutter_off_never_arms() {
        let catalog = PoseCatalog::builtin();
        let template = catalog.get("pose_portrait_003").unwrap();
        let mut session = CoachSession::new(
            "pose_portrait_003",
            CameraSettings {
                auto_shutter: false,
                ..settings(5)
            },
            ScoringEngine::new(Box::new(SteadyEstimator { base: 90.0 })),
            Box::new(EmptySource),
        );

        for _ in 0..20 {
            let outcome = session.tick(template);
            assert_eq!(outcome.countdown, 0);
            assert!(!outcome.captured);
        }
    }

    #[test]
    fn switching_template_clears_history() {
        let (mut session, catalog) = steady_session(settings(5));
        let template = catalog.get("pose_portrait_003").unwrap();
        for _ in 0..6 {
            session.tick(template);
        }
        assert!(session.history_len() >= 5);

        session.set_template("pose_elegant_005");
        assert_eq!(session.template_id(), "pose_elegant_005");
        assert_eq!(session.history_len(), 0);
        assert_eq!(session.countdown(), 0);
    }

    #[tokio::test]
    async fn registry_insert_get_remove() {
        let registry = SessionRegistry::new();
        let (session, _) = steady_session(settings(5));
        let id = registry.insert(session).await;

        assert!(registry.get(&id).await.is_some());
        assert_eq!(registry.len().await, 1);
        assert!(registry.remove(&id).await);
        assert!(registry.get(&id).await.is_none());
        assert!(!registry.remove(&id).await);
    }

    #[tokio::test]
    async fn prune_evicts_only_idle_sessions() {
        let registry = SessionRegistry::new();
        let (session, _) = steady_session(settings(5));
        let id = registry.insert(session).await;

        // 刚活动过的会话不会被回收
        assert_eq!(registry.prune_idle(Duration::seconds(60)).await, 0);
        assert!(registry.get(&id).await.is_some());

        // 零空闲窗口视所有会话为过期
        assert_eq!(registry.prune_idle(Duration::seconds(-1)).await, 1);
        assert!(registry.get(&id).await.is_none());
    }
}
