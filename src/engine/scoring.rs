use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::PoseTemplate;
use crate::constants::{
    ANGLE_PENALTY_PER_DEGREE, BASE_PLAUSIBILITY_MIN, BASE_PLAUSIBILITY_SPAN, BLEND_ANGLE_WEIGHT,
    BLEND_BASE_WEIGHT, BLEND_COMPLEXITY_WEIGHT, COMPLEXITY_PENALTY_PER_JOINT,
};
use crate::engine::types::KeypointFrame;

/// 评分引擎的质量/角度信号来源，构造时注入。
///
/// `current_angle` 返回 None 表示该关节无法从当前帧推导，
/// 评分时以目标角度代入，即零扣分。
pub trait AngleEstimator: Send {
    /// 整体检测质量基线，取值 [60, 90]
    fn base_plausibility(&mut self, frame: &KeypointFrame) -> f64;

    fn current_angle(&mut self, joint: &str, target: f64, frame: &KeypointFrame) -> Option<f64>;
}

/// 模拟估计器：真实姿态模型接入前的占位信号源，RNG 可以固定种子。
pub struct SimulatedEstimator {
    rng: StdRng,
}

impl SimulatedEstimator {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl AngleEstimator for SimulatedEstimator {
    fn base_plausibility(&mut self, _frame: &KeypointFrame) -> f64 {
        BASE_PLAUSIBILITY_MIN + self.rng.gen::<f64>() * BASE_PLAUSIBILITY_SPAN
    }

    fn current_angle(&mut self, _joint: &str, target: f64, _frame: &KeypointFrame) -> Option<f64> {
        // 围绕目标角度 ±20° 波动
        Some(target + (self.rng.gen::<f64>() - 0.5) * 40.0)
    }
}

/// 确定性估计器：基线取关键点置信度均值，角度由关键点几何推导。
/// 没有随机性，同一帧总是得到同一评分。
#[derive(Debug, Default)]
pub struct ConfidenceEstimator;

impl AngleEstimator for ConfidenceEstimator {
    fn base_plausibility(&mut self, frame: &KeypointFrame) -> f64 {
        BASE_PLAUSIBILITY_MIN + frame.mean_confidence().clamp(0.0, 1.0) * BASE_PLAUSIBILITY_SPAN
    }

    fn current_angle(&mut self, joint: &str, _target: f64, frame: &KeypointFrame) -> Option<f64> {
        let (a, b, c) = joint_triple(joint)?;
        angle_at(frame, a, b, c)
    }
}

/// 模板角度名到构成该关节角的三个关键点（端点-顶点-端点）
fn joint_triple(joint: &str) -> Option<(&'static str, &'static str, &'static str)> {
    match joint {
        "L_elbow" => Some(("left_shoulder", "left_elbow", "left_wrist")),
        "R_elbow" => Some(("right_shoulder", "right_elbow", "right_wrist")),
        "L_shoulder" => Some(("left_elbow", "left_shoulder", "left_hip")),
        "R_shoulder" => Some(("right_elbow", "right_shoulder", "right_hip")),
        "L_hip" => Some(("left_shoulder", "left_hip", "left_knee")),
        "R_hip" => Some(("right_shoulder", "right_hip", "right_knee")),
        "L_knee" => Some(("left_hip", "left_knee", "left_ankle")),
        "R_knee" => Some(("right_hip", "right_knee", "right_ankle")),
        // HeadYaw、spine_curve 等需要 3D 姿态，2D 帧无法推导
        _ => None,
    }
}

/// 顶点 b 处 ba、bc 两向量的夹角（度，[0, 180]）
fn angle_at(frame: &KeypointFrame, a: &str, b: &str, c: &str) -> Option<f64> {
    let pa = frame.get(a)?;
    let pb = frame.get(b)?;
    let pc = frame.get(c)?;

    let (v1x, v1y) = (pa.x - pb.x, pa.y - pb.y);
    let (v2x, v2y) = (pc.x - pb.x, pc.y - pb.y);

    let n1 = (v1x * v1x + v1y * v1y).sqrt();
    let n2 = (v2x * v2x + v2y * v2y).sqrt();
    if n1 == 0.0 || n2 == 0.0 {
        return None;
    }

    let cos = ((v1x * v2x + v1y * v2y) / (n1 * n2)).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}

/// 姿态相似度评分引擎。纯函数（除注入的信号源外无状态），
/// 对任意模板与帧全定义，不会失败。
pub struct ScoringEngine {
    estimator: Box<dyn AngleEstimator>,
}

impl ScoringEngine {
    pub fn new(estimator: Box<dyn AngleEstimator>) -> Self {
        Self { estimator }
    }

    /// 0-100 相似度评分：
    /// 0.7 × 角度均分 + 0.2 × 基线置信 + 0.1 × 复杂度奖励，四舍五入并夹取。
    pub fn analyze(&mut self, template: &PoseTemplate, frame: &KeypointFrame) -> u8 {
        let base = self
            .estimator
            .base_plausibility(frame)
            .clamp(BASE_PLAUSIBILITY_MIN, BASE_PLAUSIBILITY_MIN + BASE_PLAUSIBILITY_SPAN);

        let joint_count = template.angles.len();
        let complexity_bonus =
            (100.0 - COMPLEXITY_PENALTY_PER_JOINT * joint_count as f64).max(0.0);

        let mut total = 0.0;
        for (joint, &target) in &template.angles {
            let current = self
                .estimator
                .current_angle(joint, target, frame)
                .unwrap_or(target);
            let deviation = (target - current).abs();
            total += (100.0 - ANGLE_PENALTY_PER_DEGREE * deviation).max(0.0);
        }

        // 无目标角度的退化模板回退到基线分
        let average_angle_score = if joint_count > 0 {
            total / joint_count as f64
        } else {
            base
        };

        let blended = BLEND_ANGLE_WEIGHT * average_angle_score
            + BLEND_BASE_WEIGHT * base
            + BLEND_COMPLEXITY_WEIGHT * complexity_bonus;

        blended.clamp(0.0, 100.0).round() as u8
    }
}
