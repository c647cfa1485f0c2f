use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::types::{Keypoint, KeypointFrame};

/// 每帧按需产出关键点。真实后端应由姿态估计模型实现；
/// 当前由合成生成器模拟同样的输出形状。
pub trait KeypointSource {
    fn next_frame(&mut self) -> KeypointFrame;
}

/// 静止站姿的基准关键点布局（归一化坐标）
const BASE_LANDMARKS: &[(&str, f64, f64, f64)] = &[
    ("nose", 0.5, 0.15, 0.9),
    ("left_shoulder", 0.35, 0.25, 0.85),
    ("right_shoulder", 0.65, 0.25, 0.85),
    ("left_elbow", 0.25, 0.35, 0.8),
    ("right_elbow", 0.75, 0.35, 0.8),
    ("left_wrist", 0.2, 0.45, 0.75),
    ("right_wrist", 0.8, 0.45, 0.75),
    ("left_hip", 0.4, 0.6, 0.9),
    ("right_hip", 0.6, 0.6, 0.9),
    ("left_knee", 0.38, 0.8, 0.85),
    ("right_knee", 0.62, 0.8, 0.85),
];

/// 位置抖动幅度（±variation/2）
const POSITION_VARIATION: f64 = 0.05;

/// 置信度抖动幅度
const CONFIDENCE_VARIATION: f64 = 0.2;

/// 合成关键点源：基准布局加逐帧抖动，模拟实时检测。
/// RNG 在构造时注入，测试可用固定种子复现帧序列。
pub struct SyntheticSource {
    rng: StdRng,
}

impl SyntheticSource {
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

impl KeypointSource for SyntheticSource {
    fn next_frame(&mut self) -> KeypointFrame {
        let mut frame = KeypointFrame::default();
        for &(name, x, y, confidence) in BASE_LANDMARKS {
            let jx = (self.rng.gen::<f64>() - 0.5) * POSITION_VARIATION;
            let jy = (self.rng.gen::<f64>() - 0.5) * POSITION_VARIATION;
            let jc = (self.rng.gen::<f64>() - 0.5) * CONFIDENCE_VARIATION;
            frame.insert(
                name,
                Keypoint {
                    x: (x + jx).clamp(0.0, 1.0),
                    y: (y + jy).clamp(0.0, 1.0),
                    confidence: (confidence + jc).clamp(0.5, 1.0),
                },
            );
        }
        frame
    }
}
