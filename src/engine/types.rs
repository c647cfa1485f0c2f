use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_STABLE_FRAMES, DEFAULT_THRESHOLD, MAX_STABLE_FRAMES, MAX_THRESHOLD, MIN_STABLE_FRAMES,
    MIN_THRESHOLD,
};

/// 单个检测到的人体关键点，归一化图像坐标
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f64,
    pub y: f64,
    pub confidence: f64,
}

/// 一个检测周期产出的关键点集合，按部位名索引（如 "left_shoulder"）。
/// BTreeMap 保证序列化顺序稳定。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeypointFrame(pub BTreeMap<String, Keypoint>);

impl KeypointFrame {
    pub fn get(&self, name: &str) -> Option<&Keypoint> {
        self.0.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, kp: Keypoint) {
        self.0.insert(name.into(), kp);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 所有关键点置信度的算术平均；空帧返回 0。
    pub fn mean_confidence(&self) -> f64 {
        if self.0.is_empty() {
            return 0.0;
        }
        self.0.values().map(|kp| kp.confidence).sum::<f64>() / self.0.len() as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "zh")]
    Zh,
    #[serde(rename = "en")]
    En,
}

impl Language {
    /// 解析语言代码；"zh"/"en" 之外的值一律回退到英文。
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "zh" => Language::Zh,
            _ => Language::En,
        }
    }

    pub fn as_code(self) -> &'static str {
        match self {
            Language::Zh => "zh",
            Language::En => "en",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub improvements: Vec<String>,
    pub strong_points: Vec<String>,
}

/// 一次分析调用的完整产出，每个 tick 重新生成
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseAnalysis {
    pub score: u8,
    pub keypoints: KeypointFrame,
    pub feedback: Feedback,
    pub is_stable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraSettings {
    pub threshold: u8,
    pub stable_frames: u32,
    pub language: Language,
    pub auto_shutter: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            stable_frames: DEFAULT_STABLE_FRAMES,
            language: Language::Zh,
            auto_shutter: true,
        }
    }
}

impl CameraSettings {
    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_THRESHOLD..=MAX_THRESHOLD).contains(&self.threshold) {
            return Err(format!(
                "threshold must be in [{MIN_THRESHOLD}, {MAX_THRESHOLD}], got {}",
                self.threshold
            ));
        }
        if !(MIN_STABLE_FRAMES..=MAX_STABLE_FRAMES).contains(&self.stable_frames) {
            return Err(format!(
                "stableFrames must be in [{MIN_STABLE_FRAMES}, {MAX_STABLE_FRAMES}], got {}",
                self.stable_frames
            ));
        }
        Ok(())
    }
}
