/// 评分历史环形缓冲容量
pub const SCORE_HISTORY_CAPACITY: usize = 10;

/// 稳定性判定窗口（最近 N 个评分）
pub const STABILITY_WINDOW: usize = 5;

/// 稳定性判定的总体方差上限
pub const STABILITY_VARIANCE_LIMIT: f64 = 50.0;

/// 自动快门评分阈值范围
pub const MIN_THRESHOLD: u8 = 70;
pub const MAX_THRESHOLD: u8 = 95;
pub const DEFAULT_THRESHOLD: u8 = 80;

/// 自动快门倒计时帧数范围
pub const MIN_STABLE_FRAMES: u32 = 5;
pub const MAX_STABLE_FRAMES: u32 = 20;
pub const DEFAULT_STABLE_FRAMES: u32 = 10;

/// 检测节拍间隔（10Hz）
pub const TICK_INTERVAL_MS: u64 = 100;

/// 每个目标关节使模板复杂度奖励降低的分数
pub const COMPLEXITY_PENALTY_PER_JOINT: f64 = 5.0;

/// 角度偏差每 1° 的扣分
pub const ANGLE_PENALTY_PER_DEGREE: f64 = 2.0;

/// 最终评分的混合权重：角度均分 / 基础置信 / 复杂度奖励
pub const BLEND_ANGLE_WEIGHT: f64 = 0.7;
pub const BLEND_BASE_WEIGHT: f64 = 0.2;
pub const BLEND_COMPLEXITY_WEIGHT: f64 = 0.1;

/// 基础置信分的取值区间 [60, 90]
pub const BASE_PLAUSIBILITY_MIN: f64 = 60.0;
pub const BASE_PLAUSIBILITY_SPAN: f64 = 30.0;

/// 照片列表默认分页大小
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// 照片列表最大分页大小
pub const MAX_PAGE_SIZE: u64 = 100;

/// base64 图片数据最大长度（约 6MB，覆盖 1280x720 JPEG）
pub const MAX_IMAGE_DATA_BYTES: usize = 6 * 1024 * 1024;
