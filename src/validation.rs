/// 公共验证函数模块
/// 照片与会话路由共用的输入校验。
use crate::constants::MAX_IMAGE_DATA_BYTES;

/// 验证图片数据：必须是 data URL 形式的 base64 图片，且不超过大小上限
pub fn validate_image_data(image_data: &str) -> Result<(), &'static str> {
    if image_data.is_empty() {
        return Err("图片数据不能为空");
    }
    if !image_data.starts_with("data:image/") {
        return Err("图片数据必须是 data:image/ 开头的 data URL");
    }
    if !image_data.contains(";base64,") {
        return Err("图片数据必须是 base64 编码");
    }
    if image_data.len() > MAX_IMAGE_DATA_BYTES {
        return Err("图片数据超过大小上限");
    }
    Ok(())
}

/// 验证照片评分在 0-100 范围内
pub fn validate_score(score: i64) -> Result<u8, &'static str> {
    if !(0..=100).contains(&score) {
        return Err("评分必须在0到100之间");
    }
    Ok(score as u8)
}

/// 验证姿势名称：非空且不超过 200 字符
pub fn validate_pose_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("姿势名称不能为空");
    }
    if trimmed.chars().count() > 200 {
        return Err("姿势名称不能超过200个字符");
    }
    Ok(())
}
