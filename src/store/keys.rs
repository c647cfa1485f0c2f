pub fn photo_key(photo_id: &str) -> String {
    photo_id.to_string()
}

/// 时间倒序二级索引键：reverse_ts 保证 sled 升序遍历即最新在前
pub fn photos_by_time_key(timestamp_ms: i64, photo_id: &str) -> String {
    let ts = timestamp_ms.max(0) as u64;
    let reverse_ts = u64::MAX - ts;
    format!("{:020}:{}", reverse_ts, photo_id)
}
