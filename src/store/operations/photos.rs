use serde::{Deserialize, Serialize};

use crate::store::keys;
use crate::store::{Store, StoreError};

/// 一次拍照会话的存档记录
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
    pub id: String,
    /// 拍摄时刻，Unix 毫秒
    pub timestamp: i64,
    pub pose_id: String,
    pub pose_name: String,
    pub score: u8,
    /// base64 data URL 编码的 JPEG
    pub image_data: String,
}

impl Store {
    pub fn save_photo(&self, photo: &PhotoRecord) -> Result<(), StoreError> {
        let key = keys::photo_key(&photo.id);
        self.photos.insert(key.as_bytes(), Self::serialize(photo)?)?;

        let idx_key = keys::photos_by_time_key(photo.timestamp, &photo.id);
        self.photos_by_time
            .insert(idx_key.as_bytes(), photo.id.as_bytes())?;
        Ok(())
    }

    pub fn get_photo(&self, photo_id: &str) -> Result<Option<PhotoRecord>, StoreError> {
        let key = keys::photo_key(photo_id);
        match self.photos.get(key.as_bytes())? {
            Some(raw) => Ok(Some(Self::deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    /// 按拍摄时间倒序分页列出照片
    pub fn list_photos(&self, limit: usize, offset: usize) -> Result<Vec<PhotoRecord>, StoreError> {
        let mut photos = Vec::new();
        let mut skipped = 0usize;
        for item in self.photos_by_time.iter() {
            let (_, value) = item?;
            let photo_id = String::from_utf8(value.to_vec()).unwrap_or_default();
            if skipped < offset {
                skipped += 1;
                continue;
            }
            if let Some(photo) = self.get_photo(&photo_id)? {
                photos.push(photo);
            }
            if photos.len() >= limit {
                break;
            }
        }
        Ok(photos)
    }

    pub fn count_photos(&self) -> Result<u64, StoreError> {
        Ok(self.photos.len() as u64)
    }

    /// 删除照片及其时间索引项；返回是否确有此照片。
    pub fn delete_photo(&self, photo_id: &str) -> Result<bool, StoreError> {
        let key = keys::photo_key(photo_id);
        let existing = match self.photos.get(key.as_bytes())? {
            Some(raw) => Self::deserialize::<PhotoRecord>(&raw)?,
            None => return Ok(false),
        };

        self.photos.remove(key.as_bytes())?;
        let idx_key = keys::photos_by_time_key(existing.timestamp, photo_id);
        self.photos_by_time.remove(idx_key.as_bytes())?;
        Ok(true)
    }
}
