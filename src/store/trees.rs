pub const PHOTOS: &str = "photos";
pub const PHOTOS_BY_TIME: &str = "photos_by_time";
