use pose_coach_backend::store::operations::photos::PhotoRecord;
use pose_coach_backend::store::Store;

pub fn sample_image_data() -> String {
    "data:image/jpeg;base64,/9j/4AAQSkZJRgABAQAAAQ==".to_string()
}

pub fn seed_photos(store: &Store, count: usize) -> Vec<PhotoRecord> {
    let mut out = Vec::new();
    for idx in 0..count {
        let photo = PhotoRecord {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: 1_700_000_000_000 + idx as i64,
            pose_id: "pose_portrait_003".to_string(),
            pose_name: format!("seed-pose-{idx}"),
            score: 80,
            image_data: sample_image_data(),
        };
        store.save_photo(&photo).expect("save seed photo");
        out.push(photo);
    }
    out
}
