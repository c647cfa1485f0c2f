pub mod feedback;
pub mod keypoints;
pub mod scoring;
pub mod session;
pub mod stability;
pub mod types;
