//! Application Configuration

use platform::upload::UploadStore;

#[derive(Debug, Clone)]
pub struct CampaignConfig {
    /// Where campaign images are written
    pub uploads: UploadStore,
}

impl CampaignConfig {
    pub fn new(uploads: UploadStore) -> Self {
        Self { uploads }
    }
}
