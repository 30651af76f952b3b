pub mod backup;
pub mod drive;
pub mod oauth;

pub use backup::BackupService;
pub use drive::DriveClient;
pub use oauth::GoogleOAuth;
