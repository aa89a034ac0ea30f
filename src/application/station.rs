//! Station use case: point the local configuration at a server

use crate::domain::settings::normalize_value;
use crate::domain::SettingsRecord;
use crate::error::{Result, TamioError};
use crate::infrastructure::{ConfigRepository, SaveOutcome};
use tracing::info;

pub struct StationService<R: ConfigRepository> {
    repository: R,
}

impl<R: ConfigRepository> StationService<R> {
    pub fn new(repository: R) -> Self {
        StationService { repository }
    }

    /// Set `Server` and `Database` to `server`, and optionally the display
    /// settings the station should use.
    pub fn point_to_server(
        &self,
        server: &str,
        font_size: Option<u32>,
        list_height: Option<u32>,
    ) -> Result<SaveOutcome> {
        let server = normalize_value("Server", server)?;

        let mut record = SettingsRecord::new();
        record.set("Server", server.clone());
        record.set("Database", server.clone());
        if let Some(size) = font_size {
            record.set("GUI_Font_Size", normalize_value("GUI_Font_Size", &size.to_string())?);
        }
        if let Some(height) = list_height {
            record.set(
                "GUI_List_Height",
                normalize_value("GUI_List_Height", &height.to_string())?,
            );
        }

        // A missing config.xml is recreated from the defaults on save
        let has_target = match self.repository.has_setting("Server") {
            Ok(found) => found || self.repository.has_setting("Database")?,
            Err(TamioError::MissingFile(_)) => true,
            Err(e) => return Err(e),
        };
        if !has_target {
            return Err(TamioError::Config(
                "No Server or Database attribute found in config.xml".to_string(),
            ));
        }

        let outcome = self.repository.save_settings(&record)?;

        info!(%server, "Station now points to server");
        Ok(outcome)
    }
}
