use log::{error, warn};

use crate::{Settings, SettingsRepository, SettingsService};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

impl<R: SettingsRepository> SettingsService for Service<R> {
    fn get_settings(&self) -> Settings {
        self.repository.read_settings().unwrap_or_else(|err| {
            warn!("failed to read settings, using defaults: {err}");
            Settings::default()
        })
    }

    fn set_settings(&self, settings: &Settings) {
        if let Err(err) = self.repository.write_settings(settings) {
            error!("failed to write settings: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Default)]
    struct MockRepository {
        settings: RefCell<Option<Result<Settings, String>>>,
        writable: bool,
    }

    impl SettingsRepository for MockRepository {
        fn read_settings(&self) -> Result<Settings, String> {
            self.settings
                .borrow()
                .clone()
                .unwrap_or_else(|| Ok(Settings::default()))
        }

        fn write_settings(&self, settings: &Settings) -> Result<(), String> {
            if !self.writable {
                return Err(String::from("quota exceeded"));
            }
            *self.settings.borrow_mut() = Some(Ok(*settings));
            Ok(())
        }
    }

    fn settings() -> Settings {
        Settings {
            muscle: Some(2),
            workout_size: 3,
            bodyweight_only: true,
        }
    }

    #[test]
    fn test_get_settings() {
        let service = Service::new(MockRepository {
            settings: RefCell::new(Some(Ok(settings()))),
            writable: true,
        });
        assert_eq!(service.get_settings(), settings());
    }

    #[test]
    fn test_get_settings_unreadable() {
        let service = Service::new(MockRepository {
            settings: RefCell::new(Some(Err(String::from("invalid json")))),
            writable: true,
        });
        assert_eq!(service.get_settings(), Settings::default());
    }

    #[test]
    fn test_set_settings() {
        let service = Service::new(MockRepository {
            writable: true,
            ..MockRepository::default()
        });
        service.set_settings(&settings());
        assert_eq!(service.get_settings(), settings());
    }

    #[test]
    fn test_set_settings_not_writable() {
        let service = Service::new(MockRepository::default());
        service.set_settings(&settings());
        assert_eq!(service.get_settings(), Settings::default());
    }
}
