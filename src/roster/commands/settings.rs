use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, RosterError};
use crate::model::SettingsPatch;
use crate::store::{SettingsStore, StorageBackend};

/// Keys accepted by the settings command.
pub const SETTING_KEYS: [&str; 3] = ["email-notifications", "dark-mode", "auto-save"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsAction {
    Show,
    Set(SettingsPatch),
}

/// Parses a `key value` pair such as `dark-mode on` into a patch.
pub fn parse_patch(key: &str, value: &str) -> Result<SettingsPatch> {
    let flag = match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => true,
        "false" | "off" | "no" | "0" => false,
        other => {
            return Err(RosterError::Api(format!(
                "Invalid value '{}' for {} (expected on/off)",
                other, key
            )))
        }
    };

    let mut patch = SettingsPatch::default();
    match key {
        "email-notifications" => patch.email_notifications = Some(flag),
        "dark-mode" => patch.dark_mode = Some(flag),
        "auto-save" => patch.auto_save = Some(flag),
        other => {
            return Err(RosterError::Api(format!(
                "Unknown setting: {} (expected one of: {})",
                other,
                SETTING_KEYS.join(", ")
            )))
        }
    }
    Ok(patch)
}

pub fn run<B: StorageBackend>(
    store: &mut SettingsStore<B>,
    action: SettingsAction,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let settings = match action {
        SettingsAction::Show => *store.get(),
        SettingsAction::Set(patch) => {
            let updated = store.update(&patch)?;
            result.add_message(CmdMessage::success(
                "Your preferences have been updated successfully.",
            ));
            updated
        }
    };
    Ok(result.with_settings(settings))
}
